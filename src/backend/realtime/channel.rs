/**
 * Per-Team Broadcast Channels
 *
 * Fan-out of document updates to all realtime sessions of a team. Each
 * team gets its own `tokio::sync::broadcast` channel so updates never
 * cross team boundaries; the channel's FIFO ordering gives every peer
 * the same per-field delivery order as the accepted writes.
 *
 * A writer's own session id rides along as `origin`; subscribers drop
 * updates they originated themselves, so a writer never re-applies its
 * own just-sent update.
 */

use crate::shared::document::{DocumentField, Record};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Per-receiver buffer before lagging peers start dropping updates.
const CHANNEL_CAPACITY: usize = 256;

/// One field replacement, as seen by realtime peers.
#[derive(Debug, Clone)]
pub struct FieldUpdate {
    pub team_id: Uuid,
    pub field: DocumentField,
    pub records: Vec<Record>,
    /// Session that performed the write; `None` for plain HTTP writes.
    pub origin: Option<Uuid>,
}

impl FieldUpdate {
    /// True when this update is the given session's own write and must
    /// not be delivered back to it.
    pub fn is_echo(&self, session_id: Uuid) -> bool {
        self.origin == Some(session_id)
    }
}

/// Broadcast groups keyed by team id.
///
/// Channels are created lazily on first join or publish and reaped once
/// they have no receivers left (see `cleanup_inactive`).
#[derive(Clone, Default)]
pub struct TeamChannels {
    channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<FieldUpdate>>>>,
}

impl TeamChannels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a session to a team's updates.
    pub fn subscribe(&self, team_id: Uuid) -> broadcast::Receiver<FieldUpdate> {
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(team_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publish a field update to every session of the team.
    ///
    /// Delivery is best-effort: no subscribers (or only lagged ones) is
    /// not an error, and must never fail the originating write.
    pub fn publish(&self, update: FieldUpdate) -> usize {
        let sender = {
            let channels = self.channels.lock().unwrap();
            channels.get(&update.team_id).cloned()
        };
        match sender {
            Some(tx) => tx.send(update).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop channels that no session is subscribed to anymore.
    pub fn cleanup_inactive(&self) {
        self.channels
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    /// Number of live subscribers for a team (for logging and tests).
    pub fn subscriber_count(&self, team_id: Uuid) -> usize {
        self.channels
            .lock()
            .unwrap()
            .get(&team_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(team_id: Uuid, origin: Option<Uuid>) -> FieldUpdate {
        FieldUpdate {
            team_id,
            field: DocumentField::Tasks,
            records: vec![json!({"id": "t1"})],
            origin,
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let channels = TeamChannels::new();
        let team_id = Uuid::new_v4();
        let mut rx1 = channels.subscribe(team_id);
        let mut rx2 = channels.subscribe(team_id);

        let delivered = channels.publish(update(team_id, None));
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await.unwrap().team_id, team_id);
        assert_eq!(rx2.recv().await.unwrap().team_id, team_id);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let channels = TeamChannels::new();
        assert_eq!(channels.publish(update(Uuid::new_v4(), None)), 0);
    }

    #[tokio::test]
    async fn test_teams_are_isolated() {
        let channels = TeamChannels::new();
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        let _rx_a = channels.subscribe(team_a);
        let mut rx_b = channels.subscribe(team_b);

        channels.publish(update(team_a, None));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cleanup_drops_empty_channels() {
        let channels = TeamChannels::new();
        let team_id = Uuid::new_v4();
        {
            let _rx = channels.subscribe(team_id);
            assert_eq!(channels.subscriber_count(team_id), 1);
        }
        channels.cleanup_inactive();
        assert_eq!(channels.subscriber_count(team_id), 0);
    }
}
