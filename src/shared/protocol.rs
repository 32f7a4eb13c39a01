/**
 * Realtime Wire Protocol
 *
 * JSON messages exchanged over the `/ws` WebSocket. A session connects
 * with no team, declares its team with `join-team`, and from then on
 * receives `data-updated` notifications for every field written by a
 * peer of the same team. A session's own `data-update` writes are never
 * echoed back to it.
 */

use crate::shared::document::{DocumentField, Record};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages a client sends to the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Declare which team this session belongs to.
    #[serde(rename_all = "camelCase")]
    JoinTeam { team_id: Uuid },
    /// Replace one document field. Routed through the workspace store,
    /// exactly like a `POST /api/data/{field}` request.
    #[serde(rename_all = "camelCase")]
    DataUpdate {
        team_id: Uuid,
        field: DocumentField,
        records: Vec<Record>,
    },
}

/// Messages the server pushes to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// A peer replaced one document field.
    #[serde(rename_all = "camelCase")]
    DataUpdated {
        field: DocumentField,
        records: Vec<Record>,
    },
    /// Something about the last client message was unacceptable. The
    /// connection stays open.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_team_wire_shape() {
        let team_id = Uuid::new_v4();
        let msg: ClientMessage =
            serde_json::from_value(json!({"type": "join-team", "teamId": team_id})).unwrap();
        assert_eq!(msg, ClientMessage::JoinTeam { team_id });
    }

    #[test]
    fn test_data_update_wire_shape() {
        let team_id = Uuid::new_v4();
        let msg: ClientMessage = serde_json::from_value(json!({
            "type": "data-update",
            "teamId": team_id,
            "field": "tasks",
            "records": [{"id": "t1", "title": "x"}],
        }))
        .unwrap();
        match msg {
            ClientMessage::DataUpdate { field, records, .. } => {
                assert_eq!(field, DocumentField::Tasks);
                assert_eq!(records.len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_data_updated_round_trip() {
        let msg = ServerMessage::DataUpdated {
            field: DocumentField::MeetingMinutes,
            records: vec![json!({"id": "m1"})],
        };
        let text = serde_json::to_string(&msg).unwrap();
        assert!(text.contains("\"data-updated\""));
        assert!(text.contains("\"meetingMinutes\""));
        let back: ServerMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(back, msg);
    }
}
