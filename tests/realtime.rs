//! Realtime fan-out integration tests: writer exclusion, per-field
//! ordering, and team isolation.

mod common;

use common::{memory_state, register};
use pretty_assertions::assert_eq;
use serde_json::json;
use teamtask::backend::realtime::channel::FieldUpdate;
use teamtask::shared::document::DocumentField;
use uuid::Uuid;

#[tokio::test]
async fn write_is_delivered_to_peers_but_never_the_writer() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;

    // Three sessions joined to the same team.
    let s1 = Uuid::new_v4();
    let s2 = Uuid::new_v4();
    let s3 = Uuid::new_v4();
    let mut rx1 = state.channels.subscribe(team.id);
    let mut rx2 = state.channels.subscribe(team.id);
    let mut rx3 = state.channels.subscribe(team.id);

    // S1 writes, exactly as the socket handler does: store first, then
    // publish with the writer as origin.
    let records = vec![json!({"id": "t1", "title": "x"})];
    state
        .workspace
        .write(team.id, DocumentField::Tasks, records.clone())
        .await
        .unwrap();
    state.channels.publish(FieldUpdate {
        team_id: team.id,
        field: DocumentField::Tasks,
        records: records.clone(),
        origin: Some(s1),
    });

    // Every receiver gets the update; the echo rule suppresses it only
    // for the writer's own session.
    let u1 = rx1.recv().await.unwrap();
    let u2 = rx2.recv().await.unwrap();
    let u3 = rx3.recv().await.unwrap();
    assert!(u1.is_echo(s1), "S1 must drop its own update");
    assert!(!u2.is_echo(s2), "S2 must apply the update");
    assert!(!u3.is_echo(s3), "S3 must apply the update");
    assert_eq!(u2.records, records);
    assert_eq!(u3.records, records);
}

#[tokio::test]
async fn rest_writes_reach_every_session() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;
    let session = Uuid::new_v4();
    let mut rx = state.channels.subscribe(team.id);

    // An HTTP write has no realtime session, so origin is None and no
    // session treats it as an echo.
    state.channels.publish(FieldUpdate {
        team_id: team.id,
        field: DocumentField::Sales,
        records: vec![json!({"id": "s1"})],
        origin: None,
    });

    let update = rx.recv().await.unwrap();
    assert!(!update.is_echo(session));
}

#[tokio::test]
async fn updates_for_one_field_arrive_in_write_order() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;
    let mut rx = state.channels.subscribe(team.id);

    for i in 0..10 {
        let records = vec![json!({"seq": i})];
        state
            .workspace
            .write(team.id, DocumentField::Tasks, records.clone())
            .await
            .unwrap();
        state.channels.publish(FieldUpdate {
            team_id: team.id,
            field: DocumentField::Tasks,
            records,
            origin: None,
        });
    }

    for i in 0..10 {
        let update = rx.recv().await.unwrap();
        assert_eq!(update.records, vec![json!({"seq": i})]);
    }
}

#[tokio::test]
async fn updates_never_cross_team_boundaries() {
    let state = memory_state();
    let (_, team_a) = register(&state, "alice", "alice@x.com").await;
    let (_, team_b) = register(&state, "bob", "bob@x.com").await;

    let mut rx_b = state.channels.subscribe(team_b.id);
    state.channels.publish(FieldUpdate {
        team_id: team_a.id,
        field: DocumentField::Tasks,
        records: vec![json!({"id": "t1"})],
        origin: None,
    });

    assert!(rx_b.try_recv().is_err(), "team B must not see team A's update");
}

#[tokio::test]
async fn delivery_failure_never_fails_the_write() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;

    // No subscribers at all: the publish is a no-op, the write stands.
    state
        .workspace
        .write(team.id, DocumentField::Tasks, vec![json!({"id": "t1"})])
        .await
        .unwrap();
    let delivered = state.channels.publish(FieldUpdate {
        team_id: team.id,
        field: DocumentField::Tasks,
        records: vec![json!({"id": "t1"})],
        origin: None,
    });
    assert_eq!(delivered, 0);

    let read = state
        .workspace
        .read_field(team.id, DocumentField::Tasks)
        .await
        .unwrap();
    assert_eq!(read, vec![json!({"id": "t1"})]);
}
