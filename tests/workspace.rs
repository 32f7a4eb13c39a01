//! Workspace store integration tests: absence-is-empty reads, field
//! round-trips, and partial upsert semantics.

mod common;

use common::{memory_state, register};
use pretty_assertions::assert_eq;
use serde_json::json;
use teamtask::backend::error::ApiError;
use teamtask::shared::document::DocumentField;
use uuid::Uuid;

#[tokio::test]
async fn read_of_unwritten_team_is_empty_not_an_error() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;

    for field in DocumentField::ALL {
        let records = state.workspace.read_field(team.id, field).await.unwrap();
        assert!(records.is_empty(), "{field} should read empty");
    }

    // Even a team id nobody has ever seen reads as the empty document.
    let doc = state.workspace.read_document(Uuid::new_v4()).await.unwrap();
    assert!(doc.records(DocumentField::Tasks).is_empty());
}

#[tokio::test]
async fn write_then_read_round_trips() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;

    let records = vec![json!({"id": "t1", "title": "x"})];
    state
        .workspace
        .write(team.id, DocumentField::Tasks, records.clone())
        .await
        .unwrap();

    let read = state
        .workspace
        .read_field(team.id, DocumentField::Tasks)
        .await
        .unwrap();
    assert_eq!(read, records);
}

#[tokio::test]
async fn write_updates_only_the_named_field() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;

    state
        .workspace
        .write(team.id, DocumentField::Tasks, vec![json!({"id": "A"})])
        .await
        .unwrap();
    state
        .workspace
        .write(team.id, DocumentField::Projects, vec![json!({"id": "B"})])
        .await
        .unwrap();

    state
        .workspace
        .write(team.id, DocumentField::Tasks, vec![json!({"id": "C"})])
        .await
        .unwrap();

    let doc = state.workspace.read_document(team.id).await.unwrap();
    assert_eq!(doc.records(DocumentField::Tasks), &[json!({"id": "C"})]);
    assert_eq!(doc.records(DocumentField::Projects), &[json!({"id": "B"})]);
}

#[tokio::test]
async fn write_to_unknown_team_is_rejected() {
    let state = memory_state();
    let err = state
        .workspace
        .write(Uuid::new_v4(), DocumentField::Tasks, vec![json!({})])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotMember));
}

#[tokio::test]
async fn updated_at_advances_on_write() {
    let state = memory_state();
    let (_, team) = register(&state, "alice", "alice@x.com").await;

    let before = state.workspace.read_document(team.id).await.unwrap().updated_at;
    state
        .workspace
        .write(team.id, DocumentField::Leads, vec![json!({"id": "l1"})])
        .await
        .unwrap();
    let after = state.workspace.read_document(team.id).await.unwrap().updated_at;
    assert!(after >= before);
}
