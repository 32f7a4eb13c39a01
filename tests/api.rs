//! Handler-level tests: the HTTP surface exercised directly, the way a
//! request would flow after routing and auth middleware.

mod common;

use axum::extract::{Path, State};
use axum::response::Json;
use common::memory_state;
use pretty_assertions::assert_eq;
use serde_json::json;
use teamtask::backend::auth::handlers::types::{LoginRequest, RegisterRequest};
use teamtask::backend::auth::sessions::verify_token;
use teamtask::backend::auth::{login, register};
use teamtask::backend::data::{get_all_data, get_field_data, save_field_data};
use teamtask::backend::error::ApiError;
use teamtask::backend::middleware::auth::{AuthUser, AuthenticatedUser};
use teamtask::backend::server::state::AppState;

fn auth_for(state_user: &teamtask::backend::storage::User) -> AuthUser {
    AuthUser(AuthenticatedUser {
        user_id: state_user.id,
        email: state_user.email.clone(),
        team_id: state_user.team_id,
    })
}

async fn register_via_handler(state: &AppState, username: &str, email: &str) -> String {
    let response = register(
        State(state.clone()),
        Json(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "pw123456".to_string(),
        }),
    )
    .await
    .unwrap();
    response.0.token
}

#[tokio::test]
async fn register_issues_a_verifiable_token() {
    let state = memory_state();
    let token = register_via_handler(&state, "alice", "alice@x.com").await;

    let claims = verify_token(&token).unwrap();
    assert_eq!(claims.email, "alice@x.com");
    assert!(claims.team_id.is_some(), "token carries the personal team");
}

#[tokio::test]
async fn login_after_register() {
    let state = memory_state();
    register_via_handler(&state, "alice", "alice@x.com").await;

    let response = login(
        State(state.clone()),
        Json(LoginRequest {
            email: "alice@x.com".to_string(),
            password: "pw123456".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(response.0.user.username, "alice");
    assert_eq!(response.0.user.team_name.as_deref(), Some("aliceのチーム"));
}

#[tokio::test]
async fn data_round_trip_through_handlers() {
    let state = memory_state();
    register_via_handler(&state, "alice", "alice@x.com").await;
    let user = state
        .storage
        .find_user_by_email("alice@x.com")
        .await
        .unwrap()
        .unwrap();

    // Fresh team: everything reads empty.
    let all = get_all_data(State(state.clone()), auth_for(&user)).await.unwrap();
    assert!(all.0.data.tasks.is_empty());

    let records = vec![json!({"id": "t1", "title": "x"})];
    save_field_data(
        State(state.clone()),
        auth_for(&user),
        Path("tasks".to_string()),
        Json(records.clone()),
    )
    .await
    .unwrap();

    let read = get_field_data(
        State(state.clone()),
        auth_for(&user),
        Path("tasks".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(read.0.data, records);
}

#[tokio::test]
async fn unknown_field_name_is_a_validation_error() {
    let state = memory_state();
    register_via_handler(&state, "alice", "alice@x.com").await;
    let user = state
        .storage
        .find_user_by_email("alice@x.com")
        .await
        .unwrap()
        .unwrap();

    let err = get_field_data(
        State(state.clone()),
        auth_for(&user),
        Path("droids".to_string()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}
