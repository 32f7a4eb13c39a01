//! Test fixtures shared by the integration suites.
//!
//! All integration tests run against the in-memory backend; the two
//! adapters satisfy the same contract, so everything above the storage
//! layer behaves identically either way.

use std::sync::Arc;
use teamtask::backend::server::state::AppState;
use teamtask::backend::storage::{MemoryBackend, Team, User};

/// Fresh application state over an empty in-memory backend.
pub fn memory_state() -> AppState {
    AppState::new(Arc::new(MemoryBackend::new()))
}

/// Register a user and return the created account and team.
pub async fn register(state: &AppState, username: &str, email: &str) -> (User, Team) {
    state
        .membership
        .register(username, email, "password123")
        .await
        .expect("registration failed")
}
