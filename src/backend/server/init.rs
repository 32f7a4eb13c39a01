/**
 * Server Initialization
 *
 * Builds the Axum application: selects and initializes the storage
 * backend, assembles the shared state, configures the router, and
 * starts the periodic sweep that reaps broadcast channels whose last
 * subscriber is gone.
 *
 * Backend failure here is fatal by design — the process cannot serve
 * anything without working storage.
 */

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{seed_demo_data, select_backend};
use crate::backend::server::seed::ensure_demo_data;
use crate::backend::server::state::AppState;
use crate::backend::storage::StorageError;
use axum::Router;

/// Create and configure the Axum application.
pub async fn create_app() -> Result<Router, StorageError> {
    tracing::info!("Initializing TeamTask backend server");

    let storage = select_backend().await?;
    let app_state = AppState::new(storage);

    if seed_demo_data() {
        if let Err(e) = ensure_demo_data(&app_state).await {
            // Seeding is a convenience; a failure must not keep the
            // server from starting.
            tracing::warn!("Demo data seeding failed: {e}");
        }
    }

    // Reap broadcast channels with no remaining subscribers.
    let cleanup_channels = app_state.channels.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            cleanup_channels.cleanup_inactive();
            tracing::debug!("Cleaned up inactive team broadcast channels");
        }
    });

    tracing::info!("Router configured");
    Ok(create_router(app_state))
}
