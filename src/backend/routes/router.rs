/**
 * Router Configuration
 *
 * Assembles the complete route table:
 *
 * - `/api/auth/...` - registration, login, join-team, current user
 * - `/api/data/...` - workspace document reads/writes (authenticated)
 * - `/ws` - realtime WebSocket (token via query parameter)
 * - `/api/health` - liveness probe
 *
 * CORS is open: this server fronts browser clients served from a
 * different origin during development.
 */

use crate::backend::realtime::socket::handle_socket_upgrade;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router {
    let router = Router::new()
        .route("/ws", get(handle_socket_upgrade))
        .route("/api/health", get(health));

    let router = configure_api_routes(router, app_state.clone());

    router.layer(CorsLayer::permissive()).with_state(app_state)
}

/// GET /api/health - liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}
