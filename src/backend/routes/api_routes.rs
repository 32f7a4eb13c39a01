/**
 * API Route Handlers
 *
 * Route wiring for the `/api` surface.
 *
 * ## Authentication
 * - `POST /api/auth/register` - public
 * - `POST /api/auth/login` - public
 * - `POST /api/auth/join-team` - requires bearer token
 * - `GET  /api/auth/me` - requires bearer token
 *
 * ## Workspace data (all require bearer token)
 * - `GET  /api/data/all`
 * - `GET  /api/data/{field}`
 * - `POST /api/data/{field}`
 */

use crate::backend::auth::{get_me, join_team, login, register};
use crate::backend::data::{get_all_data, get_field_data, save_field_data};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Add the `/api` routes to the router.
pub fn configure_api_routes(
    router: Router<AppState>,
    app_state: AppState,
) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/join-team", post(join_team))
        .route("/api/auth/me", get(get_me))
        .route("/api/data/all", get(get_all_data))
        .route("/api/data/{field}", get(get_field_data).post(save_field_data))
        .layer(axum::middleware::from_fn_with_state(
            app_state,
            auth_middleware,
        ));

    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .merge(protected)
}
