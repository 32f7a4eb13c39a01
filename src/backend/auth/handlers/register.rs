/**
 * Registration Handler
 *
 * POST /api/auth/register. Creates the account, its personal team, and
 * an empty workspace document, then returns a token for immediate use.
 *
 * # Errors
 *
 * * `400 Bad Request` - missing username, email, or password
 * * `409 Conflict` - email already registered
 * * `500 Internal Server Error` - storage or token generation failure
 */

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::backend::storage::StorageError;
use axum::extract::State;
use axum::response::Json;

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Registration request for: {}", request.email);

    let (user, _team) = state
        .membership
        .register(&request.username, &request.email, &request.password)
        .await?;

    let token = create_token(user.id, user.email.clone(), user.team_id)
        .map_err(|e| StorageError::backend(format!("token generation failed: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}
