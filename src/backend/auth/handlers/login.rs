/**
 * Login Handler
 *
 * POST /api/auth/login. Verifies the email/password pair and returns a
 * fresh token. Unknown email and wrong password produce the identical
 * `401` so nothing leaks about which half failed.
 */

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::backend::storage::StorageError;
use axum::extract::State;
use axum::response::Json;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.email);

    let user = state
        .membership
        .authenticate(&request.email, &request.password)
        .await?;

    let token = create_token(user.id, user.email.clone(), user.team_id)
        .map_err(|e| StorageError::backend(format!("token generation failed: {e}")))?;

    tracing::info!("User logged in: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}
