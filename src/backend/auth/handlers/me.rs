/**
 * Get Current User Handler
 *
 * GET /api/auth/me. Returns the authenticated user's account data,
 * resolved fresh from storage so the team assignment is current even
 * when the token predates a join-team.
 */

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state.membership.get_user(auth.user_id).await?;
    Ok(Json(MeResponse {
        user: UserResponse::from(user),
    }))
}
