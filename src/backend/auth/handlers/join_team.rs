/**
 * Join Team Handler
 *
 * POST /api/auth/join-team. Attaches the authenticated user to an
 * existing team by join code. Joining the same team twice is harmless:
 * the member set never gains a duplicate entry.
 */

use crate::backend::auth::handlers::types::{JoinTeamRequest, JoinTeamResponse, TeamResponse};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use axum::extract::State;
use axum::response::Json;

pub async fn join_team(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<JoinTeamRequest>,
) -> Result<Json<JoinTeamResponse>, ApiError> {
    if request.team_code.trim().is_empty() {
        return Err(ApiError::validation("team code is required"));
    }

    let team = state
        .membership
        .join_team(user.user_id, &request.team_code)
        .await?;

    Ok(Json(JoinTeamResponse {
        success: true,
        team: TeamResponse::from(team),
    }))
}
