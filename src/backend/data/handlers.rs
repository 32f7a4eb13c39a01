/**
 * Workspace Data Handlers
 *
 * The `/api/data/...` endpoints. Reads for a user without a team resolve
 * to empty data (never an error); writes require a team. A successful
 * write is fanned out to the team's realtime sessions after — and only
 * after — the storage adapter confirms it. REST writers have no session
 * id, so their updates go to every connected session of the team.
 */

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::realtime::channel::FieldUpdate;
use crate::backend::server::state::AppState;
use crate::shared::document::{DocumentField, Record, TeamDocument};
use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub data: TeamDocument,
}

#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub data: Vec<Record>,
}

/// The requester's current team, freshly resolved from storage.
async fn current_team_id(state: &AppState, user_id: Uuid) -> Result<Option<Uuid>, ApiError> {
    let user = state.membership.get_user(user_id).await?;
    Ok(user.team_id)
}

/// GET /api/data/all - the full workspace document.
pub async fn get_all_data(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<DocumentResponse>, ApiError> {
    let data = match current_team_id(&state, auth.user_id).await? {
        Some(team_id) => state.workspace.read_document(team_id).await?,
        None => TeamDocument::default(),
    };
    Ok(Json(DocumentResponse { data }))
}

/// GET /api/data/{field} - one field's record sequence.
pub async fn get_field_data(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(field): Path<String>,
) -> Result<Json<FieldResponse>, ApiError> {
    let field: DocumentField = field.parse()?;
    let data = match current_team_id(&state, auth.user_id).await? {
        Some(team_id) => state.workspace.read_field(team_id, field).await?,
        None => Vec::new(),
    };
    Ok(Json(FieldResponse { data }))
}

/// POST /api/data/{field} - replace one field's record sequence.
pub async fn save_field_data(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(field): Path<String>,
    Json(records): Json<Vec<Record>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let field: DocumentField = field.parse()?;
    let team_id = current_team_id(&state, auth.user_id)
        .await?
        .ok_or(ApiError::NotMember)?;

    state
        .workspace
        .write(team_id, field, records.clone())
        .await?;

    // Durability confirmed; notify the team's sessions. No origin: the
    // HTTP writer has no realtime session to exclude.
    state.channels.publish(FieldUpdate {
        team_id,
        field,
        records,
        origin: None,
    });

    Ok(Json(json!({ "success": true })))
}
