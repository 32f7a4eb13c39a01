/**
 * Authentication Handler Types
 *
 * Request and response shapes shared by the register, login, join-team,
 * and me handlers. Wire names are camelCase, matching the client.
 */

use crate::backend::storage::{Team, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Join-team request
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamRequest {
    pub team_code: String,
}

/// Auth response: token plus the safe subset of the user row.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// User information without sensitive data (no password hash).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            team_id: user.team_id,
            team_name: user.team_name,
            role: user.role,
        }
    }
}

/// Join-team response
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamResponse {
    pub success: bool,
    pub team: TeamResponse,
}

/// The client-visible subset of a team.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub join_code: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            join_code: team.join_code,
        }
    }
}
