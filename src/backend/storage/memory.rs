/**
 * In-Memory Storage Backend
 *
 * Non-durable stand-in used when no database is configured. A structured
 * repository over plain maps, satisfying the exact same contract as the
 * PostgreSQL adapter: create-if-absent upserts, update-only-supplied
 * fields, uniqueness of emails and join codes surfaced as conflicts.
 *
 * Nothing here survives a process restart; selection logs a warning so
 * that is never a surprise.
 */

use crate::backend::storage::{StorageBackend, StorageError, Team, User};
use crate::shared::document::{DocumentField, Record, TeamDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    teams: HashMap<Uuid, Team>,
    documents: HashMap<Uuid, TeamDocument>,
}

/// Process-local storage adapter.
#[derive(Default)]
pub struct MemoryBackend {
    state: RwLock<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn init_schema(&self) -> Result<(), StorageError> {
        // The maps are the schema. Still called on every start so the
        // adapters stay interchangeable.
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_team_by_code(&self, code: &str) -> Result<Option<Team>, StorageError> {
        let code = code.to_uppercase();
        let state = self.state.read().await;
        Ok(state.teams.values().find(|t| t.join_code == code).cloned())
    }

    async fn find_team_by_id(&self, id: Uuid) -> Result<Option<Team>, StorageError> {
        let state = self.state.read().await;
        Ok(state.teams.get(&id).cloned())
    }

    async fn get_document(&self, team_id: Uuid) -> Result<Option<TeamDocument>, StorageError> {
        let state = self.state.read().await;
        Ok(state.documents.get(&team_id).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(StorageError::Conflict("users.email".to_string()));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn insert_team(&self, team: &Team) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.teams.values().any(|t| t.join_code == team.join_code) {
            return Err(StorageError::Conflict("teams.join_code".to_string()));
        }
        state.teams.insert(team.id, team.clone());
        Ok(())
    }

    async fn upsert_document(
        &self,
        team_id: Uuid,
        fields: &[(DocumentField, Vec<Record>)],
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        let doc = state.documents.entry(team_id).or_default();
        for (field, records) in fields {
            doc.set_records(*field, records.clone());
        }
        Ok(())
    }

    async fn update_user_team(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        team_name: &str,
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if let Some(user) = state.users.get_mut(&user_id) {
            user.team_id = Some(team_id);
            user.team_name = Some(team_name.to_string());
        }
        Ok(())
    }

    async fn append_team_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if let Some(team) = state.teams.get_mut(&team_id) {
            if !team.members.contains(&user_id) {
                team.members.push(user_id);
            }
        }
        Ok(())
    }
}
