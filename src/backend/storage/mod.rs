/**
 * Storage Adapter Contract
 *
 * This module defines the uniform storage interface the workspace store
 * and membership registry are written against, plus the persisted models.
 * Two implementations exist:
 *
 * - `postgres` - durable, backed by parameterized sqlx queries; uniqueness
 *   is enforced by database constraints
 * - `memory` - non-durable, process-local fallback for development; a
 *   structured repository over `HashMap`s with identical semantics
 *
 * Which one serves a process is decided once at boot (see
 * `server::config`) and never changes afterwards.
 */

use crate::shared::document::{DocumentField, Record, TeamDocument};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

/// Errors surfaced by a storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness constraint was violated (duplicate email or join code).
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// The backend could not be reached or a query failed.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        // Postgres unique violations (SQLSTATE 23505) become conflicts so
        // callers can tell "duplicate email" apart from "database down".
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return StorageError::Conflict(
                    db_err.constraint().unwrap_or("unknown constraint").to_string(),
                );
            }
        }
        StorageError::Backend(err.to_string())
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plaintext
    pub password_hash: String,
    /// Nullable until the user's first team assignment
    pub team_id: Option<Uuid>,
    /// Denormalized copy of the team name, refreshed on every reassignment
    pub team_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// A team and its member set. The owner is always a member.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// Unique among active teams; stored uppercase, matched case-insensitively
    pub join_code: String,
    pub owner_id: Uuid,
    pub members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// The uniform storage contract both adapters satisfy.
///
/// Semantics the callers rely on:
/// - `init_schema` is idempotent and safe on every process start
/// - `upsert_document` creates the row if absent, else updates only the
///   supplied fields and leaves the rest untouched
/// - `append_team_member` is idempotent (no duplicate membership entries)
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Create the user/team/document structures if absent. Failure is
    /// fatal to the caller; it is never swallowed here.
    async fn init_schema(&self) -> Result<(), StorageError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError>;

    /// Join-code lookup. Case-insensitive: implementations match against
    /// the uppercased code.
    async fn find_team_by_code(&self, code: &str) -> Result<Option<Team>, StorageError>;

    async fn find_team_by_id(&self, id: Uuid) -> Result<Option<Team>, StorageError>;

    async fn get_document(&self, team_id: Uuid) -> Result<Option<TeamDocument>, StorageError>;

    async fn insert_user(&self, user: &User) -> Result<(), StorageError>;

    async fn insert_team(&self, team: &Team) -> Result<(), StorageError>;

    /// True upsert: create the document row if absent, otherwise replace
    /// only the named fields. `updated_at` advances either way. An empty
    /// field list still creates the (empty) row.
    async fn upsert_document(
        &self,
        team_id: Uuid,
        fields: &[(DocumentField, Vec<Record>)],
    ) -> Result<(), StorageError>;

    /// Reassign a user to a team, refreshing the denormalized team name.
    async fn update_user_team(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        team_name: &str,
    ) -> Result<(), StorageError>;

    /// Add a user to a team's member set. A no-op if already a member.
    async fn append_team_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), StorageError>;
}
