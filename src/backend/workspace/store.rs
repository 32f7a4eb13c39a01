/**
 * Workspace Store
 *
 * The single owner of per-team document identity. Reads normalize
 * absence to the empty shape (callers never see "not found" on reads);
 * writes replace exactly one field through the storage adapter's upsert
 * and succeed only after the adapter confirms the write.
 */

use crate::backend::error::ApiError;
use crate::backend::storage::StorageBackend;
use crate::shared::document::{DocumentField, Record, TeamDocument};
use std::sync::Arc;
use uuid::Uuid;

/// Read and write access to team workspace documents.
#[derive(Clone)]
pub struct WorkspaceStore {
    backend: Arc<dyn StorageBackend>,
}

impl WorkspaceStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Full document for a team. A team that has never written anything
    /// gets the default (all-empty) document, never an error.
    pub async fn read_document(&self, team_id: Uuid) -> Result<TeamDocument, ApiError> {
        let doc = self.backend.get_document(team_id).await?;
        Ok(doc.unwrap_or_default())
    }

    /// One field's record sequence. Absent document or field reads as empty.
    pub async fn read_field(
        &self,
        team_id: Uuid,
        field: DocumentField,
    ) -> Result<Vec<Record>, ApiError> {
        let doc = self.backend.get_document(team_id).await?;
        Ok(doc
            .map(|d| d.records(field).to_vec())
            .unwrap_or_default())
    }

    /// Replace one field of a team's document.
    ///
    /// The team must exist; writes to unknown teams are rejected rather
    /// than creating orphan documents. Returns only after the adapter has
    /// confirmed the upsert.
    pub async fn write(
        &self,
        team_id: Uuid,
        field: DocumentField,
        records: Vec<Record>,
    ) -> Result<(), ApiError> {
        if self.backend.find_team_by_id(team_id).await?.is_none() {
            return Err(ApiError::NotMember);
        }
        self.backend
            .upsert_document(team_id, &[(field, records)])
            .await?;
        Ok(())
    }
}
