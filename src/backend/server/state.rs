/**
 * Application State Management
 *
 * `AppState` is the composition root's bundle: the selected storage
 * backend and the components built on top of it, shared by every
 * handler. There is no ambient global state anywhere; anything a
 * handler touches flows through here.
 */

use crate::backend::membership::MembershipRegistry;
use crate::backend::realtime::TeamChannels;
use crate::backend::storage::StorageBackend;
use crate::backend::workspace::WorkspaceStore;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared application state.
///
/// All fields are cheap to clone: the backend sits behind an `Arc`, and
/// the stores/channels are thin handles over it.
#[derive(Clone)]
pub struct AppState {
    /// The storage adapter chosen at boot, immutable for the process
    /// lifetime.
    pub storage: Arc<dyn StorageBackend>,

    /// Per-team document reads and field-granular writes.
    pub workspace: WorkspaceStore,

    /// Registration, login, and team membership.
    pub membership: MembershipRegistry,

    /// Per-team realtime broadcast groups.
    pub channels: TeamChannels,
}

impl AppState {
    /// Assemble the state around a selected backend.
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            workspace: WorkspaceStore::new(storage.clone()),
            membership: MembershipRegistry::new(storage.clone()),
            channels: TeamChannels::new(),
            storage,
        }
    }
}

impl FromRef<AppState> for WorkspaceStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.workspace.clone()
    }
}

impl FromRef<AppState> for MembershipRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.membership.clone()
    }
}

impl FromRef<AppState> for TeamChannels {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.channels.clone()
    }
}
