//! Per-team workspace document store.

pub mod store;

pub use store::WorkspaceStore;
