//! Backend Module
//!
//! This module contains all server-side code for the TeamTask application.
//! It provides a complete Axum HTTP server with JWT authentication,
//! a dual-backend storage layer, and real-time update fan-out.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, backend selection
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`storage`** - The storage adapter contract and its two backends
//!   (PostgreSQL and in-memory)
//! - **`workspace`** - The workspace store: per-team document reads and
//!   field-granular writes
//! - **`membership`** - Registration, login, and team join/code logic
//! - **`auth`** - JWT sessions and authentication handlers
//! - **`data`** - Workspace data HTTP handlers
//! - **`realtime`** - Per-team broadcast channels and the WebSocket session
//! - **`middleware`** - Bearer-token authentication middleware
//! - **`error`** - Backend error taxonomy and HTTP mapping
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the selected storage backend
//! (behind `Arc<dyn StorageBackend>`), the workspace store, the membership
//! registry, and the per-team broadcast channels. The backend is chosen
//! once at boot and never changes for the process lifetime.
//!
//! # Error Handling
//!
//! All handlers return `Result<_, ApiError>`; `ApiError` carries the
//! client-visible status code and message, and storage failures convert
//! into it with the `?` operator.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Storage adapter contract and implementations
pub mod storage;

/// Per-team workspace document store
pub mod workspace;

/// Registration, authentication, and team membership
pub mod membership;

/// JWT sessions and auth handlers
pub mod auth;

/// Workspace data handlers
pub mod data;

/// Real-time update system
pub mod realtime;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::ApiError;
pub use server::create_app;
pub use storage::StorageBackend;
