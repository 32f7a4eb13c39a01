//! TeamTask - Main Library
//!
//! A multi-tenant team workspace server. Each team owns one JSON-shaped
//! workspace document (tasks, projects, sales, ...) that authenticated
//! clients read, replace field-by-field, and observe in near-real-time
//! over a WebSocket.
//!
//! # Architecture
//!
//! - **`shared`** - Wire types: the document model and realtime protocol
//! - **`backend`** - The Axum server: storage adapters, workspace store,
//!   membership registry, realtime fan-out, HTTP/WS handlers
//!
//! The storage layer is a single adapter contract with two interchangeable
//! implementations: a durable PostgreSQL backend and an in-memory fallback
//! for development. Business logic never sees which one is active.

pub mod shared;

pub mod backend;
