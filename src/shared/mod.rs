//! Shared Types
//!
//! Types used on both sides of the wire: the team workspace document
//! model and the realtime WebSocket protocol. Everything here is plain
//! serde data with no backend dependencies.

pub mod document;
pub mod protocol;

pub use document::{DocumentField, Record, TeamDocument, UnknownFieldError};
pub use protocol::{ClientMessage, ServerMessage};
