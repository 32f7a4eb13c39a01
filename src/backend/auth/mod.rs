//! Authentication and session management.
//!
//! `sessions` owns JWT creation/verification; `handlers` are the HTTP
//! endpoints built on the membership registry.

pub mod handlers;
pub mod sessions;

pub use handlers::{get_me, join_team, login, register};
