//! Workspace data HTTP handlers.

pub mod handlers;

pub use handlers::{get_all_data, get_field_data, save_field_data};
