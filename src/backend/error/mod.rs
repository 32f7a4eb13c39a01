//! Backend Error Types
//!
//! Error taxonomy for the backend and its HTTP mapping.

pub mod conversion;
pub mod types;

pub use types::ApiError;
