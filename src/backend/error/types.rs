/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the backend. Every handler
 * returns `Result<_, ApiError>`; the HTTP mapping lives in `conversion.rs`.
 *
 * # Error Categories
 *
 * - Validation: missing or malformed client input, user-correctable
 * - Conflict: uniqueness violations (duplicate email, join-code clash)
 * - Not-found / auth class: reported without leaking which part was wrong
 * - Storage: adapter initialization or query failure; fatal at startup,
 *   surfaced per request at runtime
 */

use crate::backend::storage::StorageError;
use thiserror::Error;

/// Client-visible backend errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The email address is already registered.
    #[error("this email address is already registered")]
    DuplicateEmail,

    /// A storage uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Email/password pair did not match any account. Deliberately does
    /// not say which half was wrong.
    #[error("email or password is incorrect")]
    InvalidCredentials,

    /// The bearer token was missing, expired, or failed verification.
    #[error("invalid or missing access token")]
    InvalidToken,

    /// The requester is not assigned to a team (or the team is gone).
    #[error("not a member of any team")]
    NotMember,

    /// No team matches the supplied join code.
    #[error("team not found")]
    TeamNotFound,

    /// The authenticated user no longer exists in storage.
    #[error("user not found")]
    UserNotFound,

    /// The storage backend failed. Never silently ignored.
    #[error("storage backend unavailable: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Shorthand for validation failures.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
