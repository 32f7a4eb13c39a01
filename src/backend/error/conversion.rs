/**
 * Error Conversions
 *
 * Maps `ApiError` to HTTP responses. The response body always has the
 * shape `{"message": "..."}` so clients have one error contract across
 * every endpoint.
 */

use crate::backend::error::types::ApiError;
use crate::shared::document::UnknownFieldError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::NotMember => StatusCode::BAD_REQUEST,
            ApiError::TeamNotFound | ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Storage failures carry internals; log them server-side and keep
        // the client message generic.
        let message = match &self {
            ApiError::Storage(e) => {
                tracing::error!("Storage error: {e:?}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (self.status_code(), Json(json!({ "message": message }))).into_response()
    }
}

impl From<UnknownFieldError> for ApiError {
    fn from(err: UnknownFieldError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::StorageError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::validation("missing field").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::TeamNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Storage(StorageError::backend("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_field_maps_to_validation() {
        let err: ApiError = UnknownFieldError("bogus".to_string()).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
