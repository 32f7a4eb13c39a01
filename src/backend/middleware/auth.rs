/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. Extracts the bearer
 * token from the Authorization header, verifies it, and attaches the
 * authenticated identity to the request extensions for handlers to pick
 * up via the `AuthUser` extractor.
 */

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Identity extracted from a verified JWT token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    /// Team claim from the token; handlers needing the current team
    /// resolve it from storage instead of trusting this.
    pub team_id: Option<Uuid>,
}

/// Authentication middleware
///
/// Returns `401 Unauthorized` when the token is missing or invalid.
pub async fn auth_middleware(
    State(_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::InvalidToken
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::InvalidToken
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {e:?}");
        ApiError::InvalidToken
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::InvalidToken)?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        team_id: claims.team_id,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user set by `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::InvalidToken
            })?;

        Ok(AuthUser(user))
    }
}
