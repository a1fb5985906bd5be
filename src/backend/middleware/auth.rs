/**
 * Authentication Middleware
 *
 * Two policies over the same token verification:
 *
 * - **strict** (REST): a missing token is 401 "No token", a token that fails
 *   verification is 401 "Invalid token".
 * - **lenient** (socket handshake): any failure yields `None` and the
 *   connection continues anonymously.
 *
 * Neither policy checks that the user still exists; the token is trusted
 * until it expires.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::auth::sessions::identity_from_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Strict policy used by REST handlers
pub fn authenticate_strict(headers: &HeaderMap, secret: &str) -> Result<AuthenticatedUser, BackendError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::debug!("[Auth] Missing bearer token");
        BackendError::unauthorized("No token")
    })?;

    identity_from_token(token, secret).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {}", e);
        BackendError::unauthorized("Invalid token")
    })
}

/// Lenient policy used by the socket handshake
pub fn authenticate_lenient(token: Option<&str>, secret: &str) -> Option<AuthenticatedUser> {
    let token = token?;
    match identity_from_token(token, secret) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::debug!("[Auth] Socket token rejected, continuing anonymous: {}", e);
            None
        }
    }
}

/// Axum extractor for authenticated user
///
/// ```rust,ignore
/// async fn handler(AuthUser(user): AuthUser) -> String {
///     user.username
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate_strict(&parts.headers, &state.config.jwt_secret).map(AuthUser)
    }
}
