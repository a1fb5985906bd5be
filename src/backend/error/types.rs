/**
 * Backend Error Types
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised deliberately by a handler with a fixed status:
 * - 400 validation failures ("Content required", "Missing fields")
 * - 401 missing or invalid bearer token
 * - 403 acting on someone else's resource
 * - 404 unknown user or post
 *
 * ## Internal Errors
 *
 * Wrapped from the storage, filesystem, token and hashing layers. These are
 * never shown to clients.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Message returned for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Server error";

/// Backend-specific error types
///
/// ```rust,ignore
/// use plaza::backend::error::BackendError;
///
/// let err = BackendError::not_found("User not found");
/// let err = BackendError::validation("Content required");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation or decoding of client data)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn validation(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_)
            | Self::Io(_)
            | Self::Token(_)
            | Self::Password(_)
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is an internal failure rather than a client mistake
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message safe to return to the client
    pub fn message(&self) -> String {
        if self.is_internal() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.client_message().to_string(),
            other => other.to_string(),
        }
    }
}
