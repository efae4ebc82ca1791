//! Client error types

use shared::{Module, ValidationErrors};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the backend
    #[error("API error {code}: {message}")]
    Api {
        code: i32,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Rejected by the backend's permission check
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The role passed to the list does not allow the action
    #[error("Permission denied: {action} on {module}")]
    PermissionDenied { module: Module, action: &'static str },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload rejected before or by the backend
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Backend rejected the request as malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Errors caught client-side, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
