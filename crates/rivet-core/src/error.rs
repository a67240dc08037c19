//! Unified error types for the client boundary.

use thiserror::Error;

/// Errors surfaced by [`ChatClient`](crate::client::ChatClient) operations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The requested object does not exist (or is no longer visible).
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// The kind of object ("message", "channel", ...).
        kind: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The client is not connected to the platform.
    #[error("client not connected")]
    NotConnected,

    /// The platform rejected or failed the request.
    #[error("request failed: {0}")]
    Request(String),

    /// The operation is not supported by this client or channel.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl ApiError {
    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates a request-failed error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }
}

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;
