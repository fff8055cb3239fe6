//! Client error types
//!
//! Failures of remote calls surface here unmodified; cache misses never do.

use chat_core::DomainError;
use std::fmt;

/// Client-wide error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Remote API errors
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal errors
    #[error("Internal client error")]
    Internal(#[source] anyhow::Error),
}

impl ClientError {
    /// HTTP status reported by the remote API, if any
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http { status: 404, .. } => "UNKNOWN_RESOURCE",
            Self::Http { status: 403, .. } => "MISSING_ACCESS",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may reasonably retry the same call
    ///
    /// Retry policy itself belongs to the caller; nothing here retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Transport(_) => true,
            _ => false,
        }
    }

    /// Create an HTTP error
    #[must_use]
    pub fn http(status: u16, message: impl fmt::Display) -> Self {
        Self::Http {
            status,
            message: message.to_string(),
        }
    }

    /// Create a transport error
    #[must_use]
    pub fn transport(msg: impl fmt::Display) -> Self {
        Self::Transport(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
