//! Domain errors - error types for the domain layer
//!
//! Absence of a cached object is never an error here; lookups return `Option`.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Payload Errors
    // =========================================================================
    #[error("Emoji has neither an id nor a name")]
    EmojiWithoutIdentifier,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("Message {0} is no longer available")]
    MessageUnavailable(Snowflake),
}

impl DomainError {
    /// Get an error code string for logs and API consumers
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmojiWithoutIdentifier => "EMOJI_WITHOUT_IDENTIFIER",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::MessageUnavailable(_) => "MESSAGE_UNAVAILABLE",
        }
    }

    /// Check if this error was caused by malformed input
    pub fn is_payload(&self) -> bool {
        matches!(self, Self::EmojiWithoutIdentifier | Self::InvalidPayload(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
