//! # chat-core
//!
//! Domain layer containing identifiers, channel kinds, the raw payloads the
//! remote API and gateway deliver, and domain errors.
//! This crate has zero dependencies on transport or caching.

pub mod error;
pub mod payloads;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use error::{DomainError, DomainResult};
pub use payloads::{
    ChannelPayload, EmojiPayload, MessagePayload, ReactionAddPayload, ReactionPayload,
    ReactionRemoveAllPayload, ReactionRemoveEmojiPayload, ReactionRemovePayload,
};
pub use value_objects::{ChannelType, Partials, Snowflake, SnowflakeParseError};
