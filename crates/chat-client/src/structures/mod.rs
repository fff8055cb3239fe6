//! Shared structures held by the stores
//!
//! Every structure is handed out as `Arc` and mutated in place through
//! interior mutability, so a patch is visible to all holders.

mod channel;
mod emoji;
mod message;
mod reaction;

pub use channel::Channel;
pub use emoji::ReactionEmoji;
pub use message::{Message, MessageHandle};
pub use reaction::MessageReaction;
