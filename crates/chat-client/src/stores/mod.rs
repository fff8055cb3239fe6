//! Stores owning the cached structures
//!
//! Each store wraps an [`EntityCache`](chat_cache::EntityCache) scoped to
//! its parent: the client holds channels, a channel holds messages and a
//! message holds reactions.

mod channel_store;
mod message_store;
mod reaction_store;

pub use channel_store::ChannelStore;
pub use message_store::MessageStore;
pub use reaction_store::ReactionStore;
