//! Raw payloads delivered by the remote API and the gateway
//!
//! These are the `rawData` shapes the caches materialize into structures.

mod channel;
mod dispatch;
mod message;
mod reaction;

pub use channel::ChannelPayload;
pub use dispatch::{
    ReactionAddPayload, ReactionRemoveAllPayload, ReactionRemoveEmojiPayload,
    ReactionRemovePayload,
};
pub use message::MessagePayload;
pub use reaction::{EmojiPayload, ReactionPayload};
