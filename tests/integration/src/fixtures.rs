//! Test fixtures and data generators
//!
//! Provides gateway dispatch bodies and REST payloads for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chat_core::{EmojiPayload, MessagePayload, ReactionPayload, Snowflake};
use serde_json::{json, Value};

/// Counter for unique ids
static COUNTER: AtomicI64 = AtomicI64::new(1_000);

/// Get a unique snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Ids of a channel and one of its messages
#[derive(Debug, Clone, Copy)]
pub struct MessageRef {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
}

impl MessageRef {
    pub fn unique() -> Self {
        Self {
            channel_id: unique_id(),
            message_id: unique_id(),
        }
    }

    /// REST representation of the message with `reactions`
    pub fn payload(&self, reactions: Vec<ReactionPayload>) -> MessagePayload {
        MessagePayload::new(self.message_id, self.channel_id, "fixture").with_reactions(reactions)
    }
}

/// CHANNEL_CREATE body (`type` 0 is text, 2 is voice)
pub fn channel_create(channel_id: Snowflake, channel_type: i16) -> Value {
    json!({ "id": channel_id, "type": channel_type, "name": "fixture" })
}

/// MESSAGE_CREATE body
pub fn message_create(msg: MessageRef, reactions: &[ReactionPayload]) -> Value {
    json!({
        "id": msg.message_id,
        "channel_id": msg.channel_id,
        "content": "fixture",
        "reactions": reactions,
    })
}

/// MESSAGE_REACTION_ADD / MESSAGE_REACTION_REMOVE body
pub fn reaction_event(msg: MessageRef, user_id: Snowflake, emoji: &EmojiPayload) -> Value {
    json!({
        "user_id": user_id,
        "channel_id": msg.channel_id,
        "message_id": msg.message_id,
        "emoji": emoji,
    })
}

/// MESSAGE_REACTION_REMOVE_ALL body
pub fn remove_all_event(msg: MessageRef) -> Value {
    json!({ "channel_id": msg.channel_id, "message_id": msg.message_id })
}

/// MESSAGE_REACTION_REMOVE_EMOJI body
pub fn remove_emoji_event(msg: MessageRef, emoji: &EmojiPayload) -> Value {
    json!({
        "channel_id": msg.channel_id,
        "message_id": msg.message_id,
        "emoji": emoji,
    })
}

/// A custom emoji with a unique id
pub fn custom_emoji(name: &str) -> EmojiPayload {
    EmojiPayload::custom(unique_id(), name)
}
