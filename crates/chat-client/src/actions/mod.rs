//! Gateway actions
//!
//! Each action applies one dispatch to the caches, walking
//! channel → message → reaction, and emits a client event when the walk
//! succeeds. A missing link makes the action a no-op (`None`).

mod reaction_add;
mod reaction_remove;
mod reaction_remove_all;
mod reaction_remove_emoji;

pub use reaction_add::{MessageReactionAdd, ReactionAddOutcome};
pub use reaction_remove::{MessageReactionRemove, ReactionRemoveOutcome};
pub use reaction_remove_all::{MessageReactionRemoveAll, ReactionRemoveAllOutcome};
pub use reaction_remove_emoji::{MessageReactionRemoveEmoji, RemoveEmojiOutcome};

use std::sync::Arc;

use chat_cache::Entity;
use chat_core::{EmojiPayload, MessagePayload, Partials, ReactionPayload, Snowflake};

use crate::client::Client;
use crate::structures::{Channel, Message, MessageReaction, ReactionEmoji};

/// Cached channel able to hold messages
fn get_channel(client: &Client, channel_id: Snowflake) -> Option<Arc<Channel>> {
    let channel = client.channels().get(channel_id)?;
    if channel.is_voice() {
        tracing::debug!(channel_id = %channel_id, "Ignoring reaction event in voice channel");
        return None;
    }
    Some(channel)
}

/// Cached message, or a partial stub when partial messages are enabled
fn get_message(client: &Client, channel: &Channel, message_id: Snowflake) -> Option<Arc<Message>> {
    if let Some(message) = channel.messages().get(message_id) {
        return Some(message);
    }
    if !client.partials().contains(Partials::MESSAGE) || !channel.channel_type().is_text_based() {
        return None;
    }
    Some(
        channel
            .messages()
            .add(MessagePayload::partial(message_id, channel.id()), true),
    )
}

/// Emoji of an inbound event, `None` (and a warning) when it is unusable
fn parse_emoji(emoji: &EmojiPayload) -> Option<ReactionEmoji> {
    match ReactionEmoji::try_from(emoji) {
        Ok(emoji) => Some(emoji),
        Err(e) => {
            tracing::warn!(error = %e, "Dropping reaction event");
            None
        }
    }
}

/// Cached reaction, or a partial one when partial reactions are enabled
fn get_reaction(
    client: &Client,
    message: &Message,
    emoji: &ReactionEmoji,
    user_id: Snowflake,
) -> Option<Arc<MessageReaction>> {
    if let Some(reaction) = message.reactions().get(emoji) {
        return Some(reaction);
    }
    if !client.partials().contains(Partials::REACTION) {
        return None;
    }
    materialize(client, message, emoji, user_id)
}

/// Add a reaction seen on the gateway to the message's store
///
/// The count is unknown, and the reaction partial, when the message is.
fn materialize(
    client: &Client,
    message: &Message,
    emoji: &ReactionEmoji,
    user_id: Snowflake,
) -> Option<Arc<MessageReaction>> {
    let data = ReactionPayload {
        emoji: emoji.to_payload(),
        count: if message.is_partial() { None } else { Some(0) },
        me: Some(client.user_id() == Some(user_id)),
    };
    match message.reactions().add(data, true) {
        Ok(reaction) => Some(reaction),
        Err(e) => {
            tracing::warn!(message_id = %message.id(), error = %e, "Dropping reaction event");
            None
        }
    }
}
