//! MESSAGE_REACTION_REMOVE_EMOJI
//!
//! Relays the removal of every reaction of one emoji to listeners. Only
//! structures that are already cached take part: an uncached message is not
//! back-filled as a partial stub, and the reaction stays in the message's
//! store.

use std::sync::Arc;

use chat_core::ReactionRemoveEmojiPayload;
use tracing::instrument;

use crate::client::Client;
use crate::events::ClientEvent;
use crate::structures::MessageReaction;

use super::{get_channel, parse_emoji};

/// Result of a relayed emoji removal
#[derive(Debug, Clone)]
pub struct RemoveEmojiOutcome {
    pub reaction: Arc<MessageReaction>,
}

/// Resolves channel → message → reaction and emits the removal
pub struct MessageReactionRemoveEmoji<'a> {
    client: &'a Client,
}

impl<'a> MessageReactionRemoveEmoji<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Returns `None` without emitting when any link of the chain is missing
    #[instrument(skip(self, data), fields(channel_id = %data.channel_id, message_id = %data.message_id))]
    pub fn handle(&self, data: &ReactionRemoveEmojiPayload) -> Option<RemoveEmojiOutcome> {
        let channel = get_channel(self.client, data.channel_id)?;
        let message = channel.messages().get(data.message_id)?;
        let emoji = parse_emoji(&data.emoji)?;
        let reaction = message.reactions().get(&emoji)?;

        self.client.emit(ClientEvent::MessageReactionRemoveEmoji {
            reaction: Arc::clone(&reaction),
        });

        Some(RemoveEmojiOutcome { reaction })
    }
}
