//! MESSAGE_REACTION_REMOVE

use std::sync::Arc;

use chat_cache::Entity;
use chat_core::{ReactionRemovePayload, Snowflake};
use tracing::instrument;

use crate::client::Client;
use crate::events::ClientEvent;
use crate::structures::{Message, MessageReaction};

use super::{get_channel, get_message, get_reaction, parse_emoji};

/// Result of a handled reaction removal
#[derive(Debug, Clone)]
pub struct ReactionRemoveOutcome {
    pub message: Arc<Message>,
    pub reaction: Arc<MessageReaction>,
    pub user_id: Snowflake,
}

/// Forgets a user's reaction, evicting the reaction once nobody is left
pub struct MessageReactionRemove<'a> {
    client: &'a Client,
}

impl<'a> MessageReactionRemove<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self, data), fields(message_id = %data.message_id, user_id = %data.user_id))]
    pub fn handle(&self, data: &ReactionRemovePayload) -> Option<ReactionRemoveOutcome> {
        let channel = get_channel(self.client, data.channel_id)?;
        let message = get_message(self.client, &channel, data.message_id)?;
        let emoji = parse_emoji(&data.emoji)?;
        let reaction = get_reaction(self.client, &message, &emoji, data.user_id)?;

        reaction.remove_user(data.user_id, self.client.user_id());
        if !reaction.is_partial() && reaction.is_empty() {
            message.reactions().cache().remove(&reaction.key());
        }

        self.client.emit(ClientEvent::MessageReactionRemove {
            reaction: Arc::clone(&reaction),
            user_id: data.user_id,
        });

        Some(ReactionRemoveOutcome {
            message,
            reaction,
            user_id: data.user_id,
        })
    }
}
