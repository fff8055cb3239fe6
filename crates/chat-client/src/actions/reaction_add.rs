//! MESSAGE_REACTION_ADD

use std::sync::Arc;

use chat_cache::Entity;
use chat_core::{Partials, ReactionAddPayload, Snowflake};
use tracing::instrument;

use crate::client::Client;
use crate::events::ClientEvent;
use crate::structures::{Message, MessageReaction};

use super::{get_channel, get_message, materialize, parse_emoji};

/// Result of a handled reaction add
#[derive(Debug, Clone)]
pub struct ReactionAddOutcome {
    pub message: Arc<Message>,
    pub reaction: Arc<MessageReaction>,
    pub user_id: Snowflake,
}

/// Records a user's reaction on a cached (or partial) message
pub struct MessageReactionAdd<'a> {
    client: &'a Client,
}

impl<'a> MessageReactionAdd<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self, data), fields(message_id = %data.message_id, user_id = %data.user_id))]
    pub fn handle(&self, data: &ReactionAddPayload) -> Option<ReactionAddOutcome> {
        let channel = get_channel(self.client, data.channel_id)?;
        let message = get_message(self.client, &channel, data.message_id)?;

        // Reactions on a partial message have no count to track
        if message.is_partial() && !self.client.partials().contains(Partials::REACTION) {
            return None;
        }

        let emoji = parse_emoji(&data.emoji)?;

        let cached = message.reactions().get(&emoji);
        let reaction = match cached {
            // Replayed event for a user already recorded
            Some(existing) if existing.users().contains(&data.user_id) => {
                return Some(ReactionAddOutcome {
                    message,
                    reaction: existing,
                    user_id: data.user_id,
                });
            }
            Some(existing) => {
                message.reactions().touch(&emoji);
                existing
            }
            None => materialize(self.client, &message, &emoji, data.user_id)?,
        };
        reaction.add_user(data.user_id, self.client.user_id());

        self.client.emit(ClientEvent::MessageReactionAdd {
            reaction: Arc::clone(&reaction),
            user_id: data.user_id,
        });

        Some(ReactionAddOutcome {
            message,
            reaction,
            user_id: data.user_id,
        })
    }
}
