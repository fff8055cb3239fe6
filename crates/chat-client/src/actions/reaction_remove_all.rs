//! MESSAGE_REACTION_REMOVE_ALL

use std::sync::Arc;

use chat_core::ReactionRemoveAllPayload;
use tracing::instrument;

use crate::client::Client;
use crate::events::ClientEvent;
use crate::structures::Message;

use super::{get_channel, get_message};

/// Result of a handled remove-all
#[derive(Debug, Clone)]
pub struct ReactionRemoveAllOutcome {
    pub message: Arc<Message>,
}

/// Clears every cached reaction of a message
pub struct MessageReactionRemoveAll<'a> {
    client: &'a Client,
}

impl<'a> MessageReactionRemoveAll<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    #[instrument(skip(self, data), fields(message_id = %data.message_id))]
    pub fn handle(&self, data: &ReactionRemoveAllPayload) -> Option<ReactionRemoveAllOutcome> {
        let channel = get_channel(self.client, data.channel_id)?;
        let message = get_message(self.client, &channel, data.message_id)?;

        message.reactions().cache().clear();

        self.client.emit(ClientEvent::MessageReactionRemoveAll {
            message: Arc::clone(&message),
        });

        Some(ReactionRemoveAllOutcome { message })
    }
}
