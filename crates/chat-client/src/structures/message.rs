//! Message structure

use std::fmt;
use std::sync::{Arc, Weak};

use chat_cache::{Entity, Patch};
use chat_core::{MessagePayload, ReactionPayload, Snowflake};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::rest::RestApi;
use crate::stores::ReactionStore;

/// Non-owning reference from a reaction (or its store) to the message
///
/// Carries the ids needed for remote calls so they stay usable without
/// upgrading the message.
#[derive(Clone)]
pub struct MessageHandle {
    id: Snowflake,
    channel_id: Snowflake,
    message: Weak<Message>,
}

impl MessageHandle {
    pub(crate) fn new(id: Snowflake, channel_id: Snowflake, message: Weak<Message>) -> Self {
        Self {
            id,
            channel_id,
            message,
        }
    }

    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn channel_id(&self) -> Snowflake {
        self.channel_id
    }

    /// The message, unless it has been dropped
    pub fn upgrade(&self) -> Option<Arc<Message>> {
        self.message.upgrade()
    }
}

impl fmt::Debug for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageHandle")
            .field("id", &self.id)
            .field("channel_id", &self.channel_id)
            .field("alive", &(self.message.strong_count() > 0))
            .finish()
    }
}

#[derive(Debug, Default)]
struct MessageState {
    author_id: Option<Snowflake>,
    content: Option<String>,
    edited_timestamp: Option<DateTime<Utc>>,
    pinned: Option<bool>,
}

impl MessageState {
    fn apply(&mut self, data: &MessagePayload) {
        if data.author_id.is_some() {
            self.author_id = data.author_id;
        }
        if let Some(content) = &data.content {
            self.content = Some(content.clone());
        }
        if data.edited_timestamp.is_some() {
            self.edited_timestamp = data.edited_timestamp;
        }
        if data.pinned.is_some() {
            self.pinned = data.pinned;
        }
    }
}

/// A message in a channel
pub struct Message {
    id: Snowflake,
    channel_id: Snowflake,
    guild_id: Option<Snowflake>,
    state: RwLock<MessageState>,
    reactions: ReactionStore,
}

impl Message {
    /// Factory used by the message store
    pub(crate) fn new(mut data: MessagePayload, rest: &Arc<dyn RestApi>) -> Arc<Self> {
        let reactions = data.reactions.take();
        let mut state = MessageState::default();
        state.apply(&data);

        let message = Arc::new_cyclic(|weak| Self {
            id: data.id,
            channel_id: data.channel_id,
            guild_id: data.guild_id,
            state: RwLock::new(state),
            reactions: ReactionStore::new(
                MessageHandle::new(data.id, data.channel_id, weak.clone()),
                Arc::clone(rest),
            ),
        });
        message.add_reactions(reactions.unwrap_or_default());
        message
    }

    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn channel_id(&self) -> Snowflake {
        self.channel_id
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild_id
    }

    pub fn author_id(&self) -> Option<Snowflake> {
        self.state.read().author_id
    }

    pub fn content(&self) -> Option<String> {
        self.state.read().content.clone()
    }

    pub fn edited_timestamp(&self) -> Option<DateTime<Utc>> {
        self.state.read().edited_timestamp
    }

    pub fn pinned(&self) -> bool {
        self.state.read().pinned.unwrap_or(false)
    }

    /// Reactions on this message
    pub fn reactions(&self) -> &ReactionStore {
        &self.reactions
    }

    /// Handle other structures use to refer back to this message
    pub fn handle(&self) -> &MessageHandle {
        self.reactions.message()
    }

    fn add_reactions(&self, reactions: Vec<ReactionPayload>) {
        for reaction in reactions {
            if let Err(e) = self.reactions.add(reaction, true) {
                tracing::warn!(message_id = %self.id, error = %e, "Skipping reaction");
            }
        }
    }
}

impl Patch<MessagePayload> for Message {
    fn patch(&self, data: &MessagePayload) {
        self.state.write().apply(data);
        if let Some(reactions) = &data.reactions {
            self.add_reactions(reactions.clone());
        }
    }
}

impl Entity for Message {
    type Key = Snowflake;
    type Data = MessagePayload;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(data: &MessagePayload) -> Option<Snowflake> {
        Some(data.id)
    }

    fn patchable(&self) -> Option<&dyn Patch<MessagePayload>> {
        Some(self)
    }

    /// A message is partial until its content is known
    fn is_partial(&self) -> bool {
        self.state.read().content.is_none()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id)
            .field("channel_id", &self.channel_id)
            .field("partial", &self.is_partial())
            .field("reactions", &self.reactions.cache().len())
            .finish()
    }
}
