//! Message reaction structure

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chat_cache::{Entity, Patch};
use chat_common::ClientResult;
use chat_core::{DomainError, ReactionPayload, Snowflake};
use parking_lot::RwLock;

use super::{Message, MessageHandle, ReactionEmoji};

/// Mutable part of a reaction
#[derive(Debug, Default)]
struct ReactionState {
    /// `None` until an authoritative count is known
    count: Option<u32>,
    me: bool,
    users: HashSet<Snowflake>,
}

/// All reactions of one emoji on a message
pub struct MessageReaction {
    message: MessageHandle,
    emoji: ReactionEmoji,
    state: RwLock<ReactionState>,
}

impl MessageReaction {
    /// Factory used by the reaction store
    pub(crate) fn new(data: ReactionPayload, message: &MessageHandle) -> Arc<Self> {
        Arc::new(Self {
            message: message.clone(),
            emoji: ReactionEmoji::from_payload(&data.emoji),
            state: RwLock::new(ReactionState {
                count: data.count,
                me: data.me.unwrap_or(false),
                users: HashSet::new(),
            }),
        })
    }

    pub fn emoji(&self) -> &ReactionEmoji {
        &self.emoji
    }

    /// Handle to the message this reaction belongs to
    pub fn message_handle(&self) -> &MessageHandle {
        &self.message
    }

    /// The owning message, if it is still alive
    pub fn message(&self) -> Option<Arc<Message>> {
        self.message.upgrade()
    }

    /// Number of users who reacted, `None` while partial
    pub fn count(&self) -> Option<u32> {
        self.state.read().count
    }

    /// Whether the client's own user reacted
    pub fn me(&self) -> bool {
        self.state.read().me
    }

    /// Users seen reacting through gateway events
    pub fn users(&self) -> Vec<Snowflake> {
        self.state.read().users.iter().copied().collect()
    }

    /// Record a user's reaction
    ///
    /// Ignored while partial: the count can only be established by a fetch.
    pub fn add_user(&self, user_id: Snowflake, self_id: Option<Snowflake>) {
        let mut state = self.state.write();
        let Some(count) = state.count else {
            return;
        };
        let is_self = self_id == Some(user_id);

        state.users.insert(user_id);
        if !(state.me && is_self) || count == 0 {
            state.count = Some(count + 1);
        }
        state.me |= is_self;
    }

    /// Forget a user's reaction
    pub fn remove_user(&self, user_id: Snowflake, self_id: Option<Snowflake>) {
        let mut state = self.state.write();
        let Some(count) = state.count else {
            return;
        };

        state.users.remove(&user_id);
        if self_id == Some(user_id) {
            state.me = false;
        }
        state.count = Some(count.saturating_sub(1));
    }

    /// Whether nothing is left of this reaction
    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        state.count == Some(0) && state.users.is_empty()
    }

    /// Refresh this reaction against the remote message
    ///
    /// Returns `None` when the emoji is no longer on the message; the
    /// reaction then reports a count of zero.
    pub async fn fetch(&self) -> ClientResult<Option<Arc<MessageReaction>>> {
        let message = self.require_message()?;
        message.reactions().fetch_reaction(&self.emoji, true).await
    }

    /// Remove every reaction of this emoji from the message
    pub async fn remove(&self) -> ClientResult<Arc<Message>> {
        let message = self.require_message()?;
        message.reactions().remove_emoji(&self.emoji).await
    }

    fn require_message(&self) -> Result<Arc<Message>, DomainError> {
        self.message
            .upgrade()
            .ok_or(DomainError::MessageUnavailable(self.message.id()))
    }
}

impl Patch<ReactionPayload> for MessageReaction {
    fn patch(&self, data: &ReactionPayload) {
        let mut state = self.state.write();
        // A known count is only replaced through add_user/remove_user
        if state.count.is_none() {
            state.count = data.count;
        }
        if let Some(me) = data.me {
            state.me = me;
        }
    }
}

impl Entity for MessageReaction {
    type Key = String;
    type Data = ReactionPayload;

    fn key(&self) -> String {
        self.emoji.identifier()
    }

    fn key_of(data: &ReactionPayload) -> Option<String> {
        data.emoji.identifier()
    }

    fn patchable(&self) -> Option<&dyn Patch<ReactionPayload>> {
        Some(self)
    }

    fn is_partial(&self) -> bool {
        self.state.read().count.is_none()
    }
}

impl fmt::Debug for MessageReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("MessageReaction")
            .field("message_id", &self.message.id())
            .field("emoji", &self.emoji)
            .field("count", &state.count)
            .field("me", &state.me)
            .finish()
    }
}
