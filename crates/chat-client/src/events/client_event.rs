use std::sync::Arc;

use chat_core::Snowflake;

use crate::gateway::GatewayEventType;
use crate::structures::{Message, MessageReaction};

/// Events delivered to listeners of the client
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A user reacted to a cached message
    MessageReactionAdd {
        reaction: Arc<MessageReaction>,
        user_id: Snowflake,
    },
    /// A user's reaction was removed from a cached message
    MessageReactionRemove {
        reaction: Arc<MessageReaction>,
        user_id: Snowflake,
    },
    /// Every reaction was removed from a cached message
    MessageReactionRemoveAll { message: Arc<Message> },
    /// Every reaction of one emoji was removed from a cached message
    MessageReactionRemoveEmoji { reaction: Arc<MessageReaction> },
}

impl ClientEvent {
    /// Gateway event this client event originates from
    #[must_use]
    pub fn event_type(&self) -> GatewayEventType {
        match self {
            Self::MessageReactionAdd { .. } => GatewayEventType::MessageReactionAdd,
            Self::MessageReactionRemove { .. } => GatewayEventType::MessageReactionRemove,
            Self::MessageReactionRemoveAll { .. } => GatewayEventType::MessageReactionRemoveAll,
            Self::MessageReactionRemoveEmoji { .. } => {
                GatewayEventType::MessageReactionRemoveEmoji
            }
        }
    }

    /// Listener-facing event name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MessageReactionAdd { .. } => "messageReactionAdd",
            Self::MessageReactionRemove { .. } => "messageReactionRemove",
            Self::MessageReactionRemoveAll { .. } => "messageReactionRemoveAll",
            Self::MessageReactionRemoveEmoji { .. } => "messageReactionRemoveEmoji",
        }
    }
}
