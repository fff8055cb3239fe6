//! Message payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReactionPayload;
use crate::value_objects::Snowflake;

/// Message data as delivered by MESSAGE_CREATE or `GET /channels/{c}/messages/{m}`
///
/// `reactions` is absent when the message has none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<ReactionPayload>>,
}

impl MessagePayload {
    /// A stub carrying only identity, used for partial messages
    #[must_use]
    pub fn partial(id: Snowflake, channel_id: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            ..Self::default()
        }
    }

    /// A full message with the given content and no reactions
    #[must_use]
    pub fn new(id: Snowflake, channel_id: Snowflake, content: impl Into<String>) -> Self {
        Self {
            id,
            channel_id,
            content: Some(content.into()),
            pinned: Some(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<ReactionPayload>) -> Self {
        self.reactions = Some(reactions);
        self
    }
}
