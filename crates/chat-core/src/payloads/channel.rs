//! Channel payload

use serde::{Deserialize, Serialize};

use crate::value_objects::{ChannelType, Snowflake};

/// Channel data as delivered by CHANNEL_CREATE or a REST fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPayload {
    pub id: Snowflake,
    #[serde(rename = "type", default)]
    pub channel_type: ChannelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelPayload {
    #[must_use]
    pub fn new(id: Snowflake, channel_type: ChannelType) -> Self {
        Self {
            id,
            channel_type,
            guild_id: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
