//! Channel structure

use std::fmt;
use std::sync::Arc;

use chat_cache::{Entity, Patch};
use chat_core::{ChannelPayload, ChannelType, Snowflake};
use parking_lot::RwLock;

use crate::rest::RestApi;
use crate::stores::MessageStore;

/// A channel and its cached messages
pub struct Channel {
    id: Snowflake,
    channel_type: ChannelType,
    guild_id: Option<Snowflake>,
    name: RwLock<Option<String>>,
    messages: MessageStore,
}

impl Channel {
    /// Factory used by the channel store
    pub(crate) fn new(data: ChannelPayload, rest: &Arc<dyn RestApi>) -> Arc<Self> {
        Arc::new(Self {
            id: data.id,
            channel_type: data.channel_type,
            guild_id: data.guild_id,
            name: RwLock::new(data.name),
            messages: MessageStore::new(Arc::clone(rest)),
        })
    }

    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild_id
    }

    pub fn name(&self) -> Option<String> {
        self.name.read().clone()
    }

    /// Voice channels carry no messages
    pub fn is_voice(&self) -> bool {
        self.channel_type.is_voice()
    }

    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }
}

impl Patch<ChannelPayload> for Channel {
    fn patch(&self, data: &ChannelPayload) {
        if data.name.is_some() {
            self.name.write().clone_from(&data.name);
        }
    }
}

impl Entity for Channel {
    type Key = Snowflake;
    type Data = ChannelPayload;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(data: &ChannelPayload) -> Option<Snowflake> {
        Some(data.id)
    }

    fn patchable(&self) -> Option<&dyn Patch<ChannelPayload>> {
        Some(self)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("type", &self.channel_type)
            .field("name", &self.name())
            .field("messages", &self.messages.cache().len())
            .finish()
    }
}
