use std::sync::Arc;

use chat_cache::{EntityCache, Resolvable};
use chat_core::{ChannelPayload, Snowflake};

use crate::rest::RestApi;
use crate::structures::Channel;

/// Channels known to the client, keyed by id
pub struct ChannelStore {
    cache: EntityCache<Channel>,
}

impl ChannelStore {
    pub(crate) fn new(rest: Arc<dyn RestApi>) -> Self {
        Self {
            cache: EntityCache::new("channels", move |data: ChannelPayload, _: &()| {
                Channel::new(data, &rest)
            }),
        }
    }

    /// Insert or patch a channel
    pub fn add(&self, data: ChannelPayload, cache: bool) -> Arc<Channel> {
        self.cache.add(data, cache)
    }

    pub fn get(&self, id: Snowflake) -> Option<Arc<Channel>> {
        self.cache.get(&id)
    }

    pub fn resolve(&self, channel: impl Into<Resolvable<Channel>>) -> Option<Arc<Channel>> {
        self.cache.resolve(channel)
    }

    pub fn resolve_id(&self, channel: impl Into<Resolvable<Channel>>) -> Snowflake {
        self.cache.resolve_id(channel)
    }

    pub fn remove(&self, id: Snowflake) -> Option<Arc<Channel>> {
        self.cache.remove(&id)
    }

    /// The underlying cache
    pub fn cache(&self) -> &EntityCache<Channel> {
        &self.cache
    }
}
