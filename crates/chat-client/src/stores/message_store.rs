use std::sync::Arc;

use chat_cache::{EntityCache, Resolvable};
use chat_core::{MessagePayload, Snowflake};

use crate::rest::RestApi;
use crate::structures::Message;

/// Messages of one channel, keyed by id
pub struct MessageStore {
    cache: EntityCache<Message>,
}

impl MessageStore {
    pub(crate) fn new(rest: Arc<dyn RestApi>) -> Self {
        Self {
            cache: EntityCache::new("messages", move |data: MessagePayload, _: &()| {
                Message::new(data, &rest)
            }),
        }
    }

    /// Insert or patch a message
    pub fn add(&self, data: MessagePayload, cache: bool) -> Arc<Message> {
        self.cache.add(data, cache)
    }

    pub fn get(&self, id: Snowflake) -> Option<Arc<Message>> {
        self.cache.get(&id)
    }

    pub fn resolve(&self, message: impl Into<Resolvable<Message>>) -> Option<Arc<Message>> {
        self.cache.resolve(message)
    }

    pub fn resolve_id(&self, message: impl Into<Resolvable<Message>>) -> Snowflake {
        self.cache.resolve_id(message)
    }

    pub fn remove(&self, id: Snowflake) -> Option<Arc<Message>> {
        self.cache.remove(&id)
    }

    /// The underlying cache
    pub fn cache(&self) -> &EntityCache<Message> {
        &self.cache
    }
}
