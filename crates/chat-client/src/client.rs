//! Client - entry point owning the caches
//!
//! Holds the settings, the event sink and the channel store, and routes
//! gateway dispatches to the cache population paths and the actions.

use std::sync::Arc;

use chat_common::{ClientConfig, ClientResult, ClientSettings};
use chat_core::{
    ChannelPayload, DomainError, MessagePayload, Partials, ReactionAddPayload,
    ReactionRemoveAllPayload, ReactionRemoveEmojiPayload, ReactionRemovePayload, Snowflake,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::actions::{
    MessageReactionAdd, MessageReactionRemove, MessageReactionRemoveAll,
    MessageReactionRemoveEmoji,
};
use crate::events::{BroadcastSink, ClientEvent, EventSink};
use crate::gateway::GatewayEventType;
use crate::rest::RestApi;
use crate::stores::ChannelStore;

/// What a dispatch did to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A structure was added to or patched in a cache
    Cached,
    /// An action ran and emitted its event
    Handled,
    /// Unknown event, or the action found nothing to act on
    Ignored,
}

/// Client state shared by every action
pub struct Client {
    settings: ClientSettings,
    events: Arc<dyn EventSink>,
    channels: ChannelStore,
}

impl Client {
    /// Create a new client
    pub fn new(
        settings: ClientSettings,
        rest: Arc<dyn RestApi>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            channels: ChannelStore::new(rest),
            settings,
            events,
        }
    }

    /// Create a client emitting into a broadcast channel sized from `config`
    pub fn with_broadcast(config: &ClientConfig, rest: Arc<dyn RestApi>) -> (Self, BroadcastSink) {
        let sink = BroadcastSink::new(config.events.buffer_size);
        let client = Self::new(config.client.clone(), rest, Arc::new(sink.clone()));
        (client, sink)
    }

    /// The client's own user, if configured
    pub fn user_id(&self) -> Option<Snowflake> {
        self.settings.user_id
    }

    /// Structures that may be cached as partial stubs
    pub fn partials(&self) -> Partials {
        self.settings.partials
    }

    pub fn channels(&self) -> &ChannelStore {
        &self.channels
    }

    /// Hand an event to the sink
    pub fn emit(&self, event: ClientEvent) {
        self.events.emit(event);
    }

    /// Apply a raw gateway dispatch
    ///
    /// Unknown event names are ignored. A payload that does not decode into
    /// the event's shape is rejected with a domain error.
    #[instrument(skip(self, data))]
    pub fn handle_dispatch(
        &self,
        event_name: &str,
        data: serde_json::Value,
    ) -> ClientResult<DispatchOutcome> {
        let Some(event) = GatewayEventType::from_str(event_name) else {
            debug!("Ignoring unknown dispatch");
            return Ok(DispatchOutcome::Ignored);
        };

        let outcome = match event {
            GatewayEventType::ChannelCreate => {
                self.channels.add(decode::<ChannelPayload>(event, data)?, true);
                DispatchOutcome::Cached
            }
            GatewayEventType::MessageCreate => {
                let payload = decode::<MessagePayload>(event, data)?;
                match self.channels.get(payload.channel_id) {
                    Some(channel) => {
                        channel.messages().add(payload, true);
                        DispatchOutcome::Cached
                    }
                    None => DispatchOutcome::Ignored,
                }
            }
            GatewayEventType::MessageReactionAdd => handled(
                MessageReactionAdd::new(self)
                    .handle(&decode::<ReactionAddPayload>(event, data)?)
                    .is_some(),
            ),
            GatewayEventType::MessageReactionRemove => handled(
                MessageReactionRemove::new(self)
                    .handle(&decode::<ReactionRemovePayload>(event, data)?)
                    .is_some(),
            ),
            GatewayEventType::MessageReactionRemoveAll => handled(
                MessageReactionRemoveAll::new(self)
                    .handle(&decode::<ReactionRemoveAllPayload>(event, data)?)
                    .is_some(),
            ),
            GatewayEventType::MessageReactionRemoveEmoji => handled(
                MessageReactionRemoveEmoji::new(self)
                    .handle(&decode::<ReactionRemoveEmojiPayload>(event, data)?)
                    .is_some(),
            ),
        };

        debug!(outcome = ?outcome, "Dispatch applied");
        Ok(outcome)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("user_id", &self.settings.user_id)
            .field("partials", &self.settings.partials)
            .field("channels", &self.channels.cache().len())
            .finish()
    }
}

fn handled(ran: bool) -> DispatchOutcome {
    if ran {
        DispatchOutcome::Handled
    } else {
        DispatchOutcome::Ignored
    }
}

fn decode<T: DeserializeOwned>(event: GatewayEventType, data: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(data).map_err(|e| {
        warn!(event = %event, error = %e, "Malformed dispatch payload");
        DomainError::InvalidPayload(format!("{event}: {e}"))
    })
}
