//! Test doubles for the remote API and the event sink
//!
//! Enabled for this crate's own tests and, through the `test-util` feature,
//! for the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chat_common::{ClientError, ClientResult};
use chat_core::{MessagePayload, ReactionPayload, Snowflake};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::events::{ClientEvent, EventSink};
use crate::rest::RestApi;
use crate::structures::{Message, ReactionEmoji};

/// Channel id used by the fixtures
pub const CHANNEL_ID: Snowflake = Snowflake::new(10);
/// Message id used by the fixtures
pub const MESSAGE_ID: Snowflake = Snowflake::new(20);

/// Holds `get_message` calls until released
///
/// Lets a test interleave cache writes with an in-flight fetch.
#[derive(Debug, Default)]
pub struct FetchGate {
    entered: Notify,
    release: Notify,
}

impl FetchGate {
    /// Wait until a fetch has reached the gate
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the held fetch complete
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Scripted in-memory [`RestApi`]
#[derive(Debug, Default)]
pub struct MockRest {
    messages: Mutex<HashMap<(Snowflake, Snowflake), MessagePayload>>,
    failure: Mutex<Option<(u16, String)>>,
    gate: Mutex<Option<Arc<FetchGate>>>,
    deleted_emojis: Mutex<Vec<String>>,
    get_message_calls: AtomicUsize,
    delete_all_calls: AtomicUsize,
}

impl MockRest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `message` from `get_message`
    pub fn set_message(&self, message: MessagePayload) {
        self.messages
            .lock()
            .insert((message.channel_id, message.id), message);
    }

    /// Fail every call with an HTTP error until cleared
    pub fn fail_with_status(&self, status: u16, message: &str) {
        *self.failure.lock() = Some((status, message.to_string()));
    }

    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Hold every following `get_message` call at the returned gate
    pub fn hold_fetches(&self) -> Arc<FetchGate> {
        let gate = Arc::new(FetchGate::default());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn get_message_calls(&self) -> usize {
        self.get_message_calls.load(Ordering::SeqCst)
    }

    pub fn delete_all_calls(&self) -> usize {
        self.delete_all_calls.load(Ordering::SeqCst)
    }

    /// Route segments of every emoji passed to `delete_emoji_reactions`
    pub fn deleted_emojis(&self) -> Vec<String> {
        self.deleted_emojis.lock().clone()
    }

    fn check_failure(&self) -> ClientResult<()> {
        match &*self.failure.lock() {
            Some((status, message)) => Err(ClientError::http(*status, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RestApi for MockRest {
    async fn get_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ClientResult<MessagePayload> {
        self.get_message_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.check_failure()?;
        self.messages
            .lock()
            .get(&(channel_id, message_id))
            .cloned()
            .ok_or_else(|| ClientError::http(404, "Unknown Message"))
    }

    async fn delete_all_reactions(
        &self,
        _channel_id: Snowflake,
        _message_id: Snowflake,
    ) -> ClientResult<()> {
        self.delete_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()
    }

    async fn delete_emoji_reactions(
        &self,
        _channel_id: Snowflake,
        _message_id: Snowflake,
        emoji: &ReactionEmoji,
    ) -> ClientResult<()> {
        self.check_failure()?;
        self.deleted_emojis.lock().push(emoji.url_identifier());
        Ok(())
    }
}

/// Sink that keeps every emitted event
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ClientEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.lock().clone()
    }

    /// Names of the emitted events, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(ClientEvent::name).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ClientEvent) {
        self.events.lock().push(event);
    }
}

/// A full message at [`CHANNEL_ID`]/[`MESSAGE_ID`] carrying `reactions`
pub fn message_with_reactions(rest: &Arc<MockRest>, reactions: Vec<ReactionPayload>) -> Arc<Message> {
    let rest: Arc<dyn RestApi> = rest.clone();
    Message::new(
        MessagePayload::new(MESSAGE_ID, CHANNEL_ID, "hello").with_reactions(reactions),
        &rest,
    )
}
