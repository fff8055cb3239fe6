//! Test helpers for integration tests
//!
//! Wraps a client wired to a scripted remote API and a recording sink.

use std::sync::Arc;

use anyhow::{Context, Result};
use chat_client::testing::{MockRest, RecordingSink};
use chat_client::{Client, DispatchOutcome, Message};
use chat_common::{ClientSettings, try_init_tracing};
use chat_core::{Partials, Snowflake};
use serde_json::Value;

use crate::fixtures::MessageRef;

/// The client's own user in every test client
pub const SELF_USER: Snowflake = Snowflake::new(1);

/// Install a subscriber once so `RUST_LOG` works in tests
pub fn init_test_tracing() {
    let _ = try_init_tracing();
}

/// Client under test together with its collaborators
pub struct TestClient {
    pub client: Client,
    pub rest: Arc<MockRest>,
    pub sink: Arc<RecordingSink>,
}

impl TestClient {
    /// Client without partial structures
    pub fn new() -> Self {
        Self::with_partials(Partials::empty())
    }

    pub fn with_partials(partials: Partials) -> Self {
        init_test_tracing();

        let rest = Arc::new(MockRest::new());
        let sink = Arc::new(RecordingSink::new());
        let settings = ClientSettings {
            user_id: Some(SELF_USER),
            partials,
        };
        let client = Client::new(settings, rest.clone(), sink.clone());

        Self { client, rest, sink }
    }

    /// Apply a raw dispatch
    pub fn dispatch(&self, event: &str, data: Value) -> Result<DispatchOutcome> {
        self.client
            .handle_dispatch(event, data)
            .with_context(|| format!("dispatch {event} failed"))
    }

    /// Cached message, failing the test setup when absent
    pub fn message(&self, msg: MessageRef) -> Result<Arc<Message>> {
        self.client
            .channels()
            .get(msg.channel_id)
            .and_then(|channel| channel.messages().get(msg.message_id))
            .context("message not cached")
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
