//! Event sinks
//!
//! Emission is fire-and-forget: a sink never reports failure back to the
//! action that produced the event.

use tokio::sync::broadcast;

use super::ClientEvent;

/// Destination for client events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

/// Fan-out sink backed by a tokio broadcast channel
///
/// Slow receivers lag and lose the oldest events; the sender never blocks.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<ClientEvent>,
}

impl BroadcastSink {
    /// Create a sink buffering up to `capacity` events per receiver
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active receivers
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: ClientEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => tracing::trace!(event = name, receivers, "Event emitted"),
            Err(_) => tracing::trace!(event = name, "Event dropped, no receivers"),
        }
    }
}
