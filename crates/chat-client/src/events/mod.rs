//! Client events emitted after the caches are updated

mod client_event;
mod sink;

pub use client_event::ClientEvent;
pub use sink::{BroadcastSink, EventSink};
