//! # chat-client
//!
//! Client-side view of the remote object graph. Gateway dispatches and REST
//! responses are materialized into shared structures held in per-parent
//! stores:
//!
//! - [`Client`] owns the channel store
//! - each [`Channel`] owns its message store
//! - each [`Message`] owns its [`ReactionStore`]
//!
//! Reactions built from gateway events are partial until a fetch against the
//! message confirms them (see [`ReactionStore::fetch_reaction`]).

pub mod actions;
pub mod client;
pub mod events;
pub mod gateway;
pub mod rest;
pub mod stores;
pub mod structures;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use actions::{
    MessageReactionAdd, MessageReactionRemove, MessageReactionRemoveAll,
    MessageReactionRemoveEmoji, ReactionAddOutcome, ReactionRemoveAllOutcome,
    ReactionRemoveOutcome, RemoveEmojiOutcome,
};
pub use client::{Client, DispatchOutcome};
pub use events::{BroadcastSink, ClientEvent, EventSink};
pub use gateway::GatewayEventType;
pub use rest::RestApi;
pub use stores::{ChannelStore, MessageStore, ReactionStore};
pub use structures::{Channel, Message, MessageHandle, MessageReaction, ReactionEmoji};
