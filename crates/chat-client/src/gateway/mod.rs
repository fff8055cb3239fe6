//! Gateway dispatch names understood by the client

mod event_types;

pub use event_types::GatewayEventType;
