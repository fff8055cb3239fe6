//! Integration test utilities for the chat client
//!
//! This crate provides helpers for driving a client end-to-end through raw
//! gateway dispatches against a scripted remote API.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
