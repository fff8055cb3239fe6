//! # chat-cache
//!
//! In-memory identity cache for the structures a chat client keeps alive.
//!
//! ## Features
//!
//! - **Upsert**: re-adding a known key patches the live entry in place, so every
//!   holder of the `Arc` observes the update
//! - **Factories**: each cache is configured with the constructor used to
//!   materialize raw payloads, plus typed extra context
//! - **Resolution**: look entries up by key or pass an entry through unchanged
//! - **Revisions**: every write bumps a per-slot revision, enabling
//!   compare-and-evict after an asynchronous round trip
//!
//! ## Example
//!
//! ```ignore
//! use chat_cache::{EntityCache, Resolvable};
//!
//! let users = EntityCache::new("users", |data: UserData, _: &()| Arc::new(User::from(data)));
//!
//! let first = users.add(data.clone(), true);
//! let again = users.add(data, true); // patched in place
//! assert!(Arc::ptr_eq(&first, &again));
//!
//! let found = users.resolve(Resolvable::Id(first.key()));
//! ```

pub mod store;

pub use store::{AddOptions, Entity, EntityCache, Factory, Patch, Resolvable};
