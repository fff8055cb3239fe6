//! Keyed entity storage

mod entity;
mod entity_cache;
mod resolvable;

pub use entity::{Entity, Patch};
pub use entity_cache::{AddOptions, EntityCache, Factory};
pub use resolvable::Resolvable;
