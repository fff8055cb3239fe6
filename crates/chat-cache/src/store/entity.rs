//! Capabilities a structure needs to live in an [`EntityCache`](super::EntityCache).

use std::fmt;
use std::hash::Hash;

/// In-place update from a (possibly incomplete) payload.
///
/// Implementors use interior mutability: the entry is shared through `Arc`
/// and other holders must observe the new fields without re-fetching it.
pub trait Patch<D> {
    fn patch(&self, data: &D);
}

/// A cacheable domain structure.
pub trait Entity: Send + Sync + 'static {
    /// Stable identity under which the structure is cached
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Raw payload the structure is materialized from
    type Data;

    /// Identity of this instance
    fn key(&self) -> Self::Key;

    /// Identity carried by a raw payload, if it has one
    fn key_of(data: &Self::Data) -> Option<Self::Key>;

    /// Patch capability, when the structure supports in-place updates
    fn patchable(&self) -> Option<&dyn Patch<Self::Data>> {
        None
    }

    /// Whether the instance is a stub awaiting authoritative data
    fn is_partial(&self) -> bool {
        false
    }
}
