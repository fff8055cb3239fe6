//! Inputs accepted by identity resolution.

use std::fmt;
use std::sync::Arc;

use super::Entity;

/// Either a cache key or an already materialized entry.
pub enum Resolvable<V: Entity> {
    Id(V::Key),
    Instance(Arc<V>),
}

impl<V: Entity> From<Arc<V>> for Resolvable<V> {
    fn from(entity: Arc<V>) -> Self {
        Self::Instance(entity)
    }
}

impl<V: Entity> From<&Arc<V>> for Resolvable<V> {
    fn from(entity: &Arc<V>) -> Self {
        Self::Instance(Arc::clone(entity))
    }
}

impl<V: Entity> Clone for Resolvable<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Id(key) => Self::Id(key.clone()),
            Self::Instance(entity) => Self::Instance(Arc::clone(entity)),
        }
    }
}

impl<V: Entity> fmt::Debug for Resolvable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(key) => f.debug_tuple("Id").field(key).finish(),
            Self::Instance(entity) => f.debug_tuple("Instance").field(&entity.key()).finish(),
        }
    }
}
