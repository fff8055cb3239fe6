//! Generic keyed cache with patch-on-reinsert semantics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use super::{Entity, Resolvable};

/// Constructor used to materialize raw data into a cached structure.
///
/// Receives the payload and the extra context supplied by the owner of the
/// cache (for example the parent message of a reaction).
pub type Factory<V, X> = Arc<dyn Fn(<V as Entity>::Data, &X) -> Arc<V> + Send + Sync>;

/// Per-call options for [`EntityCache::add_with`].
pub struct AddOptions<K, X> {
    /// Key to store under instead of the entry's own identity
    pub key: Option<K>,
    /// Extra context handed to the factory
    pub extras: X,
}

impl<K, X> AddOptions<K, X> {
    #[must_use]
    pub fn new(extras: X) -> Self {
        Self { key: None, extras }
    }

    #[must_use]
    pub fn key(mut self, key: K) -> Self {
        self.key = Some(key);
        self
    }
}

impl<K, X: Default> Default for AddOptions<K, X> {
    fn default() -> Self {
        Self::new(X::default())
    }
}

/// Stored entry plus the revision of its last write.
struct Slot<V> {
    entity: Arc<V>,
    revision: u64,
}

/// Keyed store of shared domain structures.
///
/// At most one live entry exists per key. Adding a payload for a key that is
/// already cached patches the existing entry in place and returns it, so
/// references held elsewhere stay current. Entries are only removed
/// explicitly; the owner decides eviction.
///
/// A keyless cache (see [`EntityCache::keyless`]) only materializes payloads
/// and never stores them.
pub struct EntityCache<V: Entity, X = ()> {
    name: Arc<str>,
    holds: Factory<V, X>,
    cache: Option<DashMap<V::Key, Slot<V>>>,
    revision: AtomicU64,
}

impl<V: Entity, X> EntityCache<V, X> {
    /// Create a cache that materializes entries with `holds`
    pub fn new<F>(name: impl Into<Arc<str>>, holds: F) -> Self
    where
        F: Fn(V::Data, &X) -> Arc<V> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            holds: Arc::new(holds),
            cache: Some(DashMap::new()),
            revision: AtomicU64::new(0),
        }
    }

    /// Create a pass-through cache that never stores entries
    pub fn keyless<F>(name: impl Into<Arc<str>>, holds: F) -> Self
    where
        F: Fn(V::Data, &X) -> Arc<V> + Send + Sync + 'static,
    {
        Self {
            cache: None,
            ..Self::new(name, holds)
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this cache stores entries at all
    pub fn is_keyless(&self) -> bool {
        self.cache.is_none()
    }

    /// Insert or patch an entry.
    ///
    /// When an entry exists under the resolved key it is returned; it is
    /// patched first if `cache` is set and the entry supports patching.
    /// Otherwise a new entry is built through the factory and, if `cache` is
    /// set, stored under the explicit key or its own identity.
    pub fn add_with(&self, data: V::Data, cache: bool, options: AddOptions<V::Key, X>) -> Arc<V> {
        let AddOptions { key, extras } = options;

        let Some(map) = &self.cache else {
            return (self.holds)(data, &extras);
        };

        if let Some(lookup) = key.clone().or_else(|| V::key_of(&data)) {
            if let Some(mut slot) = map.get_mut(&lookup) {
                if cache {
                    if let Some(patch) = slot.entity.patchable() {
                        patch.patch(&data);
                        slot.revision = self.next_revision();
                        tracing::trace!(cache = %self.name, key = ?lookup, "Patched entry");
                    }
                }
                return Arc::clone(&slot.entity);
            }
        }

        let entity = (self.holds)(data, &extras);
        if !cache {
            return entity;
        }

        let store_key = key.unwrap_or_else(|| entity.key());
        let revision = self.next_revision();
        let stored = map
            .entry(store_key)
            .or_insert_with(|| Slot {
                entity: Arc::clone(&entity),
                revision,
            })
            .entity
            .clone();

        // Another writer may have filled the slot while the entry was built
        if Arc::ptr_eq(&stored, &entity) {
            tracing::trace!(cache = %self.name, key = ?entity.key(), "Inserted entry");
        }
        stored
    }

    /// Resolve a key or entry to a cached entry.
    ///
    /// An entry is returned unchanged; a key is looked up. Absence is `None`.
    pub fn resolve(&self, resolvable: impl Into<Resolvable<V>>) -> Option<Arc<V>> {
        match resolvable.into() {
            Resolvable::Instance(entity) => Some(entity),
            Resolvable::Id(key) => self.get(&key),
        }
    }

    /// Resolve a key or entry to its key.
    pub fn resolve_id(&self, resolvable: impl Into<Resolvable<V>>) -> V::Key {
        match resolvable.into() {
            Resolvable::Instance(entity) => entity.key(),
            Resolvable::Id(key) => key,
        }
    }

    /// Get a cached entry by key
    pub fn get(&self, key: &V::Key) -> Option<Arc<V>> {
        self.cache
            .as_ref()?
            .get(key)
            .map(|slot| Arc::clone(&slot.entity))
    }

    /// Check if a key is cached
    pub fn contains(&self, key: &V::Key) -> bool {
        self.cache.as_ref().is_some_and(|map| map.contains_key(key))
    }

    /// Revision of the last write to `key`
    pub fn revision(&self, key: &V::Key) -> Option<u64> {
        self.cache.as_ref()?.get(key).map(|slot| slot.revision)
    }

    /// Record a write to `key` without changing the entry.
    ///
    /// Bumps the slot revision so a pending [`evict_if_unchanged`] for an
    /// older revision leaves the entry alone. Returns whether `key` is cached.
    ///
    /// [`evict_if_unchanged`]: EntityCache::evict_if_unchanged
    pub fn touch(&self, key: &V::Key) -> bool {
        let Some(mut slot) = self.cache.as_ref().and_then(|map| map.get_mut(key)) else {
            return false;
        };
        slot.revision = self.next_revision();
        tracing::trace!(cache = %self.name, key = ?key, revision = slot.revision, "Touched entry");
        true
    }

    /// Entry and revision read under the same shard lock
    pub fn get_with_revision(&self, key: &V::Key) -> Option<(Arc<V>, u64)> {
        self.cache
            .as_ref()?
            .get(key)
            .map(|slot| (Arc::clone(&slot.entity), slot.revision))
    }

    /// Remove an entry by key, returning it
    pub fn remove(&self, key: &V::Key) -> Option<Arc<V>> {
        let (_, slot) = self.cache.as_ref()?.remove(key)?;
        tracing::debug!(cache = %self.name, key = ?key, "Removed entry");
        Some(slot.entity)
    }

    /// Evict `key` only if it was not written since `revision` was observed.
    ///
    /// `before_evict` runs on the entry inside the same critical section as
    /// the removal, so no reader can observe its effect while the entry is
    /// still cached. Returns the evicted entry, or `None` when the key is
    /// absent or was written in the meantime.
    pub fn evict_if_unchanged<F>(&self, key: &V::Key, revision: u64, before_evict: F) -> Option<Arc<V>>
    where
        F: FnOnce(&V),
    {
        let map = self.cache.as_ref()?;
        let (_, slot) = map.remove_if(key, move |_, slot| {
            if slot.revision != revision {
                return false;
            }
            before_evict(&slot.entity);
            true
        })?;

        tracing::debug!(cache = %self.name, key = ?key, revision, "Evicted entry");
        Some(slot.entity)
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, DashMap::len)
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the cached keys
    pub fn keys(&self) -> Vec<V::Key> {
        self.cache
            .as_ref()
            .map(|map| map.iter().map(|slot| slot.key().clone()).collect())
            .unwrap_or_default()
    }

    /// Snapshot of the cached entries
    pub fn values(&self) -> Vec<Arc<V>> {
        self.cache
            .as_ref()
            .map(|map| map.iter().map(|slot| Arc::clone(&slot.entity)).collect())
            .unwrap_or_default()
    }

    /// Remove every entry
    pub fn clear(&self) {
        if let Some(map) = &self.cache {
            map.clear();
            tracing::debug!(cache = %self.name, "Cleared cache");
        }
    }

    fn next_revision(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl<V: Entity, X: Default> EntityCache<V, X> {
    /// Create a cache pre-populated from an iterable of payloads
    pub fn with_entries<F, I>(name: impl Into<Arc<str>>, holds: F, entries: I) -> Self
    where
        F: Fn(V::Data, &X) -> Arc<V> + Send + Sync + 'static,
        I: IntoIterator<Item = V::Data>,
    {
        let cache = Self::new(name, holds);
        for data in entries {
            cache.add(data, true);
        }
        cache
    }

    /// Insert or patch an entry with default options
    pub fn add(&self, data: V::Data, cache: bool) -> Arc<V> {
        self.add_with(data, cache, AddOptions::default())
    }
}

impl<V: Entity, X> fmt::Debug for EntityCache<V, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCache")
            .field("name", &self.name)
            .field("keyless", &self.is_keyless())
            .field("entry_count", &self.len())
            .finish()
    }
}
