//! Capacity-bounded key/value store with optional maximum entry age.
//!
//! Least-recently-used entries are evicted once `capacity` is exceeded.
//! When a maximum age is configured, entries older than it are treated as
//! absent and dropped on lookup. The store is not synchronized; each
//! resolution domain wraps its store in the domain guard.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::error::{RegistryError, RegistryResult};

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

fn is_expired<V>(entry: &Entry<V>, max_age: Option<Duration>) -> bool {
    max_age.is_some_and(|age| entry.inserted_at.elapsed() >= age)
}

/// Bounded LRU store used by every resolution domain.
#[derive(Debug)]
pub struct BoundedStore<K: Hash + Eq, V> {
    entries: LruCache<K, Entry<V>>,
    max_age: Option<Duration>,
}

impl<K: Hash + Eq + Clone, V: Clone> BoundedStore<K, V> {
    /// Create a store holding at most `capacity` entries.
    ///
    /// Returns an error if capacity is 0.
    pub fn new(capacity: usize, max_age: Option<Duration>) -> RegistryResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            RegistryError::InvalidConfig("cache capacity must be non-zero".to_string())
        })?;
        Ok(Self {
            entries: LruCache::new(capacity),
            max_age,
        })
    }

    /// Look up `key`, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let max_age = self.max_age;
        let expired = match self.entries.get(key) {
            Some(entry) if !is_expired(entry, max_age) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.pop(key);
        }
        None
    }

    /// Insert `value`, replacing any previous entry for `key`.
    ///
    /// Replacement drops the old entry first so the new one carries a
    /// fresh insertion time.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.pop(&key);
        self.entries.put(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Remove `key`. Returns true if a live entry was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        let max_age = self.max_age;
        self.entries
            .pop(key)
            .is_some_and(|entry| !is_expired(&entry, max_age))
    }

    /// Visit every live entry without touching recency.
    pub fn for_each(&self, mut visit: impl FnMut(&K, &V)) {
        for (key, entry) in self.entries.iter() {
            if !is_expired(entry, self.max_age) {
                visit(key, &entry.value);
            }
        }
    }

    /// Remove every live entry matching `predicate`, returning the removed keys.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&K, &V) -> bool) -> Vec<K> {
        let mut matched = Vec::new();
        self.for_each(|key, value| {
            if predicate(key, value) {
                matched.push(key.clone());
            }
        });
        for key in &matched {
            self.entries.pop(key);
        }
        matched
    }

    /// Number of stored entries, including any not yet found expired.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
