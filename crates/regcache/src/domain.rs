//! Guarded resolution domains.
//!
//! A domain pairs one [`BoundedStore`] with one async mutex (the guard).
//! The guard is held for the whole lookup-then-fetch, so for any key at
//! most one transport call is in flight and every later caller observes
//! the populated entry. A failed fetch stores nothing; the next waiter
//! acquires the guard, misses again and performs its own fetch.
//!
//! ```text
//! resolve(key)
//!   → lock guard
//!     → hit  → return cached value
//!     → miss → fetch().await → Ok  → store, return
//!                            → Err → return error (nothing stored)
//!   → unlock
//! ```

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::RegistryResult;
use crate::key::SubjectScoped;
use crate::store::BoundedStore;

/// The independent key→value mappings cached by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionDomain {
    SchemaToId,
    IdToSchemaInfo,
    InfoToSchemaMetadata,
    LatestToSchemaMetadata,
    SchemaToVersion,
    VersionToSchemaMetadata,
    MetadataToSchemaMetadata,
}

impl ResolutionDomain {
    pub const ALL: [ResolutionDomain; 7] = [
        ResolutionDomain::SchemaToId,
        ResolutionDomain::IdToSchemaInfo,
        ResolutionDomain::InfoToSchemaMetadata,
        ResolutionDomain::LatestToSchemaMetadata,
        ResolutionDomain::SchemaToVersion,
        ResolutionDomain::VersionToSchemaMetadata,
        ResolutionDomain::MetadataToSchemaMetadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionDomain::SchemaToId => "schema_to_id",
            ResolutionDomain::IdToSchemaInfo => "id_to_schema_info",
            ResolutionDomain::InfoToSchemaMetadata => "info_to_schema_metadata",
            ResolutionDomain::LatestToSchemaMetadata => "latest_to_schema_metadata",
            ResolutionDomain::SchemaToVersion => "schema_to_version",
            ResolutionDomain::VersionToSchemaMetadata => "version_to_schema_metadata",
            ResolutionDomain::MetadataToSchemaMetadata => "metadata_to_schema_metadata",
        }
    }
}

impl fmt::Display for ResolutionDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolution domain: a bounded store behind its guard.
pub struct Domain<K: Hash + Eq, V> {
    kind: ResolutionDomain,
    store: Mutex<BoundedStore<K, V>>,
}

impl<K, V> Domain<K, V>
where
    K: Hash + Eq + Clone + SubjectScoped,
    V: Clone,
{
    pub fn new(
        kind: ResolutionDomain,
        capacity: usize,
        max_age: Option<Duration>,
    ) -> RegistryResult<Self> {
        Ok(Self {
            kind,
            store: Mutex::new(BoundedStore::new(capacity, max_age)?),
        })
    }

    pub fn kind(&self) -> ResolutionDomain {
        self.kind
    }

    /// Return the cached value for `key`, or run `fetch` under the guard
    /// and cache its successful result.
    pub async fn resolve<F, Fut>(&self, key: K, fetch: F) -> RegistryResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RegistryResult<V>>,
    {
        let mut store = self.store.lock().await;
        if let Some(value) = store.get(&key) {
            debug!(domain = %self.kind, subject = key.subject(), "cache hit");
            return Ok(value);
        }

        debug!(domain = %self.kind, subject = key.subject(), "cache miss");
        let value = fetch().await?;
        store.set(key, value.clone());
        Ok(value)
    }

    /// Cached value for `key` without fetching.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.store.lock().await.get(key)
    }

    /// Remove every entry matching `predicate`, holding the guard for the sweep.
    pub async fn invalidate(&self, predicate: impl FnMut(&K, &V) -> bool) -> Vec<K> {
        let removed = self.store.lock().await.remove_where(predicate);
        if !removed.is_empty() {
            debug!(domain = %self.kind, removed = removed.len(), "entries invalidated");
        }
        removed
    }

    /// Remove the given keys, returning how many were present.
    pub async fn remove_keys(&self, keys: &[K]) -> usize {
        let mut store = self.store.lock().await;
        keys.iter().filter(|key| store.delete(key)).count()
    }

    /// Remove every entry whose key belongs to `subject`.
    pub async fn invalidate_subject(&self, subject: &str) -> usize {
        self.invalidate(|key, _| key.subject() == subject).await.len()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.size()
    }

    pub async fn clear(&self) {
        self.store.lock().await.clear();
    }
}
