//! `SchemaRegistryClientCache` — the per-client set of resolution domains.
//!
//! One instance owns every domain's store and guard; separate client
//! instances share nothing. Invalidation visits domains one at a time
//! (lock, sweep, unlock), so no two guards are ever held together.

use std::time::Duration;

use tracing::info;

use regcache_core::{CacheSection, SchemaId, SchemaInfo, SchemaMetadata, Version};

use crate::domain::{Domain, ResolutionDomain};
use crate::error::{RegistryError, RegistryResult};
use crate::key::{IdKey, LatestKey, MetadataKey, SchemaKey, VersionKey};

/// Capacity and age limits applied to every domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum entries per domain (default: 512).
    pub capacity: usize,
    /// Entries older than this are treated as absent (default: unset).
    pub max_age: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: regcache_core::config::DEFAULT_CACHE_CAPACITY,
            max_age: None,
        }
    }
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

impl TryFrom<&CacheSection> for CacheConfig {
    type Error = RegistryError;

    fn try_from(section: &CacheSection) -> Result<Self, Self::Error> {
        let max_age = section
            .max_age()
            .map_err(|e| RegistryError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            capacity: section.capacity,
            max_age,
        })
    }
}

/// All resolution domains of one client.
pub struct SchemaRegistryClientCache {
    pub(crate) schema_to_id: Domain<SchemaKey, SchemaId>,
    pub(crate) id_to_schema_info: Domain<IdKey, SchemaInfo>,
    pub(crate) info_to_schema: Domain<SchemaKey, SchemaMetadata>,
    pub(crate) latest_to_schema: Domain<LatestKey, SchemaMetadata>,
    pub(crate) schema_to_version: Domain<SchemaKey, Version>,
    pub(crate) version_to_schema: Domain<VersionKey, SchemaMetadata>,
    pub(crate) metadata_to_schema: Domain<MetadataKey, SchemaMetadata>,
}

impl SchemaRegistryClientCache {
    pub fn new(config: &CacheConfig) -> RegistryResult<Self> {
        let (cap, age) = (config.capacity, config.max_age);
        Ok(Self {
            schema_to_id: Domain::new(ResolutionDomain::SchemaToId, cap, age)?,
            id_to_schema_info: Domain::new(ResolutionDomain::IdToSchemaInfo, cap, age)?,
            info_to_schema: Domain::new(ResolutionDomain::InfoToSchemaMetadata, cap, age)?,
            latest_to_schema: Domain::new(ResolutionDomain::LatestToSchemaMetadata, cap, age)?,
            schema_to_version: Domain::new(ResolutionDomain::SchemaToVersion, cap, age)?,
            version_to_schema: Domain::new(ResolutionDomain::VersionToSchemaMetadata, cap, age)?,
            metadata_to_schema: Domain::new(
                ResolutionDomain::MetadataToSchemaMetadata,
                cap,
                age,
            )?,
        })
    }

    /// Drop every cached entry of `subject` in every domain.
    ///
    /// Returns the number of entries removed.
    pub async fn invalidate_subject(&self, subject: &str) -> usize {
        let removed = self.schema_to_id.invalidate_subject(subject).await
            + self.id_to_schema_info.invalidate_subject(subject).await
            + self.info_to_schema.invalidate_subject(subject).await
            + self.latest_to_schema.invalidate_subject(subject).await
            + self.schema_to_version.invalidate_subject(subject).await
            + self.version_to_schema.invalidate_subject(subject).await
            + self.metadata_to_schema.invalidate_subject(subject).await;
        info!(subject, removed, "subject invalidated");
        removed
    }

    /// Drop every cached entry of `subject` that refers to `version`.
    ///
    /// Domains keyed without a version are matched on the cached value.
    /// Schema keys removed from the schema→version or registration domains
    /// are also removed from the other schema-keyed domains, since they
    /// describe the same registered schema. Schema→id entries with no
    /// matching entry in either domain carry no version and are left in
    /// place, as are `IdToSchemaInfo` values.
    pub async fn invalidate_version(&self, subject: &str, version: Version) -> usize {
        let mut schema_keys = self
            .schema_to_version
            .invalidate(|key, v| key.subject == subject && *v == version)
            .await;
        let registered = self
            .info_to_schema
            .invalidate(|key, meta| {
                key.subject == subject
                    && (meta.version == Some(version) || schema_keys.contains(key))
            })
            .await;

        let mut removed = schema_keys.len() + registered.len();
        for key in registered {
            if !schema_keys.contains(&key) {
                schema_keys.push(key);
            }
        }
        removed += self.schema_to_id.remove_keys(&schema_keys).await;
        removed += self
            .version_to_schema
            .invalidate(|key, meta| {
                key.subject == subject && (key.version == version || meta.version == Some(version))
            })
            .await
            .len();
        removed += self
            .latest_to_schema
            .invalidate(|key, meta| key.subject == subject && meta.version == Some(version))
            .await
            .len();
        removed += self
            .metadata_to_schema
            .invalidate(|key, meta| key.subject == subject && meta.version == Some(version))
            .await
            .len();

        info!(subject, version, removed, "subject version invalidated");
        removed
    }

    /// Number of entries currently held by `domain`.
    pub async fn size(&self, domain: ResolutionDomain) -> usize {
        match domain {
            ResolutionDomain::SchemaToId => self.schema_to_id.len().await,
            ResolutionDomain::IdToSchemaInfo => self.id_to_schema_info.len().await,
            ResolutionDomain::InfoToSchemaMetadata => self.info_to_schema.len().await,
            ResolutionDomain::LatestToSchemaMetadata => self.latest_to_schema.len().await,
            ResolutionDomain::SchemaToVersion => self.schema_to_version.len().await,
            ResolutionDomain::VersionToSchemaMetadata => self.version_to_schema.len().await,
            ResolutionDomain::MetadataToSchemaMetadata => self.metadata_to_schema.len().await,
        }
    }

    /// Total entries across all domains.
    pub async fn total_size(&self) -> usize {
        let mut total = 0;
        for domain in ResolutionDomain::ALL {
            total += self.size(domain).await;
        }
        total
    }

    pub async fn clear(&self) {
        self.schema_to_id.clear().await;
        self.id_to_schema_info.clear().await;
        self.info_to_schema.clear().await;
        self.latest_to_schema.clear().await;
        self.schema_to_version.clear().await;
        self.version_to_schema.clear().await;
        self.metadata_to_schema.clear().await;
    }
}
