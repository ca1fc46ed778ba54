//! `SchemaRegistryClient` — registry operations backed by the resolution cache.
//!
//! Lookups with a stable answer go through one cached domain each; the
//! remaining operations (listing, compatibility checks, configuration)
//! are passed straight to the transport. Deletes invalidate the affected
//! cache entries before the transport call and once more after it
//! succeeds, so entries repopulated by a concurrent lookup during the
//! delete do not survive it.

use std::borrow::Cow;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

use regcache_core::{
    Compatibility, Metadata, SchemaId, SchemaInfo, SchemaMetadata, ServerConfig, Version,
};

use crate::cache::{CacheConfig, SchemaRegistryClientCache};
use crate::error::RegistryResult;
use crate::key::{IdKey, LatestKey, MetadataKey, SchemaKey, VersionKey};
use crate::response::{
    IdResponse, VersionResponse, decode, decode_compatibility, decode_is_compatible,
    decode_versions, encode,
};
use crate::transport::{Method, Transport};

/// `subject` percent-encoded as a single path segment.
fn path_segment(subject: &str) -> Cow<'_, str> {
    urlencoding::encode(subject)
}

/// Caching schema registry client.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct SchemaRegistryClient {
    transport: Arc<dyn Transport>,
    cache: SchemaRegistryClientCache,
}

impl SchemaRegistryClient {
    /// Create a client over `transport` with an empty cache.
    pub fn new(transport: Arc<dyn Transport>, config: &CacheConfig) -> RegistryResult<Self> {
        Ok(Self {
            transport,
            cache: SchemaRegistryClientCache::new(config)?,
        })
    }

    /// The client's resolution cache.
    pub fn cache(&self) -> &SchemaRegistryClientCache {
        &self.cache
    }

    async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> RegistryResult<Value> {
        debug!(%method, path, "registry request");
        let response = self.transport.send(path, method, body).await?;
        Ok(response.body)
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> RegistryResult<T> {
        decode(self.request(path, method, body).await?)
    }

    // ── Cached lookups ─────────────────────────────────────────────

    /// Register `schema` under `subject`, returning its global id.
    pub async fn register(
        &self,
        subject: &str,
        schema: &SchemaInfo,
        normalize: bool,
    ) -> RegistryResult<SchemaId> {
        let metadata = self.register_full_response(subject, schema, normalize).await?;
        Ok(metadata.id)
    }

    /// Register `schema` under `subject`, returning the full registry record.
    pub async fn register_full_response(
        &self,
        subject: &str,
        schema: &SchemaInfo,
        normalize: bool,
    ) -> RegistryResult<SchemaMetadata> {
        let key = SchemaKey::new(subject, schema, normalize)?;
        let body = encode(schema)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/versions?normalize={normalize}");
        self.cache
            .info_to_schema
            .resolve(key, || self.request_as(&path, Method::Post, Some(&body)))
            .await
    }

    /// Schema registered under `subject` with global id `id`.
    pub async fn get_by_subject_and_id(
        &self,
        subject: &str,
        id: SchemaId,
    ) -> RegistryResult<SchemaInfo> {
        let key = IdKey::new(subject, id)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/versions/{id}");
        self.cache
            .id_to_schema_info
            .resolve(key, || self.request_as(&path, Method::Get, None))
            .await
    }

    /// Global id of an already registered `schema`.
    pub async fn get_id(
        &self,
        subject: &str,
        schema: &SchemaInfo,
        normalize: bool,
    ) -> RegistryResult<SchemaId> {
        let key = SchemaKey::new(subject, schema, normalize)?;
        let body = encode(schema)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}?normalize={normalize}");
        self.cache
            .schema_to_id
            .resolve(key, || async {
                let response: IdResponse =
                    self.request_as(&path, Method::Post, Some(&body)).await?;
                Ok(response.id)
            })
            .await
    }

    /// Latest registered version of `subject`.
    pub async fn get_latest_schema_metadata(
        &self,
        subject: &str,
    ) -> RegistryResult<SchemaMetadata> {
        let key = LatestKey::new(subject)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/versions/latest");
        self.cache
            .latest_to_schema
            .resolve(key, || self.request_as(&path, Method::Get, None))
            .await
    }

    /// A specific version of `subject`; `deleted` includes soft-deleted versions.
    pub async fn get_schema_metadata(
        &self,
        subject: &str,
        version: Version,
        deleted: bool,
    ) -> RegistryResult<SchemaMetadata> {
        let key = VersionKey::new(subject, version, deleted)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/versions/{version}?deleted={deleted}");
        self.cache
            .version_to_schema
            .resolve(key, || self.request_as(&path, Method::Get, None))
            .await
    }

    /// Latest version of `subject` whose metadata matches `metadata`.
    pub async fn get_latest_with_metadata(
        &self,
        subject: &str,
        metadata: &Metadata,
        deleted: bool,
    ) -> RegistryResult<SchemaMetadata> {
        let key = MetadataKey::new(subject, metadata, deleted)?;
        let body = encode(metadata)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/metadata?deleted={deleted}");
        self.cache
            .metadata_to_schema
            .resolve(key, || self.request_as(&path, Method::Get, Some(&body)))
            .await
    }

    /// Version number of an already registered `schema` within `subject`.
    pub async fn get_version(
        &self,
        subject: &str,
        schema: &SchemaInfo,
        normalize: bool,
    ) -> RegistryResult<Version> {
        let key = SchemaKey::new(subject, schema, normalize)?;
        let body = encode(schema)?;
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}?normalize={normalize}");
        self.cache
            .schema_to_version
            .resolve(key, || async {
                let response: VersionResponse =
                    self.request_as(&path, Method::Post, Some(&body)).await?;
                Ok(response.version)
            })
            .await
    }

    // ── Deletes ────────────────────────────────────────────────────

    /// Delete `subject`, returning the versions removed by the registry.
    pub async fn delete_subject(
        &self,
        subject: &str,
        permanent: bool,
    ) -> RegistryResult<Vec<Version>> {
        self.cache.invalidate_subject(subject).await;

        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}?permanent={permanent}");
        let versions = decode_versions(self.request(&path, Method::Delete, None).await?)?;

        let late = self.cache.invalidate_subject(subject).await;
        info!(subject, permanent, deleted = versions.len(), late, "subject deleted");
        Ok(versions)
    }

    /// Delete one version of `subject`.
    pub async fn delete_subject_version(
        &self,
        subject: &str,
        version: Version,
        permanent: bool,
    ) -> RegistryResult<Vec<Version>> {
        self.cache.invalidate_version(subject, version).await;

        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/versions/{version}?permanent={permanent}");
        let versions = decode_versions(self.request(&path, Method::Delete, None).await?)?;

        let late = self.cache.invalidate_version(subject, version).await;
        info!(subject, version, permanent, late, "subject version deleted");
        Ok(versions)
    }

    // ── Uncached operations ────────────────────────────────────────

    pub async fn get_all_subjects(&self) -> RegistryResult<Vec<String>> {
        self.request_as("/subjects", Method::Get, None).await
    }

    pub async fn get_all_versions(&self, subject: &str) -> RegistryResult<Vec<Version>> {
        let segment = path_segment(subject);
        let path = format!("/subjects/{segment}/versions");
        self.request_as(&path, Method::Get, None).await
    }

    /// Whether `schema` is compatible with the latest version of `subject`.
    pub async fn test_subject_compatibility(
        &self,
        subject: &str,
        schema: &SchemaInfo,
    ) -> RegistryResult<bool> {
        let segment = path_segment(subject);
        let path = format!("/compatibility/subjects/{segment}/versions/latest");
        let body = encode(schema)?;
        decode_is_compatible(self.request(&path, Method::Post, Some(&body)).await?)
    }

    /// Whether `schema` is compatible with `version` of `subject`.
    pub async fn test_compatibility(
        &self,
        subject: &str,
        version: Version,
        schema: &SchemaInfo,
    ) -> RegistryResult<bool> {
        let segment = path_segment(subject);
        let path = format!("/compatibility/subjects/{segment}/versions/{version}");
        let body = encode(schema)?;
        decode_is_compatible(self.request(&path, Method::Post, Some(&body)).await?)
    }

    pub async fn get_compatibility(&self, subject: &str) -> RegistryResult<Compatibility> {
        let segment = path_segment(subject);
        let path = format!("/config/{segment}/compatibility");
        decode_compatibility(self.request(&path, Method::Get, None).await?)
    }

    pub async fn update_compatibility(
        &self,
        subject: &str,
        update: Compatibility,
    ) -> RegistryResult<Compatibility> {
        let segment = path_segment(subject);
        let path = format!("/config/{segment}/compatibility");
        let body = json!({ "compatibility": update });
        decode_compatibility(self.request(&path, Method::Put, Some(&body)).await?)
    }

    pub async fn get_default_compatibility(&self) -> RegistryResult<Compatibility> {
        decode_compatibility(self.request("/config", Method::Get, None).await?)
    }

    pub async fn update_default_compatibility(
        &self,
        update: Compatibility,
    ) -> RegistryResult<Compatibility> {
        let body = json!({ "compatibility": update });
        decode_compatibility(self.request("/config", Method::Put, Some(&body)).await?)
    }

    pub async fn get_config(&self, subject: &str) -> RegistryResult<ServerConfig> {
        let segment = path_segment(subject);
        let path = format!("/config/{segment}");
        self.request_as(&path, Method::Get, None).await
    }

    pub async fn update_config(
        &self,
        subject: &str,
        update: &ServerConfig,
    ) -> RegistryResult<ServerConfig> {
        let segment = path_segment(subject);
        let path = format!("/config/{segment}");
        let body = encode(update)?;
        self.request_as(&path, Method::Put, Some(&body)).await
    }

    pub async fn get_global_config(&self) -> RegistryResult<ServerConfig> {
        self.request_as("/config", Method::Get, None).await
    }

    pub async fn update_global_config(
        &self,
        update: &ServerConfig,
    ) -> RegistryResult<ServerConfig> {
        let body = encode(update)?;
        self.request_as("/config", Method::Put, Some(&body)).await
    }

    /// Drop all cached state. The client stays usable.
    pub async fn close(&self) {
        self.cache.clear().await;
        debug!("registry client cache cleared");
    }
}
