//! Cache keys, one struct per resolution domain.
//!
//! Field order is fixed by the struct definitions, so two logically equal
//! inputs always produce equal keys. Structured inputs (`SchemaInfo`,
//! `Metadata`) are reduced to a [`Fingerprint`] of their canonical JSON
//! form. Request flags that change what the registry returns (`normalize`,
//! `deleted`) are part of the key.

use serde::Serialize;
use sha2::{Digest, Sha256};

use regcache_core::{Metadata, SchemaId, SchemaInfo, Version};

use crate::error::{RegistryError, RegistryResult};

/// Keys that are scoped to a subject; used by the invalidation sweep.
pub trait SubjectScoped {
    fn subject(&self) -> &str;
}

/// SHA-256 (hex) of a value's canonical JSON serialization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of<T: Serialize>(value: &T) -> RegistryResult<Self> {
        // Going through `Value` sorts object keys (serde_json's default map
        // is ordered), independent of struct field or insertion order.
        let canonical = serde_json::to_value(value)
            .and_then(|v| serde_json::to_vec(&v))
            .map_err(|e| RegistryError::KeyEncoding(e.to_string()))?;
        Ok(Self(hex::encode(Sha256::digest(&canonical))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_subject(subject: &str) -> RegistryResult<String> {
    if subject.trim().is_empty() {
        return Err(RegistryError::KeyEncoding(
            "subject must not be empty".to_string(),
        ));
    }
    Ok(subject.to_string())
}

/// `(subject, schema, normalize)`: schema→id, schema→version, registration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    pub subject: String,
    pub schema: Fingerprint,
    pub normalize: bool,
}

impl SchemaKey {
    pub fn new(subject: &str, schema: &SchemaInfo, normalize: bool) -> RegistryResult<Self> {
        Ok(Self {
            subject: check_subject(subject)?,
            schema: Fingerprint::of(schema)?,
            normalize,
        })
    }
}

/// `(subject, id)`: id→schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdKey {
    pub subject: String,
    pub id: SchemaId,
}

impl IdKey {
    pub fn new(subject: &str, id: SchemaId) -> RegistryResult<Self> {
        Ok(Self {
            subject: check_subject(subject)?,
            id,
        })
    }
}

/// `(subject)`: latest version of a subject.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LatestKey {
    pub subject: String,
}

impl LatestKey {
    pub fn new(subject: &str) -> RegistryResult<Self> {
        Ok(Self {
            subject: check_subject(subject)?,
        })
    }
}

/// `(subject, version, deleted)`: version→schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionKey {
    pub subject: String,
    pub version: Version,
    pub deleted: bool,
}

impl VersionKey {
    pub fn new(subject: &str, version: Version, deleted: bool) -> RegistryResult<Self> {
        Ok(Self {
            subject: check_subject(subject)?,
            version,
            deleted,
        })
    }
}

/// `(subject, metadata, deleted)`: latest schema matching metadata.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetadataKey {
    pub subject: String,
    pub metadata: Fingerprint,
    pub deleted: bool,
}

impl MetadataKey {
    pub fn new(subject: &str, metadata: &Metadata, deleted: bool) -> RegistryResult<Self> {
        Ok(Self {
            subject: check_subject(subject)?,
            metadata: Fingerprint::of(metadata)?,
            deleted,
        })
    }
}

macro_rules! subject_scoped {
    ($($key:ty),* $(,)?) => {
        $(impl SubjectScoped for $key {
            fn subject(&self) -> &str {
                &self.subject
            }
        })*
    };
}

subject_scoped!(SchemaKey, IdKey, LatestKey, VersionKey, MetadataKey);
