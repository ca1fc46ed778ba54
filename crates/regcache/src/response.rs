//! Decoding of registry response bodies into domain values.
//!
//! Registries differ in a few response shapes (bare values versus small
//! wrapper objects); the decoders below accept both forms.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use regcache_core::{Compatibility, SchemaId, Version};

use crate::error::{RegistryError, RegistryResult};

/// Body of a schema lookup answered with at least an id.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct IdResponse {
    pub id: SchemaId,
}

/// Body of a schema lookup answered with at least a version.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct VersionResponse {
    pub version: Version,
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> RegistryResult<T> {
    serde_json::from_value(value).map_err(|e| RegistryError::Decode(e.to_string()))
}

pub(crate) fn encode<T: Serialize>(value: &T) -> RegistryResult<Value> {
    serde_json::to_value(value).map_err(|e| RegistryError::Encode(e.to_string()))
}

/// A list of versions, or a single version number.
pub(crate) fn decode_versions(value: Value) -> RegistryResult<Vec<Version>> {
    match value {
        Value::Array(_) => decode(value),
        Value::Number(_) => decode::<Version>(value).map(|v| vec![v]),
        other => Err(RegistryError::Decode(format!(
            "expected version number or list, got {other}"
        ))),
    }
}

/// A bare boolean, or `{"is_compatible": bool}`.
pub(crate) fn decode_is_compatible(value: Value) -> RegistryResult<bool> {
    match &value {
        Value::Bool(compatible) => Ok(*compatible),
        Value::Object(map) => map
            .get("is_compatible")
            .and_then(Value::as_bool)
            .ok_or_else(|| RegistryError::Decode(format!("missing is_compatible in {value}"))),
        other => Err(RegistryError::Decode(format!(
            "expected compatibility verdict, got {other}"
        ))),
    }
}

/// A bare level, or `{"compatibilityLevel": ..}` / `{"compatibility": ..}`.
pub(crate) fn decode_compatibility(value: Value) -> RegistryResult<Compatibility> {
    let level = match &value {
        Value::String(_) => Some(value.clone()),
        Value::Object(map) => map
            .get("compatibilityLevel")
            .or_else(|| map.get("compatibility"))
            .cloned(),
        _ => None,
    };
    match level {
        Some(level) => decode(level),
        None => Err(RegistryError::Decode(format!(
            "expected compatibility level, got {value}"
        ))),
    }
}
