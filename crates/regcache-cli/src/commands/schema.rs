//! `regcache register|latest|get|compat`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::json;

use regcache::SchemaRegistryClient;
use regcache_core::SchemaInfo;

use super::print_json;

const SCHEMA_TYPES: [&str; 3] = ["AVRO", "JSON", "PROTOBUF"];

/// Read a schema definition from `path`.
fn read_schema(path: &Path, schema_type: &str) -> Result<SchemaInfo> {
    let schema_type = schema_type.to_ascii_uppercase();
    if !SCHEMA_TYPES.contains(&schema_type.as_str()) {
        bail!("Unsupported schema type: {schema_type} (expected AVRO, JSON or PROTOBUF)");
    }
    let schema = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema from {}", path.display()))?;
    let schema = schema.trim();
    if schema.is_empty() {
        bail!("Schema file {} is empty", path.display());
    }
    Ok(SchemaInfo::new(schema, schema_type))
}

pub async fn register(
    client: &SchemaRegistryClient,
    subject: &str,
    path: &Path,
    schema_type: &str,
    normalize: bool,
) -> Result<()> {
    let schema = read_schema(path, schema_type)?;
    let registered = client.register_full_response(subject, &schema, normalize).await?;
    print_json(&registered)
}

pub async fn latest(client: &SchemaRegistryClient, subject: &str) -> Result<()> {
    print_json(&client.get_latest_schema_metadata(subject).await?)
}

pub async fn get(
    client: &SchemaRegistryClient,
    subject: &str,
    version: i32,
    deleted: bool,
) -> Result<()> {
    print_json(&client.get_schema_metadata(subject, version, deleted).await?)
}

pub async fn compat(
    client: &SchemaRegistryClient,
    subject: &str,
    path: &Path,
    schema_type: &str,
) -> Result<()> {
    let schema = read_schema(path, schema_type)?;
    let compatible = client.test_subject_compatibility(subject, &schema).await?;
    print_json(&json!({ "subject": subject, "is_compatible": compatible }))
}
