use anyhow::Result;
use serde_json::json;
use tracing::info;

use regcache::SchemaRegistryClient;

use super::print_json;

pub async fn list(client: &SchemaRegistryClient) -> Result<()> {
    print_json(&client.get_all_subjects().await?)
}

pub async fn versions(client: &SchemaRegistryClient, subject: &str) -> Result<()> {
    print_json(&client.get_all_versions(subject).await?)
}

pub async fn delete(client: &SchemaRegistryClient, subject: &str, permanent: bool) -> Result<()> {
    let deleted = client.delete_subject(subject, permanent).await?;
    info!(subject, permanent, "deleted {} version(s)", deleted.len());
    print_json(&json!({ "subject": subject, "deleted": deleted }))
}

pub async fn delete_version(
    client: &SchemaRegistryClient,
    subject: &str,
    version: i32,
    permanent: bool,
) -> Result<()> {
    let deleted = client.delete_subject_version(subject, version, permanent).await?;
    print_json(&json!({ "subject": subject, "deleted": deleted }))
}
