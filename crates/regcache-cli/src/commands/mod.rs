//! Command implementations for the `regcache` binary.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use regcache::{CacheConfig, SchemaRegistryClient};
use regcache_core::ClientConfig;
use regcache_http::HttpTransport;

pub mod schema;
pub mod subjects;

/// Read the config file if given, then apply command-line overrides.
pub fn load_config(path: Option<&Path>, url: Option<&str>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = url {
        config.registry.url = url.to_string();
    }
    Ok(config)
}

/// Build a caching client over HTTP from `config`.
pub fn connect(config: &ClientConfig) -> Result<SchemaRegistryClient> {
    let transport =
        HttpTransport::new(&config.registry.url)?.with_timeout(config.registry.timeout()?);
    let cache = CacheConfig::try_from(&config.cache)?;
    Ok(SchemaRegistryClient::new(Arc::new(transport), &cache)?)
}

pub fn show_config(config: &ClientConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
