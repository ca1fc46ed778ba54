//! regcache.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default number of entries kept per resolution domain.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Default registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:8081";

/// Default request timeout for the HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid duration for {field}: {value:?}")]
    InvalidDuration { field: &'static str, value: String },
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrySection {
    #[serde(default = "default_url")]
    pub url: String,
    pub timeout: Option<String>,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheSection {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    pub max_age: Option<String>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            max_age: None,
        }
    }
}

fn default_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl ClientConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field that is only interpreted lazily.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.timeout()?;
        self.cache.max_age()?;
        if self.cache.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

impl RegistrySection {
    /// Request timeout, falling back to [`DEFAULT_TIMEOUT`].
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        match &self.timeout {
            Some(raw) => parse_duration(raw).ok_or_else(|| ConfigError::InvalidDuration {
                field: "registry.timeout",
                value: raw.clone(),
            }),
            None => Ok(DEFAULT_TIMEOUT),
        }
    }
}

impl CacheSection {
    /// Maximum entry age; `None` disables age-based eviction.
    pub fn max_age(&self) -> Result<Option<Duration>, ConfigError> {
        self.max_age
            .as_deref()
            .map(|raw| {
                parse_duration(raw).ok_or_else(|| ConfigError::InvalidDuration {
                    field: "cache.max_age",
                    value: raw.to_string(),
                })
            })
            .transpose()
    }
}

/// Parse a duration string like "5s", "500ms", "2m" or a bare number of seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
