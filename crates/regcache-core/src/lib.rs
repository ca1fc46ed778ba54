//! regcache-core — shared records and configuration for regcache.
//!
//! The types here mirror the JSON bodies exchanged with a schema registry
//! (`SchemaInfo`, `SchemaMetadata`, compatibility and server config). Maps
//! are ordered (`BTreeMap`) so that the serialized form of a record is
//! canonical, which the cache relies on when fingerprinting keys.

pub mod config;
pub mod types;

pub use config::{CacheSection, ClientConfig, ConfigError, RegistrySection, parse_duration};
pub use types::*;
