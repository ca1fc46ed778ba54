//! regcache — keyed resolution cache in front of a schema registry.
//!
//! Resolves schema/subject/version/id lookups through a remote registry,
//! memoizes the results, and guarantees that for any key at most one
//! resolution request is in flight. Network I/O is delegated to an
//! injected [`Transport`].
//!
//! # Architecture
//!
//! ```text
//! SchemaRegistryClient
//!   ├── Arc<dyn Transport>              (send(path, method, body))
//!   └── SchemaRegistryClientCache
//!       ├── Domain<SchemaKey,  SchemaId>        schema → id
//!       ├── Domain<IdKey,      SchemaInfo>      id → schema
//!       ├── Domain<SchemaKey,  SchemaMetadata>  registration
//!       ├── Domain<LatestKey,  SchemaMetadata>  subject → latest
//!       ├── Domain<SchemaKey,  Version>         schema → version
//!       ├── Domain<VersionKey, SchemaMetadata>  version → schema
//!       └── Domain<MetadataKey,SchemaMetadata>  metadata → schema
//! ```
//!
//! Each domain is a [`BoundedStore`] (LRU, optional max age) behind its
//! own async mutex. Domains never share storage or guards.

pub mod cache;
pub mod client;
pub mod domain;
pub mod error;
pub mod key;
mod response;
pub mod store;
pub mod transport;

pub use cache::{CacheConfig, SchemaRegistryClientCache};
pub use client::SchemaRegistryClient;
pub use domain::{Domain, ResolutionDomain};
pub use error::{RegistryError, RegistryResult};
pub use key::{Fingerprint, IdKey, LatestKey, MetadataKey, SchemaKey, SubjectScoped, VersionKey};
pub use store::BoundedStore;
pub use transport::{Method, Transport, TransportError, TransportFuture, TransportResponse};

pub use regcache_core as core;
