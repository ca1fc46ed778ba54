//! Transport seam between the cache and the registry's HTTP API.
//!
//! The cache never performs I/O itself. Every miss is turned into a single
//! [`Transport::send`] call with a fixed path template, and whatever the
//! transport returns (success or failure) is handed back to the caller
//! that triggered the miss.
//!
//! Implementations live outside this crate (`regcache-http` for a real
//! registry, recording mocks in tests) and are injected as
//! `Arc<dyn Transport>`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

/// HTTP method of a registry request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful registry response.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// Failure reported by a transport.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The registry rejected the request.
    #[error("HTTP error: {status} - {body}")]
    Status { status: u16, body: String },
    /// The registry could not be reached.
    #[error("network error: {0}")]
    Network(String),
}

/// Boxed future alias for transport results.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>>;

/// Sends one request to the registry. Injected for testability.
pub trait Transport: Send + Sync {
    /// Issue `method` against `path` (rooted at the registry base, query
    /// string included) with an optional JSON body.
    fn send<'a>(
        &'a self,
        path: &'a str,
        method: Method,
        body: Option<&'a Value>,
    ) -> TransportFuture<'a>;
}
