//! Error types for cache resolution and registry operations.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for registry client operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors surfaced by the cache and the client operations built on it.
///
/// Transport failures are passed through unchanged: a miss that fails at
/// the transport yields the same error a caller would see without a cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry answered with a non-success status.
    #[error("registry returned {status}: {body}")]
    Transport { status: u16, body: String },

    /// The registry could not be reached (connect, handshake, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The request input could not be turned into a canonical cache key.
    #[error("cannot encode cache key: {0}")]
    KeyEncoding(String),

    /// A request body could not be serialized.
    #[error("cannot encode request body: {0}")]
    Encode(String),

    /// The response body did not have the expected shape.
    #[error("cannot decode registry response: {0}")]
    Decode(String),

    #[error("invalid cache configuration: {0}")]
    InvalidConfig(String),
}

impl RegistryError {
    /// HTTP status of a transport rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<TransportError> for RegistryError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, body } => RegistryError::Transport { status, body },
            TransportError::Network(msg) => RegistryError::Network(msg),
        }
    }
}
