use thiserror::Error;

/// Errors building an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("invalid registry url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported url scheme '{0}' (only http is supported)")]
    UnsupportedScheme(String),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}
