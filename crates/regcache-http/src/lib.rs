//! regcache-http — HTTP/1.1 [`Transport`](regcache::Transport) for a
//! schema registry.
//!
//! Each request opens a fresh TCP connection, performs a hyper HTTP/1.1
//! handshake and exchanges a single JSON request/response pair, all under
//! one timeout. Non-2xx answers become `TransportError::Status` carrying
//! the raw body; every other failure is `TransportError::Network`.

pub mod error;
pub mod transport;

pub use error::HttpError;
pub use transport::{CONTENT_TYPE_V1, DEFAULT_TIMEOUT, HttpTransport};
