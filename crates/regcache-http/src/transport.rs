//! `HttpTransport` — one hyper HTTP/1.1 exchange per registry request.

use std::time::Duration;

use bytes::Bytes;
use http::Uri;
use http::header::{ACCEPT, CONTENT_TYPE, HOST, HeaderMap, HeaderName, HeaderValue};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpStream;
use tracing::debug;

use regcache::{Method, Transport, TransportError, TransportFuture, TransportResponse};

use crate::error::HttpError;

/// Media type sent with every request.
pub const CONTENT_TYPE_V1: &str = "application/vnd.schemaregistry.v1+json";

/// Bound on a whole exchange unless overridden with [`HttpTransport::with_timeout`].
pub use regcache::core::config::DEFAULT_TIMEOUT;

/// Transport talking plain HTTP/1.1 to a single registry base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// `host:port` to connect to.
    address: String,
    /// Authority as written in the base URL, used for the `host` header.
    authority: String,
    /// Path prefix of the base URL without a trailing slash (may be empty).
    base_path: String,
    timeout: Duration,
    headers: HeaderMap,
}

impl HttpTransport {
    /// Parse an `http://host[:port][/prefix]` base URL.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let invalid = |reason: &str| HttpError::InvalidUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = base_url
            .trim()
            .parse()
            .map_err(|e: http::uri::InvalidUri| invalid(&e.to_string()))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(HttpError::UnsupportedScheme(other.to_string())),
            None => return Err(invalid("missing scheme")),
        }
        let authority = uri.authority().ok_or_else(|| invalid("missing host"))?;
        if authority.host().is_empty() {
            return Err(invalid("missing host"));
        }
        let port = authority.port_u16().unwrap_or(80);

        Ok(Self {
            address: format!("{}:{port}", authority.host()),
            authority: authority.as_str().to_string(),
            base_path: uri.path().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: HeaderMap::new(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        let invalid = |reason: String| HttpError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        self.headers.insert(header, value);
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.authority, self.base_path)
    }

    async fn exchange(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        let uri = format!("{}{path}", self.base_url());

        let stream = TcpStream::connect(&self.address).await.map_err(|e| {
            debug!(error = %e, %uri, "registry connection failed");
            TransportError::Network(format!("connect to {}: {e}", self.address))
        })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| {
                debug!(error = %e, %uri, "registry handshake failed");
                TransportError::Network(format!("handshake with {}: {e}", self.address))
            })?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(error = %e, "registry connection closed with error");
            }
        });

        let payload = match body {
            Some(value) => Bytes::from(value.to_string()),
            None => Bytes::new(),
        };
        // Origin-form target; the authority goes in the host header.
        let mut request = http::Request::builder()
            .method(method.as_str())
            .uri(format!("{}{path}", self.base_path))
            .header(HOST, self.authority.as_str())
            .header(CONTENT_TYPE, CONTENT_TYPE_V1)
            .header(ACCEPT, CONTENT_TYPE_V1)
            .body(Full::new(payload))
            .map_err(|e| TransportError::Network(format!("build request {uri}: {e}")))?;
        request.headers_mut().extend(self.headers.clone());

        let response = sender.send_request(request).await.map_err(|e| {
            debug!(error = %e, %uri, "registry request failed");
            TransportError::Network(format!("{method} {uri}: {e}"))
        })?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Network(format!("read response from {uri}: {e}")))?
            .to_bytes();

        if !status.is_success() {
            debug!(status = %status, %uri, "registry rejected request");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                TransportError::Network(format!("invalid JSON in response from {uri}: {e}"))
            })?
        };
        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        path: &'a str,
        method: Method,
        body: Option<&'a Value>,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            match tokio::time::timeout(self.timeout, self.exchange(path, method, body)).await {
                Ok(result) => result,
                Err(_) => {
                    debug!(%method, path, "registry request timed out");
                    Err(TransportError::Network(format!(
                        "{method} {path} timed out after {:?}",
                        self.timeout
                    )))
                }
            }
        })
    }
}
