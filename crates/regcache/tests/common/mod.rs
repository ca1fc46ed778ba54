//! Recording mock transport shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use regcache::core::{Metadata, SchemaInfo};
use regcache::{
    CacheConfig, Method, SchemaRegistryClient, Transport, TransportError, TransportFuture,
    TransportResponse,
};
use serde_json::Value;

/// One request observed by the mock.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers every request with the currently configured result and records it.
pub struct MockTransport {
    calls: Mutex<Vec<Call>>,
    next: Mutex<Result<Value, TransportError>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_delay(None))
    }

    /// A mock that sleeps before answering, to widen race windows.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self::with_delay(Some(delay)))
    }

    fn with_delay(delay: Option<Duration>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next: Mutex::new(Ok(Value::Null)),
            delay,
        }
    }

    pub fn respond(&self, body: Value) {
        *self.next.lock().unwrap() = Ok(body);
    }

    pub fn fail(&self, err: TransportError) {
        *self.next.lock().unwrap() = Err(err);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn count(&self, method: Method) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn last_call(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for MockTransport {
    fn send<'a>(
        &'a self,
        path: &'a str,
        method: Method,
        body: Option<&'a Value>,
    ) -> TransportFuture<'a> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        let result = self.next.lock().unwrap().clone();
        let delay = self.delay;
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result.map(TransportResponse::ok)
        })
    }
}

pub fn client(transport: &Arc<MockTransport>) -> SchemaRegistryClient {
    client_with(transport, CacheConfig::default())
}

pub fn client_with(transport: &Arc<MockTransport>, config: CacheConfig) -> SchemaRegistryClient {
    SchemaRegistryClient::new(Arc::clone(transport) as Arc<dyn Transport>, &config).unwrap()
}

pub const USER_SCHEMA: &str =
    r#"{"type":"record","name":"User","fields":[{"name":"name","type":"string"},{"name":"age","type":"int"}]}"#;
pub const USER2_SCHEMA: &str =
    r#"{"type":"record","name":"User2","fields":[{"name":"name2","type":"string"},{"name":"age2","type":"int"}]}"#;

pub fn avro(schema: &str) -> SchemaInfo {
    SchemaInfo::new(schema, "AVRO")
}

pub fn owner_metadata(owner: &str, email: &str) -> Metadata {
    Metadata::with_properties([("owner", owner), ("email", email)])
}
