//! Testing utilities for rackscale client tests.
//!
//! Fixture loading, an in-memory [`Transport`], fake topology generators and
//! proptest strategies. Available when running tests or when the `test-utils`
//! feature is enabled.
//!
//! # Example
//! ```ignore
//! use rackscale_client::testing::{InMemoryTransport, load_fixture};
//!
//! let transport = InMemoryTransport::new()
//!     .with_document("/redfish/v1/Chassis/1", load_fixture("chassis/rack.json"));
//! ```

pub mod generators;
pub mod strategies;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use bytes::Bytes;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::odata::ODataId;
use crate::transport::Transport;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Transport serving documents from memory.
///
/// Unknown URIs answer like a service would: `ApiError` with status 404.
/// Every fetch is recorded so tests can assert on I/O.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    documents: HashMap<ODataId, Bytes>,
    requests: Mutex<Vec<ODataId>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, uri: impl AsRef<str>, document: Value) -> Self {
        self.insert(uri, document);
        self
    }

    /// Serve raw bytes, e.g. deliberately malformed JSON.
    pub fn with_raw(mut self, uri: impl AsRef<str>, body: impl Into<Bytes>) -> Self {
        self.documents.insert(ODataId::new(uri), body.into());
        self
    }

    pub fn with_documents(mut self, documents: impl IntoIterator<Item = (ODataId, Value)>) -> Self {
        for (uri, document) in documents {
            self.insert(uri, document);
        }
        self
    }

    pub fn insert(&mut self, uri: impl AsRef<str>, document: Value) {
        self.documents
            .insert(ODataId::new(uri), Bytes::from(document.to_string()));
    }

    /// Total number of fetches served or refused.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Number of fetches of one URI.
    pub fn requests_for(&self, uri: &str) -> usize {
        let uri = ODataId::new(uri);
        self.requests
            .lock()
            .map(|r| r.iter().filter(|seen| **seen == uri).count())
            .unwrap_or_default()
    }

    /// Every fetched URI, in request order.
    pub fn requests(&self) -> Vec<ODataId> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Transport for InMemoryTransport {
    fn fetch<'a>(&'a self, uri: &'a ODataId) -> BoxFuture<'a, Result<Bytes>> {
        Box::pin(async move {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(uri.clone());
            }
            self.documents
                .get(uri)
                .cloned()
                .ok_or_else(|| ClientError::ApiError {
                    status: 404,
                    url: uri.to_string(),
                    message: "resource not found".to_string(),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unknown_uri_is_404() {
        let transport = InMemoryTransport::new();
        let err = transport
            .fetch(&ODataId::new("/redfish/v1/Nope"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(transport.requests_for("/redfish/v1/Nope"), 1);
    }

    #[tokio::test]
    async fn test_documents_are_normalized_by_uri() {
        let transport = InMemoryTransport::new().with_document("/redfish/v1/Chassis/", json!({}));
        let body = transport
            .fetch(&ODataId::new("/redfish/v1/Chassis"))
            .await
            .unwrap();
        assert_eq!(&body[..], b"{}");
    }
}
