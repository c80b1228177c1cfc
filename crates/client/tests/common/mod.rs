//! Common test utilities for integration tests.
//!
//! This module re-exports the fixture loader, the in-memory transport and the
//! wiremock types the integration tests reach for, plus constructors for
//! readers wired to either.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock expectations (mount them with wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::sync::Arc;
use std::time::Duration;

#[allow(unused_imports)]
pub use rackscale_client::testing::{InMemoryTransport, load_fixture};
#[allow(unused_imports)]
pub use rackscale_client::{HttpTransport, ODataId, ResourceReader, TypeRegistry};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Reader over an in-memory transport, with the standard registry. The
/// transport is handed back so tests can count requests.
#[allow(dead_code)]
pub fn memory_reader(transport: InMemoryTransport) -> (ResourceReader, Arc<InMemoryTransport>) {
    let transport = Arc::new(transport);
    let reader = ResourceReader::builder()
        .shared_transport(transport.clone())
        .build()
        .expect("reader");
    (reader, transport)
}

/// Reader talking HTTP to `server`, retrying with a negligible delay.
#[allow(dead_code)]
pub fn http_reader(server: &MockServer, max_retries: usize) -> ResourceReader {
    let transport = HttpTransport::builder()
        .base_url(server.uri())
        .max_retries(max_retries)
        .retry_delay(Duration::from_millis(1))
        .build()
        .expect("transport");
    ResourceReader::builder()
        .transport(transport)
        .build()
        .expect("reader")
}
