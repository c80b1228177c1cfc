//! Fetching raw resource payloads.
//!
//! Responsibilities:
//! - Define the [`Transport`] seam the reader fetches through.
//! - Provide the reqwest-backed [`HttpTransport`].
//!
//! Does NOT handle:
//! - Decoding. Transports return bytes; see [`crate::reader`].
//! - Caching or request coalescing. Every fetch goes to the wire.
//!
//! Invariants:
//! - A fragment in the requested URI is never sent; the whole document is
//!   returned and the caller picks the embedded member.

mod http;
mod retry;

use std::fmt;

use bytes::Bytes;
use futures::future::BoxFuture;

use crate::error::Result;
use crate::odata::ODataId;

pub use http::{HttpTransport, HttpTransportBuilder};
pub use retry::send_with_retry;

/// Source of resource documents.
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// concurrently.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Fetch the JSON document at `uri`.
    fn fetch<'a>(&'a self, uri: &'a ODataId) -> BoxFuture<'a, Result<Bytes>>;
}
