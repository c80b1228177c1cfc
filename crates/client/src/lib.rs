//! Client-side resource model for rack-scale management services.
//!
//! This crate decodes Redfish-style JSON documents into typed resources:
//! discriminator-driven schema selection, tri-state optional fields, vendor
//! (OEM) extensions resolved at parse time, and lazily evaluated references
//! between resources.

pub mod error;
pub mod links;
pub mod metrics;
pub mod models;
pub mod odata;
pub mod oem;
pub mod optional;
pub mod reader;
pub mod registry;
pub mod serde_helpers;
pub mod tracing;
pub mod transport;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use error::{ClientError, Result};
pub use links::{LinkTarget, ResourceLink, resolve_fragment, to_reference, to_references};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{RedfishResource, Resource, ResourceKind, ResourceSchema};
pub use odata::{Link, ODataId};
pub use oem::{OemAttachment, OemDecodeError, OemExtension, OemExtensions, OemSlots};
pub use optional::{IllegalStateError, Ref, RefPolicy};
pub use reader::{
    DeferredCollection, DeferredLink, DeferredResource, DeferredTarget, ResourceReader,
    ResourceReaderBuilder,
};
pub use registry::{Schema, TypePattern, TypeRegistry};
pub use transport::{HttpTransport, HttpTransportBuilder, Transport};
