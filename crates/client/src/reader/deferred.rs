//! Deferred references.
//!
//! A handle is a reader plus a URI. Creating one performs no I/O; every
//! evaluation fetches and decodes afresh, and handles may be evaluated
//! concurrently from any task. Fan-out evaluation reports one result per
//! target, so a failing member never hides the ones that resolved.

use futures::future::join_all;

use super::ResourceReader;
use crate::error::Result;
use crate::models::{Resource, ResourceSchema, ResourceVariant};
use crate::odata::ODataId;

/// A resource that will be fetched when asked for.
#[derive(Debug, Clone)]
pub struct DeferredResource {
    reader: ResourceReader,
    uri: ODataId,
}

impl DeferredResource {
    pub(crate) fn new(reader: ResourceReader, uri: ODataId) -> Self {
        Self { reader, uri }
    }

    pub fn uri(&self) -> &ODataId {
        &self.uri
    }

    /// Fetch and decode the referenced resource.
    pub async fn get(&self) -> Result<Resource> {
        self.reader.read(&self.uri).await
    }

    /// Fetch and decode, requiring a specific resource type.
    pub async fn get_as<T>(&self) -> Result<T>
    where
        T: ResourceSchema + ResourceVariant,
    {
        self.reader.read_as::<T>(&self.uri).await
    }
}

/// The members of a collection, enumerated when asked for.
#[derive(Debug, Clone)]
pub struct DeferredCollection {
    reader: ResourceReader,
    uri: ODataId,
}

impl DeferredCollection {
    pub(crate) fn new(reader: ResourceReader, uri: ODataId) -> Self {
        Self { reader, uri }
    }

    pub fn uri(&self) -> &ODataId {
        &self.uri
    }

    /// Fetch the collection and return a handle per member.
    pub async fn members(&self) -> Result<Vec<DeferredResource>> {
        self.reader.expand_members(&self.uri).await
    }

    /// Fetch the collection, then every member concurrently.
    ///
    /// The outer error covers only the collection itself. Each member gets its
    /// own result, in `Members` order.
    pub async fn get_all(&self) -> Result<Vec<Result<Resource>>> {
        let members = self.members().await?;
        Ok(join_all(members.iter().map(|member| member.get())).await)
    }
}

/// Evaluable form of a [`crate::links::LinkTarget`].
#[derive(Debug, Clone)]
pub enum DeferredTarget {
    Single(DeferredResource),
    Multiple(Vec<DeferredResource>),
    Collection(DeferredCollection),
}

/// A named outgoing reference, ready to evaluate.
#[derive(Debug, Clone)]
pub struct DeferredLink {
    pub name: &'static str,
    pub target: DeferredTarget,
}

impl DeferredLink {
    /// Resolve the link to one result per target. Collections are expanded;
    /// the outer error means the collection itself could not be read.
    pub async fn resolve(&self) -> Result<Vec<Result<Resource>>> {
        match &self.target {
            DeferredTarget::Single(resource) => Ok(vec![resource.get().await]),
            DeferredTarget::Multiple(resources) => {
                Ok(join_all(resources.iter().map(|member| member.get())).await)
            }
            DeferredTarget::Collection(collection) => collection.get_all().await,
        }
    }

    /// URIs the link points at, without fetching. A collection yields its own URI.
    pub fn uris(&self) -> Vec<&ODataId> {
        match &self.target {
            DeferredTarget::Single(resource) => vec![resource.uri()],
            DeferredTarget::Multiple(resources) => {
                resources.iter().map(DeferredResource::uri).collect()
            }
            DeferredTarget::Collection(collection) => vec![collection.uri()],
        }
    }
}
