//! Storage volumes.

use serde::Deserialize;

use super::common::{Identifier, Status};
use super::storage_pool::{Capacity, CapacitySource};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_references};
use crate::odata::{Link, ODataId};
use crate::oem::OemSlots;
use crate::optional::Ref;
use crate::serde_helpers::{
    null_as_default, ref_u64_from_string_or_number, unassigned_when_null,
    unassigned_when_null_or_empty,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Volume {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: ODataId,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "Id", default, deserialize_with = "unassigned_when_null")]
    pub id: Ref<String>,
    #[serde(rename = "Name", default, deserialize_with = "unassigned_when_null")]
    pub name: Ref<String>,
    #[serde(rename = "Description", default, deserialize_with = "unassigned_when_null")]
    pub description: Ref<String>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "CapacityBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub capacity_bytes: Ref<u64>,
    #[serde(rename = "Capacity", default, deserialize_with = "unassigned_when_null")]
    pub capacity: Ref<Capacity>,
    #[serde(rename = "CapacitySources", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub capacity_sources: Ref<Vec<CapacitySource>>,
    #[serde(rename = "VolumeType", default, deserialize_with = "unassigned_when_null")]
    pub volume_type: Ref<String>,
    #[serde(rename = "Encrypted", default, deserialize_with = "unassigned_when_null")]
    pub encrypted: Ref<bool>,
    #[serde(rename = "BlockSizeBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub block_size_bytes: Ref<u64>,
    #[serde(rename = "Identifiers", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub identifiers: Ref<Vec<Identifier>>,
    #[serde(rename = "AccessCapabilities", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub access_capabilities: Ref<Vec<String>>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: VolumeLinks,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeLinks {
    #[serde(rename = "Drives", default)]
    pub drives: Option<Vec<Link>>,
}

impl Volume {
    pub fn drives(&self) -> Vec<ODataId> {
        to_references(self.links.drives.as_deref())
    }

    /// Pools this volume draws capacity from, in source order.
    pub fn source_pools(&self) -> Vec<ODataId> {
        self.capacity_sources
            .as_option()
            .into_iter()
            .flatten()
            .flat_map(|s| to_references(s.providing_pools.as_deref()))
            .collect()
    }
}

impl RedfishResource for Volume {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .multiple("drives", self.links.drives.as_deref())
            .references("providingPools", self.source_pools())
            .build()
    }
}

impl ResourceSchema for Volume {
    const KIND: ResourceKind = ResourceKind::Volume;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Volume.{ver}.Volume"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
