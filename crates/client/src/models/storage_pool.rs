//! Storage pools and the capacity types shared with volumes.

use serde::Deserialize;

use super::common::{Identifier, Status};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference};
use crate::odata::{Link, ODataId};
use crate::oem::OemSlots;
use crate::optional::Ref;
use crate::serde_helpers::{
    ref_u64_from_string_or_number, unassigned_when_null, unassigned_when_null_or_empty,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CapacityInfo {
    #[serde(rename = "AllocatedBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub allocated_bytes: Ref<u64>,
    #[serde(rename = "ConsumedBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub consumed_bytes: Ref<u64>,
    #[serde(rename = "GuaranteedBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub guaranteed_bytes: Ref<u64>,
    #[serde(rename = "ProvisionedBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub provisioned_bytes: Ref<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Capacity {
    #[serde(rename = "Data", default, deserialize_with = "unassigned_when_null")]
    pub data: Ref<CapacityInfo>,
    #[serde(rename = "Metadata", default, deserialize_with = "unassigned_when_null")]
    pub metadata: Ref<CapacityInfo>,
    #[serde(rename = "Snapshot", default, deserialize_with = "unassigned_when_null")]
    pub snapshot: Ref<CapacityInfo>,
    #[serde(rename = "IsThinProvisioned", default, deserialize_with = "unassigned_when_null")]
    pub is_thin_provisioned: Ref<bool>,
}

/// Where a pool or volume gets its capacity from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CapacitySource {
    #[serde(rename = "ProvidedCapacity", default, deserialize_with = "unassigned_when_null")]
    pub provided_capacity: Ref<Capacity>,
    #[serde(rename = "ProvidingDrives", default)]
    pub providing_drives: Option<Vec<Link>>,
    #[serde(rename = "ProvidingPools", default)]
    pub providing_pools: Option<Vec<Link>>,
    #[serde(rename = "ProvidingVolumes", default)]
    pub providing_volumes: Option<Vec<Link>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoragePool {
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
    #[serde(rename = "Capacity", default, deserialize_with = "unassigned_when_null")]
    pub capacity: Ref<Capacity>,
    #[serde(rename = "CapacitySources", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub capacity_sources: Ref<Vec<CapacitySource>>,
    #[serde(rename = "Identifier", default, deserialize_with = "unassigned_when_null")]
    pub identifier: Ref<Identifier>,
    #[serde(rename = "BlockSizeBytes", default, deserialize_with = "ref_u64_from_string_or_number")]
    pub block_size_bytes: Ref<u64>,
    #[serde(rename = "AllocatedVolumes", default)]
    pub allocated_volumes: Option<Link>,
    #[serde(rename = "AllocatedPools", default)]
    pub allocated_pools: Option<Link>,
    #[serde(skip)]
    pub oem: OemSlots,
}

impl StoragePool {
    pub fn allocated_volumes(&self) -> Option<ODataId> {
        to_reference(self.allocated_volumes.as_ref())
    }

    /// Free bytes, when both allocated and consumed data capacity are known.
    pub fn free_bytes(&self) -> Ref<u64> {
        self.capacity
            .as_ref()
            .and_then(|c| c.data.as_ref())
            .and_then(|d| match (d.allocated_bytes.as_option(), d.consumed_bytes.as_option()) {
                (Some(allocated), Some(consumed)) => Ref::of(allocated.saturating_sub(*consumed)),
                _ => Ref::Unassigned,
            })
    }
}

impl RedfishResource for StoragePool {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .collection("allocatedVolumes", self.allocated_volumes.as_ref())
            .collection("allocatedPools", self.allocated_pools.as_ref())
            .build()
    }
}

impl ResourceSchema for StoragePool {
    const KIND: ResourceKind = ResourceKind::StoragePool;
    const TYPE_PATTERNS: &'static [&'static str] = &["#StoragePool.{ver}.StoragePool"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
