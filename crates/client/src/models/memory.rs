//! Memory modules.

use serde::Deserialize;

use super::common::Status;
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink};
use crate::odata::{Link, ODataId};
use crate::oem::OemSlots;
use crate::optional::Ref;
use crate::serde_helpers::{unassigned_when_null, unassigned_when_null_or_empty};

redfish_enum!(
    MemoryDeviceType {
        Ddr => "DDR",
        Ddr2 => "DDR2",
        Ddr3 => "DDR3",
        Ddr4 => "DDR4",
        Ddr4Sdram => "DDR4_SDRAM",
        Ddr4eSdram => "DDR4E_SDRAM",
        LpDdr4Sdram => "LPDDR4_SDRAM",
        Ddr3Sdram => "DDR3_SDRAM",
        LpDdr3Sdram => "LPDDR3_SDRAM",
        Ddr2Sdram => "DDR2_SDRAM",
        DdrSdram => "DDR_SDRAM",
        Rom => "ROM",
        Sdram => "SDRAM",
        Edo => "EDO",
        FastPageMode => "FastPageMode",
        PipelinedNibble => "PipelinedNibble",
        Logical => "Logical",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Memory {
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
    #[serde(rename = "MemoryType", default, deserialize_with = "unassigned_when_null")]
    pub memory_type: Ref<String>,
    #[serde(rename = "MemoryDeviceType", default, deserialize_with = "unassigned_when_null")]
    pub memory_device_type: Ref<MemoryDeviceType>,
    #[serde(rename = "BaseModuleType", default, deserialize_with = "unassigned_when_null")]
    pub base_module_type: Ref<String>,
    #[serde(rename = "MemoryMedia", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub memory_media: Ref<Vec<String>>,
    #[serde(rename = "CapacityMiB", default, deserialize_with = "unassigned_when_null")]
    pub capacity_mib: Ref<u64>,
    #[serde(rename = "DataWidthBits", default, deserialize_with = "unassigned_when_null")]
    pub data_width_bits: Ref<u32>,
    #[serde(rename = "BusWidthBits", default, deserialize_with = "unassigned_when_null")]
    pub bus_width_bits: Ref<u32>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "SerialNumber", default, deserialize_with = "unassigned_when_null")]
    pub serial_number: Ref<String>,
    #[serde(rename = "PartNumber", default, deserialize_with = "unassigned_when_null")]
    pub part_number: Ref<String>,
    #[serde(
        rename = "AllowedSpeedsMHz",
        default,
        deserialize_with = "unassigned_when_null_or_empty"
    )]
    pub allowed_speeds_mhz: Ref<Vec<u32>>,
    #[serde(rename = "OperatingSpeedMhz", default, deserialize_with = "unassigned_when_null")]
    pub operating_speed_mhz: Ref<u32>,
    #[serde(rename = "FirmwareRevision", default, deserialize_with = "unassigned_when_null")]
    pub firmware_revision: Ref<String>,
    #[serde(rename = "FirmwareApiVersion", default, deserialize_with = "unassigned_when_null")]
    pub firmware_api_version: Ref<String>,
    #[serde(rename = "RankCount", default, deserialize_with = "unassigned_when_null")]
    pub rank_count: Ref<u32>,
    #[serde(rename = "DeviceLocator", default, deserialize_with = "unassigned_when_null")]
    pub device_locator: Ref<String>,
    #[serde(rename = "ErrorCorrection", default, deserialize_with = "unassigned_when_null")]
    pub error_correction: Ref<String>,
    #[serde(rename = "VoltageVolt", default, deserialize_with = "unassigned_when_null")]
    pub voltage_volt: Ref<f64>,
    #[serde(rename = "MemoryLocation", default, deserialize_with = "unassigned_when_null")]
    pub memory_location: Ref<MemoryLocation>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "Metrics", default)]
    pub metrics: Option<Link>,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryLocation {
    #[serde(rename = "Socket", default, deserialize_with = "unassigned_when_null")]
    pub socket: Ref<u32>,
    #[serde(rename = "MemoryController", default, deserialize_with = "unassigned_when_null")]
    pub memory_controller: Ref<u32>,
    #[serde(rename = "Channel", default, deserialize_with = "unassigned_when_null")]
    pub channel: Ref<u32>,
    #[serde(rename = "Slot", default, deserialize_with = "unassigned_when_null")]
    pub slot: Ref<u32>,
}

impl RedfishResource for Memory {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new().single("metrics", self.metrics.as_ref()).build()
    }
}

impl ResourceSchema for Memory {
    const KIND: ResourceKind = ResourceKind::Memory;
    const TYPE_PATTERNS: &'static [&'static str] = &["#Memory.{ver}.Memory"];

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
