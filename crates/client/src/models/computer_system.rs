//! Computer systems (compute nodes).

use serde::Deserialize;

use super::common::{IndicatorLed, PowerState, ResetAction, Status};
use super::{RedfishResource, ResourceKind, ResourceSchema};
use crate::links::{LinkSet, ResourceLink, to_reference, to_references};
use crate::odata::{Link, ODataId};
use crate::oem::dell::{self, DellSystemOem};
use crate::oem::rackscale::{self, ChangeTpmStateAction, StartDeepDiscoveryAction, SystemOem};
use crate::oem::{OemBindings, OemSlots};
use crate::optional::Ref;
use crate::serde_helpers::{null_as_default, unassigned_when_null, unassigned_when_null_or_empty};

redfish_enum!(
    SystemType {
        Physical => "Physical",
        Virtual => "Virtual",
        Os => "OS",
        PhysicallyPartitioned => "PhysicallyPartitioned",
        VirtuallyPartitioned => "VirtuallyPartitioned",
        Composed => "Composed",
    }
);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComputerSystem {
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
    #[serde(rename = "UUID", default, deserialize_with = "unassigned_when_null")]
    pub uuid: Ref<String>,
    #[serde(rename = "SystemType", default, deserialize_with = "unassigned_when_null")]
    pub system_type: Ref<SystemType>,
    #[serde(rename = "Manufacturer", default, deserialize_with = "unassigned_when_null")]
    pub manufacturer: Ref<String>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "SKU", default, deserialize_with = "unassigned_when_null")]
    pub sku: Ref<String>,
    #[serde(rename = "SerialNumber", default, deserialize_with = "unassigned_when_null")]
    pub serial_number: Ref<String>,
    #[serde(rename = "PartNumber", default, deserialize_with = "unassigned_when_null")]
    pub part_number: Ref<String>,
    /// Writable; an explicit `null` means the tag was cleared.
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Ref<Option<String>>,
    #[serde(rename = "HostName", default, deserialize_with = "unassigned_when_null")]
    pub host_name: Ref<String>,
    #[serde(rename = "BiosVersion", default, deserialize_with = "unassigned_when_null")]
    pub bios_version: Ref<String>,
    #[serde(rename = "IndicatorLED", default, deserialize_with = "unassigned_when_null")]
    pub indicator_led: Ref<IndicatorLed>,
    #[serde(rename = "PowerState", default, deserialize_with = "unassigned_when_null")]
    pub power_state: Ref<PowerState>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
    #[serde(rename = "ProcessorSummary", default, deserialize_with = "unassigned_when_null")]
    pub processor_summary: Ref<ProcessorSummary>,
    #[serde(rename = "MemorySummary", default, deserialize_with = "unassigned_when_null")]
    pub memory_summary: Ref<MemorySummary>,
    #[serde(rename = "Boot", default, deserialize_with = "unassigned_when_null")]
    pub boot: Ref<Boot>,
    #[serde(rename = "Processors", default)]
    pub processors: Option<Link>,
    #[serde(rename = "Memory", default)]
    pub memory: Option<Link>,
    #[serde(rename = "EthernetInterfaces", default)]
    pub ethernet_interfaces: Option<Link>,
    #[serde(rename = "SimpleStorage", default)]
    pub simple_storage: Option<Link>,
    #[serde(rename = "Storage", default)]
    pub storage: Option<Link>,
    #[serde(rename = "NetworkInterfaces", default)]
    pub network_interfaces: Option<Link>,
    #[serde(rename = "PCIeDevices", default)]
    pub pcie_devices: Option<Vec<Link>>,
    #[serde(rename = "PCIeFunctions", default)]
    pub pcie_functions: Option<Vec<Link>>,
    #[serde(rename = "Links", default, deserialize_with = "null_as_default")]
    pub links: SystemLinks,
    #[serde(rename = "Actions", default, deserialize_with = "null_as_default")]
    pub actions: SystemActions,
    #[serde(skip)]
    pub oem: OemSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemLinks {
    #[serde(rename = "Chassis", default)]
    pub chassis: Option<Vec<Link>>,
    #[serde(rename = "ManagedBy", default)]
    pub managed_by: Option<Vec<Link>>,
    #[serde(rename = "Endpoints", default)]
    pub endpoints: Option<Vec<Link>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemActions {
    #[serde(rename = "#ComputerSystem.Reset", default, deserialize_with = "unassigned_when_null")]
    pub reset: Ref<ResetAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorSummary {
    #[serde(rename = "Count", default, deserialize_with = "unassigned_when_null")]
    pub count: Ref<u32>,
    #[serde(rename = "Model", default, deserialize_with = "unassigned_when_null")]
    pub model: Ref<String>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemorySummary {
    #[serde(rename = "TotalSystemMemoryGiB", default, deserialize_with = "unassigned_when_null")]
    pub total_system_memory_gib: Ref<f64>,
    #[serde(rename = "Status", default, deserialize_with = "unassigned_when_null")]
    pub status: Ref<Status>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Boot {
    #[serde(rename = "BootSourceOverrideEnabled", default, deserialize_with = "unassigned_when_null")]
    pub source_override_enabled: Ref<String>,
    #[serde(rename = "BootSourceOverrideTarget", default, deserialize_with = "unassigned_when_null")]
    pub source_override_target: Ref<String>,
    #[serde(
        rename = "BootSourceOverrideTarget@Redfish.AllowableValues",
        default,
        deserialize_with = "unassigned_when_null_or_empty"
    )]
    pub allowable_targets: Ref<Vec<String>>,
    #[serde(rename = "BootSourceOverrideMode", default, deserialize_with = "unassigned_when_null")]
    pub source_override_mode: Ref<String>,
}

impl ComputerSystem {
    pub fn rackscale(&self) -> Option<&SystemOem> {
        self.oem.top_level.get::<SystemOem>()
    }

    pub fn dell(&self) -> Option<&DellSystemOem> {
        self.oem.top_level.get::<DellSystemOem>()
    }

    pub fn start_deep_discovery(&self) -> Option<&StartDeepDiscoveryAction> {
        self.oem.actions.get::<StartDeepDiscoveryAction>()
    }

    pub fn change_tpm_state(&self) -> Option<&ChangeTpmStateAction> {
        self.oem.actions.get::<ChangeTpmStateAction>()
    }

    /// Reset types the service accepts.
    pub fn allowable_reset_types(&self) -> Ref<&[String]> {
        self.actions
            .reset
            .as_ref()
            .and_then(|r| r.allowable_values.as_ref())
            .map(Vec::as_slice)
    }

    pub fn processors(&self) -> Option<ODataId> {
        to_reference(self.processors.as_ref())
    }

    pub fn memory(&self) -> Option<ODataId> {
        to_reference(self.memory.as_ref())
    }

    pub fn endpoints(&self) -> Vec<ODataId> {
        to_references(self.links.endpoints.as_deref())
    }

    pub fn chassis(&self) -> Vec<ODataId> {
        to_references(self.links.chassis.as_deref())
    }

    pub fn metrics(&self) -> Option<ODataId> {
        self.rackscale().and_then(|o| to_reference(o.metrics.as_ref()))
    }
}

impl RedfishResource for ComputerSystem {
    resource_identity!();

    fn links(&self) -> Vec<ResourceLink> {
        LinkSet::new()
            .collection("processors", self.processors.as_ref())
            .collection("memoryModules", self.memory.as_ref())
            .collection("ethernetInterfaces", self.ethernet_interfaces.as_ref())
            .collection("simpleStorages", self.simple_storage.as_ref())
            .collection("storage", self.storage.as_ref())
            .collection("networkInterfaces", self.network_interfaces.as_ref())
            .multiple("pcieDevices", self.pcie_devices.as_deref())
            .multiple("pcieFunctions", self.pcie_functions.as_deref())
            .multiple("chassis", self.links.chassis.as_deref())
            .multiple("managedBy", self.links.managed_by.as_deref())
            .multiple("endpoints", self.links.endpoints.as_deref())
            .single(
                "computerSystemMetrics",
                self.rackscale().and_then(|o| o.metrics.as_ref()),
            )
            .build()
    }
}

impl ResourceSchema for ComputerSystem {
    const KIND: ResourceKind = ResourceKind::ComputerSystem;
    const TYPE_PATTERNS: &'static [&'static str] = &["#ComputerSystem.{ver}.ComputerSystem"];
    const OEM: OemBindings = OemBindings {
        top_level: &[rackscale::SYSTEM, dell::SYSTEM],
        links: &[],
        actions: &[rackscale::START_DEEP_DISCOVERY, rackscale::CHANGE_TPM_STATE],
    };

    fn set_oem(&mut self, slots: OemSlots) {
        self.oem = slots;
    }
}
