//! Types shared across resource schemas.
//!
//! This module contains status blocks, enumerations and the error body
//! returned by management services. It does NOT contain resource-specific
//! models.

use serde::Deserialize;

use crate::optional::Ref;
use crate::serde_helpers::{unassigned_when_null, unassigned_when_null_or_empty};

redfish_enum!(
    /// `Status.State`.
    State {
        Enabled => "Enabled",
        Disabled => "Disabled",
        StandbyOffline => "StandbyOffline",
        StandbySpare => "StandbySpare",
        InTest => "InTest",
        Starting => "Starting",
        Absent => "Absent",
        UnavailableOffline => "UnavailableOffline",
        Deferring => "Deferring",
        Quiesced => "Quiesced",
        Updating => "Updating",
    }
);

redfish_enum!(
    /// `Status.Health` and `Status.HealthRollup`.
    Health {
        Ok => "OK",
        Warning => "Warning",
        Critical => "Critical",
    }
);

redfish_enum!(
    IndicatorLed {
        Lit => "Lit",
        Blinking => "Blinking",
        Off => "Off",
    }
);

redfish_enum!(
    PowerState {
        On => "On",
        Off => "Off",
        PoweringOn => "PoweringOn",
        PoweringOff => "PoweringOff",
    }
);

redfish_enum!(
    ChassisType {
        Rack => "Rack",
        Blade => "Blade",
        Enclosure => "Enclosure",
        StandAlone => "StandAlone",
        RackMount => "RackMount",
        Card => "Card",
        Cartridge => "Cartridge",
        Row => "Row",
        Pod => "Pod",
        Expansion => "Expansion",
        Sidecar => "Sidecar",
        Zone => "Zone",
        Sled => "Sled",
        Shelf => "Shelf",
        Drawer => "Drawer",
        Module => "Module",
        Component => "Component",
        IpBasedDrive => "IPBasedDrive",
        RackGroup => "RackGroup",
        StorageEnclosure => "StorageEnclosure",
        Other => "Other",
    }
);

redfish_enum!(
    /// Area or device a sensor reading applies to.
    PhysicalContext {
        Room => "Room",
        Intake => "Intake",
        Exhaust => "Exhaust",
        Front => "Front",
        Back => "Back",
        Upper => "Upper",
        Lower => "Lower",
        Cpu => "CPU",
        Gpu => "GPU",
        Backplane => "Backplane",
        SystemBoard => "SystemBoard",
        PowerSupply => "PowerSupply",
        VoltageRegulator => "VoltageRegulator",
        StorageDevice => "StorageDevice",
        NetworkingDevice => "NetworkingDevice",
        ComputeBay => "ComputeBay",
        StorageBay => "StorageBay",
        NetworkBay => "NetworkBay",
        ExpansionBay => "ExpansionBay",
        PowerSupplyBay => "PowerSupplyBay",
        Memory => "Memory",
        Chassis => "Chassis",
        Fan => "Fan",
    }
);

redfish_enum!(
    /// Transport protocol of a drive, port or endpoint.
    Protocol {
        Pcie => "PCIe",
        Ahci => "AHCI",
        Uhci => "UHCI",
        Sas => "SAS",
        Sata => "SATA",
        Usb => "USB",
        Nvme => "NVMe",
        NvmeOverFabrics => "NVMeOverFabrics",
        Fc => "FC",
        FCoE => "FCoE",
        Fcp => "FCP",
        Ficon => "FICON",
        Iscsi => "iSCSI",
        Roce => "RoCE",
        RoCEv2 => "RoCEv2",
        IWarp => "iWARP",
        Tcp => "TCP",
        Udp => "UDP",
        Ethernet => "Ethernet",
        Oem => "OEM",
    }
);

/// `Status` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Status {
    #[serde(rename = "State", default, deserialize_with = "unassigned_when_null")]
    pub state: Ref<State>,
    #[serde(rename = "Health", default, deserialize_with = "unassigned_when_null")]
    pub health: Ref<Health>,
    #[serde(rename = "HealthRollup", default, deserialize_with = "unassigned_when_null")]
    pub health_rollup: Ref<Health>,
}

impl Status {
    /// Whether the component is present and enabled.
    pub fn is_enabled(&self) -> bool {
        self.state.as_option() == Some(&State::Enabled)
    }
}

/// Durable identifier of a drive, volume or endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identifier {
    #[serde(rename = "DurableName", default, deserialize_with = "unassigned_when_null")]
    pub durable_name: Ref<String>,
    #[serde(rename = "DurableNameFormat", default, deserialize_with = "unassigned_when_null")]
    pub durable_name_format: Ref<String>,
}

/// A reset-style action with its allowable values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetAction {
    #[serde(rename = "target", default, deserialize_with = "unassigned_when_null")]
    pub target: Ref<String>,
    #[serde(
        rename = "ResetType@Redfish.AllowableValues",
        default,
        deserialize_with = "unassigned_when_null_or_empty"
    )]
    pub allowable_values: Ref<Vec<String>>,
}

/// A parameterless action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionTarget {
    #[serde(rename = "target", default, deserialize_with = "unassigned_when_null")]
    pub target: Ref<String>,
}

/// Error body returned with non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RedfishError {
    pub error: RedfishErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedfishErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<MessageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageInfo {
    #[serde(rename = "MessageId", default)]
    pub message_id: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

impl RedfishError {
    /// One-line summary: top-level message followed by extended messages.
    pub fn summary(&self) -> String {
        let detail = &self.error;
        let mut parts: Vec<&str> = Vec::new();
        if let Some(message) = detail.message.as_deref().or(detail.code.as_deref()) {
            parts.push(message);
        }
        parts.extend(
            detail
                .extended_info
                .iter()
                .filter_map(|info| info.message.as_deref().or(info.message_id.as_deref())),
        );
        parts.join("; ")
    }
}
