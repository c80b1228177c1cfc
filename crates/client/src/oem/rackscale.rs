//! `Intel_RackScale` vendor extensions.
//!
//! Chassis carry one of three mutually exclusive shapes under the same
//! namespace key. They are declared most specific first: a rack exposes
//! `RackSupportsDisaggregatedPowerCooling`, an RMM drawer exposes a flat
//! `LocationId`, anything else falls through to the generic `Location` object.

use serde::Deserialize;

use super::{OemParser, OemVariant, parse_as};
use crate::odata::Link;
use crate::optional::Ref;
use crate::serde_helpers::{unassigned_when_null, unassigned_when_null_or_empty};

pub const NAMESPACE: &str = "Intel_RackScale";

/// Top-level chassis extension.
pub const CHASSIS: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[
        OemVariant::new("RackChassis", parse_as::<RackChassisOem>),
        OemVariant::new("DrawerChassis", parse_as::<DrawerChassisOem>),
        OemVariant::new("Chassis", parse_as::<ChassisOem>),
    ],
};

/// `Links.Oem` of a chassis.
pub const CHASSIS_LINKS: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[OemVariant::new("ChassisLinks", parse_as::<ChassisLinksOem>)],
};

pub const SYSTEM: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[OemVariant::new("System", parse_as::<SystemOem>)],
};

pub const DRIVE: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[OemVariant::new("Drive", parse_as::<DriveOem>)],
};

pub const PROCESSOR: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[OemVariant::new("Processor", parse_as::<ProcessorOem>)],
};

pub const ENDPOINT: OemParser = OemParser {
    namespace: NAMESPACE,
    variants: &[OemVariant::new("Endpoint", parse_as::<EndpointOem>)],
};

/// `Actions.Oem` entries of a computer system. Keyed by action name.
pub const START_DEEP_DISCOVERY: OemParser = OemParser {
    namespace: "#Intel.Oem.StartDeepDiscovery",
    variants: &[OemVariant::new("StartDeepDiscovery", parse_as::<StartDeepDiscoveryAction>)],
};

pub const CHANGE_TPM_STATE: OemParser = OemParser {
    namespace: "#Intel.Oem.ChangeTPMState",
    variants: &[OemVariant::new("ChangeTPMState", parse_as::<ChangeTpmStateAction>)],
};

/// Location of a chassis inside its parent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OemLocation {
    #[serde(rename = "Id", default, deserialize_with = "unassigned_when_null")]
    pub id: Ref<String>,
    #[serde(rename = "ParentId", default, deserialize_with = "unassigned_when_null")]
    pub parent_id: Ref<String>,
}

/// Rack chassis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RackChassisOem {
    #[serde(
        rename = "RackSupportsDisaggregatedPowerCooling",
        deserialize_with = "unassigned_when_null"
    )]
    pub rack_supports_disaggregated_power_cooling: Ref<bool>,
    #[serde(rename = "UUID", default, deserialize_with = "unassigned_when_null")]
    pub uuid: Ref<String>,
    #[serde(rename = "GeoTag", default, deserialize_with = "unassigned_when_null")]
    pub geo_tag: Ref<String>,
    #[serde(rename = "Location", default, deserialize_with = "unassigned_when_null")]
    pub location: Ref<OemLocation>,
}

/// Drawer reported by a rack management module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrawerChassisOem {
    #[serde(rename = "LocationId", deserialize_with = "unassigned_when_null")]
    pub location_id: Ref<String>,
    #[serde(rename = "RMMPresent", default, deserialize_with = "unassigned_when_null")]
    pub rmm_present: Ref<bool>,
}

/// Any other chassis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChassisOem {
    #[serde(rename = "Location", default, deserialize_with = "unassigned_when_null")]
    pub location: Ref<OemLocation>,
}

impl ChassisOem {
    pub fn location_id(&self) -> Ref<&str> {
        self.location.as_ref().and_then(|l| l.id.as_ref()).map(String::as_str)
    }

    pub fn parent_id(&self) -> Ref<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.parent_id.as_ref())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChassisLinksOem {
    #[serde(rename = "Switches", default)]
    pub switches: Option<Vec<Link>>,
    #[serde(rename = "ContainedBy", default)]
    pub contained_by: Option<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DiscoveryState {
    None,
    Basic,
    Deep,
    DeepFailed,
    DeepInProgress,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PciDevice {
    #[serde(rename = "VendorId", default, deserialize_with = "unassigned_when_null")]
    pub vendor_id: Ref<String>,
    #[serde(rename = "DeviceId", default, deserialize_with = "unassigned_when_null")]
    pub device_id: Ref<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemOem {
    #[serde(rename = "DiscoveryState", default, deserialize_with = "unassigned_when_null")]
    pub discovery_state: Ref<DiscoveryState>,
    #[serde(rename = "ProcessorSockets", default, deserialize_with = "unassigned_when_null")]
    pub processor_sockets: Ref<u32>,
    #[serde(rename = "MemorySockets", default, deserialize_with = "unassigned_when_null")]
    pub memory_sockets: Ref<u32>,
    #[serde(rename = "PciDevices", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub pci_devices: Ref<Vec<PciDevice>>,
    #[serde(rename = "PCIeConnectionId", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub pcie_connection_id: Ref<Vec<String>>,
    #[serde(rename = "UserModeEnabled", default, deserialize_with = "unassigned_when_null")]
    pub user_mode_enabled: Ref<bool>,
    #[serde(
        rename = "TrustedExecutionTechnologyEnabled",
        default,
        deserialize_with = "unassigned_when_null"
    )]
    pub trusted_execution_technology_enabled: Ref<bool>,
    #[serde(rename = "Metrics", default)]
    pub metrics: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DriveOem {
    #[serde(rename = "EraseOnDetach", default, deserialize_with = "unassigned_when_null")]
    pub erase_on_detach: Ref<bool>,
    #[serde(rename = "DriveErased", default, deserialize_with = "unassigned_when_null")]
    pub drive_erased: Ref<bool>,
    #[serde(rename = "FirmwareVersion", default, deserialize_with = "unassigned_when_null")]
    pub firmware_version: Ref<String>,
    #[serde(rename = "Storage", default)]
    pub storage: Option<Link>,
    #[serde(rename = "PCIeFunction", default)]
    pub pcie_function: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessorOem {
    #[serde(rename = "Brand", default, deserialize_with = "unassigned_when_null")]
    pub brand: Ref<String>,
    #[serde(rename = "Capabilities", default, deserialize_with = "unassigned_when_null_or_empty")]
    pub capabilities: Ref<Vec<String>>,
    #[serde(rename = "ThermalDesignPowerWatt", default, deserialize_with = "unassigned_when_null")]
    pub thermal_design_power_watt: Ref<f64>,
    #[serde(rename = "Metrics", default)]
    pub metrics: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointAuthentication {
    #[serde(rename = "Username", default, deserialize_with = "unassigned_when_null")]
    pub username: Ref<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointOem {
    #[serde(rename = "Authentication", default, deserialize_with = "unassigned_when_null")]
    pub authentication: Ref<EndpointAuthentication>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartDeepDiscoveryAction {
    #[serde(rename = "target")]
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeTpmStateAction {
    #[serde(rename = "target")]
    pub target: String,
    #[serde(
        rename = "InterfaceType@Redfish.AllowableValues",
        default,
        deserialize_with = "unassigned_when_null_or_empty"
    )]
    pub allowable_interface_types: Ref<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oem::OemExtension;
    use serde_json::json;

    #[test]
    fn test_drawer_requires_location_id() {
        assert!(parse_as::<DrawerChassisOem>(&json!({"Location": {"Id": "1"}})).is_err());

        let ext = parse_as::<DrawerChassisOem>(&json!({"LocationId": "drawer-7"})).unwrap();
        let OemExtension::DrawerChassis(drawer) = ext else {
            panic!("expected drawer variant");
        };
        assert_eq!(drawer.location_id, Ref::of("drawer-7".to_string()));
    }

    #[test]
    fn test_system_oem_collapses_empty_lists() {
        let ext = parse_as::<SystemOem>(&json!({
            "DiscoveryState": "Deep",
            "PCIeConnectionId": [],
            "ProcessorSockets": 2,
            "Metrics": {"@odata.id": "/redfish/v1/Systems/1/Metrics"}
        }))
        .unwrap();
        let OemExtension::RackScaleSystem(system) = ext else {
            panic!("expected system variant");
        };
        assert_eq!(system.discovery_state, Ref::of(DiscoveryState::Deep));
        assert!(system.pcie_connection_id.is_unassigned());
        assert_eq!(system.processor_sockets, Ref::of(2));
        assert!(system.metrics.is_some());
    }

    #[test]
    fn test_unknown_discovery_state() {
        let state: DiscoveryState = serde_json::from_value(json!("Quantum")).unwrap();
        assert_eq!(state, DiscoveryState::Unknown);
    }
}
