//! Vendor extension resolution tests against recorded payloads.
//!
//! # Invariants
//! - Variants are tried in declared order; the first that parses wins
//! - Unclaimed namespaces are kept verbatim and never fail the resource
//! - A claimed namespace that fails every variant yields `OemDecode` with the
//!   rest of the resource intact
//!
//! # What this does NOT handle
//! - Non-OEM field decoding (see models_tests.rs)

mod common;

use common::*;
use rackscale_client::models::{Chassis, ComputerSystem, Processor};
use rackscale_client::oem::dell::DellSystemOem;
use rackscale_client::oem::rackscale::{
    ChassisOem, DiscoveryState, DrawerChassisOem, RackChassisOem, SystemOem,
};
use rackscale_client::{ClientError, OemAttachment, Ref, ResourceKind};
use serde_json::json;

fn decode(fixture: &str) -> rackscale_client::Result<rackscale_client::Resource> {
    TypeRegistry::standard().unwrap().decode(load_fixture(fixture))
}

#[test]
fn test_rack_chassis_variant_selected() {
    let chassis = decode("chassis/rack.json")
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();

    let rack = chassis.rack_attributes().expect("rack variant");
    assert_eq!(rack.rack_supports_disaggregated_power_cooling, Ref::of(true));
    assert_eq!(rack.geo_tag.get().map(String::as_str), Ok("Row 3"));
    assert!(chassis.oem.top_level.get::<DrawerChassisOem>().is_none());
    assert!(chassis.oem.top_level.get::<ChassisOem>().is_none());

    assert_eq!(chassis.location_id(), Ref::of("Rack1"));
    assert_eq!(chassis.location_parent_id(), Ref::of("Pod1"));
}

#[test]
fn test_drawer_variant_when_rack_key_absent() {
    let chassis = decode("chassis/drawer.json")
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();

    assert!(chassis.rack_attributes().is_none());
    let drawer = chassis
        .oem
        .top_level
        .get::<DrawerChassisOem>()
        .expect("drawer variant");
    assert_eq!(drawer.rmm_present, Ref::of(true));
    assert_eq!(chassis.location_id(), Ref::of("drawer-1"));
    assert!(chassis.location_parent_id().is_unassigned());
}

#[test]
fn test_generic_chassis_variant_is_fallback() {
    let mut payload = load_fixture("chassis/drawer.json");
    payload["Oem"] = json!({"Intel_RackScale": {"Location": {"Id": "sled-4", "ParentId": "drawer-1"}}});

    let chassis = TypeRegistry::standard()
        .unwrap()
        .decode(payload)
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();

    assert!(chassis.oem.top_level.get::<ChassisOem>().is_some());
    assert_eq!(chassis.location_id(), Ref::of("sled-4"));
    assert_eq!(chassis.location_parent_id(), Ref::of("drawer-1"));
}

#[test]
fn test_unknown_vendor_kept_opaque() {
    let chassis = decode("chassis/rack.json")
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();

    let unrecognized = chassis.oem.top_level.unrecognized();
    assert_eq!(
        unrecognized.get("Contoso"),
        Some(&json!({"AssetLabel": "A-17", "Cooling": {"Zone": 4}}))
    );
    assert_eq!(chassis.oem.unrecognized_count(), 1);
}

#[test]
fn test_links_oem_resolved_separately() {
    let rack = decode("chassis/rack.json")
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();
    assert_eq!(rack.switches(), vec![ODataId::new("/redfish/v1/EthernetSwitches/1")]);
    assert!(rack.contained_by().is_none());

    let drawer = decode("chassis/drawer.json")
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();
    assert_eq!(drawer.contained_by(), Some(ODataId::new("/redfish/v1/Chassis/Rack1")));
    assert!(drawer.switches().is_empty());
}

#[test]
fn test_system_extensions_from_two_vendors() {
    let system = decode("systems/system.json")
        .unwrap()
        .into_variant::<ComputerSystem>()
        .unwrap();

    let intel: &SystemOem = system.rackscale().expect("Intel_RackScale");
    assert_eq!(intel.discovery_state, Ref::of(DiscoveryState::Deep));
    assert_eq!(intel.processor_sockets, Ref::of(2));
    assert_eq!(intel.memory_sockets, Ref::of(16));
    assert!(intel.pcie_connection_id.is_unassigned());
    let devices = intel.pci_devices.get().unwrap();
    assert_eq!(devices[0].vendor_id.get().map(String::as_str), Ok("8086"));

    let dell: &DellSystemOem = system.dell().expect("Dell");
    assert_eq!(
        dell.dell_system.chassis_service_tag.get().map(String::as_str),
        Ok("7XB8L12")
    );
    assert!(dell.dell_system.cpu_rollup_status.is_unassigned());

    assert_eq!(
        system.metrics(),
        Some(ODataId::new("/redfish/v1/Systems/1/Metrics"))
    );
}

#[test]
fn test_action_extensions() {
    let system = decode("systems/system.json")
        .unwrap()
        .into_variant::<ComputerSystem>()
        .unwrap();

    assert_eq!(
        system.start_deep_discovery().map(|a| a.target.as_str()),
        Some("/redfish/v1/Systems/1/Actions/Oem/Intel.Oem.StartDeepDiscovery")
    );
    let tpm = system.change_tpm_state().expect("ChangeTPMState");
    assert_eq!(
        tpm.allowable_interface_types.get().map(Vec::len),
        Ok(2)
    );
    assert!(system.oem.actions.unrecognized().is_empty());
}

#[test]
fn test_failed_namespace_keeps_partial_resource() {
    let err = decode("storage/processor_bad_oem.json").unwrap_err();

    let ClientError::OemDecode { ref error, .. } = err else {
        panic!("expected OemDecode, got {err:?}");
    };
    assert_eq!(error.namespace, "Intel_RackScale");
    assert_eq!(error.attachment, OemAttachment::TopLevel);
    assert!(err.is_decode());

    let partial = err.into_partial_resource().expect("partial resource");
    assert_eq!(partial.kind(), ResourceKind::Processor);
    let processor = partial.into_variant::<Processor>().unwrap();
    assert_eq!(processor.total_cores, Ref::of(18));
    assert_eq!(processor.socket.get().map(String::as_str), Ok("CPU 1"));
    assert!(processor.rackscale().is_none());
}

#[test]
fn test_rack_variant_takes_precedence_over_generic() {
    // Carries keys of both the rack and the generic shape.
    let payload = json!({
        "@odata.type": "#Chassis.v1_2_0.Chassis",
        "Oem": {"Intel_RackScale": {
            "RackSupportsDisaggregatedPowerCooling": false,
            "Location": {"Id": "Rack9"}
        }}
    });
    let chassis = TypeRegistry::standard()
        .unwrap()
        .decode(payload)
        .unwrap()
        .into_variant::<Chassis>()
        .unwrap();

    let rack: &RackChassisOem = chassis.rack_attributes().unwrap();
    assert_eq!(rack.rack_supports_disaggregated_power_cooling, Ref::of(false));
    assert_eq!(chassis.location_id(), Ref::of("Rack9"));
}
