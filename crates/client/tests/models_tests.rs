//! Schema decoding tests against recorded payloads.
//!
//! # Invariants
//! - Absent fields are `Unassigned`; collapsed nulls and empties are too
//! - Explicitly nullable fields keep `Assigned(None)`
//! - Numbers sent as strings decode for capacity fields
//!
//! # What this does NOT handle
//! - Vendor extensions (see oem_tests.rs)
//! - Fragment resolution (see links_tests.rs)

mod common;

use common::*;
use rackscale_client::models::drive::MediaType;
use rackscale_client::models::{
    Chassis, ChassisType, ComputerSystem, Drive, Health, IndicatorLed, PhysicalContext, Power,
    PowerState, Protocol, RedfishError, ResourceCollection, ServiceRoot, State, SystemType,
    Thermal,
};
use rackscale_client::{RedfishResource, Ref, Resource};

fn decode(fixture: &str) -> Resource {
    TypeRegistry::standard()
        .unwrap()
        .decode(load_fixture(fixture))
        .unwrap_or_else(|e| panic!("{fixture}: {e}"))
}

#[test]
fn test_service_root() {
    let root = decode("service_root.json").into_variant::<ServiceRoot>().unwrap();

    assert_eq!(root.odata_id, ODataId::service_root());
    assert_eq!(root.redfish_version, Ref::of("1.1.0".to_string()));
    assert_eq!(root.chassis(), Some(ODataId::new("/redfish/v1/Chassis")));
    assert_eq!(root.systems(), Some(ODataId::new("/redfish/v1/Systems")));
    assert!(root.storage_services.is_none());
    assert_eq!(root.oem().unrecognized_count(), 0);
}

#[test]
fn test_rack_chassis_fields() {
    let chassis = decode("chassis/rack.json").into_variant::<Chassis>().unwrap();

    assert_eq!(chassis.chassis_type, Ref::of(ChassisType::Rack));
    assert_eq!(chassis.indicator_led, Ref::of(IndicatorLed::Off));
    assert!(chassis.sku.is_unassigned());
    assert!(chassis.description.is_unassigned());
    assert_eq!(chassis.asset_tag, Ref::Assigned(None));
    assert_eq!(chassis.part_number, Ref::of(String::new()));

    let status = chassis.status.get().unwrap();
    assert_eq!(status.state, Ref::of(State::Enabled));
    assert_eq!(status.health, Ref::of(Health::Ok));

    assert_eq!(chassis.contains().len(), 2);
    assert!(chassis.computer_systems().is_empty());
    assert!(chassis.thermal().is_none());
}

#[test]
fn test_computer_system_fields() {
    let system = decode("systems/system.json")
        .into_variant::<ComputerSystem>()
        .unwrap();

    assert_eq!(system.system_type, Ref::of(SystemType::Physical));
    assert_eq!(system.power_state, Ref::of(PowerState::On));
    assert!(system.host_name.is_unassigned());
    assert_eq!(
        system.processor_summary.get().unwrap().count,
        Ref::of(2)
    );
    assert_eq!(
        system.memory_summary.get().unwrap().total_system_memory_gib,
        Ref::of(256.0)
    );
    assert_eq!(
        system.allowable_reset_types().map(<[String]>::len),
        Ref::of(4)
    );
    assert_eq!(system.chassis(), vec![ODataId::new("/redfish/v1/Chassis/Drawer1")]);
    assert!(system.endpoints().is_empty());
    assert_eq!(
        system.processors(),
        Some(ODataId::new("/redfish/v1/Systems/1/Processors"))
    );
}

#[test]
fn test_drive_fields() {
    let drive = decode("storage/drive.json").into_variant::<Drive>().unwrap();

    assert_eq!(drive.protocol, Ref::of(Protocol::Nvme));
    assert_eq!(drive.media_type, Ref::of(MediaType::Ssd));
    assert_eq!(drive.capacity_bytes, Ref::of(1_600_321_314_816));
    assert_eq!(drive.block_size_bytes, Ref::of(512));
    assert!(drive.identifiers.is_unassigned());
    assert_eq!(drive.erase_on_detach(), Ref::of(true));
    assert_eq!(
        drive.storage(),
        Some(ODataId::new("/redfish/v1/Chassis/Drawer1/PCIeDevices/1"))
    );
}

#[test]
fn test_thermal_readings() {
    let thermal = decode("thermal/thermal.json").into_variant::<Thermal>().unwrap();

    let temperatures = thermal.temperatures.get().unwrap();
    assert_eq!(temperatures.len(), 2);
    let cpu = &temperatures[0];
    assert_eq!(cpu.reading_celsius, Ref::of(41.0));
    assert_eq!(cpu.thresholds.upper_critical, Ref::of(90.0));
    assert!(cpu.thresholds.upper_fatal.is_unassigned());
    assert_eq!(cpu.physical_context, Ref::of(PhysicalContext::Cpu));

    // Embedded members keep their vendor data opaque.
    assert!(temperatures[1].oem.top_level.unrecognized().contains_key("Contoso"));

    let fans = thermal.fans.get().unwrap();
    assert_eq!(fans[0].display_name(), Ref::of("BaseBoard System Fan"));
    assert_eq!(fans[0].thresholds.lower_critical, Ref::of(500.0));
    assert!(thermal.redundancy.is_unassigned());
}

#[test]
fn test_power_fields() {
    let power = decode("power/power.json").into_variant::<Power>().unwrap();

    assert_eq!(power.total_consumed_watts(), Ref::of(224.0));
    let control = &power.power_control.get().unwrap()[0];
    let limit = control.power_limit.get().unwrap();
    assert_eq!(limit.limit_in_watts, Ref::Assigned(None));
    assert_eq!(limit.correction_in_ms, Ref::of(50));

    let supply = &power.power_supplies.get().unwrap()[0];
    assert_eq!(supply.line_input_voltage, Ref::of(230.0));
    assert_eq!(supply.input_ranges.get().map(Vec::len), Ok(1));
    assert!(power.redundancy.is_unassigned());
}

#[test]
fn test_collection_pages() {
    let first: ResourceCollection =
        serde_json::from_value(load_fixture("systems/collection_page1.json")).unwrap();
    assert_eq!(first.member_ids().len(), 2);
    assert_eq!(first.members_count, Ref::of(3));
    assert_eq!(first.next_link, Some(ODataId::new("/redfish/v1/Systems/Page2")));

    let second: ResourceCollection =
        serde_json::from_value(load_fixture("systems/collection_page2.json")).unwrap();
    assert!(second.next_link.is_none());
    assert!(second.members_count.is_unassigned());
}

#[test]
fn test_error_body_summary() {
    let error: RedfishError = serde_json::from_value(load_fixture("errors/not_found.json")).unwrap();
    let summary = error.summary();
    assert!(summary.contains("Requested resource does not exist"));
    assert!(summary.contains("/redfish/v1/Chassis/Missing"));
}

#[test]
fn test_generated_topology_decodes() {
    use rackscale_client::testing::generators::RackTopologyGenerator;

    let registry = TypeRegistry::standard().unwrap();
    let documents = RackTopologyGenerator::new()
        .with_chassis_count(3)
        .with_system_count(4)
        .with_omitted_member_ids(true)
        .with_foreign_oem(true)
        .generate();

    for (uri, document) in documents {
        if uri.as_str().ends_with("/Chassis") || uri.as_str().ends_with("/Systems") {
            continue;
        }
        let resource = registry
            .decode(document)
            .unwrap_or_else(|e| panic!("{uri}: {e}"));
        assert_eq!(resource.odata_id(), &uri);
    }
}
