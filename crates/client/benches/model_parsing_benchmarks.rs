//! Benchmarks for resource decoding through the type registry.
//!
//! Covers discriminator lookup, vendor extension resolution and large
//! embedded collections (thermal sensors, collection pages).

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rackscale_client::TypeRegistry;
use rackscale_client::models::ResourceCollection;
use rackscale_client::testing::load_fixture;
use serde_json::{Value, json};

fn generate_thermal(sensors: usize) -> Value {
    let temperatures: Vec<Value> = (0..sensors)
        .map(|i| {
            json!({
                "MemberId": i.to_string(),
                "Name": format!("Sensor {i}"),
                "ReadingCelsius": 20 + (i % 50),
                "UpperThresholdCritical": 90,
                "PhysicalContext": "CPU",
                "Oem": {"Contoso": {"Calibrated": i % 2 == 0}}
            })
        })
        .collect();
    let fans: Vec<Value> = (0..sensors)
        .map(|i| json!({"Name": format!("Fan {i}"), "Reading": 2000 + i, "ReadingUnits": "RPM"}))
        .collect();

    json!({
        "@odata.id": "/redfish/v1/Chassis/1/Thermal",
        "@odata.type": "#Thermal.v1_1_0.Thermal",
        "Temperatures": temperatures,
        "Fans": fans
    })
}

fn generate_collection(members: usize) -> String {
    let members: Vec<Value> = (0..members)
        .map(|i| json!({"@odata.id": format!("/redfish/v1/Systems/{i}")}))
        .collect();
    serde_json::to_string(&json!({
        "@odata.id": "/redfish/v1/Systems",
        "Members@odata.count": members.len(),
        "Members": members
    }))
    .unwrap()
}

fn bench_resolve_discriminator(c: &mut Criterion) {
    let registry = TypeRegistry::standard().unwrap();
    c.bench_function("resolve_discriminator", |b| {
        b.iter(|| {
            let schema = registry
                .resolve(black_box("#Thermal.v1_1_0.Thermal"))
                .unwrap();
            black_box(schema.kind())
        })
    });
}

fn bench_decode_rack_chassis(c: &mut Criterion) {
    let registry = TypeRegistry::standard().unwrap();
    let payload = load_fixture("chassis/rack.json");
    c.bench_function("decode_rack_chassis", |b| {
        b.iter(|| black_box(registry.decode(black_box(payload.clone())).unwrap()))
    });
}

fn bench_decode_system_with_oem(c: &mut Criterion) {
    let registry = TypeRegistry::standard().unwrap();
    let payload = load_fixture("systems/system.json");
    c.bench_function("decode_system_with_oem", |b| {
        b.iter(|| black_box(registry.decode(black_box(payload.clone())).unwrap()))
    });
}

fn bench_decode_thermal(c: &mut Criterion) {
    let registry = TypeRegistry::standard().unwrap();
    let mut group = c.benchmark_group("decode_thermal");
    for sensors in [16, 256] {
        let payload = generate_thermal(sensors);
        group.bench_function(format!("{sensors}_sensors"), |b| {
            b.iter(|| black_box(registry.decode(black_box(payload.clone())).unwrap()))
        });
    }
    group.finish();
}

fn bench_collection_page_10k(c: &mut Criterion) {
    let json = generate_collection(10_000);
    c.bench_function("collection_page_10k", |b| {
        b.iter(|| {
            let page: ResourceCollection = serde_json::from_str(black_box(&json)).unwrap();
            black_box(page.member_ids())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_discriminator,
    bench_decode_rack_chassis,
    bench_decode_system_with_oem,
    bench_decode_thermal,
    bench_collection_page_10k
);
criterion_main!(benches);
