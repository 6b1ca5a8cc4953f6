//! Enumeration Tests
//!
//! Tests for walking the registry and probing each device.

use listnetworks::device::sim::DeviceSpec;
use listnetworks::device::{CapabilityQuery, DeviceEnumerator, DeviceRegistry, SimulatedRegistry};
use listnetworks::protocol::{CommandId, DeviceKind};
use listnetworks::ScanError;

// =============================================================================
// Helper Functions
// =============================================================================

fn device_of_kind(name: &str, kind: DeviceKind) -> DeviceSpec {
    let mut spec = DeviceSpec::new(name);
    spec.kind = Some(kind);
    spec
}

fn names(registry: &SimulatedRegistry, max: usize) -> Vec<String> {
    DeviceEnumerator::new(registry, CapabilityQuery::sana2())
        .enumerate(max)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect()
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_enumerate_finds_sana2_devices_in_order() {
    let registry = SimulatedRegistry::new();
    registry.add(device_of_kind("timer.device", DeviceKind::Timer));
    registry.add(DeviceSpec::sana2("a2065.device", &[]));
    registry.add(DeviceSpec::new("ramdrive.device"));
    registry.add(DeviceSpec::sana2("wifipi.device", &[CommandId::GetNetworks]));

    assert_eq!(names(&registry, 16), vec!["a2065.device", "wifipi.device"]);
}

#[test]
fn test_enumerate_respects_max_count() {
    let registry = SimulatedRegistry::new();
    for i in 0..5 {
        registry.add(DeviceSpec::sana2(format!("eth{}.device", i), &[]));
    }

    assert_eq!(names(&registry, 3), vec!["eth0.device", "eth1.device", "eth2.device"]);

    // Devices past the cap are never probed
    assert!(registry.command_log("eth3.device").is_empty());
    assert!(registry.command_log("eth4.device").is_empty());
}

#[test]
fn test_enumerate_skips_unopenable_devices() {
    let registry = SimulatedRegistry::new();
    let mut broken = DeviceSpec::sana2("broken.device", &[]);
    broken.open_fails = true;
    registry.add(broken);

    let mut no_unit_zero = DeviceSpec::sana2("unit1.device", &[]);
    no_unit_zero.units = vec![1];
    registry.add(no_unit_zero);

    registry.add(DeviceSpec::sana2("good.device", &[]));

    assert_eq!(names(&registry, 16), vec!["good.device"]);
}

#[test]
fn test_enumerate_none_found() {
    let registry = SimulatedRegistry::new();
    registry.add(device_of_kind("timer.device", DeviceKind::Timer));
    registry.add(device_of_kind("console.device", DeviceKind::Console));

    let result = DeviceEnumerator::new(&registry, CapabilityQuery::sana2()).enumerate(16);
    assert!(matches!(result, Err(ScanError::NoDevicesFound)));
}

#[test]
fn test_enumerate_empty_registry() {
    let registry = SimulatedRegistry::new();
    assert_eq!(registry.device_count(), 0);

    let result = DeviceEnumerator::new(&registry, CapabilityQuery::sana2()).enumerate(16);
    assert!(matches!(result, Err(ScanError::NoDevicesFound)));
}

#[test]
fn test_enumerate_closes_every_probe() {
    let registry = SimulatedRegistry::new();
    registry.add(device_of_kind("timer.device", DeviceKind::Timer));
    registry.add(DeviceSpec::new("legacy.device"));
    registry.add(DeviceSpec::sana2("wifipi.device", &[]));

    names(&registry, 16);

    assert_eq!(registry.total_open_handles(), 0);
    // Each device got exactly one handshake
    for name in ["timer.device", "legacy.device", "wifipi.device"] {
        assert_eq!(registry.command_log(name), vec![CommandId::NsDeviceQuery.code()]);
    }
}

#[test]
fn test_open_unknown_device() {
    let registry = SimulatedRegistry::new();
    let result = registry.open("missing.device", 0);

    match result {
        Err(ScanError::OpenFailed { name, unit }) => {
            assert_eq!(name, "missing.device");
            assert_eq!(unit, 0);
        }
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("open should fail"),
    }
}

#[test]
fn test_handle_closes_on_drop() {
    let registry = SimulatedRegistry::new();
    registry.add(DeviceSpec::sana2("wifipi.device", &[]));

    {
        let _a = registry.open("wifipi.device", 0).unwrap();
        let b = registry.open("wifipi.device", 0).unwrap();
        assert_eq!(registry.open_handles("wifipi.device"), 2);
        assert_eq!(b.info().open_count, 2);
        b.close();
        assert_eq!(registry.open_handles("wifipi.device"), 1);
    }

    assert_eq!(registry.open_handles("wifipi.device"), 0);
}
