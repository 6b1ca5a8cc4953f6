//! Capability Query Tests
//!
//! Tests for the device handshake and the resulting capability set.

use listnetworks::device::sim::{DeviceSpec, FailureSpec, CommandSpec};
use listnetworks::device::{CapabilityQuery, CapabilitySet, DeviceRegistry, SimulatedRegistry};
use listnetworks::protocol::{CommandId, DeviceKind};
use listnetworks::{ErrorCode, ScanError};

// =============================================================================
// Helper Functions
// =============================================================================

fn registry_with(spec: DeviceSpec) -> SimulatedRegistry {
    let registry = SimulatedRegistry::new();
    registry.add(spec);
    registry
}

// =============================================================================
// Capability Set Tests
// =============================================================================

#[test]
fn test_set_without_array_supports_nothing() {
    let caps = CapabilitySet::new(DeviceKind::Sana2, 0, None::<Vec<u16>>);

    assert!(!caps.supports(CommandId::GetNetworks));
    assert!(!caps.supports(CommandId::NsDeviceQuery));
    assert_eq!(caps.accepted_commands().count(), 0);
}

#[test]
fn test_set_with_empty_array_supports_nothing() {
    let caps = CapabilitySet::new(DeviceKind::Sana2, 0, Some(Vec::<u16>::new()));

    assert!(!caps.supports(CommandId::GetSignalQuality));
}

#[test]
fn test_set_membership() {
    let caps = CapabilitySet::new(
        DeviceKind::Sana2,
        3,
        Some(vec![CommandId::GetNetworks.code(), 0x1234]),
    );

    assert!(caps.supports(CommandId::GetNetworks));
    assert!(caps.supports_code(0x1234));
    assert!(!caps.supports(CommandId::GetCryptTypes));
    assert_eq!(caps.device_kind(), DeviceKind::Sana2);
    assert_eq!(caps.device_sub_kind(), 3);
    assert_eq!(caps.accepted_commands().collect::<Vec<_>>(), vec![0x1234, 0xC011]);
}

// =============================================================================
// Handshake Tests
// =============================================================================

#[test]
fn test_query_sana2_device() {
    let registry = registry_with(DeviceSpec::sana2(
        "wifi.device",
        &[CommandId::GetNetworks, CommandId::GetSignalQuality],
    ));
    let mut handle = registry.open("wifi.device", 0).unwrap();

    let caps = CapabilityQuery::sana2().query(&mut handle).unwrap();

    assert_eq!(caps.device_kind(), DeviceKind::Sana2);
    assert!(caps.supports(CommandId::GetNetworks));
    assert!(caps.supports(CommandId::GetSignalQuality));
    assert!(!caps.supports(CommandId::GetNetworkInfo));

    // Exactly one request issued
    assert_eq!(registry.command_log("wifi.device"), vec![CommandId::NsDeviceQuery.code()]);
}

#[test]
fn test_query_without_command_array() {
    let mut spec = DeviceSpec::new("old.device");
    spec.kind = Some(DeviceKind::Sana2);
    let registry = registry_with(spec);
    let mut handle = registry.open("old.device", 0).unwrap();

    let caps = CapabilityQuery::sana2().query(&mut handle).unwrap();

    assert!(!caps.supports(CommandId::GetNetworks));
    assert_eq!(caps.accepted_commands().count(), 0);
}

#[test]
fn test_query_kind_mismatch() {
    let mut spec = DeviceSpec::new("timer.device");
    spec.kind = Some(DeviceKind::Timer);
    let registry = registry_with(spec);
    let mut handle = registry.open("timer.device", 0).unwrap();

    let err = CapabilityQuery::sana2().query(&mut handle).unwrap_err();

    match err {
        ScanError::NotSupportedDevice { name, .. } => assert_eq!(name, "timer.device"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_query_other_expected_kind() {
    let mut spec = DeviceSpec::new("timer.device");
    spec.kind = Some(DeviceKind::Timer);
    let registry = registry_with(spec);
    let mut handle = registry.open("timer.device", 0).unwrap();

    let query = CapabilityQuery::new(DeviceKind::Timer);
    assert_eq!(query.expected(), DeviceKind::Timer);
    assert_eq!(query.query(&mut handle).unwrap().device_kind(), DeviceKind::Timer);
}

#[test]
fn test_query_unanswered_handshake() {
    let registry = registry_with(DeviceSpec::new("legacy.device"));
    let mut handle = registry.open("legacy.device", 0).unwrap();

    let err = CapabilityQuery::sana2().query(&mut handle).unwrap_err();
    assert!(matches!(err, ScanError::NotSupportedDevice { .. }));
}

#[test]
fn test_query_device_error() {
    let mut spec = DeviceSpec::sana2("busy.device", &[CommandId::GetNetworks]);
    spec.failures.push(FailureSpec {
        command: CommandSpec::Named(CommandId::NsDeviceQuery),
        code: ErrorCode::IOERR_UNITBUSY.0,
    });
    let registry = registry_with(spec);
    let mut handle = registry.open("busy.device", 0).unwrap();

    let err = CapabilityQuery::sana2().query(&mut handle).unwrap_err();

    match err {
        ScanError::NotSupportedDevice { reason, .. } => assert!(reason.contains("IOERR_UNITBUSY")),
        other => panic!("unexpected error: {:?}", other),
    }
}
