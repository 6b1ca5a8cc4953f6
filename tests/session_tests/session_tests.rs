//! Session Tests
//!
//! End-to-end runs against simulated registries loaded from fixture files.

use std::fs;

use listnetworks::device::SimulatedRegistry;
use listnetworks::session::{self, ExitStatus};
use listnetworks::{ArenaAllocator, Config, ErrorCode, ScanError, ScanOutcome};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const FIXTURE: &str = r#"{
  "devices": [
    { "name": "timer.device", "kind": "timer" },
    { "name": "legacy.device" },
    { "name": "a2065.device", "kind": "sana2",
      "commands": ["S2_DEVICEQUERY", "S2_GETSTATIONADDRESS"],
      "hardware": { "mtu": 1500, "bps": 10000000 },
      "station_address": [0, 128, 16, 1, 2, 3] },
    { "name": "wifipi.device", "kind": "sana2", "units": [0, 1],
      "commands": ["S2_GETSIGNALQUALITY", "S2_GETNETWORKS", 49175],
      "signal": { "signal": -52, "noise": -91 },
      "crypto_types": [0, 3],
      "networks": [
        { "ssid": "Home", "bssid": [0, 17, 34, 51, 68, 85], "channel": 6,
          "signal": -40, "noise": -85, "band": "2.4" },
        { "band": "5", "null_bssid": true }
      ] },
    { "name": "broken.device", "kind": "sana2",
      "commands": ["S2_GETNETWORKS"],
      "failures": [ { "command": "S2_GETNETWORKS", "code": 9 } ] },
    { "name": "empty.device", "kind": "sana2",
      "commands": ["S2_GETNETWORKS"], "networks": [] }
  ]
}"#;

/// Load `json` through a fixture file, the way the binary does
fn load(json: &str) -> (TempDir, SimulatedRegistry) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devices.json");
    fs::write(&path, json).unwrap();
    let registry = SimulatedRegistry::load(&path).unwrap();
    (dir, registry)
}

fn allocator() -> ArenaAllocator {
    ArenaAllocator::new(Config::default().arena_limit)
}

// =============================================================================
// Device Selection Tests
// =============================================================================

#[test]
fn test_enumerate_and_use_first_device() {
    let (_dir, registry) = load(FIXTURE);
    let allocator = allocator();

    let result = session::run(&Config::default(), &registry, &allocator);
    let report = result.as_ref().unwrap();

    let devices: Vec<&str> = report
        .devices
        .as_ref()
        .unwrap()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(devices, vec!["a2065.device", "wifipi.device", "broken.device", "empty.device"]);

    // a2065 does not scan
    assert_eq!(report.device, "a2065.device");
    assert_eq!(report.outcome, ScanOutcome::Unsupported);
    assert_eq!(session::exit_status(&result), ExitStatus::Warn);

    assert_eq!(registry.total_open_handles(), 0);
    assert_eq!(allocator.live(), 0);
}

#[test]
fn test_named_device_scan() {
    let (_dir, registry) = load(FIXTURE);
    let allocator = allocator();
    let config = Config::builder().device("wifipi.device").unit(1).build();

    let result = session::run(&config, &registry, &allocator);
    let report = result.as_ref().unwrap();

    assert!(report.devices.is_none());
    assert_eq!(report.unit, 1);
    assert!(report.capabilities.supports_code(49175));
    match &report.outcome {
        ScanOutcome::Succeeded(scan) => {
            assert_eq!(scan.len(), 2);
            assert_eq!(scan.networks[1].bssid, None);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(session::exit_status(&result), ExitStatus::Ok);
    assert_eq!(registry.total_open_handles(), 0);
}

#[test]
fn test_verbose_session_collects_details() {
    let (_dir, registry) = load(FIXTURE);
    let allocator = allocator();
    let config = Config::builder().device("wifipi.device").verbose(true).build();

    let report = session::run(&config, &registry, &allocator).unwrap();
    let details = report.details.unwrap();

    assert_eq!(details.signal.unwrap().signal, -52);
    assert_eq!(details.crypto_types.unwrap().len(), 2);
    assert!(details.hardware.is_none());
    assert_eq!(allocator.live(), 0);
}

// =============================================================================
// Error Path Tests
// =============================================================================

#[test]
fn test_named_device_wrong_kind() {
    let (_dir, registry) = load(FIXTURE);
    let config = Config::builder().device("timer.device").build();

    let result = session::run(&config, &registry, &allocator());

    assert!(matches!(result, Err(ScanError::NotSupportedDevice { .. })));
    assert_eq!(session::exit_status(&result), ExitStatus::Error);
    assert_eq!(registry.total_open_handles(), 0);
}

#[test]
fn test_named_device_missing_unit() {
    let (_dir, registry) = load(FIXTURE);
    let config = Config::builder().device("a2065.device").unit(3).build();

    let result = session::run(&config, &registry, &allocator());

    assert!(matches!(result, Err(ScanError::OpenFailed { unit: 3, .. })));
    assert_eq!(session::exit_status(&result), ExitStatus::Error);
}

#[test]
fn test_scan_failure_exit_status() {
    let (_dir, registry) = load(FIXTURE);
    let config = Config::builder().device("broken.device").build();

    let result = session::run(&config, &registry, &allocator());

    assert_eq!(
        result.as_ref().unwrap().outcome,
        ScanOutcome::Failed(ErrorCode::S2ERR_OUTOFSERVICE)
    );
    assert_eq!(session::exit_status(&result), ExitStatus::Error);
    assert_eq!(registry.total_open_handles(), 0);
}

#[test]
fn test_empty_scan_exit_status() {
    let (_dir, registry) = load(FIXTURE);
    let config = Config::builder().device("empty.device").build();

    let result = session::run(&config, &registry, &allocator());

    assert_eq!(session::exit_status(&result), ExitStatus::Warn);
}

#[test]
fn test_no_devices_found() {
    let (_dir, registry) = load(r#"{ "devices": [ { "name": "timer.device", "kind": "timer" } ] }"#);

    let result = session::run(&Config::default(), &registry, &allocator());

    assert!(matches!(result, Err(ScanError::NoDevicesFound)));
    assert_eq!(session::exit_status(&result), ExitStatus::Warn);
    assert_eq!(registry.total_open_handles(), 0);
}

#[test]
fn test_invalid_config_is_bad_argument() {
    let (_dir, registry) = load(FIXTURE);
    let config = Config::builder().max_devices(0).build();

    let result = session::run(&config, &registry, &allocator());

    assert!(matches!(result, Err(ScanError::Config(_))));
    assert_eq!(session::exit_status(&result), ExitStatus::Fail);
    assert_eq!(ExitStatus::Fail.code(), 20);
    // Nothing was touched
    assert!(registry.command_log("a2065.device").is_empty());
}

#[test]
fn test_config_validation() {
    assert!(Config::default().validate().is_ok());
    assert!(Config::builder().arena_size(0).build().validate().is_err());
    assert!(Config::builder()
        .arena_size(4096)
        .arena_limit(1024)
        .build()
        .validate()
        .is_err());
    assert!(Config::builder().device("").build().validate().is_err());
}

#[test]
fn test_malformed_fixture() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ \"devices\": [ { \"kind\": \"sana2\" } ] }").unwrap();

    assert!(matches!(SimulatedRegistry::load(&path), Err(ScanError::Fixture(_))));
    assert!(matches!(
        SimulatedRegistry::load(&dir.path().join("missing.json")),
        Err(ScanError::Io(_))
    ));
}
