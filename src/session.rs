//! Session Module
//!
//! One run of the tool: pick a device, open it, confirm its kind, run the
//! scan orchestrator and close everything again.
//!
//! ## Flow
//! ```text
//!   device named? ──no──▶ enumerate ──▶ first device found
//!        │                                    │
//!       yes ◀─────────────────────────────────┘
//!        ▼
//!   open(name, unit) ──▶ capability query ──▶ orchestrator ──▶ close
//! ```

use crate::config::Config;
use crate::device::{
    ArenaAllocator, CapabilityQuery, CapabilitySet, DeviceDescriptor, DeviceEnumerator,
    DeviceRegistry,
};
use crate::error::{Result, ScanError, Severity};
use crate::scan::{DeviceDetails, ScanOrchestrator, ScanOutcome};

/// Everything a finished session found out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Devices found by enumeration; `None` when a device was named
    pub devices: Option<Vec<DeviceDescriptor>>,

    /// Device that was scanned
    pub device: String,
    pub unit: u32,

    pub capabilities: CapabilitySet,
    pub details: Option<DeviceDetails>,
    pub outcome: ScanOutcome,
}

impl SessionReport {
    pub fn severity(&self) -> Severity {
        self.outcome.severity()
    }
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitStatus {
    Ok = 0,
    Warn = 5,
    Error = 10,
    /// Bad arguments
    Fail = 20,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<Severity> for ExitStatus {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ok => ExitStatus::Ok,
            Severity::Warning => ExitStatus::Warn,
            Severity::Error => ExitStatus::Error,
        }
    }
}

/// Exit status for a session result
///
/// Rejected configuration counts as a bad argument.
pub fn exit_status(result: &Result<SessionReport>) -> ExitStatus {
    match result {
        Ok(report) => report.severity().into(),
        Err(ScanError::Config(_)) => ExitStatus::Fail,
        Err(e) => e.severity().into(),
    }
}

/// Run one session against `registry`
///
/// Devices are closed and arenas released on every path out of this
/// function.
pub fn run<R: DeviceRegistry>(
    config: &Config,
    registry: &R,
    allocator: &ArenaAllocator,
) -> Result<SessionReport> {
    config.validate()?;

    let query = CapabilityQuery::sana2();

    let (device, devices) = match &config.device {
        Some(name) => (name.clone(), None),
        None => {
            tracing::info!("Scanning for SANA2 network devices");
            let found = DeviceEnumerator::new(registry, query).enumerate(config.max_devices)?;
            let first = found
                .first()
                .map(|d| d.name.clone())
                .ok_or(ScanError::NoDevicesFound)?;
            (first, Some(found))
        }
    };

    tracing::info!("Opening device: {} unit {}", device, config.unit);
    let mut handle = registry.open(&device, config.unit)?;

    let capabilities = query.query(&mut handle)?;
    tracing::info!(
        "Device confirmed as SANA2 network device ({} commands advertised)",
        capabilities.accepted_commands().count()
    );

    let report = ScanOrchestrator::with_config(&mut handle, &capabilities, allocator, config)
        .run(config.verbose)?;

    handle.close();

    Ok(SessionReport {
        devices,
        device,
        unit: config.unit,
        capabilities,
        details: report.details,
        outcome: report.outcome,
    })
}
