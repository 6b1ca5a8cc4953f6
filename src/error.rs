//! Error types for listnetworks
//!
//! Provides a unified error type for all operations, plus the device result
//! code carried by failed requests.

use std::fmt;

use thiserror::Error;

/// Result type alias using ScanError
pub type Result<T> = std::result::Result<T, ScanError>;

/// Unified error type for listnetworks operations
#[derive(Debug, Error)]
pub enum ScanError {
    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Resource error: {0}")]
    Resource(String),

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("Cannot open device '{name}' unit {unit}")]
    OpenFailed { name: String, unit: u32 },

    #[error("Device '{name}' is not a SANA2 network device ({reason})")]
    NotSupportedDevice { name: String, reason: String },

    #[error("Command 0x{command:04x} not supported by device")]
    NotSupportedCommand { command: u16 },

    #[error("Device error: {0}")]
    Device(ErrorCode),

    #[error("No SANA2 network devices found")]
    NoDevicesFound,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // I/O and Fixture Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixture error: {0}")]
    Fixture(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// How an outcome should be reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

impl ScanError {
    /// Classify this error for exit-code mapping
    ///
    /// Only "nothing to show" conditions are warnings; everything that
    /// stopped a mandatory step is an error.
    pub fn severity(&self) -> Severity {
        match self {
            ScanError::NoDevicesFound | ScanError::NotSupportedCommand { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

// =============================================================================
// Device Result Codes
// =============================================================================

/// Result code reported by a device for a failed request
///
/// Negative values are exec I/O errors, positive values are SANA-II errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const IOERR_OPENFAIL: ErrorCode = ErrorCode(-1);
    pub const IOERR_ABORTED: ErrorCode = ErrorCode(-2);
    pub const IOERR_NOCMD: ErrorCode = ErrorCode(-3);
    pub const IOERR_BADLENGTH: ErrorCode = ErrorCode(-4);
    pub const IOERR_BADADDRESS: ErrorCode = ErrorCode(-5);
    pub const IOERR_UNITBUSY: ErrorCode = ErrorCode(-6);
    pub const IOERR_SELFTEST: ErrorCode = ErrorCode(-7);

    pub const S2ERR_NO_ERROR: ErrorCode = ErrorCode(0);
    pub const S2ERR_NO_RESOURCES: ErrorCode = ErrorCode(1);
    pub const S2ERR_BAD_ARGUMENT: ErrorCode = ErrorCode(2);
    pub const S2ERR_BAD_STATE: ErrorCode = ErrorCode(3);
    pub const S2ERR_BAD_ADDRESS: ErrorCode = ErrorCode(4);
    pub const S2ERR_MTU_EXCEEDED: ErrorCode = ErrorCode(5);
    pub const S2ERR_NOT_SUPPORTED: ErrorCode = ErrorCode(7);
    pub const S2ERR_SOFTWARE: ErrorCode = ErrorCode(8);
    pub const S2ERR_OUTOFSERVICE: ErrorCode = ErrorCode(9);

    /// Symbolic name of a well-known code
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            -1 => "IOERR_OPENFAIL",
            -2 => "IOERR_ABORTED",
            -3 => "IOERR_NOCMD",
            -4 => "IOERR_BADLENGTH",
            -5 => "IOERR_BADADDRESS",
            -6 => "IOERR_UNITBUSY",
            -7 => "IOERR_SELFTEST",
            0 => "S2ERR_NO_ERROR",
            1 => "S2ERR_NO_RESOURCES",
            2 => "S2ERR_BAD_ARGUMENT",
            3 => "S2ERR_BAD_STATE",
            4 => "S2ERR_BAD_ADDRESS",
            5 => "S2ERR_MTU_EXCEEDED",
            7 => "S2ERR_NOT_SUPPORTED",
            8 => "S2ERR_SOFTWARE",
            9 => "S2ERR_OUTOFSERVICE",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}
