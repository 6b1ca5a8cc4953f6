//! # listnetworks
//!
//! A wireless network scanner for SANA-II network devices:
//! - Device discovery through the generic capability handshake
//! - Capability-gated detail queries (signal quality, crypto types, ...)
//! - Tag-list decoding of per-network scan records
//! - Table and compact rendering of scan results
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                              │
//! │          (select device, open, confirm, close)              │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐               ┌───────────────────┐
//!   │   Enumerator    │               │ Scan Orchestrator │
//!   │ (probe devices) │               │ (gated queries)   │
//!   └────────┬────────┘               └─────────┬─────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐               ┌───────────────────┐
//!   │ Capability Query│◀──────────────│  Attribute Codec  │
//!   │  (handshake)    │  CapabilitySet│  (tag lists)      │
//!   └────────┬────────┘               └─────────┬─────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │      Device I/O (submit and wait) + Arenas          │
//!   └─────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod device;
pub mod scan;
pub mod session;
pub mod render;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorCode, Result, ScanError, Severity};
pub use config::Config;
pub use device::{ArenaAllocator, CapabilityQuery, CapabilitySet, DeviceEnumerator, DeviceRegistry};
pub use scan::{ScanOrchestrator, ScanOutcome, ScanResult};
pub use session::{ExitStatus, SessionReport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of listnetworks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
