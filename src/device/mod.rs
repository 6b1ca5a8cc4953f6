//! Device Module
//!
//! Everything between the scanner and a device: the synchronous request
//! primitive, scratch arenas, the capability handshake and enumeration.
//!
//! ## Responsibilities
//! - Own opened devices and close each exactly once
//! - Discover device kind and accepted commands
//! - Walk the registry without holding devices open
//! - Provide a simulated backend driven by JSON fixtures
//!
//! ## Probe Sequence
//! ```text
//!   registry ──name──▶ open(unit 0) ──▶ NSCMD_DEVICEQUERY ──▶ close
//!                                              │
//!                                   kind == SANA2 ? record : skip
//! ```

mod arena;
mod request;
mod capability;
mod registry;
pub mod sim;

pub use arena::{Arena, ArenaAllocator};
pub use request::{Device, DeviceHandle, DeviceInfo, IoData, IoRequest};
pub use capability::{CapabilityQuery, CapabilitySet, QUERY_BUFFER_SIZE};
pub use registry::{DeviceDescriptor, DeviceEnumerator, DeviceRegistry, PROBE_UNIT};
pub use sim::{SimulatedDevice, SimulatedRegistry};
