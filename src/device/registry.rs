//! Device registry and enumeration
//!
//! The registry is the system-wide list of installed devices. The
//! enumerator walks it, probing each device with the capability handshake.

use crate::error::{Result, ScanError};
use super::capability::CapabilityQuery;
use super::request::{Device, DeviceHandle};

/// Unit opened while probing devices during enumeration
pub const PROBE_UNIT: u32 = 0;

/// System-wide list of installed devices
pub trait DeviceRegistry {
    type Device: Device;

    /// Number of registered devices
    fn device_count(&self) -> usize;

    /// Name of the entry at `index`, read under the registry's read lock
    fn device_name(&self, index: usize) -> Option<String>;

    /// Open `unit` of the device called `name`
    fn open(&self, name: &str, unit: u32) -> Result<DeviceHandle<Self::Device>>;
}

/// A device found during enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: String,
}

/// Finds devices of the expected kind
pub struct DeviceEnumerator<'r, R: DeviceRegistry> {
    registry: &'r R,
    query: CapabilityQuery,
}

impl<'r, R: DeviceRegistry> DeviceEnumerator<'r, R> {
    pub fn new(registry: &'r R, query: CapabilityQuery) -> Self {
        Self { registry, query }
    }

    /// Collect up to `max_count` devices whose handshake reports the expected kind
    ///
    /// Each candidate is opened only for the duration of its probe. Devices
    /// that cannot be opened or queried, or report another kind, are skipped.
    /// Finding none at all is `NoDevicesFound`.
    pub fn enumerate(&self, max_count: usize) -> Result<Vec<DeviceDescriptor>> {
        let mut found = Vec::new();
        let mut index = 0;

        while found.len() < max_count {
            // The lock is held only while the name is copied out
            let Some(name) = self.registry.device_name(index) else {
                break;
            };
            index += 1;

            if self.probe(&name) {
                tracing::debug!("Found {:?} device: {}", self.query.expected(), name);
                found.push(DeviceDescriptor { name });
            }
        }

        if found.is_empty() {
            return Err(ScanError::NoDevicesFound);
        }

        tracing::info!("Enumeration found {} device(s) after probing {}", found.len(), index);
        Ok(found)
    }

    fn probe(&self, name: &str) -> bool {
        let mut handle = match self.registry.open(name, PROBE_UNIT) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", name, e);
                return false;
            }
        };

        let matched = match self.query.query(&mut handle) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", name, e);
                false
            }
        };

        handle.close();
        matched
    }
}
