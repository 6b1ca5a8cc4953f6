//! Capability handshake
//!
//! Asks a device to describe itself and records which commands it accepts.

use std::collections::BTreeSet;

use crate::error::{Result, ScanError};
use crate::protocol::{decode_nsd_query, CommandId, DeviceKind};
use super::request::{Device, DeviceHandle, IoData, IoRequest};

/// Reply buffer for the handshake: header plus up to 122 command codes
pub const QUERY_BUFFER_SIZE: usize = 256;

/// What a device reported about itself
///
/// Immutable once built. A device that supplied no command array supports
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    device_kind: DeviceKind,
    device_sub_kind: u16,
    accepted_commands: Option<BTreeSet<u16>>,
}

impl CapabilitySet {
    pub fn new<I>(device_kind: DeviceKind, device_sub_kind: u16, accepted_commands: Option<I>) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        Self {
            device_kind,
            device_sub_kind,
            accepted_commands: accepted_commands.map(|cmds| cmds.into_iter().collect()),
        }
    }

    /// Whether the device advertised `command`
    pub fn supports(&self, command: CommandId) -> bool {
        self.supports_code(command.code())
    }

    pub fn supports_code(&self, code: u16) -> bool {
        self.accepted_commands
            .as_ref()
            .is_some_and(|cmds| cmds.contains(&code))
    }

    pub fn device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    pub fn device_sub_kind(&self) -> u16 {
        self.device_sub_kind
    }

    /// Advertised command codes in ascending order (empty if none supplied)
    pub fn accepted_commands(&self) -> impl Iterator<Item = u16> + '_ {
        self.accepted_commands.iter().flatten().copied()
    }
}

/// Runs the handshake and checks the device kind
#[derive(Debug, Clone, Copy)]
pub struct CapabilityQuery {
    expected: DeviceKind,
}

impl CapabilityQuery {
    pub fn new(expected: DeviceKind) -> Self {
        Self { expected }
    }

    /// Query expecting a SANA-II network device
    pub fn sana2() -> Self {
        Self::new(DeviceKind::Sana2)
    }

    pub fn expected(&self) -> DeviceKind {
        self.expected
    }

    /// Issue exactly one handshake request
    ///
    /// Fails with `NotSupportedDevice` when the request fails, the reply is
    /// malformed, or the device is of another kind.
    pub fn query<D: Device>(&self, handle: &mut DeviceHandle<D>) -> Result<CapabilitySet> {
        let name = handle.name().to_string();
        let not_supported = |reason: String| ScanError::NotSupportedDevice {
            name: name.clone(),
            reason,
        };

        let mut buf = [0u8; QUERY_BUFFER_SIZE];
        let actual = {
            let mut request = IoRequest::new(CommandId::NsDeviceQuery, IoData::Buffer(&mut buf));
            if let Err(code) = handle.do_io(&mut request) {
                return Err(not_supported(format!("device query failed: {}", code)));
            }
            (request.actual as usize).min(QUERY_BUFFER_SIZE)
        };

        let reply = decode_nsd_query(&buf[..actual]).map_err(|e| not_supported(e.to_string()))?;

        let kind = DeviceKind::from_code(reply.device_type);
        if kind != self.expected {
            return Err(not_supported(format!("reports device type {}", reply.device_type)));
        }

        Ok(CapabilitySet::new(kind, reply.device_sub_type, reply.supported_commands))
    }
}
