//! Scan Module
//!
//! Sequences the queries issued to one opened, capability-confirmed device.
//!
//! ## Phases
//! 1. Optional details (verbose only), each gated on the capability set:
//!    S2_DEVICEQUERY → S2_GETSTATIONADDRESS → S2_GETSIGNALQUALITY →
//!    S2_GETNETWORKINFO → S2_GETCRYPTTYPES. A failed detail is logged and
//!    skipped.
//! 2. Network scan (S2_GETNETWORKS): unsupported, failed, or succeeded.
//!
//! Every arena-backed request gets a fresh arena that is released when the
//! request has been decoded, whichever way it went.

use crate::config::Config;
use crate::device::{ArenaAllocator, CapabilitySet, Device, DeviceHandle, DeviceInfo, IoData, IoRequest};
use crate::error::{ErrorCode, Result, ScanError, Severity};
use crate::protocol::{
    decode_device_query, decode_scan_table, decode_signal_quality, decode_tag_list, CommandId,
    Encryption, HardwareAddress, NetworkRecord, Sana2DeviceQuery, SignalQuality,
    DEVICE_QUERY_SIZE, SIGNAL_QUALITY_SIZE,
};

/// Largest station address a device may report
pub const MAX_ADDR_BYTES: usize = 16;

/// Everything the optional-detail phase could find out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDetails {
    pub info: DeviceInfo,
    pub hardware: Option<Sana2DeviceQuery>,
    pub station_address: Option<HardwareAddress>,
    pub signal: Option<SignalQuality>,
    pub current_network: Option<NetworkRecord>,
    pub crypto_types: Option<Vec<Encryption>>,
}

/// Networks in the order the device reported them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub networks: Vec<NetworkRecord>,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkRecord> {
        self.networks.iter()
    }
}

/// Terminal state of the scan phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Succeeded(ScanResult),
    /// The device does not advertise S2_GETNETWORKS; nothing was sent
    Unsupported,
    /// The device rejected the scan with this code
    Failed(ErrorCode),
}

impl ScanOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            ScanOutcome::Succeeded(result) if result.is_empty() => Severity::Warning,
            ScanOutcome::Succeeded(_) => Severity::Ok,
            ScanOutcome::Unsupported => Severity::Warning,
            ScanOutcome::Failed(_) => Severity::Error,
        }
    }

    /// The scan result, or the error describing why there is none
    pub fn into_result(self) -> Result<ScanResult> {
        match self {
            ScanOutcome::Succeeded(result) => Ok(result),
            ScanOutcome::Unsupported => Err(ScanError::NotSupportedCommand {
                command: CommandId::GetNetworks.code(),
            }),
            ScanOutcome::Failed(code) => Err(ScanError::Device(code)),
        }
    }
}

/// Details (when requested) plus the scan outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub details: Option<DeviceDetails>,
    pub outcome: ScanOutcome,
}

/// Drives the query sequence for one device
pub struct ScanOrchestrator<'a, D: Device> {
    handle: &'a mut DeviceHandle<D>,
    capabilities: &'a CapabilitySet,
    allocator: &'a ArenaAllocator,
    arena_size: usize,
}

impl<'a, D: Device> ScanOrchestrator<'a, D> {
    pub fn new(
        handle: &'a mut DeviceHandle<D>,
        capabilities: &'a CapabilitySet,
        allocator: &'a ArenaAllocator,
        arena_size: usize,
    ) -> Self {
        Self {
            handle,
            capabilities,
            allocator,
            arena_size,
        }
    }

    /// Build an orchestrator using the session's arena size
    pub fn with_config(
        handle: &'a mut DeviceHandle<D>,
        capabilities: &'a CapabilitySet,
        allocator: &'a ArenaAllocator,
        config: &Config,
    ) -> Self {
        Self::new(handle, capabilities, allocator, config.arena_size)
    }

    /// Run the optional-detail phase if `verbose`, then the scan phase
    pub fn run(&mut self, verbose: bool) -> Result<ScanReport> {
        let details = if verbose { Some(self.details()) } else { None };
        let outcome = self.scan()?;
        Ok(ScanReport { details, outcome })
    }

    // =========================================================================
    // Optional-Detail Phase
    // =========================================================================

    /// Query every advertised detail command, in fixed order
    ///
    /// Never fails: unsupported commands are not sent and failed ones are
    /// logged and left as `None`.
    pub fn details(&mut self) -> DeviceDetails {
        let mut details = DeviceDetails {
            info: self.handle.info(),
            ..DeviceDetails::default()
        };

        details.hardware =
            self.fixed_query(CommandId::DeviceQuery, DEVICE_QUERY_SIZE, decode_device_query);

        details.station_address =
            self.fixed_query(CommandId::GetStationAddress, MAX_ADDR_BYTES, |bytes| {
                if bytes.is_empty() {
                    return Err(ScanError::Protocol("empty station address".to_string()));
                }
                Ok(HardwareAddress(bytes.to_vec()))
            });

        details.signal =
            self.fixed_query(CommandId::GetSignalQuality, SIGNAL_QUALITY_SIZE, decode_signal_quality);

        details.current_network = self
            .optional_arena_query(CommandId::GetNetworkInfo, |arena, offset, _| match offset {
                Some(offset) => Ok(Some(NetworkRecord::from_attributes(&decode_tag_list(arena, offset)?))),
                None => Ok(None),
            })
            .flatten();

        details.crypto_types =
            self.optional_arena_query(CommandId::GetCryptTypes, |arena, offset, len| {
                let Some(offset) = offset else {
                    return Ok(Vec::new());
                };
                let types = arena
                    .get(offset as usize..)
                    .and_then(|tail| tail.get(..len as usize))
                    .ok_or_else(|| ScanError::Protocol(format!("crypto type list of {} bytes out of range", len)))?;
                Ok(types.iter().copied().map(Encryption::from_code).collect())
            });

        details
    }

    /// Issue a fixed-reply detail command if the device advertises it
    fn fixed_query<T>(
        &mut self,
        command: CommandId,
        size: usize,
        decode: impl FnOnce(&[u8]) -> Result<T>,
    ) -> Option<T> {
        if !self.capabilities.supports(command) {
            tracing::debug!("{} not advertised, skipping", command.name());
            return None;
        }

        let mut buf = vec![0u8; size];
        let actual = {
            let mut request = IoRequest::new(command, IoData::Buffer(&mut buf));
            if let Err(code) = self.handle.do_io(&mut request) {
                tracing::warn!("{} failed: {}", command.name(), code);
                return None;
            }
            (request.actual as usize).min(size)
        };

        match decode(&buf[..actual]) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("{} reply unusable: {}", command.name(), e);
                None
            }
        }
    }

    /// Issue an arena-backed detail command if the device advertises it
    fn optional_arena_query<T>(
        &mut self,
        command: CommandId,
        decode: impl FnOnce(&[u8], Option<u32>, u32) -> Result<T>,
    ) -> Option<T> {
        if !self.capabilities.supports(command) {
            tracing::debug!("{} not advertised, skipping", command.name());
            return None;
        }

        match self.arena_query(command, decode) {
            Ok(Ok(value)) => Some(value),
            Ok(Err(code)) => {
                tracing::warn!("{} failed: {}", command.name(), code);
                None
            }
            Err(e) => {
                tracing::warn!("{} skipped: {}", command.name(), e);
                None
            }
        }
    }

    // =========================================================================
    // Scan Phase
    // =========================================================================

    /// Run the network scan
    ///
    /// Device failures are an outcome, not an error. Errors are reserved for
    /// arena allocation failures and undecodable replies.
    pub fn scan(&mut self) -> Result<ScanOutcome> {
        if !self.capabilities.supports(CommandId::GetNetworks) {
            tracing::info!("{} does not advertise S2_GETNETWORKS", self.handle.name());
            return Ok(ScanOutcome::Unsupported);
        }

        let reply = self.arena_query(CommandId::GetNetworks, |arena, offset, count| {
            let lists = match offset {
                Some(offset) => decode_scan_table(arena, offset, count)?,
                None if count == 0 => Vec::new(),
                None => {
                    return Err(ScanError::Protocol(format!(
                        "scan reported {} networks without a table",
                        count
                    )))
                }
            };
            Ok(lists.iter().map(NetworkRecord::from_attributes).collect::<Vec<_>>())
        })?;

        match reply {
            Ok(networks) => {
                tracing::info!("Scan returned {} network(s)", networks.len());
                Ok(ScanOutcome::Succeeded(ScanResult { networks }))
            }
            Err(code) => {
                tracing::warn!("Scan failed: {}", code);
                Ok(ScanOutcome::Failed(code))
            }
        }
    }

    /// Issue `command` backed by a fresh arena and decode the reply
    ///
    /// The outer `Result` carries allocation and decode errors, the inner one
    /// the device's own result code. The arena is released before returning.
    fn arena_query<T>(
        &mut self,
        command: CommandId,
        decode: impl FnOnce(&[u8], Option<u32>, u32) -> Result<T>,
    ) -> Result<std::result::Result<T, ErrorCode>> {
        let mut arena = self.allocator.create(self.arena_size)?;

        let (status, offset, actual) = {
            let mut request = IoRequest::new(command, IoData::Arena(&mut arena));
            let status = self.handle.do_io(&mut request);
            (status, request.reply_offset, request.actual)
        };

        let decoded = match status {
            Ok(()) => Ok(decode(arena.bytes(), offset, actual)?),
            Err(code) => Err(code),
        };

        arena.release();
        Ok(decoded)
    }
}
