//! Simulated devices
//!
//! An in-memory registry of devices described by a JSON fixture. Replies
//! are produced with the same codec the scanner decodes with, so the
//! simulation exercises the full request/decode path.
//!
//! ## Fixture Format
//! ```json
//! {
//!   "devices": [
//!     {
//!       "name": "wifipi.device",
//!       "kind": "sana2",
//!       "commands": ["S2_GETNETWORKS", "S2_GETSIGNALQUALITY"],
//!       "signal": { "signal": -52, "noise": -91 },
//!       "networks": [ { "ssid": "Home", "channel": 6, "band": "2.4" } ]
//!     },
//!     { "name": "timer.device", "kind": "timer" }
//!   ]
//! }
//! ```
//!
//! A device without `kind` does not answer the handshake.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Deserialize;

use crate::error::{ErrorCode, Result, ScanError};
use crate::protocol::{
    encode_device_query, encode_nsd_query, encode_offset_table, encode_signal_quality,
    encode_tag_list, s2info, CommandId, DeviceKind, HardwareType, NsdQueryResult,
    Sana2DeviceQuery, SignalQuality, TagItem, TagValue,
};
use super::request::{Device, DeviceHandle, DeviceInfo, IoRequest};
use super::registry::DeviceRegistry;

// =============================================================================
// Fixture Definitions
// =============================================================================

/// Top-level fixture document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub devices: Vec<DeviceSpec>,
}

/// One simulated device
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSpec {
    pub name: String,

    #[serde(default = "default_version")]
    pub version: u16,

    #[serde(default)]
    pub revision: u16,

    /// Kind reported by the handshake; `None` means no handshake support
    #[serde(default)]
    pub kind: Option<DeviceKind>,

    #[serde(default)]
    pub sub_kind: u16,

    /// Advertised commands; `None` means no command array in the handshake
    #[serde(default)]
    pub commands: Option<Vec<CommandSpec>>,

    #[serde(default = "default_units")]
    pub units: Vec<u32>,

    /// Every open attempt fails
    #[serde(default)]
    pub open_fails: bool,

    #[serde(default)]
    pub hardware: Option<HardwareSpec>,

    #[serde(default)]
    pub station_address: Option<Vec<u8>>,

    #[serde(default)]
    pub signal: Option<SignalSpec>,

    #[serde(default)]
    pub current_network: Option<NetworkSpec>,

    #[serde(default)]
    pub crypto_types: Option<Vec<u8>>,

    #[serde(default)]
    pub networks: Option<Vec<NetworkSpec>>,

    /// Commands that fail with a fixed result code
    #[serde(default)]
    pub failures: Vec<FailureSpec>,
}

impl DeviceSpec {
    /// A device that only has a name; it does not answer the handshake
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            revision: 0,
            kind: None,
            sub_kind: 0,
            commands: None,
            units: default_units(),
            open_fails: false,
            hardware: None,
            station_address: None,
            signal: None,
            current_network: None,
            crypto_types: None,
            networks: None,
            failures: Vec::new(),
        }
    }

    /// A SANA-II device advertising `commands`
    pub fn sana2(name: impl Into<String>, commands: &[CommandId]) -> Self {
        Self {
            kind: Some(DeviceKind::Sana2),
            commands: Some(commands.iter().copied().map(CommandSpec::Named).collect()),
            ..Self::new(name)
        }
    }
}

fn default_version() -> u16 {
    1
}

fn default_units() -> Vec<u32> {
    vec![0]
}

/// A command given by name or raw code
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CommandSpec {
    Named(CommandId),
    Code(u16),
}

impl CommandSpec {
    pub fn code(self) -> u16 {
        match self {
            CommandSpec::Named(cmd) => cmd.code(),
            CommandSpec::Code(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HardwareSpec {
    #[serde(default = "default_addr_bits")]
    pub addr_field_size: u16,
    #[serde(default = "default_mtu")]
    pub mtu: u32,
    #[serde(default)]
    pub bps: u32,
    #[serde(default = "default_hardware_type")]
    pub hardware_type: u32,
}

fn default_addr_bits() -> u16 {
    48
}

fn default_mtu() -> u32 {
    1500
}

fn default_hardware_type() -> u32 {
    HardwareType::ETHERNET.0
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SignalSpec {
    pub signal: i32,
    pub noise: i32,
}

/// Frequency band of a simulated network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BandSpec {
    #[serde(rename = "2.4")]
    Ghz2_4,
    #[serde(rename = "5")]
    Ghz5,
}

/// One simulated network; absent fields are left out of its tag list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkSpec {
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub bssid: Option<Vec<u8>>,
    /// Emit the BSSID tag with a null value
    #[serde(default)]
    pub null_bssid: bool,
    #[serde(default)]
    pub channel: Option<i32>,
    #[serde(default)]
    pub signal: Option<i32>,
    #[serde(default)]
    pub noise: Option<i32>,
    #[serde(default)]
    pub band: Option<BandSpec>,
    #[serde(default)]
    pub encryption: Option<u8>,
}

impl NetworkSpec {
    /// Tag items describing this network
    pub fn to_tags(&self) -> Vec<TagItem<'_>> {
        let mut tags = Vec::new();

        if let Some(ssid) = &self.ssid {
            tags.push(TagItem::new(s2info::SSID, TagValue::String(Cow::Borrowed(ssid.as_str()))));
        }
        if self.null_bssid {
            tags.push(TagItem::new(s2info::BSSID, TagValue::Null));
        } else if let Some(bssid) = &self.bssid {
            tags.push(TagItem::new(s2info::BSSID, TagValue::Bytes(bssid.as_slice())));
        }
        if let Some(channel) = self.channel {
            tags.push(TagItem::new(s2info::CHANNEL, TagValue::Integer(channel)));
        }
        if let Some(signal) = self.signal {
            tags.push(TagItem::new(s2info::SIGNAL, TagValue::Integer(signal)));
        }
        if let Some(noise) = self.noise {
            tags.push(TagItem::new(s2info::NOISE, TagValue::Integer(noise)));
        }
        if let Some(band) = self.band {
            tags.push(TagItem::new(s2info::BAND, TagValue::Boolean(band == BandSpec::Ghz2_4)));
        }
        if let Some(encryption) = self.encryption {
            tags.push(TagItem::new(s2info::ENCRYPTION, TagValue::Integer(i32::from(encryption))));
        }

        tags
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FailureSpec {
    pub command: CommandSpec,
    pub code: i32,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Default)]
struct DeviceState {
    open_handles: u32,
    commands: Vec<u16>,
}

#[derive(Debug, Clone)]
struct Entry {
    spec: Arc<DeviceSpec>,
    state: Arc<Mutex<DeviceState>>,
}

/// In-memory device registry
#[derive(Debug, Default)]
pub struct SimulatedRegistry {
    devices: RwLock<Vec<Entry>>,
}

impl SimulatedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        let registry = Self::new();
        for spec in fixture.devices {
            registry.add(spec);
        }
        registry
    }

    /// Load a registry from a JSON fixture file
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_fixture(Fixture::load(path)?))
    }

    /// Register a device at the end of the list
    pub fn add(&self, spec: DeviceSpec) {
        self.devices.write().push(Entry {
            spec: Arc::new(spec),
            state: Arc::new(Mutex::new(DeviceState::default())),
        });
    }

    /// Handles currently open on `name`
    pub fn open_handles(&self, name: &str) -> u32 {
        self.entry(name).map(|e| e.state.lock().open_handles).unwrap_or(0)
    }

    /// Handles currently open across all devices
    pub fn total_open_handles(&self) -> u32 {
        self.devices.read().iter().map(|e| e.state.lock().open_handles).sum()
    }

    /// Commands `name` has received, in order
    pub fn command_log(&self, name: &str) -> Vec<u16> {
        self.entry(name).map(|e| e.state.lock().commands.clone()).unwrap_or_default()
    }

    fn entry(&self, name: &str) -> Option<Entry> {
        self.devices.read().iter().find(|e| e.spec.name == name).cloned()
    }
}

impl DeviceRegistry for SimulatedRegistry {
    type Device = SimulatedDevice;

    fn device_count(&self) -> usize {
        self.devices.read().len()
    }

    fn device_name(&self, index: usize) -> Option<String> {
        self.devices.read().get(index).map(|e| e.spec.name.clone())
    }

    fn open(&self, name: &str, unit: u32) -> Result<DeviceHandle<SimulatedDevice>> {
        let open_failed = || ScanError::OpenFailed {
            name: name.to_string(),
            unit,
        };

        let entry = self.entry(name).ok_or_else(open_failed)?;
        if entry.spec.open_fails || !entry.spec.units.contains(&unit) {
            return Err(open_failed());
        }

        entry.state.lock().open_handles += 1;

        Ok(DeviceHandle::new(
            name,
            unit,
            SimulatedDevice {
                spec: entry.spec,
                state: entry.state,
            },
        ))
    }
}

// =============================================================================
// Device
// =============================================================================

/// One open unit of a simulated device
#[derive(Debug)]
pub struct SimulatedDevice {
    spec: Arc<DeviceSpec>,
    state: Arc<Mutex<DeviceState>>,
}

impl SimulatedDevice {
    fn handshake(&self, request: &mut IoRequest<'_>) -> std::result::Result<(), ErrorCode> {
        let kind = self.spec.kind.ok_or(ErrorCode::IOERR_NOCMD)?;

        let mut reply = NsdQueryResult {
            format: 0,
            size_available: 0,
            device_type: kind.code(),
            device_sub_type: self.spec.sub_kind,
            supported_commands: self
                .spec
                .commands
                .as_ref()
                .map(|cmds| cmds.iter().map(|c| c.code()).collect()),
        };
        reply.size_available = encode_nsd_query(&reply).len() as u32;

        request.write_reply(&encode_nsd_query(&reply))
    }

    fn network_info(&self, request: &mut IoRequest<'_>) -> std::result::Result<(), ErrorCode> {
        let network = self.spec.current_network.as_ref().ok_or(ErrorCode::S2ERR_BAD_STATE)?;
        let encoded = encode_tag_list(&network.to_tags());

        let arena = request.arena().ok_or(ErrorCode::S2ERR_BAD_ARGUMENT)?;
        let offset = arena.push(&encoded).map_err(|_| ErrorCode::S2ERR_NO_RESOURCES)?;

        request.reply_offset = Some(offset);
        request.actual = encoded.len() as u32;
        Ok(())
    }

    fn crypt_types(&self, request: &mut IoRequest<'_>) -> std::result::Result<(), ErrorCode> {
        let types = self.spec.crypto_types.as_ref().ok_or(ErrorCode::IOERR_NOCMD)?;

        let arena = request.arena().ok_or(ErrorCode::S2ERR_BAD_ARGUMENT)?;
        let offset = arena.push(types).map_err(|_| ErrorCode::S2ERR_NO_RESOURCES)?;

        request.reply_offset = Some(offset);
        request.actual = types.len() as u32;
        Ok(())
    }

    fn networks(&self, request: &mut IoRequest<'_>) -> std::result::Result<(), ErrorCode> {
        let networks = self.spec.networks.as_ref().ok_or(ErrorCode::IOERR_NOCMD)?;

        let arena = request.arena().ok_or(ErrorCode::S2ERR_BAD_ARGUMENT)?;
        let mut offsets = Vec::with_capacity(networks.len());
        for network in networks {
            let encoded = encode_tag_list(&network.to_tags());
            offsets.push(arena.push(&encoded).map_err(|_| ErrorCode::S2ERR_NO_RESOURCES)?);
        }
        let table = arena
            .push(&encode_offset_table(&offsets))
            .map_err(|_| ErrorCode::S2ERR_NO_RESOURCES)?;

        request.reply_offset = Some(table);
        request.actual = offsets.len() as u32;
        Ok(())
    }
}

impl Device for SimulatedDevice {
    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            name: self.spec.name.clone(),
            version: self.spec.version,
            revision: self.spec.revision,
            open_count: self.state.lock().open_handles,
        }
    }

    fn submit(&mut self, request: &mut IoRequest<'_>) -> std::result::Result<(), ErrorCode> {
        let code = request.command();
        self.state.lock().commands.push(code);

        if let Some(failure) = self.spec.failures.iter().find(|f| f.command.code() == code) {
            return Err(ErrorCode(failure.code));
        }

        let spec = &self.spec;
        match CommandId::from_code(code) {
            Some(CommandId::NsDeviceQuery) => self.handshake(request),
            Some(CommandId::DeviceQuery) => {
                let hw = spec.hardware.ok_or(ErrorCode::IOERR_NOCMD)?;
                request.write_reply(&encode_device_query(&Sana2DeviceQuery {
                    addr_field_size: hw.addr_field_size,
                    mtu: hw.mtu,
                    bps: hw.bps,
                    hardware_type: HardwareType(hw.hardware_type),
                }))
            }
            Some(CommandId::GetStationAddress) => {
                let addr = spec.station_address.as_ref().ok_or(ErrorCode::IOERR_NOCMD)?;
                request.write_reply(addr)
            }
            Some(CommandId::GetSignalQuality) => {
                let sig = spec.signal.ok_or(ErrorCode::IOERR_NOCMD)?;
                request.write_reply(&encode_signal_quality(&SignalQuality {
                    signal: sig.signal,
                    noise: sig.noise,
                }))
            }
            Some(CommandId::GetNetworkInfo) => self.network_info(request),
            Some(CommandId::GetCryptTypes) => self.crypt_types(request),
            Some(CommandId::GetNetworks) => self.networks(request),
            _ => Err(ErrorCode::IOERR_NOCMD),
        }
    }

    fn close(&mut self) {
        let mut state = self.state.lock();
        state.open_handles = state.open_handles.saturating_sub(1);
    }
}
