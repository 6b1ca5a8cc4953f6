//! Reply definitions
//!
//! Fixed-layout replies written into caller buffers.

use std::fmt;

/// Result of the capability handshake (`NSCMD_DEVICEQUERY`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsdQueryResult {
    /// Query format, always 0
    pub format: u32,

    /// Bytes of the reply the device filled in
    pub size_available: u32,

    pub device_type: u16,
    pub device_sub_type: u16,

    /// Accepted commands; `None` when the device supplied no array
    pub supported_commands: Option<Vec<u16>>,
}

/// Static device information (`S2_DEVICEQUERY`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sana2DeviceQuery {
    /// Hardware address size in bits
    pub addr_field_size: u16,
    pub mtu: u32,
    /// Link speed in bits per second
    pub bps: u32,
    pub hardware_type: HardwareType,
}

/// Link-level hardware type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareType(pub u32);

impl HardwareType {
    pub const ETHERNET: HardwareType = HardwareType(1);
    pub const IEEE802: HardwareType = HardwareType(6);
    pub const ARCNET: HardwareType = HardwareType(7);
    pub const LOCALTALK: HardwareType = HardwareType(11);
    pub const DYLAN: HardwareType = HardwareType(12);
    pub const AMOKNET: HardwareType = HardwareType(200);
    pub const LIANA: HardwareType = HardwareType(202);
    pub const PPP: HardwareType = HardwareType(253);
    pub const SLIP: HardwareType = HardwareType(254);
    pub const CSLIP: HardwareType = HardwareType(255);
    pub const PLIP: HardwareType = HardwareType(420);

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Ethernet",
            6 => "IEEE802",
            7 => "Arcnet",
            11 => "LocalTalk",
            12 => "DyLAN",
            200 => "AmokNet",
            202 => "Liana",
            253 => "PPP",
            254 => "SLIP",
            255 => "CSLIP",
            420 => "PLIP",
            _ => "Unknown",
        }
    }
}

/// Signal and noise levels of the current link (`S2_GETSIGNALQUALITY`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalQuality {
    /// dBm
    pub signal: i32,
    /// dBm
    pub noise: i32,
}

impl SignalQuality {
    pub fn snr(&self) -> i32 {
        self.signal - self.noise
    }
}

/// Station address of the interface (`S2_GETSTATIONADDRESS`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareAddress(pub Vec<u8>);

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
