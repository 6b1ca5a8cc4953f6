//! Network record definitions
//!
//! Typed view of one wireless network decoded from a tag list.

use std::fmt;

use super::tags::{s2info, AttributeList};

/// SSID reported for networks that do not broadcast one
pub const HIDDEN_SSID: &str = "<hidden>";

/// Signal/noise level assumed when the device does not report one
pub const DEFAULT_LEVEL_DBM: i32 = -90;

/// Frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Ghz2_4,
    Ghz5,
}

impl Band {
    /// The band tag is boolean-valued: set means 2.4 GHz
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Band::Ghz2_4
        } else {
            Band::Ghz5
        }
    }

    /// Frequency without unit ("2.4" / "5")
    pub fn frequency(self) -> &'static str {
        match self {
            Band::Ghz2_4 => "2.4",
            Band::Ghz5 => "5",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}GHz", self.frequency())
    }
}

/// Cipher type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encryption {
    None,
    Wep,
    Tkip,
    Ccmp,
    Unknown(u8),
}

impl Encryption {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Encryption::None,
            1 => Encryption::Wep,
            2 => Encryption::Tkip,
            3 => Encryption::Ccmp,
            other => Encryption::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Encryption::None => 0,
            Encryption::Wep => 1,
            Encryption::Tkip => 2,
            Encryption::Ccmp => 3,
            Encryption::Unknown(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encryption::None => "NONE",
            Encryption::Wep => "WEP",
            Encryption::Tkip => "TKIP",
            Encryption::Ccmp => "CCMP",
            Encryption::Unknown(_) => "?",
        }
    }
}

/// Six-byte physical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// First six bytes of `bytes`; shorter inputs are not an address
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let octets: [u8; 6] = bytes.get(..6)?.try_into().ok()?;
        Some(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

/// One observable wireless network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRecord {
    pub ssid: String,
    /// `None` both when the tag is missing and when it carries a null value
    pub bssid: Option<MacAddress>,
    pub channel: u32,
    /// dBm
    pub signal: i32,
    /// dBm
    pub noise: i32,
    pub band: Band,
    pub encryption: Option<Encryption>,
}

impl NetworkRecord {
    /// Decode a record, applying the documented default for every missing field
    pub fn from_attributes(list: &AttributeList<'_>) -> Self {
        Self {
            ssid: list.get_str(s2info::SSID).unwrap_or(HIDDEN_SSID).to_string(),
            bssid: list.get_bytes(s2info::BSSID).and_then(MacAddress::from_slice),
            channel: list
                .get_int(s2info::CHANNEL)
                .and_then(|c| u32::try_from(c).ok())
                .unwrap_or(0),
            signal: list.get_int(s2info::SIGNAL).unwrap_or(DEFAULT_LEVEL_DBM),
            noise: list.get_int(s2info::NOISE).unwrap_or(DEFAULT_LEVEL_DBM),
            band: Band::from_flag(list.get_bool(s2info::BAND).unwrap_or(false)),
            encryption: list
                .get_int(s2info::ENCRYPTION)
                .and_then(|e| u8::try_from(e).ok())
                .map(Encryption::from_code),
        }
    }

    /// Signal-to-noise ratio in dB
    pub fn snr(&self) -> i32 {
        self.signal - self.noise
    }

    pub fn is_hidden(&self) -> bool {
        self.ssid == HIDDEN_SSID
    }
}
