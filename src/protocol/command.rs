//! Command definitions
//!
//! Command identifiers understood by SANA-II devices and the device kinds
//! reported by the capability handshake.

use serde::Deserialize;

/// Command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[repr(u16)]
pub enum CommandId {
    /// Generic capability handshake every new-style device answers
    #[serde(rename = "NSCMD_DEVICEQUERY")]
    NsDeviceQuery = 0x4000,

    #[serde(rename = "S2_DEVICEQUERY")]
    DeviceQuery = 0x0009,

    #[serde(rename = "S2_GETSTATIONADDRESS")]
    GetStationAddress = 0x000A,

    #[serde(rename = "S2_GETSIGNALQUALITY")]
    GetSignalQuality = 0xC010,

    #[serde(rename = "S2_GETNETWORKS")]
    GetNetworks = 0xC011,

    #[serde(rename = "S2_SETOPTIONS")]
    SetOptions = 0xC012,

    #[serde(rename = "S2_SETKEY")]
    SetKey = 0xC013,

    #[serde(rename = "S2_GETNETWORKINFO")]
    GetNetworkInfo = 0xC014,

    #[serde(rename = "S2_READMGMT")]
    ReadMgmt = 0xC015,

    #[serde(rename = "S2_WRITEMGMT")]
    WriteMgmt = 0xC016,

    #[serde(rename = "S2_GETCRYPTTYPES")]
    GetCryptTypes = 0xC017,
}

impl CommandId {
    const ALL: [CommandId; 11] = [
        CommandId::NsDeviceQuery,
        CommandId::DeviceQuery,
        CommandId::GetStationAddress,
        CommandId::GetSignalQuality,
        CommandId::GetNetworks,
        CommandId::SetOptions,
        CommandId::SetKey,
        CommandId::GetNetworkInfo,
        CommandId::ReadMgmt,
        CommandId::WriteMgmt,
        CommandId::GetCryptTypes,
    ];

    /// Wire value of this command
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a known command by wire value
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|cmd| cmd.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandId::NsDeviceQuery => "NSCMD_DEVICEQUERY",
            CommandId::DeviceQuery => "S2_DEVICEQUERY",
            CommandId::GetStationAddress => "S2_GETSTATIONADDRESS",
            CommandId::GetSignalQuality => "S2_GETSIGNALQUALITY",
            CommandId::GetNetworks => "S2_GETNETWORKS",
            CommandId::SetOptions => "S2_SETOPTIONS",
            CommandId::SetKey => "S2_SETKEY",
            CommandId::GetNetworkInfo => "S2_GETNETWORKINFO",
            CommandId::ReadMgmt => "S2_READMGMT",
            CommandId::WriteMgmt => "S2_WRITEMGMT",
            CommandId::GetCryptTypes => "S2_GETCRYPTTYPES",
        }
    }
}

/// Coarse device classification reported by the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Unknown,
    Gameport,
    Timer,
    Keyboard,
    Input,
    Trackdisk,
    Console,
    /// SANA-II network device
    Sana2,
    Audio,
    Clipboard,
    Printer,
    Serial,
    Parallel,
    /// Any type number outside the well-known range
    Other(u16),
}

impl DeviceKind {
    /// Wire value of this kind
    pub fn code(self) -> u16 {
        match self {
            DeviceKind::Unknown => 0,
            DeviceKind::Gameport => 1,
            DeviceKind::Timer => 2,
            DeviceKind::Keyboard => 3,
            DeviceKind::Input => 4,
            DeviceKind::Trackdisk => 5,
            DeviceKind::Console => 6,
            DeviceKind::Sana2 => 7,
            DeviceKind::Audio => 8,
            DeviceKind::Clipboard => 9,
            DeviceKind::Printer => 10,
            DeviceKind::Serial => 11,
            DeviceKind::Parallel => 12,
            DeviceKind::Other(code) => code,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            0 => DeviceKind::Unknown,
            1 => DeviceKind::Gameport,
            2 => DeviceKind::Timer,
            3 => DeviceKind::Keyboard,
            4 => DeviceKind::Input,
            5 => DeviceKind::Trackdisk,
            6 => DeviceKind::Console,
            7 => DeviceKind::Sana2,
            8 => DeviceKind::Audio,
            9 => DeviceKind::Clipboard,
            10 => DeviceKind::Printer,
            11 => DeviceKind::Serial,
            12 => DeviceKind::Parallel,
            other => DeviceKind::Other(other),
        }
    }
}
