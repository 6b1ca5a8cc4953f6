//! Text rendering
//!
//! `Display` adapters turning session results into the tool's output.
//!
//! ## Scan Table
//! ```text
//! ---------+-------------------+------+----------+--------
//!  Signal  | BSSID             | Chan | Band     | SSID
//! ---------+-------------------+------+----------+--------
//!    45 dB | 00:11:22:33:44:55 |    6 | 2.4  GHz | Home
//! ---------+-------------------+------+----------+--------
//! ```
//! The signal column shows the SNR.

use std::fmt;

use crate::device::DeviceDescriptor;
use crate::error::ScanError;
use crate::protocol::{Band, CommandId, NetworkRecord};
use crate::scan::{DeviceDetails, ScanOutcome, ScanResult};
use crate::session::SessionReport;

const SEPARATOR: &str = "---------+-------------------+------+----------+--------";
const NO_BSSID: &str = "--:--:--:--:--:--";

/// Numbered list of enumerated devices
pub struct DeviceList<'a>(pub &'a [DeviceDescriptor]);

impl fmt::Display for DeviceList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} SANA2 device(s):", self.0.len())?;
        writeln!(f)?;
        for (i, device) in self.0.iter().enumerate() {
            writeln!(f, "  {}: {}", i + 1, device.name)?;
        }
        Ok(())
    }
}

/// The verbose device information block
pub struct Details<'a>(pub &'a DeviceDetails);

impl fmt::Display for Details<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;

        writeln!(f)?;
        writeln!(f, "Device info:")?;
        writeln!(f, "  Name     : {}", d.info.name)?;
        writeln!(f, "  Version  : {}.{}", d.info.version, d.info.revision)?;
        writeln!(f, "  Open cnt : {}", d.info.open_count)?;

        if let Some(hw) = &d.hardware {
            writeln!(f, "  Type     : {}", hw.hardware_type.name())?;
            writeln!(f, "  Speed    : {} bps", hw.bps)?;
            writeln!(f, "  MTU      : {} bytes", hw.mtu)?;
            writeln!(f, "  Addr size: {} bits", hw.addr_field_size)?;
        }

        if let Some(addr) = &d.station_address {
            writeln!(f, "  MAC addr : {}", addr)?;
        }

        if let Some(sig) = &d.signal {
            writeln!(f, "  Signal   : {} dBm", sig.signal)?;
            writeln!(f, "  Noise    : {} dBm", sig.noise)?;
            writeln!(f, "  SNR      : {} dB", sig.snr())?;
        }

        if let Some(net) = &d.current_network {
            writeln!(f)?;
            writeln!(f, "Connected network:")?;
            writeln!(f, "  SSID     : {}", net.ssid)?;
            if let Some(bssid) = &net.bssid {
                writeln!(f, "  BSSID    : {}", bssid)?;
            }
            writeln!(f, "  Channel  : {}", net.channel)?;
            writeln!(f, "  Band     : {}", net.band)?;
        }

        if let Some(types) = &d.crypto_types {
            write!(f, "  Crypto   :")?;
            for t in types {
                write!(f, " {}", t.name())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Full scan table with header and separators
pub struct NetworkTable<'a>(pub &'a ScanResult);

impl fmt::Display for NetworkTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{} wireless network(s) found:", self.0.len())?;
        writeln!(f)?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, " Signal  | BSSID             | Chan | Band     | SSID")?;
        writeln!(f, "{}", SEPARATOR)?;
        for network in self.0.iter() {
            writeln!(f, "{}", TableRow(network))?;
        }
        writeln!(f, "{}", SEPARATOR)
    }
}

/// One row of the scan table
pub struct TableRow<'a>(pub &'a NetworkRecord);

impl fmt::Display for TableRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;
        let bssid = n.bssid.map(|b| b.to_string()).unwrap_or_else(|| NO_BSSID.to_string());
        let band = match n.band {
            Band::Ghz2_4 => "2.4  ",
            Band::Ghz5 => "5    ",
        };

        write!(
            f,
            " {:>4} dB | {} | {:>4} | {}GHz | {}",
            n.snr(),
            bssid,
            n.channel,
            band,
            n.ssid
        )
    }
}

/// Compact one-line-per-network listing
pub struct ShortList<'a>(pub &'a ScanResult);

impl fmt::Display for ShortList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for network in self.0.iter() {
            writeln!(f, "{} ({} GHz)", network.ssid, network.band.frequency())?;
        }
        Ok(())
    }
}

/// Everything printed for a finished session
pub struct Report<'a> {
    pub report: &'a SessionReport,
    pub short: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;

        if !self.short {
            writeln!(f, "ListNetworks {} - Wireless network scanner", crate::VERSION)?;

            if let Some(devices) = &r.devices {
                writeln!(f)?;
                writeln!(f, "Scanning for SANA2 network devices...")?;
                writeln!(f)?;
                write!(f, "{}", DeviceList(devices))?;
                writeln!(f)?;
                writeln!(f, "Using first device. Use --device <name> to specify another.")?;
            }

            writeln!(f)?;
            writeln!(f, "Opening device: {} unit {}", r.device, r.unit)?;
            writeln!(f, "Device confirmed as SANA2 network device.")?;
        }

        if let Some(details) = &r.details {
            write!(f, "{}", Details(details))?;
        }

        match &r.outcome {
            ScanOutcome::Unsupported => {
                writeln!(f)?;
                writeln!(f, "This device does not support wireless network scanning.")?;
                writeln!(f, "({} command not available)", CommandId::GetNetworks.name())
            }
            ScanOutcome::Failed(code) => {
                writeln!(f)?;
                writeln!(f, "Error: Failed to scan for networks.")?;
                writeln!(f, "  Error: {}", code)
            }
            ScanOutcome::Succeeded(result) => {
                if !self.short {
                    writeln!(f)?;
                    writeln!(f, "Scanning for wireless networks...")?;
                }
                if result.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "No wireless networks found.")
                } else if self.short {
                    write!(f, "{}", ShortList(result))
                } else {
                    write!(f, "{}", NetworkTable(result))
                }
            }
        }
    }
}

/// Message printed when a session stops with an error
pub struct ErrorMessage<'a>(pub &'a ScanError);

impl fmt::Display for ErrorMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ScanError::NoDevicesFound => writeln!(f, "No SANA2 network devices found."),
            other => writeln!(f, "Error: {}.", other),
        }
    }
}
