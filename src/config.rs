//! Configuration for listnetworks
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, ScanError};

/// Hard cap on devices collected during enumeration
pub const DEFAULT_MAX_DEVICES: usize = 16;

/// Scratch arena size for arena-backed replies (32 KiB)
pub const DEFAULT_ARENA_SIZE: usize = 32 * 1024;

/// Largest arena the allocator will hand out (1 MiB)
pub const DEFAULT_ARENA_LIMIT: usize = 1024 * 1024;

/// Main configuration for one scan session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Selection
    // -------------------------------------------------------------------------
    /// Device to open; `None` enumerates and uses the first SANA2 device found
    pub device: Option<String>,

    /// Unit number to open
    pub unit: u32,

    // -------------------------------------------------------------------------
    // Output Configuration
    // -------------------------------------------------------------------------
    /// Run the optional-detail phase
    pub verbose: bool,

    /// Compact output: one network per line, no banners
    pub short: bool,

    // -------------------------------------------------------------------------
    // Resource Limits
    // -------------------------------------------------------------------------
    /// Max devices collected during enumeration
    pub max_devices: usize,

    /// Size hint for each phase's scratch arena (in bytes)
    pub arena_size: usize,

    /// Largest arena the allocator may create (in bytes)
    pub arena_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: None,
            unit: 0,
            verbose: false,
            short: false,
            max_devices: DEFAULT_MAX_DEVICES,
            arena_size: DEFAULT_ARENA_SIZE,
            arena_limit: DEFAULT_ARENA_LIMIT,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check limits before a session starts
    pub fn validate(&self) -> Result<()> {
        if self.max_devices == 0 {
            return Err(ScanError::Config("max_devices must be at least 1".to_string()));
        }
        if self.arena_size == 0 || self.arena_size > self.arena_limit {
            return Err(ScanError::Config(format!(
                "arena_size must be between 1 and {} bytes, got {}",
                self.arena_limit, self.arena_size
            )));
        }
        if matches!(self.device.as_deref(), Some("")) {
            return Err(ScanError::Config("device name is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device to open
    pub fn device(mut self, name: impl Into<String>) -> Self {
        self.config.device = Some(name.into());
        self
    }

    /// Set the unit number
    pub fn unit(mut self, unit: u32) -> Self {
        self.config.unit = unit;
        self
    }

    /// Enable the optional-detail phase
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Enable compact output
    pub fn short(mut self, short: bool) -> Self {
        self.config.short = short;
        self
    }

    /// Set the enumeration cap
    pub fn max_devices(mut self, count: usize) -> Self {
        self.config.max_devices = count;
        self
    }

    /// Set the scratch arena size (in bytes)
    pub fn arena_size(mut self, size: usize) -> Self {
        self.config.arena_size = size;
        self
    }

    /// Set the largest arena the allocator may create (in bytes)
    pub fn arena_limit(mut self, size: usize) -> Self {
        self.config.arena_limit = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
