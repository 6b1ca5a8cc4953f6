//! Device I/O
//!
//! The synchronous "submit and wait" primitive and the handle that owns an
//! opened device.

use crate::error::ErrorCode;
use crate::protocol::CommandId;
use super::arena::Arena;

/// Where a device writes its reply
#[derive(Debug)]
pub enum IoData<'a> {
    /// Caller buffer for fixed-layout replies
    Buffer(&'a mut [u8]),

    /// Scratch arena for variable-size replies
    Arena(&'a mut Arena),
}

/// One request in flight
#[derive(Debug)]
pub struct IoRequest<'a> {
    command: u16,
    data: IoData<'a>,

    /// Bytes written to the buffer, or the data length of an arena reply
    pub actual: u32,

    /// Arena offset at which an arena reply starts
    pub reply_offset: Option<u32>,
}

impl<'a> IoRequest<'a> {
    pub fn new(command: CommandId, data: IoData<'a>) -> Self {
        Self::with_code(command.code(), data)
    }

    /// Build a request for a raw command code
    pub fn with_code(command: u16, data: IoData<'a>) -> Self {
        Self {
            command,
            data,
            actual: 0,
            reply_offset: None,
        }
    }

    pub fn command(&self) -> u16 {
        self.command
    }

    /// Copy a fixed reply into the caller buffer
    ///
    /// Fails with `IOERR_BADLENGTH` when there is no buffer or it is too small.
    pub fn write_reply(&mut self, reply: &[u8]) -> Result<(), ErrorCode> {
        match &mut self.data {
            IoData::Buffer(buf) if buf.len() >= reply.len() => {
                buf[..reply.len()].copy_from_slice(reply);
                self.actual = reply.len() as u32;
                Ok(())
            }
            _ => Err(ErrorCode::IOERR_BADLENGTH),
        }
    }

    /// The arena attached to this request, if any
    pub fn arena(&mut self) -> Option<&mut Arena> {
        match &mut self.data {
            IoData::Arena(arena) => Some(&mut **arena),
            _ => None,
        }
    }
}

/// Static information about an opened device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub version: u16,
    pub revision: u16,
    /// Handles currently open on the device, this one included
    pub open_count: u32,
}

/// An opened device instance
pub trait Device {
    fn info(&self) -> DeviceInfo;

    /// Perform one request, blocking until the device has answered
    fn submit(&mut self, request: &mut IoRequest<'_>) -> Result<(), ErrorCode>;

    /// Give the unit back to the device
    fn close(&mut self);
}

/// Owns one opened device and closes it exactly once
pub struct DeviceHandle<D: Device> {
    device: D,
    name: String,
    unit: u32,
    open: bool,
}

impl<D: Device> DeviceHandle<D> {
    pub fn new(name: impl Into<String>, unit: u32, device: D) -> Self {
        Self {
            device,
            name: name.into(),
            unit,
            open: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn info(&self) -> DeviceInfo {
        self.device.info()
    }

    /// Submit a request and wait for it to complete
    pub fn do_io(&mut self, request: &mut IoRequest<'_>) -> Result<(), ErrorCode> {
        let result = self.device.submit(request);

        match &result {
            Ok(()) => tracing::debug!(
                "{} unit {}: command 0x{:04x} ok (actual {})",
                self.name, self.unit, request.command(), request.actual
            ),
            Err(code) => tracing::debug!(
                "{} unit {}: command 0x{:04x} failed: {}",
                self.name, self.unit, request.command(), code
            ),
        }

        result
    }

    /// Close the device now
    pub fn close(mut self) {
        self.close_inner();
    }

    fn close_inner(&mut self) {
        if self.open {
            self.open = false;
            self.device.close();
            tracing::debug!("Closed {} unit {}", self.name, self.unit);
        }
    }
}

impl<D: Device> Drop for DeviceHandle<D> {
    fn drop(&mut self) {
        self.close_inner();
    }
}
