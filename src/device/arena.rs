//! Scratch arenas
//!
//! Bulk memory regions that arena-backed replies are carved from. An arena
//! is released as a unit when dropped; anything decoded from it borrows it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Result, ScanError};

#[derive(Debug, Default)]
struct ArenaStats {
    live: AtomicUsize,
    created: AtomicUsize,
}

/// Creates arenas up to a size limit and tracks how many are alive
#[derive(Debug, Clone)]
pub struct ArenaAllocator {
    limit: usize,
    stats: Arc<ArenaStats>,
}

impl ArenaAllocator {
    /// Create an allocator that refuses arenas larger than `limit` bytes
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            stats: Arc::new(ArenaStats::default()),
        }
    }

    /// Create an arena able to hold `size_hint` bytes
    pub fn create(&self, size_hint: usize) -> Result<Arena> {
        if size_hint == 0 || size_hint > self.limit {
            return Err(ScanError::Resource(format!(
                "Cannot allocate memory pool of {} bytes (limit {})",
                size_hint, self.limit
            )));
        }

        self.stats.live.fetch_add(1, Ordering::Relaxed);
        self.stats.created.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("Arena created ({} bytes)", size_hint);

        Ok(Arena {
            buf: Vec::with_capacity(size_hint),
            capacity: size_hint,
            stats: Arc::clone(&self.stats),
        })
    }

    /// Arenas created and not yet released
    pub fn live(&self) -> usize {
        self.stats.live.load(Ordering::Relaxed)
    }

    /// Arenas created over the allocator's lifetime
    pub fn created(&self) -> usize {
        self.stats.created.load(Ordering::Relaxed)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// A fixed-capacity scratch region addressed by `u32` offsets
#[derive(Debug)]
pub struct Arena {
    buf: Vec<u8>,
    capacity: usize,
    stats: Arc<ArenaStats>,
}

impl Arena {
    /// Append `data` and return the offset it starts at
    pub fn push(&mut self, data: &[u8]) -> Result<u32> {
        if data.len() > self.remaining() {
            return Err(ScanError::Resource(format!(
                "Arena exhausted: {} bytes requested, {} available",
                data.len(),
                self.remaining()
            )));
        }

        let offset = u32::try_from(self.buf.len())
            .map_err(|_| ScanError::Resource("Arena offset overflow".to_string()))?;
        self.buf.extend_from_slice(data);
        Ok(offset)
    }

    /// Everything written so far
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// `len` bytes starting at `offset`
    pub fn slice(&self, offset: u32, len: usize) -> Result<&[u8]> {
        let start = offset as usize;
        start
            .checked_add(len)
            .and_then(|end| self.buf.get(start..end))
            .ok_or_else(|| {
                ScanError::Protocol(format!(
                    "Range {}+{} outside arena of {} bytes",
                    offset,
                    len,
                    self.buf.len()
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Release the arena now rather than at end of scope
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.stats.live.fetch_sub(1, Ordering::Relaxed);
        tracing::trace!("Arena released ({} of {} bytes used)", self.buf.len(), self.capacity);
    }
}
