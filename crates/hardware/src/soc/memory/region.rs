//! Memory region backing store.
//!
//! A region is a contiguous, zero-initialized byte buffer mapped at a fixed base
//! address. Regions know nothing about alignment rules or fault reporting; the
//! `MemorySubsystem` layers those on top.

use crate::config::RegionConfig;

/// One contiguous block of simulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryRegion {
    name: String,
    base: u32,
    bytes: Vec<u8>,
}

impl MemoryRegion {
    /// Allocates a zeroed region.
    ///
    /// # Arguments
    ///
    /// * `name` - Region name used in diagnostics.
    /// * `base` - First byte address.
    /// * `size` - Size in bytes.
    pub fn new(name: &str, base: u32, size: u32) -> Self {
        Self {
            name: name.to_string(),
            base,
            bytes: vec![0; size as usize],
        }
    }

    /// Allocates a zeroed region from its configuration entry.
    pub fn from_config(config: &RegionConfig) -> Self {
        Self::new(&config.name, config.base, config.size)
    }

    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First byte address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Exclusive end address.
    pub fn end(&self) -> u64 {
        u64::from(self.base) + self.size()
    }

    /// Returns `true` if `addr` lies inside the region.
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.base && u64::from(addr) < self.end()
    }

    /// Translates an access of `width` bytes at `addr` into a buffer offset.
    ///
    /// # Returns
    ///
    /// `Some(offset)` if every byte of the access lies inside the region.
    pub fn offset_of(&self, addr: u32, width: u32) -> Option<usize> {
        if !self.contains(addr) {
            return None;
        }
        let offset = (addr - self.base) as usize;
        (offset + width as usize <= self.bytes.len()).then_some(offset)
    }

    /// Borrows `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        &self.bytes[offset..offset + len]
    }

    /// Mutably borrows `len` bytes starting at `offset`.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut self.bytes[offset..offset + len]
    }

    /// Zeroes the whole region.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}
