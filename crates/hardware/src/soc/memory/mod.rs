//! Simulated Memory Subsystem.
//!
//! This module implements the flat, region-based data and instruction memory. It provides:
//! 1. **Regions:** Disjoint byte buffers (text, data, stack, ...) built from the configuration.
//! 2. **Accessors:** Little-endian word, halfword, and byte reads and writes with
//!    sign or zero extension on narrow loads.
//! 3. **Fault Reporting:** Unmapped accesses and misaligned word accesses return a `MemoryFault`
//!    instead of a silent zero.
//! 4. **Host Utilities:** Program image loading, range dumps, and reset.

/// Region backing store.
pub mod region;

use self::region::MemoryRegion;
use crate::common::MemoryFault;
use crate::config::MemoryConfig;

/// Word width in bytes.
const WORD: u32 = 4;
/// Halfword width in bytes.
const HALF: u32 = 2;
/// Byte width.
const BYTE: u32 = 1;

/// Region-routed simulated memory.
///
/// # Examples
///
/// ```
/// use mips_pipe_core::config::MemoryConfig;
/// use mips_pipe_core::soc::memory::MemorySubsystem;
///
/// let mut mem = MemorySubsystem::new(&MemoryConfig::default());
/// mem.write_word(0x1000_0000, 0x1234_5678).unwrap();
/// assert_eq!(mem.read_byte(0x1000_0000, false).unwrap(), 0x78);
/// assert!(mem.read_word(0x0000_0000).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct MemorySubsystem {
    regions: Vec<MemoryRegion>,
}

impl MemorySubsystem {
    /// Allocates every configured region, zero-filled.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            regions: config.regions.iter().map(MemoryRegion::from_config).collect(),
        }
    }

    /// All mapped regions.
    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    /// Returns the region containing `addr`, if any.
    pub fn region_containing(&self, addr: u32) -> Option<&MemoryRegion> {
        self.regions.iter().find(|r| r.contains(addr))
    }

    /// Zeroes every region.
    pub fn reset(&mut self) {
        for region in &mut self.regions {
            region.clear();
        }
    }

    /// Resolves an access to `(region index, offset)`.
    ///
    /// Only word accesses must be aligned. Narrow accesses may start at any byte but
    /// must still lie entirely inside one region.
    fn locate(&self, addr: u32, width: u32) -> Result<(usize, usize), MemoryFault> {
        if width == WORD && addr % WORD != 0 {
            return Err(MemoryFault::Misaligned { addr, width });
        }
        self.regions
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.offset_of(addr, width).map(|off| (i, off)))
            .ok_or(MemoryFault::Unmapped { addr })
    }

    /// Reads `N` raw little-endian bytes.
    fn read_bytes<const N: usize>(&self, addr: u32) -> Result<[u8; N], MemoryFault> {
        let (idx, off) = self.locate(addr, N as u32)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.regions[idx].slice(off, N));
        Ok(buf)
    }

    /// Writes `N` raw bytes; only the addressed bytes change.
    fn write_bytes<const N: usize>(&mut self, addr: u32, bytes: [u8; N]) -> Result<(), MemoryFault> {
        let (idx, off) = self.locate(addr, N as u32)?;
        self.regions[idx].slice_mut(off, N).copy_from_slice(&bytes);
        Ok(())
    }

    /// Reads an aligned 32-bit word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address; must be a multiple of 4.
    ///
    /// # Returns
    ///
    /// The word, or the fault that prevented the access.
    pub fn read_word(&self, addr: u32) -> Result<u32, MemoryFault> {
        self.read_bytes::<4>(addr).map(u32::from_le_bytes)
    }

    /// Reads a halfword, sign- or zero-extended to 32 bits.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address; no alignment is required.
    /// * `signed` - Sign-extend (`LH`) rather than zero-extend (`LHU`).
    pub fn read_half(&self, addr: u32, signed: bool) -> Result<u32, MemoryFault> {
        let half = u16::from_le_bytes(self.read_bytes::<2>(addr)?);
        Ok(if signed {
            half as i16 as i32 as u32
        } else {
            u32::from(half)
        })
    }

    /// Reads a byte, sign- or zero-extended to 32 bits.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address.
    /// * `signed` - Sign-extend (`LB`) rather than zero-extend (`LBU`).
    pub fn read_byte(&self, addr: u32, signed: bool) -> Result<u32, MemoryFault> {
        let [byte] = self.read_bytes::<1>(addr)?;
        Ok(if signed {
            byte as i8 as i32 as u32
        } else {
            u32::from(byte)
        })
    }

    /// Writes an aligned 32-bit word.
    pub fn write_word(&mut self, addr: u32, value: u32) -> Result<(), MemoryFault> {
        self.write_bytes(addr, value.to_le_bytes())
    }

    /// Writes the low 16 bits of `value`; no alignment is required.
    pub fn write_half(&mut self, addr: u32, value: u32) -> Result<(), MemoryFault> {
        self.write_bytes(addr, (value as u16).to_le_bytes())
    }

    /// Writes the low 8 bits of `value`.
    pub fn write_byte(&mut self, addr: u32, value: u32) -> Result<(), MemoryFault> {
        self.write_bytes(addr, [value as u8])
    }

    /// Width-dispatched read used by the MEM stage.
    ///
    /// # Arguments
    ///
    /// * `addr` - Effective address.
    /// * `width` - Access width in bytes (1, 2, or 4).
    /// * `signed` - Sign-extend narrow loads.
    pub fn load(&self, addr: u32, width: u32, signed: bool) -> Result<u32, MemoryFault> {
        match width {
            BYTE => self.read_byte(addr, signed),
            HALF => self.read_half(addr, signed),
            _ => self.read_word(addr),
        }
    }

    /// Width-dispatched write used by the MEM stage.
    pub fn store(&mut self, addr: u32, width: u32, value: u32) -> Result<(), MemoryFault> {
        match width {
            BYTE => self.write_byte(addr, value),
            HALF => self.write_half(addr, value),
            _ => self.write_word(addr, value),
        }
    }

    /// Writes consecutive words starting at `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - Word-aligned address of the first word.
    /// * `words` - Program image or data to copy.
    pub fn load_words(&mut self, base: u32, words: &[u32]) -> Result<(), MemoryFault> {
        let mut addr = base;
        for &word in words {
            self.write_word(addr, word)?;
            addr = addr.wrapping_add(WORD);
        }
        Ok(())
    }

    /// Reads every word from `start` through `stop` inclusive.
    ///
    /// `start` is rounded down to a word boundary. An empty vector is returned when
    /// `stop < start`.
    ///
    /// # Returns
    ///
    /// `(address, word)` pairs, or the first fault encountered.
    pub fn read_range(&self, start: u32, stop: u32) -> Result<Vec<(u32, u32)>, MemoryFault> {
        let mut words = Vec::new();
        let mut addr = u64::from(start & !(WORD - 1));
        while addr <= u64::from(stop) {
            let a = addr as u32;
            words.push((a, self.read_word(a)?));
            addr += u64::from(WORD);
        }
        Ok(words)
    }
}
