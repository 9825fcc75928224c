//! MIPS General-Purpose Register File.
//!
//! This module implements the 32-entry integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 signed 32-bit registers (`$0`-`$31`).
//! 2. **Invariant Enforcement:** Ensures that register `$0` always reads as zero.
//! 3. **Debugging:** Provides the register snapshot used by `rdump`.

use crate::common::constants::{REG_COUNT, REG_ZERO};

/// General-Purpose Register file.
///
/// Register `$0` is hardwired to zero: writes to it are discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; REG_COUNT],
}

impl Gpr {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The register value. Register `$0` always returns 0.
    pub const fn read(&self, idx: usize) -> i32 {
        if idx == REG_ZERO { 0 } else { self.regs[idx] }
    }

    /// Writes a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The value to write. Ignored for `$0`.
    pub const fn write(&mut self, idx: usize, val: i32) {
        if idx != REG_ZERO {
            self.regs[idx] = val;
        }
    }

    /// Snapshot of all 32 registers, `$0` included.
    pub const fn snapshot(&self) -> [i32; REG_COUNT] {
        let mut out = self.regs;
        out[REG_ZERO] = 0;
        out
    }
}
