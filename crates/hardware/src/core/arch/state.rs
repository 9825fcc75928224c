//! Architectural state generation.
//!
//! One `ArchState` is a complete programmer-visible machine state: PC, the
//! register file, HI and LO. The CPU keeps two of them, the *current* generation
//! read by every stage and the *next* generation written by writeback and the PC
//! update, and replaces the former with the latter at the end of each cycle.

use crate::core::arch::gpr::Gpr;

/// Programmer-visible machine state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchState {
    /// Address of the next instruction to fetch.
    pub pc: u32,
    /// General-purpose registers.
    pub regs: Gpr,
    /// High half of a multiply result, or the remainder of a divide.
    pub hi: i32,
    /// Low half of a multiply result, or the quotient of a divide.
    pub lo: i32,
}

impl ArchState {
    /// Creates a cleared state starting execution at `pc`.
    pub const fn with_pc(pc: u32) -> Self {
        Self {
            pc,
            regs: Gpr::new(),
            hi: 0,
            lo: 0,
        }
    }
}
