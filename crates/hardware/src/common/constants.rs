//! Architectural constants.
//!
//! Register numbers with fixed roles in the MIPS calling convention, the
//! syscall service codes understood by the simulator, and encoding widths
//! used by the fetch and branch logic.

/// Number of general-purpose registers.
pub const REG_COUNT: usize = 32;

/// Register `$zero`, hardwired to 0.
pub const REG_ZERO: usize = 0;

/// Register `$v0`, holds the syscall service code.
pub const REG_V0: usize = 2;

/// Register `$ra`, the link register written by `JAL`.
pub const REG_RA: usize = 31;

/// Syscall service code that terminates the simulated program.
pub const SYSCALL_EXIT: i32 = 10;

/// Size of one encoded instruction in bytes.
pub const INSTRUCTION_BYTES: u32 = 4;

/// Distance from a linking instruction to its return address (`PC + 8`).
pub const LINK_OFFSET: u32 = 8;

/// Upper PC bits preserved by `J`/`JAL` (the current 256 MiB segment).
pub const JUMP_SEGMENT_MASK: u32 = 0xF000_0000;

/// Number of diagnostics a CPU retains; older entries are dropped first.
pub const DIAGNOSTIC_HISTORY: usize = 64;
