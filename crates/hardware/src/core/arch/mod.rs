//! Architectural state components.
//!
//! This module holds the programmer-visible state of the MIPS core:
//! 1. **Register File:** 32 general-purpose registers with `$0` hardwired to zero.
//! 2. **State Generation:** PC, registers, HI and LO bundled as one double-buffered unit.

/// General-purpose register file.
pub mod gpr;

/// One generation of architectural state.
pub mod state;

pub use gpr::Gpr;
pub use state::ArchState;
