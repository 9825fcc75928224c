//! Execution units.
//!
//! This module contains the combinational units used by the Execute stage:
//! 1. **ALU:** Arithmetic, logic, shift, and multiply/divide operations.
//! 2. **BRU:** Branch condition evaluation and target computation.

/// Arithmetic Logic Unit.
pub mod alu;

/// Branch Resolution Unit.
pub mod bru;
