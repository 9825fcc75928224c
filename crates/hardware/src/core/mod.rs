//! Core processor implementation.
//!
//! This module contains the CPU context, the five-stage pipeline, the execution
//! units, and the architectural register state.

/// Architectural state (register file, PC, HI/LO).
pub mod arch;

/// CPU context and per-cycle orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch unit).
pub mod units;

pub use self::cpu::Cpu;
