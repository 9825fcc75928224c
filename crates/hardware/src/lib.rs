//! MU-MIPS pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator of a classic five-stage MIPS32
//! pipeline with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), double-buffered
//!    architectural state, and a stall-only hazard unit.
//! 2. **Memory:** Region-based little-endian memory with alignment checking.
//! 3. **ISA:** Decoding, control-signal generation, and disassembly for the MIPS32 integer subset.
//! 4. **Simulation:** Program loader, configuration, statistics, and the `Simulator` facade.

/// Common types and constants (registers, diagnostics, errors).
pub mod common;
/// Simulator configuration (memory map, text base, tracing).
pub mod config;
/// CPU core (pipeline, arch state, execution units).
pub mod core;
/// Instruction set (fields, decode table, disassembly).
pub mod isa;
/// Program loader and simulator facade.
pub mod sim;
/// Memory subsystem.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds state generations, latches, memory, and stats.
pub use crate::core::Cpu;
/// Simulator facade used by the shell and tests.
pub use crate::sim::Simulator;
