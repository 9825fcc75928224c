//! # Unit Components
//!
//! Tests organized by library module: configuration, the processor core, the ISA
//! tables, the memory subsystem, the simulator facade, and statistics.



/// Field extraction, decode table, and disassembler.
pub mod isa;

/// Program loader and whole-program pipeline behavior.
pub mod sim;


/// Statistics counters and report formatting.
pub mod stats;
