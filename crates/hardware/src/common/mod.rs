//! Common types and constants shared across the MIPS simulator.
//!
//! This module provides the small building blocks every other component depends on:
//! 1. **Constants:** Architectural register numbers, syscall codes, and encoding widths.
//! 2. **Error Handling:** Host-side errors (`SimError`) and in-pipeline diagnostics
//!    (`Diagnostic`) raised by faulting instructions.

/// Architectural and simulator-wide constants.
pub mod constants;

/// Error types and pipeline diagnostics.
pub mod error;

pub use error::{AccessKind, Diagnostic, DiagnosticKind, MemoryFault, SimError, Stage};
