//! Simulation front end.
//!
//! Provides the program loader and the `Simulator` facade that owns the CPU,
//! the loaded program image, and the operations exposed to the shell.

/// Program file reading and parsing.
pub mod loader;

/// Simulator facade: reset, run control, state access, and dumps.
pub mod simulator;

pub use simulator::Simulator;
