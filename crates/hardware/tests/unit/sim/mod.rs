//! Unit tests for the simulator front end.

/// Program file parsing and loading.
pub mod loader;


/// Simulator facade: reset, run control, register access, dumps.
pub mod simulator;
