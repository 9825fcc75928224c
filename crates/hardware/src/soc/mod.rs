//! Memory system of the simulated machine.
//!
//! The MU-MIPS machine has no devices beyond its flat memory map, so this module
//! only hosts the region-routed `MemorySubsystem`.

/// Region-based simulated memory.
pub mod memory;

pub use memory::MemorySubsystem;
