//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** Read-after-write detection for the stall-only interlock.
//! 2. **Latches:** Inter-stage buffers (IF/ID, ID/EX, EX/MEM, MEM/WB).
//! 3. **Signals:** Control signals generated during instruction decoding.
//! 4. **Stages:** Fetch, Decode, Execute, Memory, and Writeback stage functions.
//! 5. **Traits:** The common latch interface.

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latch entries.
pub mod traits;
