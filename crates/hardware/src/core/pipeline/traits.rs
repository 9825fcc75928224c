//! Pipeline Latch Interface.
//!
//! This module defines the common behavior of the four latch entry types. It provides:
//! 1. **Status Checks:** Bubble detection and access to a carried fault.
//! 2. **Flushing:** Turning an entry into a bubble (squash).
//! 3. **Hazard Queries:** Which architectural registers an in-flight entry will write.

use crate::common::error::Diagnostic;

/// Registers an in-flight instruction has yet to write back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingWrite {
    /// General-purpose destination, if any.
    pub gpr: Option<usize>,
    /// HI will be written.
    pub hi: bool,
    /// LO will be written.
    pub lo: bool,
}

impl PendingWrite {
    /// No pending write.
    pub const NONE: Self = Self {
        gpr: None,
        hi: false,
        lo: false,
    };
}

/// Represents a pipeline latch entry (inter-stage buffer).
pub trait PipelineLatch {
    /// Converts the entry into a bubble.
    ///
    /// Used when a taken branch squashes the instructions fetched in its shadow.
    fn flush(&mut self);

    /// Returns `true` if the entry holds no instruction.
    fn is_bubble(&self) -> bool;

    /// Returns the fatal diagnostic carried by the entry, if any.
    fn fault(&self) -> Option<&Diagnostic>;

    /// Returns the registers the entry's instruction will write when it retires.
    ///
    /// Bubbles report `PendingWrite::NONE`.
    fn pending_write(&self) -> PendingWrite;
}
