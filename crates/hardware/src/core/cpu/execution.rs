//! Cycle Execution and Commit.
//!
//! This module implements the pipeline driver's single-cycle step. It performs the following:
//! 1. **Cycle Setup:** Seeds the next state generation from the current one and clears
//!    the per-cycle stall/redirect signals.
//! 2. **Stage Sequencing:** Runs WB, MEM, EX, ID, IF in that fixed order so every stage
//!    consumes the previous cycle's latches before any stage produces this cycle's.
//! 3. **Commit:** Swaps the state generation and the latch set atomically, counts the
//!    cycle, and detects the end of the program.

use crate::core::Cpu;
use crate::core::cpu::HaltReason;
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};

impl Cpu {
    /// Advances the machine by one clock cycle.
    ///
    /// Does nothing once the run flag is clear: a cycle either runs all five stages
    /// and commits, or does not begin.
    ///
    /// # Returns
    ///
    /// `true` if a cycle was executed.
    pub fn cycle(&mut self) -> bool {
        if !self.run_flag {
            return false;
        }
        let _span = tracing::trace_span!("cycle", n = self.stats.cycles + 1).entered();

        self.begin_cycle();
        wb_stage(self);
        mem_stage(self);
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self);
        self.end_cycle();
        true
    }

    /// Seeds this cycle's outputs.
    fn begin_cycle(&mut self) {
        self.next = self.current;
        self.next_latches = Latches::default();
        self.stall = false;
        self.redirect = None;
        self.fetch_exhausted = false;
    }

    /// Commits this cycle's outputs.
    fn end_cycle(&mut self) {
        self.current = self.next;
        self.latches = self.next_latches;
        self.stats.cycles += 1;

        if self.run_flag && self.fetch_exhausted && self.latches.is_drained() {
            self.halt_with(HaltReason::EndOfProgram);
        }
    }
}
