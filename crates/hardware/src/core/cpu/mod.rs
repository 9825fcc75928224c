//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire simulated machine. It coordinates the following:
//! 1. **State Management:** Holds the *current* and *next* architectural state generations.
//! 2. **Pipeline Control:** Holds the start-of-cycle latches, the latches being produced,
//!    and the per-cycle stall and redirect signals.
//! 3. **Memory:** Owns the region-based memory subsystem.
//! 4. **Run Control:** Tracks the run flag, the halt reason, and every diagnostic raised.

/// Per-cycle orchestration of the five stages.
pub mod execution;

use std::fmt;

use crate::common::constants::DIAGNOSTIC_HISTORY;
use crate::common::error::Diagnostic;
use crate::config::Config;
use crate::core::arch::ArchState;
use crate::core::pipeline::latches::Latches;
use crate::soc::MemorySubsystem;
use crate::stats::SimStats;

/// Why the simulator stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// The program retired `SYSCALL` with `$v0 == 10`.
    Exit,
    /// Fetch ran past the end of the loaded image and the pipeline drained.
    EndOfProgram,
    /// A fatal diagnostic was raised in writeback.
    Fault(Diagnostic),
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("exit syscall"),
            Self::EndOfProgram => f.write_str("end of program"),
            Self::Fault(diag) => write!(f, "fault {diag}"),
        }
    }
}

/// Main CPU structure containing all simulated machine state.
///
/// Stage functions receive `&mut Cpu`. They read `current` and `latches` (the values as
/// of the start of the cycle) and write only `next`, `next_latches`, memory (MEM), and
/// the per-cycle signals, so no stage observes another stage's same-cycle output.
/// The one exception is the squash: a taken branch in execute flushes `latches.if_id`
/// before decode reads it.
#[derive(Debug)]
pub struct Cpu {
    /// Committed architectural state, read by every stage this cycle.
    pub current: ArchState,
    /// In-progress architectural state, written by writeback and the PC update.
    pub next: ArchState,
    /// Data and instruction memory.
    pub memory: MemorySubsystem,

    /// Latches as of the start of the cycle.
    pub latches: Latches,
    /// Latches produced this cycle, visible next cycle.
    pub next_latches: Latches,

    /// Decode detected a RAW hazard this cycle; fetch must hold.
    pub stall: bool,
    /// Execute resolved a taken branch or jump this cycle.
    pub redirect: Option<u32>,
    /// Fetch found the PC past the end of the loaded image this cycle.
    pub fetch_exhausted: bool,

    /// `true` while simulation may proceed.
    pub run_flag: bool,
    /// Why the run flag was cleared.
    pub halt: Option<HaltReason>,
    /// The most recent diagnostics raised since the last reset, fatal or not, oldest
    /// first. At most `DIAGNOSTIC_HISTORY` are kept; `stats` keeps the full counts.
    pub diagnostics: Vec<Diagnostic>,
    /// Performance statistics, including the cycle and instruction counters.
    pub stats: SimStats,
    /// Emit per-stage trace events.
    pub trace: bool,

    /// Address of the first loaded instruction.
    pub text_base: u32,
    /// One past the last loaded instruction.
    pub program_end: u32,
    /// Exclusive end of the region holding `text_base`.
    text_end: u64,
}

impl Cpu {
    /// Creates a CPU with zeroed memory and state, PC at the text base.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration (memory map, text base, tracing).
    pub fn new(config: &Config) -> Self {
        let memory = MemorySubsystem::new(&config.memory);
        let text_base = config.general.text_base;
        let text_end = memory
            .region_containing(text_base)
            .map_or(u64::from(text_base), |r| r.end());
        let state = ArchState::with_pc(text_base);

        Self {
            current: state,
            next: state,
            memory,
            latches: Latches::default(),
            next_latches: Latches::default(),
            stall: false,
            redirect: None,
            fetch_exhausted: false,
            run_flag: true,
            halt: None,
            diagnostics: Vec::new(),
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            text_base,
            program_end: text_base,
            text_end,
        }
    }

    /// Returns the machine to its power-on condition.
    ///
    /// Zeroes registers, HI/LO, memory, latches, and counters, points the PC at the
    /// text base, and sets the run flag. The caller reloads the program image.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.current = ArchState::with_pc(self.text_base);
        self.next = self.current;
        self.latches = Latches::default();
        self.next_latches = Latches::default();
        self.stall = false;
        self.redirect = None;
        self.fetch_exhausted = false;
        self.run_flag = true;
        self.halt = None;
        self.diagnostics.clear();
        self.stats = SimStats::default();
    }

    /// Capacity of the text region from the text base, in words.
    pub fn text_capacity_words(&self) -> usize {
        ((self.text_end - u64::from(self.text_base)) / 4) as usize
    }

    /// Returns `true` if `pc` lies in the text region past the loaded image.
    pub fn is_past_program(&self, pc: u32) -> bool {
        pc >= self.program_end && u64::from(pc) < self.text_end
    }

    /// Clears the run flag and records why.
    ///
    /// A fault is also appended to `diagnostics`.
    pub fn halt_with(&mut self, reason: HaltReason) {
        match reason {
            HaltReason::Fault(diag) => {
                tracing::error!(%diag, "simulation halted");
                self.record(diag);
            }
            _ => tracing::info!(%reason, cycle = self.stats.cycles + 1, "simulation halted"),
        }
        self.run_flag = false;
        self.halt = Some(reason);
    }

    /// Records a non-fatal diagnostic.
    pub fn warn(&mut self, diag: Diagnostic) {
        tracing::warn!(%diag, "pipeline warning");
        self.record(diag);
    }

    fn record(&mut self, diag: Diagnostic) {
        if self.diagnostics.len() >= DIAGNOSTIC_HISTORY {
            let _ = self.diagnostics.remove(0);
        }
        self.diagnostics.push(diag);
    }
}
