//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump, mul/div, system).
//! 3. **Hazards:** Data-hazard stall cycles, control redirects, and squashed instructions.

use std::fmt::Write as _;
use std::time::Instant;

use crate::isa::decode::{InstrClass, Op};

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of register and immediate ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of jumps retired.
    pub inst_jump: u64,
    /// Count of multiply, divide, and HI/LO move instructions retired.
    pub inst_muldiv: u64,
    /// Count of syscalls retired.
    pub inst_system: u64,

    /// Cycles decode spent stalled on a RAW dependency.
    pub stalls_data: u64,
    /// Cycles fetch spent redirecting after a taken branch or jump.
    pub stalls_control: u64,
    /// Wrong-path instructions discarded by a taken branch or jump: the one flushed
    /// from IF/ID and the one fetch skips while redirecting. Slots past the end of the
    /// program are not counted.
    pub squashed: u64,
    /// Divisions by zero reported (non-fatal).
    pub div_by_zero: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_muldiv: 0,
            inst_system: 0,
            stalls_data: 0,
            stalls_control: 0,
            squashed: 0,
            div_by_zero: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"hazards"`, `"instruction_mix"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "instruction_mix"];

const RULE: &str = "----------------------------------------------------------";

impl SimStats {
    /// Counts one retired instruction.
    pub fn record_retire(&mut self, op: Op) {
        self.instructions_retired += 1;
        let bucket = match op {
            Op::Mult
            | Op::Multu
            | Op::Div
            | Op::Divu
            | Op::Mfhi
            | Op::Mflo
            | Op::Mthi
            | Op::Mtlo => &mut self.inst_muldiv,
            _ => match op.class() {
                InstrClass::Load => &mut self.inst_load,
                InstrClass::Store => &mut self.inst_store,
                InstrClass::Branch => &mut self.inst_branch,
                InstrClass::Jump => &mut self.inst_jump,
                InstrClass::Syscall => &mut self.inst_system,
                InstrClass::RType | InstrClass::IType | InstrClass::Illegal => &mut self.inst_alu,
            },
        };
        *bucket += 1;
    }

    /// Cycles per retired instruction, or `0.0` before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty
    /// slice to render all sections. Ratios never divide by zero: counts are clamped
    /// to at least 1 before dividing.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to render, or empty for all.
    pub fn report(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, total: f64| (n as f64 / total) * 100.0;
        let mut out = String::new();

        if want("summary") {
            let _ = writeln!(out, "\n==========================================================");
            let _ = writeln!(out, "MIPS PIPELINE SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(
                out,
                "sim_ipc                  {:.4}",
                self.instructions_retired as f64 / cyc
            );
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "{RULE}");
        }
        if want("hazards") {
            let _ = writeln!(out, "HAZARDS");
            let _ = writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            );
            let _ = writeln!(
                out,
                "  stalls.control         {} ({:.2}%)",
                self.stalls_control,
                pct(self.stalls_control, cyc)
            );
            let _ = writeln!(out, "  squashed               {}", self.squashed);
            let _ = writeln!(out, "  div_by_zero            {}", self.div_by_zero);
            let _ = writeln!(out, "{RULE}");
        }
        if want("instruction_mix") {
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
                ("op.muldiv", self.inst_muldiv),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            let _ = writeln!(out, "{RULE}");
        }
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report(sections));
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
