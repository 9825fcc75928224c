//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It commits
//! results into the next architectural state generation, raises faults carried down
//! the pipeline, retires the exit syscall, and updates retirement statistics.

use crate::core::Cpu;
use crate::core::cpu::HaltReason;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::disasm::disassemble_at;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - A bubble does nothing.
/// - An entry carrying a fault is not committed. The fault is recorded and the
///   simulator halts; every older instruction has already retired.
/// - Otherwise the destination register (never `$0`), HI, and LO are written to
///   the next state generation and the instruction is counted as retired.
/// - An exit syscall halts the simulator after it retires.
pub fn wb_stage(cpu: &mut Cpu) {
    let wb = cpu.latches.mem_wb;
    if wb.is_bubble() {
        return;
    }

    if let Some(&diag) = wb.fault() {
        cpu.halt_with(HaltReason::Fault(diag));
        return;
    }

    if wb.write_enable {
        cpu.next.regs.write(wb.dest, wb.value);
    }
    if wb.write_hi {
        cpu.next.hi = wb.hi;
    }
    if wb.write_lo {
        cpu.next.lo = wb.lo;
    }

    cpu.stats.record_retire(wb.op);

    if cpu.trace {
        tracing::trace!(
            "WB  {:#010x}: {:<24} dest=${} value={:#010x}",
            wb.pc,
            disassemble_at(wb.raw, wb.pc),
            wb.dest,
            wb.value
        );
    }

    if wb.exit {
        cpu.halt_with(HaltReason::Exit);
    }
}
