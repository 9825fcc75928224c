//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It performs
//! the data access of loads and stores at the effective address computed in execute,
//! and converts access failures into faults that ride to writeback.

use crate::common::error::{AccessKind, Diagnostic, Stage};
use crate::core::Cpu;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::traits::PipelineLatch;

/// Executes the memory access stage.
///
/// Loads replace the result with the (sign- or zero-extended) data read. Stores write
/// operand B. Non-memory instructions pass through unchanged. An instruction that
/// already carries a fault performs no access.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn mem_stage(cpu: &mut Cpu) {
    let ex = cpu.latches.ex_mem;
    if ex.is_bubble() || !cpu.run_flag {
        return;
    }

    let ctrl = ex.ctrl;
    let mut wb = MemWbEntry {
        valid: true,
        pc: ex.pc,
        raw: ex.raw,
        op: ex.op,
        dest: ex.dest,
        value: ex.alu,
        write_enable: ctrl.reg_write,
        hi: ex.hi,
        lo: ex.lo,
        write_hi: ctrl.write_hi,
        write_lo: ctrl.write_lo,
        exit: ex.exit,
        fault: ex.fault,
    };

    if wb.fault.is_none() {
        let addr = ex.alu as u32;
        let width = ctrl.width.bytes();
        if ctrl.mem_read {
            match cpu.memory.load(addr, width, ctrl.signed_load) {
                Ok(data) => wb.value = data as i32,
                Err(fault) => {
                    wb.fault = Some(Diagnostic::memory(
                        Stage::Memory,
                        ex.pc,
                        ex.raw,
                        AccessKind::Load,
                        fault,
                    ));
                }
            }
        } else if ctrl.mem_write {
            if let Err(fault) = cpu.memory.store(addr, width, ex.store_data as u32) {
                wb.fault = Some(Diagnostic::memory(
                    Stage::Memory,
                    ex.pc,
                    ex.raw,
                    AccessKind::Store,
                    fault,
                ));
            }
        }
    }

    if wb.fault.is_some() {
        wb.write_enable = false;
        wb.write_hi = false;
        wb.write_lo = false;
    }

    if cpu.trace && (ctrl.mem_read || ctrl.mem_write) {
        tracing::trace!(
            "MEM {:#010x}: addr={:#010x} {}",
            ex.pc,
            ex.alu as u32,
            if ctrl.mem_read { "load" } else { "store" }
        );
    }

    cpu.next_latches.mem_wb = wb;
}
