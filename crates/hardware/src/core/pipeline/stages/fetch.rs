//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It reads the
//! word at the PC and advances the PC by four, unless:
//! 1. **Redirect:** Execute resolved a taken branch or jump; the wrong-path slot becomes
//!    a bubble and the PC moves to the target.
//! 2. **Stall:** Decode detected a RAW hazard; the IF/ID latch and the PC are held.
//! 3. **Exhausted:** The PC ran past the loaded program; a bubble is emitted so the
//!    pipeline drains.

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::{AccessKind, Diagnostic, Stage};
use crate::core::Cpu;
use crate::core::pipeline::latches::IfIdEntry;

/// Executes the instruction fetch stage.
///
/// A fetch from an unmapped or misaligned PC produces an entry carrying the fault.
/// The PC is held; the fault halts the simulator when it reaches writeback.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn fetch_stage(cpu: &mut Cpu) {
    if !cpu.run_flag {
        return;
    }

    if let Some(target) = cpu.redirect {
        cpu.stats.stalls_control += 1;
        if !cpu.is_past_program(cpu.current.pc) {
            cpu.stats.squashed += 1;
        }
        cpu.next.pc = target;
        return;
    }

    if cpu.stall {
        cpu.next_latches.if_id = cpu.latches.if_id;
        return;
    }

    let pc = cpu.current.pc;
    if cpu.is_past_program(pc) {
        cpu.fetch_exhausted = true;
        return;
    }

    match cpu.memory.read_word(pc) {
        Ok(raw) => {
            if cpu.trace {
                tracing::trace!("IF  {:#010x}: {:#010x}", pc, raw);
            }
            cpu.next_latches.if_id = IfIdEntry {
                valid: true,
                pc,
                raw,
                fault: None,
            };
            cpu.next.pc = pc.wrapping_add(INSTRUCTION_BYTES);
        }
        Err(fault) => {
            cpu.next_latches.if_id = IfIdEntry {
                valid: true,
                pc,
                raw: 0,
                fault: Some(Diagnostic::memory(
                    Stage::Fetch,
                    pc,
                    0,
                    AccessKind::Fetch,
                    fault,
                )),
            };
        }
    }
}
