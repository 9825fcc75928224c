//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It performs
//! the following:
//! 1. **Decoding:** Looks up the operation and builds its control signals; encodings
//!    with no entry in the decode table become illegal-instruction faults.
//! 2. **Hazard Detection:** Stalls while any source register (including HI/LO) is the
//!    destination of an instruction that has not yet retired.
//! 3. **Operand Read:** Reads source registers from the committed state.

use crate::common::constants::{REG_RA, REG_V0, REG_ZERO};
use crate::common::error::{Diagnostic, DiagnosticKind, Stage};
use crate::core::Cpu;
use crate::core::pipeline::hazards::{Sources, find_raw_hazard};
use crate::core::pipeline::latches::IdExEntry;
use crate::core::pipeline::signals::{ControlSignals, ImmExt};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::decode::{InstrClass, Op, lookup};
use crate::isa::instruction::Instruction;

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Behavior
///
/// Produces a bubble when the IF/ID latch is empty (including a slot execute flushed
/// for a taken branch this cycle) or when decode stalls on a RAW hazard. In the stall
/// case `cpu.stall` tells fetch to hold the IF/ID latch and the PC.
pub fn decode_stage(cpu: &mut Cpu) {
    let if_id = cpu.latches.if_id;
    if if_id.is_bubble() || !cpu.run_flag {
        return;
    }

    if let Some(&fault) = if_id.fault() {
        cpu.next_latches.id_ex = IdExEntry {
            valid: true,
            pc: if_id.pc,
            raw: if_id.raw,
            fault: Some(fault),
            ..IdExEntry::default()
        };
        return;
    }

    let raw = if_id.raw;
    let Some(op) = lookup(raw) else {
        cpu.next_latches.id_ex = IdExEntry {
            valid: true,
            pc: if_id.pc,
            raw,
            fault: Some(Diagnostic::new(
                Stage::Decode,
                if_id.pc,
                raw,
                DiagnosticKind::IllegalInstruction,
            )),
            ..IdExEntry::default()
        };
        return;
    };

    let inst = Instruction::from_raw(raw);
    if let Some(hazard) = find_raw_hazard(&Sources::of(op, &inst), &cpu.latches) {
        cpu.stall = true;
        cpu.stats.stalls_data += 1;
        tracing::debug!(
            pc = if_id.pc,
            resource = ?hazard.resource,
            producer = %hazard.producer,
            "ID stall on RAW hazard"
        );
        return;
    }

    let ctrl = ControlSignals::for_op(op);
    let state = &cpu.current;
    let a = match op {
        Op::Mfhi => state.hi,
        Op::Mflo => state.lo,
        Op::Syscall => state.regs.read(REG_V0),
        _ => state.regs.read(inst.rs),
    };
    let imm = match ctrl.imm_ext {
        ImmExt::Sign => inst.simm(),
        ImmExt::Zero => inst.zimm(),
    };

    if cpu.trace {
        tracing::trace!("ID  {:#010x}: {:?}", if_id.pc, op);
    }

    cpu.next_latches.id_ex = IdExEntry {
        valid: true,
        pc: if_id.pc,
        raw,
        op,
        dest: destination(op, &ctrl, &inst),
        a,
        b: state.regs.read(inst.rt),
        imm,
        shamt: inst.shamt,
        ctrl,
        fault: None,
    };
}

/// Picks the register an instruction writes, or `$0` when it writes none.
fn destination(op: Op, ctrl: &ControlSignals, inst: &Instruction) -> usize {
    if matches!(op, Op::Jal) {
        REG_RA
    } else if !ctrl.reg_write {
        REG_ZERO
    } else if matches!(ctrl.class, InstrClass::RType | InstrClass::Jump) {
        inst.rd
    } else {
        inst.rt
    }
}
