//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Arithmetic:** Selects ALU operands from the control signals and runs the ALU.
//! 2. **Multiply/Divide:** Produces HI/LO results; a zero divisor is reported and
//!    leaves HI/LO unchanged.
//! 3. **Control Transfer:** Resolves branches and jumps and raises the redirect that
//!    squashes the two younger instructions in ID and IF by flushing IF/ID.
//! 4. **Addressing:** Computes load/store effective addresses.

use crate::common::constants::{LINK_OFFSET, SYSCALL_EXIT};
use crate::common::error::{Diagnostic, DiagnosticKind, Stage};
use crate::core::Cpu;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{JumpKind, OpASrc, OpBSrc};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::alu::{Alu, AluOutcome};
use crate::core::units::bru::BranchUnit;
use crate::isa::instruction::InstructionBits;

/// Variable shifts use only the low five bits of `rs`.
const SHIFT_MASK: i32 = 0x1F;

/// Executes the instruction execute stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    let id = cpu.latches.id_ex;
    if id.is_bubble() || !cpu.run_flag {
        return;
    }

    let mut ctrl = id.ctrl;
    let mut ex = ExMemEntry {
        valid: true,
        pc: id.pc,
        raw: id.raw,
        op: id.op,
        dest: id.dest,
        store_data: id.b,
        ctrl,
        fault: id.fault,
        ..ExMemEntry::default()
    };

    if id.fault.is_some() {
        cpu.next_latches.ex_mem = ex;
        return;
    }

    if let Some(cond) = ctrl.branch {
        if BranchUnit::taken(cond, id.a, id.b) {
            redirect(cpu, &id, BranchUnit::branch_target(id.pc, id.imm));
        }
    } else if let Some(kind) = ctrl.jump {
        let target = match kind {
            JumpKind::Direct => BranchUnit::jump_target(id.pc, id.raw.target()),
            JumpKind::Register => id.a as u32,
        };
        if ctrl.link {
            ex.alu = id.pc.wrapping_add(LINK_OFFSET) as i32;
        }
        redirect(cpu, &id, target);
    } else if ctrl.syscall {
        ex.exit = id.a == SYSCALL_EXIT;
        if !ex.exit {
            tracing::warn!(pc = id.pc, code = id.a, "unsupported syscall ignored");
        }
    } else {
        let (a, b) = operands(&id);
        match Alu::execute(ctrl.alu, a, b) {
            AluOutcome::Value(v) if ctrl.write_hi => ex.hi = v,
            AluOutcome::Value(v) if ctrl.write_lo => ex.lo = v,
            AluOutcome::Value(v) => ex.alu = v,
            AluOutcome::HiLo { hi, lo } => {
                ex.hi = hi;
                ex.lo = lo;
            }
            AluOutcome::Overflow => {
                ex.fault = Some(Diagnostic::new(
                    Stage::Execute,
                    id.pc,
                    id.raw,
                    DiagnosticKind::ArithmeticOverflow,
                ));
            }
            AluOutcome::DivideByZero => {
                cpu.stats.div_by_zero += 1;
                cpu.warn(Diagnostic::new(
                    Stage::Execute,
                    id.pc,
                    id.raw,
                    DiagnosticKind::DivideByZero,
                ));
                ctrl.write_hi = false;
                ctrl.write_lo = false;
            }
        }
    }

    if cpu.trace {
        tracing::trace!(
            "EX  {:#010x}: {:?} alu={:#010x}",
            id.pc,
            id.op,
            ex.alu as u32
        );
    }

    ex.ctrl = ctrl;
    cpu.next_latches.ex_mem = ex;
}

/// Selects the two ALU inputs.
fn operands(id: &IdExEntry) -> (i32, i32) {
    let a = match id.ctrl.a_src {
        OpASrc::Rs => id.a,
        OpASrc::Rt => id.b,
    };
    let b = match id.ctrl.b_src {
        OpBSrc::Rt => id.b,
        OpBSrc::Rs => id.a & SHIFT_MASK,
        OpBSrc::Imm => id.imm,
        OpBSrc::Shamt => id.shamt as i32,
    };
    (a, b)
}

/// Signals a taken control transfer to the younger stages.
///
/// The IF/ID latch is flushed before decode reads it, so the instruction behind the
/// branch never reaches ID/EX. Fetch sees the redirect and drops the slot it would
/// have fetched.
fn redirect(cpu: &mut Cpu, id: &IdExEntry, target: u32) {
    tracing::debug!(
        pc = id.pc,
        target,
        "{} taken, squashing younger instructions",
        id.op.mnemonic()
    );
    cpu.redirect = Some(target);
    if !cpu.latches.if_id.is_bubble() {
        cpu.latches.if_id.flush();
        cpu.stats.squashed += 1;
    }
}
