//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** Each entry carries exactly what the next stage needs,
//!    plus a `valid` bit (false = bubble or squashed slot) and the originating PC.
//! 2. **Fault Propagation:** A fatal diagnostic detected in any stage rides along
//!    with its instruction and is raised only in writeback.
//! 3. **Latch Set:** `Latches` groups the four entries so the driver can commit
//!    a whole cycle's worth of latch contents at once.

use crate::common::error::Diagnostic;
use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::traits::{PendingWrite, PipelineLatch};
use crate::isa::decode::Op;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// `false` for a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Fetch fault, if the word could not be read.
    pub fault: Option<Diagnostic>,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// `false` for a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded operation.
    pub op: Op,
    /// Destination register (0 when the instruction writes no register).
    pub dest: usize,
    /// Operand A: value of `rs`, or HI/LO/`$v0` for the instructions that read those.
    pub a: i32,
    /// Operand B: value of `rt`.
    pub b: i32,
    /// Sign- or zero-extended immediate.
    pub imm: i32,
    /// Shift amount field.
    pub shamt: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Fault detected in fetch or decode.
    pub fault: Option<Diagnostic>,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// `false` for a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded operation.
    pub op: Op,
    /// Destination register.
    pub dest: usize,
    /// ALU result: computed value, link address, or effective address.
    pub alu: i32,
    /// Data to be stored (operand B).
    pub store_data: i32,
    /// HI result for multiply/divide/`MTHI`.
    pub hi: i32,
    /// LO result for multiply/divide/`MTLO`.
    pub lo: i32,
    /// The instruction is an exit syscall and halts the machine when it retires.
    pub exit: bool,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Fault detected in fetch, decode, or execute.
    pub fault: Option<Diagnostic>,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// `false` for a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub raw: u32,
    /// Decoded operation.
    pub op: Op,
    /// Destination register.
    pub dest: usize,
    /// Value to write: ALU result or loaded data.
    pub value: i32,
    /// Commit `value` to `dest`.
    pub write_enable: bool,
    /// HI value to commit when `write_hi` is set.
    pub hi: i32,
    /// LO value to commit when `write_lo` is set.
    pub lo: i32,
    /// Commit `hi`.
    pub write_hi: bool,
    /// Commit `lo`.
    pub write_lo: bool,
    /// Halt cleanly after retiring.
    pub exit: bool,
    /// Fault to raise instead of retiring.
    pub fault: Option<Diagnostic>,
}

/// The four pipeline latches.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Latches {
    /// IF/ID latch.
    pub if_id: IfIdEntry,
    /// ID/EX latch.
    pub id_ex: IdExEntry,
    /// EX/MEM latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB latch.
    pub mem_wb: MemWbEntry,
}

impl Latches {
    /// Returns `true` when no latch holds an instruction.
    pub const fn is_drained(&self) -> bool {
        !self.if_id.valid && !self.id_ex.valid && !self.ex_mem.valid && !self.mem_wb.valid
    }
}

impl PipelineLatch for IfIdEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_bubble(&self) -> bool {
        !self.valid
    }

    fn fault(&self) -> Option<&Diagnostic> {
        self.fault.as_ref()
    }

    fn pending_write(&self) -> PendingWrite {
        PendingWrite::NONE
    }
}

impl PipelineLatch for IdExEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_bubble(&self) -> bool {
        !self.valid
    }

    fn fault(&self) -> Option<&Diagnostic> {
        self.fault.as_ref()
    }

    fn pending_write(&self) -> PendingWrite {
        if !self.valid {
            return PendingWrite::NONE;
        }
        PendingWrite {
            gpr: self.ctrl.reg_write.then_some(self.dest),
            hi: self.ctrl.write_hi,
            lo: self.ctrl.write_lo,
        }
    }
}

impl PipelineLatch for ExMemEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_bubble(&self) -> bool {
        !self.valid
    }

    fn fault(&self) -> Option<&Diagnostic> {
        self.fault.as_ref()
    }

    fn pending_write(&self) -> PendingWrite {
        if !self.valid {
            return PendingWrite::NONE;
        }
        PendingWrite {
            gpr: self.ctrl.reg_write.then_some(self.dest),
            hi: self.ctrl.write_hi,
            lo: self.ctrl.write_lo,
        }
    }
}

impl PipelineLatch for MemWbEntry {
    fn flush(&mut self) {
        *self = Self::default();
    }

    fn is_bubble(&self) -> bool {
        !self.valid
    }

    fn fault(&self) -> Option<&Diagnostic> {
        self.fault.as_ref()
    }

    fn pending_write(&self) -> PendingWrite {
        if !self.valid {
            return PendingWrite::NONE;
        }
        PendingWrite {
            gpr: self.write_enable.then_some(self.dest),
            hi: self.write_hi,
            lo: self.write_lo,
        }
    }
}
