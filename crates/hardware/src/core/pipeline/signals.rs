//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Selects the ALU, branch, or jump behavior of an instruction.
//! 2. **Operand Selection:** Defines the sources for ALU inputs (registers, immediate, shamt).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Writeback Control:** Flags general-purpose, HI, and LO register writes.

use crate::isa::decode::{InstrClass, Op};

/// ALU operation types.
///
/// Shift operations take the value to shift as operand A and the shift amount as
/// operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Signed addition, reports overflow.
    Add,
    /// Wrapping addition.
    #[default]
    Addu,
    /// Signed subtraction, reports overflow.
    Sub,
    /// Wrapping subtraction.
    Subu,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
    /// Set less than (signed).
    Slt,
    /// Set less than (unsigned).
    Sltu,
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Load upper immediate (`B << 16`).
    Lui,
    /// Signed 32x32 to 64-bit multiply.
    Mult,
    /// Unsigned 32x32 to 64-bit multiply.
    Multu,
    /// Signed divide.
    Div,
    /// Unsigned divide.
    Divu,
    /// Forward operand A unchanged (HI/LO moves).
    PassA,
}

/// Source of ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Value read for `rs` (or HI/LO/`$v0` for the instructions that read those).
    #[default]
    Rs,
    /// Value read for `rt`.
    Rt,
}

/// Source of ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Value read for `rt`.
    #[default]
    Rt,
    /// Low five bits of the value read for `rs` (variable shifts).
    Rs,
    /// Extended immediate.
    Imm,
    /// The `shamt` field.
    Shamt,
}

/// How the 16-bit immediate is widened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImmExt {
    /// Sign extension (arithmetic, compare, memory, branch).
    #[default]
    Sign,
    /// Zero extension (`ANDI`, `ORI`, `XORI`, `LUI`).
    Zero,
}

/// Memory access width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory access.
    #[default]
    Nop,
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Half,
    /// 32-bit access.
    Word,
}

impl MemWidth {
    /// Access size in bytes (0 for `Nop`).
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Nop => 0,
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Branch condition evaluated by the branch unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// `A == B`.
    Eq,
    /// `A != B`.
    Ne,
    /// `A <= 0`.
    Lez,
    /// `A > 0`.
    Gtz,
    /// `A < 0`.
    Ltz,
    /// `A >= 0`.
    Gez,
}

/// Jump target source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    /// 26-bit target within the current segment (`J`, `JAL`).
    Direct,
    /// Target taken from operand A (`JR`, `JALR`).
    Register,
}

/// Control signals produced by decode and carried down the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Instruction category.
    pub class: InstrClass,
    /// ALU operation.
    pub alu: AluOp,
    /// ALU operand A source.
    pub a_src: OpASrc,
    /// ALU operand B source.
    pub b_src: OpBSrc,
    /// Immediate widening rule.
    pub imm_ext: ImmExt,
    /// Writes the destination general-purpose register.
    pub reg_write: bool,
    /// Reads data memory.
    pub mem_read: bool,
    /// Writes data memory.
    pub mem_write: bool,
    /// Data memory access width.
    pub width: MemWidth,
    /// Sign-extend narrow loads.
    pub signed_load: bool,
    /// Conditional branch, if any.
    pub branch: Option<BranchCond>,
    /// Unconditional jump, if any.
    pub jump: Option<JumpKind>,
    /// Writes the return address (`PC + 8`) as the result.
    pub link: bool,
    /// Writes HI.
    pub write_hi: bool,
    /// Writes LO.
    pub write_lo: bool,
    /// `SYSCALL`.
    pub syscall: bool,
}

impl ControlSignals {
    /// Builds the control signals of an operation.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation from the decode table.
    ///
    /// # Returns
    ///
    /// Fully populated control signals; fields not relevant to `op` keep their defaults.
    pub fn for_op(op: Op) -> Self {
        let base = Self {
            class: op.class(),
            ..Self::default()
        };
        let rtype = |alu| Self {
            alu,
            reg_write: true,
            ..base
        };
        let shift = |alu, b_src| Self {
            alu,
            a_src: OpASrc::Rt,
            b_src,
            reg_write: true,
            ..base
        };
        let imm = |alu, imm_ext| Self {
            alu,
            b_src: OpBSrc::Imm,
            imm_ext,
            reg_write: true,
            ..base
        };
        let load = |width, signed_load| Self {
            b_src: OpBSrc::Imm,
            reg_write: true,
            mem_read: true,
            width,
            signed_load,
            ..base
        };
        let store = |width| Self {
            b_src: OpBSrc::Imm,
            mem_write: true,
            width,
            ..base
        };
        let hilo = |alu| Self {
            alu,
            write_hi: true,
            write_lo: true,
            ..base
        };
        let branch = |cond| Self {
            branch: Some(cond),
            ..base
        };

        match op {
            Op::Add => rtype(AluOp::Add),
            Op::Addu => rtype(AluOp::Addu),
            Op::Sub => rtype(AluOp::Sub),
            Op::Subu => rtype(AluOp::Subu),
            Op::And => rtype(AluOp::And),
            Op::Or => rtype(AluOp::Or),
            Op::Xor => rtype(AluOp::Xor),
            Op::Nor => rtype(AluOp::Nor),
            Op::Slt => rtype(AluOp::Slt),
            Op::Sltu => rtype(AluOp::Sltu),
            Op::Mfhi | Op::Mflo => rtype(AluOp::PassA),

            Op::Sll => shift(AluOp::Sll, OpBSrc::Shamt),
            Op::Srl => shift(AluOp::Srl, OpBSrc::Shamt),
            Op::Sra => shift(AluOp::Sra, OpBSrc::Shamt),
            Op::Sllv => shift(AluOp::Sll, OpBSrc::Rs),
            Op::Srlv => shift(AluOp::Srl, OpBSrc::Rs),
            Op::Srav => shift(AluOp::Sra, OpBSrc::Rs),

            Op::Mult => hilo(AluOp::Mult),
            Op::Multu => hilo(AluOp::Multu),
            Op::Div => hilo(AluOp::Div),
            Op::Divu => hilo(AluOp::Divu),
            Op::Mthi => Self {
                alu: AluOp::PassA,
                write_hi: true,
                ..base
            },
            Op::Mtlo => Self {
                alu: AluOp::PassA,
                write_lo: true,
                ..base
            },

            Op::Addi => imm(AluOp::Add, ImmExt::Sign),
            Op::Addiu => imm(AluOp::Addu, ImmExt::Sign),
            Op::Slti => imm(AluOp::Slt, ImmExt::Sign),
            Op::Sltiu => imm(AluOp::Sltu, ImmExt::Sign),
            Op::Andi => imm(AluOp::And, ImmExt::Zero),
            Op::Ori => imm(AluOp::Or, ImmExt::Zero),
            Op::Xori => imm(AluOp::Xor, ImmExt::Zero),
            Op::Lui => imm(AluOp::Lui, ImmExt::Zero),

            Op::Lb => load(MemWidth::Byte, true),
            Op::Lbu => load(MemWidth::Byte, false),
            Op::Lh => load(MemWidth::Half, true),
            Op::Lhu => load(MemWidth::Half, false),
            Op::Lw => load(MemWidth::Word, true),
            Op::Sb => store(MemWidth::Byte),
            Op::Sh => store(MemWidth::Half),
            Op::Sw => store(MemWidth::Word),

            Op::Beq => branch(BranchCond::Eq),
            Op::Bne => branch(BranchCond::Ne),
            Op::Blez => branch(BranchCond::Lez),
            Op::Bgtz => branch(BranchCond::Gtz),
            Op::Bltz => branch(BranchCond::Ltz),
            Op::Bgez => branch(BranchCond::Gez),

            Op::J => Self {
                jump: Some(JumpKind::Direct),
                ..base
            },
            Op::Jal => Self {
                jump: Some(JumpKind::Direct),
                link: true,
                reg_write: true,
                ..base
            },
            Op::Jr => Self {
                jump: Some(JumpKind::Register),
                ..base
            },
            Op::Jalr => Self {
                jump: Some(JumpKind::Register),
                link: true,
                reg_write: true,
                ..base
            },

            Op::Syscall => Self {
                syscall: true,
                ..base
            },
        }
    }
}
