//! Instruction decoder.
//!
//! This module maps raw instruction words to operations. It performs:
//! 1. **Field Extraction:** Splits the word into an `Instruction` (see [`crate::isa::instruction`]).
//! 2. **Key Normalization:** Reduces the word to an `(opcode, funct)` dispatch key. For
//!    SPECIAL the second element is `funct`, for REGIMM it is `rt`, otherwise 0.
//! 3. **Table Dispatch:** Looks the key up in a table built once on first use.
//! 4. **Classification:** Groups every operation into an `InstrClass`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::isa::funct;
use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::opcodes::{
    OP_ADDI, OP_ADDIU, OP_ANDI, OP_BEQ, OP_BGTZ, OP_BLEZ, OP_BNE, OP_J, OP_JAL, OP_LB, OP_LBU,
    OP_LH, OP_LHU, OP_LUI, OP_LW, OP_ORI, OP_REGIMM, OP_SB, OP_SH, OP_SLTI, OP_SLTIU, OP_SPECIAL,
    OP_SW, OP_XORI, REGIMM_BGEZ, REGIMM_BLTZ,
};

/// Every operation the simulator implements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Op {
    /// Shift left logical. The all-zero word `sll $0, $0, 0` is the canonical NOP.
    #[default]
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Shift left logical by register.
    Sllv,
    /// Shift right logical by register.
    Srlv,
    /// Shift right arithmetic by register.
    Srav,
    /// Jump to register.
    Jr,
    /// Jump to register and link.
    Jalr,
    /// System call.
    Syscall,
    /// Move from HI.
    Mfhi,
    /// Move to HI.
    Mthi,
    /// Move from LO.
    Mflo,
    /// Move to LO.
    Mtlo,
    /// Signed multiply into HI:LO.
    Mult,
    /// Unsigned multiply into HI:LO.
    Multu,
    /// Signed divide into LO (quotient) and HI (remainder).
    Div,
    /// Unsigned divide into LO (quotient) and HI (remainder).
    Divu,
    /// Add, trapping on signed overflow.
    Add,
    /// Add without overflow trap.
    Addu,
    /// Subtract, trapping on signed overflow.
    Sub,
    /// Subtract without overflow trap.
    Subu,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
    /// Set on signed less than.
    Slt,
    /// Set on unsigned less than.
    Sltu,
    /// Add immediate, trapping on signed overflow.
    Addi,
    /// Add immediate without overflow trap.
    Addiu,
    /// Set on signed less than immediate.
    Slti,
    /// Set on unsigned less than (sign-extended) immediate.
    Sltiu,
    /// AND with zero-extended immediate.
    Andi,
    /// OR with zero-extended immediate.
    Ori,
    /// XOR with zero-extended immediate.
    Xori,
    /// Load upper immediate.
    Lui,
    /// Load signed byte.
    Lb,
    /// Load unsigned byte.
    Lbu,
    /// Load signed halfword.
    Lh,
    /// Load unsigned halfword.
    Lhu,
    /// Load word.
    Lw,
    /// Store byte.
    Sb,
    /// Store halfword.
    Sh,
    /// Store word.
    Sw,
    /// Branch if `rs == rt`.
    Beq,
    /// Branch if `rs != rt`.
    Bne,
    /// Branch if `rs <= 0`.
    Blez,
    /// Branch if `rs > 0`.
    Bgtz,
    /// Branch if `rs < 0`.
    Bltz,
    /// Branch if `rs >= 0`.
    Bgez,
    /// Jump within the current 256 MiB segment.
    J,
    /// Jump and link.
    Jal,
}

/// Coarse instruction category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstrClass {
    /// Register-register ALU, shift, multiply/divide, and HI/LO moves.
    #[default]
    RType,
    /// ALU operation with an immediate operand.
    IType,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional PC-relative branch.
    Branch,
    /// Unconditional jump (`J`, `JAL`, `JR`, `JALR`).
    Jump,
    /// `SYSCALL`.
    Syscall,
    /// Unrecognized `(opcode, funct)` combination.
    Illegal,
}

impl Op {
    /// Category of the operation.
    pub const fn class(self) -> InstrClass {
        match self {
            Self::Jr | Self::Jalr | Self::J | Self::Jal => InstrClass::Jump,
            Self::Syscall => InstrClass::Syscall,
            Self::Addi
            | Self::Addiu
            | Self::Slti
            | Self::Sltiu
            | Self::Andi
            | Self::Ori
            | Self::Xori
            | Self::Lui => InstrClass::IType,
            Self::Lb | Self::Lbu | Self::Lh | Self::Lhu | Self::Lw => InstrClass::Load,
            Self::Sb | Self::Sh | Self::Sw => InstrClass::Store,
            Self::Beq | Self::Bne | Self::Blez | Self::Bgtz | Self::Bltz | Self::Bgez => {
                InstrClass::Branch
            }
            _ => InstrClass::RType,
        }
    }

    /// Lower-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Sllv => "sllv",
            Self::Srlv => "srlv",
            Self::Srav => "srav",
            Self::Jr => "jr",
            Self::Jalr => "jalr",
            Self::Syscall => "syscall",
            Self::Mfhi => "mfhi",
            Self::Mthi => "mthi",
            Self::Mflo => "mflo",
            Self::Mtlo => "mtlo",
            Self::Mult => "mult",
            Self::Multu => "multu",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Add => "add",
            Self::Addu => "addu",
            Self::Sub => "sub",
            Self::Subu => "subu",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nor => "nor",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Addi => "addi",
            Self::Addiu => "addiu",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Xori => "xori",
            Self::Lui => "lui",
            Self::Lb => "lb",
            Self::Lbu => "lbu",
            Self::Lh => "lh",
            Self::Lhu => "lhu",
            Self::Lw => "lw",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blez => "blez",
            Self::Bgtz => "bgtz",
            Self::Bltz => "bltz",
            Self::Bgez => "bgez",
            Self::J => "j",
            Self::Jal => "jal",
        }
    }
}

/// Normalized `(opcode, funct)` dispatch key.
pub type DispatchKey = (u32, u32);

/// `(key, operation)` pairs that populate the decode table.
const ENCODINGS: &[(DispatchKey, Op)] = &[
    ((OP_SPECIAL, funct::SLL), Op::Sll),
    ((OP_SPECIAL, funct::SRL), Op::Srl),
    ((OP_SPECIAL, funct::SRA), Op::Sra),
    ((OP_SPECIAL, funct::SLLV), Op::Sllv),
    ((OP_SPECIAL, funct::SRLV), Op::Srlv),
    ((OP_SPECIAL, funct::SRAV), Op::Srav),
    ((OP_SPECIAL, funct::JR), Op::Jr),
    ((OP_SPECIAL, funct::JALR), Op::Jalr),
    ((OP_SPECIAL, funct::SYSCALL), Op::Syscall),
    ((OP_SPECIAL, funct::MFHI), Op::Mfhi),
    ((OP_SPECIAL, funct::MTHI), Op::Mthi),
    ((OP_SPECIAL, funct::MFLO), Op::Mflo),
    ((OP_SPECIAL, funct::MTLO), Op::Mtlo),
    ((OP_SPECIAL, funct::MULT), Op::Mult),
    ((OP_SPECIAL, funct::MULTU), Op::Multu),
    ((OP_SPECIAL, funct::DIV), Op::Div),
    ((OP_SPECIAL, funct::DIVU), Op::Divu),
    ((OP_SPECIAL, funct::ADD), Op::Add),
    ((OP_SPECIAL, funct::ADDU), Op::Addu),
    ((OP_SPECIAL, funct::SUB), Op::Sub),
    ((OP_SPECIAL, funct::SUBU), Op::Subu),
    ((OP_SPECIAL, funct::AND), Op::And),
    ((OP_SPECIAL, funct::OR), Op::Or),
    ((OP_SPECIAL, funct::XOR), Op::Xor),
    ((OP_SPECIAL, funct::NOR), Op::Nor),
    ((OP_SPECIAL, funct::SLT), Op::Slt),
    ((OP_SPECIAL, funct::SLTU), Op::Sltu),
    ((OP_REGIMM, REGIMM_BLTZ), Op::Bltz),
    ((OP_REGIMM, REGIMM_BGEZ), Op::Bgez),
    ((OP_J, 0), Op::J),
    ((OP_JAL, 0), Op::Jal),
    ((OP_BEQ, 0), Op::Beq),
    ((OP_BNE, 0), Op::Bne),
    ((OP_BLEZ, 0), Op::Blez),
    ((OP_BGTZ, 0), Op::Bgtz),
    ((OP_ADDI, 0), Op::Addi),
    ((OP_ADDIU, 0), Op::Addiu),
    ((OP_SLTI, 0), Op::Slti),
    ((OP_SLTIU, 0), Op::Sltiu),
    ((OP_ANDI, 0), Op::Andi),
    ((OP_ORI, 0), Op::Ori),
    ((OP_XORI, 0), Op::Xori),
    ((OP_LUI, 0), Op::Lui),
    ((OP_LB, 0), Op::Lb),
    ((OP_LH, 0), Op::Lh),
    ((OP_LW, 0), Op::Lw),
    ((OP_LBU, 0), Op::Lbu),
    ((OP_LHU, 0), Op::Lhu),
    ((OP_SB, 0), Op::Sb),
    ((OP_SH, 0), Op::Sh),
    ((OP_SW, 0), Op::Sw),
];

/// Decode table, built on first use.
static DECODE_TABLE: LazyLock<HashMap<DispatchKey, Op>> =
    LazyLock::new(|| ENCODINGS.iter().copied().collect());

/// Splits a raw word into its fields.
///
/// # Examples
///
/// ```
/// use mips_pipe_core::isa::decode::decode;
///
/// // addi $2, $1, 7
/// let inst = decode(0x2022_0007);
/// assert_eq!(inst.opcode, 0x08);
/// assert_eq!((inst.rs, inst.rt), (1, 2));
/// assert_eq!(inst.simm(), 7);
/// ```
pub fn decode(raw: u32) -> Instruction {
    Instruction::from_raw(raw)
}

/// Computes the normalized dispatch key of a raw word.
pub fn dispatch_key(raw: u32) -> DispatchKey {
    match raw.opcode() {
        OP_SPECIAL => (OP_SPECIAL, raw.funct()),
        OP_REGIMM => (OP_REGIMM, raw.rt() as u32),
        opcode => (opcode, 0),
    }
}

/// Looks up the operation encoded by `raw`.
///
/// # Returns
///
/// `Some(op)` for a supported instruction, `None` for an illegal encoding.
pub fn lookup(raw: u32) -> Option<Op> {
    DECODE_TABLE.get(&dispatch_key(raw)).copied()
}

/// Classifies a raw word.
///
/// # Returns
///
/// The operation's class, or `InstrClass::Illegal` for an unsupported encoding.
pub fn classify(raw: u32) -> InstrClass {
    lookup(raw).map_or(InstrClass::Illegal, Op::class)
}
