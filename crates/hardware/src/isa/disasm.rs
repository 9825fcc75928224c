//! Instruction Disassembler for the MU-MIPS instruction set.
//!
//! Converts a 32-bit instruction encoding into a human-readable assembler string
//! for the shell's `print` command, pipeline trace events, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use mips_pipe_core::isa::disasm::{disassemble, disassemble_at};
//!
//! assert_eq!(disassemble(0x2022_0007), "addi $2, $1, 7");
//! assert_eq!(disassemble_at(0x1000_0002, 0x0040_0000), "beq $0, $0, 0x0040000c");
//! ```

use crate::core::units::bru::BranchUnit;
use crate::isa::decode::{Op, lookup};
use crate::isa::instruction::Instruction;

/// Disassembles an instruction without knowing its address.
///
/// Branch operands are shown as signed word offsets and jump targets as the raw
/// 26-bit field shifted into a byte address within segment 0.
pub fn disassemble(raw: u32) -> String {
    render(raw, None)
}

/// Disassembles an instruction located at `pc`, resolving branch and jump targets.
pub fn disassemble_at(raw: u32, pc: u32) -> String {
    render(raw, Some(pc))
}

fn render(raw: u32, pc: Option<u32>) -> String {
    if raw == 0 {
        return "nop".to_string();
    }
    let Some(op) = lookup(raw) else {
        return "unknown".to_string();
    };
    let i = Instruction::from_raw(raw);
    let m = op.mnemonic();

    match op {
        Op::Sll | Op::Srl | Op::Sra => format!("{m} ${}, ${}, {}", i.rd, i.rt, i.shamt),
        Op::Sllv | Op::Srlv | Op::Srav => format!("{m} ${}, ${}, ${}", i.rd, i.rt, i.rs),
        Op::Jr | Op::Mthi | Op::Mtlo => format!("{m} ${}", i.rs),
        Op::Mfhi | Op::Mflo => format!("{m} ${}", i.rd),
        Op::Jalr => format!("{m} ${}, ${}", i.rd, i.rs),
        Op::Syscall => m.to_string(),
        Op::Mult | Op::Multu | Op::Div | Op::Divu => format!("{m} ${}, ${}", i.rs, i.rt),
        Op::Add
        | Op::Addu
        | Op::Sub
        | Op::Subu
        | Op::And
        | Op::Or
        | Op::Xor
        | Op::Nor
        | Op::Slt
        | Op::Sltu => format!("{m} ${}, ${}, ${}", i.rd, i.rs, i.rt),
        Op::Addi | Op::Addiu | Op::Slti | Op::Sltiu => {
            format!("{m} ${}, ${}, {}", i.rt, i.rs, i.simm())
        }
        Op::Andi | Op::Ori | Op::Xori => format!("{m} ${}, ${}, {:#x}", i.rt, i.rs, i.imm),
        Op::Lui => format!("{m} ${}, {:#x}", i.rt, i.imm),
        Op::Lb | Op::Lbu | Op::Lh | Op::Lhu | Op::Lw | Op::Sb | Op::Sh | Op::Sw => {
            format!("{m} ${}, {}(${})", i.rt, i.simm(), i.rs)
        }
        Op::Beq | Op::Bne => {
            format!("{m} ${}, ${}, {}", i.rs, i.rt, branch_operand(&i, pc))
        }
        Op::Blez | Op::Bgtz | Op::Bltz | Op::Bgez => {
            format!("{m} ${}, {}", i.rs, branch_operand(&i, pc))
        }
        Op::J | Op::Jal => {
            let target = BranchUnit::jump_target(pc.unwrap_or(0), i.target);
            format!("{m} {target:#010x}")
        }
    }
}

fn branch_operand(i: &Instruction, pc: Option<u32>) -> String {
    pc.map_or_else(
        || i.simm().to_string(),
        |pc| format!("{:#010x}", BranchUnit::branch_target(pc, i.simm())),
    )
}
