//! Disassembler output.

use mips_pipe_core::isa::disasm::{disassemble, disassemble_at};
use rstest::rstest;

use crate::common::Asm;
use crate::common::harness::TEXT_BASE;

#[rstest]
#[case(0, "nop")]
#[case(0xFC00_0000, "unknown")]
#[case(Asm::addi(2, 1, 7), "addi $2, $1, 7")]
#[case(Asm::addi(2, 1, -4), "addi $2, $1, -4")]
#[case(Asm::add(3, 1, 2), "add $3, $1, $2")]
#[case(Asm::sll(4, 5, 2), "sll $4, $5, 2")]
#[case(Asm::lw(1, 8, 29), "lw $1, 8($29)")]
#[case(Asm::sw(1, -4, 29), "sw $1, -4($29)")]
#[case(Asm::ori(1, 1, 0xFF), "ori $1, $1, 0xff")]
#[case(Asm::lui(1, 0x1000), "lui $1, 0x1000")]
#[case(Asm::mfhi(3), "mfhi $3")]
#[case(Asm::mult(1, 2), "mult $1, $2")]
#[case(Asm::jr(31), "jr $31")]
#[case(Asm::syscall(), "syscall")]
#[case(Asm::beq(0, 0, 2), "beq $0, $0, 2")]
fn formats_without_address(#[case] raw: u32, #[case] text: &str) {
    assert_eq!(disassemble(raw), text);
}

#[test]
fn resolves_branch_targets_with_address() {
    assert_eq!(
        disassemble_at(Asm::beq(0, 0, 2), TEXT_BASE),
        "beq $0, $0, 0x0040000c"
    );
    assert_eq!(
        disassemble_at(Asm::bne(1, 2, -1), TEXT_BASE + 0x10),
        "bne $1, $2, 0x00400010"
    );
}

#[test]
fn resolves_jump_targets_within_segment() {
    assert_eq!(
        disassemble_at(Asm::j(0x0040_0020), TEXT_BASE),
        "j 0x00400020"
    );
    assert_eq!(
        disassemble_at(Asm::jal(0x0040_0100), TEXT_BASE + 4),
        "jal 0x00400100"
    );
}
