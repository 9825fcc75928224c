//! ALU operation tests.

use mips_pipe_core::core::pipeline::signals::AluOp;
use mips_pipe_core::core::units::alu::{Alu, AluOutcome};
use rstest::rstest;

#[rstest]
#[case(AluOp::Add, 5, 7, 12)]
#[case(AluOp::Addu, -1, 1, 0)]
#[case(AluOp::Sub, 5, 7, -2)]
#[case(AluOp::Subu, i32::MIN, 1, i32::MAX)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Nor, 0, 0, -1)]
#[case(AluOp::Slt, -1, 0, 1)]
#[case(AluOp::Sltu, -1, 0, 0)]
#[case(AluOp::Sll, 1, 4, 16)]
#[case(AluOp::Srl, -16, 28, 0xF)]
#[case(AluOp::Sra, -16, 2, -4)]
#[case(AluOp::Sll, 1, 33, 2)]
#[case(AluOp::Lui, 0, 0x1000, 0x1000_0000)]
#[case(AluOp::PassA, 42, 0, 42)]
fn single_word_results(#[case] op: AluOp, #[case] a: i32, #[case] b: i32, #[case] out: i32) {
    assert_eq!(Alu::execute(op, a, b), AluOutcome::Value(out));
}

#[rstest]
#[case(AluOp::Add, i32::MAX, 1)]
#[case(AluOp::Add, i32::MIN, -1)]
#[case(AluOp::Sub, i32::MIN, 1)]
#[case(AluOp::Sub, 0, i32::MIN)]
fn trapping_forms_report_overflow(#[case] op: AluOp, #[case] a: i32, #[case] b: i32) {
    assert_eq!(Alu::execute(op, a, b), AluOutcome::Overflow);
}

#[test]
fn multiply_splits_product_into_hi_lo() {
    assert_eq!(
        Alu::execute(AluOp::Mult, 0x1_0000, 0x1_0000),
        AluOutcome::HiLo { hi: 1, lo: 0 }
    );
    assert_eq!(
        Alu::execute(AluOp::Multu, -1, 2),
        AluOutcome::HiLo { hi: 1, lo: -2 }
    );
    assert_eq!(
        Alu::execute(AluOp::Mult, -1, 2),
        AluOutcome::HiLo { hi: -1, lo: -2 }
    );
}

#[test]
fn divide_places_quotient_in_lo_and_remainder_in_hi() {
    assert_eq!(
        Alu::execute(AluOp::Div, 7, 2),
        AluOutcome::HiLo { hi: 1, lo: 3 }
    );
    assert_eq!(
        Alu::execute(AluOp::Div, -7, 2),
        AluOutcome::HiLo { hi: -1, lo: -3 }
    );
    assert_eq!(
        Alu::execute(AluOp::Divu, -1, 2),
        AluOutcome::HiLo {
            hi: 1,
            lo: i32::MAX
        }
    );
    assert_eq!(
        Alu::execute(AluOp::Div, i32::MIN, -1),
        AluOutcome::HiLo {
            hi: 0,
            lo: i32::MIN
        }
    );
}

#[rstest]
#[case(AluOp::Div)]
#[case(AluOp::Divu)]
fn zero_divisor_is_reported(#[case] op: AluOp) {
    assert_eq!(Alu::execute(op, 10, 0), AluOutcome::DivideByZero);
}
