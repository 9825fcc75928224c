//! ALU arithmetic operations.
//!
//! Implements 32-bit addition and subtraction in both the trapping (`ADD`, `ADDI`,
//! `SUB`) and wrapping (`ADDU`, `ADDIU`, `SUBU`) forms, plus `LUI`. The two forms
//! produce the same bit pattern; only the trapping form reports signed overflow.

use super::AluOutcome;
use crate::core::pipeline::signals::AluOp;

/// Bit position of the upper halfword loaded by `LUI`.
const UPPER_HALF_SHIFT: u32 = 16;

/// Executes an arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand (the zero-extended immediate for `Lui`).
///
/// # Returns
///
/// `Value` on success, `Overflow` for a trapping operation whose signed result
/// does not fit in 32 bits. Returns `Value(0)` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutcome {
    match op {
        AluOp::Add => a
            .checked_add(b)
            .map_or(AluOutcome::Overflow, AluOutcome::Value),
        AluOp::Addu => AluOutcome::Value(a.wrapping_add(b)),
        AluOp::Sub => a
            .checked_sub(b)
            .map_or(AluOutcome::Overflow, AluOutcome::Value),
        AluOp::Subu => AluOutcome::Value(a.wrapping_sub(b)),
        AluOp::Lui => AluOutcome::Value(((b as u32) << UPPER_HALF_SHIFT) as i32),
        _ => AluOutcome::Value(0),
    }
}
