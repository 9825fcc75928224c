//! ALU logical and comparison operations.

use crate::core::pipeline::signals::AluOp;

/// Executes a bitwise or set-on-less-than operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform.
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The result, `0`/`1` for comparisons. Returns `0` for non-logic opcodes.
pub fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Nor => !(a | b),
        AluOp::Slt => i32::from(a < b),
        AluOp::Sltu => i32::from((a as u32) < (b as u32)),
        _ => 0,
    }
}
