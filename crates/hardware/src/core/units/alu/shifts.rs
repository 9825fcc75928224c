//! ALU shift operations.
//!
//! Shift amounts are masked to five bits, so `SLLV` with a register value of 33
//! shifts by 1, matching the hardware.

use crate::core::pipeline::signals::AluOp;

/// Mask for a 32-bit shift amount.
const SHIFT_MASK: i32 = 0x1F;

/// Executes a shift.
///
/// # Arguments
///
/// * `op`  - `Sll`, `Srl`, or `Sra`.
/// * `val` - Value to shift.
/// * `amt` - Shift amount (low five bits used).
///
/// # Returns
///
/// The shifted value. `Sra` replicates the sign bit. Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, val: i32, amt: i32) -> i32 {
    let amt = (amt & SHIFT_MASK) as u32;
    match op {
        AluOp::Sll => ((val as u32) << amt) as i32,
        AluOp::Srl => ((val as u32) >> amt) as i32,
        AluOp::Sra => val >> amt,
        _ => 0,
    }
}
