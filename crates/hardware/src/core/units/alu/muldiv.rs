//! ALU multiply and divide operations.
//!
//! `MULT`/`MULTU` place the 64-bit product in HI:LO. `DIV`/`DIVU` place the
//! quotient in LO and the remainder in HI. A zero divisor is reported as
//! `DivideByZero` and leaves the caller to decide what HI/LO hold; the pipeline
//! leaves them unchanged. `i32::MIN / -1` wraps to `i32::MIN` with remainder 0.

use super::AluOutcome;
use crate::core::pipeline::signals::AluOp;

/// Width of one register half of the 64-bit product.
const WORD_BITS: u32 = 32;

/// Executes a multiply or divide.
///
/// # Arguments
///
/// * `op` - `Mult`, `Multu`, `Div`, or `Divu`.
/// * `a`  - Multiplicand or dividend (`rs`).
/// * `b`  - Multiplier or divisor (`rt`).
///
/// # Returns
///
/// `HiLo` with the result halves, or `DivideByZero`.
pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutcome {
    match op {
        AluOp::Mult => split(i64::from(a).wrapping_mul(i64::from(b)) as u64),
        AluOp::Multu => split(u64::from(a as u32) * u64::from(b as u32)),
        AluOp::Div => {
            if b == 0 {
                AluOutcome::DivideByZero
            } else {
                AluOutcome::HiLo {
                    hi: a.wrapping_rem(b),
                    lo: a.wrapping_div(b),
                }
            }
        }
        AluOp::Divu => {
            let (n, d) = (a as u32, b as u32);
            if d == 0 {
                AluOutcome::DivideByZero
            } else {
                AluOutcome::HiLo {
                    hi: (n % d) as i32,
                    lo: (n / d) as i32,
                }
            }
        }
        _ => AluOutcome::HiLo { hi: 0, lo: 0 },
    }
}

/// Splits a 64-bit product into HI and LO.
const fn split(product: u64) -> AluOutcome {
    AluOutcome::HiLo {
        hi: (product >> WORD_BITS) as i32,
        lo: product as i32,
    }
}
