//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. It is a
//! stateless function of an operation selector and two 32-bit operands.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Addu, Sub, Subu, Lui
//! - [`logic`]:      And, Or, Xor, Nor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra
//! - [`muldiv`]:     Mult, Multu, Div, Divu

/// Integer addition and subtraction (trapping and wrapping forms).
pub mod arithmetic;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Multiply and divide into HI/LO.
pub mod muldiv;

/// Shift operations.
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Result of one ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOutcome {
    /// A 32-bit result for the destination register.
    Value(i32),
    /// A 64-bit result split across HI and LO.
    HiLo {
        /// High word (product high half, or remainder).
        hi: i32,
        /// Low word (product low half, or quotient).
        lo: i32,
    },
    /// Signed overflow in a trapping operation.
    Overflow,
    /// Divide with a zero divisor.
    DivideByZero,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// Dispatches to the appropriate submodule based on the operation type.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform.
    /// * `a`  - First operand (value to shift for shift operations).
    /// * `b`  - Second operand (shift amount for shift operations).
    ///
    /// # Returns
    ///
    /// The outcome of the operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mips_pipe_core::core::units::alu::{Alu, AluOutcome};
    /// use mips_pipe_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 5, 7), AluOutcome::Value(12));
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), AluOutcome::Overflow);
    /// assert_eq!(Alu::execute(AluOp::Addu, i32::MAX, 1), AluOutcome::Value(i32::MIN));
    /// assert_eq!(Alu::execute(AluOp::Mult, -2, 3), AluOutcome::HiLo { hi: -1, lo: -6 });
    /// ```
    pub fn execute(op: AluOp, a: i32, b: i32) -> AluOutcome {
        match op {
            AluOp::Add | AluOp::Addu | AluOp::Sub | AluOp::Subu | AluOp::Lui => {
                arithmetic::execute(op, a, b)
            }

            AluOp::And | AluOp::Or | AluOp::Xor | AluOp::Nor | AluOp::Slt | AluOp::Sltu => {
                AluOutcome::Value(logic::execute(op, a, b))
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra => AluOutcome::Value(shifts::execute(op, a, b)),

            AluOp::Mult | AluOp::Multu | AluOp::Div | AluOp::Divu => muldiv::execute(op, a, b),

            AluOp::PassA => AluOutcome::Value(a),
        }
    }
}
