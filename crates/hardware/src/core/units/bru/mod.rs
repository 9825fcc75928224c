//! Branch Resolution Unit (BRU).
//!
//! Evaluates branch conditions and computes control-transfer targets in the
//! Execute stage. Branches are resolved in order; nothing is predicted.
//!
//! 1. **Conditions:** `BEQ`/`BNE` compare two registers, `BLEZ`/`BGTZ`/`BLTZ`/`BGEZ`
//!    compare one register against zero.
//! 2. **Branch Targets:** `PC + 4 + (sign_extend(offset) << 2)`.
//! 3. **Jump Targets:** `(PC & 0xF000_0000) | (target << 2)`.

use crate::common::constants::{INSTRUCTION_BYTES, JUMP_SEGMENT_MASK};
use crate::core::pipeline::signals::BranchCond;

/// Word-offset to byte-offset scaling of branch and jump fields.
const WORD_SHIFT: u32 = 2;

/// Branch resolution unit.
#[derive(Debug)]
pub struct BranchUnit;

impl BranchUnit {
    /// Evaluates a branch condition.
    ///
    /// # Arguments
    ///
    /// * `cond` - The condition encoded by the branch.
    /// * `a`    - Value of `rs`.
    /// * `b`    - Value of `rt` (ignored by the compare-with-zero forms).
    ///
    /// # Returns
    ///
    /// `true` if the branch is taken.
    pub const fn taken(cond: BranchCond, a: i32, b: i32) -> bool {
        match cond {
            BranchCond::Eq => a == b,
            BranchCond::Ne => a != b,
            BranchCond::Lez => a <= 0,
            BranchCond::Gtz => a > 0,
            BranchCond::Ltz => a < 0,
            BranchCond::Gez => a >= 0,
        }
    }

    /// Computes the target of a PC-relative branch.
    ///
    /// # Arguments
    ///
    /// * `pc`     - Address of the branch instruction.
    /// * `offset` - Sign-extended 16-bit word offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use mips_pipe_core::core::units::bru::BranchUnit;
    ///
    /// assert_eq!(BranchUnit::branch_target(0x0040_0000, 2), 0x0040_000C);
    /// assert_eq!(BranchUnit::branch_target(0x0040_0010, -1), 0x0040_0010);
    /// ```
    pub const fn branch_target(pc: u32, offset: i32) -> u32 {
        pc.wrapping_add(INSTRUCTION_BYTES)
            .wrapping_add((offset << WORD_SHIFT) as u32)
    }

    /// Computes the target of a `J`/`JAL`.
    ///
    /// # Arguments
    ///
    /// * `pc`     - Address of the jump instruction.
    /// * `target` - 26-bit target field.
    pub const fn jump_target(pc: u32, target: u32) -> u32 {
        (pc & JUMP_SEGMENT_MASK) | (target << WORD_SHIFT)
    }
}
