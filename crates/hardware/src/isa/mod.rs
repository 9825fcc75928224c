//! MIPS instruction set definitions.
//!
//! This module describes the MU-MIPS instruction subset. It provides:
//! 1. **Encoding:** Field positions and the `InstructionBits` extraction trait.
//! 2. **Constants:** Primary opcodes, REGIMM selectors, and SPECIAL function codes.
//! 3. **Decoding:** The `(opcode, funct)` dispatch table and instruction classes.
//! 4. **Disassembly:** Assembler-style rendering for the shell and trace output.

/// Instruction decoder and operation table.
pub mod decode;

/// Disassembler.
pub mod disasm;

/// SPECIAL function codes.
pub mod funct;

/// Field extraction and the decoded instruction view.
pub mod instruction;

/// Primary opcodes.
pub mod opcodes;

pub use decode::{InstrClass, Op};
pub use instruction::{Instruction, InstructionBits};
