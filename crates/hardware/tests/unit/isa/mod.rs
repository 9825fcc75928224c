//! Unit tests for the instruction set tables.
//!
//! This module aggregates tests for:
//! - Instruction field extraction and re-encoding.
//! - The `(opcode, funct)` decode table.
//! - Disassembler output.

pub mod disasm;
