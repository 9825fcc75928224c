//! Instruction encoding and field extraction.
//!
//! Provides the bit positions of the MIPS32 instruction fields, a trait that
//! extracts each field from a raw word already shifted down to its natural range,
//! and the immutable `Instruction` view built from those fields.
//!
//! ```text
//!  31    26 25   21 20   16 15   11 10    6 5     0
//! | opcode |  rs   |  rt   |  rd   | shamt | funct |   R-type
//! | opcode |  rs   |  rt   |      immediate        |   I-type
//! | opcode |             target                    |   J-type
//! ```

/// Bit position of the opcode field.
pub const OPCODE_SHIFT: u32 = 26;
/// Bit position of the `rs` field.
pub const RS_SHIFT: u32 = 21;
/// Bit position of the `rt` field.
pub const RT_SHIFT: u32 = 16;
/// Bit position of the `rd` field.
pub const RD_SHIFT: u32 = 11;
/// Bit position of the `shamt` field.
pub const SHAMT_SHIFT: u32 = 6;

/// Mask for the 6-bit opcode after shifting.
pub const OPCODE_MASK: u32 = 0x3F;
/// Mask for a 5-bit register field after shifting.
pub const REG_MASK: u32 = 0x1F;
/// Mask for the 5-bit shift amount after shifting.
pub const SHAMT_MASK: u32 = 0x1F;
/// Mask for the 6-bit function code.
pub const FUNCT_MASK: u32 = 0x3F;
/// Mask for the 16-bit immediate.
pub const IMM_MASK: u32 = 0xFFFF;
/// Mask for the 26-bit jump target.
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Every accessor returns the field shifted down to bit 0, so `opcode()` is a
/// value in `0..64` and never the raw in-place bit pattern.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31-26).
    fn opcode(&self) -> u32;

    /// Extracts the first source register field (bits 25-21).
    fn rs(&self) -> usize;

    /// Extracts the second source / I-type destination field (bits 20-16).
    fn rt(&self) -> usize;

    /// Extracts the R-type destination register field (bits 15-11).
    fn rd(&self) -> usize;

    /// Extracts the shift amount (bits 10-6).
    fn shamt(&self) -> u32;

    /// Extracts the R-type function code (bits 5-0).
    fn funct(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 15-0).
    fn imm(&self) -> u16;

    /// Extracts the 26-bit jump target (bits 25-0).
    fn target(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & SHAMT_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm(&self) -> u16 {
        (self & IMM_MASK) as u16
    }

    #[inline(always)]
    fn target(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Decoded view of a 32-bit instruction word.
///
/// The immediate and target overlap the register fields; all views are kept so
/// downstream stages pick whichever the instruction format uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Primary opcode (0-63).
    pub opcode: u32,
    /// First source register.
    pub rs: usize,
    /// Second source register, or I-type destination.
    pub rt: usize,
    /// R-type destination register.
    pub rd: usize,
    /// Shift amount (0-31).
    pub shamt: u32,
    /// R-type function code (0-63).
    pub funct: u32,
    /// Raw 16-bit immediate.
    pub imm: u16,
    /// 26-bit jump target.
    pub target: u32,
    /// Original encoding.
    pub raw: u32,
}

impl Instruction {
    /// Splits a raw word into its fields.
    pub fn from_raw(raw: u32) -> Self {
        Self {
            opcode: raw.opcode(),
            rs: raw.rs(),
            rt: raw.rt(),
            rd: raw.rd(),
            shamt: raw.shamt(),
            funct: raw.funct(),
            imm: raw.imm(),
            target: raw.target(),
            raw,
        }
    }

    /// Sign-extended immediate (`ADDI`, `SLTI`, loads, stores, branches).
    pub const fn simm(&self) -> i32 {
        self.imm as i16 as i32
    }

    /// Zero-extended immediate (`ANDI`, `ORI`, `XORI`, `LUI`).
    pub const fn zimm(&self) -> i32 {
        self.imm as i32
    }

    /// Reassembles the word from the R-type field view.
    ///
    /// Because the R-type fields tile all 32 bits, this reproduces `raw` exactly
    /// for every encoding.
    pub const fn encode(&self) -> u32 {
        ((self.opcode & OPCODE_MASK) << OPCODE_SHIFT)
            | ((self.rs as u32 & REG_MASK) << RS_SHIFT)
            | ((self.rt as u32 & REG_MASK) << RT_SHIFT)
            | ((self.rd as u32 & REG_MASK) << RD_SHIFT)
            | ((self.shamt & SHAMT_MASK) << SHAMT_SHIFT)
            | (self.funct & FUNCT_MASK)
    }
}
