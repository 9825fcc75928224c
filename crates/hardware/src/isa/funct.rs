//! SPECIAL function codes (bits 5-0 when the opcode is 0).

/// Shift left logical.
pub const SLL: u32 = 0x00;
/// Shift right logical.
pub const SRL: u32 = 0x02;
/// Shift right arithmetic.
pub const SRA: u32 = 0x03;
/// Shift left logical variable.
pub const SLLV: u32 = 0x04;
/// Shift right logical variable.
pub const SRLV: u32 = 0x06;
/// Shift right arithmetic variable.
pub const SRAV: u32 = 0x07;
/// Jump register.
pub const JR: u32 = 0x08;
/// Jump and link register.
pub const JALR: u32 = 0x09;
/// System call.
pub const SYSCALL: u32 = 0x0C;
/// Move from HI.
pub const MFHI: u32 = 0x10;
/// Move to HI.
pub const MTHI: u32 = 0x11;
/// Move from LO.
pub const MFLO: u32 = 0x12;
/// Move to LO.
pub const MTLO: u32 = 0x13;
/// Multiply (signed).
pub const MULT: u32 = 0x18;
/// Multiply unsigned.
pub const MULTU: u32 = 0x19;
/// Divide (signed).
pub const DIV: u32 = 0x1A;
/// Divide unsigned.
pub const DIVU: u32 = 0x1B;
/// Add (trapping).
pub const ADD: u32 = 0x20;
/// Add unsigned (non-trapping).
pub const ADDU: u32 = 0x21;
/// Subtract (trapping).
pub const SUB: u32 = 0x22;
/// Subtract unsigned (non-trapping).
pub const SUBU: u32 = 0x23;
/// Bitwise AND.
pub const AND: u32 = 0x24;
/// Bitwise OR.
pub const OR: u32 = 0x25;
/// Bitwise XOR.
pub const XOR: u32 = 0x26;
/// Bitwise NOR.
pub const NOR: u32 = 0x27;
/// Set on less than.
pub const SLT: u32 = 0x2A;
/// Set on less than unsigned.
pub const SLTU: u32 = 0x2B;
