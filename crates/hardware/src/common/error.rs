//! Simulator errors and pipeline diagnostics.
//!
//! This module defines the two error families used by the simulator:
//! 1. **Host Errors:** `SimError` covers failures outside the simulated machine
//!    (program loading, configuration, register validation).
//! 2. **Pipeline Diagnostics:** `Diagnostic` records a condition raised by an
//!    instruction in flight (memory fault, overflow, illegal encoding, divide by zero),
//!    tagged with the stage, PC, and raw word that produced it.

use std::fmt;

use thiserror::Error;

/// Pipeline stage that detected a diagnostic condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Instruction fetch (IF).
    Fetch,
    /// Instruction decode and register read (ID).
    Decode,
    /// Execute (EX).
    Execute,
    /// Data memory access (MEM).
    Memory,
    /// Register writeback (WB).
    Writeback,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
            Self::Writeback => "WB",
        };
        f.write_str(name)
    }
}

/// Kind of memory access that faulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Instruction fetch.
    Fetch,
    /// Data load.
    Load,
    /// Data store.
    Store,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Load => "load",
            Self::Store => "store",
        };
        f.write_str(name)
    }
}

/// Reason a memory access could not be performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryFault {
    /// The access touches an address outside every configured region.
    #[error("unmapped address {addr:#010x}")]
    Unmapped {
        /// First byte address of the access.
        addr: u32,
    },

    /// The address is not a multiple of the access width.
    #[error("misaligned {width}-byte access at {addr:#010x}")]
    Misaligned {
        /// First byte address of the access.
        addr: u32,
        /// Access width in bytes.
        width: u32,
    },
}

/// Condition raised by an instruction while it moves through the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A fetch, load, or store could not be performed.
    #[error("{access} fault: {fault}")]
    MemoryFault {
        /// Which kind of access faulted.
        access: AccessKind,
        /// Why it faulted.
        fault: MemoryFault,
    },

    /// `ADD`, `ADDI`, or `SUB` produced a result outside the signed 32-bit range.
    #[error("signed arithmetic overflow")]
    ArithmeticOverflow,

    /// The `(opcode, funct)` pair does not name a supported instruction.
    #[error("illegal instruction")]
    IllegalInstruction,

    /// `DIV` or `DIVU` with a zero divisor. HI and LO are left unchanged.
    #[error("division by zero, HI/LO left unchanged")]
    DivideByZero,
}

impl DiagnosticKind {
    /// Returns `true` if the condition halts the simulator.
    ///
    /// Division by zero is the only non-fatal condition: it is reported and
    /// execution continues.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::DivideByZero)
    }
}

/// Structured record of a pipeline condition.
///
/// Fatal diagnostics travel with the faulting instruction through the latches and
/// are raised when it reaches writeback, so every older instruction has retired and
/// no younger one has committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("[{stage}] pc={pc:#010x} inst={raw:#010x}: {kind}")]
pub struct Diagnostic {
    /// Stage that detected the condition.
    pub stage: Stage,
    /// Address of the offending instruction.
    pub pc: u32,
    /// Raw encoding of the offending instruction.
    pub raw: u32,
    /// What went wrong.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic for the instruction at `pc` with encoding `raw`.
    pub const fn new(stage: Stage, pc: u32, raw: u32, kind: DiagnosticKind) -> Self {
        Self {
            stage,
            pc,
            raw,
            kind,
        }
    }

    /// Creates a memory-fault diagnostic.
    pub const fn memory(
        stage: Stage,
        pc: u32,
        raw: u32,
        access: AccessKind,
        fault: MemoryFault,
    ) -> Self {
        Self::new(stage, pc, raw, DiagnosticKind::MemoryFault { access, fault })
    }
}

/// Errors reported to the host (shell, loader, configuration, API misuse).
#[derive(Debug, Error)]
pub enum SimError {
    /// The program file could not be opened or read.
    #[error("could not read program file '{path}': {source}")]
    ProgramIo {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A token in the program file is not a 32-bit hexadecimal word.
    #[error("line {line}: '{token}' is not a 32-bit hexadecimal word")]
    ProgramParse {
        /// 1-based line number of the token.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The program image is larger than the text region.
    #[error("program of {words} words does not fit in the text region ({capacity} words)")]
    ProgramTooLarge {
        /// Number of words in the image.
        words: usize,
        /// Number of words the text region can hold.
        capacity: usize,
    },

    /// A register index outside `0..=31` was supplied.
    #[error("register index {0} is out of range (expected 0-31)")]
    InvalidRegister(usize),

    /// The memory map or text base is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration document could not be parsed.
    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A host-side memory access (e.g. `mdump`) touched an invalid address.
    #[error(transparent)]
    Memory(#[from] MemoryFault),
}
