//! Hazard Detection Unit.
//!
//! This module implements the logic that keeps overlapped execution correct without
//! forwarding paths. It provides:
//! 1. **Source Analysis:** Which registers (including HI and LO) an instruction reads in decode.
//! 2. **RAW Detection:** Whether any of those registers is still the destination of an
//!    unretired instruction in ID/EX, EX/MEM, or MEM/WB. Decode stalls until none is.
//!
//! Branch squashing is driven by the execute stage's redirect signal and applied by the
//! decode and fetch stages; see [`crate::core::pipeline::stages`].

use crate::common::constants::{REG_V0, REG_ZERO};
use crate::common::error::Stage;
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::traits::{PendingWrite, PipelineLatch};
use crate::isa::decode::Op;
use crate::isa::instruction::Instruction;

/// A register read in decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    /// General-purpose register.
    Gpr(usize),
    /// The HI register.
    Hi,
    /// The LO register.
    Lo,
}

/// Registers an instruction reads in decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sources {
    /// First general-purpose source (usually `rs`).
    pub first: Option<usize>,
    /// Second general-purpose source (usually `rt`).
    pub second: Option<usize>,
    /// Reads HI.
    pub hi: bool,
    /// Reads LO.
    pub lo: bool,
}

impl Sources {
    /// Computes the registers `op` reads.
    ///
    /// # Arguments
    ///
    /// * `op` - Decoded operation.
    /// * `inst` - Field view of the instruction word.
    pub fn of(op: Op, inst: &Instruction) -> Self {
        let none = Self::default();
        let rs = Some(inst.rs);
        let rt = Some(inst.rt);
        match op {
            Op::Sll | Op::Srl | Op::Sra => Self { first: rt, ..none },
            Op::Mfhi => Self { hi: true, ..none },
            Op::Mflo => Self { lo: true, ..none },
            Op::Syscall => Self {
                first: Some(REG_V0),
                ..none
            },
            Op::Lui | Op::J | Op::Jal => none,
            Op::Jr
            | Op::Jalr
            | Op::Mthi
            | Op::Mtlo
            | Op::Addi
            | Op::Addiu
            | Op::Slti
            | Op::Sltiu
            | Op::Andi
            | Op::Ori
            | Op::Xori
            | Op::Lb
            | Op::Lbu
            | Op::Lh
            | Op::Lhu
            | Op::Lw
            | Op::Blez
            | Op::Bgtz
            | Op::Bltz
            | Op::Bgez => Self { first: rs, ..none },
            _ => Self {
                first: rs,
                second: rt,
                ..none
            },
        }
    }

    /// Returns the first source that `write` will overwrite, if any.
    ///
    /// `$0` never creates a dependency.
    pub fn conflict(&self, write: PendingWrite) -> Option<Resource> {
        if let Some(dest) = write.gpr.filter(|&d| d != REG_ZERO) {
            if self.first == Some(dest) || self.second == Some(dest) {
                return Some(Resource::Gpr(dest));
            }
        }
        if self.hi && write.hi {
            return Some(Resource::Hi);
        }
        if self.lo && write.lo {
            return Some(Resource::Lo);
        }
        None
    }
}

/// A detected read-after-write dependency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawHazard {
    /// The register being waited on.
    pub resource: Resource,
    /// Stage the producing instruction is about to occupy.
    pub producer: Stage,
}

/// Finds the nearest in-flight producer of any register in `sources`.
///
/// The latches are the values at the start of the cycle: ID/EX feeds execute,
/// EX/MEM feeds memory, and MEM/WB feeds writeback. Writeback commits into the
/// next state generation, so an instruction in MEM/WB still blocks a reader this
/// cycle.
///
/// # Arguments
///
/// * `sources` - Registers the decoding instruction reads.
/// * `latches` - Pipeline latches as of the start of the cycle.
///
/// # Returns
///
/// The first conflicting producer, or `None` if decode may proceed.
///
/// # Examples
///
/// ```
/// use mips_pipe_core::core::pipeline::hazards::{find_raw_hazard, Resource, Sources};
/// use mips_pipe_core::core::pipeline::latches::{Latches, MemWbEntry};
///
/// let mut latches = Latches::default();
/// latches.mem_wb = MemWbEntry { valid: true, dest: 4, write_enable: true, ..Default::default() };
/// let reads_r4 = Sources { first: Some(4), ..Default::default() };
///
/// let hazard = find_raw_hazard(&reads_r4, &latches).unwrap();
/// assert_eq!(hazard.resource, Resource::Gpr(4));
/// ```
pub fn find_raw_hazard(sources: &Sources, latches: &Latches) -> Option<RawHazard> {
    let in_flight: [(Stage, PendingWrite); 3] = [
        (Stage::Execute, latches.id_ex.pending_write()),
        (Stage::Memory, latches.ex_mem.pending_write()),
        (Stage::Writeback, latches.mem_wb.pending_write()),
    ];
    in_flight.into_iter().find_map(|(producer, write)| {
        sources
            .conflict(write)
            .map(|resource| RawHazard { resource, producer })
    })
}

/// Returns `true` if decode must stall this cycle.
pub fn need_stall_raw(sources: &Sources, latches: &Latches) -> bool {
    find_raw_hazard(sources, latches).is_some()
}
