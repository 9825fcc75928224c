//! Simulator: owns the CPU and the loaded program image.
//!
//! The shell and the tests drive the machine exclusively through this type. It provides:
//! 1. **Lifecycle:** Construction from a configuration and a program image, and `reset`,
//!    which restores the freshly-loaded state.
//! 2. **Run Control:** Single cycles, bounded runs, and runs to completion, all of which
//!    respect the run flag.
//! 3. **State Access:** Register, HI/LO, PC, counter, memory, and latch inspection, plus
//!    the host-side register writes used by the `input`/`high`/`low` commands.
//! 4. **Dumps:** Text renderings of registers, memory, latches, and the program listing.

use std::fmt::Write as _;

use crate::common::constants::{INSTRUCTION_BYTES, REG_COUNT};
use crate::common::error::{Diagnostic, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::HaltReason;
use crate::core::pipeline::latches::Latches;
use crate::isa::disasm::disassemble_at;
use crate::stats::SimStats;

const RULE: &str = "-------------------------------------";

/// Top-level simulator: CPU state plus the program image it reloads on reset.
#[derive(Debug)]
pub struct Simulator {
    /// CPU context (state generations, latches, memory, counters).
    pub cpu: Cpu,
    program: Vec<u32>,
    config: Config,
}

impl Simulator {
    /// Creates a simulator and loads `program` at the text base.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory map and general settings; validated here.
    /// * `program` - Instruction words, loaded contiguously.
    ///
    /// # Returns
    ///
    /// The ready-to-run simulator, or `SimError::Config` / `SimError::ProgramTooLarge`.
    pub fn new(config: Config, program: Vec<u32>) -> Result<Self, SimError> {
        config.validate()?;
        let cpu = Cpu::new(&config);
        let capacity = cpu.text_capacity_words();
        if program.len() > capacity {
            return Err(SimError::ProgramTooLarge {
                words: program.len(),
                capacity,
            });
        }

        let mut sim = Self {
            cpu,
            program,
            config,
        };
        sim.load_image()?;
        Ok(sim)
    }

    /// Creates a simulator with the default MU-MIPS memory map.
    pub fn with_program(program: Vec<u32>) -> Result<Self, SimError> {
        Self::new(Config::default(), program)
    }

    fn load_image(&mut self) -> Result<(), SimError> {
        let base = self.cpu.text_base;
        self.cpu.memory.load_words(base, &self.program)?;
        self.cpu.program_end =
            base.wrapping_add(INSTRUCTION_BYTES * self.program.len() as u32);
        Ok(())
    }

    /// Restores the freshly-loaded state.
    ///
    /// Registers, HI/LO, memory, latches, and counters are zeroed, the program is
    /// reloaded, the PC returns to the text base, and the run flag is set. Calling
    /// `reset` twice is the same as calling it once.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.cpu.reset();
        self.load_image()?;
        tracing::debug!(words = self.program.len(), "simulator reset");
        Ok(())
    }

    /// Advances one cycle if the run flag is set.
    ///
    /// # Returns
    ///
    /// `true` if a cycle was executed.
    pub fn cycle(&mut self) -> bool {
        self.cpu.cycle()
    }

    /// Advances up to `cycles` cycles, stopping early when the run flag clears.
    ///
    /// # Returns
    ///
    /// The number of cycles actually executed.
    pub fn run(&mut self, cycles: u64) -> u64 {
        let mut done = 0;
        while done < cycles && self.cpu.cycle() {
            done += 1;
        }
        done
    }

    /// Runs until the run flag clears.
    ///
    /// # Returns
    ///
    /// The number of cycles executed.
    pub fn run_to_completion(&mut self) -> u64 {
        let mut done = 0;
        while self.cpu.cycle() {
            done += 1;
        }
        done
    }

    /// Writes a general-purpose register in both state generations.
    ///
    /// Writes to `$0` are accepted and ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index, `0..=31`.
    /// * `value` - New value.
    pub fn set_register(&mut self, idx: usize, value: i32) -> Result<(), SimError> {
        if idx >= REG_COUNT {
            return Err(SimError::InvalidRegister(idx));
        }
        self.cpu.current.regs.write(idx, value);
        self.cpu.next.regs.write(idx, value);
        Ok(())
    }

    /// Writes HI in both state generations.
    pub fn set_hi(&mut self, value: i32) {
        self.cpu.current.hi = value;
        self.cpu.next.hi = value;
    }

    /// Writes LO in both state generations.
    pub fn set_lo(&mut self, value: i32) {
        self.cpu.current.lo = value;
        self.cpu.next.lo = value;
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.cpu.current.pc
    }

    /// Reads a general-purpose register.
    pub fn register(&self, idx: usize) -> Result<i32, SimError> {
        if idx >= REG_COUNT {
            return Err(SimError::InvalidRegister(idx));
        }
        Ok(self.cpu.current.regs.read(idx))
    }

    /// Snapshot of all 32 general-purpose registers.
    pub fn registers(&self) -> [i32; REG_COUNT] {
        self.cpu.current.regs.snapshot()
    }

    /// Current HI.
    pub fn hi(&self) -> i32 {
        self.cpu.current.hi
    }

    /// Current LO.
    pub fn lo(&self) -> i32 {
        self.cpu.current.lo
    }

    /// Cycles executed since the last reset.
    pub fn cycle_count(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Instructions retired since the last reset.
    pub fn instruction_count(&self) -> u64 {
        self.cpu.stats.instructions_retired
    }

    /// `true` while the simulator may run.
    pub fn is_running(&self) -> bool {
        self.cpu.run_flag
    }

    /// Why the simulator stopped, if it has.
    pub fn halt_reason(&self) -> Option<&HaltReason> {
        self.cpu.halt.as_ref()
    }

    /// Every diagnostic raised since the last reset.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.cpu.diagnostics
    }

    /// Performance counters.
    pub fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// The four pipeline latches as of the last completed cycle.
    pub fn latches(&self) -> &Latches {
        &self.cpu.latches
    }

    /// The loaded program image.
    pub fn program(&self) -> &[u32] {
        &self.program
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the words from `start` through `stop` inclusive.
    pub fn read_memory(&self, start: u32, stop: u32) -> Result<Vec<(u32, u32)>, SimError> {
        Ok(self.cpu.memory.read_range(start, stop)?)
    }

    /// Renders the counters, PC, the 32 registers, HI, and LO.
    pub fn register_dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "Dumping Register Content");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "# Instructions Executed\t: {}", self.instruction_count());
        let _ = writeln!(out, "# Cycles Executed\t: {}", self.cycle_count());
        let _ = writeln!(out, "PC\t: {:#010x}", self.pc());
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "[Register]\t[Value]");
        let _ = writeln!(out, "{RULE}");
        for (idx, value) in self.registers().iter().enumerate() {
            let _ = writeln!(out, "[R{idx}]\t: {:#010x}", *value as u32);
        }
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "[HI]\t: {:#010x}", self.hi() as u32);
        let _ = writeln!(out, "[LO]\t: {:#010x}", self.lo() as u32);
        let _ = writeln!(out, "{RULE}");
        out
    }

    /// Renders the words from `start` through `stop` inclusive.
    pub fn memory_dump(&self, start: u32, stop: u32) -> Result<String, SimError> {
        let words = self.read_memory(start, stop)?;
        let mut out = String::new();
        let _ = writeln!(out, "{RULE}{RULE}");
        let _ = writeln!(out, "Memory content [{start:#010x}..{stop:#010x}] :");
        let _ = writeln!(out, "{RULE}{RULE}");
        let _ = writeln!(out, "\t[Address in Hex (Dec) ]\t[Value]");
        for (addr, word) in words {
            let _ = writeln!(out, "\t{addr:#010x} ({addr}) :\t{word:#010x}");
        }
        Ok(out)
    }

    /// Renders the disassembly of the loaded program.
    pub fn program_listing(&self) -> String {
        let mut out = String::new();
        let mut pc = self.cpu.text_base;
        for &raw in &self.program {
            let _ = writeln!(out, "{pc:#010x}:\t{raw:#010x}\t{}", disassemble_at(raw, pc));
            pc = pc.wrapping_add(INSTRUCTION_BYTES);
        }
        out
    }

    /// Renders the contents of the four pipeline latches.
    pub fn pipeline_dump(&self) -> String {
        let l = &self.cpu.latches;
        let mut out = String::new();
        let _ = writeln!(out, "Current PC\t: {:#010x}", self.pc());

        let _ = writeln!(out, "IF/ID.valid\t: {}", l.if_id.valid);
        let _ = writeln!(out, "IF/ID.PC\t: {:#010x}", l.if_id.pc);
        let _ = writeln!(out, "IF/ID.IR\t: {:#010x}", l.if_id.raw);

        let _ = writeln!(out, "ID/EX.valid\t: {}", l.id_ex.valid);
        let _ = writeln!(out, "ID/EX.IR\t: {:#010x}", l.id_ex.raw);
        let _ = writeln!(out, "ID/EX.A\t\t: {:#010x}", l.id_ex.a as u32);
        let _ = writeln!(out, "ID/EX.B\t\t: {:#010x}", l.id_ex.b as u32);
        let _ = writeln!(out, "ID/EX.imm\t: {:#010x}", l.id_ex.imm as u32);

        let _ = writeln!(out, "EX/MEM.valid\t: {}", l.ex_mem.valid);
        let _ = writeln!(out, "EX/MEM.IR\t: {:#010x}", l.ex_mem.raw);
        let _ = writeln!(out, "EX/MEM.ALUOutput: {:#010x}", l.ex_mem.alu as u32);
        let _ = writeln!(out, "EX/MEM.B\t: {:#010x}", l.ex_mem.store_data as u32);

        let _ = writeln!(out, "MEM/WB.valid\t: {}", l.mem_wb.valid);
        let _ = writeln!(out, "MEM/WB.IR\t: {:#010x}", l.mem_wb.raw);
        let _ = writeln!(out, "MEM/WB.value\t: {:#010x}", l.mem_wb.value as u32);
        out
    }
}
