use mips_pipe_core::Simulator;
use mips_pipe_core::common::error::DiagnosticKind;
use mips_pipe_core::config::Config;
use mips_pipe_core::core::Cpu;
use mips_pipe_core::core::cpu::HaltReason;

/// Base address of the default text region.
pub const TEXT_BASE: u32 = 0x0040_0000;

/// Base address of the default data region.
pub const DATA_BASE: u32 = 0x1000_0000;

/// Upper bound on cycles for `run_to_completion` in tests.
const CYCLE_LIMIT: u64 = 10_000;

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// Builds a simulator with the default memory map and `program` at the text base.
    pub fn new(program: &[u32]) -> Self {
        Self::with_config(Config::default(), program)
    }

    pub fn with_config(config: Config, program: &[u32]) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();

        let sim = Simulator::new(config, program.to_vec()).expect("test program must load");
        Self { sim }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Set a general-purpose register value in both state generations.
    pub fn set_reg(&mut self, reg: usize, val: i32) -> &mut Self {
        self.sim.set_register(reg, val).expect("valid register");
        self
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> i32 {
        self.sim.registers()[reg]
    }

    /// Run the simulator for a specific number of cycles.
    pub fn run(&mut self, cycles: u64) -> &mut Self {
        let _ = self.sim.run(cycles);
        self
    }

    /// Run until halt, failing the test if the program does not stop.
    pub fn finish(&mut self) -> &mut Self {
        let done = self.sim.run(CYCLE_LIMIT);
        assert!(done < CYCLE_LIMIT, "program did not halt within {CYCLE_LIMIT} cycles");
        self
    }

    pub fn cycles(&self) -> u64 {
        self.sim.cycle_count()
    }

    pub fn retired(&self) -> u64 {
        self.sim.instruction_count()
    }

    pub fn halt(&self) -> Option<HaltReason> {
        self.sim.halt_reason().copied()
    }

    /// Kind of the fault that halted the simulator, if any.
    pub fn fault_kind(&self) -> Option<DiagnosticKind> {
        match self.halt() {
            Some(HaltReason::Fault(diag)) => Some(diag.kind),
            _ => None,
        }
    }

    /// Reads one word of memory.
    pub fn word(&self, addr: u32) -> u32 {
        self.sim.read_memory(addr, addr).expect("mapped address")[0].1
    }
}
