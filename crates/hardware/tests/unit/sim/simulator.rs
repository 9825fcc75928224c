//! Simulator facade tests.

use mips_pipe_core::Simulator;
use mips_pipe_core::common::error::SimError;
use mips_pipe_core::config::{Config, RegionConfig};
use mips_pipe_core::core::pipeline::latches::Latches;
use pretty_assertions::assert_eq;

use crate::common::harness::{DATA_BASE, TEXT_BASE};
use crate::common::{Asm, TestContext};

fn program() -> Vec<u32> {
    vec![Asm::addi(1, 0, 5), Asm::addi(2, 1, 7), Asm::sw(2, 0, 3)]
}

#[test]
fn fresh_simulator_points_at_text_base() {
    let sim = Simulator::with_program(program()).expect("loads");
    assert_eq!(sim.pc(), TEXT_BASE);
    assert!(sim.is_running());
    assert_eq!(sim.cycle_count(), 0);
    assert_eq!(sim.registers(), [0; 32]);
    assert_eq!(
        sim.read_memory(TEXT_BASE, TEXT_BASE + 8).expect("mapped"),
        vec![
            (TEXT_BASE, program()[0]),
            (TEXT_BASE + 4, program()[1]),
            (TEXT_BASE + 8, program()[2]),
        ]
    );
}

#[test]
fn reset_restores_freshly_loaded_state() {
    let mut ctx = TestContext::new(&program());
    ctx.set_reg(3, DATA_BASE as i32);
    ctx.sim.set_hi(3);
    ctx.finish();
    assert_eq!(ctx.word(DATA_BASE), 12);

    ctx.sim.reset().expect("reset");
    let fresh = Simulator::with_program(program()).expect("loads");

    assert_eq!(ctx.sim.pc(), fresh.pc());
    assert_eq!(ctx.sim.registers(), fresh.registers());
    assert_eq!((ctx.sim.hi(), ctx.sim.lo()), (0, 0));
    assert_eq!(ctx.sim.latches(), &Latches::default());
    assert_eq!(ctx.cycles(), 0);
    assert_eq!(ctx.retired(), 0);
    assert!(ctx.sim.is_running());
    assert!(ctx.sim.halt_reason().is_none());
    assert!(ctx.sim.diagnostics().is_empty());
    assert_eq!(ctx.word(DATA_BASE), 0);
    assert_eq!(ctx.word(TEXT_BASE), program()[0]);
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut once = TestContext::new(&program());
    once.run(4);
    once.sim.reset().expect("reset");

    let mut twice = TestContext::new(&program());
    twice.run(4);
    twice.sim.reset().expect("reset");
    twice.sim.reset().expect("reset");

    assert_eq!(once.sim.pc(), twice.sim.pc());
    assert_eq!(once.sim.registers(), twice.sim.registers());
    assert_eq!(once.sim.latches(), twice.sim.latches());
    assert_eq!(once.cycles(), twice.cycles());
    assert_eq!(once.sim.register_dump(), twice.sim.register_dump());
}

#[test]
fn rerun_after_reset_reproduces_results() {
    let mut ctx = TestContext::new(&program());
    ctx.finish();
    let (cycles, regs) = (ctx.cycles(), ctx.sim.registers());

    ctx.sim.reset().expect("reset");
    ctx.finish();
    assert_eq!(ctx.cycles(), cycles);
    assert_eq!(ctx.sim.registers(), regs);
}

#[test]
fn set_register_validates_index() {
    let mut sim = Simulator::with_program(program()).expect("loads");
    assert!(matches!(
        sim.set_register(32, 1),
        Err(SimError::InvalidRegister(32))
    ));
    sim.set_register(0, 9).expect("accepted");
    assert_eq!(sim.register(0).expect("valid"), 0);
    sim.set_register(31, -1).expect("accepted");
    assert_eq!(sim.register(31).expect("valid"), -1);
    assert!(sim.register(40).is_err());
}

#[test]
fn oversized_program_is_rejected() {
    let mut config = Config::default();
    config.memory.regions[0] = RegionConfig::new("text", TEXT_BASE, 8);
    let result = Simulator::new(config, vec![0; 3]);
    assert!(matches!(
        result,
        Err(SimError::ProgramTooLarge {
            words: 3,
            capacity: 2
        })
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.general.text_base = 0x0000_1000;
    assert!(matches!(
        Simulator::new(config, program()),
        Err(SimError::Config(_))
    ));
}

#[test]
fn custom_text_base_is_honored() {
    let mut config = Config::default();
    config.general.text_base = TEXT_BASE + 0x100;
    let mut ctx = TestContext::with_config(config, &[Asm::addi(1, 0, 3)]);
    assert_eq!(ctx.sim.pc(), TEXT_BASE + 0x100);
    ctx.finish();
    assert_eq!(ctx.get_reg(1), 3);
}

#[test]
fn register_dump_lists_counters_and_registers() {
    let mut ctx = TestContext::new(&[Asm::addi(1, 0, -1)]);
    ctx.finish();
    let dump = ctx.sim.register_dump();
    assert!(dump.contains("# Instructions Executed\t: 1"));
    assert!(dump.contains("# Cycles Executed\t: 5"));
    assert!(dump.contains("[R1]\t: 0xffffffff"));
    assert!(dump.contains("[R31]\t: 0x00000000"));
    assert!(dump.contains("[HI]\t: 0x00000000"));
}

#[test]
fn memory_dump_lists_each_word() {
    let sim = Simulator::with_program(program()).expect("loads");
    let dump = sim.memory_dump(TEXT_BASE, TEXT_BASE + 4).expect("mapped");
    assert!(dump.contains("\t0x00400000 (4194304) :\t0x20010005"));
    assert!(dump.contains("0x00400004 (4194308)"));
    assert!(sim.memory_dump(0, 4).is_err());
}

#[test]
fn program_listing_disassembles_each_word() {
    let sim = Simulator::with_program(program()).expect("loads");
    let listing = sim.program_listing();
    let lines: Vec<_> = listing.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0x00400000:\t0x20010005\taddi $1, $0, 5");
    assert!(lines[2].ends_with("sw $2, 0($3)"));
}

#[test]
fn pipeline_dump_shows_latches() {
    let mut ctx = TestContext::new(&program());
    ctx.run(1);
    let dump = ctx.sim.pipeline_dump();
    assert!(dump.contains("Current PC\t: 0x00400004"));
    assert!(dump.contains("IF/ID.IR\t: 0x20010005"));
    assert!(dump.contains("ID/EX.valid\t: false"));
}
