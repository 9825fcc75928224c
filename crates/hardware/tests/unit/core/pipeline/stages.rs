//! Stage Function Tests.
//!
//! Each test builds a CPU, places entries in the start-of-cycle latches, runs one
//! stage function, and inspects what the stage produced for the next cycle.

use mips_pipe_core::common::error::{AccessKind, DiagnosticKind, MemoryFault};
use mips_pipe_core::config::Config;
use mips_pipe_core::core::Cpu;
use mips_pipe_core::core::cpu::HaltReason;
use mips_pipe_core::core::pipeline::latches::IfIdEntry;
use mips_pipe_core::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use mips_pipe_core::isa::decode::Op;
use pretty_assertions::assert_eq;

use crate::common::Asm;
use crate::common::builder::pipeline_state::{ExMemBuilder, IdExBuilder, MemWbBuilder};
use crate::common::harness::{DATA_BASE, TEXT_BASE};

fn cpu() -> Cpu {
    Cpu::new(&Config::default())
}

fn if_id(raw: u32) -> IfIdEntry {
    IfIdEntry {
        valid: true,
        pc: TEXT_BASE,
        raw,
        fault: None,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Writeback
// ══════════════════════════════════════════════════════════

#[test]
fn writeback_commits_to_next_generation() {
    let mut cpu = cpu();
    cpu.latches.mem_wb = MemWbBuilder::new(Op::Addi).writes(4, 99).build();
    wb_stage(&mut cpu);

    assert_eq!(cpu.next.regs.read(4), 99);
    assert_eq!(cpu.current.regs.read(4), 0);
    assert_eq!(cpu.stats.instructions_retired, 1);
}

#[test]
fn writeback_ignores_register_zero() {
    let mut cpu = cpu();
    cpu.latches.mem_wb = MemWbBuilder::new(Op::Addi).writes(0, 99).build();
    wb_stage(&mut cpu);
    assert_eq!(cpu.next.regs.read(0), 0);
}

#[test]
fn writeback_commits_hi_lo() {
    let mut cpu = cpu();
    cpu.latches.mem_wb = MemWbBuilder::new(Op::Mult).hilo(-1, -6).build();
    wb_stage(&mut cpu);
    assert_eq!((cpu.next.hi, cpu.next.lo), (-1, -6));
}

#[test]
fn writeback_raises_carried_fault_without_committing() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::add(3, 1, 2))
        .pc(TEXT_BASE)
        .dest(3)
        .operands(i32::MAX, 1)
        .build();
    execute_stage(&mut cpu);
    let mut entry = MemWbBuilder::new(Op::Add).writes(3, 7).build();
    entry.fault = cpu.next_latches.ex_mem.fault;
    cpu.latches.mem_wb = entry;

    wb_stage(&mut cpu);

    assert!(!cpu.run_flag);
    assert_eq!(cpu.next.regs.read(3), 0);
    assert_eq!(cpu.stats.instructions_retired, 0);
    assert!(matches!(
        cpu.halt,
        Some(HaltReason::Fault(d)) if d.kind == DiagnosticKind::ArithmeticOverflow
    ));
}

#[test]
fn writeback_retires_exit_then_halts() {
    let mut cpu = cpu();
    cpu.latches.mem_wb = MemWbBuilder::new(Op::Syscall).exit().build();
    wb_stage(&mut cpu);
    assert_eq!(cpu.stats.instructions_retired, 1);
    assert_eq!(cpu.halt, Some(HaltReason::Exit));
    assert!(!cpu.run_flag);
}

// ══════════════════════════════════════════════════════════
// 2. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn memory_stage_loads_sign_extended_byte() {
    let mut cpu = cpu();
    cpu.memory.write_word(DATA_BASE, 0x0000_0080).expect("mapped");
    cpu.latches.ex_mem = ExMemBuilder::new(Op::Lb)
        .dest(1)
        .alu(DATA_BASE as i32)
        .build();
    mem_stage(&mut cpu);

    let wb = cpu.next_latches.mem_wb;
    assert!(wb.valid && wb.write_enable);
    assert_eq!(wb.value, -128);
}

#[test]
fn memory_stage_stores_operand_b() {
    let mut cpu = cpu();
    cpu.latches.ex_mem = ExMemBuilder::new(Op::Sw)
        .alu(DATA_BASE as i32 + 8)
        .store_data(0x1234_5678)
        .build();
    mem_stage(&mut cpu);
    assert_eq!(cpu.memory.read_word(DATA_BASE + 8), Ok(0x1234_5678));
    assert!(!cpu.next_latches.mem_wb.write_enable);
}

#[test]
fn memory_stage_converts_unmapped_load_to_fault() {
    let mut cpu = cpu();
    cpu.latches.ex_mem = ExMemBuilder::new(Op::Lw).dest(1).alu(0).build();
    mem_stage(&mut cpu);

    let wb = cpu.next_latches.mem_wb;
    assert!(!wb.write_enable);
    assert_eq!(
        wb.fault.map(|d| d.kind),
        Some(DiagnosticKind::MemoryFault {
            access: AccessKind::Load,
            fault: MemoryFault::Unmapped { addr: 0 },
        })
    );
}

#[test]
fn memory_stage_passes_bubbles_through() {
    let mut cpu = cpu();
    mem_stage(&mut cpu);
    assert!(!cpu.next_latches.mem_wb.valid);
}

// ══════════════════════════════════════════════════════════
// 3. Execute
// ══════════════════════════════════════════════════════════

#[test]
fn execute_uses_immediate_for_itype() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::addi(2, 1, 7))
        .dest(2)
        .operands(5, 0)
        .imm(7)
        .build();
    execute_stage(&mut cpu);
    assert_eq!(cpu.next_latches.ex_mem.alu, 12);
    assert_eq!(cpu.redirect, None);
}

#[test]
fn execute_flags_signed_overflow() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::add(3, 1, 2))
        .dest(3)
        .operands(i32::MAX, 1)
        .build();
    execute_stage(&mut cpu);
    assert_eq!(
        cpu.next_latches.ex_mem.fault.map(|d| d.kind),
        Some(DiagnosticKind::ArithmeticOverflow)
    );
}

#[test]
fn execute_redirects_on_taken_branch() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::beq(0, 0, 2))
        .pc(TEXT_BASE)
        .imm(2)
        .build();
    execute_stage(&mut cpu);
    assert_eq!(cpu.redirect, Some(TEXT_BASE + 12));
}

#[test]
fn execute_does_not_redirect_on_untaken_branch() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::bne(1, 2, 2))
        .pc(TEXT_BASE)
        .operands(4, 4)
        .imm(2)
        .build();
    execute_stage(&mut cpu);
    assert_eq!(cpu.redirect, None);
}

#[test]
fn execute_links_return_address() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::jal(TEXT_BASE + 0x40))
        .pc(TEXT_BASE + 4)
        .dest(31)
        .build();
    execute_stage(&mut cpu);
    assert_eq!(cpu.redirect, Some(TEXT_BASE + 0x40));
    assert_eq!(cpu.next_latches.ex_mem.alu, (TEXT_BASE + 12) as i32);
}

#[test]
fn execute_reports_divide_by_zero_and_keeps_hi_lo() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::div(1, 2)).operands(10, 0).build();
    execute_stage(&mut cpu);

    let ex = cpu.next_latches.ex_mem;
    assert!(cpu.run_flag);
    assert!(ex.fault.is_none());
    assert!(!ex.ctrl.write_hi && !ex.ctrl.write_lo);
    assert_eq!(cpu.stats.div_by_zero, 1);
    assert_eq!(cpu.diagnostics[0].kind, DiagnosticKind::DivideByZero);
}

#[test]
fn execute_marks_exit_syscall() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::syscall()).operands(10, 0).build();
    execute_stage(&mut cpu);
    assert!(cpu.next_latches.ex_mem.exit);

    let mut cpu = self::cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::syscall()).operands(4, 0).build();
    execute_stage(&mut cpu);
    assert!(!cpu.next_latches.ex_mem.exit);
}

// ══════════════════════════════════════════════════════════
// 4. Decode
// ══════════════════════════════════════════════════════════

#[test]
fn decode_reads_operands_from_current_state() {
    let mut cpu = cpu();
    cpu.current.regs.write(1, 10);
    cpu.current.regs.write(2, 20);
    cpu.latches.if_id = if_id(Asm::add(3, 1, 2));
    decode_stage(&mut cpu);

    let id = cpu.next_latches.id_ex;
    assert!(id.valid);
    assert_eq!((id.op, id.dest, id.a, id.b), (Op::Add, 3, 10, 20));
}

#[test]
fn decode_selects_destination_by_format() {
    let mut cpu = cpu();
    cpu.latches.if_id = if_id(Asm::lw(7, 0, 3));
    decode_stage(&mut cpu);
    assert_eq!(cpu.next_latches.id_ex.dest, 7);

    let mut cpu = self::cpu();
    cpu.latches.if_id = if_id(Asm::jal(TEXT_BASE));
    decode_stage(&mut cpu);
    assert_eq!(cpu.next_latches.id_ex.dest, 31);

    let mut cpu = self::cpu();
    cpu.latches.if_id = if_id(Asm::sw(7, 0, 3));
    decode_stage(&mut cpu);
    assert_eq!(cpu.next_latches.id_ex.dest, 0);
}

#[test]
fn decode_zero_extends_logical_immediates() {
    let mut cpu = cpu();
    cpu.latches.if_id = if_id(Asm::ori(1, 0, 0xFFFF));
    decode_stage(&mut cpu);
    assert_eq!(cpu.next_latches.id_ex.imm, 0xFFFF);

    let mut cpu = self::cpu();
    cpu.latches.if_id = if_id(Asm::addi(1, 0, -1));
    decode_stage(&mut cpu);
    assert_eq!(cpu.next_latches.id_ex.imm, -1);
}

#[test]
fn decode_stalls_on_raw_hazard() {
    let mut cpu = cpu();
    cpu.latches.if_id = if_id(Asm::add(3, 1, 2));
    cpu.latches.id_ex = IdExBuilder::new(Asm::addi(1, 0, 5)).dest(1).build();
    decode_stage(&mut cpu);

    assert!(cpu.stall);
    assert!(!cpu.next_latches.id_ex.valid);
    assert_eq!(cpu.stats.stalls_data, 1);
}

#[test]
fn decode_flags_illegal_instruction() {
    let mut cpu = cpu();
    cpu.latches.if_id = if_id(0xFC00_0000);
    decode_stage(&mut cpu);
    let id = cpu.next_latches.id_ex;
    assert!(id.valid);
    assert_eq!(
        id.fault.map(|d| d.kind),
        Some(DiagnosticKind::IllegalInstruction)
    );
}

#[test]
fn taken_branch_flushes_instruction_in_decode() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::beq(0, 0, 2))
        .pc(TEXT_BASE)
        .imm(2)
        .build();
    cpu.latches.if_id = IfIdEntry {
        pc: TEXT_BASE + 4,
        ..if_id(Asm::addi(5, 0, 1))
    };

    execute_stage(&mut cpu);
    assert!(!cpu.latches.if_id.valid);
    assert_eq!(cpu.stats.squashed, 1);

    decode_stage(&mut cpu);
    assert!(!cpu.next_latches.id_ex.valid);
    assert!(!cpu.stall);
}

#[test]
fn taken_branch_over_empty_decode_slot_squashes_nothing() {
    let mut cpu = cpu();
    cpu.latches.id_ex = IdExBuilder::new(Asm::j(TEXT_BASE + 0x40))
        .pc(TEXT_BASE)
        .build();
    execute_stage(&mut cpu);
    assert_eq!(cpu.redirect, Some(TEXT_BASE + 0x40));
    assert_eq!(cpu.stats.squashed, 0);
}

// ══════════════════════════════════════════════════════════
// 5. Fetch
// ══════════════════════════════════════════════════════════

fn cpu_with_program(words: &[u32]) -> Cpu {
    let mut cpu = cpu();
    cpu.memory.load_words(TEXT_BASE, words).expect("text mapped");
    cpu.program_end = TEXT_BASE + 4 * words.len() as u32;
    cpu
}

#[test]
fn fetch_reads_word_and_advances_pc() {
    let mut cpu = cpu_with_program(&[Asm::addi(1, 0, 5)]);
    fetch_stage(&mut cpu);
    assert_eq!(cpu.next_latches.if_id, if_id(Asm::addi(1, 0, 5)));
    assert_eq!(cpu.next.pc, TEXT_BASE + 4);
}

#[test]
fn fetch_holds_on_stall() {
    let mut cpu = cpu_with_program(&[Asm::addi(1, 0, 5), Asm::addi(2, 0, 5)]);
    cpu.latches.if_id = if_id(Asm::add(3, 1, 2));
    cpu.current.pc = TEXT_BASE + 4;
    cpu.next.pc = TEXT_BASE + 4;
    cpu.stall = true;
    fetch_stage(&mut cpu);
    assert_eq!(cpu.next_latches.if_id, cpu.latches.if_id);
    assert_eq!(cpu.next.pc, TEXT_BASE + 4);
}

#[test]
fn fetch_follows_redirect_with_bubble() {
    let mut cpu = cpu_with_program(&[0; 4]);
    cpu.redirect = Some(TEXT_BASE + 12);
    fetch_stage(&mut cpu);
    assert!(!cpu.next_latches.if_id.valid);
    assert_eq!(cpu.next.pc, TEXT_BASE + 12);
    assert_eq!(cpu.stats.stalls_control, 1);
    assert_eq!(cpu.stats.squashed, 1);
}

#[test]
fn redirect_past_program_end_squashes_nothing_in_fetch() {
    let mut cpu = cpu_with_program(&[Asm::j(TEXT_BASE)]);
    cpu.current.pc = TEXT_BASE + 4;
    cpu.redirect = Some(TEXT_BASE);
    fetch_stage(&mut cpu);
    assert_eq!(cpu.next.pc, TEXT_BASE);
    assert_eq!(cpu.stats.stalls_control, 1);
    assert_eq!(cpu.stats.squashed, 0);
}

#[test]
fn fetch_past_program_end_is_exhausted() {
    let mut cpu = cpu_with_program(&[Asm::addi(1, 0, 5)]);
    cpu.current.pc = TEXT_BASE + 4;
    fetch_stage(&mut cpu);
    assert!(cpu.fetch_exhausted);
    assert!(!cpu.next_latches.if_id.valid);
}

#[test]
fn fetch_from_unmapped_pc_carries_fault() {
    let mut cpu = cpu_with_program(&[Asm::addi(1, 0, 5)]);
    cpu.current.pc = 0;
    cpu.next.pc = 0;
    fetch_stage(&mut cpu);
    let entry = cpu.next_latches.if_id;
    assert!(entry.valid);
    assert_eq!(
        entry.fault.map(|d| d.kind),
        Some(DiagnosticKind::MemoryFault {
            access: AccessKind::Fetch,
            fault: MemoryFault::Unmapped { addr: 0 },
        })
    );
    assert_eq!(cpu.next.pc, 0);
}
