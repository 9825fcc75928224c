//! Statistics counters and report formatting.

use mips_pipe_core::isa::decode::Op;
use mips_pipe_core::stats::SimStats;

#[test]
fn retirement_is_bucketed_by_class() {
    let mut stats = SimStats::default();
    for op in [
        Op::Add,
        Op::Addi,
        Op::Lw,
        Op::Sw,
        Op::Beq,
        Op::Jal,
        Op::Mult,
        Op::Mflo,
        Op::Syscall,
    ] {
        stats.record_retire(op);
    }
    assert_eq!(stats.instructions_retired, 9);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_jump, 1);
    assert_eq!(stats.inst_muldiv, 2);
    assert_eq!(stats.inst_system, 1);
}

#[test]
fn cpi_handles_empty_runs() {
    let mut stats = SimStats::default();
    assert_eq!(stats.cpi(), 0.0);
    stats.cycles = 9;
    stats.instructions_retired = 2;
    assert!((stats.cpi() - 4.5).abs() < f64::EPSILON);
}

#[test]
fn report_renders_selected_sections() {
    let mut stats = SimStats::default();
    stats.cycles = 10;
    stats.stalls_data = 3;

    let all = stats.report(&[]);
    assert!(all.contains("MIPS PIPELINE SIMULATION STATISTICS"));
    assert!(all.contains("sim_cycles               10"));
    assert!(all.contains("INSTRUCTION MIX"));

    let hazards = stats.report(&["hazards".to_string()]);
    assert!(hazards.contains("stalls.data            3 (30.00%)"));
    assert!(!hazards.contains("INSTRUCTION MIX"));
}
