//! Branch unit tests.

use mips_pipe_core::core::pipeline::signals::BranchCond;
use mips_pipe_core::core::units::bru::BranchUnit;
use rstest::rstest;

#[rstest]
#[case(BranchCond::Eq, 3, 3, true)]
#[case(BranchCond::Eq, 3, 4, false)]
#[case(BranchCond::Ne, 3, 4, true)]
#[case(BranchCond::Lez, 0, 99, true)]
#[case(BranchCond::Lez, 1, 99, false)]
#[case(BranchCond::Gtz, 1, 0, true)]
#[case(BranchCond::Gtz, 0, 0, false)]
#[case(BranchCond::Ltz, -1, 0, true)]
#[case(BranchCond::Gez, 0, 0, true)]
#[case(BranchCond::Gez, -5, 0, false)]
fn conditions(#[case] cond: BranchCond, #[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(BranchUnit::taken(cond, a, b), taken);
}

#[test]
fn branch_target_is_relative_to_next_instruction() {
    assert_eq!(BranchUnit::branch_target(0x0040_0000, 2), 0x0040_000C);
    assert_eq!(BranchUnit::branch_target(0x0040_0008, -3), 0x0040_0000);
}

#[test]
fn jump_target_keeps_segment_bits() {
    assert_eq!(BranchUnit::jump_target(0x0040_0000, 0x0010_0008), 0x0040_0020);
    assert_eq!(BranchUnit::jump_target(0x8000_0010, 0x4), 0x8000_0010);
}
