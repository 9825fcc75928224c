//! Program loader tests.

use std::io::Write;

use mips_pipe_core::common::error::SimError;
use mips_pipe_core::sim::loader::{load_program, parse_program};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

#[test]
fn parses_words_with_and_without_prefix() {
    let words = parse_program("20010005\n0x20220007 0X0000000C\n").expect("valid");
    assert_eq!(words, vec![0x2001_0005, 0x2022_0007, 0x0000_000C]);
}

#[test]
fn ignores_blank_lines_and_comments() {
    let text = "# header\n\n  20010005   # addi $1, $0, 5\n\t\n# trailer";
    assert_eq!(parse_program(text).expect("valid"), vec![0x2001_0005]);
}

#[test]
fn empty_file_is_an_empty_program() {
    assert_eq!(parse_program("").expect("valid"), Vec::<u32>::new());
}

#[rstest]
#[case::not_hex("2001000g", 1)]
#[case::too_wide("\n123456789", 2)]
#[case::bare_prefix("0x", 1)]
fn malformed_tokens_report_line(#[case] text: &str, #[case] line: usize) {
    match parse_program(text) {
        Err(SimError::ProgramParse { line: l, .. }) => assert_eq!(l, line),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn loads_program_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "20010005").expect("write");
    writeln!(file, "20220007").expect("write");

    let words = load_program(file.path()).expect("loads");
    assert_eq!(words, vec![0x2001_0005, 0x2022_0007]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = load_program(dir.path().join("absent.in"));
    assert!(matches!(result, Err(SimError::ProgramIo { .. })));
}
