//! Program Loader.
//!
//! This module reads MU-MIPS program files. It performs:
//! 1. **Reading:** Loads the file from disk, reporting I/O failures as `SimError::ProgramIo`.
//! 2. **Parsing:** Splits the text into whitespace-separated 32-bit hexadecimal words
//!    (optional `0x` prefix). Blank lines and `#` comments are ignored.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;

/// Parses the text of a program file into instruction words.
///
/// # Arguments
///
/// * `text` - Program file contents.
///
/// # Returns
///
/// The words in file order, or `SimError::ProgramParse` naming the first bad token.
///
/// # Examples
///
/// ```
/// use mips_pipe_core::sim::loader::parse_program;
///
/// let words = parse_program("20010005  # addi $1, $0, 5\n0x20220007\n").unwrap();
/// assert_eq!(words, vec![0x2001_0005, 0x2022_0007]);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<u32>, SimError> {
    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let code = line.split_once('#').map_or(line, |(code, _)| code);
        for token in code.split_whitespace() {
            words.push(parse_word(token).ok_or_else(|| SimError::ProgramParse {
                line: idx + 1,
                token: token.to_string(),
            })?);
        }
    }
    Ok(words)
}

/// Parses one hexadecimal word, with or without a `0x`/`0X` prefix.
fn parse_word(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the program file.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<u32>, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::ProgramIo {
        path: path.display().to_string(),
        source,
    })?;
    let words = parse_program(&text)?;
    tracing::info!(path = %path.display(), words = words.len(), "program loaded");
    Ok(words)
}
