//! Reading LS-8 programs from their text representation.
//!
//! A program file holds one byte per line written as 8 binary digits, e.g. `10000010`.
//! Lines starting with `#` and blank lines are skipped. Anything after the first
//! 8 characters of a line is ignored, so instructions can carry trailing comments:
//! ```text
//! # print 8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```
use crate::errors::LoadProgramError;
use std::fs;
use std::path::Path;

const DIGITS_PER_BYTE: usize = 8;

/// A parsed program ready to be placed into memory at address 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Parses the text representation of a program.
    ///
    /// # Errors
    /// - `InvalidProgramLine` if a line does not start with 8 binary digits
    pub fn parse(source: &str) -> Result<Self, LoadProgramError> {
        let mut bytes = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            bytes.push(parse_line(line, idx + 1)?);
        }
        log::debug!("Parsed program of {} bytes", bytes.len());
        Ok(Self { bytes })
    }
    /// Reads and parses the program file at `path`.
    ///
    /// # Errors
    /// - `ProgramNotFound` if the file cannot be read
    /// - `InvalidProgramLine` if a line does not start with 8 binary digits
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadProgramError> {
        let path = path.as_ref();
        let source =
            fs::read_to_string(path).map_err(|e| LoadProgramError::ProgramNotFound {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        log::debug!("Read program file {}", path.display());
        Self::parse(&source)
    }
    #[must_use]
    pub fn bytes_to_load(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<u8, LoadProgramError> {
    let invalid = || LoadProgramError::InvalidProgramLine {
        line_number,
        content: line.to_owned(),
    };
    let digits = line.get(..DIGITS_PER_BYTE).ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }
    u8::from_str_radix(digits, 2).map_err(|_| invalid())
}
