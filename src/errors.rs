use displaydoc::Display;
use std::error::Error;
use std::path::PathBuf;

/// Errors while reading a program and placing it into memory.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum LoadProgramError {
    /// Program {path:?} could not be opened: {message}
    ProgramNotFound { path: PathBuf, message: String },
    /// Line {line_number} is not an 8 digit binary number: {content:?}
    InvalidProgramLine { line_number: usize, content: String },
    /// Program too long, got {actual_bytes} bytes while limit is {maximum_bytes}
    ProgramTooLong {
        actual_bytes: usize,
        maximum_bytes: usize,
    },
}
impl Error for LoadProgramError {}

/// Fatal errors while executing a loaded program.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Address {address:#04X} is out of bounds, valid range: 0x00..=0xFF
    OutOfBounds { address: usize },
    /// Register R{index} does not exist, valid registers: R0..=R7
    InvalidRegister { index: u8 },
    /// Unsupported ALU operation {operation}
    UnsupportedOperation { operation: String },
    /// Unknown opcode {opcode:#010b} at address {address:#04X}
    UnknownOpcode { opcode: u8, address: usize },
    /// Error writing program output to Stdout: {0}
    OutputError(String),
}
impl Error for ExecutionError {}
