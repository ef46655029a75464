use crate::errors::{ExecutionError, LoadProgramError};
use std::fmt::{Debug, Formatter};

pub const MEMORY_SIZE: usize = 256;

/// The 256 byte RAM of the LS-8, holding both program and stack.
pub struct Memory {
    /// Index equals memory address
    data: [u8; MEMORY_SIZE],
    program_length: usize,
}

impl Debug for Memory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let slice = self.program_slice();
        write!(
            f,
            "Program bytes: {:?}, Program section contents: {slice:02X?}",
            slice.len()
        )
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub const fn new() -> Self {
        Self {
            data: [0; MEMORY_SIZE],
            program_length: 0,
        }
    }
    /// Reads the byte at `address`.
    ///
    /// # Errors
    /// - `OutOfBounds` if `address` is not below [`MEMORY_SIZE`]
    pub fn read(&self, address: usize) -> Result<u8, ExecutionError> {
        self.data
            .get(address)
            .copied()
            .ok_or(ExecutionError::OutOfBounds { address })
    }
    /// Writes `value` to `address`.
    ///
    /// # Errors
    /// - `OutOfBounds` if `address` is not below [`MEMORY_SIZE`]
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), ExecutionError> {
        let cell = self
            .data
            .get_mut(address)
            .ok_or(ExecutionError::OutOfBounds { address })?;
        *cell = value;
        Ok(())
    }
    /// Loads a program into memory starting from address 0.
    ///
    /// # Errors
    /// - Program too long
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadProgramError> {
        if program.len() > MEMORY_SIZE {
            return Err(LoadProgramError::ProgramTooLong {
                actual_bytes: program.len(),
                maximum_bytes: MEMORY_SIZE,
            });
        }
        self.data[..program.len()].copy_from_slice(program);
        self.program_length = program.len();
        Ok(())
    }
    pub fn program_slice(&self) -> &[u8] {
        &self.data[..self.program_length]
    }
}
