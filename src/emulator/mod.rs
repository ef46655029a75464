mod instruction;
mod opcodes;
#[cfg(test)]
mod test_helpers;

pub use instruction::{Instruction, Opcode};

use crate::errors::{ExecutionError, LoadProgramError};
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;
use crate::loader::Program;
use std::fmt::Write as _;
use std::io;
use std::io::Write;
use std::ops::ControlFlow;
use std::path::Path;

/// The public facing emulator used to run LS-8 programs.
#[derive(Debug, Default)]
pub struct Emulator {
    memory: Memory,
    registers: Registers,
    running: bool,
}

/// Reads the program file at `path` and loads it into a new emulator.
///
/// # Errors
/// - Program file cannot be read
/// - Program contains a line that is not an 8 digit binary number
/// - Program too long
pub fn from_program(path: impl AsRef<Path>) -> Result<Emulator, LoadProgramError> {
    let program = Program::from_file(path)?;
    from_program_bytes(program.bytes_to_load())
}

/// Loads already parsed program bytes into a new emulator.
///
/// # Errors
/// - Program too long
pub fn from_program_bytes(program: &[u8]) -> Result<Emulator, LoadProgramError> {
    let mut emu = Emulator::new();
    emu.load_program(program)?;
    Ok(emu)
}

impl Emulator {
    /// Constructor method, registers and memory in their power-on state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            memory: Memory::new(),
            registers: Registers::new(),
            running: false,
        }
    }
    /// Loads a program into memory starting at address 0.
    ///
    /// # Errors
    /// - Program too long
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadProgramError> {
        self.memory.load_program(program)?;
        log::debug!("Loaded program: {:?}", self.memory);
        Ok(())
    }
    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }
    /// Resets registers and PC to their power-on state, memory is kept.
    pub const fn reset_registers(&mut self) {
        self.registers.reset();
    }

    /// Executes the loaded program until HLT, printing its output to Stdout.
    ///
    /// # Errors
    /// See [`Emulator::execute_with_output`]
    pub fn execute(&mut self) -> Result<(), ExecutionError> {
        self.execute_with_output(&mut io::stdout().lock())
    }

    /// Executes the loaded program until HLT, printing its output to `stdout`.
    ///
    /// # Errors
    /// Any error stops execution:
    /// - `UnknownOpcode` if a byte without handler is fetched, this includes running
    ///   past the program into zeroed memory
    /// - `OutOfBounds` if PC or an operand leaves the 256 byte address space
    /// - `InvalidRegister` if an operand is not a register index
    /// - `OutputError` if writing to `stdout` fails
    pub fn execute_with_output(&mut self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        self.running = true;
        while self.running {
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("{}", self.trace());
            }
            if let ControlFlow::Break(result) = self.step(stdout) {
                return result;
            }
        }
        Ok(())
    }

    /// Fetches, decodes and executes one instruction at PC.
    ///
    /// `Continue` means the next instruction can be executed, `Break(Ok)` that HLT
    /// was executed and `Break(Err)` that execution cannot continue.
    /// The emulator is running after a `Continue` and not running anymore after any `Break`.
    pub fn step(&mut self, stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
        let flow = self.dispatch(stdout);
        self.running = flow.is_continue();
        if matches!(flow, ControlFlow::Break(Ok(()))) {
            log::info!("Program halted");
        }
        flow
    }

    fn dispatch(&mut self, stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
        let address = self.registers.pc();
        let instruction = match self.memory.read(address) {
            Ok(bits) => Instruction::from(bits),
            Err(e) => return ControlFlow::Break(Err(e)),
        };
        let Some(opcode) = instruction.opcode() else {
            return ControlFlow::Break(Err(ExecutionError::UnknownOpcode {
                opcode: instruction.op_code(),
                address,
            }));
        };
        let (r, memory) = (&mut self.registers, &mut self.memory);
        match opcode {
            Opcode::Hlt => opcodes::hlt(r),
            Opcode::Ldi => opcodes::ldi(instruction, r, memory),
            Opcode::Prn => opcodes::prn(instruction, r, memory, stdout),
            Opcode::Mul => opcodes::mul(instruction, r, memory),
            Opcode::Push => opcodes::push(instruction, r, memory),
            Opcode::Pop => opcodes::pop(instruction, r, memory),
        }
    }

    /// Current machine state in the format
    /// `TRACE: PC | OP A B | R0 R1 R2 R3 R4 R5 R6 R7`, all values as hex.
    ///
    /// Bytes outside of memory are shown as `--`.
    #[must_use]
    pub fn trace(&self) -> String {
        let pc = self.registers.pc();
        let byte_at = |address: usize| {
            self.memory
                .read(address)
                .map_or_else(|_| "--".to_owned(), |b| format!("{b:02X}"))
        };
        let mut line = format!(
            "TRACE: {pc:02X} | {} {} {} |",
            byte_at(pc),
            byte_at(pc + 1),
            byte_at(pc + 2)
        );
        for value in self.registers.general_purpose() {
            // writing to a String cannot fail
            let _ = write!(line, " {value:02X}");
        }
        line
    }
}
