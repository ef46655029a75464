//! # LS-8 Emulator.
//!
//! `ls8-emulator` is an emulator of the LS-8, an 8-bit computer with 256 bytes of memory
//! and 8 registers, R7 being the stack pointer.
//! Usage starts with loading a program via `emulator::from_program` or
//! `emulator::from_program_bytes`.
//!
//!  # Example
//! ```
//! use ls8_emulator::emulator::{self, Opcode};
//! let program = [
//!     Opcode::Ldi as u8, 0, 8,
//!     Opcode::Ldi as u8, 1, 9,
//!     Opcode::Mul as u8, 0, 1,
//!     Opcode::Prn as u8, 0,
//!     Opcode::Hlt as u8,
//! ];
//! let mut emu = emulator::from_program_bytes(&program).unwrap();
//! let mut output = Vec::new();
//! emu.execute_with_output(&mut output).unwrap();
//! assert_eq!(output, b"72\n");
//! assert_eq!(emu.registers().pc(), 0);
//! ```
//! # Errors
//! - Program file cannot be read or contains lines that are not 8 binary digits
//! - Program too long for the 256 byte memory
//! - Fatal errors during execution like unknown opcodes or invalid registers

pub mod emulator;
pub mod errors;
pub mod hardware;
pub mod loader;
