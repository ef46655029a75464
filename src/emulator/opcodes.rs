//! Implemented operations for the LS-8.
//!
//! Every handler reads its own operands from the bytes following the opcode at PC
//! and advances PC by the width of the instruction, except HLT which rewinds it to 0.
use crate::emulator::instruction::Instruction;
use crate::errors::ExecutionError;
use crate::hardware::alu::{self, AluOperation};
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;
use std::io;
use std::io::Write;
use std::ops::ControlFlow;

/// Outcome of one instruction: continue with the next one, halt, or fail.
pub type Flow = ControlFlow<Result<(), ExecutionError>>;

/// Turns a failed hardware access into a fatal `Break`.
fn checked<T>(result: Result<T, ExecutionError>) -> ControlFlow<Result<(), ExecutionError>, T> {
    match result {
        Ok(value) => ControlFlow::Continue(value),
        Err(e) => ControlFlow::Break(Err(e)),
    }
}

/// Reads the operand byte at `PC + offset`.
fn operand(r: &Registers, memory: &Memory, offset: usize) -> Result<u8, ExecutionError> {
    memory.read(r.pc() + offset)
}

/// HLT: Halt the CPU and rewind PC to 0.
/// ```text
///  7_6___5___4___3__0_
/// | 00 | 0 | 0 | 0001 |
///  -------------------
/// ```
pub fn hlt(r: &mut Registers) -> Flow {
    r.set_pc(0);
    ControlFlow::Break(Ok(()))
}

/// LDI: Load immediate, the byte following the register number is stored in that register.
/// ```text
///  7_6___5___4___3__0_
/// | 10 | 0 | 0 | 0010 |  00000rrr  iiiiiiii
///  -------------------
/// ```
pub fn ldi(i: Instruction, r: &mut Registers, memory: &Memory) -> Flow {
    let register = checked(operand(r, memory, 1))?;
    let value = checked(operand(r, memory, 2))?;
    checked(r.set(register, value))?;
    r.advance_pc(i.width());
    ControlFlow::Continue(())
}

/// PRN: Print the decimal value of a register followed by a newline.
/// ```text
///  7_6___5___4___3__0_
/// | 01 | 0 | 0 | 0111 |  00000rrr
///  -------------------
/// ```
pub fn prn(
    i: Instruction,
    r: &mut Registers,
    memory: &Memory,
    stdout: &mut impl Write,
) -> Flow {
    let register = checked(operand(r, memory, 1))?;
    let value = checked(r.get(register))?;
    match writeln!(stdout, "{value}").and_then(|()| stdout.flush()) {
        Ok(()) => {
            r.advance_pc(i.width());
            ControlFlow::Continue(())
        }
        Err(e) => wrap_io_error_in_cf(&e),
    }
}

/// MUL: Multiply register A with register B and store the result in register A.
/// ```text
///  7_6___5___4___3__0_
/// | 10 | 1 | 0 | 0010 |  00000aaa  00000bbb
///  -------------------
/// ```
pub fn mul(i: Instruction, r: &mut Registers, memory: &Memory) -> Flow {
    let register_a = checked(operand(r, memory, 1))?;
    let register_b = checked(operand(r, memory, 2))?;
    checked(alu::apply(AluOperation::Mul, register_a, register_b, r))?;
    r.advance_pc(i.width());
    ControlFlow::Continue(())
}

/// PUSH: Decrement the stack pointer R7 and copy the register's value to the new top of stack.
/// ```text
///  7_6___5___4___3__0_
/// | 01 | 0 | 0 | 0101 |  00000rrr
///  -------------------
/// ```
pub fn push(i: Instruction, r: &mut Registers, memory: &mut Memory) -> Flow {
    let register = checked(operand(r, memory, 1))?;
    checked(r.get(register))?;
    r.set_stack_pointer(r.stack_pointer().wrapping_sub(1));
    // re-read, PUSH R7 stores the decremented stack pointer
    let value = checked(r.get(register))?;
    checked(memory.write(usize::from(r.stack_pointer()), value))?;
    r.advance_pc(i.width());
    ControlFlow::Continue(())
}

/// POP: Copy the value at the top of stack into the register and increment the stack pointer R7.
/// ```text
///  7_6___5___4___3__0_
/// | 01 | 0 | 0 | 0110 |  00000rrr
///  -------------------
/// ```
pub fn pop(i: Instruction, r: &mut Registers, memory: &Memory) -> Flow {
    let register = checked(operand(r, memory, 1))?;
    let value = checked(memory.read(usize::from(r.stack_pointer())))?;
    checked(r.set(register, value))?;
    r.set_stack_pointer(r.stack_pointer().wrapping_add(1));
    r.advance_pc(i.width());
    ControlFlow::Continue(())
}

fn wrap_io_error_in_cf(error: &io::Error) -> Flow {
    ControlFlow::Break(Err(ExecutionError::OutputError(error.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::instruction::Opcode;
    use crate::emulator::test_helpers::{FailingWriter, StringWriter};
    use crate::hardware::registers::{STACK_POINTER, STACK_START};
    use googletest::prelude::*;

    fn create_memory(data: &[u8]) -> Memory {
        let mut mem = Memory::new();
        mem.load_program(data).expect("Error loading program");
        mem
    }

    #[gtest]
    pub fn test_opcode_hlt() {
        let mut regs = Registers::new();
        regs.set_pc(0x0B);
        let res = hlt(&mut regs);
        assert_that!(res, eq(&ControlFlow::Break(Ok(()))));
        expect_that!(regs.pc(), eq(0));
    }
    #[gtest]
    pub fn test_opcode_ldi() {
        let mut regs = Registers::new();
        let memory = create_memory(&[Opcode::Ldi as u8, 2, 0x2A]);
        let res = ldi(Opcode::Ldi.into(), &mut regs, &memory);
        assert_that!(res, eq(&ControlFlow::Continue(())));
        expect_that!(regs.get(2), eq(&Ok(0x2A)));
        expect_that!(regs.pc(), eq(3));
    }
    #[gtest]
    pub fn test_opcode_ldi_invalid_register() {
        let mut regs = Registers::new();
        let memory = create_memory(&[Opcode::Ldi as u8, 8, 1]);
        let res = ldi(Opcode::Ldi.into(), &mut regs, &memory);
        assert_that!(
            res,
            eq(&ControlFlow::Break(Err(ExecutionError::InvalidRegister {
                index: 8
            })))
        );
        expect_that!(regs.pc(), eq(0));
    }
    #[gtest]
    pub fn test_opcode_ldi_operand_out_of_bounds() {
        let mut regs = Registers::new();
        regs.set_pc(0xFE);
        let memory = Memory::new();
        let res = ldi(Opcode::Ldi.into(), &mut regs, &memory);
        assert_that!(
            res,
            eq(&ControlFlow::Break(Err(ExecutionError::OutOfBounds {
                address: 0x100
            })))
        );
    }
    #[gtest]
    pub fn test_opcode_prn() {
        let mut regs = Registers::new();
        regs.set(4, 72).unwrap();
        let memory = create_memory(&[Opcode::Prn as u8, 4]);
        let mut writer = StringWriter::new();
        let res = prn(Opcode::Prn.into(), &mut regs, &memory, &mut writer);
        assert_that!(res, eq(&ControlFlow::Continue(())));
        expect_that!(writer.get_string(), eq("72\n"));
        expect_that!(regs.pc(), eq(2));
    }
    #[gtest]
    pub fn test_opcode_prn_write_error() {
        let mut regs = Registers::new();
        let memory = create_memory(&[Opcode::Prn as u8, 0]);
        let res = prn(Opcode::Prn.into(), &mut regs, &memory, &mut FailingWriter);
        assert!(res.is_break());
        let execution_error = res.break_value().unwrap().unwrap_err();
        assert_that!(
            execution_error.to_string(),
            eq("Error writing program output to Stdout: Error during write")
        );
        expect_that!(regs.pc(), eq(0));
    }
    #[gtest]
    pub fn test_opcode_mul() {
        let mut regs = Registers::new();
        regs.set(0, 6).unwrap();
        regs.set(1, 7).unwrap();
        let memory = create_memory(&[Opcode::Mul as u8, 0, 1]);
        let res = mul(Opcode::Mul.into(), &mut regs, &memory);
        assert_that!(res, eq(&ControlFlow::Continue(())));
        expect_that!(regs.get(0), eq(&Ok(42)));
        expect_that!(regs.get(1), eq(&Ok(7)));
        expect_that!(regs.pc(), eq(3));
    }
    #[gtest]
    pub fn test_opcode_push() {
        let mut regs = Registers::new();
        regs.set(3, 99).unwrap();
        let mut memory = create_memory(&[Opcode::Push as u8, 3]);
        let res = push(Opcode::Push.into(), &mut regs, &mut memory);
        assert_that!(res, eq(&ControlFlow::Continue(())));
        expect_that!(regs.stack_pointer(), eq(STACK_START - 1));
        expect_that!(regs.get(STACK_POINTER), eq(&Ok(243)));
        expect_that!(memory.read(243), eq(&Ok(99)));
        expect_that!(regs.pc(), eq(2));
    }
    #[gtest]
    pub fn test_opcode_pop() {
        let mut regs = Registers::new();
        let mut memory = create_memory(&[Opcode::Pop as u8, 5]);
        memory.write(usize::from(STACK_START), 17).unwrap();
        let res = pop(Opcode::Pop.into(), &mut regs, &memory);
        assert_that!(res, eq(&ControlFlow::Continue(())));
        expect_that!(regs.get(5), eq(&Ok(17)));
        expect_that!(regs.stack_pointer(), eq(STACK_START + 1));
        expect_that!(regs.pc(), eq(2));
    }
    #[gtest]
    pub fn test_opcode_push_pop_round_trip() {
        let mut regs = Registers::new();
        regs.set(0, 5).unwrap();
        let mut memory = create_memory(&[Opcode::Push as u8, 0, Opcode::Pop as u8, 1]);
        let sp_before = regs.stack_pointer();
        assert!(push(Opcode::Push.into(), &mut regs, &mut memory).is_continue());
        expect_that!(regs.stack_pointer(), eq(243));
        assert!(pop(Opcode::Pop.into(), &mut regs, &memory).is_continue());
        expect_that!(regs.get(1), eq(&regs.get(0)));
        expect_that!(regs.get(1), eq(&Ok(5)));
        expect_that!(regs.stack_pointer(), eq(sp_before));
        expect_that!(regs.pc(), eq(4));
    }
    #[gtest]
    pub fn test_opcode_push_stack_pointer_wraps() {
        let mut regs = Registers::new();
        regs.set_stack_pointer(0);
        regs.set(2, 0xAB).unwrap();
        let mut memory = create_memory(&[Opcode::Push as u8, 2]);
        assert!(push(Opcode::Push.into(), &mut regs, &mut memory).is_continue());
        expect_that!(regs.stack_pointer(), eq(0xFF));
        expect_that!(memory.read(0xFF), eq(&Ok(0xAB)));
    }
    #[gtest]
    pub fn test_opcode_push_invalid_register() {
        let mut regs = Registers::new();
        let mut memory = create_memory(&[Opcode::Push as u8, 9]);
        let res = push(Opcode::Push.into(), &mut regs, &mut memory);
        assert_that!(
            res,
            eq(&ControlFlow::Break(Err(ExecutionError::InvalidRegister {
                index: 9
            })))
        );
        expect_that!(regs.stack_pointer(), eq(STACK_START));
        expect_that!(regs.pc(), eq(0));
        expect_that!(memory.read(usize::from(STACK_START - 1)), eq(&Ok(0)));
    }
    #[gtest]
    pub fn test_opcode_push_stack_pointer_register() {
        let mut regs = Registers::new();
        let mut memory = create_memory(&[Opcode::Push as u8, STACK_POINTER]);
        assert!(push(Opcode::Push.into(), &mut regs, &mut memory).is_continue());
        expect_that!(regs.stack_pointer(), eq(STACK_START - 1));
        expect_that!(memory.read(usize::from(STACK_START - 1)), eq(&Ok(STACK_START - 1)));
    }
    #[gtest]
    pub fn test_opcode_pop_stack_pointer_register() {
        let mut regs = Registers::new();
        let mut memory = create_memory(&[Opcode::Pop as u8, STACK_POINTER]);
        memory.write(usize::from(STACK_START), 0x40).unwrap();
        assert!(pop(Opcode::Pop.into(), &mut regs, &memory).is_continue());
        // loaded value is incremented afterwards
        expect_that!(regs.stack_pointer(), eq(0x41));
        expect_that!(regs.pc(), eq(2));
    }
}
