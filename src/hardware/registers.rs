use crate::errors::ExecutionError;

pub const REGISTER_COUNT: usize = 8;
/// R7 is reserved as stack pointer.
pub const STACK_POINTER: u8 = 7;
/// Initial value of the stack pointer, the stack grows downwards from here.
pub const STACK_START: u8 = 0xF4;

/// General purpose registers R0..=R7 plus the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    general_purpose: [u8; REGISTER_COUNT],
    pc: usize,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub const fn new() -> Self {
        let mut general_purpose = [0u8; REGISTER_COUNT];
        general_purpose[STACK_POINTER as usize] = STACK_START;
        Self {
            general_purpose,
            pc: 0,
        }
    }
    /// Restores the power-on state.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// # Errors
    /// - `InvalidRegister` for indexes above 7
    pub fn get(&self, r: u8) -> Result<u8, ExecutionError> {
        self.general_purpose
            .get(usize::from(r))
            .copied()
            .ok_or(ExecutionError::InvalidRegister { index: r })
    }
    /// # Errors
    /// - `InvalidRegister` for indexes above 7
    pub fn set(&mut self, r: u8, value: u8) -> Result<(), ExecutionError> {
        let register = self
            .general_purpose
            .get_mut(usize::from(r))
            .ok_or(ExecutionError::InvalidRegister { index: r })?;
        *register = value;
        Ok(())
    }
    pub const fn pc(&self) -> usize {
        self.pc
    }
    pub const fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }
    pub const fn advance_pc(&mut self, width: usize) {
        self.pc += width;
    }
    pub const fn stack_pointer(&self) -> u8 {
        self.general_purpose[STACK_POINTER as usize]
    }
    pub(crate) const fn set_stack_pointer(&mut self, value: u8) {
        self.general_purpose[STACK_POINTER as usize] = value;
    }
    pub const fn general_purpose(&self) -> &[u8; REGISTER_COUNT] {
        &self.general_purpose
    }
}
