use std::fmt::{Debug, Formatter};

/// The instructions understood by the LS-8, keyed by their opcode byte.
#[repr(u8)]
#[derive(enumn::N, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ldi = 0b1000_0010,
    Prn = 0b0100_0111,
    Mul = 0b1010_0010,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
}

/// Wrapper for an LS-8 opcode byte.
/// format is: `AABCDDDD`
/// - `AA`: number of operands following the opcode
/// - `B`: operation is handled by the ALU
/// - `C`: instruction sets the PC itself
/// - `DDDD`: instruction identifier
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Instruction(u8);

impl Instruction {
    /// Gives the value of only the specified bit range.
    ///
    /// # Parameters
    /// - `from`: starting index
    /// - `to`: end index (inclusive), mut be greater or equal to `from`
    ///
    /// # Panics
    /// - asserts that to is greater or equal from and both are valid indexes
    #[must_use]
    pub fn get_bit_range(self, from: u8, to: u8) -> u8 {
        debug_assert!(
            to >= from,
            "wrong direction of from: {from:?} and to: {to:?}"
        );
        debug_assert!(
            (0..u8::BITS).contains(&u32::from(to)),
            "index: {to:?} to u8 is greater than maximum value {:?}",
            u8::BITS - 1
        );
        let width = to - from + 1;
        if width == 8 {
            self.0
        } else {
            (self.0 >> from) & ((1 << width) - 1)
        }
    }
    #[must_use]
    pub fn get_bit(self, index: u8) -> bool {
        self.get_bit_range(index, index) & 1 != 0
    }
    #[must_use]
    pub const fn op_code(self) -> u8 {
        self.0
    }
    #[must_use]
    pub fn opcode(self) -> Option<Opcode> {
        Opcode::n(self.0)
    }
    #[must_use]
    pub fn operand_count(self) -> usize {
        usize::from(self.get_bit_range(6, 7))
    }
    /// Bytes taken by the instruction including the opcode itself.
    #[must_use]
    pub fn width(self) -> usize {
        1 + self.operand_count()
    }
    #[must_use]
    pub fn is_alu_operation(self) -> bool {
        self.get_bit(5)
    }
    #[must_use]
    pub fn sets_pc(self) -> bool {
        self.get_bit(4)
    }
    #[must_use]
    pub fn identifier(self) -> u8 {
        self.get_bit_range(0, 3)
    }
}

impl Debug for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Op: {:08b} ({:?}), Operands: {}, ALU: {}, Sets PC: {}, Id: {:04b}",
            self.op_code(),
            self.opcode(),
            self.operand_count(),
            self.is_alu_operation(),
            self.sets_pc(),
            self.identifier()
        )
    }
}

impl From<u8> for Instruction {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        Self(opcode as u8)
    }
}
