//! Arithmetic logic unit working register to register.
use crate::errors::ExecutionError;
use crate::hardware::registers::Registers;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The ALU operation family of the LS-8.
///
/// Only [`AluOperation::Add`] and [`AluOperation::Mul`] are implemented, every other
/// operation fails with [`ExecutionError::UnsupportedOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOperation {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
    Cmp,
    And,
    Not,
    Or,
    Xor,
    Shl,
    Shr,
}

impl AluOperation {
    const ALL: [Self; 14] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Inc,
        Self::Dec,
        Self::Cmp,
        Self::And,
        Self::Not,
        Self::Or,
        Self::Xor,
        Self::Shl,
        Self::Shr,
    ];

    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Cmp => "CMP",
            Self::And => "AND",
            Self::Not => "NOT",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
        }
    }
}

impl Display for AluOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for AluOperation {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| ExecutionError::UnsupportedOperation {
                operation: s.to_owned(),
            })
    }
}

/// Applies `operation` to registers `dest` and `src`, storing the result in `dest`.
///
/// Arithmetic wraps around at 8 bits. On error no register is modified.
///
/// # Errors
/// - `UnsupportedOperation` for everything but ADD and MUL
/// - `InvalidRegister` if `dest` or `src` is not a valid register index
pub fn apply(
    operation: AluOperation,
    dest: u8,
    src: u8,
    r: &mut Registers,
) -> Result<(), ExecutionError> {
    let compute: fn(u8, u8) -> u8 = match operation {
        AluOperation::Add => u8::wrapping_add,
        AluOperation::Mul => u8::wrapping_mul,
        unsupported => {
            return Err(ExecutionError::UnsupportedOperation {
                operation: unsupported.to_string(),
            });
        }
    };
    let a = r.get(dest)?;
    let b = r.get(src)?;
    r.set(dest, compute(a, b))
}
