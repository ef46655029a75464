pub mod alu;
pub mod memory;
pub mod registers;
