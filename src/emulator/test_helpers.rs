use crate::emulator::Emulator;
use std::io;
use std::io::Write;

pub struct StringWriter {
    vec: Vec<u8>,
}
impl Write for StringWriter {
    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        self.vec.write(data)
    }
    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}
impl StringWriter {
    pub fn new() -> Self {
        let vec = Vec::<u8>::with_capacity(120);
        Self { vec }
    }
    pub fn get_string(&self) -> String {
        String::from_utf8(self.vec.clone()).unwrap()
    }
}

/// Writer failing on every write, standing in for a closed Stdout.
pub struct FailingWriter;
impl Write for FailingWriter {
    fn write(&mut self, _data: &[u8]) -> Result<usize, io::Error> {
        Err(io::Error::other("Error during write"))
    }
    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

/// Emulator with `program` loaded whose output is captured in a [`StringWriter`].
pub struct FakeEmulator {
    pub inner: Emulator,
    pub stdout: StringWriter,
}
impl FakeEmulator {
    pub fn new(program: &[u8]) -> Self {
        let emu = crate::emulator::from_program_bytes(program).unwrap();
        Self {
            inner: emu,
            stdout: StringWriter::new(),
        }
    }
    pub fn get_parts(&mut self) -> (&mut Emulator, &mut StringWriter) {
        (&mut self.inner, &mut self.stdout)
    }
}
