use std::io::{self, Write};

const VALUES_PER_LINE: usize = 12;

/// Writes bytes as the body of a C array literal, twelve values per line
pub struct HexArrayWriter<'a, T: Write> {
    writer: &'a mut T,
    /// number of values written so far
    count: usize,
}

impl<'a, T: Write> HexArrayWriter<'a, T> {
    pub fn new(writer: &'a mut T) -> Self {
        Self { writer, count: 0 }
    }

    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        if self.count % VALUES_PER_LINE != 0 {
            write!(self.writer, ", 0x{:02x}", byte)?;
        } else if self.count != 0 {
            write!(self.writer, ",\n\t0x{:02x}", byte)?;
        } else {
            write!(self.writer, "\t0x{:02x}", byte)?;
        }
        self.count += 1;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        bytes.iter().try_for_each(|&byte| self.write_byte(byte))
    }
}
