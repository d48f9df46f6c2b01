use std::io::{Read, Seek, SeekFrom};

use crate::Result;

/// Reads little-endian header fields from a byte stream
pub struct BitReader<R: Read> {
    /// the underlying input stream
    reader: R,
}

impl<R: Read> BitReader<R> {
    pub fn new(reader: R) -> BitReader<R> {
        BitReader { reader }
    }

    /// read a single byte
    ///
    /// fails with UnexpectedEndOfStream when the stream is exhausted,
    /// no default value is substituted.
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut byte = [0; 1];
        self.reader.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    /// read two bytes, the first one becoming the high byte
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let high = self.read_u8()? as u16;
        let low = self.read_u8()? as u16;
        Ok((high << 8) | low)
    }

    /// read a little-endian half-word
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(self.read_u16_be()?.swap_bytes())
    }

    /// read a little-endian word as two half-words,
    /// the first one becoming the low 16 bits
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let low = self.read_u16_le()? as u32;
        let high = self.read_u16_le()? as u32;
        Ok((high << 16) | low)
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(self.read_u32_le()? as i32)
    }

    /// read up to `limit` bytes, stopping early at the end of the stream
    pub fn read_until_end(&mut self, limit: u64) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.reader.by_ref().take(limit).read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// move to an absolute offset from the start of the stream
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use crate::error::Error;

    #[test]
    fn read_half_words() {
        let input: &[u8] = &[0x42, 0x4D, 0x34, 0x12];
        let mut reader = BitReader::new(input);
        assert_eq!(reader.read_u16_be().unwrap(), 0x424D);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
    }

    #[test]
    fn read_word_low_half_first() {
        let input: &[u8] = &[0x78, 0x56, 0x34, 0x12, 0xFE, 0xFF, 0xFF, 0xFF];
        let mut reader = BitReader::new(input);
        assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_i32_le().unwrap(), -2);
    }

    #[test]
    fn end_of_stream_is_an_error() {
        let input: &[u8] = &[0x01, 0x02, 0x03];
        let mut reader = BitReader::new(input);
        match reader.read_u32_le() {
            Err(Error::UnexpectedEndOfStream) => {}
            _ => panic!("Reading past the end of the stream was not detected"),
        }
    }

    #[test]
    fn read_until_end_stops_at_limit_or_eof() {
        let input: &[u8] = &[1, 2, 3, 4, 5];
        let mut reader = BitReader::new(input);
        assert_eq!(reader.read_until_end(2).unwrap(), vec![1, 2]);
        assert_eq!(reader.read_until_end(10).unwrap(), vec![3, 4, 5]);
        assert!(reader.read_until_end(10).unwrap().is_empty());
    }

    #[test]
    fn seek_from_start() {
        let input = std::io::Cursor::new(vec![9, 8, 7, 6]);
        let mut reader = BitReader::new(input);
        reader.read_u16_be().unwrap();
        reader.seek_to(1).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 8);
    }
}
