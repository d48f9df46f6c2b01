use std::io::{ErrorKind, Read};

use log::{debug, warn};

use super::super::{ImageReader, PixelGrid};
use crate::color::RGBColorFormat;
use crate::Error;

/// Upper bound for the dot buffer reserved up front from header values
const MAX_PREALLOCATED_DOTS: usize = 1 << 20;

pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    type Image = PixelGrid;

    fn read_image(&mut self) -> crate::Result<PixelGrid> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let mut parser = PPMParser::new(&mut tokenizer);
        parser.parse_tokens()
    }
}

/// Whitespace as understood by C's `isspace`
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

pub(crate) struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer { reader }
    }

    fn read_byte(&mut self) -> crate::Result<Option<u8>> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::from(e)),
            }
        }
    }

    fn read_byte_before_end(&mut self) -> crate::Result<u8> {
        self.read_byte()?.ok_or(Error::UnexpectedEndOfStream)
    }

    /// Returns the first byte that is neither whitespace nor part of a comment
    fn skip_whitespace_and_comments(&mut self) -> crate::Result<u8> {
        loop {
            let byte = self.read_byte_before_end()?;
            if byte == b'#' {
                while self.read_byte_before_end()? != b'\n' {}
                continue;
            }
            if !is_space(byte) {
                return Ok(byte);
            }
        }
    }

    /// Read the next unsigned decimal number.
    ///
    /// The byte terminating the number is consumed. The end of the stream
    /// terminates a number that has at least one digit.
    pub fn next_number(&mut self) -> crate::Result<u32> {
        let mut byte = self.skip_whitespace_and_comments()?;
        if !byte.is_ascii_digit() {
            return Err(Error::InvalidNumberToken(byte));
        }
        let mut value: u32 = 0;
        loop {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((byte - b'0') as u32))
                .ok_or(Error::NumberTooLarge)?;
            match self.read_byte()? {
                Some(next) if next.is_ascii_digit() => byte = next,
                _ => return Ok(value),
            }
        }
    }

    /// Read the next number and rescale it from `[0, max_value]` to `[0, 255]`,
    /// rounding to nearest
    pub fn next_number_255(&mut self, max_value: u32) -> crate::Result<u8> {
        if max_value == 0 {
            return Err(Error::InvalidMaxValue);
        }
        let value = self.next_number()?;
        if value > max_value {
            return Err(Error::ColorValueExceedsMaxValue { value, max_value });
        }
        let scaled = (255 * value as u64 + max_value as u64 / 2) / max_value as u64;
        Ok(scaled as u8)
    }
}

fn unsupported_format(reason: String) -> Error {
    warn!("unsupported PNM format, {}", reason);
    Error::UnsupportedFormat(reason)
}

struct PPMParser<'a, 'b, R: Read> {
    tokenizer: &'a mut PPMTokenizer<'b, R>,
}

impl<'a, 'b, R: Read> PPMParser<'a, 'b, R> {
    fn new(tokenizer: &'a mut PPMTokenizer<'b, R>) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<PixelGrid> {
        self.parse_magic()?;
        let width = self.tokenizer.next_number()?;
        let height = self.tokenizer.next_number()?;
        let max_value = self.parse_max_value()?;
        debug!("width:{}, height:{}, maxval = {}", width, height, max_value);
        let dots = self.parse_all_dots(width, height, max_value)?;
        Ok(PixelGrid::new(width, height, dots))
    }

    fn parse_magic(&mut self) -> crate::Result<()> {
        if self.tokenizer.read_byte()? != Some(b'P') {
            warn!("input is not a PNM file");
            return Err(Error::NotAPnmFile);
        }
        match self.tokenizer.read_byte()? {
            Some(b'3') => Ok(()),
            Some(format @ (b'4' | b'5' | b'6')) => {
                warn!("binary PNM is not supported");
                Err(Error::BinaryNotSupported(char::from(format)))
            }
            Some(format @ (b'1' | b'2')) => Err(unsupported_format(format!(
                "P{} pixel decoding is not supported",
                char::from(format)
            ))),
            Some(format) => Err(unsupported_format(format!(
                "P{} is not a PNM format",
                char::from(format)
            ))),
            None => Err(unsupported_format(String::from(
                "PNM format digit is missing",
            ))),
        }
    }

    fn parse_max_value(&mut self) -> crate::Result<u32> {
        let max_value = self.tokenizer.next_number()?;
        if max_value == 0 {
            return Err(Error::InvalidMaxValue);
        }
        Ok(max_value)
    }

    fn parse_all_dots(
        &mut self,
        width: u32,
        height: u32,
        max_value: u32,
    ) -> crate::Result<Vec<RGBColorFormat<u8>>> {
        let number_of_dots = width as usize * height as usize;
        let mut dots = Vec::with_capacity(number_of_dots.min(MAX_PREALLOCATED_DOTS));
        for _ in 0..number_of_dots {
            let red = self.tokenizer.next_number_255(max_value)?;
            let green = self.tokenizer.next_number_255(max_value)?;
            let blue = self.tokenizer.next_number_255(max_value)?;
            dots.push(RGBColorFormat::new(red, green, blue));
        }
        Ok(dots)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        color::RGBColorFormat,
        error::Error,
        image::{ImageReader, PixelGrid},
        Result,
    };

    use super::{PPMImageReader, PPMTokenizer};

    fn parse_ppm_tokens(token_string: &str) -> Result<PixelGrid> {
        PPMImageReader::new(token_string.as_bytes()).read_image()
    }

    fn numbers(token_string: &str, count: usize) -> Result<Vec<u32>> {
        let mut bytes = token_string.as_bytes();
        let mut tokenizer = PPMTokenizer::new(&mut bytes);
        (0..count).map(|_| tokenizer.next_number()).collect()
    }

    #[test]
    fn read_string() {
        let string = "P3\n# comment\n2 2\n255\n255 0 0 0 255 0 0 0 255 255 255 0";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(
            image.row(0),
            &[RGBColorFormat::new(255, 0, 0), RGBColorFormat::new(0, 255, 0)]
        );
        assert_eq!(
            image.row(1),
            &[RGBColorFormat::new(0, 0, 255), RGBColorFormat::new(255, 255, 0)]
        );
    }

    #[test]
    fn read_continuous_string() {
        let string = "P3 3 2 255 255 0 0   0 255 0   0 0 255 255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.dot(2, 1), RGBColorFormat::new(0, 255, 255));
    }

    #[test]
    fn read_newline_string() {
        let string = "P3\n# Example PPM image newlines\n3\n2\n255\n255\n0\n0\n0\n255\n0\n0\n0\n255\n255\n255\n0\n255\n0\n255\n0\n255\n255\n";
        let image = parse_ppm_tokens(string).unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.dot(1, 1), RGBColorFormat::new(255, 0, 255));
    }

    #[test]
    fn rescale_max_value() {
        let string = "P3 1 1 15 15 8 0";
        let image = parse_ppm_tokens(string).unwrap();
        // (255 * 8 + 7) / 15 = 136
        assert_eq!(image.dot(0, 0), RGBColorFormat::new(255, 136, 0));
    }

    #[test]
    fn comments_between_tokens() {
        let values = numbers("# a\n  12 #b\n\t# c\r\n34 5", 3).unwrap();
        assert_eq!(values, vec![12, 34, 5]);
    }

    #[test]
    fn terminator_after_number_is_consumed() {
        // the '#' ending 12 is not treated as the start of a comment
        match numbers("12#b\n34", 2) {
            Err(Error::InvalidNumberToken(b'b')) => {}
            _ => panic!("Byte after the terminating '#' was not read as a token"),
        }
        assert_eq!(numbers("12 13\n", 2).unwrap(), vec![12, 13]);
    }

    #[test]
    fn identity_for_max_value_255() {
        let text = (0..=255).map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        let mut bytes = text.as_bytes();
        let mut tokenizer = PPMTokenizer::new(&mut bytes);
        for expected in 0..=255_u32 {
            assert_eq!(tokenizer.next_number_255(255).unwrap() as u32, expected);
        }
    }

    #[test]
    fn binary_upscale_for_max_value_1() {
        let mut bytes = "0 1".as_bytes();
        let mut tokenizer = PPMTokenizer::new(&mut bytes);
        assert_eq!(tokenizer.next_number_255(1).unwrap(), 0);
        assert_eq!(tokenizer.next_number_255(1).unwrap(), 255);
    }

    #[test]
    fn end_of_stream_while_skipping() {
        match numbers("12 # trailing comment", 2) {
            Err(Error::UnexpectedEndOfStream) => {}
            _ => panic!("End of stream inside a comment was not detected"),
        }
        match numbers("12   ", 2) {
            Err(Error::UnexpectedEndOfStream) => {}
            _ => panic!("End of stream inside whitespace was not detected"),
        }
    }

    #[test]
    fn non_digit_token() {
        match numbers("12 x4", 2) {
            Err(Error::InvalidNumberToken(b'x')) => {}
            _ => panic!("Non digit token was not detected"),
        }
    }

    #[test]
    fn number_too_large() {
        match numbers("4294967296", 1) {
            Err(Error::NumberTooLarge) => {}
            _ => panic!("Overflowing number was not detected"),
        }
    }

    #[test]
    fn wrong_magic() {
        match parse_ppm_tokens("XY 1 1 255 0 0 0") {
            Err(Error::NotAPnmFile) => {}
            _ => panic!("Wrong magic was not detected"),
        }
    }

    #[test]
    fn binary_formats() {
        for format in ['4', '5', '6'] {
            match parse_ppm_tokens(&format!("P{}\n1 1\n255\n", format)) {
                Err(Error::BinaryNotSupported(f)) if f == format => {}
                _ => panic!("Binary format P{} was not rejected", format),
            }
        }
    }

    #[test]
    fn plain_bitmap_and_graymap_are_not_decoded() {
        for string in ["P1\n1 1\n1", "P2\n1 1\n255\n0"] {
            match parse_ppm_tokens(string) {
                Err(Error::UnsupportedFormat(_)) => {}
                _ => panic!("'{}' was not rejected", string),
            }
        }
    }

    #[test]
    fn zero_max_value() {
        match parse_ppm_tokens("P3 1 1 0 0 0 0") {
            Err(Error::InvalidMaxValue) => {}
            _ => panic!("Max value of zero was not detected"),
        }
    }

    #[test]
    fn value_above_max_value() {
        match parse_ppm_tokens("P3 1 1 15 16 0 0") {
            Err(Error::ColorValueExceedsMaxValue {
                value: 16,
                max_value: 15,
            }) => {}
            _ => panic!("Color value above max value was not detected"),
        }
    }

    #[test]
    fn missing_dots() {
        match parse_ppm_tokens("P3\n2 1 255 0 0 255 0 0") {
            Err(Error::UnexpectedEndOfStream) => {}
            _ => panic!("Missing color values were not detected"),
        }
    }
}
