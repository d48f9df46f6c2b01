use std::io::Write;

use super::super::{ImageWriter, RawImage};
use crate::Error;

const HEADER_COMMENT: &str = "# create ppm file";
const MAX_COLOR_VALUE: u8 = 255;
const DOTS_PER_LINE: usize = 6;

/// Writes a 16 bit BMP payload as a plain (P3) PPM, top row first
pub struct PPMImageWriter<'a, T: Write> {
    writer: T,
    image: &'a RawImage,
}

impl<'a, T: Write> PPMImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a RawImage) -> Self {
        Self { writer, image }
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{}", HEADER_COMMENT)?;
        writeln!(self.writer, "{} {}", self.image.width(), self.image.height())?;
        writeln!(self.writer, "{}", MAX_COLOR_VALUE)
    }

    fn write_dots(&mut self) -> std::io::Result<()> {
        for (index, dot) in self.image.top_down_dots().enumerate() {
            write!(
                self.writer,
                "{} {} {} ",
                dot.red.min(MAX_COLOR_VALUE),
                dot.green.min(MAX_COLOR_VALUE),
                dot.blue.min(MAX_COLOR_VALUE)
            )?;
            // line break counter runs across rows
            if (index + 1) % DOTS_PER_LINE == 0 {
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }
}

impl<T: Write> ImageWriter for PPMImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header().map_err(Error::WriteError)?;
        self.write_dots().map_err(Error::WriteError)?;
        self.writer.flush().map_err(Error::WriteError)
    }
}
