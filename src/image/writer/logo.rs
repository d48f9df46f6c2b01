use std::io::{self, Write};

use super::super::{ImageWriter, PixelGrid};
use super::hex_array::HexArrayWriter;
use crate::Error;

pub const DEFAULT_LOGO_NAME: &str = "logo_linux_rgb24";

/// Writes a boot logo C source embedding the image as RGB565 bytes
pub struct LogoSourceWriter<'a, T: Write> {
    writer: T,
    image: &'a PixelGrid,
    logo_name: &'a str,
    source_name: &'a str,
}

impl<'a, T: Write> LogoSourceWriter<'a, T> {
    /// `source_name` is only used in the generated comment
    pub fn new(writer: T, image: &'a PixelGrid, logo_name: &'a str, source_name: &'a str) -> Self {
        Self {
            writer,
            image,
            logo_name,
            source_name,
        }
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.writer, "/*")?;
        writeln!(
            self.writer,
            " *  It was automatically generated from {}",
            self.source_name
        )?;
        writeln!(self.writer, " *")?;
        writeln!(self.writer, " *  Linux logo {}", self.logo_name)?;
        writeln!(self.writer, " */\n")?;
        writeln!(self.writer, "#include <linux/linux_logo.h>\n")?;
        writeln!(
            self.writer,
            "static unsigned char {}_data[] __initdata = {{",
            self.logo_name
        )
    }

    fn write_data(&mut self) -> io::Result<()> {
        let mut hex_writer = HexArrayWriter::new(&mut self.writer);
        for dot in self.image.dots() {
            hex_writer.write_bytes(&dot.rgb565_le_bytes())?;
        }
        write!(self.writer, "\n}};\n\n")
    }

    /// The colour lookup table stays empty, the data is direct colour
    fn write_clut(&mut self) -> io::Result<()> {
        writeln!(
            self.writer,
            "static unsigned char {}_clut[] __initdata = {{",
            self.logo_name
        )?;
        write!(self.writer, "\n}};\n\n")
    }

    fn write_footer(&mut self) -> io::Result<()> {
        let name = self.logo_name;
        writeln!(self.writer, "const struct linux_logo {} __initconst = {{", name)?;
        writeln!(self.writer, "\t.type\t\t= LINUX_LOGO_CLUT224,")?;
        writeln!(self.writer, "\t.width\t\t= {},", self.image.width())?;
        writeln!(self.writer, "\t.height\t\t= {},", self.image.height())?;
        writeln!(self.writer, "\t.clutsize\t= 0,")?;
        writeln!(self.writer, "\t.clut\t\t= {}_clut,", name)?;
        writeln!(self.writer, "\t.data\t\t= {}_data", name)?;
        write!(self.writer, "}};\n\n")
    }
}

impl<T: Write> ImageWriter for LogoSourceWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        self.write_header().map_err(Error::WriteError)?;
        self.write_data().map_err(Error::WriteError)?;
        self.write_clut().map_err(Error::WriteError)?;
        self.write_footer().map_err(Error::WriteError)?;
        self.writer.flush().map_err(Error::WriteError)
    }
}
