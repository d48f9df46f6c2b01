use std::io::{Read, Seek};

use log::{debug, warn};

use super::super::{ImageReader, RawImage};
use crate::binary_stream::BitReader;
use crate::color::PackedFormat;
use crate::Error;

/// "BM" read as a little-endian half-word
const BMP_MAGIC: u16 = 0x4D42;
const FILE_HEADER_SIZE: i64 = 14;
const SUPPORTED_BIT_COUNT: u16 = 16;
const COMPRESSION_RGB: u32 = 0;
const COMPRESSION_BITFIELDS: u32 = 3;

pub struct BmpImageReader<T: Read + Seek> {
    reader: T,
}

impl<T: Read + Seek> BmpImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read + Seek> ImageReader for BmpImageReader<T> {
    type Image = RawImage;

    fn read_image(&mut self) -> crate::Result<RawImage> {
        let mut reader = BitReader::new(&mut self.reader);
        check_magic(&mut reader)?;
        let header = BmpHeader::parse(&mut reader)?;
        header.log();
        header.check_dimensions()?;
        let packed_format = header.packed_format()?;
        reader.seek_to(header.data_offset as u64)?;
        let pixel_bytes = reader.read_until_end(header.payload_size())?;
        debug!("count:{}", pixel_bytes.len());
        RawImage::new(
            header.width as u32,
            header.height as u32,
            packed_format,
            pixel_bytes,
        )
    }
}

fn check_magic<R: Read>(reader: &mut BitReader<R>) -> crate::Result<()> {
    if reader.read_u16_le()? != BMP_MAGIC {
        warn!("this is not bmp file");
        return Err(Error::NotABmpFile);
    }
    Ok(())
}

/// File header and BITMAPINFOHEADER fields in file order
struct BmpHeader {
    file_size: u32,
    data_offset: u32,
    header_size: u32,
    width: i32,
    height: i32,
    planes: u16,
    bit_count: u16,
    compression: u32,
    size_image: u32,
    x_pels_per_meter: i32,
    y_pels_per_meter: i32,
    colors_used: u32,
    colors_important: u32,
}

impl BmpHeader {
    fn parse<R: Read>(reader: &mut BitReader<R>) -> crate::Result<Self> {
        let file_size = reader.read_u32_le()?;
        // two reserved half-words
        reader.read_u16_le()?;
        reader.read_u16_le()?;
        let data_offset = reader.read_u32_le()?;
        Ok(BmpHeader {
            file_size,
            data_offset,
            header_size: reader.read_u32_le()?,
            width: reader.read_i32_le()?,
            height: reader.read_i32_le()?,
            planes: reader.read_u16_le()?,
            bit_count: reader.read_u16_le()?,
            compression: reader.read_u32_le()?,
            size_image: reader.read_u32_le()?,
            x_pels_per_meter: reader.read_i32_le()?,
            y_pels_per_meter: reader.read_i32_le()?,
            colors_used: reader.read_u32_le()?,
            colors_important: reader.read_u32_le()?,
        })
    }

    /// Bytes between the headers and the end of the file
    fn payload_size(&self) -> u64 {
        let size = self.file_size as i64 - (self.header_size as i64 + FILE_HEADER_SIZE);
        size.max(0) as u64
    }

    fn check_dimensions(&self) -> crate::Result<()> {
        if self.width <= 0 || self.height <= 0 || self.bit_count != SUPPORTED_BIT_COUNT {
            let reason = format!(
                "w:{}, h:{}, bitcount:{}",
                self.width, self.height, self.bit_count
            );
            warn!("invalid format, {}", reason);
            return Err(Error::UnsupportedFormat(reason));
        }
        Ok(())
    }

    fn packed_format(&self) -> crate::Result<PackedFormat> {
        match self.compression {
            COMPRESSION_RGB => Ok(PackedFormat::Rgb555),
            COMPRESSION_BITFIELDS => Ok(PackedFormat::Rgb565),
            compression => {
                warn!("invalid comp:{}, comp should be 0 or 3", compression);
                Err(Error::UnsupportedCompression(compression))
            }
        }
    }

    fn log(&self) {
        debug!(
            "size:{}, offset:{}, header size:{}",
            self.file_size, self.data_offset, self.header_size
        );
        debug!(
            "width:{}, height:{}, planes:{}, bitcount:{}",
            self.width, self.height, self.planes, self.bit_count
        );
        debug!(
            "comp:{}, sizeimage:{}, xpelspermeter:{}, ypelspermeter:{}",
            self.compression, self.size_image, self.x_pels_per_meter, self.y_pels_per_meter
        );
        debug!(
            "clrused:{}, clrimportant:{}",
            self.colors_used, self.colors_important
        );
    }
}
