use log::warn;

use crate::color::{PackedFormat, RGBColorFormat};
use crate::Error;

pub mod reader;
pub mod writer;

pub trait ImageReader {
    type Image;

    fn read_image(&mut self) -> crate::Result<Self::Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

/// Undecoded 16 bit pixels as stored in a BMP file, bottom row first.
pub struct RawImage {
    width: u32,
    height: u32,
    packed_format: PackedFormat,
    pixel_bytes: Vec<u8>,
}

impl RawImage {
    /// Fails with `TruncatedPayload` when `pixel_bytes` holds fewer than
    /// two bytes per dot. Extra trailing bytes are kept but never read.
    pub fn new(
        width: u32,
        height: u32,
        packed_format: PackedFormat,
        pixel_bytes: Vec<u8>,
    ) -> crate::Result<Self> {
        let expected = width as usize * height as usize * 2;
        if pixel_bytes.len() < expected {
            warn!(
                "pixel data holds {} bytes, {} needed",
                pixel_bytes.len(),
                expected
            );
            return Err(Error::TruncatedPayload {
                expected,
                actual: pixel_bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            packed_format,
            pixel_bytes,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn packed_format(&self) -> PackedFormat {
        self.packed_format
    }

    pub fn byte_count(&self) -> usize {
        self.pixel_bytes.len()
    }

    /// Dot at `column` of the stored row `row`, where row 0 is the bottom row
    fn stored_dot(&self, column: usize, row: usize) -> RGBColorFormat<u8> {
        let position = row * self.width as usize * 2 + column * 2;
        let low = self.pixel_bytes[position] as u16;
        let high = self.pixel_bytes[position + 1] as u16;
        self.packed_format.unpack((high << 8) | low)
    }

    /// All dots in display order, top row first
    pub fn top_down_dots(&self) -> TopDownDots<'_> {
        TopDownDots {
            image: self,
            index: 0,
        }
    }

    pub fn to_pixel_grid(&self) -> PixelGrid {
        PixelGrid::new(self.width, self.height, self.top_down_dots().collect())
    }
}

pub struct TopDownDots<'a> {
    image: &'a RawImage,
    index: usize,
}

impl Iterator for TopDownDots<'_> {
    type Item = RGBColorFormat<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.image.width as usize;
        let height = self.image.height as usize;
        if width == 0 || self.index >= width * height {
            return None;
        }
        let row_index = self.index / width;
        let column_index = self.index % width;
        self.index += 1;
        Some(self.image.stored_dot(column_index, height - row_index - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.image.width as usize * self.image.height as usize;
        let remaining = total.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TopDownDots<'_> {}

/// 8 bit RGB dots in row-major order, row 0 being the first row read.
pub struct PixelGrid {
    width: u32,
    height: u32,
    dots: Vec<RGBColorFormat<u8>>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, dots: Vec<RGBColorFormat<u8>>) -> Self {
        assert_eq!(
            dots.len(),
            width as usize * height as usize,
            "Number of dots must match the grid size"
        );
        Self {
            width,
            height,
            dots,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dots(&self) -> &[RGBColorFormat<u8>] {
        &self.dots
    }

    pub fn row(&self, row_index: u32) -> &[RGBColorFormat<u8>] {
        let start = row_index as usize * self.width as usize;
        &self.dots[start..start + self.width as usize]
    }

    pub fn dot(&self, column_index: u32, row_index: u32) -> RGBColorFormat<u8> {
        self.row(row_index)[column_index as usize]
    }

    /// Every dot packed as RGB565, low byte first
    pub fn rgb565_bytes(&self) -> Vec<u8> {
        self.dots
            .iter()
            .flat_map(RGBColorFormat::rgb565_le_bytes)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{PixelGrid, RawImage};
    use crate::color::{PackedFormat, RGBColorFormat};
    use crate::error::Error;

    #[rustfmt::skip]
    const TWO_BY_TWO_RGB565: &[u8] = &[
        // bottom row: red, green
        0x00, 0xF8,  0xE0, 0x07,
        // top row: blue, white
        0x1F, 0x00,  0xFF, 0xFF,
    ];

    #[test]
    fn top_down_dots_flip_rows() {
        let image = RawImage::new(2, 2, PackedFormat::Rgb565, Vec::from(TWO_BY_TWO_RGB565)).unwrap();
        let dots: Vec<RGBColorFormat<u8>> = image.top_down_dots().collect();
        assert_eq!(
            dots,
            vec![
                RGBColorFormat::new(0, 0, 0xF8),
                RGBColorFormat::new(0xF8, 0xFC, 0xF8),
                RGBColorFormat::new(0xF8, 0, 0),
                RGBColorFormat::new(0, 0xFC, 0),
            ]
        );
    }

    #[test]
    fn top_down_dots_size() {
        let image = RawImage::new(2, 2, PackedFormat::Rgb565, Vec::from(TWO_BY_TWO_RGB565)).unwrap();
        assert_eq!(image.top_down_dots().len(), 4);
        assert_eq!(image.byte_count(), 8);
    }

    #[test]
    fn short_pixel_buffer_is_rejected() {
        match RawImage::new(2, 2, PackedFormat::Rgb565, vec![0; 3]) {
            Err(Error::TruncatedPayload {
                expected: 8,
                actual: 3,
            }) => {}
            _ => panic!("Short pixel buffer was not rejected"),
        }
    }

    #[test]
    fn trailing_pixel_bytes_are_accepted() {
        let image = RawImage::new(1, 1, PackedFormat::Rgb565, vec![0x1F, 0x00, 0xAA]).unwrap();
        assert_eq!(image.byte_count(), 3);
        assert_eq!(image.top_down_dots().len(), 1);
    }

    #[test]
    fn pixel_grid_rows() {
        let image = RawImage::new(2, 2, PackedFormat::Rgb565, Vec::from(TWO_BY_TWO_RGB565)).unwrap();
        let grid = image.to_pixel_grid();
        assert_eq!(
            grid.row(1),
            &[RGBColorFormat::new(0xF8, 0, 0), RGBColorFormat::new(0, 0xFC, 0)]
        );
        assert_eq!(grid.dot(1, 0), RGBColorFormat::new(0xF8, 0xFC, 0xF8));
    }

    #[test]
    fn pixel_grid_rgb565_bytes() {
        let grid = PixelGrid::new(
            2,
            1,
            vec![RGBColorFormat::new(255, 0, 0), RGBColorFormat::new(0, 0, 255)],
        );
        assert_eq!(grid.rgb565_bytes(), vec![0x1F, 0x00, 0x00, 0xF8]);
    }
}
