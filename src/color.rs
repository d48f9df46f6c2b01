/// Layout of a packed 16 bit pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackedFormat {
    /// 5 bits red, 6 bits green, 5 bits blue (BMP bit-fields compression)
    Rgb565,
    /// 1 unused bit, 5 bits per channel (uncompressed BMP)
    Rgb555,
}

impl PackedFormat {
    /// Expand a packed pixel into 8 bit channels.
    ///
    /// Each channel keeps only its significant bits in the high part of the
    /// byte; the low bits are always zero.
    pub fn unpack(&self, value: u16) -> RGBColorFormat<u8> {
        let value = value as u32;
        match self {
            Self::Rgb555 => RGBColorFormat {
                red: (((value >> 10) << 3) & 0xF8) as u8,
                green: (((value >> 5) << 3) & 0xF8) as u8,
                blue: ((value << 3) & 0xF8) as u8,
            },
            Self::Rgb565 => RGBColorFormat {
                red: (((value >> 11) << 3) & 0xF8) as u8,
                green: (((value >> 5) << 2) & 0xFC) as u8,
                blue: ((value << 3) & 0xF8) as u8,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

impl<T> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        RGBColorFormat { red, green, blue }
    }
}

impl RGBColorFormat<u8> {
    /// Pack into the boot logo's 16 bit layout.
    ///
    /// Blue lands in the top five bits and red in the bottom five,
    /// the reverse of what the BMP decoder reads.
    pub fn pack_rgb565(&self) -> u16 {
        let red = self.red as u16;
        let green = self.green as u16;
        let blue = self.blue as u16;
        ((blue & 0xF8) << 8) | ((green & 0xFC) << 3) | ((red & 0xF8) >> 3)
    }

    /// Packed value serialized low byte first
    pub fn rgb565_le_bytes(&self) -> [u8; 2] {
        self.pack_rgb565().to_le_bytes()
    }
}
