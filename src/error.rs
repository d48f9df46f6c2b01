use std::fmt::Display;
use std::io;

#[derive(Debug)]
pub enum Error {
    NotABmpFile,
    UnsupportedFormat(String),
    UnsupportedCompression(u32),
    TruncatedPayload { expected: usize, actual: usize },
    NotAPnmFile,
    BinaryNotSupported(char),
    InvalidNumberToken(u8),
    NumberTooLarge,
    InvalidMaxValue,
    ColorValueExceedsMaxValue { value: u32, max_value: u32 },
    UnexpectedEndOfStream,
    ReadError(io::Error),
    WriteError(io::Error),
    UnableToOpenInputFileForReading(String, io::Error),
    UnableToOpenOutputFileForWriting(String, io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotABmpFile => write!(f, "Input is not a BMP file"),
            Self::UnsupportedFormat(reason) => {
                write!(f, "Unsupported image format: {}", reason)
            }
            Self::UnsupportedCompression(compression) => {
                write!(
                    f,
                    "Unsupported BMP compression {}, compression should be 0 or 3",
                    compression
                )
            }
            Self::TruncatedPayload { expected, actual } => {
                write!(
                    f,
                    "Pixel data is truncated. Expected {} bytes, but got {}.",
                    expected, actual
                )
            }
            Self::NotAPnmFile => write!(f, "Input is not a PNM file"),
            Self::BinaryNotSupported(format) => {
                write!(f, "Binary PNM format 'P{}' is not supported", format)
            }
            Self::InvalidNumberToken(byte) => {
                write!(
                    f,
                    "Expected a decimal digit, but found {:?}",
                    char::from(*byte)
                )
            }
            Self::NumberTooLarge => write!(f, "Numeric token does not fit into 32 bits"),
            Self::InvalidMaxValue => write!(f, "Max value of PNM file must not be 0"),
            Self::ColorValueExceedsMaxValue { value, max_value } => {
                write!(
                    f,
                    "Color value {} is greater than max value of {}",
                    value, max_value
                )
            }
            Self::UnexpectedEndOfStream => write!(f, "Unexpected end of stream"),
            Self::ReadError(error) => write!(f, "Failed to read input: {}", error),
            Self::WriteError(error) => write!(f, "Failed to write output: {}", error),
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadError(error)
            | Self::WriteError(error)
            | Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        match value.kind() {
            io::ErrorKind::UnexpectedEof => Self::UnexpectedEndOfStream,
            _ => Self::ReadError(value),
        }
    }
}
