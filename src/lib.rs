use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::info;

pub use cli::{BmpToPpmCLIParser, PpmToLogoCLIParser};
use error::Error;
use image::{
    reader::{bmp::BmpImageReader, ppm::PPMImageReader},
    writer::{logo::LogoSourceWriter, ppm::PPMImageWriter},
    ImageReader, ImageWriter,
};

pub mod binary_stream;
mod cli;
pub mod color;
pub mod error;
pub mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct BmpToPpmArguments {
    input_file: PathBuf,
    output_file: PathBuf,
}

pub struct PpmToLogoArguments {
    input_file: PathBuf,
    output_file: PathBuf,
    logo_name: String,
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e)
    })
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e)
        })
}

/// Decode a 16 bit BMP and write it as a plain PPM.
///
/// The input file is closed before the output file is created, so a
/// rejected BMP never leaves an empty PPM behind.
pub fn convert_bmp_to_ppm(arguments: &BmpToPpmArguments) -> Result<()> {
    let image = {
        let input_file = open_input_file(&arguments.input_file)?;
        BmpImageReader::new(BufReader::new(input_file)).read_image()?
    };
    let output_file = open_output_file(&arguments.output_file)?;
    let mut writer = PPMImageWriter::new(BufWriter::new(output_file), &image);
    writer.write_image()?;
    info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        arguments.output_file.display()
    );
    Ok(())
}

/// Read a plain PPM and write it as an RGB565 boot logo C source
pub fn convert_ppm_to_logo(arguments: &PpmToLogoArguments) -> Result<()> {
    let image = {
        let input_file = open_input_file(&arguments.input_file)?;
        PPMImageReader::new(BufReader::new(input_file)).read_image()?
    };
    let output_file = open_output_file(&arguments.output_file)?;
    let source_name = arguments.input_file.display().to_string();
    let mut writer = LogoSourceWriter::new(
        BufWriter::new(output_file),
        &image,
        &arguments.logo_name,
        &source_name,
    );
    writer.write_image()?;
    info!(
        "wrote {}x{} logo '{}' to {}",
        image.width(),
        image.height(),
        arguments.logo_name,
        arguments.output_file.display()
    );
    Ok(())
}
