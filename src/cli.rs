use crate::image::writer::logo::DEFAULT_LOGO_NAME;
use crate::{BmpToPpmArguments, PpmToLogoArguments};
use clap::{
    arg, crate_authors, crate_version, error::ErrorKind, value_parser, Arg, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

pub struct BmpToPpmCLIParser {
    command: Command,
}

impl BmpToPpmCLIParser {
    pub fn new() -> Self {
        let command = create_base_command(
            "bmp2ppm",
            "Converts a 16 bit BMP image into a plain PPM image",
        );
        let command = Self::register_arguments(command);
        BmpToPpmCLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> BmpToPpmArguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = try_get_matches(&mut self.command, itr);
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        Self::register_output_file_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(create_input_file_argument("bmpfile", "Path to BMP input file"))
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(create_output_file_argument("ppmfile", "Path to PPM output file"))
    }

    fn extract_arguments(matches: &ArgMatches) -> BmpToPpmArguments {
        BmpToPpmArguments {
            input_file: extract_path_argument(matches, "bmpfile"),
            output_file: extract_path_argument(matches, "ppmfile"),
        }
    }
}

impl Default for BmpToPpmCLIParser {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PpmToLogoCLIParser {
    command: Command,
}

impl PpmToLogoCLIParser {
    pub fn new() -> Self {
        let command = create_base_command(
            "ppm2logo",
            "Converts a plain PPM image into an RGB565 boot logo C source",
        );
        let command = Self::register_arguments(command);
        PpmToLogoCLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> PpmToLogoArguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = try_get_matches(&mut self.command, itr);
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        Self::register_logo_name_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(create_input_file_argument("pnmfile", "Path to plain PNM input file"))
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(create_output_file_argument(
            "outputfile",
            "Path to C source output file",
        ))
    }

    fn register_logo_name_argument(command: Command) -> Command {
        command.arg(Self::create_logo_name_argument())
    }

    fn create_logo_name_argument() -> Arg {
        arg!(logo_name: -n --name <LOGO_NAME> "Name of the generated logo symbols")
            .default_value(DEFAULT_LOGO_NAME)
    }

    fn extract_arguments(matches: &ArgMatches) -> PpmToLogoArguments {
        PpmToLogoArguments {
            input_file: extract_path_argument(matches, "pnmfile"),
            output_file: extract_path_argument(matches, "outputfile"),
            logo_name: Self::extract_logo_name_argument(matches),
        }
    }

    fn extract_logo_name_argument(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("logo_name")
            .expect("Logo name must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for PpmToLogoCLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn create_base_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .version(crate_version!())
        .author(crate_authors!())
        .about(about)
}

fn create_input_file_argument(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .help(help)
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

fn create_output_file_argument(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .help(help)
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

/// Missing arguments print the usage line and end the process successfully,
/// like `--help` does.
fn try_get_matches<I, T>(command: &mut Command, itr: I) -> ArgMatches
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    command.try_get_matches_from_mut(itr).unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            println!("{}", command.render_usage());
            process::exit(0);
        }
        e.exit()
    })
}

fn extract_path_argument(matches: &ArgMatches, id: &str) -> PathBuf {
    matches
        .get_one::<PathBuf>(id)
        .unwrap_or_else(|| panic!("Required argument {} not provided", id))
        .clone()
}
