use std::env::args_os;
use std::process::ExitCode;

use bmp2ppm::{convert_ppm_to_logo, PpmToLogoCLIParser};

fn main() -> ExitCode {
    let mut cli_parser = PpmToLogoCLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match convert_ppm_to_logo(&arguments) {
        Ok(_) => {
            println!("Conversion successful");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
