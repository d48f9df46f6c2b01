use std::env::args_os;
use std::process::ExitCode;

use bmp2ppm::{convert_bmp_to_ppm, BmpToPpmCLIParser};

fn main() -> ExitCode {
    let mut cli_parser = BmpToPpmCLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match convert_bmp_to_ppm(&arguments) {
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
