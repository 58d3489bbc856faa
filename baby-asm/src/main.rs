use std::process::ExitCode;

use log::error;
use simple_logger::SimpleLogger;

use baby_core::SimError;

fn run() -> Result<ExitCode, SimError> {
    let source_path = std::env::var("BABY_SOURCE").unwrap_or_else(|_| "assemble.txt".to_string());
    let output_path = std::env::var("BABY_OUTPUT").unwrap_or_else(|_| "output.txt".to_string());
    let log_path = std::env::var("BABY_LOG").unwrap_or_else(|_| "log.txt".to_string());

    Ok(if baby_asm::assemble_to_files(&source_path, &output_path, &log_path)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    SimpleLogger::new().init().unwrap();
    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
