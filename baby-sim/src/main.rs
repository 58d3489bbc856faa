//! Batch driver: assemble -> load -> step until halt. Takes no flags; see
//! the crate-level docs of `baby-asm` for the `BABY_SOURCE`/`BABY_OUTPUT`/
//! `BABY_LOG` overrides also honored here.

use std::fs;
use std::process::ExitCode;

use log::{error, info};
use simple_logger::SimpleLogger;

use baby_core::SimError;

fn run() -> Result<ExitCode, SimError> {
    let source_path = std::env::var("BABY_SOURCE").unwrap_or_else(|_| "assemble.txt".to_string());
    let output_path = std::env::var("BABY_OUTPUT").unwrap_or_else(|_| "output.txt".to_string());
    let log_path = std::env::var("BABY_LOG").unwrap_or_else(|_| "log.txt".to_string());

    if !baby_asm::assemble_to_files(&source_path, &output_path, &log_path)? {
        return Ok(ExitCode::FAILURE);
    }

    let binary = fs::read_to_string(&output_path)?;
    if binary.trim().is_empty() {
        error!("assembly produced no binary");
        return Ok(ExitCode::FAILURE);
    }

    let mut state = baby_sim::load_program(&binary)?;
    baby_sim::run_to_halt(&mut state);

    info!(
        "halted after {} round(s): accumulator = {}",
        state.cur_round,
        state.accumulator_signed()
    );
    Ok(ExitCode::SUCCESS)
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
