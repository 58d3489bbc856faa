//! Two-pass assembler for the Manchester-Baby-style machine defined by
//! `baby-core`: label scanning, opcode lookup, operand classification, and
//! bit-level encoding, plus a structured human-readable compilation log.

pub mod assembler;
pub mod log;

pub use assembler::{compile, CompileOutput};
pub use log::CompileLog;

use std::fs;

use baby_core::SimError;
use ::log::{error, info};

/// Read `source_path`, compile it, and write both `output_path` (the binary
/// word stream) and `log_path` (the compilation log), regardless of
/// outcome. Returns `Ok(true)` if assembly succeeded, `Ok(false)` if it
/// failed — the failure is already logged to `log_path` and via the `log`
/// crate, so a caller need only decide its exit code. File I/O failures
/// are the only way this returns `Err`.
///
/// Shared by the `baby-asm` and `baby-sim` binaries, which otherwise differ
/// only in what they do after a successful assembly.
pub fn assemble_to_files(source_path: &str, output_path: &str, log_path: &str) -> Result<bool, SimError> {
    let source = fs::read_to_string(source_path)?;

    match compile(&source, source_path) {
        Ok(output) => {
            let mut binary: String = output
                .words
                .iter()
                .map(|w| w.to_line())
                .collect::<Vec<_>>()
                .join("\n");
            if !output.words.is_empty() {
                binary.push('\n');
            }
            fs::write(output_path, binary)?;
            fs::write(log_path, output.log.render())?;
            info!("assembled {} word(s) to {}", output.words.len(), output_path);
            Ok(true)
        }
        Err((err, log)) => {
            error!("assembly failed: {}", err);
            fs::write(log_path, log.render())?;
            Ok(false)
        }
    }
}
