//! Renders the human-readable compilation trace (`log.txt`): blocks
//! introduced by `[timestamp] Phase: <name>` headers, with errors emitting
//! a `[timestamp] Error: <kind>` block followed by File/Line
//! number/Description/Suggestion lines.

use chrono::Local;

use baby_core::{AsmError, AsmErrorKind};

fn timestamp() -> String {
    Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Accumulates log lines for one compilation run and renders them in the
/// fixed external format.
#[derive(Debug, Default)]
pub struct CompileLog {
    lines: Vec<String>,
}

impl CompileLog {
    pub fn new() -> Self {
        CompileLog { lines: Vec::new() }
    }

    pub fn compilation_start(&mut self, source_name: &str) {
        self.lines
            .push(format!("[{}] Compilation Start: {}", timestamp(), source_name));
    }

    pub fn phase(&mut self, name: &str) {
        self.lines.push(String::new());
        self.lines.push(format!("[{}] Phase: {}", timestamp(), name));
    }

    pub fn note(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("- {}", text.as_ref()));
    }

    pub fn error(&mut self, source_name: &str, err: &AsmError) {
        let heading = match &err.kind {
            AsmErrorKind::LabelRedefined { label } | AsmErrorKind::LabelUndefined { label } => {
                format!("Label '{}' definition error", label)
            }
            AsmErrorKind::BadNumericLiteral { token } => format!("'{}' is not a value", token),
            AsmErrorKind::UnknownMnemonic { mnemonic } => format!("Instruction '{}' not exist", mnemonic),
            AsmErrorKind::ImmediateNotPermitted { .. } => "Wrong addressing way".to_string(),
            AsmErrorKind::OperandNotPermitted { mnemonic } => format!("'{}' takes no operand", mnemonic),
        };
        self.lines.push(String::new());
        self.lines.push(format!("[{}] Error: {}", timestamp(), heading));
        self.lines.push(format!("- File: {}", source_name));
        self.lines.push(format!("- Line number: {}", err.line));
        self.lines.push(format!("- Description: {}", err.kind));
        self.lines.push(format!("- Suggestion: {}", err.kind.suggestion()));
    }

    pub fn compilation_end(&mut self) {
        self.lines.push(String::new());
        self.lines.push(format!("[{}] Compilation end", timestamp()));
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baby_core::AsmErrorKind;

    #[test]
    fn error_block_has_required_lines() {
        let mut log = CompileLog::new();
        log.error(
            "assemble.txt",
            &AsmError::new(
                AsmErrorKind::LabelRedefined {
                    label: "LOOP".to_string(),
                },
                3,
            ),
        );
        let rendered = log.render();
        assert!(rendered.contains("Error: Label 'LOOP' definition error"));
        assert!(rendered.contains("- File: assemble.txt"));
        assert!(rendered.contains("- Line number: 3"));
        assert!(rendered.contains("- Description:"));
        assert!(rendered.contains("- Suggestion:"));
    }
}
