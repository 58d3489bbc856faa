//! Error types shared by the assembler and the simulator.
//!
//! The original Manchester Baby toolchain signalled assembler errors by
//! building strings of the form `"NNNlllTOKEN"` (error code, three reversed
//! decimal digits of line number, then the offending token) and throwing
//! them as C++ exceptions; callers parsed the string back apart to recover
//! the fields. Here the fields are carried directly on a typed variant, and
//! the numbered log format of the original is preserved only in
//! [`AsmErrorKind::code`] and `Display`.

use thiserror::Error;

/// One of the five numbered assembler error kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error("label '{label}' is defined more than once")]
    LabelRedefined { label: String },
    #[error("label '{label}' is not defined")]
    LabelUndefined { label: String },
    #[error("'{token}' should be a signed 32-bit integer but is not")]
    BadNumericLiteral { token: String },
    #[error("instruction '{mnemonic}' is not in the instruction set")]
    UnknownMnemonic { mnemonic: String },
    #[error("'{mnemonic}' can't support immediate addressing")]
    ImmediateNotPermitted { mnemonic: String },
    #[error("'{mnemonic}' does not take an operand")]
    OperandNotPermitted { mnemonic: String },
}

impl AsmErrorKind {
    /// The numbered error code used in the compilation log.
    pub fn code(&self) -> u32 {
        match self {
            AsmErrorKind::LabelRedefined { .. } => 100,
            AsmErrorKind::LabelUndefined { .. } => 101,
            AsmErrorKind::BadNumericLiteral { .. } => 102,
            AsmErrorKind::UnknownMnemonic { .. } => 103,
            AsmErrorKind::ImmediateNotPermitted { .. } => 104,
            AsmErrorKind::OperandNotPermitted { .. } => 105,
        }
    }

    /// The offending token echoed back in the log's Description line.
    pub fn token(&self) -> &str {
        match self {
            AsmErrorKind::LabelRedefined { label } => label,
            AsmErrorKind::LabelUndefined { label } => label,
            AsmErrorKind::BadNumericLiteral { token } => token,
            AsmErrorKind::UnknownMnemonic { mnemonic } => mnemonic,
            AsmErrorKind::ImmediateNotPermitted { mnemonic } => mnemonic,
            AsmErrorKind::OperandNotPermitted { mnemonic } => mnemonic,
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            AsmErrorKind::LabelRedefined { .. } => "Check whether the label name is spelled correctly",
            AsmErrorKind::LabelUndefined { .. } => {
                "Check whether the operand name in the instruction is spelled correctly"
            }
            AsmErrorKind::BadNumericLiteral { .. } => "Check whether the value is entered correctly",
            AsmErrorKind::UnknownMnemonic { .. } => "Check whether the instruction is spelled correctly",
            AsmErrorKind::ImmediateNotPermitted { .. } => "Check whether the instruction is spelled correctly",
            AsmErrorKind::OperandNotPermitted { .. } => "Check whether the instruction requires an operand",
        }
    }
}

/// A fatal assembler error, carrying the source line it was raised on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub kind: AsmErrorKind,
    pub line: usize,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind, line: usize) -> Self {
        AsmError { kind, line }
    }
}

/// Errors raised while loading a binary file, writing output, or executing
/// a cycle.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("line {line} in program file has {len} bits, expected 32")]
    MalformedLine { line: usize, len: usize },
    #[error("decoded opcode {opcode} is outside the known instruction set")]
    UnknownOpcode { opcode: u8 },
    #[error("division or modulo by zero")]
    DivisionByZero,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for SimError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SimError::MalformedLine { line: l1, len: n1 }, SimError::MalformedLine { line: l2, len: n2 }) => {
                l1 == l2 && n1 == n2
            }
            (SimError::UnknownOpcode { opcode: o1 }, SimError::UnknownOpcode { opcode: o2 }) => o1 == o2,
            (SimError::DivisionByZero, SimError::DivisionByZero) => true,
            _ => false,
        }
    }
}
