//! Two-pass assembler: pass 1 scans labels into a [`SymbolTable`], pass 2
//! parses each retained line, resolves operands, classifies addressing
//! mode, and asks [`baby_core::codec`] to encode one word per line.

use log::debug;

use baby_core::{encode_instruction, encode_value, AsmError, AsmErrorKind, Opcode, SymbolTable, Word};

use crate::log::CompileLog;

const VAR: &str = "VAR";

/// Slice off everything from the first `;` onward: the code before a
/// trailing line comment, or the whole line if there is no comment.
fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// One non-blank, non-comment source line, already assigned its address.
struct RetainedLine<'a> {
    address: u32,
    text: &'a str,
}

/// Result of a successful compile: the emitted words, in address order,
/// plus the full compilation log.
#[derive(Debug)]
pub struct CompileOutput {
    pub words: Vec<Word>,
    pub log: CompileLog,
}

/// Compile `source` (the full text of the assembly file) to a binary word
/// stream. On success, returns every emitted word and the compilation log.
/// On failure, returns the fatal error alongside the log accumulated up to
/// the point of failure — no partial binary is ever emitted.
pub fn compile(source: &str, source_name: &str) -> Result<CompileOutput, (AsmError, CompileLog)> {
    let mut log = CompileLog::new();
    log.compilation_start(source_name);
    log.note("Load file successfully");

    match compile_inner(source, &mut log) {
        Ok(words) => {
            log.phase("Code generating");
            log.note("Code generating completion");
            log.phase("Compiler Configuration");
            log.note("Assembler name: Assembler baby");
            log.note("Assembler version: v1.0");
            log.compilation_end();
            Ok(CompileOutput { words, log })
        }
        Err(err) => {
            log.error(source_name, &err);
            log.phase("Code generating");
            log.note("Skip due to error");
            log.phase("Compiler Configuration");
            log.note("Assembler name: Assembler baby");
            log.note("Assembler version: v1.0");
            log.compilation_end();
            Err((err, log))
        }
    }
}

fn compile_inner(source: &str, log: &mut CompileLog) -> Result<Vec<Word>, AsmError> {
    log.phase("Preprocessing");
    log.note("Scan labels and except empty lines");

    let mut symbols = SymbolTable::new();
    let mut retained: Vec<RetainedLine> = Vec::new();
    let mut address = 0u32;

    for raw_line in source.lines() {
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        let code = strip_comment(line);
        if let Some(colon) = code.find(':') {
            let label = line[..colon].trim().to_string();
            if symbols.contains(&label) {
                return Err(AsmError::new(
                    AsmErrorKind::LabelRedefined { label },
                    address as usize,
                ));
            }
            log.note(format!("Add label '{}' to symbol table", label));
            symbols.add(&label, address);
        }
        retained.push(RetainedLine { address, text: line });
        address += 1;
    }
    log.note("Preprocessing completion");

    log.phase("Parsing");
    log.note("Construct SymbolTable and parsing instructions");

    let mut words = Vec::with_capacity(retained.len());
    for line in &retained {
        log.note(format!("Assembling line {}: {}", line.address, line.text));
        let word = assemble_line(line.text, line.address, &symbols)?;
        log.note(format!("Complete assembling code: {}", word.to_line()));
        debug!("line {}: {} -> {}", line.address, line.text, word.to_line());
        words.push(word);
    }
    log.note("Parsing completion");

    Ok(words)
}

/// Strip a leading `label:` prefix (and the whitespace after it) if present.
/// A colon inside a trailing `;` comment does not count as a label.
fn strip_label(line: &str) -> &str {
    let code = strip_comment(line);
    match code.find(':') {
        Some(pos) => line[pos + 1..].trim_start(),
        None => line,
    }
}

/// Split the remainder of a line (after any label) into an opcode token and
/// an optional operand token, ignoring anything from the first `;` onward.
fn tokenize(rest: &str) -> (String, Option<String>) {
    let code = strip_comment(rest);
    let mut tokens = code.split_whitespace();
    let mnemonic = tokens.next().unwrap_or("").to_string();
    let operand = tokens.next().map(|s| s.to_string());
    (mnemonic, operand)
}

fn parse_var_literal(token: &str) -> Option<i32> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i32>().ok()
}

/// Parse the digits of an immediate literal, already stripped of its `#`.
fn parse_immediate_literal(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}

fn assemble_line(line: &str, address: u32, symbols: &SymbolTable) -> Result<Word, AsmError> {
    let rest = strip_label(line);
    let (mnemonic, operand) = tokenize(rest);

    if mnemonic == VAR {
        let token = operand.unwrap_or_default();
        let value = parse_var_literal(&token)
            .ok_or_else(|| AsmError::new(AsmErrorKind::BadNumericLiteral { token: token.clone() }, address as usize))?;
        return Ok(encode_value(value));
    }

    let opcode = Opcode::from_mnemonic(&mnemonic).ok_or_else(|| {
        AsmError::new(
            AsmErrorKind::UnknownMnemonic {
                mnemonic: mnemonic.clone(),
            },
            address as usize,
        )
    })?;

    if operand.as_deref().map_or(true, str::is_empty) {
        if opcode.takes_no_operand() {
            return Ok(encode_instruction(opcode.code(), 0, false));
        }
        // A required operand is missing; there is no valid token to resolve,
        // so this falls through to the same "undefined label" diagnosis a
        // present-but-unresolvable label reference would produce.
        return Err(AsmError::new(
            AsmErrorKind::LabelUndefined { label: String::new() },
            address as usize,
        ));
    }
    let token = operand.unwrap();

    if opcode.takes_no_operand() {
        return Err(AsmError::new(
            AsmErrorKind::OperandNotPermitted { mnemonic },
            address as usize,
        ));
    }

    if let Some(stripped) = token.strip_prefix('#') {
        if !opcode.allows_immediate() {
            return Err(AsmError::new(
                AsmErrorKind::ImmediateNotPermitted { mnemonic },
                address as usize,
            ));
        }
        let value = parse_immediate_literal(stripped).ok_or_else(|| {
            AsmError::new(
                AsmErrorKind::BadNumericLiteral {
                    token: stripped.to_string(),
                },
                address as usize,
            )
        })?;
        return Ok(encode_instruction(opcode.code(), value, true));
    }

    let resolved = symbols.lookup(&token).ok_or_else(|| {
        AsmError::new(AsmErrorKind::LabelUndefined { label: token.clone() }, address as usize)
    })?;
    Ok(encode_instruction(opcode.code(), resolved, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use baby_core::word_to_signed;

    fn assemble_ok(source: &str) -> Vec<Word> {
        compile(source, "assemble.txt").unwrap_or_else(|(e, _)| panic!("unexpected error: {}", e)).words
    }

    #[test]
    fn empty_source_yields_empty_binary() {
        let words = assemble_ok("");
        assert!(words.is_empty());
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let words = assemble_ok("\n; a comment\nSTP\n");
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn word_count_matches_instruction_lines() {
        let source = "LDP #1\nADD #2\nSTP\n";
        let words = assemble_ok(source);
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn duplicate_label_is_error_100() {
        let source = "X: STP\nX: STP\n";
        let (err, _) = compile(source, "assemble.txt").unwrap_err();
        assert_eq!(err.kind.code(), 100);
        assert_eq!(err.kind.token(), "X");
    }

    #[test]
    fn undefined_label_is_error_101() {
        let source = "JMP MISSING\n";
        let (err, _) = compile(source, "assemble.txt").unwrap_err();
        assert_eq!(err.kind.code(), 101);
    }

    #[test]
    fn bad_var_literal_is_error_102() {
        let source = "X: VAR abc\n";
        let (err, _) = compile(source, "assemble.txt").unwrap_err();
        assert_eq!(err.kind.code(), 102);
    }

    #[test]
    fn unknown_mnemonic_is_error_103() {
        let source = "FOO\n";
        let (err, _) = compile(source, "assemble.txt").unwrap_err();
        assert_eq!(err.kind.code(), 103);
    }

    #[test]
    fn immediate_on_sto_is_error_104() {
        let source = "STO #1\n";
        let (err, _) = compile(source, "assemble.txt").unwrap_err();
        assert_eq!(err.kind.code(), 104);
    }

    #[test]
    fn var_minus_one_round_trips_through_codec() {
        let words = assemble_ok("X: VAR -1\n");
        assert_eq!(word_to_signed(words[0]), -1);
    }

    #[test]
    fn labeled_operand_resolves_to_its_address() {
        let source = "JMP TARGET\nTARGET: STP\n";
        let words = assemble_ok(source);
        let decoded = baby_core::decode_word(words[0]);
        assert_eq!(decoded.operand, 1);
    }

    #[test]
    fn colon_inside_a_comment_is_not_a_label() {
        let source = "ADD X ; ratio: 2\nX: VAR 3\n";
        let words = assemble_ok(source);
        assert_eq!(words.len(), 2);
        let decoded = baby_core::decode_word(words[0]);
        assert_eq!(decoded.operand, 1);
    }

    #[test]
    fn indented_label_still_resolves() {
        let source = "    X: STP\nJMP X\n";
        let words = assemble_ok(source);
        let decoded = baby_core::decode_word(words[1]);
        assert_eq!(decoded.operand, 0);
    }

    #[test]
    fn whitespace_before_colon_is_trimmed_from_label() {
        let source = "X : STP\nJMP X\n";
        let words = assemble_ok(source);
        let decoded = baby_core::decode_word(words[1]);
        assert_eq!(decoded.operand, 0);
    }

    #[test]
    fn operand_on_no_operand_opcode_is_error_105() {
        let source = "X: VAR 1\nSTP X\n";
        let (err, _) = compile(source, "assemble.txt").unwrap_err();
        assert_eq!(err.kind.code(), 105);
        assert_eq!(err.kind.token(), "STP");
    }
}

