//! Loads the binary word stream produced by the assembler into a fresh
//! [`MachineState`].

use log::warn;

use baby_core::{MachineState, SimError, Word, MEMORY_SIZE};

/// Parse the binary file format (one 32-character `'0'`/`'1'` line per
/// word, a trailing `\r` tolerated and stripped) into a fresh machine.
///
/// A malformed line (length != 32 after stripping `\r`) is a fatal error:
/// loading stops before any cycle executes. A program longer than
/// [`MEMORY_SIZE`] words has its extra lines logged and ignored, since the
/// address space is fixed.
pub fn load_program(text: &str) -> Result<MachineState, SimError> {
    let mut state = MachineState::new();
    for (i, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        let word = Word::from_line(line, i)?;
        if i < MEMORY_SIZE {
            state.memory[i] = word;
        } else {
            warn!("program has more than {} words; line {} ignored", MEMORY_SIZE, i);
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use baby_core::encode_instruction;

    #[test]
    fn loads_one_word_per_line() {
        let word = encode_instruction(7, 0, false);
        let text = format!("{}\n", word.to_line());
        let state = load_program(&text).unwrap();
        assert_eq!(state.memory[0], word);
    }

    #[test]
    fn malformed_line_is_rejected_before_any_cycle() {
        let text = "0101\n";
        assert!(load_program(text).is_err());
    }

    #[test]
    fn trailing_cr_is_tolerated() {
        let word = encode_instruction(7, 0, false);
        let text = format!("{}\r\n", word.to_line());
        let state = load_program(&text).unwrap();
        assert_eq!(state.memory[0], word);
    }
}
