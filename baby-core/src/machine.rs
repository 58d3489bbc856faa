//! The machine's register file and memory: pure data, mutated only by the
//! execution engine and by [`MachineState::reset`].

use crate::codec::Word;
use crate::error::SimError;
use crate::opcode::Opcode;

/// Number of words of memory. The operand field is 13 bits wide, but this
/// machine's address space is fixed at 32 words, matching the original
/// Baby; addresses wrap modulo this size, not modulo the operand field.
pub const MEMORY_SIZE: usize = 32;

/// The full register/memory state of one simulator instance.
#[derive(Debug)]
pub struct MachineState {
    pub memory: [Word; MEMORY_SIZE],
    /// Control instruction: the program counter, in `[0, MEMORY_SIZE)`.
    pub ci: usize,
    /// `ci` as of the start of the last executed cycle, kept for display.
    pub prev_ci: usize,
    /// Present instruction: the word most recently fetched.
    pub pi: Word,
    pub accumulator: Word,
    pub halted: bool,
    pub cur_opcode: Option<Opcode>,
    pub cur_operand: u32,
    pub cur_im_addressing: bool,
    pub cur_round: u64,
    /// Set when a cycle halts the machine due to a [`SimError`] rather than
    /// a `STP` instruction (unknown opcode, division by zero).
    pub last_error: Option<SimError>,
}

impl MachineState {
    pub fn new() -> Self {
        MachineState {
            memory: [Word::zero(); MEMORY_SIZE],
            ci: 0,
            prev_ci: 0,
            pi: Word::zero(),
            accumulator: Word::zero(),
            halted: false,
            cur_opcode: None,
            cur_operand: 0,
            cur_im_addressing: false,
            cur_round: 0,
            last_error: None,
        }
    }

    pub fn accumulator_signed(&self) -> i32 {
        crate::codec::word_to_signed(self.accumulator)
    }

    /// Zero every register, clear the halt flag, and reallocate a zeroed
    /// memory. Used by the driver to recover from `STP` or from a manual
    /// `set_halt(true)` between runs.
    pub fn reset(&mut self) {
        *self = MachineState::new();
    }

    /// Manually halt or resume the machine. Mirrors the original's
    /// GUI-facing `setHalt`, used by a driver to cancel a run between
    /// steps.
    pub fn set_halt(&mut self, halt: bool) {
        self.halted = halt;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

impl Default for MachineState {
    fn default() -> Self {
        MachineState::new()
    }
}
