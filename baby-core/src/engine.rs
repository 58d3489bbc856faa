//! Fetch-decode-execute-advance: the simulator's single stepping function.

use log::{debug, error, info, warn};

use crate::codec::{decode_word, encode_value, word_to_signed, Word};
use crate::error::SimError;
use crate::machine::{MachineState, MEMORY_SIZE};
use crate::opcode::Opcode;

fn mem_index(operand: u32) -> usize {
    (operand as usize) % MEMORY_SIZE
}

fn normalize_ci(value: i64) -> usize {
    value.rem_euclid(MEMORY_SIZE as i64) as usize
}

/// The signed value an arithmetic/jump opcode operates on: drawn from
/// memory, or from the operand field itself when the immediate flag is set.
fn operand_value(state: &MachineState, operand: u32, immediate: bool) -> i32 {
    if immediate {
        operand as i32
    } else {
        word_to_signed(state.memory[mem_index(operand)])
    }
}

/// Run one fetch-decode-execute-advance cycle. No-op if the machine is
/// already halted (`STP` is idempotent).
pub fn step(state: &mut MachineState) {
    if state.halted {
        return;
    }

    // Fetch.
    state.pi = state.memory[state.ci];

    // Decode.
    let decoded = decode_word(state.pi);
    state.cur_operand = decoded.operand;
    state.cur_im_addressing = decoded.immediate;
    state.cur_round += 1;

    match Opcode::from_raw(decoded.raw_opcode) {
        None => {
            warn!(
                "unknown opcode {} at ci={}, halting",
                decoded.raw_opcode, state.ci
            );
            state.cur_opcode = None;
            state.halted = true;
            state.last_error = Some(SimError::UnknownOpcode {
                opcode: decoded.raw_opcode,
            });
        }
        Some(opcode) => {
            state.cur_opcode = Some(opcode);
            debug!(
                "round {}: ci={} {} operand={} immediate={}",
                state.cur_round, state.ci, opcode, decoded.operand, decoded.immediate
            );
            if let Err(err) = execute(state, opcode, decoded.operand, decoded.immediate) {
                error!("{} at ci={}: {}", opcode, state.ci, err);
                state.halted = true;
                state.last_error = Some(err);
            }
        }
    }

    // Advance. Unconditional: even JMP's own CI write is followed by this
    // increment, matching the historical Baby (see module docs on the
    // execution engine in the crate root for why).
    state.prev_ci = state.ci;
    state.ci = normalize_ci(state.ci as i64 + 1);
}

fn execute(state: &mut MachineState, opcode: Opcode, operand: u32, immediate: bool) -> Result<(), SimError> {
    match opcode {
        Opcode::Jmp => {
            let target = operand_value(state, operand, immediate);
            state.ci = normalize_ci(target as i64);
        }
        Opcode::Jrp => {
            let delta = operand_value(state, operand, immediate);
            state.ci = normalize_ci(state.ci as i64 + delta as i64);
        }
        Opcode::Ldn => {
            let s = operand_value(state, operand, immediate);
            state.accumulator = encode_value(s.wrapping_neg());
        }
        Opcode::Sto => {
            state.memory[mem_index(operand)] = state.accumulator;
        }
        Opcode::Sub => {
            let s = operand_value(state, operand, immediate);
            let a = state.accumulator_signed();
            state.accumulator = encode_value(a.wrapping_sub(s));
        }
        Opcode::Cmp => {
            if state.accumulator_signed() < 0 {
                state.ci = normalize_ci(state.ci as i64 + 1);
            }
        }
        Opcode::Stp => {
            info!("STP reached at ci={}, halting", state.ci);
            state.halted = true;
        }
        Opcode::Ldp => {
            let s = operand_value(state, operand, immediate);
            state.accumulator = encode_value(s);
        }
        Opcode::Add => {
            let s = operand_value(state, operand, immediate);
            let a = state.accumulator_signed();
            state.accumulator = encode_value(a.wrapping_add(s));
        }
        Opcode::Div => {
            let s = operand_value(state, operand, immediate);
            if s == 0 {
                return Err(SimError::DivisionByZero);
            }
            let a = state.accumulator_signed();
            state.accumulator = encode_value(a.wrapping_div(s));
        }
        Opcode::Mod => {
            let s = operand_value(state, operand, immediate);
            if s == 0 {
                return Err(SimError::DivisionByZero);
            }
            let a = state.accumulator_signed();
            state.accumulator = encode_value(a.wrapping_rem(s));
        }
        Opcode::Lan => {
            let mem = state.memory[mem_index(operand)];
            state.accumulator = Word(state.accumulator.0 & mem.0);
        }
        Opcode::Lor => {
            let mem = state.memory[mem_index(operand)];
            state.accumulator = Word(state.accumulator.0 | mem.0);
        }
        Opcode::Lnt => {
            state.accumulator = Word(!state.accumulator.0);
        }
        Opcode::Shl => {
            state.accumulator = Word(state.accumulator.0 << 1);
        }
        Opcode::Shr => {
            state.accumulator = Word(state.accumulator.0 >> 1);
        }
    }
    Ok(())
}
