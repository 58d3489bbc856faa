//! The batch driver crate: loads an assembled binary into a
//! [`baby_core::MachineState`] and steps it to completion. The library
//! surface here is what a GUI front-end would call instead of the CLI in
//! `main.rs`.

pub mod loader;

pub use loader::load_program;

use baby_core::{step, MachineState};

/// Step `state` until it halts. Used by the batch CLI; a GUI driver would
/// instead call [`baby_core::step`] once per timer tick and render between
/// calls.
pub fn run_to_halt(state: &mut MachineState) {
    while !state.halted {
        step(state);
    }
}
