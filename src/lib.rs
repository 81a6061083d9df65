// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter as if it were a real CPU architecture.
//!
//! The [CPU] owns its memory, screen, keypad, and timers. A host calls [CPU::tick]
//! once per instruction, and [CPU::tick_timers] at 60 Hz. [host::Host] does both,
//! on behalf of any [host::Frontend].
//!
//! The [CPU] owns its [Keypad]. If keys arrive on another thread, put the [CPU]
//! behind a [Mutex](std::sync::Mutex) and lock it for both input and ticking.

pub mod cpu;
pub mod error;
pub mod host;
pub mod keymap;
pub mod screen;

// Common imports for peep
pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::{Mem, ReadWrite, Region::*},
    mode::Mode,
    quirks::Quirks,
    timers::Timers,
    State, CPU,
};
pub use error::Result;
pub use screen::Screen;
