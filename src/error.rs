// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Peep

use crate::cpu::mem::Region;
use std::path::PathBuf;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Peep.
#[derive(Debug, Error)]
pub enum Error {
    /// Represents a breakpoint being hit
    #[error("breakpoint hit: {addr:03x} ({next:04x})")]
    BreakpointHit {
        /// The address of the breakpoint
        addr: u16,
        /// The instruction after the breakpoint
        next: u16,
    },
    /// Represents an opcode which matches no instruction
    #[error("opcode {word:04x} at {pc:03x} not recognized")]
    UnimplementedInstruction {
        /// The offending word
        word: u16,
        /// The address the word was fetched from
        pc: u16,
    },
    /// A `call` was issued with all 16 stack levels in use
    #[error("stack overflow: call at {pc:03x} exceeds {depth} levels")]
    StackOverflow {
        /// The address of the offending `call`
        pc: u16,
        /// The maximum stack depth
        depth: usize,
    },
    /// A `ret` was issued with nothing on the stack
    #[error("stack underflow: ret at {pc:03x} with an empty stack")]
    StackUnderflow {
        /// The address of the offending `ret`
        pc: u16,
    },
    /// The program doesn't fit in the region it's being loaded into
    #[error("{size} byte program does not fit in {region} ({capacity} bytes)")]
    RomTooLarge {
        /// The size of the program, in bytes
        size: usize,
        /// The [Region] the program was loaded into
        region: Region,
        /// The size of the [Region], in bytes
        capacity: usize,
    },
    /// The program file couldn't be read
    #[error("could not read {}: {source}", .path.display())]
    RomRead {
        /// The path that was read
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "minifb")]
    /// Error originated in [minifb]
    #[error(transparent)]
    MinifbError(#[from] minifb::Error),
}
