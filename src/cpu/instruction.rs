// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]
//!
//! `0aaa` (a call into host machine code on the COSMAC VIP) is deliberately
//! absent: no interpreter can run it, so it decodes as an unknown opcode.

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
/// A decoded Chip-8 instruction
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    #[opcode = "0x00e0"]
    cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    ret,
    /// | 1aaa | Jumps to an absolute address
    #[opcode = "0x1AAA"]
    jp { A: u16 },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// | 3xbb | Skips next instruction if register X == b
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// | 4xbb | Skips next instruction if register X != b
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// | 5xy0 | Skips next instruction if vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// | 6xbb | Loads immediate byte b into register vX
    #[opcode = "0x6xBB"]
    ldb { B: u8, x: usize },
    /// | 7xbb | Adds immediate byte b to register vX
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// | 8xy0 | Loads the value of vY into vX
    #[opcode = "0x8xy0"]
    ld { y: usize, x: usize },
    /// | 8xy1 | Bitwise or of vX and vY, stored in vX
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// | 8xy2 | Bitwise and of vX and vY, stored in vX
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// | 8xy3 | Bitwise xor of vX and vY, stored in vX
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// | 8xy4 | vX + vY, stored in vX. vF = carry
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// | 8xy5 | vX - vY, stored in vX. vF = !borrow
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// | 8xy6 | vX >> 1 (or vY >> 1), stored in vX. vF = bit shifted out
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// | 8xy7 | vY - vX, stored in vX. vF = !borrow
    #[opcode = "0x8xy7"]
    subn { y: usize, x: usize },
    /// | 8xyE | vX << 1 (or vY << 1), stored in vX. vF = bit shifted out
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// | 9xy0 | Skips next instruction if vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// | Aaaa | Loads address a into register I
    #[opcode = "0xaAAA"]
    ldi { A: u16 },
    /// | Baaa | Jumps to a + v0
    #[opcode = "0xbAAA"]
    jpr { A: u16 },
    /// | Cxbb | Stores a random number & b into vX
    #[opcode = "0xcxBB"]
    rnd { B: u8, x: usize },
    /// | Dxyn | Draws n-byte sprite at I to the screen at (vX, vY)
    #[opcode = "0xdxyn"]
    drw { y: usize, x: usize, n: u8 },
    /// | Ex9E | Skips next instruction if key vX is held
    #[opcode = "0xex9e"]
    skp { x: usize },
    /// | ExA1 | Skips next instruction if key vX is not held
    #[opcode = "0xexa1"]
    sknp { x: usize },
    /// | Fx07 | Loads the delay timer into vX
    #[opcode = "0xfx07"]
    lddt { x: usize },
    /// | Fx0A | Waits for a key press, and stores the key in vX
    #[opcode = "0xfx0a"]
    ldk { x: usize },
    /// | Fx15 | Loads vX into the delay timer
    #[opcode = "0xfx15"]
    stdt { x: usize },
    /// | Fx18 | Loads vX into the sound timer
    #[opcode = "0xfx18"]
    stst { x: usize },
    /// | Fx1E | Adds vX to I
    #[opcode = "0xfx1e"]
    addi { x: usize },
    /// | Fx29 | Loads the address of the font character vX into I
    #[opcode = "0xfx29"]
    font { x: usize },
    /// | Fx33 | Stores the decimal digits of vX at I, I+1, I+2
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// | Fx55 | Stores v0..=vX at I
    #[opcode = "0xfx55"]
    stor { x: usize },
    /// | Fx65 | Loads v0..=vX from I
    #[opcode = "0xfx65"]
    load { x: usize },
}

impl Insn {
    /// Decodes a single big-endian instruction word.
    ///
    /// Returns [None] if the word isn't a Chip-8 instruction.
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// assert_eq!(Some(Insn::cls), Insn::from_word(0x00e0));
    /// assert_eq!(Some(Insn::drw { x: 1, y: 2, n: 5 }), Insn::from_word(0xd125));
    /// assert_eq!(None, Insn::from_word(0x0123));
    /// assert_eq!(None, Insn::from_word(0x8008));
    /// ```
    pub fn from_word(word: u16) -> Option<Self> {
        match Insn::decode(&word.to_be_bytes()) {
            Ok((_, insn)) => Some(insn),
            _ => None,
        }
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jp { A }          => write!(f, "jp     {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     v{x:X}, #{B:02x}"),
            Insn::sneb { B, x }     => write!(f, "sne    v{x:X}, #{B:02x}"),
            Insn::se { y, x }       => write!(f, "se     v{x:X}, v{y:X}"),
            Insn::ldb { B, x }      => write!(f, "ld     v{x:X}, #{B:02x}"),
            Insn::addb { B, x }     => write!(f, "add    v{x:X}, #{B:02x}"),
            Insn::ld { y, x }       => write!(f, "ld     v{x:X}, v{y:X}"),
            Insn::or { y, x }       => write!(f, "or     v{x:X}, v{y:X}"),
            Insn::and { y, x }      => write!(f, "and    v{x:X}, v{y:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{x:X}, v{y:X}"),
            Insn::add { y, x }      => write!(f, "add    v{x:X}, v{y:X}"),
            Insn::sub { y, x }      => write!(f, "sub    v{x:X}, v{y:X}"),
            Insn::shr { y, x }      => write!(f, "shr    v{x:X}, v{y:X}"),
            Insn::subn { y, x }     => write!(f, "subn   v{x:X}, v{y:X}"),
            Insn::shl { y, x }      => write!(f, "shl    v{x:X}, v{y:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{x:X}, v{y:X}"),
            Insn::ldi { A }         => write!(f, "ld     I, ${A:03x}"),
            Insn::jpr { A }         => write!(f, "jp     v0, ${A:03x}"),
            Insn::rnd { B, x }      => write!(f, "rnd    v{x:X}, #{B:02x}"),
            Insn::drw { y, x, n }   => write!(f, "drw    v{x:X}, v{y:X}, #{n:x}"),
            Insn::skp { x }         => write!(f, "skp    v{x:X}"),
            Insn::sknp { x }        => write!(f, "sknp   v{x:X}"),
            Insn::lddt { x }        => write!(f, "ld     v{x:X}, DT"),
            Insn::ldk { x }         => write!(f, "ld     v{x:X}, K"),
            Insn::stdt { x }        => write!(f, "ld     DT, v{x:X}"),
            Insn::stst { x }        => write!(f, "ld     ST, v{x:X}"),
            Insn::addi { x }        => write!(f, "add    I, v{x:X}"),
            Insn::font { x }        => write!(f, "ld     F, v{x:X}"),
            Insn::bcd { x }         => write!(f, "ld     B, v{x:X}"),
            Insn::stor { x }        => write!(f, "ld     [I], v{x:X}"),
            Insn::load { x }        => write!(f, "ld     v{x:X}, [I]"),
        }
    }
}
