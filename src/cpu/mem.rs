// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! The flat 4 KiB address space of the Chip-8
//!
//! Every access wraps modulo [MEM_SIZE]; there is no such thing as an
//! out-of-range address.

pub mod read;
pub use read::ReadWrite;

use crate::error::{Error, Result};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::Range,
};

/// Size of the address space, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Location of the hexadecimal font in memory
pub const FONT_ADDR: u16 = 0x050;
/// Location programs are loaded to, and where execution starts
pub const PROGRAM_ADDR: u16 = 0x200;
/// Size of one font character, in bytes
pub const CHAR_SIZE: u16 = 5;

/// The hexadecimal font, `0` through `F`
#[rustfmt::skip]
pub const CHARSET: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the address range covered by this [Region]
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// assert_eq!(0x200..0x1000, Program.range());
    /// assert_eq!(3584, Program.range().len());
    /// ```
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_ADDR as usize..FONT_ADDR as usize + CHARSET.len(),
            Region::Program => PROGRAM_ADDR as usize..MEM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Stores the 4 KiB of Chip-8 memory
#[derive(Clone, PartialEq, Eq)]
pub struct Mem {
    memory: Box<[u8; MEM_SIZE]>,
}

impl Mem {
    /// Constructs zeroed memory with the font loaded
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mem = Mem::new();
    /// assert_eq!(0x1000, mem.len());
    /// assert_eq!(&[0xf0, 0x90, 0x90, 0x90, 0xf0], &mem.get_region(Charset)[..5]);
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: Box::new([0; MEM_SIZE]),
        };
        mem.get_region_mut(Region::Charset).copy_from_slice(&CHARSET);
        mem
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements (it never does)
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Wraps an address into the address space
    #[inline(always)]
    pub fn wrap(addr: usize) -> usize {
        addr % MEM_SIZE
    }

    /// Gets the whole address space as a slice
    pub fn as_slice(&self) -> &[u8] {
        self.memory.as_slice()
    }

    /// Gets a slice of a named [Region] of memory
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a mutable slice of a named [Region] of memory
    pub fn get_region_mut(&mut self, name: Region) -> &mut [u8] {
        &mut self.memory[name.range()]
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.get_region_mut(name).fill(0);
        self
    }

    /// Loads data into the start of a named [Region].
    ///
    /// Returns [Error::RomTooLarge] without touching memory if the data won't fit.
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_region(Program, b"Hello, world!")?;
    /// assert_eq!(b"Hello", &mem.get_region(Program)[..5]);
    ///
    /// assert!(mem.load_region(Program, &[0; 0x1000]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = self.get_region_mut(name);
        if data.len() > region.len() {
            return Err(Error::RomTooLarge {
                size: data.len(),
                region: name,
                capacity: region.len(),
            });
        }
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Fills `out` with the bytes starting at `addr`, wrapping at the end
    pub fn read_bytes(&self, addr: usize, out: &mut [u8]) {
        for (offset, byte) in out.iter_mut().enumerate() {
            *byte = self.memory[Self::wrap(addr + offset)];
        }
    }

    /// Copies `data` into memory starting at `addr`, wrapping at the end
    pub fn write_bytes(&mut self, addr: usize, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.memory[Self::wrap(addr + offset)] = *byte;
        }
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mem")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Prints a hexdump of the whole address space, green phosphor style
impl Display for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let term: Style = Style::new().bold().green().on_black();
        for (index, byte) in self.memory.iter().enumerate() {
            if index % 16 == 0 {
                write!(f, "{:>03x}{} ", index.style(term), ":".style(term))?
            }
            write!(f, "{byte:02x}")?;
            match index % 16 {
                0xf => writeln!(f)?,
                0x7 => write!(f, "  ")?,
                _ if index % 2 == 1 => write!(f, " ")?,
                _ => (),
            }
        }
        Ok(())
    }
}
