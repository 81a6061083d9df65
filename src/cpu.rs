// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod alu;
pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod keypad;
pub mod mem;
pub mod mode;
pub mod quirks;
pub mod timers;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::{Mem, ReadWrite, Region::*, MEM_SIZE, PROGRAM_ADDR},
    mode::Mode,
    quirks::Quirks,
    timers::Timers,
};
use crate::{
    error::{Error, Result},
    screen::Screen,
};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::{fmt::Debug, path::Path};

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// The number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// The externally visible execution state of the [CPU]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Executing one instruction per [CPU::tick]
    #[default]
    Running,
    /// Suspended on `Fx0A` until a key is pressed. The key will be stored in `v[reg]`.
    BlockedOnKey {
        /// The destination register
        reg: usize,
    },
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], debug mode, pause, etc.
    pub flags: Flags,
    // peripherals
    mem: Mem,
    screen: Screen,
    keypad: Keypad,
    timers: Timers,
    // registers
    stack: Vec<Adr>,
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    // Execution data
    state: State,
    cycle: usize,
    breakpoints: Vec<Adr>,
    program: Vec<u8>,
    rng: StdRng,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU, and loads the program at path `rom` into it
    /// # Examples
    /// ```rust,no_run
    /// # use peep::*;
    /// # fn main() -> Result<()> {
    /// let cpu = CPU::new(
    ///     "pong.ch8",
    ///     Flags::default(),
    /// )?;
    /// dbg!(cpu);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(rom: impl AsRef<Path>, flags: Flags) -> Result<Self> {
        let mut cpu = CPU {
            flags,
            ..Default::default()
        };
        cpu.load_program(rom)?;
        Ok(cpu)
    }

    /// Replaces the random number generator with one seeded from `seed`,
    /// making `Cxbb` deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Loads a program into the CPU's program space.
    ///
    /// Returns [Error::RomRead] if the file can't be read,
    /// and [Error::RomTooLarge] if it won't fit.
    pub fn load_program(&mut self, rom: impl AsRef<Path>) -> Result<&mut Self> {
        let path = rom.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::RomRead {
            path: path.to_owned(),
            source,
        })?;
        self.load_program_bytes(&bytes)
    }

    /// Loads bytes into the CPU's program space.
    ///
    /// If the program doesn't fit, returns [Error::RomTooLarge] and leaves memory untouched.
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(&[0x00, 0xe0], &cpu.mem().get_region(Program)[..2]);
    ///
    /// cpu.load_program_bytes(&[0; 3585]).expect_err("ROM too large");
    /// assert_eq!(&[0x00, 0xe0], &cpu.mem().get_region(Program)[..2]);
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        let capacity = Program.range().len();
        if rom.len() > capacity {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                region: Program,
                capacity,
            });
        }
        self.mem.clear_region(Program).load_region(Program, rom)?;
        self.program = rom.to_vec();
        log::debug!("loaded {} byte program at {PROGRAM_ADDR:03x}", rom.len());
        Ok(self)
    }

    /// Sets the state of a key on the keypad, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// let did_press = cpu.set_key(0x7, true).unwrap();
    /// assert!(did_press);
    /// assert!(cpu.is_pressed(0x7));
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.set_key(0x7, true).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<bool> {
        self.keypad.set_key(key, pressed)
    }

    /// Presses a key. See [CPU::set_key].
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.keypad.press(key)
    }

    /// Releases a key. See [CPU::set_key].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.keypad.release(key)
    }

    /// Reports whether a key is held
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keypad.is_pressed(key)
    }

    /// Gets the [Keypad]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer (the number of return addresses on the stack)
    pub fn sp(&self) -> u8 {
        self.stack.len() as u8
    }

    /// Gets the call stack, oldest return address first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.timers.sound
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.timers.delay
    }

    /// Gets both [Timers]
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Counts the delay and sound timers down by one.
    ///
    /// Call this at 60 Hz, independent of how many instructions are executed.
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    /// cpu.tick_timers();
    /// assert_eq!(0, cpu.delay());
    /// ```
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Gets the screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the [State] of the CPU
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns true while the CPU is waiting on `Fx0A` for a key press
    pub fn is_blocked(&self) -> bool {
        matches!(self.state, State::BlockedOnKey { .. })
    }

    /// Gets the number of cycles the CPU has executed
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x0, cpu.cycle());
    /// ```
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Restarts the loaded program from scratch.
    ///
    /// Touches the stack, pc, registers, timers, keys, screen, memory, and cycle count.
    ///
    /// Does not touch [Flags], breakpoints, or the random number generator.
    pub fn reset(&mut self) {
        self.mem = Mem::new();
        self.mem
            .write_bytes(PROGRAM_ADDR as usize, self.program.as_slice());
        self.screen.clear();
        self.keypad.clear();
        self.timers = Timers::default();
        // clear the stack
        self.stack.truncate(0);
        // Reset the program counter
        self.pc = PROGRAM_ADDR;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        // Execution data
        self.state = State::Running;
        self.cycle = 0;
        log::debug!("reset");
    }

    /// Set a breakpoint
    pub fn set_break(&mut self, point: Adr) -> &mut Self {
        if !self.breakpoints.contains(&point) {
            self.breakpoints.push(point)
        }
        self
    }

    /// Unset a breakpoint
    pub fn unset_break(&mut self, point: Adr) -> &mut Self {
        if let Some(idx) = self.breakpoints.iter().position(|&bp| bp == point) {
            self.breakpoints.swap_remove(idx);
        }
        self
    }

    /// Gets a slice of breakpoints
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let cpu = CPU::default();
    /// assert_eq!(cpu.breakpoints(), &[]);
    /// ```
    pub fn breakpoints(&self) -> &[Adr] {
        self.breakpoints.as_slice()
    }

    /// Unpauses the emulator for a single tick,
    /// even if cpu.flags.pause is set.
    ///
    /// Like with [CPU::tick], this returns [Error::UnimplementedInstruction]
    /// if the instruction is unimplemented.
    ///
    /// NOTE: does not tick the timers
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.singlestep().unwrap();
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    pub fn singlestep(&mut self) -> Result<&mut Self> {
        self.flags.pause = false;
        let res = self.tick().map(|_| ());
        self.flags.pause = true;
        res.map(|_| self)
    }

    /// Runs `steps` ticks
    ///
    /// NOTE: does not tick the timers
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.multistep(0x20)
    ///     .expect("The program should only have valid opcodes.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// ```
    pub fn multistep(&mut self, steps: usize) -> Result<&mut Self> {
        for _ in 0..steps {
            self.tick()?;
        }
        Ok(self)
    }

    /// Executes a single instruction
    ///
    /// While [State::BlockedOnKey], this instead checks for a key press,
    /// and finishes the `Fx0A` instruction if there was one.
    ///
    /// Returns [Error::BreakpointHit] if pc lands on a breakpoint, whether by executing
    /// an instruction, finishing a key wait, or skipping an unknown opcode.
    /// This result contains information about the breakpoint, but can be safely ignored.
    ///
    /// Returns [Error::UnimplementedInstruction] if the instruction at `pc` is unimplemented,
    /// unless [Flags::lenient] is set, in which case the instruction is skipped.
    ///
    /// If an instruction fails, the CPU is left as it was before the instruction.
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnimplementedInstruction] if the instruction is not implemented.
    /// ```rust
    /// # use peep::*;
    /// # use peep::error::Error;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// match cpu.tick() {
    ///     Err(Error::UnimplementedInstruction { word: 0xffff, pc: 0x200 }) => {}
    ///     other => panic!("{other:?}"),
    /// }
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn tick(&mut self) -> Result<&mut Self> {
        // Do nothing if paused
        if self.flags.pause {
            return Ok(self);
        }
        if let State::BlockedOnKey { reg } = self.state {
            if let Some(key) = self.keypad.take_press() {
                self.finish_wait_for_key(reg, key);
                self.cycle += 1;
                return self.check_breakpoints();
            }
            return Ok(self);
        }
        let pc = self.pc;
        // fetch opcode
        let word: u16 = self.mem.read(pc);

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                pc,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        let Some(insn) = Insn::from_word(word) else {
            if self.flags.lenient {
                log::warn!("skipping unrecognized opcode {word:04x} at {pc:03x}");
                self.pc = wrap(pc.wrapping_add(2));
                self.cycle += 1;
                return self.check_breakpoints();
            }
            return Err(Error::UnimplementedInstruction { word, pc });
        };
        log::trace!("{pc:03x}: {insn}");

        // execute opcode
        self.pc = wrap(pc.wrapping_add(2));
        if let Err(e) = self.execute(insn) {
            self.pc = pc;
            return Err(e);
        }
        self.cycle += 1;

        self.check_breakpoints()
    }

    /// Pauses and returns [Error::BreakpointHit] if pc sits on a breakpoint
    fn check_breakpoints(&mut self) -> Result<&mut Self> {
        if !self.breakpoints.is_empty() && self.breakpoints.contains(&self.pc) {
            self.flags.pause = true;
            return Err(Error::BreakpointHit {
                addr: self.pc,
                next: self.mem.read(self.pc),
            });
        }
        Ok(self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 00, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        let dumpstyle = owo_colors::Style::new().bright_black();
        std::println!(
            "PC: {:04x}, SP: {:02x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "{} {gpr:02x} {}",
                        format_args!("v{i:X}:").style(dumpstyle),
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.timers.delay,
            self.timers.sound,
            self.cycle,
        );
    }
}

/// Wraps an address into the 4 KiB address space
#[inline(always)]
fn wrap(addr: Adr) -> Adr {
    addr % MEM_SIZE as Adr
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("state", &self.state)
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("timers", &self.timers)
            .field("keypad", &self.keypad)
            .field("cycle", &self.cycle)
            .field("breakpoints", &self.breakpoints)
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

/// Compares the machine state, ignoring the random number generator and disassembler
impl PartialEq for CPU {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.mem == other.mem
            && self.screen == other.screen
            && self.keypad == other.keypad
            && self.timers == other.timers
            && self.stack == other.stack
            && self.pc == other.pc
            && self.i == other.i
            && self.v == other.v
            && self.state == other.state
            && self.cycle == other.cycle
            && self.breakpoints == other.breakpoints
            && self.program == other.program
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults and no program loaded
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0050` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use peep::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            keypad: Keypad::default(),
            timers: Timers::default(),
            stack: Vec::with_capacity(STACK_DEPTH),
            pc: PROGRAM_ADDR,
            i: 0,
            v: [0; 16],
            state: State::Running,
            cycle: 0,
            breakpoints: vec![],
            program: vec![],
            rng: StdRng::from_entropy(),
            disassembler: Dis::default(),
        }
    }
}

impl From<Mode> for Flags {
    fn from(mode: Mode) -> Self {
        Flags {
            quirks: Quirks::from(mode),
            ..Default::default()
        }
    }
}
