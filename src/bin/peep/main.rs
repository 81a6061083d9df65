// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Peep: A chip-8 interpreter in Rust

mod ui;

use gumdrop::*;
use owo_colors::OwoColorize;
use peep::{
    error::Result,
    host::{Host, DEFAULT_FRAME_RATE, DEFAULT_IPF},
    *,
};
use std::{path::PathBuf, process::ExitCode};
use ui::*;

pub fn main() -> ExitCode {
    env_logger::init();
    let options = Arguments::parse_args_default_or_exit();
    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.bold().red());
            ExitCode::FAILURE
        }
    }
}

fn run(options: Arguments) -> Result<()> {
    let cpu = options.cpu()?;
    let ui = UIBuilder::new(128, 64).build()?;
    Host::new(cpu, ui)
        .ipf(options.ipf)
        .frame_rate(options.frame_rate)
        .run()
}

/// Parses a hexadecimal string into a u16
fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value.trim_start_matches("0x"), 16)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Peep.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,
    #[options(help = "Enable pause mode at startup.")]
    pub pause: bool,
    #[options(short = "l", help = "Skip unrecognized instructions instead of stopping.")]
    pub lenient: bool,

    #[options(help = "Run in (Chip8, VIP) mode.")]
    pub mode: Option<Mode>,

    #[options(short = "z", help = "Toggle setting vF to 0 after a bitwise operation.")]
    pub vfreset: bool,
    #[options(short = "c", help = "Toggle incrementing I after DMA instructions.")]
    pub memory: bool,
    #[options(short = "v", help = "Toggle shifting vY instead of vX.")]
    pub shift: bool,
    #[options(short = "w", help = "Wrap sprites around the edges of the screen.")]
    pub wrap: bool,

    #[options(
        long = "break",
        help = "Set breakpoints for the emulator to stop at.",
        parse(try_from_str = "parse_hex"),
        meta = "BP"
    )]
    pub breakpoints: Vec<u16>,

    #[options(help = "Seed the random number generator.", meta = "SEED")]
    pub seed: Option<u64>,

    #[options(
        short = "i",
        help = "Set the instructions-per-frame rate.",
        default_expr = "DEFAULT_IPF",
        meta = "N"
    )]
    pub ipf: usize,
    #[options(
        help = "Set the target framerate.",
        default_expr = "DEFAULT_FRAME_RATE",
        meta = "FR"
    )]
    pub frame_rate: u64,
}

impl Arguments {
    /// Builds the [Flags] described by the arguments
    fn flags(&self) -> Flags {
        let mut flags = Flags {
            debug: self.debug,
            pause: self.pause,
            lenient: self.lenient,
            ..Flags::from(self.mode.unwrap_or_default())
        };
        // Flip the state of the quirks
        flags.quirks.vf_reset ^= self.vfreset;
        flags.quirks.dma_inc ^= self.memory;
        flags.quirks.shift ^= self.shift;
        flags.quirks.screen_wrap ^= self.wrap;
        flags
    }

    /// Builds a [CPU], and loads the ROM into it
    fn cpu(&self) -> Result<CPU> {
        let mut cpu = CPU::new(&self.file, self.flags())?;
        if let Some(seed) = self.seed {
            cpu = cpu.with_seed(seed);
        }
        for &point in &self.breakpoints {
            cpu.set_break(point);
        }
        Ok(cpu)
    }
}
