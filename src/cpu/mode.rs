//! Selects a [Quirks](super::Quirks) preset for the [super::CPU]

use crate::error::Error;
use std::str::FromStr;

/// Selects a quirk preset for the interpreter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// The behavior described by most modern references
    #[default]
    Chip8,
    /// Cosmac VIP emulation mode
    Vip,
}

impl FromStr for Mode {
    type Err = Error;

    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// assert_eq!(Mode::Vip, "COSMAC-VIP".parse::<Mode>().unwrap());
    /// assert!("schip".parse::<Mode>().is_err());
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Mode::Chip8),
            "vip" | "cosmac" | "cosmac-vip" => Ok(Mode::Vip),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
