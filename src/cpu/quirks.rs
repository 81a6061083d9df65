//! Controls the [Quirks] behavior of the CPU on a granular level.

use super::Mode;

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` is the behavior most modern Chip-8 programs expect.
/// `true` is Cosmac-VIP-like behavior (except [Quirks::screen_wrap]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quirks {
    /// Shift ops in `8xy`(`6`, `E`) source from vY instead of vX
    pub shift: bool,
    /// DMA instructions `Fx55`/`Fx65` leave I at I + X + 1
    pub dma_inc: bool,
    /// Binary ops in `8xy`(`1`, `2`, `3`) set vF to 0
    pub vf_reset: bool,
    /// Draw operations wrap from bottom to top and side to side, instead of clipping
    pub screen_wrap: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            shift: value,
            dma_inc: value,
            vf_reset: value,
            screen_wrap: false,
        }
    }
}

impl From<Mode> for Quirks {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Chip8 => Quirks::from(false),
            Mode::Vip => Quirks::from(true),
        }
    }
}
