//! The delay and sound timers

/// Two 8-bit countdown timers, meant to be [ticked](Timers::tick) at 60 Hz
/// regardless of how fast instructions are executed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    /// Delay timer. Programs poll it with `Fx07`.
    pub delay: u8,
    /// Sound timer. The buzzer sounds while it's nonzero.
    pub sound: u8,
}

impl Timers {
    /// Counts both timers down by one, stopping at zero
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut timers = Timers { delay: 2, sound: 1 };
    /// timers.tick();
    /// assert_eq!(Timers { delay: 1, sound: 0 }, timers);
    /// timers.tick();
    /// timers.tick();
    /// assert_eq!(Timers { delay: 0, sound: 0 }, timers);
    /// ```
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Whether the buzzer should be sounding
    pub fn is_beeping(&self) -> bool {
        self.sound != 0
    }
}
