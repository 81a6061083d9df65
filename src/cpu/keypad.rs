// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The 16-key hexadecimal keypad
//!
//! ```text
//! 1 2 3 C
//! 4 5 6 D
//! 7 8 9 E
//! A 0 B F
//! ```

use crate::error::{Error, Result};

/// The state of the 16-key keypad, plus a latch which records the
/// first not-pressed to pressed transition since it was last [armed](Keypad::arm)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keypad {
    keys: [bool; 16],
    latch: Option<usize>,
}

impl Keypad {
    /// Sets the state of a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut keypad = Keypad::default();
    /// assert!(keypad.set_key(0x7, true).unwrap());
    /// // it was already pressed, so nothing's changed.
    /// assert!(!keypad.set_key(0x7, true).unwrap());
    /// assert!(keypad.is_pressed(0x7));
    ///
    /// assert!(keypad.set_key(0x10, true).is_err());
    /// ```
    pub fn set_key(&mut self, key: usize, pressed: bool) -> Result<bool> {
        let Some(keyref) = self.keys.get_mut(key) else {
            return Err(Error::InvalidKey { key });
        };
        if *keyref == pressed {
            return Ok(false);
        }
        *keyref = pressed;
        if pressed && self.latch.is_none() {
            self.latch = Some(key);
        }
        Ok(true)
    }

    /// Presses a key. See [Keypad::set_key].
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, true)
    }

    /// Releases a key. See [Keypad::set_key].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, false)
    }

    /// Reports whether a key is held. Keys that don't exist are never held.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Gets the state of every key
    pub fn keys(&self) -> &[bool; 16] {
        &self.keys
    }

    /// Forgets any recorded key press, so that only presses made
    /// after this call are reported by [Keypad::take_press]
    pub fn arm(&mut self) {
        self.latch = None;
    }

    /// Takes the first key pressed since the keypad was [armed](Keypad::arm)
    ///
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut keypad = Keypad::default();
    /// keypad.press(0x3).unwrap();
    /// keypad.arm();
    /// // 3 was already down when the keypad was armed
    /// assert_eq!(None, keypad.take_press());
    /// keypad.press(0xa).unwrap();
    /// keypad.press(0xb).unwrap();
    /// assert_eq!(Some(0xa), keypad.take_press());
    /// assert_eq!(None, keypad.take_press());
    /// ```
    pub fn take_press(&mut self) -> Option<usize> {
        self.latch.take()
    }

    /// Releases every key and forgets any recorded key press
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
