//! Maps the left hand side of a QWERTY keyboard onto the Chip-8 keypad
//!
//! ```text
//! 1 2 3 4    1 2 3 C
//! Q W E R    4 5 6 D
//! A S D F    7 8 9 E
//! Z X C V    A 0 B F
//! ```

/// Returns the keypad key bound to a keyboard character, ignoring case
/// # Examples
/// ```rust
/// # use peep::keymap::key_for;
/// assert_eq!(Some(0xc), key_for('4'));
/// assert_eq!(Some(0x0), key_for('x'));
/// assert_eq!(Some(0xf), key_for('V'));
/// assert_eq!(None, key_for('p'));
/// ```
pub fn key_for(c: char) -> Option<usize> {
    let key = match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xc,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xd,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xe,
        'z' => 0xa,
        'x' => 0x0,
        'c' => 0xb,
        'v' => 0xf,
        _ => return None,
    };
    Some(key)
}
