//! Flag-producing arithmetic for the `8xyN` instructions
//!
//! Each operation returns the new value of vX alongside the new value of vF,
//! and the caller writes them in that order (so when X is F, the flag wins).

/// The outcome of an ALU operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alu {
    /// The value written to vX
    pub value: u8,
    /// The value written to vF
    pub flag: u8,
}

impl Alu {
    fn new(value: u8, flag: bool) -> Self {
        Alu {
            value,
            flag: flag.into(),
        }
    }
}

/// `a + b`. vF is 1 if the addition overflowed.
/// # Examples
/// ```rust
/// # use peep::cpu::alu::{self, Alu};
/// assert_eq!(Alu { value: 0x00, flag: 1 }, alu::add(0xff, 0x01));
/// assert_eq!(Alu { value: 0x03, flag: 0 }, alu::add(0x01, 0x02));
/// ```
pub fn add(a: u8, b: u8) -> Alu {
    let (value, carry) = a.overflowing_add(b);
    Alu::new(value, carry)
}

/// `a - b`. vF is 1 if there was no borrow (`a >= b`).
/// # Examples
/// ```rust
/// # use peep::cpu::alu::{self, Alu};
/// assert_eq!(Alu { value: 0x02, flag: 1 }, alu::sub(0x05, 0x03));
/// assert_eq!(Alu { value: 0xfe, flag: 0 }, alu::sub(0x03, 0x05));
/// ```
pub fn sub(a: u8, b: u8) -> Alu {
    let (value, borrow) = a.overflowing_sub(b);
    Alu::new(value, !borrow)
}

/// `a >> 1`. vF is the bit shifted out.
pub fn shr(a: u8) -> Alu {
    Alu::new(a >> 1, a & 1 != 0)
}

/// `a << 1`. vF is the bit shifted out.
pub fn shl(a: u8) -> Alu {
    Alu::new(a << 1, a & 0x80 != 0)
}
