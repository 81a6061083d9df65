// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Big-endian integer reads and writes on [Mem]

use super::Mem;

/// Read or write a T at address `addr`.
///
/// Addresses wrap at the end of memory, so these never fail.
/// # Examples
/// ```rust
/// # use peep::*;
/// let mut mem = Mem::new();
/// mem.write(0x300u16, 0x1234u16);
/// let (byte, word): (u8, u16) = (mem.read(0x300u16), mem.read(0x300u16));
/// assert_eq!((0x12, 0x1234), (byte, word));
/// // The last byte of memory is followed by the first
/// mem.write(0xfffu16, 0xabcdu16);
/// let byte: u8 = mem.read(0x000u16);
/// assert_eq!(0xcd, byte);
/// ```
pub trait ReadWrite<T> {
    /// Reads a T from address `addr`
    fn read(&self, addr: impl Into<usize>) -> T;
    /// Writes a T to address `addr`
    fn write(&mut self, addr: impl Into<usize>, data: T);
}

/// Implements [ReadWrite] on [Mem] for the provided types
///
/// Relies on inherent methods of Rust numeric types:
/// - `Self::from_be_bytes`
/// - `Self::to_be_bytes`
macro_rules! impl_rw {
    ($($t:ty) ,* $(,)?) => {
        $(
            impl ReadWrite<$t> for Mem {
                #[inline(always)]
                fn read(&self, addr: impl Into<usize>) -> $t {
                    let mut bytes = [0; core::mem::size_of::<$t>()];
                    self.read_bytes(addr.into(), &mut bytes);
                    // Chip-8 is a big-endian system
                    <$t>::from_be_bytes(bytes)
                }
                #[inline(always)]
                fn write(&mut self, addr: impl Into<usize>, data: $t) {
                    // Chip-8 is a big-endian system
                    self.write_bytes(addr.into(), &data.to_be_bytes());
                }
            }
        )*
    };
}

impl_rw!(u8, u16, u32);
