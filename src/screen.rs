// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's 64x32 monochrome framebuffer

use std::fmt::{Display, Formatter};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;
const W_BYTES: usize = WIDTH / 8;

/// A 64x32 1bpp framebuffer. Each row is 8 bytes, most significant bit leftmost.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Screen {
    mem: [u8; W_BYTES * HEIGHT],
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen {
            mem: [0; W_BYTES * HEIGHT],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.mem = [0; W_BYTES * HEIGHT];
    }

    /// Returns true if no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.mem.iter().all(|&byte| byte == 0)
    }

    /// Gets the pixel at (x, y). Pixels off the edge of the screen are off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.mem[y * W_BYTES + x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Iterates over every pixel, row by row
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        (0..HEIGHT).flat_map(move |y| (0..WIDTH).map(move |x| self.get(x, y)))
    }

    /// Gets the raw 1bpp framebuffer, row by row
    pub fn as_bytes(&self) -> &[u8] {
        &self.mem
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (x, y),
    /// one byte per row, and reports whether any lit pixel was turned off.
    ///
    /// The origin wraps around the screen. The rest of the sprite is clipped
    /// at the right and bottom edges, unless `wrap` is set, in which case it
    /// wraps around to the other side.
    /// # Examples
    /// ```rust
    /// # use peep::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.draw(62, 0, &[0xff], false));
    /// assert!(screen.get(63, 0));
    /// // clipped, not wrapped
    /// assert!(!screen.get(0, 0));
    /// // drawing again erases it, and collides
    /// assert!(screen.draw(62, 0, &[0xff], false));
    /// assert!(screen.is_blank());
    /// ```
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8], wrap: bool) -> bool {
        let (x, y) = (x % WIDTH, y % HEIGHT);
        let mut collision = false;
        for (line, &row) in sprite.iter().enumerate() {
            let py = y + line;
            if py >= HEIGHT && !wrap {
                break;
            }
            for bit in 0..8 {
                let px = x + bit;
                if px >= WIDTH && !wrap {
                    break;
                }
                if row & (0x80 >> bit) != 0 {
                    collision |= self.toggle(px % WIDTH, py % HEIGHT);
                }
            }
        }
        collision
    }

    /// Flips the pixel at (x, y), returning true if it was turned off
    fn toggle(&mut self, x: usize, y: usize) -> bool {
        let (byte, mask) = (&mut self.mem[y * W_BYTES + x / 8], 0x80 >> (x % 8));
        let erased = *byte & mask != 0;
        *byte ^= mask;
        erased
    }

    /// Prints the screen to stdout
    ///
    /// With the `drawille` feature, this uses braille characters.
    pub fn print_screen(&self) {
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            for (index, _) in self.pixels().enumerate().filter(|(_, lit)| *lit) {
                canvas.set((index % WIDTH) as u32, (index / WIDTH) as u32);
            }
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        print!("{self}");
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("lit", &self.pixels().filter(|&lit| lit).count())
            .finish_non_exhaustive()
    }
}

/// Draws the screen with box characters, one line per row
impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.mem.chunks_exact(W_BYTES).enumerate() {
            write!(f, "{index:02}|")?;
            for byte in row {
                write!(
                    f,
                    "{}",
                    format!("{byte:08b}").replace('0', " ").replace('1', "█")
                )?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
