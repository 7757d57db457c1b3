use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, PIXEL_OFF, PIXEL_ON};

/// How sprite pixels that fall past the right or bottom edge are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteMode {
    /// Address pixels as `x + y * 64` without bounds on either axis.
    /// Pixels past the right edge land at the start of the next row, pixels past
    /// the last row are dropped.
    Linear,
    /// Drop any pixel past the right or bottom edge.
    Clip,
    /// Wrap coordinates around both edges.
    Wrap,
}

impl Default for SpriteMode {
    fn default() -> Self {
        SpriteMode::Linear
    }
}

/// # Screen
/// The 64x32 monochrome frame buffer.
///
/// Pixels are stored row-major as 0 (off) or 1 (on), so pixel `(x, y)` is at
/// index `x + y * DISPLAY_WIDTH`.
#[derive(Clone)]
pub struct Screen {
    pixels: [u8; DISPLAY_SIZE],
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            pixels: [0; DISPLAY_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_SIZE];
    }

    /// Whether the pixel at `(x, y)` is lit. Off-screen coordinates are never lit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && self.pixels[x + y * DISPLAY_WIDTH] == 1
    }

    /// XORs an 8 pixel wide sprite onto the screen with its top left corner at `(x, y)`.
    ///
    /// Every set bit of `rows[r]` (msb first) toggles one pixel.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8], mode: SpriteMode) -> bool {
        let mut collision = false;
        for (row, byte) in rows.iter().enumerate() {
            for column in 0..8 {
                if byte & (0x80 >> column) == 0 {
                    continue;
                }
                if let Some(index) = Self::locate(x + column, y + row, mode) {
                    collision |= self.pixels[index] == 1;
                    self.pixels[index] ^= 1;
                }
            }
        }
        collision
    }

    /// Maps unbounded sprite coordinates to a pixel index, if the pixel is drawn at all.
    fn locate(x: usize, y: usize, mode: SpriteMode) -> Option<usize> {
        match mode {
            SpriteMode::Linear => Some(x + y * DISPLAY_WIDTH).filter(|&i| i < DISPLAY_SIZE),
            SpriteMode::Clip if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT => {
                Some(x + y * DISPLAY_WIDTH)
            }
            SpriteMode::Clip => None,
            SpriteMode::Wrap => Some(x % DISPLAY_WIDTH + (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH),
        }
    }

    /// Expands each pixel into a packed ARGB color.
    pub fn write_argb(&self, out: &mut [u32; DISPLAY_SIZE]) {
        for (color, pixel) in out.iter_mut().zip(self.pixels.iter()) {
            *color = if *pixel == 1 { PIXEL_ON } else { PIXEL_OFF };
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
