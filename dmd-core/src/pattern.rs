//! Hardware bring-up test patterns

use crate::framebuffer::Framebuffer;
use crate::graphics::GraphicsMode;

/// Fixed synthetic patterns covering the whole surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestPattern {
    /// Checkerboard, top-left pixel lit
    Alt0,
    /// Checkerboard, top-left pixel unlit
    Alt1,
    /// Vertical stripes, leftmost column lit
    Stripe0,
    /// Vertical stripes, leftmost column unlit
    Stripe1,
}

impl TestPattern {
    /// Look up a pattern by its numeric id (0..=3)
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Alt0),
            1 => Some(Self::Alt1),
            2 => Some(Self::Stripe0),
            3 => Some(Self::Stripe1),
            _ => None,
        }
    }

    /// Whether pixel `(x, y)` is lit in this pattern
    pub const fn is_lit(self, x: i32, y: i32) -> bool {
        match self {
            Self::Alt0 => (x + y) & 1 == 0,
            Self::Alt1 => (x + y) & 1 == 1,
            Self::Stripe0 => x & 1 == 0,
            Self::Stripe1 => x & 1 == 1,
        }
    }
}

impl Framebuffer {
    /// Overwrite every pixel with `pattern`
    pub fn draw_test_pattern(&mut self, pattern: TestPattern) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.write_pixel(x, y, GraphicsMode::Normal, pattern.is_lit(x, y));
            }
        }
    }
}
