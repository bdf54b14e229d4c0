//! `embedded-graphics` support
//!
//! Lets the framebuffer be the target of any `embedded-graphics` drawable.
//! Pixels are written with [`GraphicsMode::Normal`] and clipped the same
//! way as the built-in primitives.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::framebuffer::Framebuffer;
use crate::graphics::GraphicsMode;

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.write_pixel(point.x, point.y, GraphicsMode::Normal, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Framebuffer::clear(self, color.is_off());
        Ok(())
    }
}
