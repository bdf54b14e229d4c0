//! Board-agnostic core of the dot matrix display driver
//!
//! This crate contains everything that does not touch hardware directly:
//!
//! - Panel geometry and the pixel addressing function
//! - The bit-packed framebuffer and the five pixel composition modes
//! - Line, circle and box rasterization
//! - Bitmap font parsing and text rendering
//! - The scrolling marquee
//! - The 4-phase multiplexed scan driver, talking to hardware through
//!   the [`traits::PanelInterface`] capability trait
//! - Configuration type definitions
//!
//! [`Dmd`] ties these together behind a single handle.
//!
//! # Pixel polarity
//!
//! The panel's column drivers light an LED for a **0** bit. The framebuffer
//! stores that polarity unchanged so it can be shifted out byte for byte.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dmd;
pub mod draw_target;
pub mod font;
pub mod fonts;
pub mod framebuffer;
pub mod geometry;
pub mod graphics;
pub mod marquee;
pub mod pattern;
pub mod raster;
pub mod scan;
pub mod text;
pub mod traits;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, DisplayConfig};
pub use dmd::Dmd;
pub use font::{Font, FontError, Glyph};
pub use framebuffer::Framebuffer;
pub use geometry::{address, PanelGeometry, PixelAddress, PANEL_HEIGHT, PANEL_WIDTH};
pub use graphics::GraphicsMode;
pub use marquee::Marquee;
pub use pattern::TestPattern;
pub use scan::{ScanOutcome, ScanPhase, Scanner};
pub use text::CharError;
pub use traits::PanelInterface;
