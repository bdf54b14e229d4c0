//! DMD Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the panel driver
//! needs: a few GPIO lines and a write-only serial bus. Chip HALs that
//! implement `embedded-hal` 1.0 plug in through [`compat::Compat`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dmd-core (framebuffer, scan driver)    │
//! └─────────────────────────────────────────┘
//!                     │  PanelInterface
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dmd-drivers (ShiftRegisterPanel)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dmd-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │  compat
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 chip HAL (embassy-rp) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - Write-only SPI bus feeding the shift registers

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use compat::Compat;
pub use gpio::{InputPin, OutputPin};
pub use spi::{SpiBus, SpiConfig};
