//! Configuration types
//!
//! Board-agnostic display configuration. The firmware fills these in at
//! build time from `display.toml`.

pub mod display;

pub use display::*;
