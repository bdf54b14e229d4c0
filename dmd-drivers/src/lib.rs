//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in dmd-core on top of the dmd-hal pin and bus traits:
//!
//! - [`panel::ShiftRegisterPanel`] - the standard 74HC595 chain with two
//!   row-select lines, a latch strobe and an output-enable line

#![no_std]
#![deny(unsafe_code)]

pub mod panel;

pub use panel::{PanelPins, ShiftRegisterPanel};
