//! Panel bus implementations

pub mod shift_register;

pub use shift_register::{PanelPins, ShiftRegisterPanel};
