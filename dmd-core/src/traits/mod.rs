//! Hardware abstraction traits
//!
//! These traits define the interface between the display logic and the
//! board-specific panel wiring.

pub mod panel;

pub use panel::PanelInterface;
