//! Panel bus capability trait

use crate::scan::ScanPhase;

/// Everything the scan driver needs from the panel wiring
///
/// Implemented by `dmd-drivers` for a real shift-register chain and by
/// recording mocks in tests. Only moving bytes over the bus can fail; the
/// control lines are plain GPIO writes.
pub trait PanelInterface {
    /// Transport error type
    type Error;

    /// Shift one byte into the column driver chain
    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Shift a run of bytes into the column driver chain
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.transmit_byte(byte)?;
        }
        Ok(())
    }

    /// Drive the row-select lines for one row group
    fn set_row_select(&mut self, phase: ScanPhase);

    /// Move the shifted bytes into the output stage
    fn latch_output(&mut self);

    /// Enable or blank the row drivers
    fn set_output_enabled(&mut self, enabled: bool);

    /// Check whether the shared bus is free for us to use
    fn is_bus_free(&mut self) -> bool;
}

impl<T: PanelInterface + ?Sized> PanelInterface for &mut T {
    type Error = T::Error;

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).transmit_byte(byte)
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(bytes)
    }

    fn set_row_select(&mut self, phase: ScanPhase) {
        (**self).set_row_select(phase)
    }

    fn latch_output(&mut self) {
        (**self).latch_output()
    }

    fn set_output_enabled(&mut self, enabled: bool) {
        (**self).set_output_enabled(enabled)
    }

    fn is_bus_free(&mut self) -> bool {
        (**self).is_bus_free()
    }
}
