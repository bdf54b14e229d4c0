//! Multiplexed scan driver
//!
//! Each sub-panel lights a quarter of its rows at a time: rows `p`, `p+4`,
//! `p+8` and `p+12` share one set of column drivers and are selected by
//! phase `p`. One call to [`Scanner::scan`] clocks out the bytes for the
//! current phase across every sub-panel, latches them and switches the
//! row-select lines. Four calls make a full frame.
//!
//! ```text
//!   per sub-panel, per byte column b (0..4):
//!     row 12+p, row 8+p, row 4+p, row p      -> 16 bytes, sent per sub-panel
//!
//!   then: OE off -> latch -> row select = p -> OE on -> p = p + 1 (mod 4)
//! ```
//!
//! The caller owns the timing; nothing here waits or keeps time.

use crate::framebuffer::Framebuffer;
use crate::geometry::PANEL_BYTES_PER_ROW;
use crate::traits::PanelInterface;

/// Bytes sent per sub-panel in one phase
pub const SCAN_BYTES_PER_PANEL: usize = 4 * PANEL_BYTES_PER_ROW;

/// One of the four interleaved row groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanPhase {
    /// Rows 0, 4, 8, 12
    #[default]
    First,
    /// Rows 1, 5, 9, 13
    Second,
    /// Rows 2, 6, 10, 14
    Third,
    /// Rows 3, 7, 11, 15
    Fourth,
}

impl ScanPhase {
    /// Number of phases in a frame
    pub const COUNT: usize = 4;

    /// Phase number, 0..4
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
            Self::Fourth => 3,
        }
    }

    /// Phase for a number, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::First,
            1 => Self::Second,
            2 => Self::Third,
            _ => Self::Fourth,
        }
    }

    /// The phase after this one
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Row-select line levels as `(a, b)`
    ///
    /// Line A carries bit 0 of the phase number, line B bit 1.
    pub const fn row_select(self) -> (bool, bool) {
        let index = self.index();
        (index & 0b01 != 0, index & 0b10 != 0)
    }

    /// Panel-local rows driven in this phase, in transmit order
    pub const fn rows(self) -> [usize; 4] {
        let p = self.index();
        [12 + p, 8 + p, 4 + p, p]
    }
}

/// Result of one scan call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanOutcome {
    /// The phase was sent and is now lit
    Scanned(ScanPhase),
    /// The shared bus was busy; nothing was sent and the phase is retried
    /// on the next call
    Skipped,
}

/// Phase cursor for the multiplexed refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scanner {
    phase: ScanPhase,
}

impl Scanner {
    /// Start at the first phase
    pub const fn new() -> Self {
        Self {
            phase: ScanPhase::First,
        }
    }

    /// Phase the next call will send
    pub const fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Bytes of one sub-panel for `phase`, in transmit order
    pub fn panel_phase_bytes(
        framebuffer: &Framebuffer,
        panel: usize,
        phase: ScanPhase,
    ) -> [u8; SCAN_BYTES_PER_PANEL] {
        let rows = phase.rows();
        let bytes = framebuffer.panel_bytes(panel);
        let mut out = [0u8; SCAN_BYTES_PER_PANEL];
        for column in 0..PANEL_BYTES_PER_ROW {
            for (i, row) in rows.into_iter().enumerate() {
                out[column * rows.len() + i] = bytes[row * PANEL_BYTES_PER_ROW + column];
            }
        }
        out
    }

    /// Send the current phase and light it
    ///
    /// A busy bus or a transmit error leaves the output stage and the
    /// cursor untouched, so the same phase is sent next time.
    pub fn scan<P: PanelInterface>(
        &mut self,
        framebuffer: &Framebuffer,
        panel: &mut P,
    ) -> Result<ScanOutcome, P::Error> {
        if !panel.is_bus_free() {
            return Ok(ScanOutcome::Skipped);
        }

        let phase = self.phase;
        for index in 0..framebuffer.geometry().panels_total() {
            let bytes = Self::panel_phase_bytes(framebuffer, index, phase);
            if let Err(e) = panel.transmit(&bytes) {
                #[cfg(feature = "defmt")]
                defmt::warn!("DMD: transmit failed during {}", phase);
                return Err(e);
            }
        }

        panel.set_output_enabled(false);
        panel.latch_output();
        panel.set_row_select(phase);
        panel.set_output_enabled(true);

        self.phase = phase.next();
        Ok(ScanOutcome::Scanned(phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PanelGeometry;
    use crate::graphics::GraphicsMode;
    use crate::testing::{MockPanel, PanelCall};

    #[test]
    fn test_phase_cycle() {
        assert_eq!(ScanPhase::First.next(), ScanPhase::Second);
        assert_eq!(ScanPhase::Fourth.next(), ScanPhase::First);
        assert_eq!(ScanPhase::from_index(6), ScanPhase::Third);
        for i in 0..ScanPhase::COUNT {
            assert_eq!(ScanPhase::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_row_select_levels() {
        assert_eq!(ScanPhase::First.row_select(), (false, false));
        assert_eq!(ScanPhase::Second.row_select(), (true, false));
        assert_eq!(ScanPhase::Third.row_select(), (false, true));
        assert_eq!(ScanPhase::Fourth.row_select(), (true, true));
        assert_eq!(ScanPhase::Second.rows(), [13, 9, 5, 1]);
    }

    #[test]
    fn test_four_calls_visit_every_phase() {
        let fb = Framebuffer::default();
        let mut panel = MockPanel::new();
        let mut scanner = Scanner::new();

        for expected in [
            ScanPhase::First,
            ScanPhase::Second,
            ScanPhase::Third,
            ScanPhase::Fourth,
            ScanPhase::First,
        ] {
            assert_eq!(
                scanner.scan(&fb, &mut panel),
                Ok(ScanOutcome::Scanned(expected))
            );
        }
        assert_eq!(scanner.phase(), ScanPhase::Second);
    }

    #[test]
    fn test_control_sequence() {
        let fb = Framebuffer::new(PanelGeometry::new(2, 1).unwrap());
        let mut panel = MockPanel::new();
        let mut scanner = Scanner::new();
        scanner.scan(&fb, &mut panel).unwrap();

        assert_eq!(
            &panel.calls[..],
            &[
                PanelCall::Transmit(16),
                PanelCall::Transmit(16),
                PanelCall::OutputEnabled(false),
                PanelCall::Latch,
                PanelCall::RowSelect(ScanPhase::First),
                PanelCall::OutputEnabled(true),
            ]
        );
    }

    #[test]
    fn test_transmit_order() {
        let mut fb = Framebuffer::new(PanelGeometry::new(2, 1).unwrap());
        fb.clear(false);
        // Mark rows 1 and 13 of panel 0, column byte 2, and row 5 of panel 1
        fb.write_pixel(16, 1, GraphicsMode::Inverse, true);
        fb.write_pixel(17, 13, GraphicsMode::Inverse, true);
        fb.write_pixel(32 + 7, 5, GraphicsMode::Inverse, true);

        let first = Scanner::panel_phase_bytes(&fb, 0, ScanPhase::Second);
        let second = Scanner::panel_phase_bytes(&fb, 1, ScanPhase::Second);

        let mut expected = [0u8; 16];
        // Panel 0, column 2: rows 13, 9, 5, 1
        expected[8] = 0x40;
        expected[11] = 0x80;
        assert_eq!(first, expected);

        let mut expected = [0u8; 16];
        // Panel 1, column 0: row 5 is third
        expected[2] = 0x01;
        assert_eq!(second, expected);
    }

    #[test]
    fn test_busy_bus_skips_without_advancing() {
        let fb = Framebuffer::default();
        let mut panel = MockPanel::new();
        let mut scanner = Scanner::new();

        panel.bus_free = false;
        assert_eq!(scanner.scan(&fb, &mut panel), Ok(ScanOutcome::Skipped));
        assert!(panel.calls.is_empty());
        assert_eq!(scanner.phase(), ScanPhase::First);

        panel.bus_free = true;
        assert_eq!(
            scanner.scan(&fb, &mut panel),
            Ok(ScanOutcome::Scanned(ScanPhase::First))
        );
    }

    #[test]
    fn test_transmit_error_leaves_output_alone() {
        let fb = Framebuffer::default();
        let mut panel = MockPanel::new();
        let mut scanner = Scanner::new();
        scanner.scan(&fb, &mut panel).unwrap();
        panel.reset();

        panel.fail_transmit = true;
        assert!(scanner.scan(&fb, &mut panel).is_err());
        assert!(panel.calls.is_empty());
        assert_eq!(scanner.phase(), ScanPhase::Second);

        panel.fail_transmit = false;
        assert_eq!(
            scanner.scan(&fb, &mut panel),
            Ok(ScanOutcome::Scanned(ScanPhase::Second))
        );
    }

    #[test]
    fn test_full_frame_sends_every_byte_once() {
        let mut fb = Framebuffer::new(PanelGeometry::new(2, 2).unwrap());
        fb.draw_test_pattern(crate::pattern::TestPattern::Alt0);
        let mut panel = MockPanel::new();
        let mut scanner = Scanner::new();
        for _ in 0..ScanPhase::COUNT {
            scanner.scan(&fb, &mut panel).unwrap();
        }
        assert_eq!(panel.sent.len(), fb.as_bytes().len());
        let mut sent: heapless::Vec<u8, 256> = panel.sent.iter().copied().collect();
        let mut stored: heapless::Vec<u8, 256> = fb.as_bytes().iter().copied().collect();
        sent.sort_unstable();
        stored.sort_unstable();
        assert_eq!(sent, stored);
    }
}
