//! Test doubles shared by the unit tests

use heapless::Vec;

use crate::scan::ScanPhase;
use crate::traits::PanelInterface;

/// One recorded panel interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCall {
    Transmit(usize),
    RowSelect(ScanPhase),
    Latch,
    OutputEnabled(bool),
}

/// Transmit failure reported by [`MockPanel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Panel that records every call
pub struct MockPanel {
    pub calls: Vec<PanelCall, 64>,
    pub sent: Vec<u8, 2048>,
    pub bus_free: bool,
    pub fail_transmit: bool,
}

impl MockPanel {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            sent: Vec::new(),
            bus_free: true,
            fail_transmit: false,
        }
    }

    pub fn reset(&mut self) {
        self.calls.clear();
        self.sent.clear();
    }

    fn record(&mut self, call: PanelCall) {
        self.calls.push(call).unwrap();
    }
}

impl PanelInterface for MockPanel {
    type Error = MockBusError;

    fn transmit_byte(&mut self, byte: u8) -> Result<(), MockBusError> {
        self.transmit(&[byte])
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), MockBusError> {
        if self.fail_transmit {
            return Err(MockBusError);
        }
        self.record(PanelCall::Transmit(bytes.len()));
        self.sent.extend_from_slice(bytes).unwrap();
        Ok(())
    }

    fn set_row_select(&mut self, phase: ScanPhase) {
        self.record(PanelCall::RowSelect(phase));
    }

    fn latch_output(&mut self) {
        self.record(PanelCall::Latch);
    }

    fn set_output_enabled(&mut self, enabled: bool) {
        self.record(PanelCall::OutputEnabled(enabled));
    }

    fn is_bus_free(&mut self) -> bool {
        self.bus_free
    }
}

/// Build a fixed-width font table with every bitmap byte set to `fill`
pub fn fixed_font<const N: usize>(width: u8, height: u8, first: u8, count: u8, fill: u8) -> [u8; N] {
    let mut table = [fill; N];
    table[..6].copy_from_slice(&[0, 0, width, height, first, count]);
    table
}

/// Build a variable-width font table
///
/// `byte(glyph, i)` supplies byte `i` of glyph number `glyph`'s bitmap.
pub fn variable_font<const N: usize>(
    height: u8,
    first: u8,
    widths: &[u8],
    byte: impl Fn(usize, usize) -> u8,
) -> [u8; N] {
    let bytes = (height as usize).div_ceil(8);
    let mut table = [0u8; N];
    table[..6].copy_from_slice(&[(N >> 8) as u8, N as u8, 0, height, first, widths.len() as u8]);
    table[6..6 + widths.len()].copy_from_slice(widths);
    let mut offset = 6 + widths.len();
    for (glyph, &width) in widths.iter().enumerate() {
        for i in 0..width as usize * bytes {
            table[offset + i] = byte(glyph, i);
        }
        offset += width as usize * bytes;
    }
    assert_eq!(offset, N, "table size does not match glyph widths");
    table
}
