//! Shift-register panel bus
//!
//! Column data is clocked into the panel's shift-register chain over SPI
//! (clock + data only). Five GPIO lines finish the job:
//!
//! | Line | Direction | Role |
//! |---|---|---|
//! | A, B | out | row-group select, A = bit 0, B = bit 1 |
//! | latch | out | rising edge copies the chain to the output stage |
//! | OE | out | row drivers on/off |
//! | other CS | in | chip select of another SPI device, high = bus free |

use dmd_core::scan::ScanPhase;
use dmd_core::traits::PanelInterface;
use dmd_hal::{InputPin, OutputPin, SpiBus};

/// GPIO lines of one panel connector
pub struct PanelPins<A, B, LAT, OE, CS> {
    /// Row select A
    pub a: A,
    /// Row select B
    pub b: B,
    /// Shift register latch
    pub latch: LAT,
    /// Row output enable
    pub output_enable: OE,
    /// Chip select of the other device sharing the SPI bus
    pub other_cs: CS,
}

/// Panel connected through a shift-register chain
///
/// The output-enable line is active-high by default. Boards with an
/// inverting buffer on that line use [`ShiftRegisterPanel::new_active_low`].
pub struct ShiftRegisterPanel<SPI, A, B, LAT, OE, CS> {
    spi: SPI,
    pins: PanelPins<A, B, LAT, OE, CS>,
    /// If true, output enabled = OE pin LOW
    oe_inverted: bool,
    output_enabled: bool,
}

impl<SPI, A, B, LAT, OE, CS> ShiftRegisterPanel<SPI, A, B, LAT, OE, CS>
where
    SPI: SpiBus,
    A: OutputPin,
    B: OutputPin,
    LAT: OutputPin,
    OE: OutputPin,
    CS: InputPin,
{
    /// Create a panel bus
    ///
    /// Drives the power-on state: row group 0 selected, latch low and the
    /// output disabled.
    pub fn new(spi: SPI, pins: PanelPins<A, B, LAT, OE, CS>, oe_inverted: bool) -> Self {
        let mut panel = Self {
            spi,
            pins,
            oe_inverted,
            output_enabled: false,
        };
        panel.pins.a.set_low();
        panel.pins.b.set_low();
        panel.pins.latch.set_low();
        panel.set_output_enabled(false);

        #[cfg(feature = "defmt")]
        defmt::debug!("Panel bus ready, OE inverted: {}", oe_inverted);

        panel
    }

    /// Create a panel bus with an active-high output enable
    pub fn new_active_high(spi: SPI, pins: PanelPins<A, B, LAT, OE, CS>) -> Self {
        Self::new(spi, pins, false)
    }

    /// Create a panel bus with an active-low output enable
    pub fn new_active_low(spi: SPI, pins: PanelPins<A, B, LAT, OE, CS>) -> Self {
        Self::new(spi, pins, true)
    }

    /// Whether the row drivers are currently enabled
    pub fn is_output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Take the bus and pins back
    pub fn release(self) -> (SPI, PanelPins<A, B, LAT, OE, CS>) {
        (self.spi, self.pins)
    }
}

impl<SPI, A, B, LAT, OE, CS> PanelInterface for ShiftRegisterPanel<SPI, A, B, LAT, OE, CS>
where
    SPI: SpiBus,
    A: OutputPin,
    B: OutputPin,
    LAT: OutputPin,
    OE: OutputPin,
    CS: InputPin,
{
    type Error = SPI::Error;

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.transmit(&[byte])
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes)?;
        // The latch must not fire before the last bit is out
        self.spi.flush()
    }

    fn set_row_select(&mut self, phase: ScanPhase) {
        let (a, b) = phase.row_select();
        self.pins.a.set_state(a);
        self.pins.b.set_state(b);
    }

    fn latch_output(&mut self) {
        self.pins.latch.pulse_high();
    }

    fn set_output_enabled(&mut self, enabled: bool) {
        self.output_enabled = enabled;
        // Normal: enabled → high; inverted: enabled → low
        self.pins.output_enable.set_state(enabled != self.oe_inverted);
    }

    fn is_bus_free(&mut self) -> bool {
        self.pins.other_cs.is_high()
    }
}
