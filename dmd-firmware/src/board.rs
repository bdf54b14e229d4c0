//! Board wiring
//!
//! Pin assignment for a Pico driving one panel connector:
//!
//! | Signal | Pin |
//! |---|---|
//! | SPI0 SCK (panel CLK) | GPIO18 |
//! | SPI0 TX (panel R data) | GPIO19 |
//! | A | GPIO6 |
//! | B | GPIO7 |
//! | Latch (panel SCLK) | GPIO8 |
//! | Output enable | GPIO9 |
//! | Other device CS | GPIO17 |

use dmd_core::config::DisplayConfig;
use dmd_drivers::panel::{PanelPins, ShiftRegisterPanel};
use dmd_hal::compat::Compat;
use dmd_hal::spi::{Phase, Polarity, SpiConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::Peripherals;

/// SPI bus to the shift-register chain
pub type BoardSpi = Compat<Spi<'static, SPI0, Blocking>>;

/// Push-pull control output
pub type BoardOutput = Compat<Output<'static>>;

/// Chip-select sense input
pub type BoardInput = Compat<Input<'static>>;

/// Panel bus as wired on this board
pub type BoardPanel =
    ShiftRegisterPanel<BoardSpi, BoardOutput, BoardOutput, BoardOutput, BoardOutput, BoardInput>;

/// Convert to the embassy SPI configuration
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}

/// Claim the panel pins and bring the bus up
pub fn init_panel(p: Peripherals, config: &DisplayConfig) -> BoardPanel {
    let bus = SpiConfig::shift_register().with_frequency(config.spi_frequency_hz);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config(&bus));

    let pins = PanelPins {
        a: Compat(Output::new(p.PIN_6, Level::Low)),
        b: Compat(Output::new(p.PIN_7, Level::Low)),
        latch: Compat(Output::new(p.PIN_8, Level::Low)),
        output_enable: Compat(Output::new(
            p.PIN_9,
            // Start with the rows dark whichever way the line is wired
            if config.output_enable_inverted {
                Level::High
            } else {
                Level::Low
            },
        )),
        // Pulled up so an unpopulated header reads as a free bus
        other_cs: Compat(Input::new(p.PIN_17, Pull::Up)),
    };

    ShiftRegisterPanel::new(Compat(spi), pins, config.output_enable_inverted)
}
