//! Display configuration
//!
//! Settings come from display.toml, validated and turned into constants by
//! the build script.

use dmd_core::config::{ConfigError, DisplayConfig, MarqueeConfig};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/display_config.rs"));
}

pub use generated::*;

/// Build the display configuration compiled into the firmware
pub fn display_config() -> Result<DisplayConfig, ConfigError> {
    let config = DisplayConfig {
        panels_wide: PANELS_WIDE,
        panels_high: PANELS_HIGH,
        scan_interval_us: SCAN_INTERVAL_US,
        output_enable_inverted: OUTPUT_ENABLE_INVERTED,
        spi_frequency_hz: SPI_FREQUENCY_HZ,
        marquee: MarqueeConfig {
            step_ms: MARQUEE_STEP_MS,
            dx: MARQUEE_DX,
            dy: MARQUEE_DY,
            ..MarqueeConfig::with_text(MARQUEE_TEXT)?
        },
    };
    config.validate()?;
    Ok(config)
}
