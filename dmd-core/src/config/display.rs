//! Display configuration types
//!
//! Panel arrangement, refresh timing and the boot-time marquee.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::PanelGeometry;
use crate::scan::ScanPhase;

/// Maximum marquee text length in a configuration
pub const MAX_MARQUEE_TEXT_LEN: usize = 64;

/// Default scan slice interval (4 slices per frame, ~208 Hz refresh)
pub const DEFAULT_SCAN_INTERVAL_US: u32 = 1_200;

/// Default SPI clock for the shift-register chain
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Zero panels across or down
    NoPanels,
    /// More panels than the framebuffer can hold
    TooManyPanels,
    /// Scan interval of zero
    ZeroScanInterval,
    /// SPI frequency of zero
    ZeroSpiFrequency,
    /// Marquee step interval of zero
    ZeroMarqueeStep,
    /// Marquee text longer than [`MAX_MARQUEE_TEXT_LEN`]
    TextTooLong,
}

/// Marquee shown at boot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarqueeConfig {
    /// Text to scroll (empty disables the marquee)
    pub text: String<MAX_MARQUEE_TEXT_LEN>,
    /// Milliseconds between marquee steps
    pub step_ms: u32,
    /// Horizontal pixels per step
    pub dx: i8,
    /// Vertical pixels per step
    pub dy: i8,
}

impl MarqueeConfig {
    /// Marquee with the given text, scrolling left one pixel every 30 ms
    pub fn with_text(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self {
            text: String::new(),
            ..Self::default()
        };
        config
            .text
            .push_str(text)
            .map_err(|_| ConfigError::TextTooLong)?;
        Ok(config)
    }

    /// Check whether anything is to be scrolled
    pub fn is_enabled(&self) -> bool {
        !self.text.is_empty()
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        let mut text = String::new();
        let _ = text.push_str("Hello World!");
        Self {
            text,
            step_ms: 30,
            dx: -1,
            dy: 0,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Sub-panels across
    pub panels_wide: u8,
    /// Sub-panels down
    pub panels_high: u8,
    /// Microseconds between scan slices
    pub scan_interval_us: u32,
    /// Output-enable line is active-low
    pub output_enable_inverted: bool,
    /// SPI clock for the shift-register chain
    pub spi_frequency_hz: u32,
    /// Boot marquee
    pub marquee: MarqueeConfig,
}

impl DisplayConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry()?;
        if self.scan_interval_us == 0 {
            return Err(ConfigError::ZeroScanInterval);
        }
        if self.spi_frequency_hz == 0 {
            return Err(ConfigError::ZeroSpiFrequency);
        }
        if self.marquee.is_enabled() && self.marquee.step_ms == 0 {
            return Err(ConfigError::ZeroMarqueeStep);
        }
        Ok(())
    }

    /// Panel arrangement described by this config
    pub fn geometry(&self) -> Result<PanelGeometry, ConfigError> {
        PanelGeometry::new(self.panels_wide, self.panels_high)
    }

    /// Whole-frame refresh rate implied by the scan interval
    pub fn refresh_rate_hz(&self) -> u32 {
        match self.scan_interval_us {
            0 => 0,
            interval => 1_000_000 / (interval * ScanPhase::COUNT as u32),
        }
    }

    /// Scan slices between marquee steps (at least one)
    pub fn scans_per_marquee_step(&self) -> u32 {
        match self.scan_interval_us {
            0 => 1,
            interval => (self.marquee.step_ms * 1_000 / interval).max(1),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            panels_wide: 1,
            panels_high: 1,
            scan_interval_us: DEFAULT_SCAN_INTERVAL_US,
            output_enable_inverted: false,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            marquee: MarqueeConfig::default(),
        }
    }
}
