//! Panel geometry and pixel addressing
//!
//! Memory layout of one 32 x 16 sub-panel:
//!
//! ```text
//!                      32 pixels (4 bytes)
//!        byte 0    byte 1    byte 2    byte 3
//!      ┌─────────┬─────────┬─────────┬─────────┐
//! y=0  │76543210 │76543210 │76543210 │76543210 │   bit 7 = leftmost pixel
//! y=1  │  ...    │         │         │         │
//!  :   │         │         │         │         │   16 rows, 64 bytes
//! y=15 │         │         │         │         │
//!      └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! Sub-panels are stored back to back, left to right then top to bottom,
//! so sub-panel `(px, py)` starts at byte `(py * panels_wide + px) * 64`.

use crate::config::ConfigError;

/// Pixels across one sub-panel
pub const PANEL_WIDTH: i32 = 32;

/// Pixels down one sub-panel
pub const PANEL_HEIGHT: i32 = 16;

/// Storage bytes per sub-panel row (8 pixels per byte)
pub const PANEL_BYTES_PER_ROW: usize = (PANEL_WIDTH / 8) as usize;

/// Storage bytes per sub-panel
pub const PANEL_BYTES: usize = PANEL_BYTES_PER_ROW * PANEL_HEIGHT as usize;

/// Maximum number of tiled sub-panels
pub const MAX_PANELS: usize = 16;

/// Framebuffer capacity in bytes
pub const MAX_FRAMEBUFFER_BYTES: usize = MAX_PANELS * PANEL_BYTES;

/// Column-in-byte to bit mask, MSB first
const PIXEL_MASK: [u8; 8] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// Arrangement of sub-panels making up the display surface
///
/// Fixed at construction; validated so that the framebuffer always fits
/// in [`MAX_FRAMEBUFFER_BYTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    panels_wide: u8,
    panels_high: u8,
}

impl PanelGeometry {
    /// Single 32 x 16 panel
    pub const SINGLE: Self = Self {
        panels_wide: 1,
        panels_high: 1,
    };

    /// Create a geometry of `panels_wide` x `panels_high` sub-panels
    pub fn new(panels_wide: u8, panels_high: u8) -> Result<Self, ConfigError> {
        if panels_wide == 0 || panels_high == 0 {
            return Err(ConfigError::NoPanels);
        }
        if panels_wide as usize * panels_high as usize > MAX_PANELS {
            return Err(ConfigError::TooManyPanels);
        }
        Ok(Self {
            panels_wide,
            panels_high,
        })
    }

    /// Sub-panels across
    pub const fn panels_wide(&self) -> u8 {
        self.panels_wide
    }

    /// Sub-panels down
    pub const fn panels_high(&self) -> u8 {
        self.panels_high
    }

    /// Total number of sub-panels
    pub const fn panels_total(&self) -> usize {
        self.panels_wide as usize * self.panels_high as usize
    }

    /// Width of the whole surface in pixels
    pub const fn width(&self) -> i32 {
        PANEL_WIDTH * self.panels_wide as i32
    }

    /// Height of the whole surface in pixels
    pub const fn height(&self) -> i32 {
        PANEL_HEIGHT * self.panels_high as i32
    }

    /// Framebuffer length in bytes
    pub const fn buffer_len(&self) -> usize {
        self.panels_total() * PANEL_BYTES
    }

    /// Bytes in one logical row spanning all sub-panels across
    pub const fn row_bytes(&self) -> usize {
        self.panels_wide as usize * PANEL_BYTES_PER_ROW
    }

    /// Check whether a pixel lies on the surface
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    /// First byte of sub-panel `(panel_x, panel_y)`
    pub const fn panel_base(&self, panel_x: usize, panel_y: usize) -> usize {
        (panel_y * self.panels_wide as usize + panel_x) * PANEL_BYTES
    }

    /// Byte offset of the `index`-th byte (left to right) of logical row `y`
    ///
    /// `y` and `index` must be in range; used by whole-row operations that
    /// have already bounded their loops.
    pub const fn row_byte_offset(&self, y: usize, index: usize) -> usize {
        let panel_y = y / PANEL_HEIGHT as usize;
        let local_y = y % PANEL_HEIGHT as usize;
        let panel_x = index / PANEL_BYTES_PER_ROW;
        let byte_x = index % PANEL_BYTES_PER_ROW;
        self.panel_base(panel_x, panel_y) + local_y * PANEL_BYTES_PER_ROW + byte_x
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Location of one pixel in the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelAddress {
    /// Byte offset into the framebuffer
    pub offset: usize,
    /// Single-bit mask within that byte
    pub mask: u8,
}

/// Map a surface coordinate to its framebuffer byte and bit
///
/// Returns `None` for coordinates outside
/// `[0, width) x [0, height)`; callers treat that as "draw nothing".
pub fn address(x: i32, y: i32, geometry: &PanelGeometry) -> Option<PixelAddress> {
    if !geometry.contains(x, y) {
        return None;
    }

    let (x, y) = (x as usize, y as usize);
    let panel_x = x / PANEL_WIDTH as usize;
    let panel_y = y / PANEL_HEIGHT as usize;
    let local_x = x % PANEL_WIDTH as usize;
    let local_y = y % PANEL_HEIGHT as usize;

    Some(PixelAddress {
        offset: geometry.panel_base(panel_x, panel_y)
            + local_y * PANEL_BYTES_PER_ROW
            + (local_x >> 3),
        mask: PIXEL_MASK[local_x & 0x07],
    })
}
