//! Bit-packed framebuffer
//!
//! One bit per pixel, laid out as described in [`crate::geometry`]. The
//! buffer is sized for [`MAX_PANELS`] and only the prefix belonging to the
//! configured geometry is used.
//!
//! [`MAX_PANELS`]: crate::geometry::MAX_PANELS

use crate::geometry::{address, PanelGeometry, MAX_FRAMEBUFFER_BYTES, PANEL_BYTES};
use crate::graphics::GraphicsMode;

/// Byte value of eight unlit pixels
pub const BLANK: u8 = 0xFF;

/// Byte value of eight lit pixels
pub const LIT: u8 = 0x00;

/// Pixel storage for the whole tiled surface
#[derive(Clone)]
pub struct Framebuffer {
    geometry: PanelGeometry,
    bytes: [u8; MAX_FRAMEBUFFER_BYTES],
}

impl Framebuffer {
    /// Create an all-unlit framebuffer for `geometry`
    pub const fn new(geometry: PanelGeometry) -> Self {
        Self {
            geometry,
            bytes: [BLANK; MAX_FRAMEBUFFER_BYTES],
        }
    }

    /// Panel arrangement this buffer covers
    pub const fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Surface width in pixels
    pub const fn width(&self) -> i32 {
        self.geometry.width()
    }

    /// Surface height in pixels
    pub const fn height(&self) -> i32 {
        self.geometry.height()
    }

    /// Combine `on` into pixel `(x, y)` using `mode`
    ///
    /// Off-surface coordinates are ignored.
    #[inline]
    pub fn write_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode, on: bool) {
        if let Some(addr) = address(x, y, &self.geometry) {
            let byte = &mut self.bytes[addr.offset];
            *byte = mode.compose(*byte, addr.mask, on);
        }
    }

    /// Whether pixel `(x, y)` is lit, or `None` off the surface
    pub fn is_lit(&self, x: i32, y: i32) -> Option<bool> {
        address(x, y, &self.geometry).map(|addr| self.bytes[addr.offset] & addr.mask == 0)
    }

    /// Fill the whole surface
    ///
    /// `blank = true` turns every pixel off, `false` lights every pixel.
    pub fn clear(&mut self, blank: bool) {
        let fill = if blank { BLANK } else { LIT };
        let len = self.geometry.buffer_len();
        self.bytes[..len].fill(fill);
    }

    /// Raw framebuffer contents in hardware polarity
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.geometry.buffer_len()]
    }

    /// Raw contents of the sub-panel at `index` (row-major panel order)
    ///
    /// Returns an empty slice for an index past the last panel.
    pub fn panel_bytes(&self, index: usize) -> &[u8] {
        if index >= self.geometry.panels_total() {
            return &[];
        }
        let start = index * PANEL_BYTES;
        &self.bytes[start..start + PANEL_BYTES]
    }

    /// Shift every logical row one pixel to the left
    ///
    /// The leftmost column is dropped and an unlit column enters on the
    /// right. Bits carry across byte and sub-panel boundaries.
    pub fn shift_left(&mut self) {
        let row_bytes = self.geometry.row_bytes();
        for y in 0..self.geometry.height() as usize {
            let mut carry = 1u8;
            for index in (0..row_bytes).rev() {
                let offset = self.geometry.row_byte_offset(y, index);
                let byte = self.bytes[offset];
                self.bytes[offset] = (byte << 1) | carry;
                carry = byte >> 7;
            }
        }
    }

    /// Shift every logical row one pixel to the right
    ///
    /// The rightmost column is dropped and an unlit column enters on the
    /// left.
    pub fn shift_right(&mut self) {
        let row_bytes = self.geometry.row_bytes();
        for y in 0..self.geometry.height() as usize {
            let mut carry = 1u8;
            for index in 0..row_bytes {
                let offset = self.geometry.row_byte_offset(y, index);
                let byte = self.bytes[offset];
                self.bytes[offset] = (byte >> 1) | (carry << 7);
                carry = byte & 0x01;
            }
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(PanelGeometry::SINGLE)
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("geometry", &self.geometry)
            .field("bytes", &self.as_bytes())
            .finish()
    }
}
