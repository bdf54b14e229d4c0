//! Bitmap font tables
//!
//! Fonts are read-only byte tables with a 6 byte header:
//!
//! | Offset | Meaning |
//! |---|---|
//! | 0..2 | total table length, or `0, 0` for a fixed-width font |
//! | 2 | glyph width (fixed-width fonts only) |
//! | 3 | glyph height in pixels |
//! | 4 | first encoded character |
//! | 5 | number of encoded characters |
//!
//! A variable-width font follows the header with one width byte per glyph.
//! Glyph bitmaps come next, column-major: each column takes
//! `ceil(height / 8)` bytes, stored as `width` bytes for rows 0..8, then
//! `width` bytes for rows 8..16, and so on. Bit 0 is the top row of a byte.
//! When the height is not a multiple of 8 the last byte row is
//! bottom-aligned, so its low bits overlap rows already covered and are
//! ignored.
//!
//! [`Font::parse`] decodes the header once and keeps a per-glyph table of
//! widths and bitmap offsets.

use heapless::Vec;

/// Header size in bytes
pub const HEADER_LEN: usize = 6;

/// Upper bound on glyphs in one font
pub const MAX_GLYPHS: usize = 256;

const FIXED_WIDTH: usize = 2;
const HEIGHT: usize = 3;
const FIRST_CHAR: usize = 4;
const CHAR_COUNT: usize = 5;

/// Font table errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontError {
    /// Table ends before the header, width table or a glyph bitmap
    Truncated,
    /// Character count of zero
    EmptyFont,
    /// Glyph height of zero
    ZeroHeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GlyphEntry {
    width: u8,
    offset: u32,
}

/// One decoded character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Advance width in pixels
    pub width: u8,
    /// Height in pixels (same for every glyph in a font)
    pub height: u8,
    /// Raw column bitmap, `width * ceil(height / 8)` bytes
    pub bitmap: &'a [u8],
}

impl Glyph<'_> {
    /// Whether the pixel at `column`, `row` of the glyph is set
    ///
    /// Positions outside the glyph are never set.
    pub fn pixel(&self, column: u8, row: u8) -> bool {
        if column >= self.width || row >= self.height {
            return false;
        }
        let bytes = bytes_per_column(self.height);
        let last = bytes - 1;
        let (byte_row, bit) = if bytes > 1 && row as usize >= last * 8 {
            // Bottom-aligned last byte
            (last, row as usize + 8 - self.height as usize)
        } else {
            (row as usize / 8, row as usize % 8)
        };
        let index = column as usize + byte_row * self.width as usize;
        self.bitmap
            .get(index)
            .is_some_and(|byte| byte & (1 << bit) != 0)
    }
}

/// A parsed font table
#[derive(Debug, Clone)]
pub struct Font<'a> {
    data: &'a [u8],
    height: u8,
    first_char: u8,
    fixed_width: bool,
    glyphs: Vec<GlyphEntry, MAX_GLYPHS>,
}

impl<'a> Font<'a> {
    /// Decode and validate a font table
    pub fn parse(data: &'a [u8]) -> Result<Self, FontError> {
        if data.len() < HEADER_LEN {
            return Err(FontError::Truncated);
        }

        let fixed_width = data[0] == 0 && data[1] == 0;
        let height = data[HEIGHT];
        let first_char = data[FIRST_CHAR];
        let count = data[CHAR_COUNT] as usize;

        if height == 0 {
            return Err(FontError::ZeroHeight);
        }
        if count == 0 {
            return Err(FontError::EmptyFont);
        }

        let bytes = bytes_per_column(height);
        let mut glyphs = Vec::new();

        if fixed_width {
            let width = data[FIXED_WIDTH];
            let stride = bytes * width as usize;
            for index in 0..count {
                let offset = HEADER_LEN + index * stride;
                push_glyph(&mut glyphs, data, width, offset, stride)?;
            }
        } else {
            let widths = data
                .get(HEADER_LEN..HEADER_LEN + count)
                .ok_or(FontError::Truncated)?;
            let mut offset = HEADER_LEN + count;
            for &width in widths {
                let size = bytes * width as usize;
                push_glyph(&mut glyphs, data, width, offset, size)?;
                offset += size;
            }
        }

        Ok(Self {
            data,
            height,
            first_char,
            fixed_width,
            glyphs,
        })
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// First encoded character code
    pub fn first_char(&self) -> u8 {
        self.first_char
    }

    /// Number of encoded characters
    pub fn char_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether every glyph shares one width
    pub fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    /// Storage bytes per glyph column
    pub fn bytes_per_column(&self) -> usize {
        bytes_per_column(self.height)
    }

    /// Look up a character, `None` if it is not encoded
    pub fn glyph(&self, c: u8) -> Option<Glyph<'a>> {
        let index = c.checked_sub(self.first_char)? as usize;
        let entry = self.glyphs.get(index)?;
        let start = entry.offset as usize;
        let len = entry.width as usize * self.bytes_per_column();
        Some(Glyph {
            width: entry.width,
            height: self.height,
            bitmap: &self.data[start..start + len],
        })
    }

    /// Advance width of a character, 0 if it cannot be drawn
    ///
    /// Space is measured as `'n'`, since many fonts leave it out.
    pub fn char_width(&self, c: u8) -> u8 {
        let c = if c == b' ' { b'n' } else { c };
        self.glyph(c).map_or(0, |glyph| glyph.width)
    }
}

const fn bytes_per_column(height: u8) -> usize {
    (height as usize).div_ceil(8)
}

fn push_glyph(
    glyphs: &mut Vec<GlyphEntry, MAX_GLYPHS>,
    data: &[u8],
    width: u8,
    offset: usize,
    size: usize,
) -> Result<(), FontError> {
    if offset + size > data.len() {
        return Err(FontError::Truncated);
    }
    let offset = u32::try_from(offset).map_err(|_| FontError::Truncated)?;
    // Count is a u8, so this never exceeds capacity
    let _ = glyphs.push(GlyphEntry { width, offset });
    Ok(())
}
