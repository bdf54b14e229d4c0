//! Character and string rendering
//!
//! Glyph bits are written in both states, so `GraphicsMode::Normal` paints
//! the glyph's background as well as its foreground.

use crate::font::Font;
use crate::framebuffer::Framebuffer;
use crate::graphics::GraphicsMode;

/// Reasons a character was not drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CharError {
    /// Character is not encoded in the font
    NotInFont,
    /// Glyph lies wholly outside the surface
    OffCanvas,
    /// No font has been selected
    NoFont,
}

impl Framebuffer {
    /// Draw one character with its top-left corner at `(x, y)`
    ///
    /// Returns the advance width. A glyph with no column or row on the
    /// surface draws nothing and reports [`CharError::OffCanvas`].
    pub fn draw_char(
        &mut self,
        font: &Font<'_>,
        x: i32,
        y: i32,
        c: u8,
        mode: GraphicsMode,
    ) -> Result<u8, CharError> {
        let width = font.char_width(c);
        if width == 0 {
            return Err(CharError::NotInFont);
        }
        let height = i32::from(font.height());
        if x >= self.width()
            || y >= self.height()
            || x.saturating_add(i32::from(width)) <= 0
            || y.saturating_add(height) <= 0
        {
            return Err(CharError::OffCanvas);
        }

        if c == b' ' {
            self.draw_filled_box(
                x,
                y,
                x + i32::from(width) - 1,
                y + height - 1,
                GraphicsMode::Inverse,
            );
            return Ok(width);
        }

        let Some(glyph) = font.glyph(c) else {
            return Err(CharError::NotInFont);
        };
        for column in 0..glyph.width {
            for row in 0..glyph.height {
                self.write_pixel(
                    x + i32::from(column),
                    y + i32::from(row),
                    mode,
                    glyph.pixel(column, row),
                );
            }
        }
        Ok(width)
    }

    /// Draw `text` starting at `(x, y)`
    ///
    /// An unlit column is drawn before the first glyph and after each one.
    /// Characters missing from the font are skipped and glyphs left of the
    /// surface only advance the cursor; drawing stops once the cursor leaves
    /// the right edge.
    pub fn draw_string(&mut self, font: &Font<'_>, x: i32, y: i32, text: &[u8], mode: GraphicsMode) {
        let height = i32::from(font.height());
        if x >= self.width() || y >= self.height() || y.saturating_add(height) <= 0 {
            return;
        }

        // y is within a glyph height of the surface here
        let bottom = y + height - 1;
        let right = i64::from(self.width());
        self.draw_column(i64::from(x) - 1, y, bottom);

        let mut cursor = i64::from(x);
        for &c in text {
            let width = i64::from(font.char_width(c));
            if width == 0 {
                continue;
            }
            if cursor + width > 0 {
                if let Ok(cx) = i32::try_from(cursor) {
                    if self.draw_char(font, cx, y, c, mode) == Err(CharError::OffCanvas) {
                        return;
                    }
                }
            }
            self.draw_column(cursor + width, y, bottom);
            cursor += width + 1;
            if cursor >= right {
                return;
            }
        }
    }

    /// Inverse separator column, skipped when left of the surface
    fn draw_column(&mut self, x: i64, top: i32, bottom: i32) {
        if let Ok(x) = i32::try_from(x) {
            if x >= 0 {
                self.draw_line(x, top, x, bottom, GraphicsMode::Inverse);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::SYSTEM_5X7;
    use crate::geometry::PanelGeometry;
    use crate::testing::{fixed_font, variable_font};
    use proptest::prelude::*;

    /// Solid 6 x 8 blocks for every printable character
    fn block_font_table() -> [u8; 6 + 95 * 6] {
        fixed_font(6, 8, 0x20, 95, 0xFF)
    }

    fn lit_columns(fb: &Framebuffer, y: i32) -> heapless::Vec<i32, 128> {
        (0..fb.width()).filter(|&x| fb.is_lit(x, y) == Some(true)).collect()
    }

    #[test]
    fn test_hi_renders_two_separated_glyphs() {
        let table = block_font_table();
        let font = Font::parse(&table).unwrap();
        let mut fb = Framebuffer::default();
        fb.draw_string(&font, 0, 0, b"Hi", GraphicsMode::Normal);

        for y in 0..8 {
            let cols = lit_columns(&fb, y);
            assert_eq!(&cols[..], &[0, 1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12]);
        }
        // Separator columns are cleared and nothing spills past 2 * (6 + 1)
        assert_eq!(fb.is_lit(6, 0), Some(false));
        assert_eq!(fb.is_lit(13, 0), Some(false));
        assert!(lit_columns(&fb, 8).is_empty());
    }

    #[test]
    fn test_separators_erase_existing_content() {
        let table = block_font_table();
        let font = Font::parse(&table).unwrap();
        let mut fb = Framebuffer::default();
        fb.clear(false);
        fb.draw_string(&font, 4, 0, b"AB", GraphicsMode::Normal);
        for y in 0..8 {
            assert_eq!(fb.is_lit(3, y), Some(false));
            assert_eq!(fb.is_lit(10, y), Some(false));
            assert_eq!(fb.is_lit(17, y), Some(false));
        }
        // Rows below the glyphs are untouched
        assert_eq!(fb.is_lit(3, 8), Some(true));
    }

    #[test]
    fn test_draw_char_results() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();

        assert_eq!(fb.draw_char(&font, 0, 0, b'A', GraphicsMode::Normal), Ok(5));
        assert_eq!(fb.draw_char(&font, 0, 0, 0x10, GraphicsMode::Normal), Err(CharError::NotInFont));
        assert_eq!(fb.draw_char(&font, 32, 0, b'A', GraphicsMode::Normal), Err(CharError::OffCanvas));
        assert_eq!(fb.draw_char(&font, 0, 16, b'A', GraphicsMode::Normal), Err(CharError::OffCanvas));
    }

    #[test]
    fn test_draw_char_wholly_left_or_above_is_off_canvas() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();
        for (x, y) in [(-5, 0), (0, -7), (-100, 0), (0, -100), (i32::MIN, i32::MIN)] {
            assert_eq!(
                fb.draw_char(&font, x, y, b'H', GraphicsMode::Normal),
                Err(CharError::OffCanvas)
            );
        }
        assert_eq!(fb.draw_char(&font, i32::MAX, 0, b'H', GraphicsMode::Normal), Err(CharError::OffCanvas));
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_string_entering_from_left_keeps_spacing() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut scrolled = Framebuffer::default();
        let mut direct = Framebuffer::default();
        // "AB" at -6 puts 'A' wholly off the surface and 'B' at x = 0
        scrolled.draw_string(&font, -6, 0, b"AB", GraphicsMode::Normal);
        direct.draw_string(&font, 0, 0, b"B", GraphicsMode::Normal);
        assert_eq!(scrolled.as_bytes(), direct.as_bytes());
    }

    #[test]
    fn test_tall_variable_width_glyphs() {
        // 'A' is 3 wide with rows 0 and 11 lit, 'B' is 2 wide with row 8 lit
        let table: [u8; 18] = variable_font(12, b'A', &[3, 2], |glyph, i| match (glyph, i / [3, 2][glyph]) {
            (0, 0) => 0x01,
            (0, _) => 0x80,
            (_, 0) => 0x00,
            _ => 0x10,
        });
        let font = Font::parse(&table).unwrap();
        let mut fb = Framebuffer::default();

        assert_eq!(fb.draw_char(&font, 1, 2, b'A', GraphicsMode::Normal), Ok(3));
        for x in 1..4 {
            assert_eq!(fb.is_lit(x, 2), Some(true));
            assert_eq!(fb.is_lit(x, 13), Some(true));
            assert!((3..13).all(|y| fb.is_lit(x, y) == Some(false)));
        }
        assert_eq!(fb.is_lit(4, 2), Some(false));

        assert_eq!(fb.draw_char(&font, 10, 0, b'B', GraphicsMode::Normal), Ok(2));
        assert_eq!(fb.is_lit(10, 8), Some(true));
        assert_eq!(fb.is_lit(11, 8), Some(true));
        assert_eq!(fb.is_lit(10, 0), Some(false));
        assert_eq!(fb.is_lit(10, 9), Some(false));
        assert_eq!(fb.is_lit(11, 11), Some(false));
        assert_eq!(fb.is_lit(12, 8), Some(false));

        let mut fb = Framebuffer::default();
        fb.clear(false);
        fb.draw_string(&font, 1, 0, b"AB", GraphicsMode::Normal);
        assert_eq!(fb.is_lit(1, 0), Some(true));
        assert_eq!(fb.is_lit(3, 11), Some(true));
        assert_eq!(fb.is_lit(5, 8), Some(true));
        assert_eq!(fb.is_lit(6, 8), Some(true));
        for y in 0..12 {
            // Leading column and both separators
            assert_eq!(fb.is_lit(0, y), Some(false));
            assert_eq!(fb.is_lit(4, y), Some(false));
            assert_eq!(fb.is_lit(7, y), Some(false));
        }
        assert_eq!(fb.is_lit(4, 12), Some(true));
    }

    #[test]
    fn test_draw_char_partially_left() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();
        // Right-hand column of 'H' lands on x = 0
        assert_eq!(fb.draw_char(&font, -4, 0, b'H', GraphicsMode::Normal), Ok(5));
        assert_eq!(&lit_columns(&fb, 0)[..], &[0]);
        assert_eq!(&lit_columns(&fb, 3)[..], &[0]);
    }

    #[test]
    fn test_normal_mode_paints_background() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();
        fb.clear(false);
        fb.draw_char(&font, 0, 0, b'H', GraphicsMode::Normal).unwrap();
        assert_eq!(fb.is_lit(0, 0), Some(true));
        assert_eq!(fb.is_lit(2, 0), Some(false));
        assert_eq!(fb.is_lit(2, 3), Some(true));
        // Row 7 is below the 7-pixel glyph
        assert_eq!(fb.is_lit(2, 7), Some(true));
    }

    #[test]
    fn test_or_mode_leaves_background() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();
        fb.clear(false);
        fb.draw_char(&font, 0, 0, b'H', GraphicsMode::Or).unwrap();
        assert_eq!(fb.is_lit(2, 0), Some(true));
    }

    #[test]
    fn test_space_clears_n_sized_box() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();
        fb.clear(false);
        assert_eq!(fb.draw_char(&font, 2, 1, b' ', GraphicsMode::Normal), Ok(5));
        for y in 1..8 {
            for x in 2..7 {
                assert_eq!(fb.is_lit(x, y), Some(false));
            }
        }
        assert_eq!(fb.is_lit(7, 1), Some(true));
        assert_eq!(fb.is_lit(2, 8), Some(true));
        assert_eq!(fb.is_lit(1, 1), Some(true));
    }

    #[test]
    fn test_string_skips_unencoded_chars() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut with_gap = Framebuffer::default();
        let mut without = Framebuffer::default();
        with_gap.draw_string(&font, 0, 0, b"A\x01B", GraphicsMode::Normal);
        without.draw_string(&font, 0, 0, b"AB", GraphicsMode::Normal);
        assert_eq!(with_gap.as_bytes(), without.as_bytes());
    }

    #[test]
    fn test_string_offscreen_origin_is_noop() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::default();
        fb.draw_string(&font, 32, 0, b"AB", GraphicsMode::Normal);
        fb.draw_string(&font, 0, 16, b"AB", GraphicsMode::Normal);
        fb.draw_string(&font, 0, -7, b"AB", GraphicsMode::Normal);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_string_clips_at_right_edge() {
        let font = Font::parse(&SYSTEM_5X7).unwrap();
        let mut fb = Framebuffer::new(PanelGeometry::new(2, 1).unwrap());
        fb.draw_string(&font, 20, 0, b"HHHHHHHHHHHH", GraphicsMode::Normal);
        // Glyphs start every 6 columns; the last one is cut after x = 63
        assert_eq!(fb.is_lit(20, 0), Some(true));
        assert_eq!(fb.is_lit(56, 0), Some(true));
        assert_eq!(fb.is_lit(62, 0), Some(true));
        assert_eq!(fb.is_lit(62, 3), Some(true));
        assert_eq!(fb.is_lit(63, 3), Some(true));
    }

    proptest! {
        #[test]
        fn prop_extreme_coordinates_do_not_panic(
            x in prop_oneof![Just(i32::MIN), Just(i32::MAX), any::<i32>()],
            y in prop_oneof![Just(i32::MIN), Just(i32::MAX), any::<i32>()],
        ) {
            let font = Font::parse(&SYSTEM_5X7).unwrap();
            let mut fb = Framebuffer::default();
            fb.draw_string(&font, x, y, b"AB C", GraphicsMode::Normal);
            let _ = fb.draw_char(&font, x, y, b'A', GraphicsMode::Toggle);
            let _ = fb.draw_char(&font, x, y, b' ', GraphicsMode::Normal);
        }

        #[test]
        fn prop_glyph_stays_in_its_box(
            x in -10i32..40,
            y in -10i32..20,
            c in 0x21u8..0x7F,
        ) {
            let font = Font::parse(&SYSTEM_5X7).unwrap();
            let mut fb = Framebuffer::default();
            let width = font.char_width(c) as i32;
            let _ = fb.draw_char(&font, x, y, c, GraphicsMode::Toggle);
            for py in 0..16 {
                for px in 0..32 {
                    if fb.is_lit(px, py) == Some(true) {
                        prop_assert!(px >= x && px < x + width);
                        prop_assert!(py >= y && py < y + 7);
                    }
                }
            }
        }
    }
}
