//! Scrolling text
//!
//! A [`Marquee`] remembers a string and its scroll offset. Each step moves
//! the offset and redraws. When the text has completely left the surface it
//! re-enters from the opposite edge and the screen is blanked.
//!
//! Scrolling one pixel left or right shifts the framebuffer instead of
//! re-rendering the whole string, then redraws the single glyph at the
//! leading edge.

use heapless::Vec;

use crate::font::Font;
use crate::framebuffer::Framebuffer;
use crate::graphics::GraphicsMode;

/// Longest marquee text in bytes
pub const MAX_MARQUEE_LEN: usize = 256;

/// Scrolling text state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marquee {
    text: Vec<u8, MAX_MARQUEE_LEN>,
    width: i32,
    height: i32,
    offset_x: i32,
    offset_y: i32,
}

impl Marquee {
    /// Measure `text` in `font` and place its top-left corner at
    /// `(left, top)`
    ///
    /// Text beyond [`MAX_MARQUEE_LEN`] bytes is dropped. Characters the
    /// font cannot draw take no space.
    pub fn new(font: &Font<'_>, text: &[u8], left: i32, top: i32) -> Self {
        let text = &text[..text.len().min(MAX_MARQUEE_LEN)];
        let width = text
            .iter()
            .map(|&c| font.char_width(c))
            .filter(|&w| w > 0)
            .map(|w| i32::from(w) + 1)
            .sum();

        let mut stored = Vec::new();
        // Length already bounded above
        let _ = stored.extend_from_slice(text);

        Self {
            text: stored,
            width,
            height: i32::from(font.height()),
            offset_x: left,
            offset_y: top,
        }
    }

    /// Text being scrolled
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Rendered width including one separator column per glyph
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Rendered height
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Current top-left corner of the text
    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Render the whole string at the current offset
    pub fn draw(&self, framebuffer: &mut Framebuffer, font: &Font<'_>) {
        framebuffer.draw_string(
            font,
            self.offset_x,
            self.offset_y,
            &self.text,
            GraphicsMode::Normal,
        );
    }

    /// Scroll by `(dx, dy)` pixels
    ///
    /// Returns `true` when the text wrapped around during this step.
    pub fn step(&mut self, framebuffer: &mut Framebuffer, font: &Font<'_>, dx: i32, dy: i32) -> bool {
        let screen_w = framebuffer.width();
        let screen_h = framebuffer.height();
        let mut wrapped = false;

        self.offset_x = self.offset_x.saturating_add(dx);
        self.offset_y = self.offset_y.saturating_add(dy);

        if self.offset_x < -self.width {
            self.offset_x = screen_w;
            wrapped = true;
        } else if self.offset_x > screen_w {
            self.offset_x = -self.width;
            wrapped = true;
        }

        if self.offset_y < -self.height {
            self.offset_y = screen_h;
            wrapped = true;
        } else if self.offset_y > screen_h {
            self.offset_y = -self.height;
            wrapped = true;
        }

        if wrapped {
            framebuffer.clear(true);
            #[cfg(feature = "defmt")]
            defmt::debug!("DMD: marquee wrapped to ({}, {})", self.offset_x, self.offset_y);
        }

        match (dx, dy) {
            (-1, 0) => {
                framebuffer.shift_left();
                // Redraw the glyph reaching the right edge
                self.redraw_first(framebuffer, font, |start, width| start + width >= screen_w);
            }
            (1, 0) => {
                framebuffer.shift_right();
                // Redraw the glyph covering column 0
                self.redraw_first(framebuffer, font, |start, width| start + width > 0);
            }
            _ => self.draw(framebuffer, font),
        }

        wrapped
    }

    /// Draw the first glyph whose `(start, width)` satisfies `pick`
    fn redraw_first(
        &self,
        framebuffer: &mut Framebuffer,
        font: &Font<'_>,
        pick: impl Fn(i32, i32) -> bool,
    ) {
        let mut start = self.offset_x;
        for &c in self.text.iter() {
            let width = i32::from(font.char_width(c));
            if width == 0 {
                continue;
            }
            if pick(start, width) {
                let _ = framebuffer.draw_char(font, start, self.offset_y, c, GraphicsMode::Normal);
                return;
            }
            start += width + 1;
        }
    }
}
