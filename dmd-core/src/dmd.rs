//! Display handle
//!
//! [`Dmd`] owns the framebuffer, the scan cursor, the panel interface and
//! the drawing state (selected font, marquee). Drawing and scanning are
//! both `&mut self` calls, so they never overlap; the caller decides how
//! to interleave them.

use crate::config::{ConfigError, DisplayConfig};
use crate::font::{Font, FontError};
use crate::framebuffer::Framebuffer;
use crate::geometry::PanelGeometry;
use crate::graphics::GraphicsMode;
use crate::marquee::Marquee;
use crate::pattern::TestPattern;
use crate::scan::{ScanOutcome, ScanPhase, Scanner};
use crate::text::CharError;
use crate::traits::PanelInterface;

/// A tiled dot matrix display
pub struct Dmd<'f, P: PanelInterface> {
    framebuffer: Framebuffer,
    scanner: Scanner,
    panel: P,
    font: Option<Font<'f>>,
    marquee: Option<Marquee>,
}

impl<'f, P: PanelInterface> Dmd<'f, P> {
    /// Create a display of `panels_wide` x `panels_high` sub-panels
    ///
    /// The screen starts blank, row group 0 is selected and the output
    /// stage is disabled until the first scan.
    pub fn new(mut panel: P, panels_wide: u8, panels_high: u8) -> Result<Self, ConfigError> {
        let geometry = PanelGeometry::new(panels_wide, panels_high)?;

        panel.set_row_select(ScanPhase::First);
        panel.set_output_enabled(false);

        #[cfg(feature = "defmt")]
        defmt::debug!("DMD: {}x{} panels", panels_wide, panels_high);

        Ok(Self {
            framebuffer: Framebuffer::new(geometry),
            scanner: Scanner::new(),
            panel,
            font: None,
            marquee: None,
        })
    }

    /// Create a display from a validated configuration
    pub fn from_config(panel: P, config: &DisplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(panel, config.panels_wide, config.panels_high)
    }

    /// Panel arrangement
    pub fn geometry(&self) -> &PanelGeometry {
        self.framebuffer.geometry()
    }

    /// Surface width in pixels
    pub fn width(&self) -> i32 {
        self.framebuffer.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> i32 {
        self.framebuffer.height()
    }

    /// Framebuffer, for reading back pixels
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Framebuffer, for drawing with `embedded-graphics`
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Panel interface
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Panel interface, mutable
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Give back the panel interface
    pub fn release(self) -> P {
        self.panel
    }

    // ---- pixels and shapes ----

    /// Combine `on` into one pixel; off-surface writes are ignored
    pub fn write_pixel(&mut self, x: i32, y: i32, mode: GraphicsMode, on: bool) {
        self.framebuffer.write_pixel(x, y, mode, on);
    }

    /// Draw a line, both endpoints included
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.framebuffer.draw_line(x1, y1, x2, y2, mode);
    }

    /// Draw a circle outline
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, mode: GraphicsMode) {
        self.framebuffer.draw_circle(cx, cy, radius, mode);
    }

    /// Draw a rectangle outline
    pub fn draw_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.framebuffer.draw_box(x1, y1, x2, y2, mode);
    }

    /// Draw a filled rectangle
    pub fn draw_filled_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.framebuffer.draw_filled_box(x1, y1, x2, y2, mode);
    }

    /// Fill the screen; `blank = true` turns every pixel off
    pub fn clear_screen(&mut self, blank: bool) {
        self.framebuffer.clear(blank);
    }

    /// Overwrite the screen with a bring-up pattern
    pub fn draw_test_pattern(&mut self, pattern: TestPattern) {
        self.framebuffer.draw_test_pattern(pattern);
    }

    // ---- text ----

    /// Use `font` for subsequent text
    pub fn select_font(&mut self, font: Font<'f>) {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "DMD: font selected, height {} chars {}",
            font.height(),
            font.char_count()
        );
        self.font = Some(font);
    }

    /// Parse a raw font table and select it
    ///
    /// A malformed table leaves the current font in place.
    pub fn select_font_table(&mut self, table: &'f [u8]) -> Result<(), FontError> {
        let font = Font::parse(table)?;
        self.select_font(font);
        Ok(())
    }

    /// Currently selected font
    pub fn font(&self) -> Option<&Font<'f>> {
        self.font.as_ref()
    }

    /// Advance width of `c` in the selected font, 0 if it cannot be drawn
    pub fn char_width(&self, c: u8) -> u8 {
        self.font.as_ref().map_or(0, |font| font.char_width(c))
    }

    /// Draw one character, returning its advance width
    pub fn draw_char(&mut self, x: i32, y: i32, c: u8, mode: GraphicsMode) -> Result<u8, CharError> {
        let font = self.font.as_ref().ok_or(CharError::NoFont)?;
        self.framebuffer.draw_char(font, x, y, c, mode)
    }

    /// Draw a string; does nothing without a font
    pub fn draw_string(&mut self, x: i32, y: i32, text: impl AsRef<[u8]>, mode: GraphicsMode) {
        if let Some(font) = self.font.as_ref() {
            self.framebuffer.draw_string(font, x, y, text.as_ref(), mode);
        }
    }

    // ---- marquee ----

    /// Start scrolling `text` from `(left, top)` and draw it once
    pub fn draw_marquee(&mut self, text: impl AsRef<[u8]>, left: i32, top: i32) {
        let Some(font) = self.font.as_ref() else {
            #[cfg(feature = "defmt")]
            defmt::warn!("DMD: marquee needs a font");
            return;
        };
        let marquee = Marquee::new(font, text.as_ref(), left, top);
        marquee.draw(&mut self.framebuffer, font);
        self.marquee = Some(marquee);
    }

    /// Scroll the marquee by `(dx, dy)`
    ///
    /// Returns `true` when the text wrapped around. Without a marquee or a
    /// font this does nothing and returns `false`.
    pub fn step_marquee(&mut self, dx: i32, dy: i32) -> bool {
        match (self.marquee.as_mut(), self.font.as_ref()) {
            (Some(marquee), Some(font)) => marquee.step(&mut self.framebuffer, font, dx, dy),
            _ => false,
        }
    }

    /// Active marquee, if any
    pub fn marquee(&self) -> Option<&Marquee> {
        self.marquee.as_ref()
    }

    // ---- refresh ----

    /// Drive one phase of the multiplexed refresh
    ///
    /// Call at a steady rate, four calls per frame.
    pub fn scan_display(&mut self) -> Result<ScanOutcome, P::Error> {
        self.scanner.scan(&self.framebuffer, &mut self.panel)
    }

    /// Phase the next scan will send
    pub fn scan_phase(&self) -> ScanPhase {
        self.scanner.phase()
    }
}
