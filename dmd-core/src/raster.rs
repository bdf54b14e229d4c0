//! Line, circle and box rasterization
//!
//! Every shape is built from [`Framebuffer::write_pixel`] calls, so clipping
//! happens pixel by pixel and off-surface parts simply vanish.

use crate::framebuffer::Framebuffer;
use crate::graphics::GraphicsMode;

impl Framebuffer {
    /// Draw a line from `(x1, y1)` to `(x2, y2)`, both endpoints included
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        let (mut x, mut y) = (x1, y1);
        let mut dx = i64::from(x2) - i64::from(x1);
        let mut dy = i64::from(y2) - i64::from(y1);
        let step_x = if dx < 0 { -1 } else { 1 };
        let step_y = if dy < 0 { -1 } else { 1 };
        dx = dx.abs() << 1;
        dy = dy.abs() << 1;

        self.write_pixel(x, y, mode, true);

        if dx > dy {
            let mut fraction = dy - (dx >> 1);
            while x != x2 {
                if fraction >= 0 {
                    y += step_y;
                    fraction -= dx;
                }
                x += step_x;
                fraction += dy;
                self.write_pixel(x, y, mode, true);
            }
        } else {
            let mut fraction = dx - (dy >> 1);
            while y != y2 {
                if fraction >= 0 {
                    x += step_x;
                    fraction -= dy;
                }
                y += step_y;
                fraction += dx;
                self.write_pixel(x, y, mode, true);
            }
        }
    }

    /// Draw a circle outline centred on `(cx, cy)`
    ///
    /// A negative radius draws nothing; radius 0 is a single pixel.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, mode: GraphicsMode) {
        if radius < 0 {
            return;
        }
        if radius == 0 {
            self.write_pixel(cx, cy, mode, true);
            return;
        }
        let (cx, cy, radius) = (i64::from(cx), i64::from(cy), i64::from(radius));
        if !self.circle_may_touch(cx, cy, radius) {
            return;
        }

        let mut x = 0i64;
        let mut y = radius;
        let mut p = (5 - radius * 4) / 4;

        self.circle_points(cx, cy, x, y, mode);
        while x < y {
            x += 1;
            if p < 0 {
                p += 2 * x + 1;
            } else {
                y -= 1;
                p += 2 * (x - y) + 1;
            }
            self.circle_points(cx, cy, x, y, mode);
        }
    }

    /// Whether any outline pixel can land on the surface
    ///
    /// False when the bounding square misses the surface or the surface
    /// lies strictly inside the ring.
    fn circle_may_touch(&self, cx: i64, cy: i64, radius: i64) -> bool {
        let (w, h) = (i64::from(self.width()), i64::from(self.height()));
        if cx + radius < 0 || cx - radius >= w || cy + radius < 0 || cy - radius >= h {
            return false;
        }
        let far_x = i128::from((cx).abs().max((w - 1 - cx).abs()));
        let far_y = i128::from((cy).abs().max((h - 1 - cy).abs()));
        let inner = i128::from(radius - 2);
        inner <= 0 || far_x * far_x + far_y * far_y >= inner * inner
    }

    fn plot(&mut self, x: i64, y: i64, mode: GraphicsMode) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.write_pixel(x, y, mode, true);
        }
    }

    /// Plot the reflections of one octant point, each exactly once
    fn circle_points(&mut self, cx: i64, cy: i64, x: i64, y: i64, mode: GraphicsMode) {
        if x == 0 {
            self.plot(cx, cy + y, mode);
            self.plot(cx, cy - y, mode);
            self.plot(cx + y, cy, mode);
            self.plot(cx - y, cy, mode);
        } else if x == y {
            self.plot(cx + x, cy + y, mode);
            self.plot(cx - x, cy + y, mode);
            self.plot(cx + x, cy - y, mode);
            self.plot(cx - x, cy - y, mode);
        } else if x < y {
            self.plot(cx + x, cy + y, mode);
            self.plot(cx - x, cy + y, mode);
            self.plot(cx + x, cy - y, mode);
            self.plot(cx - x, cy - y, mode);
            self.plot(cx + y, cy + x, mode);
            self.plot(cx - y, cy + x, mode);
            self.plot(cx + y, cy - x, mode);
            self.plot(cx - y, cy - x, mode);
        }
    }

    /// Draw a rectangle outline with corners `(x1, y1)` and `(x2, y2)`
    pub fn draw_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        self.draw_line(x1, y1, x2, y1, mode);
        self.draw_line(x2, y1, x2, y2, mode);
        self.draw_line(x2, y2, x1, y2, mode);
        self.draw_line(x1, y2, x1, y1, mode);
    }

    /// Fill the rectangle with corners `(x1, y1)` and `(x2, y2)`
    ///
    /// Swept as one vertical line per column, in either corner order.
    /// Columns off the surface are skipped.
    pub fn draw_filled_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mode: GraphicsMode) {
        let left = x1.min(x2).max(0);
        let right = x1.max(x2).min(self.width() - 1);
        for x in left..=right {
            self.draw_line(x, y1, x, y2, mode);
        }
    }
}
