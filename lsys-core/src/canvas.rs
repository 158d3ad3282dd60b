//! A headless [`Renderer`] that records strokes into a [`Picture`].
//!
//! Consecutive drawn segments with the same width and color are merged into
//! one polyline. Moving without drawing, lifting the pen, or changing the
//! width or color ends the current polyline.

use lsys_graphics::types::{Color, GraphicsObject, Picture, Point, Polyline, Scalar, StrokeObject};

use crate::backend::Renderer;

/// Picture-building turtle surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    picture: Picture,
    /// Points of the polyline being drawn, if any.
    current: Vec<Point>,
    position: Point,
    heading: Scalar,
    pen_down: bool,
    pen_width: Scalar,
    color: Color,
}

impl Canvas {
    /// An empty canvas: cursor at the origin facing +x, pen down, width 1,
    /// black ink.
    pub const fn new() -> Self {
        Self {
            picture: Picture::new(),
            current: Vec::new(),
            position: Point::ZERO,
            heading: 0.0,
            pen_down: true,
            pen_width: 1.0,
            color: Color::BLACK,
        }
    }

    /// Builder: initial pen width.
    #[must_use]
    pub const fn with_pen_width(mut self, width: Scalar) -> Self {
        self.pen_width = width;
        self
    }

    /// Builder: initial ink color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Close the open polyline, if it has at least one segment.
    fn flush(&mut self) {
        let points = std::mem::take(&mut self.current);
        if points.len() >= 2 {
            self.picture.push(GraphicsObject::Stroke(StrokeObject::new(
                Polyline::from_points(points),
                self.pen_width,
                self.color,
            )));
        }
    }

    /// Finish the open polyline and hand over the picture.
    pub fn into_picture(mut self) -> Picture {
        self.flush();
        self.picture
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for Canvas {
    fn move_to(&mut self, to: Point) {
        self.flush();
        self.position = to;
    }

    fn line_to(&mut self, to: Point) {
        if self.pen_down {
            if self.current.is_empty() {
                self.current.push(self.position);
            }
            self.current.push(to);
        } else {
            self.flush();
        }
        self.position = to;
    }

    fn position(&self) -> Point {
        self.position
    }

    fn heading(&self) -> Scalar {
        self.heading
    }

    fn set_heading(&mut self, heading: Scalar) {
        self.heading = heading;
    }

    fn pen_up(&mut self) {
        self.flush();
        self.pen_down = false;
    }

    fn pen_down(&mut self) {
        self.pen_down = true;
    }

    #[expect(clippy::float_cmp, reason = "only an exact repeat keeps the stroke open")]
    fn set_pen_width(&mut self, width: Scalar) {
        if width != self.pen_width {
            self.flush();
            self.pen_width = width;
        }
    }

    fn pen_width(&self) -> Scalar {
        self.pen_width
    }

    fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.flush();
            self.color = color;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_segments_merge() {
        let mut c = Canvas::new();
        c.line_to(Point::new(1.0, 0.0));
        c.line_to(Point::new(1.0, 1.0));
        c.line_to(Point::new(0.0, 1.0));
        let pic = c.into_picture();
        assert_eq!(pic.objects.len(), 1);
        assert_eq!(pic.segment_count(), 3);
    }

    #[test]
    fn move_starts_new_stroke() {
        let mut c = Canvas::new();
        c.line_to(Point::new(1.0, 0.0));
        c.move_to(Point::new(5.0, 5.0));
        c.line_to(Point::new(6.0, 5.0));
        let pic = c.into_picture();
        assert_eq!(pic.objects.len(), 2);
        let second = pic.strokes().nth(1).unwrap();
        assert_eq!(second.path.points[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn pen_up_draws_nothing() {
        let mut c = Canvas::new();
        c.pen_up();
        c.line_to(Point::new(3.0, 0.0));
        assert_eq!(c.position(), Point::new(3.0, 0.0));
        assert!(c.into_picture().objects.is_empty());
    }

    #[test]
    fn width_change_splits_stroke() {
        let mut c = Canvas::new().with_pen_width(2.0);
        c.line_to(Point::new(1.0, 0.0));
        c.set_pen_width(2.0);
        c.line_to(Point::new(2.0, 0.0));
        c.set_pen_width(4.0);
        c.line_to(Point::new(3.0, 0.0));
        let pic = c.into_picture();
        let widths: Vec<Scalar> = pic.strokes().map(|s| s.width).collect();
        assert_eq!(widths, vec![2.0, 4.0]);
    }

    #[test]
    fn color_change_splits_stroke() {
        let red = Color::new(1.0, 0.0, 0.0);
        let mut c = Canvas::new();
        c.line_to(Point::new(1.0, 0.0));
        c.set_color(red);
        c.line_to(Point::new(2.0, 0.0));
        let pic = c.into_picture();
        let colors: Vec<Color> = pic.strokes().map(|s| s.color).collect();
        assert_eq!(colors, vec![Color::BLACK, red]);
    }
}
