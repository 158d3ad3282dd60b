//! Core types shared across the `lsys` crates.
//!
//! These types describe what a turtle leaves behind: stroked polylines with
//! a width and a colour, collected into a [`Picture`].

pub use kurbo::{Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias for all coordinates, angles and widths.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1e-9;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: Scalar,
    pub g: Scalar,
    pub b: Scalar,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    #[inline]
    pub const fn new(r: Scalar, g: Scalar, b: Scalar) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 0–255 channel values.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            Scalar::from(r) / 255.0,
            Scalar::from(g) / 255.0,
            Scalar::from(b) / 255.0,
        )
    }

    /// Build a color from hue, saturation and value.
    ///
    /// Hue wraps around. Saturation and value are used as given, so an
    /// oversaturated input pushes channels past [0, 1]; each channel of the
    /// result is clamped afterwards.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "sector is floor of a value in [0, 6)"
    )]
    pub fn from_hsv(h: Scalar, s: Scalar, v: Scalar) -> Self {
        let channel = |c: Scalar| c.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(channel(v), channel(v), channel(v));
        }
        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * s.mul_add(-f, 1.0);
        let t = v * s.mul_add(f - 1.0, 1.0);
        let (red, green, blue) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::new(channel(red), channel(green), channel(blue))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ---------------------------------------------------------------------------
// Polyline
// ---------------------------------------------------------------------------

/// An open chain of straight segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub const fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of segments: one less than the number of points.
    pub const fn num_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Picture and GraphicsObject
// ---------------------------------------------------------------------------

/// A single graphical object in a picture.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsObject {
    /// A stroked polyline.
    Stroke(StrokeObject),
}

/// A stroked polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeObject {
    pub path: Polyline,
    pub width: Scalar,
    pub color: Color,
}

impl StrokeObject {
    pub const fn new(path: Polyline, width: Scalar, color: Color) -> Self {
        Self { path, width, color }
    }
}

/// An ordered collection of graphical objects.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Picture {
    pub objects: Vec<GraphicsObject>,
}

impl Picture {
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn push(&mut self, obj: GraphicsObject) {
        self.objects.push(obj);
    }

    /// Iterate over the stroked objects.
    pub fn strokes(&self) -> impl Iterator<Item = &StrokeObject> {
        self.objects.iter().map(|obj| match obj {
            GraphicsObject::Stroke(stroke) => stroke,
        })
    }

    /// Total number of drawn segments.
    pub fn segment_count(&self) -> usize {
        self.strokes().map(|s| s.path.num_segments()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < EPSILON && (a.g - b.g).abs() < EPSILON && (a.b - b.b).abs() < EPSILON
    }

    #[test]
    fn color_defaults() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::WHITE, Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn color_from_rgb8() {
        assert_eq!(Color::from_rgb8(255, 255, 255), Color::WHITE);
        assert_eq!(Color::from_rgb8(0, 0, 0), Color::BLACK);
        let c = Color::from_rgb8(51, 102, 0);
        assert!((c.r - 0.2).abs() < EPSILON);
        assert!((c.g - 0.4).abs() < EPSILON);
    }

    #[test]
    fn color_from_hsv_primaries() {
        assert!(close(Color::from_hsv(0.0, 1.0, 1.0), Color::new(1.0, 0.0, 0.0)));
        assert!(close(
            Color::from_hsv(1.0 / 3.0, 1.0, 1.0),
            Color::new(0.0, 1.0, 0.0)
        ));
        assert!(close(
            Color::from_hsv(2.0 / 3.0, 1.0, 1.0),
            Color::new(0.0, 0.0, 1.0)
        ));
        // Hue wraps.
        assert!(close(Color::from_hsv(1.0, 1.0, 1.0), Color::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn color_from_hsv_unsaturated_is_gray() {
        assert!(close(Color::from_hsv(0.4, 0.0, 0.5), Color::new(0.5, 0.5, 0.5)));
        // Out-of-range channels are clamped, not rejected.
        assert!(close(Color::from_hsv(0.4, -3.0, 1.0), Color::WHITE));
    }

    #[test]
    fn color_from_hsv_clamps_channels_not_saturation() {
        // 30 degrees of hue: green falls as saturation rises past 1.
        let hue = 1.0 / 12.0;
        assert!(close(Color::from_hsv(hue, 1.0, 1.0), Color::new(1.0, 0.5, 0.0)));
        assert!(close(Color::from_hsv(hue, 1.5, 1.0), Color::new(1.0, 0.25, 0.0)));
    }

    #[test]
    fn polyline_segments() {
        assert_eq!(Polyline::new().num_segments(), 0);
        let p = Polyline::from_points(vec![
            Point::ZERO,
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
        ]);
        assert_eq!(p.num_segments(), 2);
    }

    #[test]
    fn picture_counts_segments() {
        let line = Polyline::from_points(vec![Point::ZERO, Point::new(1.0, 0.0)]);
        let mut pic = Picture::new();
        pic.push(GraphicsObject::Stroke(StrokeObject::new(
            line.clone(),
            1.0,
            Color::BLACK,
        )));
        pic.push(GraphicsObject::Stroke(StrokeObject::new(line, 2.0, Color::WHITE)));
        assert_eq!(pic.objects.len(), 2);
        assert_eq!(pic.segment_count(), 2);
        assert_eq!(pic.strokes().nth(1).map(|s| s.width), Some(2.0));
    }
}
