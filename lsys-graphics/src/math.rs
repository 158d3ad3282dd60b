//! Degree-based trigonometry for turtle geometry.
//!
//! Headings are measured in degrees from the positive x axis, increasing
//! counter-clockwise.

use crate::types::{Point, Scalar, Vec2};

/// Sine of an angle in degrees.
#[inline]
pub fn sind(degrees: Scalar) -> Scalar {
    degrees.to_radians().sin()
}

/// Cosine of an angle in degrees.
#[inline]
pub fn cosd(degrees: Scalar) -> Scalar {
    degrees.to_radians().cos()
}

/// Angle of the vector (x, y) in degrees, in the range (-180, 180].
///
/// Returns 0 for the zero vector.
pub fn angle(x: Scalar, y: Scalar) -> Scalar {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    y.atan2(x).to_degrees()
}

/// Unit vector pointing along `heading` degrees.
///
/// Exact for multiples of 90° so that axis-aligned figures close without
/// drift.
pub fn heading_vector(heading: Scalar) -> Vec2 {
    let h = heading.rem_euclid(360.0);
    if h == 0.0 {
        Vec2::new(1.0, 0.0)
    } else if h == 90.0 {
        Vec2::new(0.0, 1.0)
    } else if h == 180.0 {
        Vec2::new(-1.0, 0.0)
    } else if h == 270.0 {
        Vec2::new(0.0, -1.0)
    } else {
        Vec2::new(cosd(h), sind(h))
    }
}

/// Bearing from `from` to `to`, in degrees in [0, 360).
pub fn towards(from: Point, to: Point) -> Scalar {
    let d = to - from;
    angle(d.x, d.y).rem_euclid(360.0)
}

/// Point reached by travelling `length` along `heading` from `from`.
pub fn advance(from: Point, heading: Scalar, length: Scalar) -> Point {
    from + heading_vector(heading) * length
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
