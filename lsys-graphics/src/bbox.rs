//! Axis-aligned bounding box computation.
//!
//! Provides [`BoundingBox`] and helpers for computing bounds of polylines
//! and pictures.

use crate::types::{Picture, Point, Polyline, Scalar, StrokeObject};

// ---------------------------------------------------------------------------
// BoundingBox type
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// An empty (inverted) bounding box.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Check if this bounding box is valid (non-empty).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// Expand to include a point.
    pub const fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another bounding box.
    pub fn union(&mut self, other: &Self) {
        if other.is_valid() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }

    /// Grow every side by `amount`. Empty boxes stay empty.
    pub fn inflate(&mut self, amount: Scalar) {
        if self.is_valid() {
            self.min_x -= amount;
            self.min_y -= amount;
            self.max_x += amount;
            self.max_y += amount;
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Bounds of geometry
// ---------------------------------------------------------------------------

/// Bounding box of the points of a polyline.
pub fn polyline_bbox(path: &Polyline) -> BoundingBox {
    let mut bb = BoundingBox::EMPTY;
    for &p in &path.points {
        bb.include_point(p);
    }
    bb
}

/// Bounding box of a stroke, widened by half the pen width.
pub fn stroke_bbox(stroke: &StrokeObject) -> BoundingBox {
    let mut bb = polyline_bbox(&stroke.path);
    bb.inflate(stroke.width.abs() / 2.0);
    bb
}

/// Bounding box of everything drawn in a picture.
pub fn picture_bbox(picture: &Picture) -> BoundingBox {
    let mut bb = BoundingBox::EMPTY;
    for stroke in picture.strokes() {
        bb.union(&stroke_bbox(stroke));
    }
    bb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
