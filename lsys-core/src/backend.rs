//! The rendering backend seam.
//!
//! The interpreter never draws anything itself; it drives an implementation
//! of [`Renderer`]. Every call is synchronous: the backend has applied the
//! change when the call returns.

use lsys_graphics::types::{Color, Point, Scalar};

/// Primitive cursor-graphics operations.
pub trait Renderer {
    /// Relocate the cursor without drawing.
    fn move_to(&mut self, to: Point);

    /// Move the cursor to `to`, drawing a segment if the pen is down.
    fn line_to(&mut self, to: Point);

    fn position(&self) -> Point;

    /// Heading in degrees, counter-clockwise from +x.
    fn heading(&self) -> Scalar;

    fn set_heading(&mut self, heading: Scalar);

    fn pen_up(&mut self);

    fn pen_down(&mut self);

    fn set_pen_width(&mut self, width: Scalar);

    fn pen_width(&self) -> Scalar;

    /// Change the stroke color. Backends without color ignore it.
    fn set_color(&mut self, _color: Color) {}
}
