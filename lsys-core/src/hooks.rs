//! Render hooks: cosmetic callbacks run before every interpreted symbol.
//!
//! A hook sees the cursor state (read-only) and may change the renderer's
//! color or pen width. Width changes are picked up by the interpreter, so
//! later `#`/`!`/`*`/`/` adjust the width the hook chose.

use std::collections::BTreeMap;

use lsys_graphics::math::towards;
use lsys_graphics::types::{Color, Point, Scalar};

use crate::backend::Renderer;
use crate::state::CursorState;

/// What a hook gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    /// The symbol about to be dispatched.
    pub symbol: char,
    /// Its index in the interpreted string.
    pub index: usize,
    pub cursor: &'a CursorState,
    /// Number of saved states on the stack.
    pub depth: usize,
}

/// A cosmetic callback.
pub trait RenderHook {
    fn before_symbol(&mut self, ctx: &HookContext<'_>, renderer: &mut dyn Renderer);
}

impl<F> RenderHook for F
where
    F: FnMut(&HookContext<'_>, &mut dyn Renderer),
{
    fn before_symbol(&mut self, ctx: &HookContext<'_>, renderer: &mut dyn Renderer) {
        self(ctx, renderer);
    }
}

// ---------------------------------------------------------------------------
// Colour wheel
// ---------------------------------------------------------------------------

/// Color by polar position around a centre point.
///
/// Hue follows the bearing from the cursor to `centre` (shifted by `phase`
/// degrees). Saturation is the distance over `radius` and keeps growing past
/// it; the color channels are clamped, not the saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourWheel {
    pub centre: Point,
    pub radius: Scalar,
    pub phase: Scalar,
}

impl ColourWheel {
    pub const fn new(centre: Point, radius: Scalar, phase: Scalar) -> Self {
        Self {
            centre,
            radius,
            phase,
        }
    }

    /// The color for a cursor at `at`.
    pub fn colour_at(&self, at: Point) -> Color {
        let hue = (towards(at, self.centre) + self.phase).rem_euclid(360.0) / 360.0;
        let saturation = if self.radius > 0.0 {
            at.distance(self.centre) / self.radius
        } else {
            1.0
        };
        Color::from_hsv(hue, saturation, 1.0)
    }
}

impl Default for ColourWheel {
    fn default() -> Self {
        Self::new(Point::ZERO, 200.0, 0.0)
    }
}

impl RenderHook for ColourWheel {
    fn before_symbol(&mut self, ctx: &HookContext<'_>, renderer: &mut dyn Renderer) {
        renderer.set_color(self.colour_at(ctx.cursor.position));
    }
}

// ---------------------------------------------------------------------------
// Colour table
// ---------------------------------------------------------------------------

/// Color by stack depth, with a fallback for depths not in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColourTable {
    pub table: BTreeMap<usize, Color>,
    pub fallback: Color,
}

impl ColourTable {
    pub const fn new(table: BTreeMap<usize, Color>) -> Self {
        Self {
            table,
            fallback: Color::WHITE,
        }
    }

    pub fn colour_for(&self, depth: usize) -> Color {
        self.table.get(&depth).copied().unwrap_or(self.fallback)
    }
}

impl RenderHook for ColourTable {
    fn before_symbol(&mut self, ctx: &HookContext<'_>, renderer: &mut dyn Renderer) {
        renderer.set_color(self.colour_for(ctx.depth));
    }
}

// ---------------------------------------------------------------------------
// Tree width
// ---------------------------------------------------------------------------

/// Pen width tapering with stack depth: thick trunk, thin twigs.
///
/// With `d = max_level - depth`, the width is `d + 10·2^(d-9) + 4^(2-d)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeWidth {
    pub max_level: usize,
}

impl TreeWidth {
    pub const fn new(max_level: usize) -> Self {
        Self { max_level }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "stack depths are far below 2^52"
    )]
    pub fn width_for(&self, depth: usize) -> Scalar {
        let d = self.max_level as Scalar - depth as Scalar;
        d + 10.0 * (d - 9.0).exp2() + 4.0_f64.powf(2.0 - d)
    }
}

impl Default for TreeWidth {
    fn default() -> Self {
        Self::new(9)
    }
}

impl RenderHook for TreeWidth {
    fn before_symbol(&mut self, ctx: &HookContext<'_>, renderer: &mut dyn Renderer) {
        renderer.set_pen_width(self.width_for(ctx.depth));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use lsys_graphics::types::EPSILON;

    fn cursor_at(position: Point) -> CursorState {
        CursorState {
            position,
            heading: 0.0,
            pen_down: true,
            pen_width: 1.0,
            step_length: 1.0,
            turning_angle: 90.0,
        }
    }

    #[test]
    fn colour_wheel_centre_is_white() {
        let wheel = ColourWheel::default();
        assert_eq!(wheel.colour_at(Point::ZERO), Color::WHITE);
    }

    #[test]
    fn colour_wheel_saturates_at_radius() {
        let wheel = ColourWheel::new(Point::ZERO, 100.0, 0.0);
        // Cursor west of the centre looks east: bearing 0 → red.
        let c = wheel.colour_at(Point::new(-100.0, 0.0));
        assert!((c.r - 1.0).abs() < EPSILON);
        assert!(c.g.abs() < EPSILON && c.b.abs() < EPSILON);
        // At a pure hue, oversaturation only pushes channels below zero.
        assert_eq!(wheel.colour_at(Point::new(-500.0, 0.0)), c);
    }

    #[test]
    fn colour_wheel_keeps_shifting_past_radius() {
        let wheel = ColourWheel::new(Point::ZERO, 100.0, 0.0);
        let (sin, cos) = 30.0_f64.to_radians().sin_cos();
        // Bearing 30 degrees towards the centre: hue 1/12.
        let at_radius = wheel.colour_at(Point::new(-100.0 * cos, -100.0 * sin));
        assert!((at_radius.g - 0.5).abs() < 1e-6, "{at_radius:?}");

        let beyond = wheel.colour_at(Point::new(-150.0 * cos, -150.0 * sin));
        assert!((beyond.r - 1.0).abs() < EPSILON, "{beyond:?}");
        assert!((beyond.g - 0.25).abs() < 1e-6, "{beyond:?}");
        assert!(beyond.b.abs() < EPSILON, "{beyond:?}");
    }

    #[test]
    fn colour_table_falls_back_to_white() {
        let green = Color::from_rgb8(0, 128, 0);
        let table = ColourTable::new(BTreeMap::from([(0, green)]));
        assert_eq!(table.colour_for(0), green);
        assert_eq!(table.colour_for(3), Color::WHITE);
    }

    #[test]
    fn tree_width_tapers() {
        let hook = TreeWidth::default();
        // depth 0: d = 9 → 9 + 10 + 4^-7
        assert!((hook.width_for(0) - (19.0 + 4.0_f64.powi(-7))).abs() < EPSILON);
        // depth 7: d = 2 → 2 + 10/128 + 1
        assert!((hook.width_for(7) - (3.0 + 10.0 / 128.0)).abs() < EPSILON);
        assert!(hook.width_for(0) > hook.width_for(5));
    }

    #[test]
    fn hooks_drive_the_renderer() {
        let mut canvas = Canvas::new();
        let cursor = cursor_at(Point::ZERO);
        let ctx = HookContext {
            symbol: 'F',
            index: 0,
            cursor: &cursor,
            depth: 7,
        };
        TreeWidth::default().before_symbol(&ctx, &mut canvas);
        assert!((canvas.pen_width() - (3.0 + 10.0 / 128.0)).abs() < EPSILON);

        let mut seen = Vec::new();
        let mut closure = |ctx: &HookContext<'_>, _: &mut dyn Renderer| seen.push(ctx.symbol);
        closure.before_symbol(&ctx, &mut canvas);
        assert_eq!(seen, vec!['F']);
    }
}
