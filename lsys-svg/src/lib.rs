//! SVG renderer for L-system pictures.
//!
//! Converts a [`Picture`] into an SVG [`Document`] using the `svg` crate.
//!
//! - Turtle coordinates have Y pointing **up**; SVG has Y pointing **down**.
//!   All Y coordinates are negated at render time, so no transform is
//!   needed on the root group.
//! - Path data is built as raw `d` strings to keep `f64` precision (the
//!   `svg` crate's `Data` builder uses `f32`).

use std::fmt::Write;

use svg::Document;
use svg::node::element::{Group, Path, Rectangle};

use lsys_graphics::bbox::{BoundingBox, picture_bbox};
use lsys_graphics::types::{Color, Picture, Polyline, Scalar, StrokeObject};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a [`Picture`] to an SVG [`Document`] with default options.
#[must_use]
pub fn render(picture: &Picture) -> Document {
    render_with_options(picture, &RenderOptions::default())
}

/// Render a [`Picture`] to an SVG string.
#[must_use]
pub fn render_to_string(picture: &Picture, opts: &RenderOptions) -> String {
    render_with_options(picture, opts).to_string()
}

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Extra margin around the bounding box. Default: 10.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 3.
    pub precision: usize,
    /// Fill behind the drawing, if any.
    pub background: Option<Color>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 10.0,
            precision: 3,
            background: None,
        }
    }
}

/// Render a [`Picture`] to an SVG [`Document`] with custom options.
#[must_use]
pub fn render_with_options(picture: &Picture, opts: &RenderOptions) -> Document {
    let bb = picture_bbox(picture);
    let mut content = Group::new();
    for stroke in picture.strokes() {
        content = content.add(render_stroke(stroke, opts));
    }
    build_document(&bb, opts, content)
}

// ---------------------------------------------------------------------------
// Strokes
// ---------------------------------------------------------------------------

/// Strokes are always drawn with round caps and joins. A negative pen width
/// draws like its magnitude.
fn render_stroke(stroke: &StrokeObject, opts: &RenderOptions) -> Path {
    Path::new()
        .set("d", polyline_to_d(&stroke.path, opts.precision))
        .set("fill", "none")
        .set("stroke", color_to_svg(stroke.color))
        .set("stroke-width", fmt_scalar(stroke.width.abs(), opts.precision))
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round")
}

/// Convert a [`Polyline`] to SVG path data (`M` then `L` commands), with Y
/// negated.
fn polyline_to_d(path: &Polyline, precision: usize) -> String {
    let mut d = String::with_capacity(path.points.len() * 16);
    for (i, p) in path.points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        write_point(&mut d, p.x, -p.y, precision);
    }
    d
}

/// Write "x,y", trimming trailing zeros and normalizing negative zero.
fn write_point(d: &mut String, x: Scalar, y: Scalar, precision: usize) {
    let _ = write!(
        d,
        "{},{}",
        fmt_scalar(x, precision),
        fmt_scalar(y, precision)
    );
}

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "color components are clamped to [0, 255]"
)]
fn color_to_svg(c: Color) -> String {
    let r = (c.r.clamp(0.0, 1.0) * 255.0).round() as u8;
    let g = (c.g.clamp(0.0, 1.0) * 255.0).round() as u8;
    let b = (c.b.clamp(0.0, 1.0) * 255.0).round() as u8;
    if r == 0 && g == 0 && b == 0 {
        "black".to_owned()
    } else if r == 255 && g == 255 && b == 255 {
        "white".to_owned()
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" { "0".to_owned() } else { s }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

/// Wrap rendered content in a document whose `viewBox` is the bounding
/// box plus margin, Y range negated.
fn build_document(bb: &BoundingBox, opts: &RenderOptions, content: Group) -> Document {
    let m = opts.margin;

    let (vb_x, vb_y, vb_w, vb_h) = if bb.is_valid() {
        (
            bb.min_x - m,
            -bb.max_y - m,
            2.0f64.mul_add(m, bb.width()),
            2.0f64.mul_add(m, bb.height()),
        )
    } else {
        (0.0, 0.0, 100.0, 100.0)
    };
    let p = opts.precision;

    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, p),
                fmt_scalar(vb_y, p),
                fmt_scalar(vb_w, p),
                fmt_scalar(vb_h, p),
            ),
        )
        .set("width", fmt_scalar(vb_w, p))
        .set("height", fmt_scalar(vb_h, p));

    if let Some(bg) = opts.background {
        doc = doc.add(
            Rectangle::new()
                .set("x", fmt_scalar(vb_x, p))
                .set("y", fmt_scalar(vb_y, p))
                .set("width", fmt_scalar(vb_w, p))
                .set("height", fmt_scalar(vb_h, p))
                .set("fill", color_to_svg(bg)),
        );
    }

    doc.add(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
