//! Convenience composers over a [`Canvas`]: reference grid, axis gizmo,
//! single lines and square faces for building isometric shapes.

use tableau_engine::coords::Vec3;
use tableau_engine::paint::Color;
use tableau_engine::scene::Stroke;

use crate::canvas::Canvas;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridOptions {
    pub cols: u32,
    pub rows: u32,
    /// Cell edge length in world units.
    pub unit: f32,
    pub stroke: Stroke,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { cols: 10, rows: 10, unit: 10.0, stroke: Stroke::new(1.0, Color::black().with_alpha(0.8)) }
    }
}

/// Draws a `cols × rows` cell grid on the ground plane, anchored at the
/// world origin and extending towards +x/+y.
pub fn grid(canvas: &mut Canvas<'_>, options: &GridOptions) {
    let width = options.cols as f32 * options.unit;
    let height = options.rows as f32 * options.unit;

    for c in 0..=options.cols {
        let x = c as f32 * options.unit;
        canvas.line(Vec3::new(x, 0.0, 0.0), Vec3::new(x, height, 0.0), options.stroke);
    }
    for r in 0..=options.rows {
        let y = r as f32 * options.unit;
        canvas.line(Vec3::new(0.0, y, 0.0), Vec3::new(width, y, 0.0), options.stroke);
    }
}

pub fn line(canvas: &mut Canvas<'_>, from: impl Into<Vec3>, to: impl Into<Vec3>, stroke: Option<Stroke>) {
    canvas.line(from.into(), to.into(), stroke.unwrap_or_default());
}

/// Draws the x, y and z axes from the origin. Non-positive lengths fall back to 100.
pub fn axis(canvas: &mut Canvas<'_>, length: f32) {
    let length = if length > 0.0 { length } else { 100.0 };
    let stroke = Stroke::new(1.0, Color::black());

    canvas.line(Vec3::zero(), Vec3::new(length, 0.0, 0.0), stroke);
    canvas.line(Vec3::zero(), Vec3::new(0.0, length, 0.0), stroke);
    canvas.line(Vec3::zero(), Vec3::new(0.0, 0.0, length), stroke);
}

/// Which axis-aligned plane a [`square`] lies in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Face {
    /// z = 0
    Ground,
    /// x = 0
    Right,
    /// y = 0
    Left,
}

/// Corners of a `size`-sided square with one corner at the origin.
pub fn square(size: f32, face: Face) -> [Vec3; 4] {
    match face {
        Face::Ground => [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(size, 0.0, 0.0),
            Vec3::new(size, size, 0.0),
            Vec3::new(0.0, size, 0.0),
        ],
        Face::Right => [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, size, 0.0),
            Vec3::new(0.0, size, size),
            Vec3::new(0.0, 0.0, size),
        ],
        Face::Left => [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, size),
            Vec3::new(size, 0.0, size),
            Vec3::new(size, 0.0, 0.0),
        ],
    }
}
