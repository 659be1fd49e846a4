pub(crate) mod line;
pub(crate) mod text;

use crate::paint::Color;

/// Stroke style for line work.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

impl Default for Stroke {
    /// One pixel, opaque black.
    fn default() -> Self {
        Self::new(1.0, Color::black())
    }
}
