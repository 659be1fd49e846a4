use tableau_engine::coords::{Vec2, Vec3};
use tableau_engine::paint::Color;
use tableau_engine::scene::{DrawList, Font, Stroke, TextCmd, ZIndex};

/// Drawing surface passed to [`DisplayNode::render`](crate::object::DisplayNode::render).
///
/// Wraps a layer's `DrawList`, projects world positions onto the drawing
/// plane (flat or isometric), and hands out increasing draw z values so the
/// recorded stream keeps traversal order.
pub struct Canvas<'a> {
    draw_list: &'a mut DrawList,
    isometric: bool,
    z: i32,
}

impl<'a> Canvas<'a> {
    /// Continues after whatever `draw_list` already holds.
    pub fn new(draw_list: &'a mut DrawList, isometric: bool) -> Self {
        let z = i32::try_from(draw_list.len()).unwrap_or(i32::MAX);
        Self { draw_list, isometric, z }
    }

    #[inline]
    pub fn is_isometric(&self) -> bool {
        self.isometric
    }

    #[inline]
    pub fn project(&self, p: Vec3) -> Vec2 {
        p.project(self.isometric)
    }

    /// Number of items recorded in the underlying list.
    #[inline]
    pub fn recorded(&self) -> usize {
        self.draw_list.len()
    }

    pub fn line(&mut self, from: Vec3, to: Vec3, stroke: Stroke) {
        let (from, to) = (self.project(from), self.project(to));
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, stroke);
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: Font,
        fill: Color,
        stroke: Option<Color>,
        at: Vec3,
    ) {
        let origin = self.project(at);
        let z = self.next_z();
        self.draw_list.push_text(z, TextCmd { text: text.into(), font, fill, stroke, origin });
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z = self.z.saturating_add(1);
        z
    }
}
