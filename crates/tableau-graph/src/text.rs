use tableau_engine::paint::Color;
use tableau_engine::scene::{Font, ZIndex};

use crate::canvas::Canvas;
use crate::error::SceneResult;
use crate::object::{DisplayNode, DisplayObject, RenderMethod};

/// A text label anchored at its object's position.
///
/// Defaults: Verdana 14px, black fill, no outline.
#[derive(Debug)]
pub struct Text {
    object: DisplayObject,
    text: String,
    font: Font,
    fill: Color,
    stroke: Option<Color>,
}

impl Text {
    pub const DEFAULT_FAMILY: &'static str = "Verdana";
    pub const DEFAULT_SIZE: f32 = 14.0;

    pub fn new(name: impl Into<String>, text: impl Into<String>) -> SceneResult<Self> {
        Ok(Self::from_object(DisplayObject::new(name)?, text))
    }

    /// Wraps an already configured object and tags it as text.
    pub fn from_object(object: DisplayObject, text: impl Into<String>) -> Self {
        Self {
            object: object.with_render_method(RenderMethod::Text),
            text: text.into(),
            font: Font::new(Self::DEFAULT_FAMILY, Self::DEFAULT_SIZE),
            fill: Color::from_hex(0x0),
            stroke: None,
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_z_index(mut self, z: impl Into<ZIndex>) -> Self {
        self.object.set_z_index(z);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[inline]
    pub fn current_font(&self) -> &Font {
        &self.font
    }
}

impl DisplayNode for Text {
    fn object(&self) -> &DisplayObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut DisplayObject {
        &mut self.object
    }

    fn render(&self, canvas: &mut Canvas<'_>) {
        if self.text.is_empty() {
            return;
        }
        canvas.text(
            self.text.clone(),
            self.font.clone(),
            self.fill,
            self.stroke,
            self.object.position(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableau_engine::coords::{Vec2, Vec3};
    use tableau_engine::scene::{DrawCmd, DrawList};

    #[test]
    fn defaults_match_label_style() {
        let t = Text::new("label", "hello").unwrap();
        assert_eq!(t.object().render_method(), RenderMethod::Text);
        assert_eq!(t.current_font(), &Font::new("Verdana", 14.0));
        assert_eq!(t.fill, Color::black());
        assert!(t.stroke.is_none());
    }

    #[test]
    fn renders_text_at_projected_position() {
        let mut t = Text::new("label", "hi").unwrap().stroke(Color::white());
        t.object_mut().set_position(Vec3::new(4.0, 2.0, 1.0));

        let mut list = DrawList::new();
        t.render(&mut Canvas::new(&mut list, true));

        match &list.items()[0].cmd {
            DrawCmd::Text(cmd) => {
                assert_eq!(cmd.text, "hi");
                assert_eq!(cmd.origin, Vec2::new(2.0, 2.0));
                assert_eq!(cmd.stroke, Some(Color::white()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_text_draws_nothing() {
        let t = Text::new("blank", "").unwrap();
        let mut list = DrawList::new();
        t.render(&mut Canvas::new(&mut list, false));
        assert!(list.is_empty());
    }
}
