use log::trace;

use tableau_engine::scene::DrawList;
use tableau_engine::time::FrameTime;

use crate::canvas::Canvas;
use crate::container::DisplayObjectContainer;
use crate::error::SceneResult;
use crate::object::DisplayNode;

/// A named layer: an independent paint and hit-test root.
///
/// Each stage owns a root container and the draw stream it records into.
/// [`render`](Self::render) rebuilds the stream from the tree; whatever is
/// drawn through [`draw`](Self::draw) afterwards lands on top until the next
/// render.
#[derive(Debug)]
pub struct Stage {
    root: DisplayObjectContainer,
    draw_list: DrawList,
    isometric: bool,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> SceneResult<Self> {
        Ok(Self {
            root: DisplayObjectContainer::new(name)?,
            draw_list: DrawList::new(),
            isometric: false,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.root.name()
    }

    #[inline]
    pub fn root(&self) -> &DisplayObjectContainer {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut DisplayObjectContainer {
        &mut self.root
    }

    #[inline]
    pub fn is_isometric(&self) -> bool {
        self.isometric
    }

    pub fn set_isometric(&mut self, isometric: bool) {
        self.isometric = isometric;
    }

    pub fn add_child<N: DisplayNode>(&mut self, child: N) -> SceneResult<&mut N> {
        self.root.add_child(child)
    }

    pub fn remove_child(&mut self, name: &str) -> Option<Box<dyn DisplayNode>> {
        self.root.remove_child(name)
    }

    /// Resolves a `/`-separated path of child names from the root.
    pub fn find(&self, path: &str) -> Option<&dyn DisplayNode> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let mut node = self.root.child(segments.next()?)?;
        for segment in segments {
            node = node.as_container()?.child(segment)?;
        }
        Some(node)
    }

    /// Re-records the draw stream from the tree. Returns the item count.
    pub fn render(&mut self) -> usize {
        self.draw_list.clear();
        if self.root.object().is_visible() {
            let mut canvas = Canvas::new(&mut self.draw_list, self.isometric);
            self.root.render(&mut canvas);
        }
        trace!("{}: rendered {} draw items", self.name(), self.draw_list.len());
        self.draw_list.len()
    }

    pub fn step(&mut self, time: &FrameTime) -> bool {
        self.root.step(time)
    }

    pub fn collect_shapes(&self) -> Vec<&dyn DisplayNode> {
        self.root.collect_shapes()
    }

    /// Canvas appending to this stage's current draw stream.
    pub fn draw(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.draw_list, self.isometric)
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    #[inline]
    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::DisplayObject;
    use crate::text::Text;
    use tableau_engine::coords::Vec3;
    use tableau_engine::scene::Stroke;

    fn populated() -> Stage {
        let mut stage = Stage::new("actors").unwrap();
        let mut squad = DisplayObjectContainer::new("squad").unwrap();
        squad.add_child(Text::new("label", "Squad A").unwrap()).unwrap();
        stage.add_child(squad).unwrap();
        stage.add_child(Text::new("title", "Hello").unwrap().with_z_index(4)).unwrap();
        stage
    }

    #[test]
    fn find_walks_paths() {
        let stage = populated();
        assert_eq!(stage.find("squad/label").unwrap().name(), "label");
        assert_eq!(stage.find("/title").unwrap().name(), "title");
        assert!(stage.find("title/label").is_none());
        assert!(stage.find("").is_none());
    }

    #[test]
    fn render_rebuilds_stream() {
        let mut stage = populated();
        assert_eq!(stage.render(), 2);
        assert_eq!(stage.render(), 2);
    }

    #[test]
    fn hidden_root_renders_nothing() {
        let mut stage = populated();
        stage.root_mut().object_mut().set_visible(false);
        assert_eq!(stage.render(), 0);
    }

    #[test]
    fn overlay_lands_after_scene() {
        let mut stage = populated();
        stage.render();
        stage.draw().line(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Stroke::default());

        let list = stage.draw_list_mut();
        let last = *list.indices_in_paint_order().last().unwrap();
        assert_eq!(last, 2);
    }

    #[test]
    fn stage_root_is_unattached() {
        let mut stage = Stage::new("bg").unwrap();
        stage.add_child(DisplayObject::new("floor").unwrap()).unwrap();
        assert!(!stage.root().object().is_attached());
        assert_eq!(
            stage.find("floor").unwrap().object().parent(),
            Some(stage.root().object().id())
        );
    }
}
