use log::debug;

use tableau_engine::scene::ZIndex;
use tableau_engine::time::FrameTime;

use crate::canvas::Canvas;
use crate::error::{SceneError, SceneResult};
use crate::object::{downcast_mut, downcast_ref, DisplayNode, DisplayObject, ObjectId};

/// A display object that owns named children.
///
/// Children are kept in ascending z order as of the last structural change,
/// each holding its rank as its stored traversal index. Traversals (render,
/// step, shape collection) re-sort by the current z-index, so z changes made
/// between structural changes still paint correctly. Equal z-index keeps the
/// prior relative order.
///
/// # Example
/// ```rust,ignore
/// let mut squad = DisplayObjectContainer::new("squad")?;
/// squad.add_child(DisplayObject::new("scout")?.with_z_index(5))?;
/// squad.add_child(Text::new("label", "Squad A")?.with_z_index(9))?;
/// ```
pub struct DisplayObjectContainer {
    object: DisplayObject,
    children: Vec<Box<dyn DisplayNode>>,
}

impl DisplayObjectContainer {
    pub fn new(name: impl Into<String>) -> SceneResult<Self> {
        Ok(Self::from_object(DisplayObject::new(name)?))
    }

    /// Wraps an already configured object.
    pub fn from_object(object: DisplayObject) -> Self {
        Self { object, children: Vec::new() }
    }

    pub fn with_z_index(mut self, z: impl Into<ZIndex>) -> Self {
        self.object.set_z_index(z);
        self
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    pub fn child(&self, name: &str) -> Option<&dyn DisplayNode> {
        self.position_of(name).map(|i| self.children[i].as_ref())
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut dyn DisplayNode> {
        let i = self.position_of(name)?;
        let child: &mut dyn DisplayNode = self.children[i].as_mut();
        Some(child)
    }

    /// Looks up a child and downcasts it to `T`.
    pub fn child_as<T: DisplayNode>(&self, name: &str) -> Option<&T> {
        self.child(name).and_then(downcast_ref::<T>)
    }

    pub fn child_as_mut<T: DisplayNode>(&mut self, name: &str) -> Option<&mut T> {
        self.child_mut(name).and_then(downcast_mut::<T>)
    }

    /// Children in traversal order (ascending current z-index).
    pub fn children(&self) -> impl Iterator<Item = &dyn DisplayNode> + '_ {
        self.traversal_order().into_iter().map(move |i| self.children[i].as_ref())
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Appends `child` and returns it, now attached.
    ///
    /// Fails with [`SceneError::NameCollision`] if a child with the same name
    /// is already present; the container is left untouched.
    pub fn add_child<N: DisplayNode>(&mut self, child: N) -> SceneResult<&mut N> {
        self.add_typed(child, None)
    }

    /// Like [`add_child`](Self::add_child) but inserts at `index` among the
    /// current children before re-sorting, which decides its place among
    /// children of equal z-index.
    pub fn add_child_at<N: DisplayNode>(&mut self, child: N, index: usize) -> SceneResult<&mut N> {
        self.add_typed(child, Some(index))
    }

    /// Type-erased insertion used by registries and scene documents.
    pub fn add_boxed(
        &mut self,
        mut child: Box<dyn DisplayNode>,
        index: Option<usize>,
    ) -> SceneResult<&mut dyn DisplayNode> {
        if self.contains(child.name()) {
            return Err(SceneError::name_collision(child.name(), self.object.name()));
        }

        let name = child.name().to_owned();
        let index = index.unwrap_or(self.children.len()).min(self.children.len());

        child.object_mut().attach_to(self.object.id(), index);
        self.children.insert(index, child);
        self.reorder_children();

        debug!("{}: added child \"{}\" ({} children)", self.object.name(), name, self.children.len());

        let i = self
            .position_of(&name)
            .ok_or_else(|| SceneError::invalid_argument(format!("child \"{name}\" lost during insertion")))?;
        Ok(self.children[i].as_mut())
    }

    /// Detaches and returns the named child.
    ///
    /// Unknown names are a no-op returning `None`.
    pub fn remove_child(&mut self, name: &str) -> Option<Box<dyn DisplayNode>> {
        let i = self.position_of(name)?;
        self.remove_at(i)
    }

    /// Detaches and returns the child with this identity, if it is attached here.
    pub fn remove_by_id(&mut self, id: ObjectId) -> Option<Box<dyn DisplayNode>> {
        let i = self.children.iter().position(|c| c.object().id() == id)?;
        self.remove_at(i)
    }

    /// Every descendant carrying a hit-test shape, depth-first in traversal
    /// order. A shaped container precedes its own descendants.
    pub fn collect_shapes(&self) -> Vec<&dyn DisplayNode> {
        let mut out = Vec::new();
        self.collect_shapes_into(&mut out);
        out
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn add_typed<N: DisplayNode>(&mut self, child: N, index: Option<usize>) -> SceneResult<&mut N> {
        let node = self.add_boxed(Box::new(child), index)?;
        let name = node.name().to_owned();
        downcast_mut::<N>(node)
            .ok_or_else(|| SceneError::invalid_argument(format!("child \"{name}\" changed kind")))
    }

    fn remove_at(&mut self, i: usize) -> Option<Box<dyn DisplayNode>> {
        if self.children[i].object().parent() != Some(self.object.id()) {
            return None;
        }

        let mut child = self.children.remove(i);
        child.object_mut().detach();
        self.reorder_children();

        debug!("{}: removed child \"{}\"", self.object.name(), child.name());
        Some(child)
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == name)
    }

    /// Stable sort by z, then store each child's rank.
    fn reorder_children(&mut self) {
        self.children.sort_by_key(|c| c.z_index());
        for (i, child) in self.children.iter_mut().enumerate() {
            child.object_mut().reindex(i);
        }
    }

    fn traversal_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.children.len()).collect();
        order.sort_by_key(|&i| self.children[i].z_index());
        order
    }

    fn collect_shapes_into<'a>(&'a self, out: &mut Vec<&'a dyn DisplayNode>) {
        for i in self.traversal_order() {
            let child = self.children[i].as_ref();
            if child.shape().is_some() {
                out.push(child);
            }
            if let Some(container) = child.as_container() {
                container.collect_shapes_into(out);
            }
        }
    }
}

impl DisplayNode for DisplayObjectContainer {
    fn object(&self) -> &DisplayObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut DisplayObject {
        &mut self.object
    }

    /// Renders visible children in ascending z order. Containers have no
    /// visual of their own.
    fn render(&self, canvas: &mut Canvas<'_>) {
        for i in self.traversal_order() {
            let child = &self.children[i];
            if child.object().is_visible() {
                child.render(canvas);
            }
        }
    }

    /// Steps every child in ascending z order, then this container.
    fn step(&mut self, time: &FrameTime) -> bool {
        for i in self.traversal_order() {
            self.children[i].step(time);
        }
        self.object.step(time)
    }

    fn as_container(&self) -> Option<&DisplayObjectContainer> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut DisplayObjectContainer> {
        Some(self)
    }
}

impl std::fmt::Debug for DisplayObjectContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayObjectContainer")
            .field("object", &self.object)
            .field("children", &self.children().map(|c| c.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tableau_engine::coords::{Polygon, Rect, Vec3};
    use tableau_engine::scene::{DrawList, Stroke};
    use tableau_engine::time::FrameClock;

    use super::*;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Leaf that records render/step calls.
    struct Probe {
        object: DisplayObject,
        log: Log,
    }

    impl Probe {
        fn new(name: &str, z: i32, log: &Log) -> Self {
            Self { object: DisplayObject::new(name).unwrap().with_z_index(z), log: log.clone() }
        }
    }

    impl DisplayNode for Probe {
        fn object(&self) -> &DisplayObject {
            &self.object
        }

        fn object_mut(&mut self) -> &mut DisplayObject {
            &mut self.object
        }

        fn render(&self, canvas: &mut Canvas<'_>) {
            self.log.borrow_mut().push(format!("render {}", self.object.name()));
            canvas.line(Vec3::zero(), Vec3::zero(), Stroke::default());
        }

        fn step(&mut self, time: &FrameTime) -> bool {
            self.log.borrow_mut().push(format!("step {}", self.object.name()));
            self.object.step(time)
        }
    }

    fn obj(name: &str, z: i32) -> DisplayObject {
        DisplayObject::new(name).unwrap().with_z_index(z)
    }

    fn shaped(name: &str, z: i32) -> DisplayObject {
        obj(name, z).with_shape(Polygon::rect(Rect::new(0.0, 0.0, 1.0, 1.0)))
    }

    fn names(c: &DisplayObjectContainer) -> Vec<String> {
        c.children().map(|n| n.name().to_owned()).collect()
    }

    fn assert_indices_match_rank(c: &DisplayObjectContainer) {
        let mut by_z: Vec<(ZIndex, usize)> =
            c.children.iter().map(|n| (n.z_index(), n.object().index().unwrap())).collect();
        let sorted = {
            let mut s = by_z.clone();
            s.sort_by_key(|&(z, _)| z);
            s
        };
        assert_eq!(by_z, sorted, "children not in ascending z order");
        for (rank, (_, index)) in by_z.drain(..).enumerate() {
            assert_eq!(index, rank);
        }
    }

    // ── add_child ─────────────────────────────────────────────────────────

    #[test]
    fn traversal_order_follows_z_regardless_of_insertion() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("high", 5)).unwrap();
        c.add_child(obj("low", 1)).unwrap();
        assert_eq!(names(&c), ["low", "high"]);

        let mut d = DisplayObjectContainer::new("root").unwrap();
        d.add_child(obj("low", 1)).unwrap();
        d.add_child(obj("high", 5)).unwrap();
        assert_eq!(names(&d), ["low", "high"]);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        for name in ["a", "b", "c"] {
            c.add_child(obj(name, 0)).unwrap();
        }
        assert_eq!(names(&c), ["a", "b", "c"]);
    }

    #[test]
    fn explicit_index_breaks_ties() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("a", 0)).unwrap();
        c.add_child(obj("b", 0)).unwrap();
        c.add_child_at(obj("first", 0), 0).unwrap();
        assert_eq!(names(&c), ["first", "a", "b"]);
        assert_eq!(c.child("first").unwrap().object().index(), Some(0));
    }

    #[test]
    fn explicit_index_does_not_override_z() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("a", 0)).unwrap();
        c.add_child_at(obj("top", 9), 0).unwrap();
        assert_eq!(names(&c), ["a", "top"]);
    }

    #[test]
    fn add_child_attaches_and_returns_typed_child() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        let root_id = c.object().id();
        let child = c.add_child(obj("leaf", 2)).unwrap();
        child.set_visible(false);

        assert_eq!(child.parent(), Some(root_id));
        assert!(!c.child("leaf").unwrap().object().is_visible());
    }

    #[test]
    fn duplicate_name_fails_without_mutation() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("dup", 3)).unwrap();
        c.add_child(obj("other", 1)).unwrap();

        let err = c.add_child(obj("dup", 0)).unwrap_err();
        assert_eq!(err, SceneError::name_collision("dup", "root"));
        assert_eq!(c.len(), 2);
        assert_eq!(names(&c), ["other", "dup"]);
        assert_eq!(c.child("dup").unwrap().z_index(), ZIndex(3));
        assert_indices_match_rank(&c);
    }

    // ── remove_child ──────────────────────────────────────────────────────

    #[test]
    fn remove_unknown_name_is_noop() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("a", 0)).unwrap();
        assert!(c.remove_child("ghost").is_none());
        assert_eq!(names(&c), ["a"]);
    }

    #[test]
    fn remove_detaches_and_reindexes() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("a", 0)).unwrap();
        c.add_child(obj("b", 1)).unwrap();
        c.add_child(obj("c", 2)).unwrap();

        let removed = c.remove_child("a").unwrap();
        assert!(!removed.object().is_attached());
        assert_eq!(c.child("b").unwrap().object().index(), Some(0));
        assert_eq!(c.child("c").unwrap().object().index(), Some(1));
    }

    #[test]
    fn removed_child_can_be_added_elsewhere() {
        let mut a = DisplayObjectContainer::new("a").unwrap();
        let mut b = DisplayObjectContainer::new("b").unwrap();
        a.add_child(obj("nomad", 0)).unwrap();

        let nomad = a.remove_child("nomad").unwrap();
        b.add_boxed(nomad, None).unwrap();

        assert!(a.is_empty());
        assert_eq!(b.child("nomad").unwrap().object().parent(), Some(b.object().id()));
    }

    #[test]
    fn foreign_child_is_not_removed() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("a", 0)).unwrap();
        // Re-point the child at another parent behind the container's back.
        let other = DisplayObject::new("elsewhere").unwrap();
        c.child_mut("a").unwrap().object_mut().attach_to(other.id(), 0);

        assert!(c.remove_child("a").is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn remove_by_id() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        let id = c.add_child(obj("a", 0)).unwrap().id();
        assert!(c.remove_by_id(id).is_some());
        assert!(c.is_empty());
    }

    #[test]
    fn indices_track_rank_after_mixed_mutations() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        let zs = [4, -2, 7, 0, 4, 9, -5, 3];
        for (i, z) in zs.iter().enumerate() {
            c.add_child(obj(&format!("n{i}"), *z)).unwrap();
            assert_indices_match_rank(&c);
        }
        for name in ["n2", "n6", "missing", "n0"] {
            c.remove_child(name);
            assert_indices_match_rank(&c);
        }
        c.add_child_at(obj("late", 4), 1).unwrap();
        assert_indices_match_rank(&c);
        assert_eq!(c.len(), 6);
    }

    // ── traversal ─────────────────────────────────────────────────────────

    #[test]
    fn render_skips_hidden_children() {
        let log = Log::default();
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(Probe::new("shown", 0, &log)).unwrap();
        c.add_child(Probe::new("hidden", 1, &log)).unwrap().object_mut().set_visible(false);

        let mut list = DrawList::new();
        c.render(&mut Canvas::new(&mut list, false));

        assert_eq!(*log.borrow(), ["render shown"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn three_level_tree_visits_each_leaf_once() {
        let log = Log::default();
        let mut root = DisplayObjectContainer::new("root").unwrap();
        let mut mid = DisplayObjectContainer::new("mid").unwrap().with_z_index(1);
        let mut inner = DisplayObjectContainer::new("inner").unwrap().with_z_index(0);

        inner.add_child(Probe::new("deep", 0, &log)).unwrap();
        mid.add_child(inner).unwrap();
        mid.add_child(Probe::new("middle", 2, &log)).unwrap();
        root.add_child(mid).unwrap();
        root.add_child(Probe::new("top", 0, &log)).unwrap();

        let mut list = DrawList::new();
        root.render(&mut Canvas::new(&mut list, false));
        assert_eq!(*log.borrow(), ["render top", "render deep", "render middle"]);

        log.borrow_mut().clear();
        let time = FrameClock::new().tick();
        assert!(root.step(&time));
        assert_eq!(*log.borrow(), ["step top", "step deep", "step middle"]);
    }

    #[test]
    fn container_step_runs_after_descendants() {
        let log = Log::default();
        let container_log = log.clone();
        let mut root = DisplayObjectContainer::from_object(
            DisplayObject::new("root")
                .unwrap()
                .on_step(move |ctx| container_log.borrow_mut().push(format!("step {}", ctx.name))),
        );
        let mut inner = DisplayObjectContainer::new("inner").unwrap();
        inner.add_child(Probe::new("leaf", 0, &log)).unwrap();
        root.add_child(inner).unwrap();
        root.add_child(Probe::new("sibling", 3, &log)).unwrap();

        root.step(&FrameClock::new().tick());

        assert_eq!(*log.borrow(), ["step leaf", "step sibling", "step root"]);
        assert_eq!(root.object().steps(), 1);
        assert_eq!(root.child("inner").unwrap().object().steps(), 1);
    }

    #[test]
    fn z_change_between_mutations_reorders_traversal() {
        let mut c = DisplayObjectContainer::new("root").unwrap();
        c.add_child(obj("a", 0)).unwrap();
        c.add_child(obj("b", 1)).unwrap();

        c.child_mut("a").unwrap().object_mut().set_z_index(5);
        assert_eq!(names(&c), ["b", "a"]);
    }

    // ── collect_shapes ────────────────────────────────────────────────────

    #[test]
    fn collect_shapes_flattens_nested_containers() {
        let mut root = DisplayObjectContainer::new("root").unwrap();
        let mut group = DisplayObjectContainer::from_object(shaped("group", 1));
        group.add_child(shaped("inner_b", 2)).unwrap();
        group.add_child(obj("no_shape", 0)).unwrap();
        group.add_child(shaped("inner_a", 1)).unwrap();
        root.add_child(group).unwrap();
        root.add_child(shaped("front", 3)).unwrap();
        root.add_child(shaped("back", 0)).unwrap();

        let shapes: Vec<&str> = root.collect_shapes().into_iter().map(|n| n.name()).collect();
        assert_eq!(shapes, ["back", "group", "inner_a", "inner_b", "front"]);
    }

    #[test]
    fn collect_shapes_includes_hidden_objects() {
        let mut root = DisplayObjectContainer::new("root").unwrap();
        root.add_child(shaped("ghost", 0).hidden()).unwrap();
        assert_eq!(root.collect_shapes().len(), 1);
    }
}
