use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tableau_engine::coords::{Polygon, Vec3};
use tableau_engine::scene::ZIndex;
use tableau_engine::time::FrameTime;

use crate::canvas::Canvas;
use crate::container::DisplayObjectContainer;
use crate::error::{SceneError, SceneResult};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

// ── ObjectId ──────────────────────────────────────────────────────────────

/// Process-unique identity of a display object.
///
/// Children refer to their parent through this id rather than a pointer, so
/// the back-reference never keeps anything alive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ── RenderMethod ──────────────────────────────────────────────────────────

/// Tag telling a drawing backend how an object draws itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum RenderMethod {
    #[default]
    Generic,
    Text,
}

impl RenderMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMethod::Generic => "generic",
            RenderMethod::Text => "text",
        }
    }
}

// ── Attachment ────────────────────────────────────────────────────────────

/// Where a live object sits: its parent and its rank among the parent's
/// children in ascending z order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Attachment {
    pub parent: ObjectId,
    pub index: usize,
}

// ── Step hooks ────────────────────────────────────────────────────────────

/// Mutable view handed to a per-frame step hook.
pub struct StepCtx<'a> {
    pub name: &'a str,
    pub time: &'a FrameTime,
    pub position: &'a mut Vec3,
    pub z_index: &'a mut ZIndex,
    pub visible: &'a mut bool,
}

/// Per-frame update attached to a display object.
pub type StepHook = Box<dyn FnMut(StepCtx<'_>)>;

// ── DisplayObject ─────────────────────────────────────────────────────────

/// State shared by every node in the scene graph.
///
/// A display object is created standalone and becomes live once a container
/// attaches it (records its parent and traversal index). It is also a usable
/// leaf node on its own: it draws nothing but can carry a hit-test shape.
pub struct DisplayObject {
    id: ObjectId,
    name: String,
    position: Vec3,
    z_index: ZIndex,
    visible: bool,
    shape: Option<Polygon>,
    render_method: RenderMethod,
    attachment: Option<Attachment>,
    steps: u64,
    on_step: Option<StepHook>,
}

impl DisplayObject {
    /// Creates a detached object. `name` must be non-empty.
    pub fn new(name: impl Into<String>) -> SceneResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SceneError::invalid_argument("display object requires a non-empty name"));
        }
        Ok(Self {
            id: ObjectId::next(),
            name,
            position: Vec3::zero(),
            z_index: ZIndex::default(),
            visible: true,
            shape: None,
            render_method: RenderMethod::Generic,
            attachment: None,
            steps: 0,
            on_step: None,
        })
    }

    pub fn with_position(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_z_index(mut self, z: impl Into<ZIndex>) -> Self {
        self.z_index = z.into();
        self
    }

    pub fn with_shape(mut self, shape: impl Into<Polygon>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn with_render_method(mut self, method: RenderMethod) -> Self {
        self.render_method = method;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Installs a hook run on every [`step`](Self::step).
    pub fn on_step(mut self, hook: impl FnMut(StepCtx<'_>) + 'static) -> Self {
        self.on_step = Some(Box::new(hook));
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: impl Into<Vec3>) {
        self.position = position.into();
    }

    #[inline]
    pub fn z_index(&self) -> ZIndex {
        self.z_index
    }

    /// Takes effect on the next traversal. The stored traversal index is only
    /// recomputed by the parent's next structural change.
    pub fn set_z_index(&mut self, z: impl Into<ZIndex>) {
        self.z_index = z.into();
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn shape(&self) -> Option<&Polygon> {
        self.shape.as_ref()
    }

    pub fn set_shape(&mut self, shape: Option<Polygon>) {
        self.shape = shape;
    }

    #[inline]
    pub fn render_method(&self) -> RenderMethod {
        self.render_method
    }

    /// Number of completed steps.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // ── attachment ────────────────────────────────────────────────────────

    #[inline]
    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.attachment.map(|a| a.parent)
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.attachment.map(|a| a.index)
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Records `parent` and the assigned traversal index.
    ///
    /// Containers call this while inserting; nothing here checks for cycles.
    pub fn attach_to(&mut self, parent: ObjectId, index: usize) {
        self.attachment = Some(Attachment { parent, index });
    }

    /// Clears the parent reference.
    pub fn detach(&mut self) {
        self.attachment = None;
    }

    pub(crate) fn reindex(&mut self, index: usize) {
        if let Some(a) = self.attachment.as_mut() {
            a.index = index;
        }
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Per-frame bookkeeping plus the optional hook. Always succeeds.
    pub fn step(&mut self, time: &FrameTime) -> bool {
        self.steps += 1;
        if let Some(hook) = self.on_step.as_mut() {
            hook(StepCtx {
                name: &self.name,
                time,
                position: &mut self.position,
                z_index: &mut self.z_index,
                visible: &mut self.visible,
            });
        }
        true
    }
}

impl fmt::Debug for DisplayObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("z_index", &self.z_index)
            .field("visible", &self.visible)
            .field("shape", &self.shape)
            .field("render_method", &self.render_method)
            .field("attachment", &self.attachment)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

// ── DisplayNode trait ─────────────────────────────────────────────────────

/// Upcast helper so boxed nodes can be downcast to their concrete kind.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The interface every scene graph node implements.
///
/// # Implementing a custom drawable
///
/// ```rust,ignore
/// use tableau_graph::prelude::*;
///
/// struct Marker { object: DisplayObject }
///
/// impl DisplayNode for Marker {
///     fn object(&self) -> &DisplayObject { &self.object }
///     fn object_mut(&mut self) -> &mut DisplayObject { &mut self.object }
///
///     fn render(&self, canvas: &mut Canvas<'_>) {
///         let p = self.object.position();
///         canvas.line(p, Vec3::new(p.x + 4.0, p.y, p.z), Stroke::default());
///     }
/// }
/// ```
pub trait DisplayNode: AsAny + 'static {
    fn object(&self) -> &DisplayObject;

    fn object_mut(&mut self) -> &mut DisplayObject;

    /// Draws this node. Leaves draw nothing by default; containers draw
    /// their children.
    fn render(&self, canvas: &mut Canvas<'_>) {
        let _ = canvas;
    }

    /// Per-frame update. Containers step their children before themselves.
    fn step(&mut self, time: &FrameTime) -> bool {
        self.object_mut().step(time)
    }

    /// Child-collection capability. `Some` only for containers.
    fn as_container(&self) -> Option<&DisplayObjectContainer> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut DisplayObjectContainer> {
        None
    }

    fn name(&self) -> &str {
        self.object().name()
    }

    fn z_index(&self) -> ZIndex {
        self.object().z_index()
    }

    fn shape(&self) -> Option<&Polygon> {
        self.object().shape()
    }
}

impl DisplayNode for DisplayObject {
    fn object(&self) -> &DisplayObject {
        self
    }

    fn object_mut(&mut self) -> &mut DisplayObject {
        self
    }
}

/// Downcasts a node to its concrete kind.
pub fn downcast_ref<T: DisplayNode>(node: &dyn DisplayNode) -> Option<&T> {
    AsAny::as_any(node).downcast_ref::<T>()
}

/// Mutable counterpart of [`downcast_ref`].
pub fn downcast_mut<T: DisplayNode>(node: &mut dyn DisplayNode) -> Option<&mut T> {
    AsAny::as_any_mut(node).downcast_mut::<T>()
}
