//! Tableau graph — layered scene graph on top of `tableau-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tableau_graph::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.set_surface_offset((100.0, 100.0));
//!
//! let actors = engine.add_layer("actors")?;
//! actors.add_child(
//!     DisplayObject::new("crate")?
//!         .with_z_index(2)
//!         .with_shape(Polygon::rect(Rect::new(-10.0, -10.0, 20.0, 20.0))),
//! )?;
//!
//! // In your frame callback:
//! engine.frame(&clock.tick());
//! for node in engine.hit_test(mouse_pos) {
//!     println!("under cursor: {}", node.name());
//! }
//! ```
//!
//! # Custom nodes
//!
//! Implement [`DisplayNode`] for any type that wraps a [`DisplayObject`]:
//!
//! ```rust,ignore
//! use tableau_graph::prelude::*;
//!
//! pub struct Marker { object: DisplayObject }
//!
//! impl DisplayNode for Marker {
//!     fn object(&self) -> &DisplayObject { &self.object }
//!     fn object_mut(&mut self) -> &mut DisplayObject { &mut self.object }
//!     fn render(&self, canvas: &mut Canvas<'_>) {
//!         let at = self.object.position();
//!         canvas.line(at, Vec3::new(at.x, at.y, at.z + 10.0), Stroke::default());
//!     }
//! }
//! ```

pub mod canvas;
pub mod container;
pub mod document;
pub mod draw;
pub mod engine;
pub mod error;
pub mod object;
pub mod registry;
pub mod stage;
pub mod text;

pub use engine::{Engine, EngineConfig};
pub use error::{SceneError, SceneResult};

/// Everything needed to build scenes and custom nodes.
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::container::DisplayObjectContainer;
    pub use crate::document::{LayerSpec, NodeSpec, SceneDocument};
    pub use crate::draw::{self, Face, GridOptions};
    pub use crate::engine::{Engine, EngineConfig};
    pub use crate::error::{SceneError, SceneResult};
    pub use crate::object::{
        downcast_mut, downcast_ref, DisplayNode, DisplayObject, ObjectId, RenderMethod, StepCtx,
    };
    pub use crate::registry::{NodeFactory, PackageRegistry};
    pub use crate::stage::Stage;
    pub use crate::text::Text;

    pub use tableau_engine::coords::{Polygon, Rect, Vec2, Vec3, Viewport};
    pub use tableau_engine::paint::Color;
    pub use tableau_engine::scene::{Font, Stroke, ZIndex};
    pub use tableau_engine::time::{FrameClock, FrameTime};
}
