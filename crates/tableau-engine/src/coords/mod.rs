//! Coordinate and geometry types shared by the draw stream and the scene graph.
//!
//! World space:
//! - logical pixels
//! - origin at the centre of the drawing surface
//! - +X right, +Y down, +Z up (isometric projection only)
//!
//! Screen space is the host's pixel space with a top-left origin.
//! [`screen_to_world`] and [`world_to_screen`] convert between the two.

mod polygon;
mod rect;
mod transform;
mod vec2;
mod vec3;
mod viewport;

pub use polygon::{point_in_polygon, Polygon};
pub use rect::Rect;
pub use transform::{screen_to_world, world_to_screen};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use viewport::Viewport;
