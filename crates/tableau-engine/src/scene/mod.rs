//! Draw stream types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands recorded by layers
//! - provide deterministic paint ordering (z-index + insertion order)
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`
//!
//! The stream is what a drawing backend consumes; no backend lives here.

mod cmd;
mod key;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use shapes::line::LineCmd;
pub use shapes::text::{Font, TextCmd};
pub use shapes::Stroke;
pub use z_index::ZIndex;
