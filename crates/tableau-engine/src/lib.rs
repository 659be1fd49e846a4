//! Tableau engine crate.
//!
//! This crate owns the low-level pieces the scene graph is built on: world
//! geometry, paint, the renderer-agnostic draw stream, logging and frame timing.
//! It knows nothing about display objects or layers.

pub mod time;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
