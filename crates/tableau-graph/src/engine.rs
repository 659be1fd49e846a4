use std::cmp::Reverse;
use std::fmt;

use log::{debug, info, trace};
use serde::Deserialize;

use tableau_engine::coords::{self, Vec2, Viewport};
use tableau_engine::time::{FpsMeter, FrameTime};

use crate::document::{NodeSpec, SceneDocument};
use crate::error::{SceneError, SceneResult};
use crate::object::DisplayNode;
use crate::registry::PackageRegistry;
use crate::stage::Stage;

/// World sizing. Missing fields fall back to the 400×400 default.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub world_width: f32,
    pub world_height: f32,
}

impl EngineConfig {
    pub const DEFAULT_SIZE: f32 = 400.0;

    pub fn world_size(&self) -> Viewport {
        Viewport::new(self.world_width, self.world_height)
    }

    pub fn validate(&self) -> SceneResult<()> {
        if self.world_size().is_valid() {
            Ok(())
        } else {
            Err(SceneError::invalid_argument(format!(
                "world size must be positive and finite, got {}x{}",
                self.world_width, self.world_height
            )))
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { world_width: Self::DEFAULT_SIZE, world_height: Self::DEFAULT_SIZE }
    }
}

type FpsCallback = Box<dyn FnMut(f32)>;

/// Owns the layers, maps screen coordinates into the world, and drives frames.
///
/// Layers paint in insertion order. Each one is an independent [`Stage`]
/// with its own draw stream.
pub struct Engine {
    config: EngineConfig,
    registry: PackageRegistry,
    layers: Vec<Stage>,
    surface_offset: Vec2,
    fps: FpsMeter,
    on_fps: Option<FpsCallback>,
}

impl Engine {
    /// Default world size and the builtin node kinds.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            registry: PackageRegistry::builtin(),
            layers: Vec::new(),
            surface_offset: Vec2::zero(),
            fps: FpsMeter::new(),
            on_fps: None,
        }
    }

    pub fn with_config(config: EngineConfig, registry: PackageRegistry) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self { config, registry, ..Self::new() })
    }

    // ── world ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn world_size(&self) -> Viewport {
        self.config.world_size()
    }

    /// Top-left corner of the drawing surface in screen coordinates.
    pub fn set_surface_offset(&mut self, offset: impl Into<Vec2>) {
        self.surface_offset = offset.into();
    }

    pub fn surface_offset(&self) -> Vec2 {
        self.surface_offset
    }

    pub fn screen_to_world(&self, screen: impl Into<Vec2>) -> Vec2 {
        coords::screen_to_world(screen.into(), self.surface_offset, self.world_size())
    }

    pub fn world_to_screen(&self, world: impl Into<Vec2>) -> Vec2 {
        coords::world_to_screen(world.into(), self.surface_offset, self.world_size())
    }

    // ── layers ────────────────────────────────────────────────────────────

    /// Appends an empty layer on top of the existing ones.
    pub fn add_layer(&mut self, name: impl Into<String>) -> SceneResult<&mut Stage> {
        let stage = Stage::new(name)?;
        if self.layer(stage.name()).is_some() {
            return Err(SceneError::name_collision(stage.name(), "engine"));
        }

        debug!("engine: added layer \"{}\"", stage.name());
        self.layers.push(stage);
        let last = self.layers.len() - 1;
        Ok(&mut self.layers[last])
    }

    /// Returns whether the layer existed.
    pub fn remove_layer(&mut self, name: &str) -> bool {
        let Some(i) = self.layers.iter().position(|l| l.name() == name) else {
            return false;
        };
        self.layers.remove(i);
        debug!("engine: removed layer \"{name}\"");
        true
    }

    pub fn layer(&self, name: &str) -> Option<&Stage> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Stage> {
        self.layers.iter_mut().find(|l| l.name() == name)
    }

    /// Layers in paint order.
    pub fn layers(&self) -> impl Iterator<Item = &Stage> {
        self.layers.iter()
    }

    pub fn layers_mut(&mut self) -> impl Iterator<Item = &mut Stage> {
        self.layers.iter_mut()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    // ── hit-testing ───────────────────────────────────────────────────────

    /// Objects whose shape contains the screen point, topmost first.
    ///
    /// Equal z-indices keep collection order: layers in paint order, then
    /// depth-first traversal order within a layer.
    pub fn hit_test(&self, screen: impl Into<Vec2>) -> Vec<&dyn DisplayNode> {
        let point = self.screen_to_world(screen);

        let mut hits: Vec<&dyn DisplayNode> = self
            .layers
            .iter()
            .flat_map(|layer| layer.collect_shapes())
            .filter(|node| node.shape().is_some_and(|shape| shape.contains(point)))
            .collect();
        hits.sort_by_key(|node| Reverse(node.z_index()));
        hits
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Steps every layer. Returns `false` if any step reported failure.
    pub fn step(&mut self, time: &FrameTime) -> bool {
        let mut ok = true;
        for layer in &mut self.layers {
            ok &= layer.step(time);
        }
        ok
    }

    /// Repaints every layer's draw stream. Returns the total command count.
    pub fn render_all(&mut self) -> usize {
        self.layers.iter_mut().map(Stage::render).sum()
    }

    /// One full frame: step, render, then an FPS sample when reporting is on.
    pub fn frame(&mut self, time: &FrameTime) -> usize {
        self.step(time);
        let count = self.render_all();
        trace!("engine: frame {} painted {count} commands", time.frame_index);
        self.sample_fps(time);
        count
    }

    /// Reports frames-per-second through `report` once per second.
    ///
    /// Sampling starts on the next [`frame`](Self::frame).
    pub fn show_fps(&mut self, report: impl FnMut(f32) + 'static) {
        self.fps.stop();
        self.on_fps = Some(Box::new(report));
    }

    /// Stops FPS reporting. Does nothing if it is already off.
    pub fn hide_fps(&mut self) {
        self.fps.stop();
        self.on_fps = None;
    }

    pub fn is_showing_fps(&self) -> bool {
        self.on_fps.is_some()
    }

    fn sample_fps(&mut self, time: &FrameTime) {
        let Some(report) = self.on_fps.as_mut() else {
            return;
        };
        if !self.fps.is_running() {
            self.fps.start(time.now);
            return;
        }
        if let Some(fps) = self.fps.tick(time.now) {
            info!("fps: {fps:.1}");
            report(fps);
        }
    }

    // ── construction from descriptions ────────────────────────────────────

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PackageRegistry {
        &mut self.registry
    }

    /// Builds a detached node (and its subtree) through the registry.
    pub fn create(&self, spec: &NodeSpec) -> SceneResult<Box<dyn DisplayNode>> {
        self.registry.build(spec)
    }

    /// Adds the document's layers and applies its world size.
    ///
    /// Everything is built before anything is applied, so on error the
    /// engine is left unchanged. Returns the number of layers added.
    pub fn load_document(&mut self, document: &SceneDocument) -> SceneResult<usize> {
        let config = match document.world {
            Some(config) => {
                config.validate()?;
                config
            }
            None => self.config,
        };

        let mut staged: Vec<Stage> = Vec::with_capacity(document.layers.len());
        for spec in &document.layers {
            let mut stage = Stage::new(spec.name.as_str())?;
            if self.layer(stage.name()).is_some() || staged.iter().any(|s| s.name() == stage.name()) {
                return Err(SceneError::name_collision(stage.name(), "engine"));
            }
            stage.set_isometric(spec.isometric);
            for child in &spec.children {
                stage.root_mut().add_boxed(self.registry.build(child)?, None)?;
            }
            staged.push(stage);
        }

        let added = staged.len();
        self.config = config;
        self.layers.extend(staged);
        debug!("engine: loaded {added} layers from document");
        Ok(added)
    }

    pub fn load_json(&mut self, json: &str) -> SceneResult<usize> {
        let document = SceneDocument::from_json(json)?;
        self.load_document(&document)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("layers", &self.layers)
            .field("surface_offset", &self.surface_offset)
            .field("showing_fps", &self.on_fps.is_some())
            .finish()
    }
}
