//! JSON scene documents.
//!
//! ```json
//! {
//!   "world": { "world_width": 400, "world_height": 400 },
//!   "layers": [
//!     { "name": "actors", "children": [
//!       { "kind": "container", "name": "squad", "z": 2, "children": [
//!         { "name": "scout", "z": 5, "shape": [[-10, -10], [10, -10], [10, 10], [-10, 10]] }
//!       ] },
//!       { "kind": "text", "name": "title", "text": "Hello", "position": [0, -150, 0] }
//!     ] }
//!   ]
//! }
//! ```

use serde::Deserialize;

use tableau_engine::coords::{Polygon, Vec2};

use crate::engine::EngineConfig;
use crate::error::SceneResult;
use crate::object::DisplayObject;

/// A whole scene: optional world config plus layers in paint order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDocument {
    pub world: Option<EngineConfig>,
    pub layers: Vec<LayerSpec>,
}

impl SceneDocument {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerSpec {
    pub name: String,
    pub isometric: bool,
    pub children: Vec<NodeSpec>,
}

/// Description of one node. `kind` selects the registry factory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeSpec {
    pub kind: String,
    pub name: String,
    pub z: i32,
    pub position: [f32; 3],
    pub visible: bool,
    pub shape: Option<Vec<[f32; 2]>>,
    /// Text content (`text` kind).
    pub text: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    /// `0xRRGGBB` fill (`text` kind).
    pub fill: Option<u32>,
    /// `0xRRGGBB` outline (`text` kind).
    pub stroke: Option<u32>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self { kind: kind.into(), name: name.into(), ..Self::default() }
    }

    /// Builds the shared object state every factory starts from.
    pub fn to_object(&self) -> SceneResult<DisplayObject> {
        let mut object = DisplayObject::new(self.name.as_str())?
            .with_z_index(self.z)
            .with_position(self.position);
        if let Some(points) = &self.shape {
            object = object.with_shape(points.iter().copied().map(Vec2::from).collect::<Polygon>());
        }
        object.set_visible(self.visible);
        Ok(object)
    }
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            kind: "object".to_string(),
            name: String::new(),
            z: 0,
            position: [0.0; 3],
            visible: true,
            shape: None,
            text: None,
            font: None,
            font_size: None,
            fill: None,
            stroke: None,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use tableau_engine::coords::Vec3;
    use tableau_engine::scene::ZIndex;

    #[test]
    fn minimal_node_uses_defaults() {
        let doc = SceneDocument::from_json(r#"{ "layers": [ { "name": "bg", "children": [ { "name": "floor" } ] } ] }"#)
            .unwrap();
        let node = &doc.layers[0].children[0];
        assert_eq!(node.kind, "object");
        assert!(node.visible);
        assert!(doc.world.is_none());
    }

    #[test]
    fn world_config_merges_onto_defaults() {
        let doc = SceneDocument::from_json(r#"{ "world": { "world_width": 800 } }"#).unwrap();
        let world = doc.world.unwrap();
        assert_eq!(world.world_width, 800.0);
        assert_eq!(world.world_height, 400.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = SceneDocument::from_json(r#"{ "layers": [ { "name": "bg", "colour": 1 } ] }"#).unwrap_err();
        assert!(matches!(err, SceneError::Document(_)));
    }

    #[test]
    fn to_object_applies_common_fields() {
        let spec = NodeSpec {
            z: 3,
            position: [1.0, 2.0, 3.0],
            visible: false,
            shape: Some(vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]]),
            ..NodeSpec::new("object", "tri")
        };
        let obj = spec.to_object().unwrap();
        assert_eq!(obj.z_index(), ZIndex(3));
        assert_eq!(obj.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(!obj.is_visible());
        assert_eq!(obj.shape().unwrap().len(), 3);
    }

    #[test]
    fn to_object_requires_name() {
        assert!(NodeSpec::new("object", "").to_object().is_err());
    }
}
