use std::collections::BTreeMap;
use std::fmt;

use tableau_engine::paint::Color;
use tableau_engine::scene::Font;

use crate::container::DisplayObjectContainer;
use crate::document::NodeSpec;
use crate::error::{SceneError, SceneResult};
use crate::object::DisplayNode;
use crate::text::Text;

/// Builds one node (without children) from its description.
pub type NodeFactory = fn(&NodeSpec) -> SceneResult<Box<dyn DisplayNode>>;

/// Named set of node kinds an engine can instantiate.
///
/// Owned by the [`Engine`](crate::engine::Engine) it is passed to; there is
/// no process-wide registry.
#[derive(Clone, Default)]
pub struct PackageRegistry {
    factories: BTreeMap<String, NodeFactory>,
}

impl PackageRegistry {
    /// Registry with no kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the builtin kinds: `object`, `container`, `text`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("object", build_object);
        registry.register("container", build_container);
        registry.register("text", build_text);
        registry
    }

    /// Adds or replaces a kind. Returns the replaced factory.
    pub fn register(&mut self, kind: impl Into<String>, factory: NodeFactory) -> Option<NodeFactory> {
        self.factories.insert(kind.into(), factory)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds in lexical order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiates a single node of `spec.kind`.
    pub fn create(&self, spec: &NodeSpec) -> SceneResult<Box<dyn DisplayNode>> {
        let factory = self
            .factories
            .get(&spec.kind)
            .ok_or_else(|| SceneError::invalid_argument(format!("unknown node kind \"{}\"", spec.kind)))?;
        factory(spec)
    }

    /// Instantiates `spec` and its whole subtree.
    ///
    /// Children on a kind without a child collection are rejected.
    pub fn build(&self, spec: &NodeSpec) -> SceneResult<Box<dyn DisplayNode>> {
        let mut node = self.create(spec)?;
        if spec.children.is_empty() {
            return Ok(node);
        }

        let container = node.as_container_mut().ok_or_else(|| {
            SceneError::invalid_argument(format!(
                "\"{}\" of kind \"{}\" cannot hold children",
                spec.name, spec.kind
            ))
        })?;
        for child in &spec.children {
            container.add_boxed(self.build(child)?, None)?;
        }
        Ok(node)
    }
}

impl fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

fn build_object(spec: &NodeSpec) -> SceneResult<Box<dyn DisplayNode>> {
    Ok(Box::new(spec.to_object()?))
}

fn build_container(spec: &NodeSpec) -> SceneResult<Box<dyn DisplayNode>> {
    Ok(Box::new(DisplayObjectContainer::from_object(spec.to_object()?)))
}

fn build_text(spec: &NodeSpec) -> SceneResult<Box<dyn DisplayNode>> {
    let mut text = Text::from_object(spec.to_object()?, spec.text.clone().unwrap_or_default());
    if spec.font.is_some() || spec.font_size.is_some() {
        text = text.font(Font::new(
            spec.font.as_deref().unwrap_or(Text::DEFAULT_FAMILY),
            spec.font_size.unwrap_or(Text::DEFAULT_SIZE),
        ));
    }
    if let Some(fill) = spec.fill {
        text = text.fill(Color::from_hex(fill));
    }
    if let Some(stroke) = spec.stroke {
        text = text.stroke(Color::from_hex(stroke));
    }
    Ok(Box::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{downcast_ref, DisplayObject, RenderMethod};

    #[test]
    fn builtin_kinds() {
        let registry = PackageRegistry::builtin();
        assert_eq!(registry.kinds().collect::<Vec<_>>(), ["container", "object", "text"]);
    }

    #[test]
    fn unknown_kind_is_invalid_argument() {
        let err = PackageRegistry::builtin().create(&NodeSpec::new("sprite", "s")).err().unwrap();
        assert!(matches!(err, SceneError::InvalidArgument(_)));
    }

    #[test]
    fn text_kind_reads_text_fields() {
        let spec = NodeSpec {
            text: Some("hi".into()),
            font_size: Some(20.0),
            fill: Some(0xff0000),
            ..NodeSpec::new("text", "label")
        };
        let node = PackageRegistry::builtin().create(&spec).unwrap();
        let text = downcast_ref::<Text>(node.as_ref()).unwrap();

        assert_eq!(text.text(), "hi");
        assert_eq!(text.current_font(), &Font::new("Verdana", 20.0));
        assert_eq!(node.object().render_method(), RenderMethod::Text);
    }

    #[test]
    fn build_nests_children() {
        let spec = NodeSpec {
            children: vec![NodeSpec::new("object", "a"), NodeSpec::new("text", "b")],
            ..NodeSpec::new("container", "group")
        };
        let node = PackageRegistry::builtin().build(&spec).unwrap();
        let group = node.as_container().unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.child_as::<DisplayObject>("a").is_some());
        assert!(group.child_as::<Text>("b").is_some());
    }

    #[test]
    fn children_on_leaf_kind_are_rejected() {
        let spec = NodeSpec {
            children: vec![NodeSpec::new("object", "a")],
            ..NodeSpec::new("object", "leaf")
        };
        assert!(PackageRegistry::builtin().build(&spec).is_err());
    }

    #[test]
    fn duplicate_child_names_in_spec_collide() {
        let spec = NodeSpec {
            children: vec![NodeSpec::new("object", "a"), NodeSpec::new("object", "a")],
            ..NodeSpec::new("container", "group")
        };
        let err = PackageRegistry::builtin().build(&spec).err().unwrap();
        assert_eq!(err, SceneError::name_collision("a", "group"));
    }

    #[test]
    fn custom_kinds_can_be_registered() {
        let mut registry = PackageRegistry::new();
        assert!(registry.register("marker", build_object).is_none());
        assert!(registry.register("marker", build_object).is_some());
        assert!(registry.contains("marker"));
        assert!(!registry.contains("text"));
    }
}
