//! The node tree data model and its builders.
//!
//! A [`Node`] is the unit the renderer walks: a component `type`, an optional
//! `id`, open `meta` and `style` mappings, and ordered `children`. Nodes
//! deserialize straight from the exchanged JSON shape:
//!
//! ```json
//! { "id": "hero", "type": "Section", "meta": {}, "style": {}, "children": [] }
//! ```
//!
//! or can be assembled with [`NodeBuilder`]:
//!
//! ```rust
//! use pagetree_render::Node;
//!
//! let page = Node::builder("Section")
//!     .id("hero")
//!     .style("section-py", 48)
//!     .child(Node::builder("Text").meta("content", "Welcome").build())
//!     .build();
//!
//! assert_eq!(page.children.len(), 1);
//! ```
//!
//! The renderer never mutates nodes; they are only read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::style::StyleMap;

/// Open, component-specific properties of a node.
pub type Meta = serde_json::Map<String, Value>;

/// A typed, styled tree element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier used for generated DOM ids and script wiring.
    ///
    /// Synthesized at render time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Component type, resolved against the registry.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,

    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub style: StyleMap,

    /// Rendered left to right.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a bare node of the given component type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Starts a fluent builder for a node of the given component type.
    pub fn builder(kind: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(kind)
    }

    /// Parses a node tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the tree back to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// Fluent construction of well-formed [`Node`]s.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            node: Node::new(kind),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.node.id = Some(id.into());
        self
    }

    /// Sets one meta property.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.node.meta.insert(key.into(), value.into());
        self
    }

    /// Merges a whole meta mapping; later keys win.
    pub fn meta_map(mut self, meta: Meta) -> Self {
        self.node.meta.extend(meta);
        self
    }

    /// Sets one style key.
    pub fn style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.node.style.insert(key.into(), value.into());
        self
    }

    /// Merges a whole style mapping; later keys win.
    pub fn style_map(mut self, style: StyleMap) -> Self {
        self.node.style.extend(style);
        self
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.node.children.push(child.into());
        self
    }

    /// Appends several children, preserving their order.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.node.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}

impl From<NodeBuilder> for Node {
    fn from(builder: NodeBuilder) -> Self {
        builder.build()
    }
}
