//! Component registry.
//!
//! The [`Registry`] maps component type names to render units. It is filled
//! once during setup and only read afterwards; the renderer borrows it
//! immutably, so one registry can serve any number of concurrent renders.
//!
//! Registering a name that already exists replaces the previous entry. Setup
//! code can therefore run more than once and the latest definition wins.
//!
//! ```rust
//! use pagetree_render::{Component, ComponentDescriptor, Node, Registry};
//! use pagetree_render::template::TemplateContext;
//!
//! let registry = Registry::setup(|r| {
//!     r.register(Component::new(ComponentDescriptor::new(
//!         "Text",
//!         "1.0.0",
//!         |ctx: &TemplateContext<'_>| {
//!             format!("<p {}>{}</p>", ctx.a11y, ctx.meta_str("content").unwrap_or_default())
//!         },
//!     )));
//! });
//!
//! let node = Node::builder("Text").id("t1").meta("content", "Hello").build();
//! assert_eq!(registry.render(&node).unwrap(), r#"<p id="t1">Hello</p>"#);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::component::{Component, ComponentDoc};
use crate::error::RenderError;
use crate::manifest::{load_manifest_dir, ManifestError};
use crate::node::Node;
use crate::renderer::Renderer;
use crate::state::RenderState;

/// Name-keyed store of render units.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    components: HashMap<String, Arc<Component>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry by running a setup function against an empty one.
    pub fn setup(f: impl FnOnce(&mut Registry)) -> Self {
        let mut registry = Self::new();
        f(&mut registry);
        registry
    }

    /// Adds a component under its own name, replacing any previous entry.
    pub fn register(&mut self, component: impl Into<Component>) -> &mut Self {
        let component = component.into();
        let name = component.name().to_string();
        if self
            .components
            .insert(name.clone(), Arc::new(component))
            .is_some()
        {
            log::debug!("component '{}' re-registered, previous definition replaced", name);
        }
        self
    }

    pub fn register_all<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        for component in components {
            self.register(component);
        }
        self
    }

    /// Registers every manifest found under `dir`. Returns how many were loaded.
    pub fn load_manifest_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, ManifestError> {
        let components = load_manifest_dir(dir.as_ref())?;
        let count = components.len();
        self.register_all(components);
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Component>> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Documentation records of every component, sorted by name.
    pub fn docs(&self) -> Vec<ComponentDoc> {
        let mut docs: Vec<_> = self.components.values().map(|c| c.doc()).collect();
        docs.sort_by(|a, b| a.name.cmp(&b.name));
        docs
    }

    /// Renders a tree with default options and a fresh state.
    ///
    /// Use [`Renderer`] directly to keep the state (runtime scripts,
    /// diagnostics) or to change options.
    pub fn render(&self, node: &Node) -> Result<String, RenderError> {
        Renderer::new(self).render(node, &mut RenderState::new())
    }
}
