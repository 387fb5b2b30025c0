//! Recursive tree renderer.
//!
//! [`Renderer::render`] walks a [`Node`] tree depth first. For every node it
//! resolves the component, renders the children left to right, and hands
//! their HTML to the component's render unit. Failures are fatal for the
//! whole call: the first error propagates and no partial HTML is returned.
//!
//! The depth guard refuses any node whose depth (root = 1) reaches
//! [`RenderOptions::max_depth`], so a runaway tree produces a
//! [`RenderError::RecursionLimitExceeded`] instead of exhausting the stack.

use crate::a11y::dark_style_for;
use crate::component::RenderCall;
use crate::error::RenderError;
use crate::node::Node;
use crate::options::{DarkVariants, RenderOptions};
use crate::registry::Registry;
use crate::state::RenderState;

/// Renders node trees against a registry.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    registry: &'a Registry,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self::with_options(registry, RenderOptions::default())
    }

    pub fn with_options(registry: &'a Registry, options: RenderOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `node` and its subtree to an HTML fragment.
    ///
    /// Runtime requests and diagnostics are recorded in `state`.
    pub fn render(&self, node: &Node, state: &mut RenderState) -> Result<String, RenderError> {
        self.render_at(node, 1, state)
    }

    fn render_at(
        &self,
        node: &Node,
        depth: usize,
        state: &mut RenderState,
    ) -> Result<String, RenderError> {
        if depth >= self.options.max_depth {
            log::warn!(
                "refusing to render {} at depth {} (limit {})",
                node.kind,
                depth,
                self.options.max_depth
            );
            return Err(RenderError::RecursionLimitExceeded { depth });
        }

        let component = self
            .registry
            .get(&node.kind)
            .ok_or_else(|| RenderError::unknown(&node.kind))?;

        let children = node
            .children
            .iter()
            .map(|child| self.render_at(child, depth + 1, state))
            .collect::<Result<Vec<_>, _>>()?;

        let dark = match self.options.dark_variants {
            DarkVariants::Disabled => None,
            DarkVariants::Auto => Some(dark_style_for(&node.style)),
        };

        let mut call = RenderCall::new(&node.meta, &children, &node.style);
        if let Some(id) = node.id.as_deref() {
            call = call.id(id);
        }
        if let Some(dark) = dark.as_ref().filter(|d| !d.is_empty()) {
            call = call.dark_style(dark);
        }

        component.render(call, state)
    }
}
