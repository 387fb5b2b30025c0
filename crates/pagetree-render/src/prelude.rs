//! Rendering prelude for convenient imports.
//!
//! ```rust
//! use pagetree_render::prelude::*;
//!
//! let registry = Registry::setup(|r| {
//!     r.register(ComponentDescriptor::new("Divider", "1.0.0", |ctx: &TemplateContext<'_>| {
//!         format!("<hr {}>", ctx.a11y)
//!     }));
//! });
//! let html = registry.render(&Node::builder("Divider").id("d").build()).unwrap();
//! assert_eq!(html, r#"<hr id="d">"#);
//! ```

pub use crate::{
    minify_html, Component, ComponentDescriptor, Node, Registry, RenderError, RenderOptions,
    RenderState, Renderer, Runtime, TemplateContext,
};
