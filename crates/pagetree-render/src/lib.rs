//! # Pagetree Render - JSON Component Trees to Static HTML
//!
//! `pagetree-render` turns a declarative tree of typed, styled nodes into an
//! HTML fragment. Each node names a component; components are looked up in a
//! [`Registry`] and rendered bottom-up, with children rendered first and
//! handed to their parent as HTML strings.
//!
//! This crate is the rendering engine of `pagetree`, but can be used on its
//! own wherever a component tree needs to become markup.
//!
//! ## Core Concepts
//!
//! - [`Node`]: a tree element (`type`, `id`, `meta`, `style`, `children`)
//! - [`Component`]: a render unit built from a [`ComponentDescriptor`]
//! - [`Registry`]: maps component names to render units
//! - [`Renderer`]: walks a tree, with a depth guard
//! - [`RenderState`]: runtime scripts and diagnostics of one session
//! - [`style`]: style-token translation and validation
//! - [`a11y`]: contrast checking and dark-theme colors
//! - [`minify_html`]: whitespace minifier that protects script/style blocks
//!
//! ## Quick Start
//!
//! ```rust
//! use pagetree_render::{Component, ComponentDescriptor, Node, Registry};
//! use pagetree_render::template::TemplateContext;
//!
//! let registry = Registry::setup(|r| {
//!     r.register(Component::new(
//!         ComponentDescriptor::new("Section", "1.0.0", |ctx: &TemplateContext<'_>| {
//!             format!(r#"<section {} style="{}">{}</section>"#,
//!                 ctx.a11y, ctx.style, ctx.children_html())
//!         })
//!         .token("section-py"),
//!     ));
//!     r.register(Component::new(ComponentDescriptor::new(
//!         "Text",
//!         "1.0.0",
//!         |ctx: &TemplateContext<'_>| {
//!             format!("<p {}>{}</p>", ctx.a11y, ctx.meta_str("content").unwrap_or_default())
//!         },
//!     )));
//! });
//!
//! let page = Node::builder("Section")
//!     .id("hero")
//!     .style("section-py", 48)
//!     .child(Node::builder("Text").id("intro").meta("content", "Welcome"))
//!     .build();
//!
//! assert_eq!(
//!     registry.render(&page).unwrap(),
//!     r#"<section id="hero" style="--section-py:48px;"><p id="intro">Welcome</p></section>"#
//! );
//! ```
//!
//! ## Declarative Components
//!
//! Components can also be declared in YAML with a MiniJinja template and
//! loaded with [`Registry::load_manifest_dir`]. See [`manifest`].
//!
//! ## Trust Boundary
//!
//! Meta and style values are inserted into markup and CSS verbatim. Nothing
//! is escaped; input from untrusted sources must be sanitized before it is
//! handed to the renderer.

pub mod a11y;
pub mod component;
mod error;
pub mod manifest;
mod minify;
pub mod node;
pub mod options;
pub mod prelude;
pub mod registry;
pub mod renderer;
pub mod state;
pub mod style;
pub mod template;

// Error type
pub use error::RenderError;

// Data model
pub use node::{Meta, Node, NodeBuilder};

// Components and registry
pub use component::{
    accessibility_attributes, Component, ComponentDescriptor, ComponentDoc, RenderCall, Runtime,
    ScriptPlacement,
};
pub use manifest::{ComponentManifest, ManifestError};
pub use registry::Registry;

// Rendering
pub use options::{DarkVariants, RenderOptions, MAX_RENDER_DEPTH};
pub use renderer::Renderer;
pub use state::{Diagnostic, DiagnosticLevel, RenderState};
pub use template::{JinjaTemplate, Template, TemplateContext};

// Style and color utilities
pub use a11y::{auto_dark_color, contrast_ratio, validate_contrast};
pub use style::{translate, validate_style, StyleMap};

pub use minify::minify_html;
