//! # Pagetree - Static Pages from JSON Site Descriptions
//!
//! `pagetree` builds static HTML pages from a declarative site description:
//! global metadata and tokens, a shared header and footer, and a list of pages
//! whose content is a tree of components.
//!
//! Rendering itself lives in [`pagetree_render`], re-exported here. This crate
//! adds the page-producing layer:
//!
//! - [`site`]: [`Site`] loading, page assembly, runtime script injection,
//!   minification and writing pages to disk
//! - [`adapter`]: import of flat, absolutely positioned design exports
//!
//! ## Example
//!
//! ```rust
//! use pagetree::{Component, ComponentDescriptor, Registry, Site, SiteOptions};
//! use pagetree::render::template::TemplateContext;
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
//! let site = Site::from_json(r#"{
//!     "meta": { "appName": "Acme" },
//!     "pages": [
//!         { "slug": "index", "title": "Home",
//!           "content": { "id": "hi", "type": "Text", "meta": { "content": "Hello" } } }
//!     ]
//! }"#).unwrap();
//!
//! let pages = site.build(&registry, &SiteOptions::default()).unwrap();
//! assert_eq!(pages[0].file_name(), "index.html");
//! assert!(pages[0].html.contains("<title>Acme | Home</title>"));
//! assert!(pages[0].html.contains(r#"<main><p id="hi">Hello</p></main>"#));
//! ```

pub mod adapter;
pub mod site;

pub use pagetree_render as render;

pub use pagetree_render::{
    minify_html, Component, ComponentDescriptor, Diagnostic, DiagnosticLevel, Node, NodeBuilder,
    Registry, RenderError, RenderOptions, RenderState, Renderer, Runtime, ScriptPlacement,
};

pub use adapter::{import_foreign, import_foreign_json, ForeignDocument, Import, ImportReport};
pub use site::{
    inject_runtimes, render_document, write_pages, Layout, Page, RenderedPage, Site, SiteError,
    SiteMeta, SiteOptions,
};
