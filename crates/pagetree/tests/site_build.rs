//! Integration tests for site assembly.

use std::fs;

use pagetree::render::template::TemplateContext;
use pagetree::{
    import_foreign_json, render_document, write_pages, Component, ComponentDescriptor, Node,
    Registry, RenderError, Runtime, Site, SiteError, SiteOptions,
};
use tempfile::TempDir;

fn registry() -> Registry {
    Registry::setup(|r| {
        r.register(Component::new(
            ComponentDescriptor::new("Section", "1.0.0", |ctx: &TemplateContext<'_>| {
                format!(
                    r#"<section {} style="{}">{}</section>"#,
                    ctx.a11y,
                    ctx.style,
                    ctx.children_html()
                )
            })
            .token("bg-color"),
        ));
        r.register(Component::new(ComponentDescriptor::new(
            "Text",
            "1.0.0",
            |ctx: &TemplateContext<'_>| {
                format!("<p {}>{}</p>", ctx.a11y, ctx.meta_str("content").unwrap_or_default())
            },
        )));
        r.register(Component::new(
            ComponentDescriptor::new("Nav", "1.0.0", |ctx: &TemplateContext<'_>| {
                format!("<nav {}></nav>", ctx.a11y)
            })
            .runtime(Runtime::head("initNav();")),
        ));
        r.register(Component::new(
            ComponentDescriptor::new("Tabs", "1.0.0", |ctx: &TemplateContext<'_>| {
                format!("<div {}>{}</div>", ctx.a11y, ctx.children_html())
            })
            .runtime(Runtime::body("initTabs();")),
        ));
    })
}

const SITE: &str = r##"{
    "meta": { "appName": "Acme", "version": "2.0.0" },
    "style": { "brand-color": "#0055ff" },
    "layout": { "header": { "id": "nav", "type": "Nav" } },
    "pages": [
        {
            "slug": "index",
            "title": "Home",
            "content": {
                "id": "hero",
                "type": "Section",
                "children": [
                    { "id": "tabs", "type": "Tabs", "children": [
                        { "id": "t1", "type": "Text", "meta": { "content": "One" } }
                    ] }
                ]
            }
        },
        {
            "slug": "about",
            "content": { "id": "about", "type": "Text", "meta": { "content": "About", "title": "About us" } }
        }
    ]
}"##;

#[test]
fn test_build_pages() {
    let site = Site::from_json(SITE).unwrap();
    let pages = site
        .build(&registry(), &SiteOptions::default().minify(false))
        .unwrap();
    assert_eq!(pages.len(), 2);

    let home = &pages[0];
    assert_eq!(home.title, "Acme | Home");
    assert!(home.html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    assert!(home.html.contains(r#"<meta name="generator" content="Acme 2.0.0">"#));
    assert!(home.html.contains("<style>:root{--brand-color:#0055ff;}</style>"));
    assert!(home.html.contains(r#"<nav id="nav"></nav>"#));
    assert!(home
        .html
        .contains(r#"<script data-component="Nav">initNav();</script></head>"#));
    assert!(home
        .html
        .contains(r#"<script data-component="Tabs">initTabs();</script></body>"#));

    let about = &pages[1];
    assert_eq!(about.title, "Acme | About us");
    assert_eq!(about.file_name(), "about.html");
    // Header scripts appear on every page, content scripts only where used.
    assert!(about.html.contains("initNav();"));
    assert!(!about.html.contains("initTabs();"));
}

#[test]
fn test_build_minifies_by_default() {
    let site = Site::from_json(SITE).unwrap();
    let pages = site.build(&registry(), &SiteOptions::default()).unwrap();
    assert!(!pages[0].html.contains('\n'));
    assert!(pages[0].html.contains("<main><section id=\"hero\""));
}

#[test]
fn test_page_error_names_slug() {
    let site = Site::from_json(
        r#"{ "pages": [{ "slug": "broken", "content": { "type": "Carousel" } }] }"#,
    )
    .unwrap();
    let err = site.build(&registry(), &SiteOptions::default()).unwrap_err();
    assert!(matches!(
        &err,
        SiteError::Page { slug, source: RenderError::UnknownComponent { .. } } if slug == "broken"
    ));
    assert_eq!(
        err.to_string(),
        "page 'broken': unknown component: 'Carousel' is not registered"
    );
}

#[test]
fn test_layout_error() {
    let site = Site::from_json(
        r#"{ "layout": { "footer": { "type": "Ghost" } }, "pages": [] }"#,
    )
    .unwrap();
    assert!(matches!(
        site.build(&registry(), &SiteOptions::default()),
        Err(SiteError::Layout { part: "footer", .. })
    ));
}

#[test]
fn test_invalid_site_json() {
    assert!(matches!(
        Site::from_json(r#"{ "pages": [{ "slug": "x" }] }"#),
        Err(SiteError::Json(_))
    ));
}

#[test]
fn test_diagnostics_per_page() {
    let site = Site::from_json(
        r#"{ "pages": [
            { "slug": "a", "content": { "id": "s", "type": "Section", "style": { "glow": "1" } } },
            { "slug": "b", "content": { "id": "s", "type": "Section" } }
        ] }"#,
    )
    .unwrap();
    let pages = site.build(&registry(), &SiteOptions::default()).unwrap();
    assert_eq!(pages[0].diagnostics.len(), 1);
    assert!(pages[1].diagnostics.is_empty());
}

#[test]
fn test_layout_diagnostics_reach_every_page() {
    let site = Site::from_json(
        r#"{
            "layout": { "footer": { "id": "f", "type": "Section", "style": { "glow": "1" } } },
            "pages": [
                { "slug": "a", "content": { "id": "x", "type": "Text" } },
                { "slug": "b", "content": { "id": "y", "type": "Section", "style": { "glow": "2" } } }
            ]
        }"#,
    )
    .unwrap();
    let pages = site.build(&registry(), &SiteOptions::default()).unwrap();
    assert_eq!(pages[0].diagnostics.len(), 1);
    assert!(pages[0].diagnostics[0].to_string().contains("glow"));
    assert_eq!(pages[1].diagnostics.len(), 2);
}

#[test]
fn test_write_pages() {
    let site = Site::from_json(SITE).unwrap();
    let pages = site.build(&registry(), &SiteOptions::default()).unwrap();
    let dir = TempDir::new().unwrap();

    let written = write_pages(&pages, &dir.path().join("out")).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written[0].ends_with("index.html"));
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), pages[1].html);
}

#[test]
fn test_render_document() {
    let node = Node::builder("Tabs").id("t").build();
    let html = render_document(&registry(), &node, "Standalone", &SiteOptions::default()).unwrap();
    assert!(html.contains("<title>Standalone</title>"));
    assert!(html.contains(
        r#"<main><div id="t"></div></main><script data-component="Tabs">initTabs();</script></body>"#
    ));
}

#[test]
fn test_imported_design_renders() {
    let registry = Registry::setup(|r| {
        r.register(ComponentDescriptor::new(
            "Canvas",
            "1.0.0",
            |ctx: &TemplateContext<'_>| {
                format!(r#"<div {} style="{}">{}</div>"#, ctx.a11y, ctx.style, ctx.children_html())
            },
        ));
        r.register(ComponentDescriptor::new(
            "Text",
            "1.0.0",
            |ctx: &TemplateContext<'_>| {
                format!(
                    r#"<p {} style="{}">{}</p>"#,
                    ctx.a11y,
                    ctx.style,
                    ctx.meta_str("content").unwrap_or_default()
                )
            },
        ));
    });
    let import = import_foreign_json(
        r#"{ "name": "Hero", "width": 800, "components": [
            { "id": "t", "type": "text", "x": 10, "y": 20, "width": 100, "height": 30,
              "props": { "content": "Hi" } },
            { "id": "s", "type": "sticker", "x": 0, "y": 0, "width": 1, "height": 1, "props": {} }
        ] }"#,
    )
    .unwrap();
    assert_eq!(import.report.skipped.len(), 1);

    let html = registry.render(&import.root).unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<div id="canvas-hero" style="position:relative; width:800px;">"#,
            r#"<p id="t" style="height:30px; position:absolute; width:100px; left:10px; top:20px;">Hi</p>"#,
            "</div>"
        )
    );
}
