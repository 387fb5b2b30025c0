//! Integration tests for tree rendering.

use pagetree_render::template::TemplateContext;
use pagetree_render::{
    minify_html, Component, ComponentDescriptor, DarkVariants, DiagnosticLevel, Node, Registry,
    RenderError, RenderOptions, RenderState, Renderer, Runtime, MAX_RENDER_DEPTH,
};
use serde_json::json;

fn site_components(r: &mut Registry) {
    r.register(Component::new(
        ComponentDescriptor::new("Section", "1.0.0", |ctx: &TemplateContext<'_>| {
            format!(
                r#"<section {} style="{}">{}</section>"#,
                ctx.a11y,
                ctx.style,
                ctx.children_html()
            )
        })
        .tokens(["bg-color", "section-py"]),
    ));
    r.register(Component::new(
        ComponentDescriptor::new("Text", "1.0.0", |ctx: &TemplateContext<'_>| {
            format!(
                r#"<p {} style="{}">{}</p>"#,
                ctx.a11y,
                ctx.style,
                ctx.meta_str("content").unwrap_or_default()
            )
        })
        .token("text-color"),
    ));
    r.register(Component::new(
        ComponentDescriptor::new("Tabs", "2.1.0", |ctx: &TemplateContext<'_>| {
            format!(r#"<div {} class="tabs">{}</div>"#, ctx.a11y, ctx.children_html())
        })
        .runtime(Runtime::body("initTabs();")),
    ));
}

fn registry() -> Registry {
    Registry::setup(site_components)
}

fn text(id: &str, content: &str) -> Node {
    Node::builder("Text").id(id).meta("content", content).build()
}

fn chain(depth: usize) -> Node {
    let mut node = Node::builder("Section").id(format!("s{}", depth)).build();
    for level in (1..depth).rev() {
        node = Node::builder("Section")
            .id(format!("s{}", level))
            .child(node)
            .build();
    }
    node
}

#[test]
fn test_children_render_in_document_order() {
    let page = Node::builder("Section")
        .id("root")
        .children([text("a", "first"), text("b", "second")])
        .child(
            Node::builder("Section")
                .id("inner")
                .child(text("c", "third")),
        )
        .build();

    let html = registry().render(&page).unwrap();
    let first = html.find("first").unwrap();
    let second = html.find("second").unwrap();
    let third = html.find("third").unwrap();
    assert!(first < second && second < third);
    assert!(html.starts_with(r#"<section id="root""#));
}

#[test]
fn test_depth_one_below_ceiling_renders() {
    let html = registry().render(&chain(MAX_RENDER_DEPTH - 1)).unwrap();
    assert_eq!(html.matches("<section").count(), MAX_RENDER_DEPTH - 1);
}

#[test]
fn test_depth_at_ceiling_fails() {
    assert_eq!(
        registry().render(&chain(MAX_RENDER_DEPTH)),
        Err(RenderError::RecursionLimitExceeded {
            depth: MAX_RENDER_DEPTH
        })
    );
}

#[test]
fn test_runaway_tree_fails_without_overflow() {
    // Stands in for a self-referential tree: far deeper than any real page.
    let result = registry().render(&chain(1_000));
    assert!(matches!(
        result,
        Err(RenderError::RecursionLimitExceeded { .. })
    ));
}

#[test]
fn test_unknown_component_aborts_whole_render() {
    let page = Node::builder("Section")
        .child(text("ok", "fine"))
        .child(Node::builder("Section").child(Node::new("Carousel")))
        .build();
    let err = registry().render(&page).unwrap_err();
    assert_eq!(
        err,
        RenderError::UnknownComponent {
            component: "Carousel".into()
        }
    );
    assert_eq!(
        err.to_string(),
        "unknown component: 'Carousel' is not registered"
    );
}

#[test]
fn test_style_translation_in_output() {
    let page = Node::builder("Section")
        .id("hero")
        .style("bg-color", "red")
        .style("width", 200)
        .build();
    assert_eq!(
        registry().render(&page).unwrap(),
        r#"<section id="hero" style="--bg-color:red; width:200px;"></section>"#
    );
}

#[test]
fn test_unauthorized_tokens_warn_once_per_render() {
    let registry = registry();
    let renderer = Renderer::new(&registry);
    let clean = Node::builder("Text")
        .id("t")
        .meta("version", "1.0.0")
        .meta("createdAt", "2024-01-01T00:00:00.000Z")
        .style("text-color", "#111")
        .build();
    let mut dirty = clean.clone();
    dirty.style.insert("glow".into(), json!("1"));
    dirty.style.insert("blur".into(), json!("2"));

    let mut state = RenderState::new();
    let clean_html = renderer.render(&clean, &mut state).unwrap();
    assert_eq!(state.warnings().count(), 0);

    let dirty_html = renderer.render(&dirty, &mut state).unwrap();
    let warnings: Vec<_> = state.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("blur, glow"));

    // The offending keys are reported, never stripped.
    assert_eq!(
        dirty_html,
        clean_html.replace("--text-color:#111;", "--blur:2; --glow:1; --text-color:#111;")
    );
}

#[test]
fn test_missing_provenance_is_defaulted_without_mutating_tree() {
    let registry = Registry::setup(|r| {
        r.register(ComponentDescriptor::new(
            "Stamp",
            "3.4.5",
            |ctx: &TemplateContext<'_>| {
                format!(
                    "{}|{}",
                    ctx.meta_str("version").unwrap_or_default(),
                    ctx.meta.contains_key("createdAt")
                )
            },
        ));
    });
    let node = Node::builder("Stamp").id("s").meta("title", "x").build();
    let before = node.clone();

    assert_eq!(registry.render(&node).unwrap(), "3.4.5|true");
    assert_eq!(node, before);
}

#[test]
fn test_missing_id_is_synthesized() {
    let registry = registry();
    let mut state = RenderState::new();
    let html = Renderer::new(&registry)
        .render(&Node::builder("Text").meta("content", "x").build(), &mut state)
        .unwrap();
    assert!(html.starts_with(r#"<p id="text-"#));
    assert!(state
        .diagnostics()
        .iter()
        .any(|d| d.level == DiagnosticLevel::Info && d.component == "Text"));
}

#[test]
fn test_repeated_setup_uses_latest_units() {
    let mut registry = registry();
    site_components(&mut registry);
    registry.register(ComponentDescriptor::new(
        "Text",
        "9.0.0",
        |_: &TemplateContext<'_>| "<p>replaced</p>".to_string(),
    ));
    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.render(&text("t", "original")).unwrap(),
        "<p>replaced</p>"
    );
}

#[test]
fn test_runtime_requirements_recorded_once() {
    let registry = registry();
    let page = Node::builder("Section")
        .child(Node::builder("Tabs").id("t1"))
        .child(Node::builder("Tabs").id("t2"))
        .build();
    let mut state = RenderState::new();
    Renderer::new(&registry).render(&page, &mut state).unwrap();

    let runtimes = state.take_runtimes();
    assert_eq!(runtimes.len(), 1);
    assert_eq!(runtimes[0].0, "Tabs");
    assert_eq!(runtimes[0].1.source, "initTabs();");
}

#[test]
fn test_cleared_state_does_not_leak_between_pages() {
    let registry = registry();
    let renderer = Renderer::new(&registry);
    let mut state = RenderState::new();

    renderer
        .render(&Node::builder("Tabs").id("t").build(), &mut state)
        .unwrap();
    assert!(state.requires_runtime("Tabs"));

    state.clear();
    renderer.render(&text("t", "plain"), &mut state).unwrap();
    assert!(!state.requires_runtime("Tabs"));
}

#[test]
fn test_raw_values_pass_through_unescaped() {
    let page = Node::builder("Text")
        .id("x")
        .meta("content", "<b>bold</b>")
        .style("text-color", "red;}</style><script>alert(1)</script>")
        .build();
    let html = registry().render(&page).unwrap();
    assert!(html.contains("<b>bold</b>"));
    assert!(html.contains(r#"style="--text-color:red;}</style><script>alert(1)</script>;""#));
}

#[test]
fn test_accessibility_attributes_on_root() {
    let page = Node::builder("Text")
        .id("logo-text")
        .meta("audioDescription", "Company name")
        .meta("ariaRole", "heading")
        .meta("aria-level", 1)
        .build();
    let html = registry().render(&page).unwrap();
    assert!(html.starts_with(
        r#"<p id="logo-text" aria-label="Company name" role="heading" aria-level="1""#
    ));
}

#[test]
fn test_auto_dark_variants() {
    let registry = registry();
    let page = Node::builder("Section")
        .id("s")
        .style("bg-color", "#ffffff")
        .build();

    let disabled = registry.render(&page).unwrap();
    assert!(!disabled.contains("--dark-"));

    let options = RenderOptions::default().dark_variants(DarkVariants::Auto);
    let section = Component::new(
        ComponentDescriptor::new("Section", "1.0.0", |ctx: &TemplateContext<'_>| {
            format!("{} {}", ctx.style, ctx.dark_style)
        })
        .token("bg-color"),
    );
    let registry = Registry::setup(|r| {
        r.register(section);
    });
    let html = Renderer::with_options(&registry, options)
        .render(&page, &mut RenderState::new())
        .unwrap();
    assert_eq!(html, "--bg-color:#ffffff; --dark-bg-color:#1a1a1a;");
}

#[test]
fn test_rendered_tree_minifies() {
    let registry = Registry::setup(|r| {
        r.register(ComponentDescriptor::new(
            "Page",
            "1.0.0",
            |ctx: &TemplateContext<'_>| {
                format!(
                    "<main {}>\n    {}\n    <script>\n  let  x = 1;\n</script>\n</main>\n",
                    ctx.a11y,
                    ctx.children_html()
                )
            },
        ));
        site_components(r);
    });
    let page = Node::builder("Page")
        .id("p")
        .child(text("t", "Hi   there"))
        .build();
    let html = minify_html(&registry.render(&page).unwrap());
    assert_eq!(
        html,
        "<main id=\"p\"><p id=\"t\" style=\"\">Hi there</p><script>\n  let  x = 1;\n</script></main>"
    );
}

#[test]
fn test_tree_from_json() {
    let page = Node::from_json(
        r#"{
            "id": "root",
            "type": "Section",
            "style": { "section-py": 32 },
            "children": [
                { "id": "a", "type": "Text", "meta": { "content": "Hello" } }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(
        registry().render(&page).unwrap(),
        r#"<section id="root" style="--section-py:32px;"><p id="a" style="">Hello</p></section>"#
    );
}
