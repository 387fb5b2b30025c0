//! Import of flat, absolutely positioned designs.
//!
//! Design tools export pages as a flat list of boxes with coordinates:
//!
//! ```json
//! {
//!   "name": "Landing",
//!   "width": 1280,
//!   "height": 800,
//!   "components": [
//!     { "id": "t1", "type": "text", "x": 40, "y": 32, "width": 300, "height": 40,
//!       "props": { "content": "Hello" } }
//!   ]
//! }
//! ```
//!
//! [`import_foreign`] turns such a document into a `Canvas` node whose
//! children are positioned absolutely. Props are copied into meta as they
//! are; a `style` object inside props is merged into the node's style.
//! Components of an unsupported type are skipped and listed in the
//! [`ImportReport`]; they never fail the import.

use pagetree_render::{Node, NodeBuilder, StyleMap};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Foreign type to component name.
pub const TYPE_MAP: &[(&str, &str)] = &[
    ("text", "Text"),
    ("image", "Image"),
    ("button", "Button"),
    ("rect", "Box"),
    ("container", "Container"),
];

/// Component name of the imported root.
pub const CANVAS: &str = "Canvas";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub width: Option<Number>,
    #[serde(default)]
    pub height: Option<Number>,
    #[serde(default)]
    pub components: Vec<ForeignComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignComponent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub x: Option<Number>,
    #[serde(default)]
    pub y: Option<Number>,
    #[serde(default)]
    pub width: Option<Number>,
    #[serde(default)]
    pub height: Option<Number>,
    #[serde(default)]
    pub props: serde_json::Map<String, Value>,
}

impl ForeignDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A component left out of the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedComponent {
    pub id: Option<String>,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedComponent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub root: Node,
    pub report: ImportReport,
}

/// Maps a foreign type (case-insensitive) to a component name.
pub fn component_for(kind: &str) -> Option<&'static str> {
    TYPE_MAP
        .iter()
        .find(|(foreign, _)| foreign.eq_ignore_ascii_case(kind))
        .map(|(_, component)| *component)
}

/// Converts a foreign document into a node tree.
pub fn import_foreign(document: &ForeignDocument) -> Import {
    let mut report = ImportReport::default();
    let mut root = Node::builder(CANVAS)
        .id(canvas_id(document.name.as_deref()))
        .style("position", "relative");
    if let Some(name) = &document.name {
        root = root.meta("name", name.as_str());
    }
    root = with_size(root, document.width.as_ref(), document.height.as_ref());

    for component in &document.components {
        let Some(name) = component_for(&component.kind) else {
            log::warn!(
                "skipping unsupported component type '{}' (id: {})",
                component.kind,
                component.id.as_deref().unwrap_or("none")
            );
            report.skipped.push(SkippedComponent {
                id: component.id.clone(),
                kind: component.kind.clone(),
            });
            continue;
        };
        root = root.child(convert(name, component));
        report.imported += 1;
    }

    Import {
        root: root.build(),
        report,
    }
}

/// Parses and imports in one step.
pub fn import_foreign_json(json: &str) -> Result<Import, serde_json::Error> {
    Ok(import_foreign(&ForeignDocument::from_json(json)?))
}

fn convert(name: &str, component: &ForeignComponent) -> Node {
    let mut props = component.props.clone();
    let extra_style = match props.remove("style") {
        Some(Value::Object(style)) => style,
        _ => StyleMap::new(),
    };

    let mut node = Node::builder(name)
        .meta_map(props)
        .style("position", "absolute");
    if let Some(id) = &component.id {
        node = node.id(id.as_str());
    }
    if let Some(x) = &component.x {
        node = node.style("x", x.clone());
    }
    if let Some(y) = &component.y {
        node = node.style("y", y.clone());
    }
    with_size(node, component.width.as_ref(), component.height.as_ref())
        .style_map(extra_style)
        .build()
}

fn with_size(node: NodeBuilder, width: Option<&Number>, height: Option<&Number>) -> NodeBuilder {
    let node = match width {
        Some(width) => node.style("width", width.clone()),
        None => node,
    };
    match height {
        Some(height) => node.style("height", height.clone()),
        None => node,
    }
}

fn canvas_id(name: Option<&str>) -> String {
    let slug: String = name
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.split('-').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        "canvas".to_string()
    } else {
        format!("canvas-{}", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const DESIGN: &str = r##"{
        "name": "Landing Page",
        "width": 1280,
        "height": 800,
        "components": [
            { "id": "t1", "type": "text", "x": 40, "y": 32, "width": 300, "height": 40,
              "props": { "content": "Hello", "style": { "text-color": "#111" } } },
            { "id": "v1", "type": "video", "x": 0, "y": 0, "width": 10, "height": 10, "props": {} },
            { "type": "RECT", "x": 0, "y": 100, "width": 1280, "height": 2, "props": {} }
        ]
    }"##;

    #[test]
    fn test_import_maps_and_positions() {
        let import = import_foreign_json(DESIGN).unwrap();
        let root = &import.root;
        assert_eq!(root.kind, "Canvas");
        assert_eq!(root.id.as_deref(), Some("canvas-landing-page"));
        assert_eq!(root.style["position"], json!("relative"));
        assert_eq!(root.style["width"], json!(1280));

        let kinds: Vec<_> = root.children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Text", "Box"]);

        let text = &root.children[0];
        assert_eq!(text.id.as_deref(), Some("t1"));
        assert_eq!(text.meta["content"], json!("Hello"));
        assert!(!text.meta.contains_key("style"));
        assert_eq!(text.style["position"], json!("absolute"));
        assert_eq!(text.style["x"], json!(40));
        assert_eq!(text.style["text-color"], json!("#111"));
    }

    #[test]
    fn test_unsupported_types_are_reported() {
        let import = import_foreign_json(DESIGN).unwrap();
        assert_eq!(import.report.imported, 2);
        assert_eq!(
            import.report.skipped,
            vec![SkippedComponent {
                id: Some("v1".into()),
                kind: "video".into()
            }]
        );
    }

    #[test]
    fn test_empty_document() {
        let import = import_foreign(&ForeignDocument::default());
        assert_eq!(import.root.id.as_deref(), Some("canvas"));
        assert!(import.root.children.is_empty());
        assert_eq!(import.report, ImportReport::default());
    }

    #[test]
    fn test_missing_type_is_a_parse_error() {
        assert!(import_foreign_json(r#"{ "components": [{ "x": 1 }] }"#).is_err());
    }

    proptest! {
        #[test]
        fn every_component_is_imported_or_skipped(
            kinds in prop::collection::vec(
                prop::sample::select(vec!["text", "Image", "button", "rect", "container", "video", "svg"]),
                0..16,
            )
        ) {
            let document = ForeignDocument {
                components: kinds
                    .iter()
                    .enumerate()
                    .map(|(i, kind)| ForeignComponent {
                        id: Some(format!("c{}", i)),
                        kind: kind.to_string(),
                        x: Some(Number::from(i)),
                        y: None,
                        width: None,
                        height: None,
                        props: Default::default(),
                    })
                    .collect(),
                ..Default::default()
            };
            let import = import_foreign(&document);
            prop_assert_eq!(import.root.children.len(), import.report.imported);
            prop_assert_eq!(import.report.imported + import.report.skipped.len(), kinds.len());
            for (child, kind) in import
                .root
                .children
                .iter()
                .zip(kinds.iter().filter(|k| component_for(k).is_some()))
            {
                prop_assert_eq!(Some(child.kind.as_str()), component_for(kind));
            }
        }
    }
}
