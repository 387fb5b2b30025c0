//! Style mapping to CSS declaration string.

use serde_json::Value;

use super::keys::{is_layout_utility, takes_px};
use super::StyleMap;

/// Maps positional shorthands to their CSS property.
pub fn property_name(key: &str) -> &str {
    match key {
        "x" => "left",
        "y" => "top",
        other => other,
    }
}

/// Normalizes one style value to its CSS text.
///
/// Returns `None` for values that produce no declaration: `null`, empty
/// strings and non-scalar values. Numbers for length-valued keys get a `px`
/// suffix; a single trailing semicolon is stripped from strings.
pub fn css_value(key: &str, value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => {
            let s = s.trim();
            s.strip_suffix(';').unwrap_or(s).trim_end().to_string()
        }
        Value::Number(n) if takes_px(key) => format!("{}px", n),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Serializes a style mapping into a CSS declaration string.
///
/// Layout utilities become direct declarations (`width:200px;`); every other
/// key becomes a custom property (`--bg-color:red;`). With a `variant` prefix,
/// custom properties are namespaced (`--dark-bg-color:…;`) while layout
/// utilities are emitted unchanged.
///
/// Declarations are sorted by key and separated by a single space. An empty
/// mapping yields an empty string. When a map holds both `x` and `left` (or
/// `y` and `top`), the explicit property wins and the alias is dropped.
///
/// ```rust
/// use pagetree_render::style::translate;
/// use serde_json::json;
///
/// let style = json!({ "x": 10, "bg-color": "#fff;" });
/// let map = style.as_object().unwrap();
/// assert_eq!(translate(map, None), "--bg-color:#fff; left:10px;");
/// assert_eq!(translate(map, Some("dark")), "--dark-bg-color:#fff; left:10px;");
/// ```
pub fn translate(style: &StyleMap, variant: Option<&str>) -> String {
    // Map iteration order depends on serde_json features.
    let mut entries: Vec<_> = style.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut declarations = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let Some(value) = css_value(key, value) else {
            continue;
        };
        let property = property_name(key);
        if property != key && shadows_alias(style, property) {
            continue;
        }

        let declaration = if is_layout_utility(property) {
            format!("{}:{};", property, value)
        } else {
            match variant {
                Some(prefix) => format!("--{}-{}:{};", prefix, property, value),
                None => format!("--{}:{};", property, value),
            }
        };
        declarations.push(declaration);
    }

    declarations.join(" ")
}

fn shadows_alias(style: &StyleMap, property: &str) -> bool {
    style
        .get(property)
        .and_then(|value| css_value(property, value))
        .is_some()
}
