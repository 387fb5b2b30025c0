//! Advisory validation of style keys against a component's token declaration.

use std::collections::BTreeSet;
use std::fmt;

use super::keys::is_layout_utility;
use super::StyleMap;

/// Style keys a component does not authorize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleViolation {
    /// Component whose declaration was checked.
    pub component: String,
    /// Offending keys, sorted.
    pub keys: Vec<String>,
}

impl fmt::Display for StyleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "component '{}' received unauthorized style keys: {}",
            self.component,
            self.keys.join(", ")
        )
    }
}

/// Checks `style` keys against layout utilities plus the component's `tokens`.
///
/// Returns the violation, if any, after logging it once at warn level. This
/// never blocks rendering: the allow-list documents what a component's
/// stylesheet consumes, it is not a security boundary.
///
/// ```rust
/// use pagetree_render::style::validate_style;
/// use serde_json::json;
/// use std::collections::BTreeSet;
///
/// let tokens: BTreeSet<String> = ["bg-color".to_string()].into();
/// let style = json!({ "bg-color": "red", "width": 10, "glow": "1" });
///
/// let violation = validate_style("Card", style.as_object(), &tokens).unwrap();
/// assert_eq!(violation.keys, vec!["glow".to_string()]);
/// ```
pub fn validate_style(
    component: &str,
    style: Option<&StyleMap>,
    tokens: &BTreeSet<String>,
) -> Option<StyleViolation> {
    let style = style?;

    let mut keys: Vec<String> = style
        .keys()
        .filter(|key| !is_layout_utility(key) && !tokens.contains(key.as_str()))
        .cloned()
        .collect();
    if keys.is_empty() {
        return None;
    }
    keys.sort();

    let violation = StyleViolation {
        component: component.to_string(),
        keys,
    };
    log::warn!("{}", violation);
    Some(violation)
}
