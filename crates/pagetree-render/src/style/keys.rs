//! The global key sets shared by the translator and every component.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Style keys always rendered as direct CSS declarations, whatever the component.
///
/// Components never need to declare these as tokens; they are implicitly part
/// of every component's allowed key set.
pub static LAYOUT_UTILITIES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "position",
        "display",
        "width",
        "height",
        "min-width",
        "max-width",
        "min-height",
        "max-height",
        "top",
        "left",
        "right",
        "bottom",
        "x",
        "y",
        "z-index",
        "margin",
        "margin-top",
        "margin-right",
        "margin-bottom",
        "margin-left",
        "padding",
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
        "gap",
        "border-radius",
        "overflow",
        "opacity",
        "transform",
        "flex",
        "flex-grow",
        "flex-shrink",
        "flex-basis",
        "align-self",
        "justify-self",
        "order",
        "grid-column",
        "grid-row",
        "visibility",
        "box-sizing",
        "cursor",
    ]
    .into_iter()
    .collect()
});

/// Length-valued keys: bare numbers get a `px` suffix.
pub static PX_PROPERTIES: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "width",
        "height",
        "min-width",
        "max-width",
        "min-height",
        "max-height",
        "top",
        "left",
        "bottom",
        "right",
        "x",
        "y",
        "gap",
        "stack-gap",
        "section-py",
        "border-radius",
        "font-size",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `key` is a layout utility.
pub fn is_layout_utility(key: &str) -> bool {
    LAYOUT_UTILITIES.contains(key)
}

/// Returns true if a numeric value for `key` is a pixel length.
///
/// Matches the key itself or its prefix before the first hyphen, so
/// `width-md` is treated like `width`.
pub fn takes_px(key: &str) -> bool {
    if PX_PROPERTIES.contains(key) {
        return true;
    }
    key.split_once('-')
        .map(|(prefix, _)| PX_PROPERTIES.contains(prefix))
        .unwrap_or(false)
}
