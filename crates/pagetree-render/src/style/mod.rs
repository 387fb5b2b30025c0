//! Style mappings and their CSS serialization.
//!
//! A node's `style` is a flat mapping from key to scalar value. Keys fall into
//! two groups:
//!
//! - Layout utilities: a fixed, global set of keys (see [`LAYOUT_UTILITIES`])
//!   rendered as literal CSS declarations (`width:200px;`).
//! - Tokens: everything else, rendered as CSS custom properties
//!   (`--bg-color:red;`) that a component's stylesheet consumes.
//!
//! Each component declares which tokens it understands. [`validate_style`]
//! checks a mapping against that declaration and reports, but never rejects,
//! unknown keys.
//!
//! ## Example
//!
//! ```rust
//! use pagetree_render::style::translate;
//! use serde_json::json;
//!
//! let style = json!({ "bg-color": "red", "width": 200 });
//! let css = translate(style.as_object().unwrap(), None);
//! assert_eq!(css, "--bg-color:red; width:200px;");
//! ```

mod keys;
mod translate;
mod validate;

pub use keys::{is_layout_utility, takes_px, LAYOUT_UTILITIES, PX_PROPERTIES};
pub use translate::{css_value, property_name, translate};
pub use validate::{validate_style, StyleViolation};

/// A flat style mapping (`key -> string | number`).
///
/// [`translate`] always emits keys in sorted order.
pub type StyleMap = serde_json::Map<String, serde_json::Value>;
