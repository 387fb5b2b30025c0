//! Component template abstraction.
//!
//! A component's markup comes from a [`Template`]. The renderer treats
//! templates as opaque: it hands them a [`TemplateContext`] and takes back a
//! string. Two implementations are provided:
//!
//! - Closures `Fn(&TemplateContext) -> String`, for components written in Rust.
//! - [`JinjaTemplate`], a MiniJinja template, for components declared in
//!   manifests.
//!
//! # Jinja template variables
//!
//! | Variable | Content |
//! |----------|---------|
//! | `meta` | the node's meta mapping, with `version`/`createdAt` defaulted |
//! | `children` | list of rendered child HTML strings |
//! | `content` | the children concatenated |
//! | `style` | CSS declaration string for the `style` attribute |
//! | `dark_style` | dark-variant declarations (empty unless enabled) |
//! | `a11y` | attribute string: `id`, `aria-*`, `role` |
//! | `id` | the node id |
//! | `component` | the component name |
//!
//! Filters `css` (translate a nested style mapping) and `dark` (dark-theme
//! counterpart of a color), and the function `contrast(fg, bg)` are available.
//! Auto-escaping is disabled: values are inserted verbatim.
//!
//! ```rust
//! use pagetree_render::template::{JinjaTemplate, Template, TemplateContext};
//!
//! let tmpl = JinjaTemplate::new("Box", r#"<div {{ a11y }} style="{{ style }}">{{ content }}</div>"#).unwrap();
//! let meta = Default::default();
//! let children = vec!["<p>hi</p>".to_string()];
//! let ctx = TemplateContext {
//!     component: "Box",
//!     meta: &meta,
//!     children: &children,
//!     style: "width:10px;",
//!     a11y: r#"id="b1""#,
//!     id: "b1",
//!     dark_style: "",
//! };
//! assert_eq!(
//!     tmpl.render(&ctx).unwrap(),
//!     r#"<div id="b1" style="width:10px;"><p>hi</p></div>"#
//! );
//! ```

use minijinja::{context, AutoEscape, Environment, Error, ErrorKind, State, Value};

use crate::a11y::{auto_dark_color, validate_contrast};
use crate::error::RenderError;
use crate::node::Meta;
use crate::style::{translate, StyleMap};

/// Everything a template receives for one node.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub component: &'a str,
    pub meta: &'a Meta,
    /// Rendered children, in document order.
    pub children: &'a [String],
    pub style: &'a str,
    pub a11y: &'a str,
    pub id: &'a str,
    pub dark_style: &'a str,
}

impl<'a> TemplateContext<'a> {
    /// The children concatenated in order.
    pub fn children_html(&self) -> String {
        self.children.concat()
    }

    /// Serializes a nested style mapping with the style translator.
    pub fn translate(&self, style: &StyleMap) -> String {
        translate(style, None)
    }

    /// A meta value as a string, if it is one.
    pub fn meta_str(&self, key: &str) -> Option<&'a str> {
        self.meta.get(key).and_then(|v| v.as_str())
    }

    /// Deserializes the meta mapping into a component-specific type.
    ///
    /// Unknown fields are ignored unless the target type denies them.
    pub fn meta_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, RenderError> {
        serde_json::from_value(serde_json::Value::Object(self.meta.clone()))
            .map_err(|e| RenderError::template(self.component, e))
    }

    /// A foreground color with sufficient contrast against `background`.
    pub fn contrast(&self, foreground: &str, background: &str) -> String {
        validate_contrast(foreground, background, self.component, self.id)
    }
}

/// Produces a component's markup.
pub trait Template: Send + Sync {
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<String, RenderError>;
}

impl<F> Template for F
where
    F: Fn(&TemplateContext<'_>) -> String + Send + Sync,
{
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<String, RenderError> {
        Ok(self(ctx))
    }
}

/// A MiniJinja-backed component template.
pub struct JinjaTemplate {
    env: Environment<'static>,
    name: String,
}

impl JinjaTemplate {
    /// Compiles `source` under `name`.
    ///
    /// Syntax errors are reported here rather than at render time.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        register_filters(&mut env);
        env.add_template_owned(name.clone(), source.into())?;
        Ok(Self { env, name })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Template for JinjaTemplate {
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<String, RenderError> {
        let tmpl = self
            .env
            .get_template(&self.name)
            .map_err(|e| RenderError::template(ctx.component, e))?;
        tmpl.render(context! {
            component => ctx.component,
            meta => ctx.meta,
            children => ctx.children,
            content => ctx.children_html(),
            style => ctx.style,
            dark_style => ctx.dark_style,
            a11y => ctx.a11y,
            id => ctx.id,
        })
        .map_err(|e| RenderError::template(ctx.component, e))
    }
}

/// Registers the component filters and functions with a MiniJinja environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("css", css_filter);
    env.add_filter("dark", dark_filter);
    env.add_function("contrast", contrast_function);
}

fn css_filter(value: Value) -> Result<String, Error> {
    let json = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::BadSerialization, e.to_string()))?;
    match json {
        serde_json::Value::Object(map) => Ok(translate(&map, None)),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(Error::new(
            ErrorKind::InvalidOperation,
            "css filter expects a mapping",
        )),
    }
}

fn dark_filter(color: String, is_background: Option<bool>) -> String {
    auto_dark_color(&color, is_background.unwrap_or(false))
}

fn contrast_function(state: &State, foreground: String, background: String) -> String {
    let lookup = |name: &str| {
        state
            .lookup(name)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    };
    validate_contrast(&foreground, &background, &lookup("component"), &lookup("id"))
}
