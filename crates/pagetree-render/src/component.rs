//! The component factory.
//!
//! A [`ComponentDescriptor`] declares a component: its name, semantic
//! version, the style tokens it understands, an optional runtime script and
//! its [`Template`]. [`Component::new`] wraps the template with the behavior
//! every component shares, producing the render unit stored in the
//! [`Registry`](crate::Registry).
//!
//! On each [`Component::render`] call:
//!
//! 1. the runtime script, if any, is recorded in the [`RenderState`]
//! 2. the node id is taken from the call or synthesized (with an info
//!    diagnostic)
//! 3. `meta.version` and `meta.createdAt` are defaulted, copying the caller's
//!    meta only when a default is injected
//! 4. style keys are checked against the component's tokens (warn only)
//! 5. style and dark-variant style are serialized to CSS
//! 6. the accessibility attribute string is synthesized from meta
//! 7. the template runs and its output is returned unmodified
//!
//! No HTML or CSS escaping is applied to meta or style values. Callers that
//! feed untrusted input must sanitize it beforehand.
//!
//! ```rust
//! use pagetree_render::{Component, ComponentDescriptor, RenderCall, RenderState};
//! use pagetree_render::template::TemplateContext;
//!
//! let button = Component::new(
//!     ComponentDescriptor::new("Button", "1.2.0", |ctx: &TemplateContext<'_>| {
//!         format!(r#"<button {} style="{}">{}</button>"#, ctx.a11y, ctx.style,
//!             ctx.meta_str("label").unwrap_or_default())
//!     })
//!     .token("bg-color"),
//! );
//!
//! let meta = serde_json::json!({ "label": "Save" }).as_object().cloned().unwrap();
//! let style = serde_json::json!({ "bg-color": "#0055ff" }).as_object().cloned().unwrap();
//! let mut state = RenderState::new();
//! let html = button
//!     .render(RenderCall::new(&meta, &[], &style).id("save"), &mut state)
//!     .unwrap();
//! assert_eq!(html, r#"<button id="save" style="--bg-color:#0055ff;">Save</button>"#);
//! ```

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::RenderError;
use crate::node::Meta;
use crate::state::{Diagnostic, DiagnosticLevel, RenderState};
use crate::style::{translate, validate_style, StyleMap};
use crate::template::{Template, TemplateContext};

/// Custom-property prefix for dark-variant declarations (`--dark-…`).
pub const DARK_VARIANT_PREFIX: &str = "dark";

/// Where a runtime script is injected in the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptPlacement {
    Head,
    #[default]
    Body,
}

/// An auxiliary script a component needs on any page that uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub source: String,
    #[serde(default)]
    pub placement: ScriptPlacement,
}

impl Runtime {
    pub fn body(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            placement: ScriptPlacement::Body,
        }
    }

    pub fn head(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            placement: ScriptPlacement::Head,
        }
    }
}

/// Documentation record for a component, for doc generators and tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDoc {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    /// Declared tokens, sorted. Layout utilities are implied.
    pub tokens: Vec<String>,
    pub meta_schema: Option<Value>,
    pub has_runtime: bool,
}

/// Declaration of a component, consumed by [`Component::new`].
#[derive(Clone)]
pub struct ComponentDescriptor {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    /// Free-form schema of the component's meta, for tooling only.
    pub meta_schema: Option<Value>,
    /// Style tokens the component authorizes on top of the layout utilities.
    pub tokens: BTreeSet<String>,
    pub runtime: Option<Runtime>,
    pub template: Arc<dyn Template>,
}

impl ComponentDescriptor {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        template: impl Template + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            meta_schema: None,
            tokens: BTreeSet::new(),
            runtime: None,
            template: Arc::new(template),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn meta_schema(mut self, schema: Value) -> Self {
        self.meta_schema = Some(schema);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.tokens.insert(token.into());
        self
    }

    pub fn tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("tokens", &self.tokens)
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}

/// Arguments of one render-unit invocation.
#[derive(Debug, Clone, Copy)]
pub struct RenderCall<'a> {
    pub meta: &'a Meta,
    pub children: &'a [String],
    pub style: &'a StyleMap,
    pub id: Option<&'a str>,
    /// Dark-variant style, serialized with the `--dark-` prefix.
    pub dark_style: Option<&'a StyleMap>,
}

impl<'a> RenderCall<'a> {
    pub fn new(meta: &'a Meta, children: &'a [String], style: &'a StyleMap) -> Self {
        Self {
            meta,
            children,
            style,
            id: None,
            dark_style: None,
        }
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn dark_style(mut self, dark_style: &'a StyleMap) -> Self {
        self.dark_style = Some(dark_style);
        self
    }
}

/// A render unit: a template wrapped with id, provenance, style and
/// accessibility handling.
#[derive(Debug, Clone)]
pub struct Component {
    descriptor: ComponentDescriptor,
}

impl Component {
    pub fn new(descriptor: ComponentDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn version(&self) -> &str {
        &self.descriptor.version
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.descriptor.tokens
    }

    pub fn runtime(&self) -> Option<&Runtime> {
        self.descriptor.runtime.as_ref()
    }

    pub fn doc(&self) -> ComponentDoc {
        let d = &self.descriptor;
        ComponentDoc {
            name: d.name.clone(),
            version: d.version.clone(),
            description: d.description.clone(),
            tokens: d.tokens.iter().cloned().collect(),
            meta_schema: d.meta_schema.clone(),
            has_runtime: d.runtime.is_some(),
        }
    }

    /// Renders one node's markup.
    ///
    /// Only template failures are errors; everything else is defaulted or
    /// reported as a diagnostic.
    pub fn render(
        &self,
        call: RenderCall<'_>,
        state: &mut RenderState,
    ) -> Result<String, RenderError> {
        let name = self.name();

        if let Some(runtime) = self.runtime() {
            state.require_runtime(name, runtime);
        }

        let id = match call.id {
            Some(id) => id.to_string(),
            None => {
                let id = synthesize_id(name);
                log::debug!("{} rendered without an id, assigned '{}'", name, id);
                state.push_diagnostic(Diagnostic {
                    level: DiagnosticLevel::Info,
                    component: name.to_string(),
                    node_id: id.clone(),
                    message: "no id provided, a generated id was assigned".to_string(),
                });
                id
            }
        };

        let meta = self.with_provenance(call.meta);

        if let Some(violation) = validate_style(name, Some(call.style), self.tokens()) {
            state.push_diagnostic(Diagnostic {
                level: DiagnosticLevel::Warn,
                component: name.to_string(),
                node_id: id.clone(),
                message: violation.to_string(),
            });
        }

        let style = translate(call.style, None);
        let dark_style = call
            .dark_style
            .map(|dark| translate(dark, Some(DARK_VARIANT_PREFIX)))
            .unwrap_or_default();
        let a11y = accessibility_attributes(&id, &meta);

        self.descriptor.template.render(&TemplateContext {
            component: name,
            meta: &meta,
            children: call.children,
            style: &style,
            a11y: &a11y,
            id: &id,
            dark_style: &dark_style,
        })
    }

    /// Defaults `version` and `createdAt`, borrowing when nothing is missing.
    fn with_provenance<'m>(&self, meta: &'m Meta) -> Cow<'m, Meta> {
        let mut meta = Cow::Borrowed(meta);
        if !meta.contains_key("version") {
            meta.to_mut()
                .insert("version".to_string(), Value::from(self.version()));
        }
        if !meta.contains_key("createdAt") {
            meta.to_mut().insert(
                "createdAt".to_string(),
                Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        meta
    }
}

impl From<ComponentDescriptor> for Component {
    fn from(descriptor: ComponentDescriptor) -> Self {
        Component::new(descriptor)
    }
}

/// A random id like `card-3f2a9c1e`.
fn synthesize_id(component: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", component.to_ascii_lowercase(), &suffix[..8])
}

/// Builds the attribute string every component places on its root element.
///
/// Always contains `id`. `audioDescription` becomes `aria-label`, `ariaRole`
/// becomes `role`, a truthy `ariaHidden` adds `aria-hidden="true"`, and other
/// `aria-*` meta keys pass through verbatim (except `aria-label` and
/// `aria-hidden`, which only come from the fields above).
pub fn accessibility_attributes(id: &str, meta: &Meta) -> String {
    let mut attrs = vec![format!(r#"id="{}""#, id)];

    if let Some(label) = meta.get("audioDescription").and_then(attribute_text) {
        attrs.push(format!(r#"aria-label="{}""#, label));
    }
    if let Some(role) = meta.get("ariaRole").and_then(attribute_text) {
        attrs.push(format!(r#"role="{}""#, role));
    }
    if meta.get("ariaHidden").is_some_and(is_truthy) {
        attrs.push(r#"aria-hidden="true""#.to_string());
    }

    let mut passthrough: Vec<_> = meta
        .iter()
        .filter(|(key, _)| {
            key.starts_with("aria-") && *key != "aria-label" && *key != "aria-hidden"
        })
        .filter_map(|(key, value)| attribute_text(value).map(|text| (key, text)))
        .collect();
    passthrough.sort_by(|a, b| a.0.cmp(b.0));
    attrs.extend(
        passthrough
            .into_iter()
            .map(|(key, text)| format!(r#"{}="{}""#, key, text)),
    );

    attrs.join(" ")
}

fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
