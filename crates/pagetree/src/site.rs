//! Site assembly: from a site description to finished HTML pages.
//!
//! A [`Site`] is the JSON aggregate a build starts from:
//!
//! ```json
//! {
//!   "meta": { "appName": "Acme", "version": "1.0.0" },
//!   "style": { "brand-color": "#0055ff" },
//!   "layout": { "header": { "type": "Nav" }, "footer": { "type": "Footer" } },
//!   "pages": [
//!     { "slug": "index", "title": "Home", "content": { "type": "Section" } }
//!   ]
//! }
//! ```
//!
//! [`Site::build`] renders the layout header and footer once, then every page
//! in order. Each page gets its own render state, seeded with the runtime
//! requirements and diagnostics of the layout, so scripts never leak from one
//! page into the next. The global `style` becomes a `:root{…}` block of custom properties.

use std::path::{Path, PathBuf};

use pagetree_render::{
    minify_html, translate, Diagnostic, Node, Registry, RenderError, RenderOptions, RenderState,
    Renderer, Runtime, ScriptPlacement, StyleMap,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("page '{slug}': {source}")]
    Page {
        slug: String,
        #[source]
        source: RenderError,
    },

    #[error("layout {part}: {source}")]
    Layout {
        part: &'static str,
        #[source]
        source: RenderError,
    },

    #[error("invalid site description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Build options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    /// Minify every page after assembly.
    pub minify: bool,
    /// Value of the document's `lang` attribute.
    pub lang: String,
    pub render: RenderOptions,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            minify: true,
            lang: "en".to_string(),
            render: RenderOptions::default(),
        }
    }
}

impl SiteOptions {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeta {
    #[serde(default)]
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Nodes shared by every page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: Node,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub meta: SiteMeta,
    /// Global tokens, emitted once per page on `:root`.
    #[serde(default)]
    pub style: StyleMap,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// One finished page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub slug: String,
    pub title: String,
    pub html: String,
    /// Advisory diagnostics raised while rendering the page, layout included.
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderedPage {
    /// Output file name: `index.html` for the root slug, `{slug}.html` otherwise.
    pub fn file_name(&self) -> String {
        match self.slug.trim_matches('/') {
            "" | "index" => "index.html".to_string(),
            slug => format!("{}.html", slug),
        }
    }
}

impl Site {
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders every page, in order.
    ///
    /// The first render error aborts the build.
    pub fn build(
        &self,
        registry: &Registry,
        options: &SiteOptions,
    ) -> Result<Vec<RenderedPage>, SiteError> {
        let renderer = Renderer::with_options(registry, options.render.clone());

        let mut seed = RenderState::new();
        let header = render_layout(&renderer, self.layout.header.as_ref(), "header", &mut seed)?;
        let footer = render_layout(&renderer, self.layout.footer.as_ref(), "footer", &mut seed)?;

        let global_css = translate(&self.style, None);
        let mut state = RenderState::new();
        let mut pages = Vec::with_capacity(self.pages.len());

        for page in &self.pages {
            state.clone_from(&seed);
            let content = renderer
                .render(&page.content, &mut state)
                .map_err(|source| SiteError::Page {
                    slug: page.slug.clone(),
                    source,
                })?;

            let title = self.page_title(page);
            let html = Document {
                lang: &options.lang,
                title: &title,
                generator: self.generator().as_deref(),
                global_css: &global_css,
                header: &header,
                content: &content,
                footer: &footer,
            }
            .assemble();
            let html = inject_runtimes(&html, &state.take_runtimes());

            log::debug!("built page '{}'", page.slug);
            pages.push(RenderedPage {
                slug: page.slug.clone(),
                title,
                html: finish(html, options),
                diagnostics: state.take_diagnostics(),
            });
        }
        Ok(pages)
    }

    /// `"{appName} | {page title}"`, where the page title falls back to the
    /// content's `meta.title`, then to the slug.
    fn page_title(&self, page: &Page) -> String {
        let page_title = page
            .title
            .as_deref()
            .or_else(|| page.content.meta.get("title").and_then(|v| v.as_str()))
            .or_else(|| Some(page.slug.as_str()).filter(|s| !s.is_empty()));

        match (self.meta.app_name.as_str(), page_title) {
            ("", Some(title)) => title.to_string(),
            (app, None) => app.to_string(),
            (app, Some(title)) => format!("{} | {}", app, title),
        }
    }

    fn generator(&self) -> Option<String> {
        match (&self.meta.app_name, &self.meta.version) {
            (name, Some(version)) if !name.is_empty() => Some(format!("{} {}", name, version)),
            _ => None,
        }
    }
}

fn render_layout(
    renderer: &Renderer<'_>,
    node: Option<&Node>,
    part: &'static str,
    state: &mut RenderState,
) -> Result<String, SiteError> {
    match node {
        Some(node) => renderer
            .render(node, state)
            .map_err(|source| SiteError::Layout { part, source }),
        None => Ok(String::new()),
    }
}

/// Renders a single tree as a complete HTML document.
pub fn render_document(
    registry: &Registry,
    node: &Node,
    title: &str,
    options: &SiteOptions,
) -> Result<String, SiteError> {
    let mut state = RenderState::new();
    let content = Renderer::with_options(registry, options.render.clone()).render(node, &mut state)?;
    let html = Document {
        lang: &options.lang,
        title,
        generator: None,
        global_css: "",
        header: "",
        content: &content,
        footer: "",
    }
    .assemble();
    Ok(finish(
        inject_runtimes(&html, &state.take_runtimes()),
        options,
    ))
}

fn finish(html: String, options: &SiteOptions) -> String {
    if options.minify {
        minify_html(&html)
    } else {
        html
    }
}

struct Document<'a> {
    lang: &'a str,
    title: &'a str,
    generator: Option<&'a str>,
    global_css: &'a str,
    header: &'a str,
    content: &'a str,
    footer: &'a str,
}

impl Document<'_> {
    fn assemble(&self) -> String {
        let generator = self
            .generator
            .map(|g| format!("<meta name=\"generator\" content=\"{}\">\n", g))
            .unwrap_or_default();
        let root_style = if self.global_css.is_empty() {
            String::new()
        } else {
            format!("<style>:root{{{}}}</style>\n", self.global_css)
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{}<title>{}</title>
{}</head>
<body>
{}
<main>{}</main>
{}
</body>
</html>
"#,
            self.lang, generator, self.title, root_style, self.header, self.content, self.footer
        )
    }
}

/// Inserts runtime scripts: head scripts before the first `</head>`, body
/// scripts before the last `</body>`, each group ordered as given.
///
/// Without a `</head>` the head scripts join the body group; without a
/// `</body>` the scripts are appended.
pub fn inject_runtimes(html: &str, runtimes: &[(String, Runtime)]) -> String {
    let scripts = |placement: ScriptPlacement| -> String {
        runtimes
            .iter()
            .filter(|(_, runtime)| runtime.placement == placement)
            .map(|(component, runtime)| {
                format!(
                    r#"<script data-component="{}">{}</script>"#,
                    component, runtime.source
                )
            })
            .collect()
    };
    let head = scripts(ScriptPlacement::Head);
    let mut body = scripts(ScriptPlacement::Body);
    let mut html = html.to_string();

    if !head.is_empty() {
        match html.to_ascii_lowercase().find("</head>") {
            Some(at) => html.insert_str(at, &head),
            None => body.insert_str(0, &head),
        }
    }
    if !body.is_empty() {
        match html.to_ascii_lowercase().rfind("</body>") {
            Some(at) => html.insert_str(at, &body),
            None => html.push_str(&body),
        }
    }
    html
}

/// Writes pages under `dir`, creating directories as needed.
///
/// Returns the written paths in page order.
pub fn write_pages(pages: &[RenderedPage], dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| SiteError::Io { path, source }
    };

    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let path = dir.join(page.file_name());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        std::fs::write(&path, &page.html).map_err(io_error(&path))?;
        written.push(path);
    }
    Ok(written)
}
