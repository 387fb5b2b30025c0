//! Declarative component manifests.
//!
//! Components can be declared in YAML instead of Rust. A manifest carries
//! the descriptor fields and a MiniJinja template (see [`crate::template`]
//! for the variables it receives):
//!
//! ```yaml
//! name: Card
//! version: 1.2.0
//! description: Bordered content box
//! tokens: [bg-color, border-color]
//! runtime: "document.querySelectorAll('.card').forEach(initCard);"
//! runtime_placement: body
//! meta_schema:
//!   title: string
//! template: |
//!   <article {{ a11y }} class="card" style="{{ style }}">
//!     <h3>{{ meta.title }}</h3>{{ content }}
//!   </article>
//! ```
//!
//! [`load_manifest_dir`] walks a directory recursively and loads every
//! `.yaml` file, then every `.yml` file, each group in path order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::component::{Component, ComponentDescriptor, Runtime, ScriptPlacement};
use crate::template::JinjaTemplate;

/// Manifest file extensions, in load order.
pub const MANIFEST_EXTENSIONS: &[&str] = &[".yaml", ".yml"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("template of component '{component}' does not compile: {message}")]
    Template { component: String, message: String },

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ManifestError>,
    },
}

/// A component declared in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub runtime_placement: ScriptPlacement,
    #[serde(default)]
    pub meta_schema: Option<Value>,
    pub template: String,
}

impl ComponentManifest {
    pub fn from_yaml(source: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source).map_err(|e| ManifestError::InFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Compiles the template and builds the render unit.
    pub fn into_component(self) -> Result<Component, ManifestError> {
        let template =
            JinjaTemplate::new(&self.name, self.template).map_err(|e| ManifestError::Template {
                component: self.name.clone(),
                message: e.to_string(),
            })?;

        let mut descriptor =
            ComponentDescriptor::new(self.name, self.version, template).tokens(self.tokens);
        descriptor.description = self.description;
        descriptor.meta_schema = self.meta_schema;
        descriptor.runtime = self.runtime.map(|source| Runtime {
            source,
            placement: self.runtime_placement,
        });
        Ok(Component::new(descriptor))
    }
}

/// Loads every manifest under `dir` into components.
pub fn load_manifest_dir(dir: &Path) -> Result<Vec<Component>, ManifestError> {
    if !dir.is_dir() {
        return Err(ManifestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    walk_dir(dir, &mut files)?;

    let mut components = Vec::with_capacity(files.len());
    for ext in MANIFEST_EXTENSIONS {
        let mut group: Vec<_> = files
            .iter()
            .filter(|path| path.to_string_lossy().ends_with(ext))
            .collect();
        group.sort();
        for path in group {
            log::debug!("loading component manifest {}", path.display());
            let component = ComponentManifest::from_file(path)?
                .into_component()
                .map_err(|e| ManifestError::InFile {
                    path: path.clone(),
                    source: Box::new(e),
                })?;
            components.push(component);
        }
    }
    Ok(components)
}

fn walk_dir(current: &Path, files: &mut Vec<PathBuf>) -> Result<(), ManifestError> {
    let io_error = |source| ManifestError::Io {
        path: current.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(current).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}
