//! Renderer configuration.
//!
//! Options can be built in code or loaded from YAML/JSON; every field has a
//! default, so an empty document is valid:
//!
//! ```yaml
//! max_depth: 64
//! dark_variants: auto   # or: disabled
//! ```

use serde::{Deserialize, Serialize};

/// Nodes at this depth or deeper are refused. The root is depth 1.
pub const MAX_RENDER_DEPTH: usize = 64;

/// How dark-theme style variants are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkVariants {
    /// No dark declarations are emitted.
    #[default]
    Disabled,
    /// Color tokens are shifted with `auto_dark_color` and emitted as
    /// `--dark-*` custom properties next to the regular ones.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub max_depth: usize,
    pub dark_variants: DarkVariants,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_RENDER_DEPTH,
            dark_variants: DarkVariants::Disabled,
        }
    }
}

impl RenderOptions {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn dark_variants(mut self, dark_variants: DarkVariants) -> Self {
        self.dark_variants = dark_variants;
        self
    }
}
