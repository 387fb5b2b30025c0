//! Render-wide state for one build session.
//!
//! [`RenderState`] records which component types requested a runtime script
//! while a tree was rendered, and collects advisory [`Diagnostic`]s. The page
//! assembler consumes the runtime set once to inject scripts into the page.
//!
//! One state belongs to one session. Call [`RenderState::clear`] (or create a
//! fresh state) before each independent page or build, otherwise script
//! requirements from a previous page leak into the next one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warn,
}

/// A non-fatal observation made while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub component: String,
    pub node_id: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warn => "warn",
        };
        write!(
            f,
            "[{}] {} #{}: {}",
            level, self.component, self.node_id, self.message
        )
    }
}

/// Mutable record of one render session.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    runtimes: BTreeMap<String, Runtime>,
    diagnostics: Vec<Diagnostic>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every runtime requirement and diagnostic.
    pub fn clear(&mut self) {
        self.runtimes.clear();
        self.diagnostics.clear();
    }

    /// Records that `component` needs its runtime script on the page.
    ///
    /// Repeated requests from the same component are recorded once.
    pub fn require_runtime(&mut self, component: &str, runtime: &Runtime) {
        if !self.runtimes.contains_key(component) {
            self.runtimes
                .insert(component.to_string(), runtime.clone());
        }
    }

    pub fn requires_runtime(&self, component: &str) -> bool {
        self.runtimes.contains_key(component)
    }

    /// Components that requested a runtime, sorted by name.
    pub fn required_components(&self) -> impl Iterator<Item = &str> {
        self.runtimes.keys().map(String::as_str)
    }

    /// Removes and returns the recorded runtimes, sorted by component name.
    pub fn take_runtimes(&mut self) -> Vec<(String, Runtime)> {
        std::mem::take(&mut self.runtimes).into_iter().collect()
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics at warn level.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
