//! Error types for tree rendering.
//!
//! [`RenderError`] is the error returned by every rendering entry point. The
//! first error raised anywhere in a tree aborts the whole render: there is no
//! partial output for a broken subtree.
//!
//! Advisory problems (unauthorized style tokens, missing ids, missing
//! provenance fields) are never errors. They are reported through
//! [`Diagnostic`](crate::state::Diagnostic)s instead.

use thiserror::Error;

/// Error type for rendering operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A node's `type` has no entry in the registry.
    #[error("unknown component: '{component}' is not registered")]
    UnknownComponent { component: String },

    /// The tree is deeper than the configured ceiling.
    #[error("maximum recursion depth exceeded at depth {depth}")]
    RecursionLimitExceeded { depth: usize },

    /// A template engine failed while rendering a component.
    #[error("template error in component '{component}': {message}")]
    Template { component: String, message: String },
}

impl RenderError {
    pub(crate) fn unknown(component: impl Into<String>) -> Self {
        RenderError::UnknownComponent {
            component: component.into(),
        }
    }

    pub(crate) fn template(component: impl Into<String>, err: impl std::fmt::Display) -> Self {
        RenderError::Template {
            component: component.into(),
            message: err.to_string(),
        }
    }
}
