//! Template error types.

use thiserror::Error;

/// Errors surfaced by template registration, rendering and bundle parsing.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template source failed to parse at registration time.
    #[error("Failed to compile template '{name}': {source}")]
    Compile {
        /// Registered template name.
        name: String,
        /// Underlying engine error.
        #[source]
        source: minijinja::Error,
    },

    /// A registered template failed while rendering.
    #[error("Failed to render template '{name}': {source}")]
    Render {
        /// Registered template name.
        name: String,
        /// Underlying engine error.
        #[source]
        source: minijinja::Error,
    },

    /// A render was requested for a name nothing was registered under.
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    /// A partial bundle line could not be parsed back into a template.
    #[error("Invalid partial bundle at line {line}: {reason}")]
    InvalidBundle {
        /// 1-based line number in the bundle.
        line: usize,
        /// What went wrong with the line.
        reason: String,
    },
}
