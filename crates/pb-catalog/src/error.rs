//! Catalog loading errors.

use std::path::PathBuf;

use thiserror::Error;

use pb_template::TemplateError;

/// Errors raised while discovering and loading components.
///
/// Loading is fail-fast: the first broken manifest or unreadable referenced
/// file aborts the whole catalog load.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A manifest or a file it references could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A `component.yaml` could not be parsed or is missing required fields.
    #[error("invalid manifest {}: {reason}", path.display())]
    Manifest {
        /// The manifest file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A view or partial template failed to compile.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl CatalogError {
    /// Shorthand for an I/O failure tied to a path.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a manifest problem tied to a path.
    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
