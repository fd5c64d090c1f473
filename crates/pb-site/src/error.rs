//! Site build errors.

use thiserror::Error;

use pb_catalog::CatalogError;
use pb_storage::StorageError;
use pb_template::TemplateError;

/// Errors raised while building and writing a styleguide.
///
/// The build is fail-fast throughout: the first error in any phase aborts
/// the run. Component lookup misses and unknown page types are warnings,
/// not errors, and never show up here.
#[derive(Debug, Error)]
pub enum SiteError {
    /// No output directory anywhere: neither the config nor the CLI named
    /// a target.
    #[error("no target directory configured for the styleguide")]
    MissingTarget,

    /// Component catalog loading failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A template failed to render or was never registered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Reading a source or writing an output file failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
