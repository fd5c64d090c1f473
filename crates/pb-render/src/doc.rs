//! Labelled documentation fragments.

use std::path::Path;

use pb_storage::{Storage, StorageError};

use crate::markdown::render_markdown;

/// A rendered documentation fragment with its display label.
///
/// Docs appear in two places: attached to a component (usage notes, state
/// descriptions) and as the body of markdown pages. In both cases the label
/// comes from configuration and the body from a markdown file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doc {
    /// Display label, e.g. "Usage".
    pub label: String,
    /// Rendered HTML fragment.
    pub html: String,
}

impl Doc {
    /// Build a doc from an already-loaded markdown source.
    #[must_use]
    pub fn from_markdown(label: impl Into<String>, source: &str) -> Self {
        Self {
            label: label.into(),
            html: render_markdown(source),
        }
    }

    /// Load and render a markdown file through the given storage backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file cannot be read.
    pub fn load(
        storage: &dyn Storage,
        path: &Path,
        label: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let source = storage.read(path)?;
        Ok(Self::from_markdown(label, &source))
    }
}

#[cfg(test)]
mod tests {
    use pb_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_markdown_renders_body() {
        let doc = Doc::from_markdown("Usage", "# Button\n\nClick it.");

        assert_eq!(doc.label, "Usage");
        assert_eq!(doc.html, "<h1>Button</h1>\n<p>Click it.</p>\n");
    }

    #[test]
    fn test_load_reads_through_storage() {
        let storage = MockStorage::new().with_file("components/button/usage.md", "**bold**");

        let doc = Doc::load(
            &storage,
            Path::new("components/button/usage.md"),
            "Usage",
        )
        .unwrap();

        assert_eq!(doc.html, "<p><strong>bold</strong></p>\n");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let storage = MockStorage::new();

        let result = Doc::load(&storage, Path::new("missing.md"), "Usage");

        assert!(result.is_err());
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let storage = MockStorage::new().with_file("intro.md", "# Welcome\n\nHello.");

        let first = Doc::load(&storage, Path::new("intro.md"), "Intro").unwrap();
        let second = Doc::load(&storage, Path::new("intro.md"), "Intro").unwrap();

        assert_eq!(first, second);
    }
}
