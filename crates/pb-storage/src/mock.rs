//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing the build pipeline without
//! filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores files in memory, keyed by path. Use the builder methods to seed
/// the mock with source files, then inspect what the pipeline wrote through
/// the accessor methods.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pb_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_file("docs/intro.md", "# Intro");
///
/// storage.write(Path::new("out/index.html"), "<html></html>").unwrap();
/// assert_eq!(storage.file_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mock with a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), contents.into());
        self
    }

    /// Paths of all stored files, in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().unwrap().keys().cloned().collect()
    }

    /// Content stored at `path`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// Number of stored files.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.read().unwrap().len()
    }
}

impl Storage for MockStorage {
    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> Result<usize, StorageError> {
        let mut files = self.files.write().unwrap();
        let entries: Vec<(PathBuf, String)> = files
            .iter()
            .filter_map(|(path, contents)| {
                path.strip_prefix(from)
                    .ok()
                    .map(|rel| (to.join(rel), contents.clone()))
            })
            .collect();

        if entries.is_empty() {
            return Err(StorageError::not_found(from).with_backend(BACKEND));
        }

        let copied = entries.len();
        files.extend(entries);
        Ok(copied)
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.read().unwrap();
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_mock_storage_is_send_sync() {
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_is_empty() {
        let storage = MockStorage::new();

        assert_eq!(storage.file_count(), 0);
        assert!(storage.paths().is_empty());
    }

    #[test]
    fn test_with_file_seeds_content() {
        let storage = MockStorage::new().with_file("docs/intro.md", "# Intro");

        assert_eq!(
            storage.read(Path::new("docs/intro.md")).unwrap(),
            "# Intro"
        );
    }

    #[test]
    fn test_write_then_read() {
        let storage = MockStorage::new();

        storage.write(Path::new("out/index.html"), "<html></html>").unwrap();

        assert_eq!(
            storage.contents("out/index.html"),
            Some("<html></html>".to_owned())
        );
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let storage = MockStorage::new();

        let err = storage.read(Path::new("missing.md")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_copy_dir_copies_prefixed_entries() {
        let storage = MockStorage::new()
            .with_file("assets/site.css", "body {}")
            .with_file("assets/img/logo.svg", "<svg/>")
            .with_file("other.txt", "x");

        let copied = storage
            .copy_dir(Path::new("assets"), Path::new("out/assets"))
            .unwrap();

        assert_eq!(copied, 2);
        assert_eq!(storage.contents("out/assets/site.css"), Some("body {}".to_owned()));
        assert_eq!(storage.contents("out/assets/img/logo.svg"), Some("<svg/>".to_owned()));
    }

    #[test]
    fn test_copy_dir_missing_source_fails() {
        let storage = MockStorage::new().with_file("other.txt", "x");

        let err = storage
            .copy_dir(Path::new("assets"), Path::new("out"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_exists_covers_files_and_directories() {
        let storage = MockStorage::new().with_file("assets/css/site.css", "body {}");

        assert!(storage.exists(Path::new("assets/css/site.css")));
        assert!(storage.exists(Path::new("assets")));
        assert!(!storage.exists(Path::new("missing")));
    }

    #[test]
    fn test_paths_are_sorted() {
        let storage = MockStorage::new()
            .with_file("b.txt", "2")
            .with_file("a.txt", "1");

        assert_eq!(
            storage.paths(),
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
    }
}
