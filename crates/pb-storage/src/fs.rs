//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for writing build output to the local filesystem.

use std::fs;
use std::path::Path;

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Writes files relative to whatever paths the build pipeline hands it and
/// creates missing parent directories on the way. Reads are plain UTF-8
/// file reads.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn io_error(err: std::io::Error, path: &Path) -> StorageError {
    StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND)
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<usize, StorageError> {
    fs::create_dir_all(to).map_err(|e| io_error(e, to))?;

    let mut copied = 0;
    for entry in fs::read_dir(from).map_err(|e| io_error(e, from))? {
        let entry = entry.map_err(|e| io_error(e, from))?;
        let src = entry.path();
        let dest = to.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| io_error(e, &src))?;

        if file_type.is_dir() {
            copied += copy_dir_recursive(&src, &dest)?;
        } else {
            fs::copy(&src, &dest).map_err(|e| io_error(e, &src))?;
            copied += 1;
        }
    }

    Ok(copied)
}

impl Storage for FsStorage {
    fn write(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| io_error(e, parent))?;
        }
        fs::write(path, contents).map_err(|e| io_error(e, path))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|e| io_error(e, path))
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> Result<usize, StorageError> {
        if !from.is_dir() {
            return Err(StorageError::not_found(from).with_backend(BACKEND));
        }
        let copied = copy_dir_recursive(from, to)?;
        tracing::debug!(from = %from.display(), to = %to.display(), copied, "copied directory");
        Ok(copied)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
