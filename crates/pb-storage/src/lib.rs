//! Output storage abstraction for the pb styleguide generator.
//!
//! This crate provides a [`Storage`] trait for abstracting the write side of a
//! styleguide build from the underlying storage backend. This enables:
//!
//! - **Unit testing** of the build pipeline without touching the real filesystem
//! - **Backend flexibility** (filesystem today, object stores later)
//! - **Clean separation** between page assembly logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `write()`, `read()`, `copy_dir()` and `exists()` methods
//! - [`FsStorage`] implementation for the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pb_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! storage.write(Path::new("styleguide/index.html"), "<html></html>")?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
