//! Component catalog for pb.
//!
//! This crate owns the component side of a styleguide: the data model
//! ([`Component`] with its view, states, docs and partials), the ordered
//! [`ComponentRegistry`], the [`CatalogLoader`] that discovers
//! `component.yaml` manifests on disk, and the built-in layout components
//! every styleguide starts from.
//!
//! Loading is a read-phase concern; once the loader has run, the registry
//! and every component in it are immutable for the rest of the build.

mod builtin;
mod component;
mod error;
mod loader;
mod manifest;
mod registry;

pub use builtin::{
    BUILTIN_NAMESPACE, COMPONENT_ID, COMPONENT_LIST_ID, LAYOUT_ID, PAGE_ID, register_builtins,
};
pub use component::{Component, Partial, State, View};
pub use error::CatalogError;
pub use loader::CatalogLoader;
pub use registry::ComponentRegistry;
