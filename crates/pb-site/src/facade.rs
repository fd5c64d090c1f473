//! Narrow rendering surface passed down the build.
//!
//! Pages and listings never see the whole styleguide. They get a
//! [`RenderFacade`]: render a named template, resolve a component, and the
//! handful of config-derived values the build needs (namespace, target,
//! cwd) plus the storage backend for reads and writes. The facade is a
//! bundle of shared borrows, so it is `Copy` and crosses rayon fan-outs
//! freely.

use std::path::Path;

use serde_json::Value;

use pb_catalog::{Component, ComponentRegistry};
use pb_storage::Storage;
use pb_template::{TemplateEngine, TemplateError};

/// Read-only rendering surface shared by every page and listing build.
#[derive(Clone, Copy)]
pub struct RenderFacade<'a> {
    engine: &'a TemplateEngine,
    registry: &'a ComponentRegistry,
    storage: &'a dyn Storage,
    namespace: &'a str,
    target: &'a Path,
    cwd: &'a Path,
}

impl<'a> RenderFacade<'a> {
    /// Bundle the shared build state into a facade.
    pub fn new(
        engine: &'a TemplateEngine,
        registry: &'a ComponentRegistry,
        storage: &'a dyn Storage,
        namespace: &'a str,
        target: &'a Path,
        cwd: &'a Path,
    ) -> Self {
        Self {
            engine,
            registry,
            storage,
            namespace,
            target,
            cwd,
        }
    }

    /// Render the template registered under `name` with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownTemplate`] for unregistered names
    /// and [`TemplateError::Render`] for failures inside the template.
    pub fn render_named(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        self.engine.render(name, context)
    }

    /// Resolve a component by id. Misses are logged by the registry and
    /// surface as `None`.
    #[must_use]
    pub fn resolve_component(&self, id: &str) -> Option<&'a Component> {
        self.registry.find(id)
    }

    /// All registered components in load order.
    #[must_use]
    pub fn all_components(&self) -> &'a [Component] {
        self.registry.all()
    }

    /// The storage backend for source reads and output writes.
    #[must_use]
    pub fn storage(&self) -> &'a dyn Storage {
        self.storage
    }

    /// Active component namespace. Empty means unnamespaced.
    #[must_use]
    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Output directory of the generated site.
    #[must_use]
    pub fn target(&self) -> &'a Path {
        self.target
    }

    /// Styleguide working directory; relative source paths resolve from it.
    #[must_use]
    pub fn cwd(&self) -> &'a Path {
        self.cwd
    }
}
