//! Component discovery and loading.
//!
//! The loader walks the configured component roots looking for
//! `component.yaml` manifests, resolves every file the manifest references
//! against the manifest's directory, registers view and partial templates
//! into the engine, and puts the finished [`Component`] into the registry.
//!
//! Loading is fail-fast: a broken manifest, an unreadable referenced file or
//! a template that does not compile aborts the load with the first error.

use std::fs;
use std::path::{Path, PathBuf};

use pb_render::Doc;
use pb_template::{TemplateEngine, view_key};

use crate::component::{Component, Partial, View};
use crate::error::CatalogError;
use crate::manifest::ComponentManifest;
use crate::registry::ComponentRegistry;

/// Manifest filename looked for in every scanned directory.
const MANIFEST_FILENAME: &str = "component.yaml";

/// Walks component roots and loads every manifest found into the engine
/// and registry.
pub struct CatalogLoader<'a> {
    engine: &'a mut TemplateEngine,
    registry: &'a mut ComponentRegistry,
}

impl<'a> CatalogLoader<'a> {
    /// Create a loader writing into the given engine and registry.
    pub fn new(engine: &'a mut TemplateEngine, registry: &'a mut ComponentRegistry) -> Self {
        Self { engine, registry }
    }

    /// Load every component under the given roots, in order.
    ///
    /// A root that does not exist is skipped with a warning, so a styleguide
    /// without a `components/` directory still builds.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] hit while reading, parsing or
    /// compiling.
    pub fn load(&mut self, roots: &[PathBuf]) -> Result<usize, CatalogError> {
        let mut count = 0;
        for root in roots {
            if root.is_dir() {
                self.load_directory(root, &mut count)?;
            } else {
                tracing::warn!(path = %root.display(), "component path does not exist");
            }
        }
        Ok(count)
    }

    /// Load the manifest in `dir` if there is one, then recurse.
    ///
    /// Subdirectories are visited in name order so registry order (and with
    /// it listing order) does not depend on filesystem iteration order.
    fn load_directory(&mut self, dir: &Path, count: &mut usize) -> Result<(), CatalogError> {
        let manifest_path = dir.join(MANIFEST_FILENAME);
        if manifest_path.is_file() {
            self.load_component(dir, &manifest_path)?;
            *count += 1;
        }

        let entries = fs::read_dir(dir).map_err(|err| CatalogError::io(dir, err))?;
        let mut subdirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .map(|entry| entry.path())
            .collect();
        subdirs.sort();

        for subdir in subdirs {
            self.load_directory(&subdir, count)?;
        }
        Ok(())
    }

    /// Resolve one manifest into a registered component.
    fn load_component(&mut self, dir: &Path, manifest_path: &Path) -> Result<(), CatalogError> {
        let source = read(manifest_path)?;
        let manifest = ComponentManifest::parse(&source, manifest_path)?;
        let doc_entries = manifest.doc_entries(manifest_path)?;

        let mut component = Component::new(manifest.id);
        component.label = manifest.label;
        component.namespace = manifest.namespace.unwrap_or_default();
        component.tags = manifest.tags;
        component.view_context = manifest.view_context;

        for (label, file) in doc_entries {
            let path = dir.join(file);
            let markdown = read(&path)?;
            component.docs.push(Doc::from_markdown(label, &markdown));
        }

        for file in manifest.partials {
            let path = dir.join(&file);
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                return Err(CatalogError::manifest(
                    manifest_path,
                    format!("partial path {} has no file name", file.display()),
                ));
            };
            let partial_source = read(&path)?;
            self.engine.register(&name, &partial_source)?;
            component.partials.push(Partial {
                name,
                source: partial_source,
            });
        }

        for decl in manifest.states {
            let doc = match &decl.doc {
                Some(file) => {
                    let markdown = read(&dir.join(file))?;
                    Some(pb_render::render_markdown(&markdown))
                }
                None => None,
            };
            component.states.push(decl.resolve(&component.slug, doc));
        }

        if let Some(view_decl) = manifest.view {
            let (file, config) = view_decl.into_parts();
            let path = dir.join(&file);
            let view_source = read(&path)?;
            let key = view_key(&component.id);
            self.engine.register(&key, &view_source)?;
            component.view = Some(View {
                template_key: key,
                source_path: path,
                config,
            });
        }

        tracing::debug!(id = %component.id, path = %manifest_path.display(), "loaded component");
        self.registry.set(component);
        Ok(())
    }
}

/// Read a file, tying I/O failures to the path for the error report.
fn read(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|err| CatalogError::io(path, err))
}
