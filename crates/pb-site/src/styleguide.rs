//! The styleguide build pipeline.
//!
//! [`Styleguide`] ties the loaded configuration, the template engine, the
//! component catalog and the storage backend together and drives the build
//! in phases: `read` loads components and builds the page tree, `prepare`
//! lays down static assets, `write` renders everything to the target, and
//! `export` emits the partial bundle for downstream consumers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde_json::{Map, Value, json};

use pb_catalog::{CatalogLoader, ComponentRegistry, register_builtins};
use pb_config::Config;
use pb_storage::Storage;
use pb_template::{TemplateEngine, export_bundle, import_bundle};

use crate::error::SiteError;
use crate::facade::RenderFacade;
use crate::listing::{ComponentList, ListingRequest, write_previews};
use crate::page::Page;

/// Stylesheet written during `prepare` unless an asset mapping overrides it.
const DEFAULT_STYLESHEET: &str = include_str!("../assets/styleguide.css");

/// File name of the exported partial bundle.
const BUNDLE_FILE: &str = "partials.js";

/// A styleguide build rooted at a resolved configuration.
pub struct Styleguide {
    config: Config,
    target: PathBuf,
    engine: TemplateEngine,
    registry: ComponentRegistry,
    pages: Vec<Page>,
    storage: Arc<dyn Storage>,
}

impl Styleguide {
    /// Set up a styleguide from a resolved configuration.
    ///
    /// Registers the builtin components and any configured partial
    /// libraries into a fresh engine. Libraries that fail to load are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::MissingTarget`] when the configuration names
    /// no target directory.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Result<Self, SiteError> {
        let target = config.target.clone().ok_or(SiteError::MissingTarget)?;

        let mut engine = TemplateEngine::new();
        let mut registry = ComponentRegistry::new();
        register_builtins(&mut engine, &mut registry)?;
        load_partial_libs(storage.as_ref(), &mut engine, &config.partial_libs);

        Ok(Self {
            config,
            target,
            engine,
            registry,
            pages: Vec::new(),
            storage,
        })
    }

    /// Load the component catalog and build the page tree.
    ///
    /// Components register their views and partials into the engine, so
    /// everything they bring along is available when the page builds fan
    /// out afterwards.
    ///
    /// # Errors
    ///
    /// Fails on broken manifests and templates, unreadable page sources
    /// and render errors.
    pub fn read(&mut self) -> Result<(), SiteError> {
        let count = CatalogLoader::new(&mut self.engine, &mut self.registry)
            .load(&self.config.component_paths)?;
        tracing::info!(components = count, "catalog loaded");

        let facade = self.facade();
        let pages = self
            .config
            .pages
            .par_iter()
            .map(|declaration| Page::build_root(declaration, facade))
            .collect::<Result<Vec<_>, _>>()?;
        self.pages = pages;
        Ok(())
    }

    /// Write static assets into the target directory.
    ///
    /// The default stylesheet always goes out; configured asset mappings
    /// are copied on top of it.
    ///
    /// # Errors
    ///
    /// Propagates write and copy failures.
    pub fn prepare(&self) -> Result<(), SiteError> {
        let stylesheet = self.target.join("pb-assets").join("styleguide.css");
        self.storage.write(&stylesheet, DEFAULT_STYLESHEET)?;

        if self.config.assets.is_empty() {
            tracing::warn!("no additional assets configured");
            return Ok(());
        }
        for asset in &self.config.assets {
            let destination = self.target.join(&asset.target);
            let copied = self.storage.copy_dir(&asset.src, &destination)?;
            tracing::debug!(
                from = %asset.src.display(),
                to = %destination.display(),
                files = copied,
                "copied assets"
            );
        }
        Ok(())
    }

    /// Render the overview, every page and all preview fragments into the
    /// target directory.
    ///
    /// # Errors
    ///
    /// The first render or write failure anywhere in the tree aborts the
    /// phase.
    pub fn write(&self) -> Result<(), SiteError> {
        let facade = self.facade();
        let layout_context = self.layout_context();

        let overview = ComponentList::build(facade, &ListingRequest::all())?;
        overview.write(facade, &layout_context)?;

        let mut previews = Vec::new();
        for page in &self.pages {
            page.collect_previews(&mut previews);
        }
        write_previews(facade, previews)?;

        self.pages
            .par_iter()
            .try_for_each(|page| page.write(facade, &layout_context))?;

        tracing::info!(
            pages = self.pages.len(),
            target = %self.target.display(),
            "styleguide written"
        );
        Ok(())
    }

    /// Bundle the partials of the active namespace into `partials.js` in
    /// the config directory, for reuse by an application build.
    ///
    /// Only components in the active namespace contribute; components
    /// without partials are left out entirely.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn export(&self) -> Result<PathBuf, SiteError> {
        let partials = self
            .registry
            .all()
            .iter()
            .filter(|component| {
                component.namespace == self.config.namespace && !component.partials.is_empty()
            })
            .flat_map(|component| {
                component
                    .partials
                    .iter()
                    .map(|partial| (partial.name.as_str(), partial.source.as_str()))
            });
        let bundle = export_bundle(partials);

        let path = self.config.cwd.join(BUNDLE_FILE);
        self.storage.write(&path, &bundle)?;
        tracing::info!(bundle = %path.display(), "partials exported");
        Ok(path)
    }

    /// The configuration this styleguide was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolved output directory.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The page tree built by [`read`](Self::read).
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn facade(&self) -> RenderFacade<'_> {
        RenderFacade::new(
            &self.engine,
            &self.registry,
            self.storage.as_ref(),
            &self.config.namespace,
            &self.target,
            &self.config.cwd,
        )
    }

    fn layout_context(&self) -> Map<String, Value> {
        let mut context = Map::new();
        context.insert(
            "styleguide".to_owned(),
            json!({ "name": self.config.name, "version": self.config.version }),
        );
        context
    }
}

fn load_partial_libs(storage: &dyn Storage, engine: &mut TemplateEngine, libs: &[PathBuf]) {
    for path in libs {
        if let Err(err) = load_partial_lib(storage, engine, path) {
            tracing::warn!(lib = %path.display(), error = %err, "skipping partial library");
        }
    }
}

fn load_partial_lib(
    storage: &dyn Storage,
    engine: &mut TemplateEngine,
    path: &Path,
) -> Result<(), SiteError> {
    let source = storage.read(path)?;
    for (name, partial) in import_bundle(&source)? {
        engine.register(&name, &partial)?;
    }
    Ok(())
}
