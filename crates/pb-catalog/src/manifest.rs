//! `component.yaml` manifest parsing.
//!
//! The manifest is the raw declaration shape; resolution into a
//! [`Component`](crate::Component) happens in the loader, which owns the
//! file reads. Everything here is pure parsing and normalization, so it
//! stays easy to test without a filesystem.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::component::State;
use crate::error::CatalogError;

/// Raw component declaration as parsed from `component.yaml`.
///
/// File references are relative to the manifest's directory.
#[derive(Debug, Deserialize)]
pub(crate) struct ComponentManifest {
    pub id: String,
    pub label: Option<String>,
    pub namespace: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub view: Option<ViewDecl>,
    #[serde(default)]
    pub view_context: Map<String, Value>,
    #[serde(default)]
    docs: serde_yaml::Mapping,
    #[serde(default)]
    pub partials: Vec<PathBuf>,
    #[serde(default)]
    pub states: Vec<StateDecl>,
}

impl ComponentManifest {
    /// Parse a manifest source.
    pub(crate) fn parse(source: &str, path: &Path) -> Result<Self, CatalogError> {
        serde_yaml::from_str(source).map_err(|err| CatalogError::manifest(path, err.to_string()))
    }

    /// Doc declarations in document order as (label, file) pairs.
    ///
    /// Docs are written as a YAML mapping of label to markdown file; both
    /// sides must be strings.
    pub(crate) fn doc_entries(&self, path: &Path) -> Result<Vec<(String, PathBuf)>, CatalogError> {
        let mut entries = Vec::with_capacity(self.docs.len());
        for (key, value) in &self.docs {
            let (Some(label), Some(file)) = (key.as_str(), value.as_str()) else {
                return Err(CatalogError::manifest(
                    path,
                    "docs entries must map a label to a markdown file",
                ));
            };
            entries.push((label.to_owned(), PathBuf::from(file)));
        }
        Ok(entries)
    }
}

/// View declaration: a bare template file, or a file with context defaults.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ViewDecl {
    File(PathBuf),
    Full {
        file: PathBuf,
        #[serde(default)]
        context: Map<String, Value>,
    },
}

impl ViewDecl {
    /// Split into the template file and its context defaults.
    pub(crate) fn into_parts(self) -> (PathBuf, Map<String, Value>) {
        match self {
            Self::File(file) => (file, Map::new()),
            Self::Full { file, context } => (file, context),
        }
    }
}

/// Raw state declaration.
#[derive(Debug, Deserialize)]
pub(crate) struct StateDecl {
    pub label: String,
    pub slug: Option<String>,
    pub doc: Option<PathBuf>,
    pub context: Option<ContextDecl>,
}

impl StateDecl {
    /// Resolve into a [`State`].
    ///
    /// The slug defaults to the slugified label and is always prefixed with
    /// the component slug, which keeps preview file paths disjoint across
    /// components. `doc` is the state doc already rendered to HTML.
    pub(crate) fn resolve(self, component_slug: &str, doc: Option<String>) -> State {
        let local = self
            .slug
            .unwrap_or_else(|| slug::slugify(&self.label));
        State {
            label: self.label,
            slug: format!("{component_slug}-{local}"),
            doc,
            contexts: self
                .context
                .map_or_else(|| vec![Map::new()], ContextDecl::into_contexts),
        }
    }
}

/// State context: one overlay map, or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContextDecl {
    One(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
}

impl ContextDecl {
    /// Normalize to the one-render-per-entry list shape.
    fn into_contexts(self) -> Vec<Map<String, Value>> {
        match self {
            Self::One(map) => vec![map],
            Self::Many(list) => list,
        }
    }
}
