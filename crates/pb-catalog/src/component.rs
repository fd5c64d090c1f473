//! The component model.
//!
//! A [`Component`] is one reusable building block of a styleguide: an id, an
//! optional view template (registered in the engine, referenced here by key),
//! documentation fragments, partials it contributes, and the states it can be
//! shown in. Components are assembled once by the loader and read-only from
//! then on.

use std::path::PathBuf;

use serde_json::{Map, Value};

use pb_render::Doc;

/// A reusable building block declared by a `component.yaml` manifest.
#[derive(Clone, Debug)]
pub struct Component {
    /// Declared id, unique within the registry (e.g. "atoms.button").
    pub id: String,
    /// URL-safe form of the id, used for anchors and preview file names.
    pub slug: String,
    /// Display label. Listings fall back to the id when missing.
    pub label: Option<String>,
    /// Namespace the component belongs to. Empty means unnamespaced.
    pub namespace: String,
    /// Free-form tags for tag listings.
    pub tags: Vec<String>,
    /// The component's view template, if it has one. Components without a
    /// view never show up as rendered listing entries.
    pub view: Option<View>,
    /// Context overrides applied on top of the view's own defaults.
    pub view_context: Map<String, Value>,
    /// Named states, in declaration order.
    pub states: Vec<State>,
    /// Rendered documentation fragments, in declaration order.
    pub docs: Vec<Doc>,
    /// Partial templates this component contributes to the engine.
    pub partials: Vec<Partial>,
}

impl Component {
    /// Create an empty component with a slug derived from the id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let slug = slug::slugify(&id);
        Self {
            id,
            slug,
            label: None,
            namespace: String::new(),
            tags: Vec::new(),
            view: None,
            view_context: Map::new(),
            states: Vec::new(),
            docs: Vec::new(),
            partials: Vec::new(),
        }
    }

    /// Display headline: the label when set, the id otherwise.
    #[must_use]
    pub fn headline(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// A component's view template, held in the engine.
///
/// The template source itself is compiled into the shared engine at load
/// time; only the registration key travels with the component. The source
/// path sticks around for render error reports.
#[derive(Clone, Debug)]
pub struct View {
    /// Engine key the compiled template is registered under.
    pub template_key: String,
    /// File the template source was read from.
    pub source_path: PathBuf,
    /// Context defaults declared alongside the view.
    pub config: Map<String, Value>,
}

/// A named state a component can be rendered in.
///
/// Each context map yields one rendered variant of the view. A state
/// declared without a context still renders once, with an empty overlay.
#[derive(Clone, Debug)]
pub struct State {
    /// Display label.
    pub label: String,
    /// URL-safe identifier, unique across the styleguide. The loader
    /// prefixes it with the component slug so preview file paths stay
    /// disjoint.
    pub slug: String,
    /// Rendered HTML of the state's markdown doc, if declared.
    pub doc: Option<String>,
    /// Context overlays, one render per entry.
    pub contexts: Vec<Map<String, Value>>,
}

/// A partial template contributed by a component.
///
/// Partials are registered into the engine under their bare name and are
/// what `pb export` bundles up for reuse outside the styleguide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partial {
    /// Registration name (the source file's stem).
    pub name: String,
    /// Raw template source.
    pub source: String,
}
