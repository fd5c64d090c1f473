//! Component listings.
//!
//! A listing takes a set of components (all of them, an explicit id list,
//! or a tag selection), renders each one's view through the component
//! display template, and compiles the entries into the plain listing
//! layout. Along the way every rendered view variant is captured as a
//! [`PreviewFile`] so the write phase can persist standalone preview
//! fragments next to the site.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use pb_catalog::{COMPONENT_ID, COMPONENT_LIST_ID, Component, LAYOUT_ID, View};
use pb_template::view_key;

use crate::error::SiteError;
use crate::facade::RenderFacade;

/// Directory preview fragments are written into, under the target root.
pub const PREVIEW_DIR: &str = "preview-files";

/// Output file name of the overview listing.
pub const COMPONENTS_FILE: &str = "components.html";

/// A standalone rendered view variant, persisted under [`PREVIEW_DIR`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewFile {
    /// File name inside the preview directory.
    pub file_name: String,
    /// Rendered HTML fragment.
    pub content: String,
}

impl PreviewFile {
    /// Site-rooted link to this preview, for `rellink` in templates.
    #[must_use]
    pub fn link(&self) -> String {
        format!("/{PREVIEW_DIR}/{}", self.file_name)
    }
}

/// What a listing should contain.
#[derive(Debug)]
pub struct ListingRequest {
    /// Explicit component ids, in display order. `None` or empty lists
    /// every component in the active namespace.
    pub ids: Option<Vec<String>>,
    /// Tags a component must all carry to be listed.
    pub tags: Option<Vec<String>>,
    /// Extra context merged into the listing layout render (e.g. a
    /// rendered preflight document).
    pub extra: Map<String, Value>,
    /// Site-rooted link of the page embedding this listing, so `rellink`
    /// resolves preview links relative to it. Defaults to the overview.
    pub page_link: String,
}

impl Default for ListingRequest {
    fn default() -> Self {
        Self {
            ids: None,
            tags: None,
            extra: Map::new(),
            page_link: format!("/{COMPONENTS_FILE}"),
        }
    }
}

impl ListingRequest {
    /// Every component in the active namespace.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Components carrying all of the given tags.
    #[must_use]
    pub fn for_tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }

    /// Explicitly chosen components.
    #[must_use]
    pub fn for_ids(ids: Option<Vec<String>>) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }
}

/// A compiled component listing and the previews it produced.
#[derive(Debug)]
pub struct ComponentList {
    /// Compiled listing HTML.
    pub compiled: String,
    /// Preview fragments captured while rendering the entries.
    pub previews: Vec<PreviewFile>,
}

impl ComponentList {
    /// Assemble and render a listing.
    ///
    /// Selection happens in order: explicit ids (misses logged and
    /// dropped), then the tag filter, then the namespace filter. Each
    /// surviving component with a view is rendered through the component
    /// display template; components without a view are skipped silently.
    ///
    /// # Errors
    ///
    /// Any render failure aborts the whole listing.
    pub fn build(facade: RenderFacade<'_>, request: &ListingRequest) -> Result<Self, SiteError> {
        let candidates: Vec<&Component> = match &request.ids {
            Some(ids) if !ids.is_empty() => ids
                .iter()
                .filter_map(|id| facade.resolve_component(id))
                .collect(),
            _ => facade.all_components().iter().collect(),
        };

        let selected = candidates.into_iter().filter(|component| {
            let tags_match = request.tags.as_ref().is_none_or(|tags| {
                tags.iter().all(|tag| component.tags.contains(tag))
            });
            tags_match && component.namespace == facade.namespace()
        });

        let mut previews = Vec::new();
        let mut entries = Vec::new();
        for component in selected {
            let Some(display) =
                render_component(facade, component, &request.page_link, &mut previews)?
            else {
                continue;
            };
            let compiled = facade.render_named(&view_key(COMPONENT_ID), &display)?;
            entries.push(json!({
                "id": component.id,
                "slug": component.slug,
                "headline": component.headline(),
                "compiled": compiled,
            }));
        }

        let mut context = request.extra.clone();
        context.insert("components".to_owned(), Value::Array(entries));
        context.insert(
            "page_link".to_owned(),
            Value::String(request.page_link.clone()),
        );
        let compiled =
            facade.render_named(&view_key(COMPONENT_LIST_ID), &Value::Object(context))?;

        Ok(Self { compiled, previews })
    }

    /// Render through the outer layout and persist the overview.
    ///
    /// Writes [`COMPONENTS_FILE`] at the target root plus every preview
    /// fragment this listing produced.
    ///
    /// # Errors
    ///
    /// Propagates render and write failures.
    pub fn write(
        &self,
        facade: RenderFacade<'_>,
        layout_context: &Map<String, Value>,
    ) -> Result<(), SiteError> {
        let mut context = layout_context.clone();
        context.insert("content".to_owned(), Value::String(self.compiled.clone()));
        context.insert(
            "page_link".to_owned(),
            Value::String(format!("/{COMPONENTS_FILE}")),
        );
        let html = facade.render_named(&view_key(LAYOUT_ID), &Value::Object(context))?;
        facade
            .storage()
            .write(&facade.target().join(COMPONENTS_FILE), &html)?;
        write_previews(facade, &self.previews)
    }
}

/// Render one component into its display context.
///
/// Returns `None` for components without a view. Otherwise the context
/// carries `id` (the slug, for anchors), `headline`, `docs` and `meta`,
/// plus either a single `template` entry or a `states` list with one
/// rendered variant per state context. Every rendered variant is recorded
/// in `previews`.
fn render_component(
    facade: RenderFacade<'_>,
    component: &Component,
    page_link: &str,
    previews: &mut Vec<PreviewFile>,
) -> Result<Option<Value>, SiteError> {
    let Some(view) = &component.view else {
        return Ok(None);
    };

    // Low to high precedence: view defaults, then the component overrides.
    let mut base = view.config.clone();
    for (key, value) in &component.view_context {
        base.insert(key.clone(), value.clone());
    }

    let mut display = Map::new();
    display.insert(
        "page_link".to_owned(),
        Value::String(page_link.to_owned()),
    );
    display.insert("id".to_owned(), Value::String(component.slug.clone()));
    display.insert(
        "headline".to_owned(),
        Value::String(component.headline().to_owned()),
    );
    display.insert(
        "docs".to_owned(),
        Value::Array(
            component
                .docs
                .iter()
                .map(|doc| json!({ "label": doc.label, "content": doc.html }))
                .collect(),
        ),
    );
    display.insert(
        "meta".to_owned(),
        json!({ "namespace": component.namespace, "tags": component.tags }),
    );

    if component.states.is_empty() {
        let content = render_view(facade, view, &Value::Object(base))?;
        let preview = PreviewFile {
            file_name: format!("{}-view.html", component.slug),
            content: content.clone(),
        };
        display.insert(
            "template".to_owned(),
            json!({ "content": content, "path": preview.link() }),
        );
        previews.push(preview);
    } else {
        let mut states = Vec::with_capacity(component.states.len());
        for state in &component.states {
            let mut variants = Vec::with_capacity(state.contexts.len());
            for overlay in &state.contexts {
                let mut context = base.clone();
                for (key, value) in overlay {
                    context.insert(key.clone(), value.clone());
                }
                let content = render_view(facade, view, &Value::Object(context))?;
                let preview = PreviewFile {
                    file_name: format!("{}.html", state.slug),
                    content: content.clone(),
                };
                variants.push(json!({ "content": content, "path": preview.link() }));
                previews.push(preview);
            }
            states.push(json!({
                "label": state.label,
                "slug": state.slug,
                "doc": state.doc,
                "content": variants,
            }));
        }
        display.insert("states".to_owned(), Value::Array(states));
    }

    Ok(Some(Value::Object(display)))
}

/// Render a view template, logging failures with the offending source.
fn render_view(
    facade: RenderFacade<'_>,
    view: &View,
    context: &Value,
) -> Result<String, SiteError> {
    facade.render_named(&view.template_key, context).map_err(|err| {
        tracing::error!(view = %view.source_path.display(), error = %err, "view render failed");
        SiteError::from(err)
    })
}

/// Persist preview fragments under the target's preview directory.
///
/// Duplicate file names collapse to the last occurrence, matching overlay
/// order for states sharing a slug.
pub(crate) fn write_previews<'p>(
    facade: RenderFacade<'_>,
    previews: impl IntoIterator<Item = &'p PreviewFile>,
) -> Result<(), SiteError> {
    let mut unique = BTreeMap::new();
    for preview in previews {
        unique.insert(&preview.file_name, &preview.content);
    }
    for (file_name, content) in unique {
        let path = facade.target().join(PREVIEW_DIR).join(file_name);
        facade.storage().write(&path, content)?;
    }
    Ok(())
}
