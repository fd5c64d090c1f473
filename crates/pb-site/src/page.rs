//! The page tree.
//!
//! Pages come out of the config as nested declarations and are built into
//! a tree of rendered content before anything touches disk. Building and
//! writing both fan out across siblings; a failure anywhere in the tree
//! aborts the phase with the first error.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::{Map, Value, json};

use pb_catalog::{LAYOUT_ID, PAGE_ID};
use pb_config::{PageConfig, PageKind};
use pb_render::Doc;
use pb_template::view_key;

use crate::error::SiteError;
use crate::facade::RenderFacade;
use crate::listing::{ComponentList, ListingRequest, PreviewFile};

/// A built page: rendered content plus the children below it.
#[derive(Debug)]
pub struct Page {
    /// Display label from the config.
    pub label: String,
    /// File slug derived from the label.
    pub slug: String,
    /// What the page contains.
    pub kind: PageKind,
    /// Absolute output path of the page file.
    pub target: PathBuf,
    /// Site-rooted link, used by `rellink` to relativize references.
    pub link: String,
    /// Pages nested below this one.
    pub children: Vec<Page>,
    /// Rendered inner content. `None` for unknown page types, which keep
    /// their place in the tree but produce no file.
    pub content: Option<String>,
    previews: Vec<PreviewFile>,
}

impl Page {
    /// Build a top-level page and everything below it.
    ///
    /// The page lands in its declared target directory, or the styleguide
    /// target when none is declared.
    ///
    /// # Errors
    ///
    /// Fails on unreadable sources and render errors, including those of
    /// any descendant.
    pub fn build_root(config: &PageConfig, facade: RenderFacade<'_>) -> Result<Self, SiteError> {
        let dir = config.target.as_deref().unwrap_or(facade.target());
        Self::build_in(config, facade, dir)
    }

    fn build_in(
        config: &PageConfig,
        facade: RenderFacade<'_>,
        dir: &Path,
    ) -> Result<Self, SiteError> {
        let slug = slug::slugify(&config.label);
        let target = dir.join(format!("{slug}.html"));
        let link = site_link(facade.target(), &target);

        // Children live in a directory named after this page's slug.
        let child_dir = dir.join(&slug);
        let children = config
            .children
            .par_iter()
            .map(|child| Self::build_in(child, facade, &child_dir))
            .collect::<Result<Vec<_>, _>>()?;

        let (content, previews) = build_content(config, facade, &link)?;

        Ok(Self {
            label: config.label.clone(),
            slug,
            kind: config.kind.clone(),
            target,
            link,
            children,
            content,
            previews,
        })
    }

    /// Render this page through the outer layout and persist it, then
    /// recurse into the children.
    ///
    /// Pages without content write no file but their children still do.
    ///
    /// # Errors
    ///
    /// Propagates render and write failures, including those of any
    /// descendant.
    pub fn write(
        &self,
        facade: RenderFacade<'_>,
        layout_context: &Map<String, Value>,
    ) -> Result<(), SiteError> {
        if let Some(content) = &self.content {
            let mut context = layout_context.clone();
            context.insert("content".to_owned(), Value::String(content.clone()));
            context.insert("page_link".to_owned(), Value::String(self.link.clone()));
            let html = facade.render_named(&view_key(LAYOUT_ID), &Value::Object(context))?;
            facade.storage().write(&self.target, &html)?;
        }
        self.children
            .par_iter()
            .try_for_each(|child| child.write(facade, layout_context))
    }

    /// Collect the preview fragments of this page and all descendants.
    pub(crate) fn collect_previews<'p>(&'p self, into: &mut Vec<&'p PreviewFile>) {
        into.extend(self.previews.iter());
        for child in &self.children {
            child.collect_previews(into);
        }
    }
}

/// Site-rooted link for a target path, as `rellink` expects it.
///
/// Targets outside the site root (declared target overrides) fall back to
/// a root-level link so relative references still resolve somewhere sane.
fn site_link(site_root: &Path, target: &Path) -> String {
    match target.strip_prefix(site_root) {
        Ok(rel) => format!("/{}", rel.display()),
        Err(_) => format!(
            "/{}",
            target.file_name().unwrap_or_default().to_string_lossy()
        ),
    }
}

fn build_content(
    config: &PageConfig,
    facade: RenderFacade<'_>,
    link: &str,
) -> Result<(Option<String>, Vec<PreviewFile>), SiteError> {
    match &config.kind {
        PageKind::Markdown { source } => {
            let doc = Doc::load(facade.storage(), source, &config.label)?;
            let context = json!({ "content": doc.html, "page_link": link });
            let html = facade.render_named(&view_key(PAGE_ID), &context)?;
            Ok((Some(html), Vec::new()))
        }
        PageKind::TagListing { tags } => {
            let mut request = ListingRequest::for_tags(tags.clone());
            request.page_link = link.to_owned();
            let list = ComponentList::build(facade, &request)?;
            Ok((Some(list.compiled), list.previews))
        }
        PageKind::ComponentListing { ids, preflight } => {
            let mut request = ListingRequest::for_ids(ids.clone());
            request.page_link = link.to_owned();
            if let Some(path) = preflight {
                let doc = Doc::load(facade.storage(), path, "preflight")?;
                request
                    .extra
                    .insert("preflight".to_owned(), Value::String(doc.html));
            }
            let list = ComponentList::build(facade, &request)?;
            Ok((Some(list.compiled), list.previews))
        }
        PageKind::Unknown { declared } => {
            tracing::warn!(label = %config.label, %declared, "unknown page type, skipping content");
            Ok((None, Vec::new()))
        }
    }
}
