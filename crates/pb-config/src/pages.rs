//! Page tree declarations.
//!
//! Pages are declared in `styleguide.toml` as a tree of labelled nodes.
//! Each node carries a `type` string in TOML; resolution turns that open
//! string into the closed [`PageKind`] enum. Unknown type strings are kept
//! around so the build can warn about them instead of failing the whole run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

/// Raw page declaration as parsed from TOML.
#[derive(Debug, Deserialize)]
pub(crate) struct PageDecl {
    label: String,
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
    tags: Option<Vec<String>>,
    components: Option<Vec<String>>,
    preflight: Option<String>,
    target: Option<String>,
    #[serde(default)]
    children: Vec<PageDecl>,
}

/// What a page renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageKind {
    /// A markdown document rendered through the page layout.
    Markdown {
        /// Resolved path of the markdown source.
        source: PathBuf,
    },
    /// A listing of every component carrying all of the given tags.
    TagListing {
        /// Tags a component must carry to be included. Empty means no filter.
        tags: Vec<String>,
    },
    /// A listing of explicitly chosen components.
    ComponentListing {
        /// Component ids to include, in declaration order. `None` lists the
        /// whole active namespace.
        ids: Option<Vec<String>>,
        /// Markdown document rendered above the listing.
        preflight: Option<PathBuf>,
    },
    /// A declaration with a type string this version doesn't know.
    Unknown {
        /// The type string as written in the config.
        declared: String,
    },
}

/// Resolved page declaration.
#[derive(Clone, Debug)]
pub struct PageConfig {
    /// Display label; the page's file slug is derived from it.
    pub label: String,
    /// What the page renders.
    pub kind: PageKind,
    /// Explicit output directory override. Only meaningful on root pages;
    /// child pages always nest under their parent.
    pub target: Option<PathBuf>,
    /// Child page declarations.
    pub children: Vec<PageConfig>,
}

impl PageDecl {
    /// Resolve the raw declaration against the config file's directory.
    pub(crate) fn resolve(self, config_dir: &Path) -> Result<PageConfig, ConfigError> {
        let kind = match self.kind.as_str() {
            "md" => {
                let content = self.content.filter(|c| !c.is_empty()).ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "page '{}': type \"md\" requires a content file",
                        self.label
                    ))
                })?;
                PageKind::Markdown {
                    source: config_dir.join(content),
                }
            }
            "tags" => PageKind::TagListing {
                tags: self.tags.unwrap_or_default(),
            },
            "components" => PageKind::ComponentListing {
                ids: self.components,
                preflight: self.preflight.map(|p| config_dir.join(p)),
            },
            _ => PageKind::Unknown {
                declared: self.kind,
            },
        };

        let children = self
            .children
            .into_iter()
            .map(|child| child.resolve(config_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageConfig {
            label: self.label,
            kind,
            target: self.target.map(|t| config_dir.join(t)),
            children,
        })
    }
}
