//! Markdown rendering for styleguide documentation fragments.
//!
//! Component docs, state docs and standalone pages are all written as
//! markdown files next to the sources they describe. This crate turns those
//! files into HTML fragments that the layout templates embed verbatim.
//!
//! The crate provides:
//! - [`render_markdown`] for converting GFM markdown to an HTML fragment
//! - [`Doc`] for loading a labelled markdown file through a storage backend

mod doc;
mod markdown;

pub use doc::Doc;
pub use markdown::render_markdown;
