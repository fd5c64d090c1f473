//! Site assembly for pb.
//!
//! This crate drives a styleguide build end to end: the [`Styleguide`]
//! orchestrator owns the engine, the catalog and the storage backend, the
//! [`Page`] tree turns config declarations into rendered pages, and
//! [`ComponentList`] compiles component listings along with their preview
//! fragments.
//!
//! Rendering code never touches the orchestrator directly; it works
//! against the narrow [`RenderFacade`], which carries exactly the shared
//! state a render needs.

mod error;
mod facade;
mod listing;
mod page;
mod styleguide;

pub use error::SiteError;
pub use facade::RenderFacade;
pub use listing::{COMPONENTS_FILE, ComponentList, ListingRequest, PREVIEW_DIR, PreviewFile};
pub use page::Page;
pub use styleguide::Styleguide;
