//! Template engine adapter and partial bundle codec for pb.
//!
//! Every template in a styleguide build, whether a built-in layout, a
//! component view or a user partial, is registered under a name in a single
//! [`TemplateEngine`]. The engine wraps `minijinja` behind a small surface
//! so the rest of the pipeline never touches engine internals; it is created
//! once per build and passed down explicitly instead of living in a global.
//!
//! The crate also provides the partial bundle codec ([`export_bundle`] /
//! [`import_bundle`]) used to hand component partials over to a consuming
//! application as a `partials.js` file.

mod bundle;
mod engine;
mod error;
mod link;

pub use bundle::{export_bundle, import_bundle};
pub use engine::{TemplateEngine, view_key};
pub use error::TemplateError;
pub use link::relative_path;
