//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod export;

pub(crate) use build::BuildArgs;
pub(crate) use export::ExportArgs;
