//! `pb export` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use pb_config::{CliSettings, Config};
use pb_site::Styleguide;
use pb_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover styleguide.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Component namespace to export (overrides config).
    #[arg(short, long)]
    namespace: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the catalog cannot be read
    /// or the bundle cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            target: None,
            namespace: self.namespace,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut styleguide = Styleguide::new(config, Arc::new(FsStorage::new()))?;
        styleguide.read()?;
        let bundle = styleguide.export()?;

        output.success(&format!("Partials exported to {}", bundle.display()));
        Ok(())
    }
}
