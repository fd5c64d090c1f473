//! `pb build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use pb_config::{CliSettings, Config};
use pb_site::Styleguide;
use pb_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover styleguide.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Component namespace to build (overrides config).
    #[arg(short, long)]
    namespace: Option<String>,

    /// Enable verbose output (show build phase logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any build phase fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            target: self.target,
            namespace: self.namespace,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Building styleguide '{}' ({})",
            config.name, config.version
        ));

        let mut styleguide = Styleguide::new(config, Arc::new(FsStorage::new()))?;
        styleguide.read()?;
        styleguide.prepare()?;
        styleguide.write()?;

        output.success(&format!(
            "Styleguide written to {}",
            styleguide.target().display()
        ));
        Ok(())
    }
}
