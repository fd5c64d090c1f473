//! Configuration management for pb.
//!
//! Parses `styleguide.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! Raw TOML values carry relative path strings and optional identity
//! fields; loading resolves all of them against the config file's
//! directory, so the rest of the pipeline only ever sees absolute paths
//! and filled-in defaults.

mod pages;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use pages::PageDecl;
pub use pages::{PageConfig, PageKind};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output directory.
    pub target: Option<PathBuf>,
    /// Override the active component namespace.
    pub namespace: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "styleguide.toml";

/// Version for styleguides that don't declare one.
const DEFAULT_VERSION: &str = "0.0.1";

/// Raw configuration as parsed from TOML (paths as strings).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    name: Option<String>,
    version: Option<String>,
    namespace: Option<String>,
    target: Option<String>,
    components: Option<Vec<String>>,
    partials: Option<Vec<String>>,
    assets: Vec<AssetDecl>,
    pages: Vec<PageDecl>,
}

/// Raw asset mapping as parsed from TOML.
#[derive(Debug, Deserialize)]
struct AssetDecl {
    src: String,
    target: Option<String>,
}

/// A directory of static files to copy into the output tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetMapping {
    /// Source directory, resolved against the config file location.
    pub src: PathBuf,
    /// Destination directory, relative to the styleguide target.
    pub target: PathBuf,
}

/// Resolved styleguide configuration.
///
/// Produced by [`Config::load`]; every path in here is already resolved
/// against the directory of the config file it was loaded from.
#[derive(Debug)]
pub struct Config {
    /// Styleguide display name. Defaults to the config directory's name.
    pub name: String,
    /// Styleguide version string shown in layouts.
    pub version: String,
    /// Active component namespace. Components declaring a different
    /// namespace stay out of listings and exports. Empty means
    /// unnamespaced.
    pub namespace: String,
    /// Directory of the config file; relative source paths resolve from here.
    pub cwd: PathBuf,
    /// Output directory for the generated site, if configured.
    pub target: Option<PathBuf>,
    /// Directories scanned for component manifests.
    pub component_paths: Vec<PathBuf>,
    /// Partial bundles registered into the engine before rendering.
    pub partial_libs: Vec<PathBuf>,
    /// Static asset mappings copied during prepare.
    pub assets: Vec<AssetMapping>,
    /// Root page declarations.
    pub pages: Vec<PageConfig>,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `styleguide.toml` in the current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file can be found, or if parsing or
    /// resolution fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            return Err(ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)));
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(target) = &settings.target {
            self.target = Some(target.clone());
        }
        if let Some(namespace) = &settings.namespace {
            self.namespace.clone_from(namespace);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::parse(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse and resolve a configuration from TOML source.
    fn parse(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let raw: ConfigFile = toml::from_str(content)?;
        raw.resolve(config_dir)
    }
}

impl ConfigFile {
    /// Resolve raw values against the config file's directory.
    fn resolve(self, config_dir: &Path) -> Result<Config, ConfigError> {
        if matches!(self.target.as_deref(), Some("")) {
            return Err(ConfigError::Validation("target cannot be empty".to_owned()));
        }

        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => config_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "styleguide".to_owned()),
        };

        let version = match self.version {
            Some(version) if !version.is_empty() => version,
            _ => DEFAULT_VERSION.to_owned(),
        };

        let component_paths = self
            .components
            .unwrap_or_else(|| vec!["components".to_owned()])
            .iter()
            .map(|p| config_dir.join(p))
            .collect();

        let partial_libs = self
            .partials
            .unwrap_or_default()
            .iter()
            .map(|p| config_dir.join(p))
            .collect();

        let assets = self
            .assets
            .into_iter()
            .map(|decl| decl.resolve(config_dir))
            .collect::<Result<Vec<_>, _>>()?;

        let pages = self
            .pages
            .into_iter()
            .map(|page| page.resolve(config_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config {
            name,
            version,
            namespace: self.namespace.unwrap_or_default(),
            cwd: config_dir.to_path_buf(),
            target: self.target.map(|t| config_dir.join(t)),
            component_paths,
            partial_libs,
            assets,
            pages,
            config_path: None,
        })
    }
}

impl AssetDecl {
    /// Resolve the raw mapping against the config file's directory.
    fn resolve(self, config_dir: &Path) -> Result<AssetMapping, ConfigError> {
        if self.src.is_empty() {
            return Err(ConfigError::Validation(
                "assets.src cannot be empty".to_owned(),
            ));
        }
        let src = config_dir.join(&self.src);
        let target = match self.target {
            Some(target) if !target.is_empty() => PathBuf::from(target),
            _ => src
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("assets")),
        };
        Ok(AssetMapping { src, target })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::parse("", Path::new("/proj/acme-styleguide")).unwrap();

        assert_eq!(config.name, "acme-styleguide");
        assert_eq!(config.version, "0.0.1");
        assert_eq!(config.namespace, "");
        assert_eq!(config.target, None);
        assert_eq!(
            config.component_paths,
            vec![PathBuf::from("/proj/acme-styleguide/components")]
        );
        assert!(config.pages.is_empty());
        assert!(config.assets.is_empty());
        assert!(config.partial_libs.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
name = "Acme Patterns"
version = "1.2.0"
namespace = "acme"
target = "styleguide"
components = ["src/components", "src/shared"]
partials = ["vendor/partials.js"]

[[assets]]
src = "static/fonts"

[[assets]]
src = "static/img"
target = "images"

[[pages]]
label = "Overview"
type = "md"
content = "docs/overview.md"
"#;
        let config = Config::parse(toml, Path::new("/proj")).unwrap();

        assert_eq!(config.name, "Acme Patterns");
        assert_eq!(config.version, "1.2.0");
        assert_eq!(config.namespace, "acme");
        assert_eq!(config.target, Some(PathBuf::from("/proj/styleguide")));
        assert_eq!(
            config.component_paths,
            vec![
                PathBuf::from("/proj/src/components"),
                PathBuf::from("/proj/src/shared")
            ]
        );
        assert_eq!(
            config.partial_libs,
            vec![PathBuf::from("/proj/vendor/partials.js")]
        );
        assert_eq!(config.pages.len(), 1);
        assert_eq!(config.pages[0].label, "Overview");
    }

    #[test]
    fn test_asset_target_defaults_to_src_basename() {
        let toml = "[[assets]]\nsrc = \"static/fonts\"";
        let config = Config::parse(toml, Path::new("/proj")).unwrap();

        assert_eq!(
            config.assets,
            vec![AssetMapping {
                src: PathBuf::from("/proj/static/fonts"),
                target: PathBuf::from("fonts"),
            }]
        );
    }

    #[test]
    fn test_empty_asset_src_rejected() {
        let toml = "[[assets]]\nsrc = \"\"";

        assert!(Config::parse(toml, Path::new("/proj")).is_err());
    }

    #[test]
    fn test_empty_target_rejected() {
        let result = Config::parse("target = \"\"", Path::new("/proj"));

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("target"));
    }

    #[test]
    fn test_empty_name_falls_back_to_directory() {
        let config = Config::parse("name = \"\"", Path::new("/proj/patterns")).unwrap();

        assert_eq!(config.name, "patterns");
    }

    #[test]
    fn test_apply_cli_settings_target() {
        let mut config = Config::parse("target = \"out\"", Path::new("/proj")).unwrap();
        let overrides = CliSettings {
            target: Some(PathBuf::from("/elsewhere/site")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.target, Some(PathBuf::from("/elsewhere/site")));
        assert_eq!(config.namespace, ""); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_namespace() {
        let mut config = Config::parse("namespace = \"acme\"", Path::new("/proj")).unwrap();
        let overrides = CliSettings {
            namespace: Some("vendor".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.namespace, "vendor");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(
            Some(Path::new("/definitely/not/here/styleguide.toml")),
            None,
        );

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("name = ", Path::new("/proj"));

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_nested_pages() {
        let toml = r#"
[[pages]]
label = "Forms"
type = "tags"
tags = ["form"]

[[pages.children]]
label = "Buttons"
type = "md"
content = "docs/buttons.md"
"#;
        let config = Config::parse(toml, Path::new("/proj")).unwrap();

        assert_eq!(config.pages.len(), 1);
        assert_eq!(config.pages[0].children.len(), 1);
        assert_eq!(config.pages[0].children[0].label, "Buttons");
    }
}
