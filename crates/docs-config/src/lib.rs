//! Configuration management for the docs engine.
//!
//! Parses `docs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [repository]
//! path = "${DOCS_ROOT:-docs}"
//!
//! [indexer]
//! files_dir = "files"
//! unknown_items = "warn"
//! ```
//!
//! `repository.path` supports environment variable expansion (`${VAR}` and
//! `${VAR:-default}`) and is resolved relative to the config file's directory.
//! Front-ends can override values after loading via [`CliSettings`].

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docs.toml";

/// Default repository directory, relative to the config file.
const DEFAULT_REPOSITORY_DIR: &str = "docs";

/// Settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the repository root directory.
    pub repository_path: Option<PathBuf>,
    /// Override the unknown item policy.
    pub unknown_items: Option<UnknownItemPolicy>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository section as written in TOML (path unresolved).
    repository: RepositoryConfigRaw,
    /// Tree building options.
    pub indexer: IndexerConfig,

    /// Resolved repository configuration (set after loading).
    #[serde(skip)]
    pub repository_resolved: RepositoryConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RepositoryConfigRaw {
    path: Option<String>,
}

/// Resolved repository configuration.
#[derive(Debug, Default)]
pub struct RepositoryConfig {
    /// Root directory of the documentation repository.
    pub path: PathBuf,
}

/// What to do with an item whose marker file has no known type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownItemPolicy {
    /// Keep the item and log a warning.
    #[default]
    Warn,
    /// Drop the item and its subtree, logging a warning.
    Skip,
    /// Fail the whole build.
    Abort,
}

/// Tree building options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Name of the sub-directory holding an item's auxiliary files.
    pub files_dir: String,
    /// Handling of unclassified items.
    pub unknown_items: UnknownItemPolicy,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            files_dir: "files".to_owned(),
            unknown_items: UnknownItemPolicy::default(),
        }
    }
}

impl IndexerConfig {
    /// Validate indexer options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `files_dir` is empty or is not a
    /// single directory name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files_dir.is_empty() {
            return Err(ConfigError::Validation(
                "indexer.files_dir cannot be empty".to_owned(),
            ));
        }
        if self.files_dir.contains(['/', '\\']) || self.files_dir == "." || self.files_dir == ".."
        {
            return Err(ConfigError::Validation(format!(
                "indexer.files_dir must be a single directory name, got {:?}",
                self.files_dir
            )));
        }
        Ok(())
    }
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`repository.path`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docs.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            tracing::debug!("no {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indexer.validate()
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.repository_path {
            self.repository_resolved.path.clone_from(path);
        }
        if let Some(policy) = settings.unknown_items {
            self.indexer.unknown_items = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        discover_from(&current)
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            repository: RepositoryConfigRaw::default(),
            indexer: IndexerConfig::default(),
            repository_resolved: RepositoryConfig {
                path: base.join(DEFAULT_REPOSITORY_DIR),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(
            config = %path.display(),
            repository = %config.repository_resolved.path.display(),
            "loaded configuration"
        );
        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.repository.path {
            self.repository.path = Some(expand::expand_env(path, "repository.path")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let path = self
            .repository
            .path
            .as_deref()
            .unwrap_or(DEFAULT_REPOSITORY_DIR);
        self.repository_resolved = RepositoryConfig {
            path: config_dir.join(path),
        };
    }
}

/// Walk up from `start` looking for `docs.toml`.
fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
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
