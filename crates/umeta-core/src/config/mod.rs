//! Configuration management for umeta.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `umeta.toml` file
//! 3. User config `~/.config/umeta/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

use crate::model::EntityKind;
use crate::parser::ParserOptions;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which files to scan.
    pub scan: ScanConfig,

    /// Where records are written.
    pub output: OutputConfig,

    /// Parser toggles.
    pub parser: ParserOptions,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./umeta.toml` (project local)
    /// 2. `~/.config/umeta/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reject settings a scan cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "scan.extensions must name at least one extension".to_string(),
            ));
        }
        if self.output.containers_file.is_empty() {
            return Err(ConfigError::Invalid(
                "output.containers_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup, normally the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_SOURCE_DIR) {
            self.scan.source_dir = PathBuf::from(dir);
        }
        if let Some(list) = lookup(ENV_EXTENSIONS) {
            let extensions = parse_extension_list(&list);
            if !extensions.is_empty() {
                self.scan.extensions = extensions;
            }
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.output.data_dir = PathBuf::from(dir);
        }
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> Result<String, ConfigError> {
        Config::default().to_toml_string()
    }
}

/// Split `h, .hpp,inl` into bare extensions.
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

/// File discovery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Root of the source tree.
    pub source_dir: PathBuf,

    /// File extensions to parse (without leading dot).
    pub extensions: Vec<String>,

    /// Directory names skipped anywhere in the tree.
    pub exclude_dirs: Vec<String>,

    /// Skip files matched by `.gitignore`.
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: DEFAULT_RESPECT_GITIGNORE,
        }
    }
}

impl ScanConfig {
    /// Whether a path has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Record output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory for all output files.
    pub data_dir: PathBuf,

    /// Subdirectory for failure files.
    pub fail_dir: String,

    /// Finished containers file name.
    pub containers_file: String,

    /// Failed containers file name.
    pub failed_containers_file: String,

    /// Failed properties file name.
    pub failed_properties_file: String,

    /// Failed functions file name.
    pub failed_functions_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fail_dir: DEFAULT_FAIL_DIR.to_string(),
            containers_file: DEFAULT_CONTAINERS_FILE.to_string(),
            failed_containers_file: DEFAULT_FAILED_CONTAINERS_FILE.to_string(),
            failed_properties_file: DEFAULT_FAILED_PROPERTIES_FILE.to_string(),
            failed_functions_file: DEFAULT_FAILED_FUNCTIONS_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    /// Path of the finished-containers file.
    pub fn containers_path(&self) -> PathBuf {
        self.data_dir.join(&self.containers_file)
    }

    /// Path of the failure file for one entity kind.
    pub fn failures_path(&self, kind: EntityKind) -> PathBuf {
        let file = match kind {
            EntityKind::Container => &self.failed_containers_file,
            EntityKind::Property => &self.failed_properties_file,
            EntityKind::Function => &self.failed_functions_file,
        };
        self.data_dir.join(&self.fail_dir).join(file)
    }
}
