//! Configuration loading and validation for Tessera.
//!
//! Tessera reads a `tessera.yaml` file from the current directory by default;
//! `--config` selects another path. Every section is optional.
//!
//! # Environment Variable Overrides
//!
//! - `TESSERA_INPUT`: the model file to serialize
//! - `TESSERA_OUTPUT_DIRECTORY`: the output directory
//! - `TESSERA_OUTPUT_FILE`: the output file name
//! - `TESSERA_SCHEMA_VERSION`: the `schemaVersion` written to the output

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read the configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse the YAML configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root configuration structure for `tessera.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseraConfig {
    /// Model file to serialize (`.json`, `.yaml` or `.yml`).
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Project name. Falls back to the package name, then `Documentation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            name: None,
            output: OutputConfig::default(),
            package: PackageConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("model.json")
}

/// Where the serialized project is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_output_file")]
    pub file: String,

    /// Pretty-print the JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            file: default_output_file(),
            pretty: true,
        }
    }
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file)
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("docs")
}

fn default_output_file() -> String {
    "project.json".to_string()
}

fn default_true() -> bool {
    true
}

/// Package metadata discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Look for `package.json` and a readme above the input file.
    #[serde(default = "default_true")]
    pub discover: bool,

    /// Explicit readme path, or `none` to leave the readme out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,

    /// Copy the package version into `packageVersion`.
    #[serde(default)]
    pub include_version: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            discover: true,
            readme: None,
            include_version: false,
        }
    }
}

/// Schema metadata written around the serialized project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Written first, as `$schema`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Written last, as `schemaVersion`.
    #[serde(default = "default_schema_version")]
    pub version: String,

    /// Add a `generatedAt` RFC 3339 timestamp.
    #[serde(default)]
    pub include_timestamp: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            url: None,
            version: default_schema_version(),
            include_timestamp: false,
        }
    }
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl TesseraConfig {
    /// Load configuration from the default path (`./tessera.yaml`).
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new("tessera.yaml"))
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;

        config.apply_env_overrides();
        config.expand_paths()?;
        config.validate()?;

        Ok(config)
    }

    /// Load `path` when given, else `./tessera.yaml` when present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None if Path::new("tessera.yaml").exists() => Self::load_default(),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                config.expand_paths()?;
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse without overrides or validation. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Variables follow the pattern `TESSERA_{SECTION}_{KEY}`.
    fn apply_env_overrides(&mut self) {
        if let Ok(input) = env::var("TESSERA_INPUT") {
            self.input = PathBuf::from(input);
        }

        if let Ok(directory) = env::var("TESSERA_OUTPUT_DIRECTORY") {
            self.output.directory = PathBuf::from(directory);
        }

        if let Ok(file) = env::var("TESSERA_OUTPUT_FILE") {
            self.output.file = file;
        }

        if let Ok(version) = env::var("TESSERA_SCHEMA_VERSION") {
            self.schema.version = version;
        }
    }

    /// Expand `~` in paths to the home directory.
    pub(crate) fn expand_paths(&mut self) -> Result<(), ConfigError> {
        let paths = [
            self.input.to_str(),
            self.output.directory.to_str(),
            self.package.readme.as_deref(),
        ];
        let needs_home = paths
            .into_iter()
            .flatten()
            .any(|s| s == "~" || s.starts_with("~/"));
        if !needs_home {
            return Ok(());
        }

        let home = dirs::home_dir().ok_or_else(|| {
            ConfigError::ValidationError("Cannot determine home directory".into())
        })?;

        self.input = expand_home(&self.input, &home);
        self.output.directory = expand_home(&self.output.directory, &home);
        if let Some(readme) = &self.package.readme {
            let expanded = expand_home(Path::new(readme), &home);
            self.package.readme = Some(expanded.to_string_lossy().into_owned());
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.file must not be empty".into(),
            ));
        }

        if self.output.file.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError(format!(
                "output.file '{}' must be a file name, not a path. Use output.directory for the location",
                self.output.file
            )));
        }

        if self.schema.version.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "schema.version must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Whether the readme was explicitly disabled with `readme: none`.
    pub fn readme_disabled(&self) -> bool {
        self.package
            .readme
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("none"))
    }
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.to_str() {
        Some("~") => home.to_path_buf(),
        Some(s) => match s.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => path.to_path_buf(),
        },
        None => path.to_path_buf(),
    }
}
