//! Implementation of the `tessera init` command.
//!
//! Writes a commented `tessera.yaml` with every option at its default.
//!
//! # Usage
//!
//! ```bash
//! # Create tessera.yaml in the current directory
//! tessera init
//!
//! # Specify output path, overwriting an existing file
//! tessera init --output config/tessera.yaml --force
//! ```

use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::output;

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
    /// Configuration file already exists and --force was not specified.
    #[error("Configuration file already exists: {path}. Use --force to overwrite.")]
    FileExists { path: String },

    /// Failed to write the configuration file.
    #[error("Failed to write configuration file: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Default configuration template.
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tessera.yaml - Tessera configuration file

# ===============================================================================
# INPUT
# ===============================================================================
# The reflection model to serialize (.json, .yaml or .yml).
# Supports ~ for the home directory.

input: "model.json"

# Project name. When unset, the name from package.json is used,
# then "Documentation".
# name: "My Library"

# ===============================================================================
# OUTPUT
# ===============================================================================

output:
  # Directory the serialized project is written to
  directory: "docs"

  # File name inside the directory
  file: "project.json"

  # Pretty-print the JSON (set to false for compact output)
  pretty: true

# ===============================================================================
# PACKAGE METADATA
# ===============================================================================
# package.json and readme.md are searched for in the input file's directory
# and its parents.

package:
  discover: true

  # Explicit readme path, or "none" to leave the readme out
  # readme: "README.md"

  # Copy the package.json version into packageVersion (a leading "v" is removed)
  include_version: false

# ===============================================================================
# SCHEMA
# ===============================================================================

schema:
  # Written first, as "$schema"
  # url: "https://example.com/tessera/schema.json"

  # Written last, as "schemaVersion"
  version: "1.0"

  # Add a "generatedAt" timestamp
  include_timestamp: false
"#;

/// Options for the `tessera init` command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Output path for the configuration file.
    pub output: Option<String>,
    /// Whether to overwrite an existing file.
    pub force: bool,
}

/// Run the `tessera init` command.
///
/// Fails if the file already exists and `force` is not set.
pub fn run_init(options: InitOptions) -> Result<(), InitError> {
    let output_path = options
        .output
        .unwrap_or_else(|| "tessera.yaml".to_string());
    let path = Path::new(&output_path);

    if path.exists() && !options.force {
        return Err(InitError::FileExists { path: output_path });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(DEFAULT_CONFIG_TEMPLATE.as_bytes())?;

    output::success(&format!("Created configuration file: {}", output_path));
    output::info("");
    output::info("Next steps:");
    output::info(&format!(
        "  1. Edit {} to point `input` at your model file",
        output_path
    ));
    output::info("  2. Run: tessera serialize");

    Ok(())
}
