//! Tessera CLI library.
//!
//! The `tessera` binary is a thin wrapper over these modules; they are
//! exposed as a library to enable integration testing.
//!
//! # Modules
//!
//! - [`commands`]: `init` and `serialize`
//! - [`config`]: `tessera.yaml` loading and validation
//! - [`package`]: `package.json` and readme discovery
//! - [`output`]: user-facing status lines
//! - [`errors`]: error reporting with suggestions

pub mod commands;
pub mod config;
pub mod errors;
pub mod output;
pub mod package;

pub use config::{ConfigError, OutputConfig, PackageConfig, SchemaConfig, TesseraConfig};
pub use errors::CliError;
