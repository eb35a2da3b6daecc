//! CLI commands for Tessera.
//!
//! - `tessera init` - Write a commented `tessera.yaml`
//! - `tessera serialize` - Serialize a reflection model to JSON

pub mod init;
pub mod serialize;

pub use init::{InitError, InitOptions, run_init};
pub use serialize::{SerializeCommandError, SerializeOptions, SerializeReport, run_serialize};
