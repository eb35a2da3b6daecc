//! The `tessera serialize` command.
//!
//! Loads the model, applies package metadata, runs one entry-point pass of
//! the built-in registry and writes the result. Nothing is written when any
//! step fails.

use crate::config::{ConfigError, SchemaConfig, TesseraConfig};
use crate::output;
use crate::package;
use chrono::Utc;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tessera_model::{ModelError, ProjectReflection};
use tempfile::NamedTempFile;
use tessera_serializer::{
    EntryPointHooks, SerializeError, SerializeEventData, SerializeEventKind, Serializer, Subject,
};
use thiserror::Error;
use tracing::{debug, info};

/// Options for the serialize command.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Path to the configuration file
    pub config: Option<String>,
    /// Override the model file
    pub input: Option<String>,
    /// Override the output file path
    pub output: Option<String>,
    /// Write compact JSON
    pub compact: bool,
}

/// Errors that can occur during the serialize command.
#[derive(Debug, Error)]
pub enum SerializeCommandError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Input model not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported model format '{extension}' for {path}. Expected .json, .yaml or .yml")]
    UnsupportedFormat { path: String, extension: String },

    #[error("Failed to load model {path}: {source}")]
    Model {
        path: String,
        #[source]
        source: ModelError,
    },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write output {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeReport {
    pub output_path: PathBuf,
    pub reflections: usize,
    pub bytes: usize,
}

/// Run the serialize command.
pub fn run_serialize(options: SerializeOptions) -> Result<SerializeReport, SerializeCommandError> {
    let mut config = TesseraConfig::load_or_default(options.config.as_deref().map(Path::new))?;
    apply_cli_overrides(&mut config, &options);
    config.validate()?;

    let mut project = load_model(&config.input)?;
    if project.container.children.is_empty() {
        output::warning(&format!(
            "{} contains no declarations",
            config.input.display()
        ));
    }
    if let Some(name) = &config.name {
        project.base.name = name.clone();
    }

    let metadata = package::discover(&package::search_root(&config.input), &config.package);
    if let Some(file) = &metadata.package_file {
        output::verbose(&format!("Using package metadata from {}", file.display()));
    }
    package::apply(&mut project, &metadata, config.package.include_version);

    let output_path = config.output.path();
    let hooks = EntryPointHooks {
        begin: Some(event_data(&config)),
        end: Some(event_data(&config)),
    };

    let serializer = build_serializer(&config.schema);
    let object = serializer.serialize_entry_point(&project, hooks)?;
    let object = Value::Object(object);

    let mut json = if config.output.pretty {
        serde_json::to_string_pretty(&object)?
    } else {
        serde_json::to_string(&object)?
    };
    json.push('\n');

    write_output(&output_path, &json)?;

    let report = SerializeReport {
        output_path,
        reflections: project.reflection_count(),
        bytes: json.len(),
    };
    info!(
        path = %report.output_path.display(),
        reflections = report.reflections,
        bytes = report.bytes,
        "Wrote serialized project"
    );
    output::success(&format!(
        "Serialized {} reflections to {}",
        report.reflections,
        report.output_path.display()
    ));
    Ok(report)
}

/// The built-in registry plus the schema listeners.
///
/// The begin listener seeds `$schema` so it is the first key of the output.
/// The end listener appends `schemaVersion` and, when enabled, `generatedAt`.
pub fn build_serializer(schema: &SchemaConfig) -> Serializer<Subject> {
    let mut serializer = Serializer::with_builtins();

    if let Some(url) = schema.url.clone() {
        serializer.on(SerializeEventKind::Begin, move |event| {
            event
                .output
                .insert("$schema".to_string(), Value::from(url.as_str()));
            Ok(())
        });
    }

    let version = schema.version.clone();
    let include_timestamp = schema.include_timestamp;
    serializer.on(SerializeEventKind::End, move |event| {
        event
            .output
            .insert("schemaVersion".to_string(), Value::from(version.as_str()));
        if include_timestamp {
            event
                .output
                .insert("generatedAt".to_string(), Value::from(Utc::now().to_rfc3339()));
        }
        Ok(())
    });

    serializer
}

/// Load a project model, choosing the format by file extension.
pub fn load_model(path: &Path) -> Result<ProjectReflection, SerializeCommandError> {
    if !path.is_file() {
        return Err(SerializeCommandError::InputNotFound(path.to_path_buf()));
    }
    let model_error = |source: ModelError| SerializeCommandError::Model {
        path: path.display().to_string(),
        source,
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    debug!(path = %path.display(), format = %extension, "Loading model");

    let project = match extension.as_str() {
        "json" => ProjectReflection::load_from_file(path).map_err(model_error)?,
        "yaml" | "yml" => {
            let content = fs::read_to_string(path).map_err(|e| model_error(e.into()))?;
            serde_yaml::from_str::<ProjectReflection>(&content)
                .map_err(|e| model_error(ModelError::DeserializationError(e.to_string())))?
        }
        _ => {
            return Err(SerializeCommandError::UnsupportedFormat {
                path: path.display().to_string(),
                extension: extension.clone(),
            });
        }
    };

    project.validate().map_err(model_error)?;
    Ok(project)
}

fn apply_cli_overrides(config: &mut TesseraConfig, options: &SerializeOptions) {
    if let Some(input) = &options.input {
        config.input = PathBuf::from(input);
    }

    if let Some(output) = &options.output {
        let path = Path::new(output);
        if let Some(file) = path.file_name().and_then(|f| f.to_str()) {
            config.output.file = file.to_string();
        }
        config.output.directory = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
    }

    if options.compact {
        config.output.pretty = false;
    }
}

fn event_data(config: &TesseraConfig) -> SerializeEventData {
    SerializeEventData {
        output_directory: Some(config.output.directory.clone()),
        output_file: Some(config.output.path()),
    }
}

/// Write through a temporary file in the target directory, then rename it
/// over `path`. A failed write leaves any previous output untouched.
fn write_output(path: &Path, json: &str) -> Result<(), SerializeCommandError> {
    let write_error = |source: std::io::Error| SerializeCommandError::Write {
        path: path.display().to_string(),
        source,
    };
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut staged = NamedTempFile::new_in(parent).map_err(write_error)?;
    staged.write_all(json.as_bytes()).map_err(write_error)?;
    staged.as_file().sync_all().map_err(write_error)?;
    staged.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
