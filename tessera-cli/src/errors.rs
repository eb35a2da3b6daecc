use crate::commands::{InitError, SerializeCommandError};
use crate::config::ConfigError;
use thiserror::Error;

/// A failed command, as reported to the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Serialize(#[from] SerializeCommandError),
}

impl CliError {
    /// Get a suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            CliError::Init(InitError::FileExists { .. }) => {
                Some("Use --force to overwrite it, or --output to write somewhere else.")
            }
            CliError::Init(InitError::WriteError(_)) => {
                Some("Check that the target directory exists and is writable.")
            }
            CliError::Serialize(error) => match error {
                SerializeCommandError::Config(ConfigError::NotFound(_)) => Some(
                    "Run 'tessera init' to create a configuration file, or use --config to specify a path",
                ),
                SerializeCommandError::Config(ConfigError::ParseError(_)) => {
                    Some("Check the YAML syntax of the configuration file.")
                }
                SerializeCommandError::Config(_) => None,
                SerializeCommandError::InputNotFound(_) => Some(
                    "Set `input` in tessera.yaml, export TESSERA_INPUT, or pass --input <PATH>.",
                ),
                SerializeCommandError::UnsupportedFormat { .. } => {
                    Some("Provide the model as a .json, .yaml or .yml file.")
                }
                SerializeCommandError::Model { .. } => Some(
                    "The model must be a project with id 0, unique reflection ids, and group members that exist.",
                ),
                SerializeCommandError::Serialize(_) => {
                    Some("No output was written. Fix or remove the value shown above and retry.")
                }
                SerializeCommandError::Encode(_) => None,
                SerializeCommandError::Write { .. } => {
                    Some("Check that the output directory is writable, or pass --output <PATH>.")
                }
            },
        }
    }

    /// Format error with suggestion for CLI output
    pub fn format_for_cli(&self) -> String {
        let mut output = format!("Error: {}", self);

        if let CliError::Serialize(SerializeCommandError::Serialize(error)) = self {
            output.push_str(&format!("\n\nCaused by: {}", error.origin()));
            let path = error.subject_path();
            if path.len() > 1 {
                output.push_str(&format!("\nPath: {}", path.join(" > ")));
            }
        }

        if let Some(suggestion) = self.suggestion() {
            output.push_str(&format!("\n\nSuggestion: {}", suggestion));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tessera_serializer::SerializeError;

    #[test]
    fn test_init_file_exists_error() {
        let error = CliError::from(InitError::FileExists {
            path: "tessera.yaml".to_string(),
        });
        assert!(error.to_string().contains("tessera.yaml"));
        assert!(error.suggestion().unwrap().contains("--force"));
    }

    #[test]
    fn test_config_not_found_error() {
        let error = CliError::from(SerializeCommandError::Config(ConfigError::NotFound(
            PathBuf::from("./tessera.yaml"),
        )));
        assert!(error.to_string().contains("tessera.yaml"));
        assert!(error.suggestion().unwrap().contains("tessera init"));
    }

    #[test]
    fn test_input_not_found_error() {
        let error = CliError::from(SerializeCommandError::InputNotFound(PathBuf::from(
            "model.json",
        )));
        assert!(error.to_string().contains("model.json"));
        assert!(error.suggestion().unwrap().contains("TESSERA_INPUT"));
    }

    #[test]
    fn test_format_reports_originating_value() {
        let failure = SerializeError::ComponentFailed {
            component: "ContainerReflectionSerializer",
            subject: "Project demo (id 0)".to_string(),
            source: Box::new(SerializeError::failed("Variable broken (id 4)", "bad value")),
        };
        let error = CliError::from(SerializeCommandError::Serialize(failure));
        let formatted = error.format_for_cli();

        assert!(formatted.starts_with("Error: Serialization failed:"));
        assert!(formatted.contains("Caused by: Cannot serialize Variable broken (id 4): bad value"));
        assert!(formatted.contains("Path: Project demo (id 0) > Variable broken (id 4)"));
        assert!(formatted.contains("Suggestion: No output was written."));
    }

    #[test]
    fn test_format_without_suggestion() {
        let error = CliError::from(SerializeCommandError::Config(
            ConfigError::ValidationError("output.file must not be empty".to_string()),
        ));
        let formatted = error.format_for_cli();
        assert!(formatted.contains("output.file must not be empty"));
        assert!(!formatted.contains("Suggestion:"));
    }
}
