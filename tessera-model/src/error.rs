//! Error types for the tessera-model crate.

use crate::reflection::{BuilderError, ReflectionId};
use thiserror::Error;

/// Errors related to loading and validating a project.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Reflection id {id} is used by both {first} and {second}")]
    DuplicateId {
        id: ReflectionId,
        first: String,
        second: String,
    },

    #[error("Invalid project root: {0}")]
    InvalidProject(String),

    #[error("Group \"{group}\" references unknown reflection {id}")]
    DanglingGroupChild { group: String, id: ReflectionId },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Builder error: {0}")]
    BuilderError(#[from] BuilderError),
}
