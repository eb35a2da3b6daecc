//! Error types for the tessera-serializer crate.

use crate::events::SerializeEventKind;
use thiserror::Error;

/// Errors raised during a serialization pass.
///
/// Failures are never recovered locally: a failing component or listener
/// aborts the whole pass. Failures inside nested `to_object` calls are
/// wrapped once per level, so the chain of [`SerializeError::ComponentFailed`]
/// records the path from the top-level value down to the originating one.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("{component} failed while serializing {subject}")]
    ComponentFailed {
        component: &'static str,
        subject: String,
        #[source]
        source: Box<SerializeError>,
    },

    #[error("{event} listener failed for {subject}")]
    ListenerFailed {
        event: SerializeEventKind,
        subject: String,
        #[source]
        source: Box<SerializeError>,
    },

    #[error("Cannot serialize {subject}: {reason}")]
    Failed { subject: String, reason: String },
}

impl SerializeError {
    /// Leaf failure raised by a component or listener.
    pub fn failed(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        SerializeError::Failed {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// The innermost error, raised where the failure originated.
    pub fn origin(&self) -> &SerializeError {
        let mut current = self;
        while let SerializeError::ComponentFailed { source, .. }
        | SerializeError::ListenerFailed { source, .. } = current
        {
            current = source.as_ref();
        }
        current
    }

    /// Subjects from the outermost value to the originating one.
    pub fn subject_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        loop {
            match current {
                SerializeError::ComponentFailed {
                    subject, source, ..
                }
                | SerializeError::ListenerFailed {
                    subject, source, ..
                } => {
                    if path.last() != Some(&subject.as_str()) {
                        path.push(subject.as_str());
                    }
                    current = source.as_ref();
                }
                SerializeError::Failed { subject, .. } => {
                    if path.last() != Some(&subject.as_str()) {
                        path.push(subject.as_str());
                    }
                    return path;
                }
            }
        }
    }
}
