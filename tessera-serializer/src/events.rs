//! Begin/end hooks around a top-level serialization pass.

use crate::component::{Describe, Output};
use crate::error::SerializeError;
use std::fmt;
use std::path::PathBuf;

/// Observable points of [`Serializer::serialize_entry_point`](crate::Serializer::serialize_entry_point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializeEventKind {
    /// Raised before any component runs; listeners may seed the output.
    Begin,
    /// Raised with the finished output; listeners may post-process it.
    End,
}

impl SerializeEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SerializeEventKind::Begin => "begin",
            SerializeEventKind::End => "end",
        }
    }
}

impl fmt::Display for SerializeEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context a caller attaches to an event, for listeners only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeEventData {
    pub output_directory: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

/// Per-event data for an entry-point pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPointHooks {
    pub begin: Option<SerializeEventData>,
    pub end: Option<SerializeEventData>,
}

/// The event handed to listeners.
#[derive(Debug)]
pub struct SerializeEvent<'a, V: ?Sized> {
    pub kind: SerializeEventKind,
    /// The value being serialized.
    pub subject: &'a V,
    /// The accumulator: the seed at begin, the finished object at end.
    pub output: Output,
    pub output_directory: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
}

impl<'a, V: ?Sized> SerializeEvent<'a, V> {
    pub(crate) fn new(
        kind: SerializeEventKind,
        subject: &'a V,
        output: Output,
        data: Option<SerializeEventData>,
    ) -> Self {
        let data = data.unwrap_or_default();
        Self {
            kind,
            subject,
            output,
            output_directory: data.output_directory,
            output_file: data.output_file,
        }
    }
}

/// Synchronous listener lists, one per event kind.
#[allow(clippy::type_complexity)]
pub(crate) struct EventDispatcher<V: ?Sized> {
    begin: Vec<Box<dyn Fn(&mut SerializeEvent<'_, V>) -> Result<(), SerializeError>>>,
    end: Vec<Box<dyn Fn(&mut SerializeEvent<'_, V>) -> Result<(), SerializeError>>>,
}

impl<V: ?Sized + Describe> EventDispatcher<V> {
    pub(crate) fn new() -> Self {
        Self {
            begin: Vec::new(),
            end: Vec::new(),
        }
    }

    pub(crate) fn on(
        &mut self,
        kind: SerializeEventKind,
        listener: Box<dyn Fn(&mut SerializeEvent<'_, V>) -> Result<(), SerializeError>>,
    ) {
        match kind {
            SerializeEventKind::Begin => self.begin.push(listener),
            SerializeEventKind::End => self.end.push(listener),
        }
    }

    pub(crate) fn listener_count(&self, kind: SerializeEventKind) -> usize {
        match kind {
            SerializeEventKind::Begin => self.begin.len(),
            SerializeEventKind::End => self.end.len(),
        }
    }

    /// Run listeners in registration order; the first failure stops the rest.
    pub(crate) fn trigger(&self, event: &mut SerializeEvent<'_, V>) -> Result<(), SerializeError> {
        let listeners = match event.kind {
            SerializeEventKind::Begin => &self.begin,
            SerializeEventKind::End => &self.end,
        };
        for listener in listeners {
            listener(&mut *event).map_err(|source| SerializeError::ListenerFailed {
                event: event.kind,
                subject: event.subject.describe(),
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}
