//! Groups and categories organising a container's children.

use crate::reflection::{ReflectionId, ReflectionKind};
use serde::Deserialize;

/// Children of one kind, e.g. all classes of a module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionGroup {
    pub title: String,
    pub kind: ReflectionKind,
    /// Ids of the grouped children; serialized as ids, never expanded.
    #[serde(default)]
    pub children: Vec<ReflectionId>,
    #[serde(default)]
    pub categories: Vec<ReflectionCategory>,
}

impl ReflectionGroup {
    pub fn new(title: impl Into<String>, kind: ReflectionKind, children: Vec<ReflectionId>) -> Self {
        Self {
            title: title.into(),
            kind,
            children,
            categories: Vec::new(),
        }
    }
}

/// Children sharing a `@category` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionCategory {
    pub title: String,
    #[serde(default)]
    pub children: Vec<ReflectionId>,
}

impl ReflectionCategory {
    pub fn new(title: impl Into<String>, children: Vec<ReflectionId>) -> Self {
        Self {
            title: title.into(),
            children,
        }
    }
}
