//! Comments, source locations and decorators.

use crate::types::Type;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    /// First paragraph.
    pub short_text: String,
    /// Remaining paragraphs.
    pub text: String,
    /// Contents of the `@returns` tag.
    pub returns: Option<String>,
    pub tags: Vec<CommentTag>,
}

impl Comment {
    pub fn new(short_text: impl Into<String>) -> Self {
        Self {
            short_text: short_text.into(),
            ..Default::default()
        }
    }

    pub fn has_visible_content(&self) -> bool {
        !self.short_text.is_empty() || !self.text.is_empty() || !self.tags.is_empty()
    }
}

/// A block tag such as `@param name description`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTag {
    /// Tag name without the `@`.
    pub tag_name: String,
    #[serde(default)]
    pub param_name: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl CommentTag {
    pub fn new(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            param_name: None,
            text: text.into(),
        }
    }
}

/// Where a reflection was declared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    pub file_name: String,
    pub line: u32,
    #[serde(default)]
    pub character: u32,
    /// Link to the line in a hosted repository.
    #[serde(default)]
    pub url: Option<String>,
}

impl SourceReference {
    pub fn new(file_name: impl Into<String>, line: u32, character: u32) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            character,
            url: None,
        }
    }
}

/// A decorator applied to a reflection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorator {
    pub name: String,
    /// The decorator function's type.
    #[serde(default, rename = "type")]
    pub decorator_type: Option<Type>,
    /// Argument name to source text.
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}
