//! Type nodes attached to reflections.

use crate::reflection::{DeclarationReflection, ReflectionId};
use serde::Deserialize;

/// Discriminant of a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Array,
    Intersection,
    Intrinsic,
    Reference,
    Reflection,
    StringLiteral,
    Tuple,
    TypeOperator,
    TypeParameter,
    Union,
    Unknown,
}

impl TypeKind {
    /// Value of the `type` field in the output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Array => "array",
            TypeKind::Intersection => "intersection",
            TypeKind::Intrinsic => "intrinsic",
            TypeKind::Reference => "reference",
            TypeKind::Reflection => "reflection",
            TypeKind::StringLiteral => "stringLiteral",
            TypeKind::Tuple => "tuple",
            TypeKind::TypeOperator => "typeOperator",
            TypeKind::TypeParameter => "typeParameter",
            TypeKind::Union => "union",
            TypeKind::Unknown => "unknown",
        }
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Type {
    /// `T[]`
    #[serde(rename_all = "camelCase")]
    Array { element_type: Box<Type> },

    /// `A & B`
    Intersection { types: Vec<Type> },

    /// Built-in types such as `string` or `void`.
    Intrinsic { name: String },

    /// A named type, optionally resolved to a reflection in the project.
    #[serde(rename_all = "camelCase")]
    Reference {
        name: String,
        #[serde(default)]
        type_arguments: Vec<Type>,
        /// Id of the referenced reflection. Never followed when serializing.
        #[serde(default)]
        target: Option<ReflectionId>,
        /// Filled by link resolution for types outside the project.
        #[serde(default)]
        external_url: Option<String>,
    },

    /// An inline object type.
    Reflection { declaration: Box<DeclarationReflection> },

    StringLiteral { value: String },

    Tuple { elements: Vec<Type> },

    /// `keyof T`, `readonly T[]`, ...
    TypeOperator { operator: String, target: Box<Type> },

    TypeParameter {
        name: String,
        #[serde(default)]
        constraint: Option<Box<Type>>,
    },

    Union { types: Vec<Type> },

    /// Anything the converter could not classify.
    Unknown { name: String },
}

impl Type {
    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Array { .. } => TypeKind::Array,
            Type::Intersection { .. } => TypeKind::Intersection,
            Type::Intrinsic { .. } => TypeKind::Intrinsic,
            Type::Reference { .. } => TypeKind::Reference,
            Type::Reflection { .. } => TypeKind::Reflection,
            Type::StringLiteral { .. } => TypeKind::StringLiteral,
            Type::Tuple { .. } => TypeKind::Tuple,
            Type::TypeOperator { .. } => TypeKind::TypeOperator,
            Type::TypeParameter { .. } => TypeKind::TypeParameter,
            Type::Union { .. } => TypeKind::Union,
            Type::Unknown { .. } => TypeKind::Unknown,
        }
    }

    pub fn intrinsic(name: impl Into<String>) -> Self {
        Type::Intrinsic { name: name.into() }
    }

    /// Unresolved reference without type arguments.
    pub fn reference(name: impl Into<String>) -> Self {
        Type::Reference {
            name: name.into(),
            type_arguments: Vec::new(),
            target: None,
            external_url: None,
        }
    }
}
