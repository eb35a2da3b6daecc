//! Components serializing the reflection model.
//!
//! Registration order defines group order: comments, reflections, source
//! containers, types, then groupings. Declarations and signatures match both
//! the `reflection` and the `source-container` group.

mod comments;
mod decorators;
mod groups;
mod reflections;
mod sources;
mod types;

pub use comments::{CommentSerializer, CommentTagSerializer};
pub use decorators::DecoratorContainerSerializer;
pub use groups::{ReflectionCategorySerializer, ReflectionGroupSerializer};
pub use reflections::{
    ContainerReflectionSerializer, DeclarationReflectionSerializer, ParameterReflectionSerializer,
    ProjectReflectionSerializer, ReflectionSerializer, SignatureReflectionSerializer,
    TypeParameterReflectionSerializer,
};
pub use sources::SourceReferenceContainerSerializer;
pub use types::{
    ArrayTypeSerializer, IntersectionTypeSerializer, IntrinsicTypeSerializer,
    ReferenceTypeSerializer, ReflectionTypeSerializer, StringLiteralTypeSerializer,
    TupleTypeSerializer, TypeOperatorTypeSerializer, TypeParameterTypeSerializer, TypeSerializer,
    UnionTypeSerializer, UnknownTypeSerializer,
};

use crate::component::{Describe, Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::Value;
use tessera_model::{Model, ModelKind};

/// The value type the built-in registry works on.
pub type Subject = dyn Model;

impl Describe for dyn Model {
    fn describe(&self) -> String {
        self.label()
    }
}

fn is_comment(value: &Subject) -> bool {
    matches!(value.model_kind(), ModelKind::Comment | ModelKind::CommentTag)
}

fn is_reflection(value: &Subject) -> bool {
    value.model_kind().is_reflection()
}

fn has_sources(value: &Subject) -> bool {
    value.sources().is_some()
}

fn is_type(value: &Subject) -> bool {
    value.model_kind().is_type()
}

fn is_grouping(value: &Subject) -> bool {
    matches!(
        value.model_kind(),
        ModelKind::ReflectionGroup | ModelKind::ReflectionCategory
    )
}

pub const COMMENT: Group<Subject> = Group::new("comment", is_comment);
pub const REFLECTION: Group<Subject> = Group::new("reflection", is_reflection);
pub const SOURCE_CONTAINER: Group<Subject> = Group::new("source-container", has_sources);
pub const TYPE: Group<Subject> = Group::new("type", is_type);
pub const GROUPING: Group<Subject> = Group::new("grouping", is_grouping);

/// Every built-in component, in registration order.
pub fn builtin_components() -> Vec<Box<dyn SerializerComponent<Subject>>> {
    vec![
        Box::new(CommentTagSerializer),
        Box::new(CommentSerializer),
        Box::new(ReflectionSerializer),
        Box::new(ContainerReflectionSerializer),
        Box::new(DeclarationReflectionSerializer),
        Box::new(ParameterReflectionSerializer),
        Box::new(ProjectReflectionSerializer),
        Box::new(SignatureReflectionSerializer),
        Box::new(TypeParameterReflectionSerializer),
        Box::new(SourceReferenceContainerSerializer),
        Box::new(TypeSerializer),
        Box::new(ArrayTypeSerializer),
        Box::new(IntersectionTypeSerializer),
        Box::new(IntrinsicTypeSerializer),
        Box::new(ReferenceTypeSerializer),
        Box::new(ReflectionTypeSerializer),
        Box::new(StringLiteralTypeSerializer),
        Box::new(TupleTypeSerializer),
        Box::new(TypeOperatorTypeSerializer),
        Box::new(TypeParameterTypeSerializer),
        Box::new(UnionTypeSerializer),
        Box::new(UnknownTypeSerializer),
        Box::new(DecoratorContainerSerializer),
        Box::new(ReflectionCategorySerializer),
        Box::new(ReflectionGroupSerializer),
    ]
}

impl Serializer<Subject> {
    /// A registry holding every built-in component.
    pub fn with_builtins() -> Self {
        let mut serializer = Self::new();
        for component in builtin_components() {
            serializer.add_serializer(component);
        }
        serializer
    }
}

/// Checked access to the concrete value a component declared support for.
pub(crate) fn downcast<'v, T: Model + 'static>(
    value: &'v Subject,
    component: &'static str,
) -> Result<&'v T, SerializeError> {
    value.downcast_ref::<T>().ok_or_else(|| {
        SerializeError::failed(
            value.label(),
            format!("{component} received an unsupported value"),
        )
    })
}

/// Serialize a nested model value through the registry.
pub(crate) fn nested<T: Model + 'static>(
    serializer: &Serializer<Subject>,
    value: &T,
) -> Result<Value, SerializeError> {
    serializer.to_value(value)
}

pub(crate) fn nested_all<'a, T, I>(
    serializer: &Serializer<Subject>,
    values: I,
) -> Result<Vec<Value>, SerializeError>
where
    T: Model + 'static,
    I: IntoIterator<Item = &'a T>,
{
    values.into_iter().map(|v| nested(serializer, v)).collect()
}

/// Insert `value` unless it is an empty array.
pub(crate) fn insert_list(output: &mut Output, key: &str, values: Vec<Value>) {
    if !values.is_empty() {
        output.insert(key.to_string(), Value::Array(values));
    }
}

pub(crate) fn insert_some(output: &mut Output, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        output.insert(key.to_string(), value);
    }
}

/// Serialize an optional nested value and insert it when present.
pub(crate) fn insert_nested<T: Model + 'static>(
    output: &mut Output,
    key: &str,
    serializer: &Serializer<Subject>,
    value: Option<&T>,
) -> Result<(), SerializeError> {
    let value = value.map(|v| nested(serializer, v)).transpose()?;
    insert_some(output, key, value);
    Ok(())
}
