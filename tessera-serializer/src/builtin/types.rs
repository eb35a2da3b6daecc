//! Components for type nodes.
//!
//! [`TypeSerializer`] writes the `type` discriminant before any variant
//! component adds its fields, so `type` is always the first key.

use super::{Subject, TYPE, downcast, insert_list, nested, nested_all};
use crate::component::{Describe, Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::Value;
use tessera_model::{ModelKind, Type, TypeKind};

fn is_type_kind(value: &Subject, kind: TypeKind) -> bool {
    value.model_kind() == ModelKind::Type(kind)
}

/// Writes the `type` discriminant of every type node.
pub struct TypeSerializer;

impl SerializerComponent<Subject> for TypeSerializer {
    fn name(&self) -> &'static str {
        "TypeSerializer"
    }

    fn group(&self) -> Group<Subject> {
        TYPE
    }

    fn priority(&self) -> i32 {
        1000
    }

    fn supports(&self, value: &Subject) -> bool {
        value.is::<Type>()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        _serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let ty = downcast::<Type>(value, self.name())?;
        output.insert("type".to_string(), Value::from(ty.kind().as_str()));
        Ok(output)
    }
}

/// Declares a component for one [`Type`] variant.
///
/// The body receives the matched variant's fields and appends to `output`.
macro_rules! type_serializer {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:ident,
        |$serializer:ident, $output:ident, $pattern:pat_param| $body:block
    ) => {
        $(#[$meta])*
        pub struct $name;

        impl SerializerComponent<Subject> for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn group(&self) -> Group<Subject> {
                TYPE
            }

            fn supports(&self, value: &Subject) -> bool {
                is_type_kind(value, TypeKind::$kind)
            }

            #[allow(unused_variables)]
            fn to_object(
                &self,
                value: &Subject,
                mut $output: Output,
                $serializer: &Serializer<Subject>,
            ) -> Result<Output, SerializeError> {
                let $pattern = downcast::<Type>(value, self.name())? else {
                    return Err(SerializeError::failed(
                        value.describe(),
                        concat!("expected a ", stringify!($kind), " type"),
                    ));
                };
                $body
                Ok($output)
            }
        }
    };
}

type_serializer!(
    /// `elementType` of `T[]`.
    ArrayTypeSerializer, Array,
    |serializer, output, Type::Array { element_type }| {
        output.insert(
            "elementType".to_string(),
            nested(serializer, &**element_type)?,
        );
    }
);

type_serializer!(
    IntersectionTypeSerializer, Intersection,
    |serializer, output, Type::Intersection { types }| {
        insert_list(&mut output, "types", nested_all(serializer, types)?);
    }
);

type_serializer!(
    IntrinsicTypeSerializer, Intrinsic,
    |serializer, output, Type::Intrinsic { name }| {
        output.insert("name".to_string(), Value::from(name.as_str()));
    }
);

type_serializer!(
    /// Writes the target as `id`; the target reflection is never expanded.
    ReferenceTypeSerializer, Reference,
    |serializer, output, Type::Reference { name, type_arguments, target, external_url }| {
        output.insert("name".to_string(), Value::from(name.as_str()));
        if let Some(id) = target {
            output.insert("id".to_string(), Value::from(*id));
        }
        insert_list(
            &mut output,
            "typeArguments",
            nested_all(serializer, type_arguments)?,
        );
        if let Some(url) = external_url {
            output.insert("externalUrl".to_string(), Value::from(url.as_str()));
        }
    }
);

type_serializer!(
    /// Inline object types carry their declaration.
    ReflectionTypeSerializer, Reflection,
    |serializer, output, Type::Reflection { declaration }| {
        output.insert(
            "declaration".to_string(),
            nested(serializer, &**declaration)?,
        );
    }
);

type_serializer!(
    StringLiteralTypeSerializer, StringLiteral,
    |serializer, output, Type::StringLiteral { value }| {
        output.insert("value".to_string(), Value::from(value.as_str()));
    }
);

type_serializer!(
    TupleTypeSerializer, Tuple,
    |serializer, output, Type::Tuple { elements }| {
        insert_list(&mut output, "elements", nested_all(serializer, elements)?);
    }
);

type_serializer!(
    TypeOperatorTypeSerializer, TypeOperator,
    |serializer, output, Type::TypeOperator { operator, target }| {
        output.insert("operator".to_string(), Value::from(operator.as_str()));
        output.insert("target".to_string(), nested(serializer, &**target)?);
    }
);

type_serializer!(
    TypeParameterTypeSerializer, TypeParameter,
    |serializer, output, Type::TypeParameter { name, constraint }| {
        output.insert("name".to_string(), Value::from(name.as_str()));
        if let Some(constraint) = constraint {
            output.insert(
                "constraint".to_string(),
                nested(serializer, &**constraint)?,
            );
        }
    }
);

type_serializer!(
    UnionTypeSerializer, Union,
    |serializer, output, Type::Union { types }| {
        insert_list(&mut output, "types", nested_all(serializer, types)?);
    }
);

type_serializer!(
    UnknownTypeSerializer, Unknown,
    |serializer, output, Type::Unknown { name }| {
        output.insert("name".to_string(), Value::from(name.as_str()));
    }
);
