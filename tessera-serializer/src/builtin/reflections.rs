//! Components for the reflection hierarchy.
//!
//! [`ReflectionSerializer`] runs first for every reflection and writes the
//! identity fields. The kind-specific components then add their own fields.

use super::{
    REFLECTION, Subject, downcast, insert_list, insert_nested, insert_some, nested, nested_all,
};
use crate::component::{Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::{Map, Value};
use tessera_model::{
    DeclarationReflection, ParameterReflection, ProjectReflection, SignatureReflection,
    TypeParameterReflection,
};

/// Writes `id`, `name`, `kind`, `kindString`, `flags`, `originalName` and `comment`.
pub struct ReflectionSerializer;

impl SerializerComponent<Subject> for ReflectionSerializer {
    fn name(&self) -> &'static str {
        "ReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn priority(&self) -> i32 {
        1000
    }

    fn supports(&self, value: &Subject) -> bool {
        value.as_reflection().is_some()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let Some(base) = value.as_reflection() else {
            return Ok(output);
        };

        output.insert("id".to_string(), Value::from(base.id));
        output.insert("name".to_string(), Value::from(base.name.as_str()));
        output.insert("kind".to_string(), Value::from(base.kind.value()));
        output.insert("kindString".to_string(), Value::from(base.kind.display()));

        let flags: Map<String, Value> = base
            .flags
            .iter_set()
            .map(|flag| (flag.to_string(), Value::Bool(true)))
            .collect();
        output.insert("flags".to_string(), Value::Object(flags));

        if let Some(original) = base.original_name.as_ref().filter(|n| **n != base.name) {
            output.insert("originalName".to_string(), Value::from(original.as_str()));
        }
        if let Some(comment) = base.comment.as_ref().filter(|c| c.has_visible_content()) {
            output.insert("comment".to_string(), nested(serializer, comment)?);
        }
        Ok(output)
    }
}

/// Writes `children`, `groups` and `categories` of projects and declarations.
pub struct ContainerReflectionSerializer;

impl SerializerComponent<Subject> for ContainerReflectionSerializer {
    fn name(&self) -> &'static str {
        "ContainerReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value.as_container().is_some()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let Some(container) = value.as_container() else {
            return Ok(output);
        };
        insert_list(
            &mut output,
            "children",
            nested_all(serializer, &container.children)?,
        );
        insert_list(
            &mut output,
            "groups",
            nested_all(serializer, &container.groups)?,
        );
        insert_list(
            &mut output,
            "categories",
            nested_all(serializer, &container.categories)?,
        );
        Ok(output)
    }
}

pub struct DeclarationReflectionSerializer;

impl SerializerComponent<Subject> for DeclarationReflectionSerializer {
    fn name(&self) -> &'static str {
        "DeclarationReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value.is::<DeclarationReflection>()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let decl = downcast::<DeclarationReflection>(value, self.name())?;

        insert_nested(&mut output, "type", serializer, decl.declared_type.as_ref())?;
        insert_some(
            &mut output,
            "defaultValue",
            decl.default_value.as_deref().map(Value::from),
        );
        insert_list(
            &mut output,
            "typeParameter",
            nested_all(serializer, &decl.type_parameters)?,
        );
        insert_list(
            &mut output,
            "signatures",
            nested_all(serializer, &decl.signatures)?,
        );
        insert_nested(
            &mut output,
            "indexSignature",
            serializer,
            decl.index_signature.as_deref(),
        )?;
        insert_nested(
            &mut output,
            "getSignature",
            serializer,
            decl.get_signature.as_deref(),
        )?;
        insert_nested(
            &mut output,
            "setSignature",
            serializer,
            decl.set_signature.as_deref(),
        )?;
        insert_nested(&mut output, "overwrites", serializer, decl.overwrites.as_ref())?;
        insert_nested(
            &mut output,
            "inheritedFrom",
            serializer,
            decl.inherited_from.as_ref(),
        )?;
        insert_nested(
            &mut output,
            "implementationOf",
            serializer,
            decl.implementation_of.as_ref(),
        )?;

        for (key, types) in [
            ("extendedTypes", &decl.extended_types),
            ("extendedBy", &decl.extended_by),
            ("implementedTypes", &decl.implemented_types),
            ("implementedBy", &decl.implemented_by),
        ] {
            insert_list(&mut output, key, nested_all(serializer, types)?);
        }
        Ok(output)
    }
}

pub struct ParameterReflectionSerializer;

impl SerializerComponent<Subject> for ParameterReflectionSerializer {
    fn name(&self) -> &'static str {
        "ParameterReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value.is::<ParameterReflection>()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let parameter = downcast::<ParameterReflection>(value, self.name())?;
        insert_nested(
            &mut output,
            "type",
            serializer,
            parameter.declared_type.as_ref(),
        )?;
        insert_some(
            &mut output,
            "defaultValue",
            parameter.default_value.as_deref().map(Value::from),
        );
        Ok(output)
    }
}

/// Writes the package metadata attached to the project root.
pub struct ProjectReflectionSerializer;

impl SerializerComponent<Subject> for ProjectReflectionSerializer {
    fn name(&self) -> &'static str {
        "ProjectReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value.is::<ProjectReflection>()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        _serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let project = downcast::<ProjectReflection>(value, self.name())?;
        insert_some(
            &mut output,
            "packageName",
            project.package_name.as_deref().map(Value::from),
        );
        insert_some(
            &mut output,
            "packageVersion",
            project.package_version.as_deref().map(Value::from),
        );
        insert_some(
            &mut output,
            "readme",
            project.readme.as_deref().map(Value::from),
        );
        Ok(output)
    }
}

pub struct SignatureReflectionSerializer;

impl SerializerComponent<Subject> for SignatureReflectionSerializer {
    fn name(&self) -> &'static str {
        "SignatureReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value.is::<SignatureReflection>()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let signature = downcast::<SignatureReflection>(value, self.name())?;
        insert_nested(
            &mut output,
            "type",
            serializer,
            signature.return_type.as_ref(),
        )?;
        insert_list(
            &mut output,
            "parameters",
            nested_all(serializer, &signature.parameters)?,
        );
        insert_list(
            &mut output,
            "typeParameter",
            nested_all(serializer, &signature.type_parameters)?,
        );
        insert_nested(
            &mut output,
            "overwrites",
            serializer,
            signature.overwrites.as_ref(),
        )?;
        insert_nested(
            &mut output,
            "inheritedFrom",
            serializer,
            signature.inherited_from.as_ref(),
        )?;
        insert_nested(
            &mut output,
            "implementationOf",
            serializer,
            signature.implementation_of.as_ref(),
        )?;
        Ok(output)
    }
}

/// Writes the constraint of a type parameter as `type`.
pub struct TypeParameterReflectionSerializer;

impl SerializerComponent<Subject> for TypeParameterReflectionSerializer {
    fn name(&self) -> &'static str {
        "TypeParameterReflectionSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value.is::<TypeParameterReflection>()
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let type_parameter = downcast::<TypeParameterReflection>(value, self.name())?;
        insert_nested(
            &mut output,
            "type",
            serializer,
            type_parameter.constraint.as_ref(),
        )?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::serializer::Serializer;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tessera_model::{
        Comment, DeclarationBuilder, ParameterReflection, ProjectReflection, ReflectionFlags,
        ReflectionKind, SignatureReflection, Type, TypeParameterReflection,
    };

    #[test]
    fn test_reflection_identity_fields() {
        let mut decl = DeclarationBuilder::new()
            .id(9)
            .name("default")
            .kind(ReflectionKind::Function)
            .flags(ReflectionFlags {
                is_exported: true,
                is_const: true,
                ..Default::default()
            })
            .comment(Comment::new("Entry point."))
            .build()
            .unwrap();
        decl.base.original_name = Some("main".to_string());

        let output = Serializer::with_builtins().to_value(&decl).unwrap();
        assert_eq!(
            output,
            json!({
                "id": 9,
                "name": "default",
                "kind": 64,
                "kindString": "Function",
                "flags": { "isExported": true, "isConst": true },
                "originalName": "main",
                "comment": { "shortText": "Entry point." }
            })
        );
    }

    #[test]
    fn test_identity_fields_come_first() {
        let decl = DeclarationBuilder::new()
            .id(1)
            .name("x")
            .kind(ReflectionKind::Variable)
            .declared_type(Type::intrinsic("number"))
            .build()
            .unwrap();

        let output = Serializer::with_builtins().to_value(&decl).unwrap();
        let keys: Vec<_> = output.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "name", "kind", "kindString", "flags", "type"]);
    }

    #[test]
    fn test_empty_comment_and_same_original_name_omitted() {
        let mut decl = DeclarationBuilder::new()
            .id(2)
            .name("same")
            .kind(ReflectionKind::Variable)
            .comment(Comment::default())
            .build()
            .unwrap();
        decl.base.original_name = Some("same".to_string());

        let output = Serializer::with_builtins().to_value(&decl).unwrap();
        assert!(output.get("comment").is_none());
        assert!(output.get("originalName").is_none());
    }

    #[test]
    fn test_function_with_signature() {
        let mut signature = SignatureReflection::new(2, "identity", ReflectionKind::CallSignature);
        signature.type_parameters.push(TypeParameterReflection::new(
            3,
            "T",
            Some(Type::intrinsic("object")),
        ));
        let mut parameter = ParameterReflection::new(
            4,
            "value",
            Some(Type::TypeParameter {
                name: "T".to_string(),
                constraint: None,
            }),
        );
        parameter.default_value = Some("{}".to_string());
        signature.parameters.push(parameter);
        signature.return_type = Some(Type::TypeParameter {
            name: "T".to_string(),
            constraint: None,
        });

        let decl = DeclarationBuilder::new()
            .id(1)
            .name("identity")
            .kind(ReflectionKind::Function)
            .signature(signature)
            .build()
            .unwrap();

        let output = Serializer::with_builtins().to_value(&decl).unwrap();
        assert_eq!(
            output["signatures"],
            json!([{
                "id": 2,
                "name": "identity",
                "kind": 4096,
                "kindString": "Call signature",
                "flags": {},
                "type": { "type": "typeParameter", "name": "T" },
                "parameters": [{
                    "id": 4,
                    "name": "value",
                    "kind": 32768,
                    "kindString": "Parameter",
                    "flags": {},
                    "type": { "type": "typeParameter", "name": "T" },
                    "defaultValue": "{}"
                }],
                "typeParameter": [{
                    "id": 3,
                    "name": "T",
                    "kind": 131072,
                    "kindString": "Type parameter",
                    "flags": {},
                    "type": { "type": "intrinsic", "name": "object" }
                }]
            }])
        );
    }

    #[test]
    fn test_accessor_signatures_and_heritage() {
        let mut decl = DeclarationBuilder::new()
            .id(10)
            .name("Circle")
            .kind(ReflectionKind::Class)
            .build()
            .unwrap();
        decl.extended_types.push(Type::reference("Shape"));
        decl.implemented_by.push(Type::reference("Ring"));
        decl.get_signature = Some(Box::new(SignatureReflection::new(
            11,
            "radius",
            ReflectionKind::GetSignature,
        )));

        let output = Serializer::with_builtins().to_value(&decl).unwrap();
        assert_eq!(
            output["extendedTypes"],
            json!([{ "type": "reference", "name": "Shape" }])
        );
        assert_eq!(
            output["implementedBy"],
            json!([{ "type": "reference", "name": "Ring" }])
        );
        assert_eq!(output["getSignature"]["kindString"], json!("Get signature"));
        assert!(output.get("setSignature").is_none());
        assert!(output.get("extendedBy").is_none());
    }

    #[test]
    fn test_project_package_fields() {
        let mut project = ProjectReflection::new("shapes");
        project.package_name = Some("shapes".to_string());
        project.package_version = Some("2.1.0".to_string());
        project.readme = Some("# Shapes".to_string());

        let output = Serializer::with_builtins().to_value(&project).unwrap();
        assert_eq!(
            output,
            json!({
                "id": 0,
                "name": "shapes",
                "kind": 1,
                "kindString": "Project",
                "flags": {},
                "packageName": "shapes",
                "packageVersion": "2.1.0",
                "readme": "# Shapes"
            })
        );
    }
}
