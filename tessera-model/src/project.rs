//! Project-level queries, validation and loading.

use crate::error::ModelError;
use crate::model::Model;
use crate::reflection::{
    Container, DeclarationReflection, ProjectReflection, ReflectionId, ReflectionKind,
    SignatureReflection, TypeParameterReflection,
};
use crate::types::Type;
use std::collections::HashMap;
use std::path::Path;

impl ProjectReflection {
    /// Every reflection in the project, depth-first, the project itself first.
    ///
    /// Includes signatures, parameters, type parameters and declarations
    /// nested inside type literals, wherever a type appears: declared and
    /// return types, constraints, and inheritance or implementation links.
    pub fn reflections(&self) -> Vec<&dyn Model> {
        let mut out: Vec<&dyn Model> = Vec::new();
        out.push(self);
        for child in &self.container.children {
            collect_declaration(child, &mut out);
        }
        out
    }

    /// Get a reflection by id.
    pub fn find(&self, id: ReflectionId) -> Option<&dyn Model> {
        self.reflections()
            .into_iter()
            .find(|m| m.as_reflection().is_some_and(|base| base.id == id))
    }

    pub fn reflection_count(&self) -> usize {
        self.reflections().len()
    }

    /// Check the invariants the serializer relies on.
    ///
    /// The root must be a project with id `0`, reflection ids must be unique
    /// and every group or category child must name an existing reflection.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.base.kind != ReflectionKind::Project {
            return Err(ModelError::InvalidProject(format!(
                "root kind is {:?}",
                self.base.kind
            )));
        }
        if self.base.id != 0 {
            return Err(ModelError::InvalidProject(format!(
                "root id is {}, expected 0",
                self.base.id
            )));
        }

        let mut seen: HashMap<ReflectionId, String> = HashMap::new();
        let all = self.reflections();
        for model in &all {
            let Some(base) = model.as_reflection() else {
                continue;
            };
            if let Some(first) = seen.insert(base.id, model.label()) {
                return Err(ModelError::DuplicateId {
                    id: base.id,
                    first,
                    second: model.label(),
                });
            }
        }

        for container in all.iter().filter_map(|m| m.as_container()) {
            check_groups(container, &seen)?;
        }
        Ok(())
    }

    /// Parse a project from its JSON description.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|e| ModelError::DeserializationError(e.to_string()))
    }

    /// Load a project from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn check_groups(
    container: &Container,
    known: &HashMap<ReflectionId, String>,
) -> Result<(), ModelError> {
    for group in &container.groups {
        let category_children = group.categories.iter().flat_map(|c| c.children.iter());
        for id in group.children.iter().chain(category_children) {
            if !known.contains_key(id) {
                return Err(ModelError::DanglingGroupChild {
                    group: group.title.clone(),
                    id: *id,
                });
            }
        }
    }
    for category in &container.categories {
        for id in &category.children {
            if !known.contains_key(id) {
                return Err(ModelError::DanglingGroupChild {
                    group: category.title.clone(),
                    id: *id,
                });
            }
        }
    }
    Ok(())
}

fn collect_declaration<'a>(decl: &'a DeclarationReflection, out: &mut Vec<&'a dyn Model>) {
    out.push(decl);
    collect_type_parameters(&decl.type_parameters, out);
    for signature in decl.all_signatures() {
        collect_signature(signature, out);
    }
    let related = [&decl.overwrites, &decl.inherited_from, &decl.implementation_of];
    let hierarchy = decl
        .extended_types
        .iter()
        .chain(&decl.extended_by)
        .chain(&decl.implemented_types)
        .chain(&decl.implemented_by);
    for ty in decl
        .declared_type
        .iter()
        .chain(related.into_iter().flatten())
        .chain(hierarchy)
    {
        collect_type(ty, out);
    }
    for child in &decl.container.children {
        collect_declaration(child, out);
    }
}

fn collect_type_parameters<'a>(
    type_parameters: &'a [TypeParameterReflection],
    out: &mut Vec<&'a dyn Model>,
) {
    for type_parameter in type_parameters {
        out.push(type_parameter);
        if let Some(constraint) = &type_parameter.constraint {
            collect_type(constraint, out);
        }
    }
}

fn collect_signature<'a>(signature: &'a SignatureReflection, out: &mut Vec<&'a dyn Model>) {
    out.push(signature);
    collect_type_parameters(&signature.type_parameters, out);
    for parameter in &signature.parameters {
        out.push(parameter);
        if let Some(ty) = &parameter.declared_type {
            collect_type(ty, out);
        }
    }
    let types = [
        &signature.return_type,
        &signature.overwrites,
        &signature.inherited_from,
        &signature.implementation_of,
    ];
    for ty in types.into_iter().flatten() {
        collect_type(ty, out);
    }
}

/// Only type literals own reflections; everything else is walked for nesting.
fn collect_type<'a>(ty: &'a Type, out: &mut Vec<&'a dyn Model>) {
    match ty {
        Type::Reflection { declaration } => collect_declaration(declaration, out),
        Type::Array { element_type } => collect_type(element_type, out),
        Type::TypeOperator { target, .. } => collect_type(target, out),
        Type::TypeParameter {
            constraint: Some(constraint),
            ..
        } => collect_type(constraint, out),
        Type::Union { types } | Type::Intersection { types } => {
            for t in types {
                collect_type(t, out);
            }
        }
        Type::Tuple { elements } => {
            for t in elements {
                collect_type(t, out);
            }
        }
        Type::Reference { type_arguments, .. } => {
            for t in type_arguments {
                collect_type(t, out);
            }
        }
        Type::TypeParameter { .. }
        | Type::Intrinsic { .. }
        | Type::StringLiteral { .. }
        | Type::Unknown { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ReflectionGroup;
    use crate::reflection::{DeclarationBuilder, ParameterReflection, TypeParameterReflection};
    use pretty_assertions::assert_eq;

    fn sample_project() -> ProjectReflection {
        let mut project = ProjectReflection::new("demo");

        let mut signature = SignatureReflection::new(2, "greet", ReflectionKind::CallSignature);
        signature
            .parameters
            .push(ParameterReflection::new(3, "who", Some(Type::intrinsic("string"))));
        signature.return_type = Some(Type::intrinsic("string"));

        let greet = DeclarationBuilder::new()
            .id(1)
            .name("greet")
            .kind(ReflectionKind::Function)
            .signature(signature)
            .build()
            .unwrap();

        let literal = DeclarationReflection::new(5, "__type", ReflectionKind::TypeLiteral);
        let options = DeclarationBuilder::new()
            .id(4)
            .name("options")
            .kind(ReflectionKind::Variable)
            .declared_type(Type::Reflection {
                declaration: Box::new(literal),
            })
            .build()
            .unwrap();

        project.add_child(greet);
        project.add_child(options);
        project.container.groups.push(ReflectionGroup::new(
            "Functions",
            ReflectionKind::Function,
            vec![1],
        ));
        project
    }

    #[test]
    fn test_reflections_depth_first() {
        let project = sample_project();
        let ids: Vec<_> = project
            .reflections()
            .iter()
            .filter_map(|m| m.as_reflection().map(|b| b.id))
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(project.reflection_count(), 6);
    }

    #[test]
    fn test_find_nested_parameter() {
        let project = sample_project();
        let found = project.find(3).unwrap();
        assert_eq!(found.label(), "Parameter who (id 3)");
        assert!(project.find(42).is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample_project().validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_id() {
        let mut project = sample_project();
        project.add_child(DeclarationReflection::new(
            3,
            "clash",
            ReflectionKind::Variable,
        ));
        let err = project.validate().unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId { id: 3, .. }));
        assert!(err.to_string().contains("Variable clash (id 3)"));
    }

    #[test]
    fn test_validate_dangling_group_child() {
        let mut project = sample_project();
        project.container.groups.push(ReflectionGroup::new(
            "Classes",
            ReflectionKind::Class,
            vec![99],
        ));
        assert!(matches!(
            project.validate(),
            Err(ModelError::DanglingGroupChild { id: 99, .. })
        ));
    }

    #[test]
    fn test_validate_root_id() {
        let mut project = sample_project();
        project.base.id = 7;
        assert!(matches!(
            project.validate(),
            Err(ModelError::InvalidProject(_))
        ));
    }

    /// Function 1 with `T extends { ... }`, the literal's declaration id supplied.
    fn constrained_function(literal_id: ReflectionId) -> ProjectReflection {
        let literal = DeclarationReflection::new(literal_id, "__type", ReflectionKind::TypeLiteral);
        let type_parameter = TypeParameterReflection::new(
            2,
            "T",
            Some(Type::Reflection {
                declaration: Box::new(literal),
            }),
        );
        let mut function = DeclarationReflection::new(1, "pick", ReflectionKind::Function);
        function.type_parameters.push(type_parameter);

        let mut project = ProjectReflection::new("demo");
        project.add_child(function);
        project
    }

    #[test]
    fn test_reflections_include_constraint_literals() {
        let project = constrained_function(3);
        assert_eq!(project.reflection_count(), 4);
        assert_eq!(project.find(3).unwrap().label(), "Type literal __type (id 3)");
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_id_inside_constraint() {
        let project = constrained_function(1);
        assert!(matches!(
            project.validate(),
            Err(ModelError::DuplicateId { id: 1, .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_id_inside_extended_type() {
        let mut project = sample_project();
        let literal = DeclarationReflection::new(4, "__type", ReflectionKind::TypeLiteral);
        let mut class = DeclarationReflection::new(6, "Shape", ReflectionKind::Class);
        class.extended_types.push(Type::Reflection {
            declaration: Box::new(literal),
        });
        project.add_child(class);

        assert!(matches!(
            project.validate(),
            Err(ModelError::DuplicateId { id: 4, .. })
        ));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = ProjectReflection::from_json("{ not json");
        assert!(matches!(result, Err(ModelError::DeserializationError(_))));
    }
}
