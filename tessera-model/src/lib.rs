//! # tessera-model
//!
//! Reflection model consumed by the Tessera serializer.
//!
//! This crate provides the object graph the serializer turns into plain data:
//!
//! - **Reflections**: Project, Declaration, Signature, Parameter, TypeParameter
//! - **Types**: Array, Union, Reference, Reflection (type literal), ...
//! - **Comments**: Comment, CommentTag, SourceReference, Decorator
//! - **Grouping**: ReflectionGroup, ReflectionCategory
//! - **Model trait**: the capability interface the serializer routes on
//!
//! Entities own their children (container to contained part). Back-references
//! such as group members or reference targets are plain ids, so walking the
//! model from the project downward never revisits a value.
//!
//! ## Example
//!
//! ```rust
//! use tessera_model::{DeclarationBuilder, Model, ModelKind, ProjectReflection, ReflectionKind, Type};
//!
//! let mut project = ProjectReflection::new("my-lib");
//!
//! let version = DeclarationBuilder::new()
//!     .id(1)
//!     .name("VERSION")
//!     .kind(ReflectionKind::Variable)
//!     .declared_type(Type::intrinsic("string"))
//!     .default_value("\"1.0.0\"")
//!     .build()
//!     .unwrap();
//!
//! project.add_child(version);
//!
//! assert!(project.validate().is_ok());
//! assert_eq!(project.reflection_count(), 2);
//!
//! let found = project.find(1).unwrap();
//! assert_eq!(found.model_kind(), ModelKind::Reflection(ReflectionKind::Variable));
//! ```

pub mod comment;
pub mod error;
pub mod group;
pub mod model;
pub mod project;
pub mod reflection;
pub mod types;

pub use comment::{Comment, CommentTag, Decorator, SourceReference};
pub use error::ModelError;
pub use group::{ReflectionCategory, ReflectionGroup};
pub use model::{AsAny, Model, ModelKind};
pub use reflection::{
    BuilderError, Container, DeclarationBuilder, DeclarationReflection, ParameterReflection,
    ProjectReflection, ReflectionBase, ReflectionFlags, ReflectionId, ReflectionKind,
    SignatureReflection, TypeParameterReflection,
};
pub use types::{Type, TypeKind};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROJECT_JSON: &str = r#"{
        "id": 0,
        "name": "shapes",
        "kind": "project",
        "children": [
            {
                "id": 1,
                "name": "Shape",
                "kind": "interface",
                "flags": { "isExported": true },
                "comment": { "shortText": "A drawable shape." },
                "sources": [{ "fileName": "src/shape.ts", "line": 3, "character": 17 }],
                "children": [
                    {
                        "id": 2,
                        "name": "area",
                        "kind": "method",
                        "signatures": [
                            {
                                "id": 3,
                                "name": "area",
                                "kind": "callSignature",
                                "type": { "type": "intrinsic", "name": "number" }
                            }
                        ]
                    }
                ],
                "groups": [{ "title": "Methods", "kind": "method", "children": [2] }]
            }
        ],
        "groups": [{ "title": "Interfaces", "kind": "interface", "children": [1] }]
    }"#;

    /// Load a project description and walk it.
    #[test]
    fn test_load_and_walk() {
        let project = ProjectReflection::from_json(PROJECT_JSON).unwrap();
        project.validate().unwrap();

        assert_eq!(project.base.name, "shapes");
        assert_eq!(project.reflection_count(), 4);

        let shape = project
            .find(1)
            .and_then(|m| m.downcast_ref::<DeclarationReflection>())
            .unwrap();
        assert!(shape.base.flags.is_exported);
        assert_eq!(
            shape.base.comment.as_ref().unwrap().short_text,
            "A drawable shape."
        );
        assert_eq!(shape.sources[0].file_name, "src/shape.ts");
        assert_eq!(shape.container.groups[0].children, vec![2]);

        let signature = project
            .find(3)
            .and_then(|m| m.downcast_ref::<SignatureReflection>())
            .unwrap();
        assert_eq!(signature.return_type, Some(Type::intrinsic("number")));
    }

    /// Test file loading.
    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("project.json");
        std::fs::write(&path, PROJECT_JSON).unwrap();

        let project = ProjectReflection::load_from_file(&path).unwrap();
        assert_eq!(project.container.children.len(), 1);

        let missing = ProjectReflection::load_from_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ModelError::IoError(_))));
    }

    #[test]
    fn test_project_capabilities() {
        let project = ProjectReflection::from_json(PROJECT_JSON).unwrap();
        let root: &dyn Model = &project;
        assert_eq!(
            root.model_kind(),
            ModelKind::Reflection(ReflectionKind::Project)
        );
        assert_eq!(root.as_container().unwrap().children.len(), 1);
        assert!(root.sources().is_none());
    }
}
