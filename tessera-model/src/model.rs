//! The capability interface every serializable value implements.
//!
//! The serializer never probes concrete types ad hoc. Coarse routing matches
//! on [`ModelKind`], finer eligibility checks a capability accessor
//! ([`Model::as_reflection`], [`Model::as_container`], [`Model::sources`]) or
//! performs a checked downcast through [`<dyn Model>::downcast_ref`].

use crate::comment::{Comment, CommentTag, SourceReference};
use crate::group::{ReflectionCategory, ReflectionGroup};
use crate::reflection::{
    Container, DeclarationReflection, ParameterReflection, ProjectReflection, ReflectionBase,
    ReflectionKind, SignatureReflection, TypeParameterReflection,
};
use crate::types::{Type, TypeKind};
use std::any::Any;
use std::fmt;

/// Discriminant of a value in the model graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Reflection(ReflectionKind),
    Type(TypeKind),
    Comment,
    CommentTag,
    ReflectionGroup,
    ReflectionCategory,
}

impl ModelKind {
    pub fn is_reflection(&self) -> bool {
        matches!(self, ModelKind::Reflection(_))
    }

    pub fn is_type(&self) -> bool {
        matches!(self, ModelKind::Type(_))
    }
}

/// Upcast helper so `dyn Model` can hand out `&dyn Any`.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value the serializer can visit.
pub trait Model: AsAny + fmt::Debug {
    /// Discriminant used for group routing.
    fn model_kind(&self) -> ModelKind;

    /// Human-readable identity used when reporting failures.
    fn label(&self) -> String;

    /// Fields shared by every reflection.
    fn as_reflection(&self) -> Option<&ReflectionBase> {
        None
    }

    /// Children, groups and categories of container reflections.
    fn as_container(&self) -> Option<&Container> {
        None
    }

    /// Source locations, for values that track where they were declared.
    fn sources(&self) -> Option<&[SourceReference]> {
        None
    }
}

impl<'m> dyn Model + 'm {
    /// Checked access to the concrete value.
    pub fn downcast_ref<T: Model + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Model + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

fn reflection_label(base: &ReflectionBase) -> String {
    format!("{} {} (id {})", base.kind.display(), base.name, base.id)
}

impl Model for ProjectReflection {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Reflection(self.base.kind)
    }

    fn label(&self) -> String {
        reflection_label(&self.base)
    }

    fn as_reflection(&self) -> Option<&ReflectionBase> {
        Some(&self.base)
    }

    fn as_container(&self) -> Option<&Container> {
        Some(&self.container)
    }
}

impl Model for DeclarationReflection {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Reflection(self.base.kind)
    }

    fn label(&self) -> String {
        reflection_label(&self.base)
    }

    fn as_reflection(&self) -> Option<&ReflectionBase> {
        Some(&self.base)
    }

    fn as_container(&self) -> Option<&Container> {
        Some(&self.container)
    }

    fn sources(&self) -> Option<&[SourceReference]> {
        Some(&self.sources)
    }
}

impl Model for SignatureReflection {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Reflection(self.base.kind)
    }

    fn label(&self) -> String {
        reflection_label(&self.base)
    }

    fn as_reflection(&self) -> Option<&ReflectionBase> {
        Some(&self.base)
    }

    fn sources(&self) -> Option<&[SourceReference]> {
        Some(&self.sources)
    }
}

impl Model for ParameterReflection {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Reflection(self.base.kind)
    }

    fn label(&self) -> String {
        reflection_label(&self.base)
    }

    fn as_reflection(&self) -> Option<&ReflectionBase> {
        Some(&self.base)
    }
}

impl Model for TypeParameterReflection {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Reflection(self.base.kind)
    }

    fn label(&self) -> String {
        reflection_label(&self.base)
    }

    fn as_reflection(&self) -> Option<&ReflectionBase> {
        Some(&self.base)
    }
}

impl Model for Type {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Type(self.kind())
    }

    fn label(&self) -> String {
        format!("{} type", self.kind().as_str())
    }
}

impl Model for Comment {
    fn model_kind(&self) -> ModelKind {
        ModelKind::Comment
    }

    fn label(&self) -> String {
        "comment".to_string()
    }
}

impl Model for CommentTag {
    fn model_kind(&self) -> ModelKind {
        ModelKind::CommentTag
    }

    fn label(&self) -> String {
        format!("@{} tag", self.tag_name)
    }
}

impl Model for ReflectionGroup {
    fn model_kind(&self) -> ModelKind {
        ModelKind::ReflectionGroup
    }

    fn label(&self) -> String {
        format!("group \"{}\"", self.title)
    }
}

impl Model for ReflectionCategory {
    fn model_kind(&self) -> ModelKind {
        ModelKind::ReflectionCategory
    }

    fn label(&self) -> String {
        format!("category \"{}\"", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::DeclarationBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_downcast_to_concrete_type() {
        let decl = DeclarationBuilder::new()
            .id(4)
            .name("count")
            .kind(ReflectionKind::Variable)
            .build()
            .unwrap();
        let value: &dyn Model = &decl;

        assert!(value.is::<DeclarationReflection>());
        assert!(value.downcast_ref::<SignatureReflection>().is_none());
        assert_eq!(value.downcast_ref::<DeclarationReflection>().unwrap().base.name, "count");
    }

    #[test]
    fn test_capabilities_by_value() {
        let project = ProjectReflection::new("demo");
        let value: &dyn Model = &project;
        assert!(value.as_container().is_some());
        assert!(value.sources().is_none());

        let ty = Type::Intrinsic { name: "string".into() };
        let value: &dyn Model = &ty;
        assert!(value.as_reflection().is_none());
        assert_eq!(value.model_kind(), ModelKind::Type(TypeKind::Intrinsic));
    }

    #[test]
    fn test_reflection_label() {
        let decl = DeclarationBuilder::new()
            .id(7)
            .name("Color")
            .kind(ReflectionKind::Enum)
            .build()
            .unwrap();
        assert_eq!(decl.label(), "Enum Color (id 7)");
    }
}
