//! Reflection kinds, flags and the reflection structures of the model.

use crate::comment::{Comment, Decorator, SourceReference};
use crate::group::{ReflectionCategory, ReflectionGroup};
use crate::types::Type;
use serde::Deserialize;
use thiserror::Error;

/// Identifier of a reflection, unique within a project. The project is always `0`.
pub type ReflectionId = u32;

/// Errors related to building reflections.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Reflection ID is required")]
    MissingId,

    #[error("Reflection name is required")]
    MissingName,

    #[error("Reflection kind is required")]
    MissingKind,

    #[error("{0:?} is not a declaration kind")]
    InvalidKind(ReflectionKind),
}

/// The kind of a reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReflectionKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    CallSignature,
    IndexSignature,
    ConstructorSignature,
    Parameter,
    TypeLiteral,
    TypeParameter,
    Accessor,
    GetSignature,
    SetSignature,
    TypeAlias,
    Reference,
}

impl ReflectionKind {
    /// Numeric value written to the output, one bit per kind.
    pub fn value(&self) -> u32 {
        let bit = match self {
            ReflectionKind::Project => 0,
            ReflectionKind::Module => 1,
            ReflectionKind::Namespace => 2,
            ReflectionKind::Enum => 3,
            ReflectionKind::EnumMember => 4,
            ReflectionKind::Variable => 5,
            ReflectionKind::Function => 6,
            ReflectionKind::Class => 7,
            ReflectionKind::Interface => 8,
            ReflectionKind::Constructor => 9,
            ReflectionKind::Property => 10,
            ReflectionKind::Method => 11,
            ReflectionKind::CallSignature => 12,
            ReflectionKind::IndexSignature => 13,
            ReflectionKind::ConstructorSignature => 14,
            ReflectionKind::Parameter => 15,
            ReflectionKind::TypeLiteral => 16,
            ReflectionKind::TypeParameter => 17,
            ReflectionKind::Accessor => 18,
            ReflectionKind::GetSignature => 19,
            ReflectionKind::SetSignature => 20,
            ReflectionKind::TypeAlias => 21,
            ReflectionKind::Reference => 22,
        };
        1 << bit
    }

    /// Display string, written as `kindString`.
    pub fn display(&self) -> &'static str {
        match self {
            ReflectionKind::Project => "Project",
            ReflectionKind::Module => "Module",
            ReflectionKind::Namespace => "Namespace",
            ReflectionKind::Enum => "Enum",
            ReflectionKind::EnumMember => "Enum member",
            ReflectionKind::Variable => "Variable",
            ReflectionKind::Function => "Function",
            ReflectionKind::Class => "Class",
            ReflectionKind::Interface => "Interface",
            ReflectionKind::Constructor => "Constructor",
            ReflectionKind::Property => "Property",
            ReflectionKind::Method => "Method",
            ReflectionKind::CallSignature => "Call signature",
            ReflectionKind::IndexSignature => "Index signature",
            ReflectionKind::ConstructorSignature => "Constructor signature",
            ReflectionKind::Parameter => "Parameter",
            ReflectionKind::TypeLiteral => "Type literal",
            ReflectionKind::TypeParameter => "Type parameter",
            ReflectionKind::Accessor => "Accessor",
            ReflectionKind::GetSignature => "Get signature",
            ReflectionKind::SetSignature => "Set signature",
            ReflectionKind::TypeAlias => "Type alias",
            ReflectionKind::Reference => "Reference",
        }
    }

    pub fn is_signature(&self) -> bool {
        matches!(
            self,
            ReflectionKind::CallSignature
                | ReflectionKind::IndexSignature
                | ReflectionKind::ConstructorSignature
                | ReflectionKind::GetSignature
                | ReflectionKind::SetSignature
        )
    }

    /// Whether a [`DeclarationReflection`] may carry this kind.
    pub fn is_declaration(&self) -> bool {
        !self.is_signature()
            && !matches!(
                self,
                ReflectionKind::Project | ReflectionKind::Parameter | ReflectionKind::TypeParameter
            )
    }
}

/// Boolean modifiers of a reflection. Only set flags are serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReflectionFlags {
    pub is_private: bool,
    pub is_protected: bool,
    pub is_public: bool,
    pub is_static: bool,
    pub is_exported: bool,
    pub is_external: bool,
    pub is_optional: bool,
    pub is_rest: bool,
    pub is_abstract: bool,
    pub is_const: bool,
    pub is_readonly: bool,
}

impl ReflectionFlags {
    /// camelCase names of the set flags, in declaration order.
    pub fn iter_set(&self) -> impl Iterator<Item = &'static str> {
        [
            ("isPrivate", self.is_private),
            ("isProtected", self.is_protected),
            ("isPublic", self.is_public),
            ("isStatic", self.is_static),
            ("isExported", self.is_exported),
            ("isExternal", self.is_external),
            ("isOptional", self.is_optional),
            ("isRest", self.is_rest),
            ("isAbstract", self.is_abstract),
            ("isConst", self.is_const),
            ("isReadonly", self.is_readonly),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
    }
}

/// Fields every reflection carries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionBase {
    pub id: ReflectionId,
    pub name: String,
    pub kind: ReflectionKind,
    #[serde(default)]
    pub flags: ReflectionFlags,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
    /// Types this reflection (a decorator function) is applied to.
    #[serde(default)]
    pub decorates: Vec<Type>,
    /// Name before renaming, e.g. for default exports.
    #[serde(default)]
    pub original_name: Option<String>,
}

impl ReflectionBase {
    pub fn new(id: ReflectionId, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            flags: ReflectionFlags::default(),
            comment: None,
            decorators: Vec::new(),
            decorates: Vec::new(),
            original_name: None,
        }
    }
}

/// Children and their grouping, shared by projects and declarations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub children: Vec<DeclarationReflection>,
    pub groups: Vec<ReflectionGroup>,
    pub categories: Vec<ReflectionCategory>,
}

/// Root of the model graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    #[serde(flatten)]
    pub container: Container,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub package_version: Option<String>,
    /// Readme contents, supplied by package discovery.
    #[serde(default)]
    pub readme: Option<String>,
}

impl ProjectReflection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ReflectionBase::new(0, name, ReflectionKind::Project),
            container: Container::default(),
            package_name: None,
            package_version: None,
            readme: None,
        }
    }

    pub fn add_child(&mut self, child: DeclarationReflection) {
        self.container.children.push(child);
    }
}

/// A named declaration: module, class, function, variable, property, ...
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    #[serde(flatten)]
    pub container: Container,
    #[serde(default)]
    pub sources: Vec<SourceReference>,
    #[serde(default, rename = "type")]
    pub declared_type: Option<Type>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterReflection>,
    #[serde(default)]
    pub signatures: Vec<SignatureReflection>,
    #[serde(default)]
    pub index_signature: Option<Box<SignatureReflection>>,
    #[serde(default)]
    pub get_signature: Option<Box<SignatureReflection>>,
    #[serde(default)]
    pub set_signature: Option<Box<SignatureReflection>>,
    #[serde(default)]
    pub overwrites: Option<Type>,
    #[serde(default)]
    pub inherited_from: Option<Type>,
    #[serde(default)]
    pub implementation_of: Option<Type>,
    #[serde(default)]
    pub extended_types: Vec<Type>,
    #[serde(default)]
    pub extended_by: Vec<Type>,
    #[serde(default)]
    pub implemented_types: Vec<Type>,
    #[serde(default)]
    pub implemented_by: Vec<Type>,
}

impl DeclarationReflection {
    pub fn new(id: ReflectionId, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            base: ReflectionBase::new(id, name, kind),
            container: Container::default(),
            sources: Vec::new(),
            declared_type: None,
            default_value: None,
            type_parameters: Vec::new(),
            signatures: Vec::new(),
            index_signature: None,
            get_signature: None,
            set_signature: None,
            overwrites: None,
            inherited_from: None,
            implementation_of: None,
            extended_types: Vec::new(),
            extended_by: Vec::new(),
            implemented_types: Vec::new(),
            implemented_by: Vec::new(),
        }
    }

    /// Every signature owned by this declaration, call signatures first.
    pub fn all_signatures(&self) -> impl Iterator<Item = &SignatureReflection> {
        self.signatures
            .iter()
            .chain(self.index_signature.as_deref())
            .chain(self.get_signature.as_deref())
            .chain(self.set_signature.as_deref())
    }
}

/// A call, construct, index or accessor signature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    #[serde(default)]
    pub sources: Vec<SourceReference>,
    #[serde(default)]
    pub parameters: Vec<ParameterReflection>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterReflection>,
    #[serde(default, rename = "type")]
    pub return_type: Option<Type>,
    #[serde(default)]
    pub overwrites: Option<Type>,
    #[serde(default)]
    pub inherited_from: Option<Type>,
    #[serde(default)]
    pub implementation_of: Option<Type>,
}

impl SignatureReflection {
    pub fn new(id: ReflectionId, name: impl Into<String>, kind: ReflectionKind) -> Self {
        Self {
            base: ReflectionBase::new(id, name, kind),
            sources: Vec::new(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            return_type: None,
            overwrites: None,
            inherited_from: None,
            implementation_of: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    #[serde(default, rename = "type")]
    pub declared_type: Option<Type>,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl ParameterReflection {
    pub fn new(id: ReflectionId, name: impl Into<String>, declared_type: Option<Type>) -> Self {
        Self {
            base: ReflectionBase::new(id, name, ReflectionKind::Parameter),
            declared_type,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    /// The `extends` constraint, if any.
    #[serde(default, rename = "type")]
    pub constraint: Option<Type>,
}

impl TypeParameterReflection {
    pub fn new(id: ReflectionId, name: impl Into<String>, constraint: Option<Type>) -> Self {
        Self {
            base: ReflectionBase::new(id, name, ReflectionKind::TypeParameter),
            constraint,
        }
    }
}

/// Builder for constructing [`DeclarationReflection`] instances.
#[derive(Debug, Default)]
pub struct DeclarationBuilder {
    id: Option<ReflectionId>,
    name: Option<String>,
    kind: Option<ReflectionKind>,
    flags: ReflectionFlags,
    comment: Option<Comment>,
    declared_type: Option<Type>,
    default_value: Option<String>,
    children: Vec<DeclarationReflection>,
    signatures: Vec<SignatureReflection>,
    type_parameters: Vec<TypeParameterReflection>,
    sources: Vec<SourceReference>,
    decorators: Vec<Decorator>,
}

impl DeclarationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ReflectionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: ReflectionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn flags(mut self, flags: ReflectionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn declared_type(mut self, ty: Type) -> Self {
        self.declared_type = Some(ty);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn child(mut self, child: DeclarationReflection) -> Self {
        self.children.push(child);
        self
    }

    pub fn signature(mut self, signature: SignatureReflection) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn type_parameter(mut self, type_parameter: TypeParameterReflection) -> Self {
        self.type_parameters.push(type_parameter);
        self
    }

    pub fn source(mut self, source: SourceReference) -> Self {
        self.sources.push(source);
        self
    }

    pub fn decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Build the declaration.
    pub fn build(self) -> Result<DeclarationReflection, BuilderError> {
        let id = self.id.ok_or(BuilderError::MissingId)?;
        let name = self.name.ok_or(BuilderError::MissingName)?;
        let kind = self.kind.ok_or(BuilderError::MissingKind)?;
        if !kind.is_declaration() {
            return Err(BuilderError::InvalidKind(kind));
        }

        let mut decl = DeclarationReflection::new(id, name, kind);
        decl.base.flags = self.flags;
        decl.base.comment = self.comment;
        decl.base.decorators = self.decorators;
        decl.container.children = self.children;
        decl.declared_type = self.declared_type;
        decl.default_value = self.default_value;
        decl.signatures = self.signatures;
        decl.type_parameters = self.type_parameters;
        decl.sources = self.sources;
        Ok(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod kind_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_kind_values_are_distinct_bits() {
            assert_eq!(ReflectionKind::Project.value(), 1);
            assert_eq!(ReflectionKind::Module.value(), 2);
            assert_eq!(ReflectionKind::Class.value(), 128);
            assert_eq!(ReflectionKind::Reference.value(), 1 << 22);
        }

        #[test]
        fn test_kind_display() {
            assert_eq!(ReflectionKind::EnumMember.display(), "Enum member");
            assert_eq!(ReflectionKind::TypeAlias.display(), "Type alias");
        }

        #[test]
        fn test_declaration_kinds() {
            assert!(ReflectionKind::Class.is_declaration());
            assert!(ReflectionKind::TypeLiteral.is_declaration());
            assert!(!ReflectionKind::CallSignature.is_declaration());
            assert!(!ReflectionKind::Parameter.is_declaration());
            assert!(!ReflectionKind::Project.is_declaration());
        }

        #[test]
        fn test_kind_deserializes_camel_case() {
            let kind: ReflectionKind = serde_json::from_str("\"enumMember\"").unwrap();
            assert_eq!(kind, ReflectionKind::EnumMember);
        }
    }

    mod flag_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_iter_set_only_yields_set_flags() {
            let flags = ReflectionFlags {
                is_static: true,
                is_readonly: true,
                ..Default::default()
            };
            let set: Vec<_> = flags.iter_set().collect();
            assert_eq!(set, vec!["isStatic", "isReadonly"]);
        }

        #[test]
        fn test_default_flags_are_empty() {
            assert_eq!(ReflectionFlags::default().iter_set().count(), 0);
        }
    }

    mod builder_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_builder() {
            let decl = DeclarationBuilder::new()
                .id(1)
                .name("greet")
                .kind(ReflectionKind::Function)
                .signature(SignatureReflection::new(
                    2,
                    "greet",
                    ReflectionKind::CallSignature,
                ))
                .build()
                .unwrap();

            assert_eq!(decl.base.name, "greet");
            assert_eq!(decl.signatures.len(), 1);
            assert!(decl.container.children.is_empty());
        }

        #[test]
        fn test_builder_missing_id() {
            let result = DeclarationBuilder::new()
                .name("x")
                .kind(ReflectionKind::Variable)
                .build();
            assert!(matches!(result, Err(BuilderError::MissingId)));
        }

        #[test]
        fn test_builder_missing_name() {
            let result = DeclarationBuilder::new()
                .id(1)
                .kind(ReflectionKind::Variable)
                .build();
            assert!(matches!(result, Err(BuilderError::MissingName)));
        }

        #[test]
        fn test_builder_rejects_signature_kind() {
            let result = DeclarationBuilder::new()
                .id(1)
                .name("call")
                .kind(ReflectionKind::CallSignature)
                .build();
            assert!(matches!(
                result,
                Err(BuilderError::InvalidKind(ReflectionKind::CallSignature))
            ));
        }

        #[test]
        fn test_all_signatures_order() {
            let mut decl = DeclarationReflection::new(1, "value", ReflectionKind::Accessor);
            decl.get_signature = Some(Box::new(SignatureReflection::new(
                3,
                "value",
                ReflectionKind::GetSignature,
            )));
            decl.set_signature = Some(Box::new(SignatureReflection::new(
                4,
                "value",
                ReflectionKind::SetSignature,
            )));
            let ids: Vec<_> = decl.all_signatures().map(|s| s.base.id).collect();
            assert_eq!(ids, vec![3, 4]);
        }
    }
}
