use super::{SOURCE_CONTAINER, Subject};
use crate::component::{Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::{Map, Value};
use tessera_model::SourceReference;

/// Writes `sources` for values that track their declaration sites.
pub struct SourceReferenceContainerSerializer;

impl SerializerComponent<Subject> for SourceReferenceContainerSerializer {
    fn name(&self) -> &'static str {
        "SourceReferenceContainerSerializer"
    }

    fn group(&self) -> Group<Subject> {
        SOURCE_CONTAINER
    }

    fn supports(&self, value: &Subject) -> bool {
        value.sources().is_some_and(|sources| !sources.is_empty())
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        _serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let sources: Vec<Value> = value
            .sources()
            .unwrap_or_default()
            .iter()
            .map(source_to_value)
            .collect();
        output.insert("sources".to_string(), Value::Array(sources));
        Ok(output)
    }
}

fn source_to_value(source: &SourceReference) -> Value {
    let mut map = Map::new();
    map.insert("fileName".to_string(), Value::from(source.file_name.as_str()));
    map.insert("line".to_string(), Value::from(source.line));
    map.insert("character".to_string(), Value::from(source.character));
    if let Some(url) = &source.url {
        map.insert("url".to_string(), Value::from(url.as_str()));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use crate::serializer::Serializer;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tessera_model::{
        DeclarationBuilder, ReflectionKind, SignatureReflection, SourceReference,
    };

    #[test]
    fn test_declaration_sources_follow_reflection_fields() {
        let mut source = SourceReference::new("src/math.ts", 12, 4);
        source.url = Some("https://example.com/src/math.ts#L12".to_string());

        let decl = DeclarationBuilder::new()
            .id(3)
            .name("PI")
            .kind(ReflectionKind::Variable)
            .source(source)
            .build()
            .unwrap();

        let output = Serializer::with_builtins().to_value(&decl).unwrap();
        assert_eq!(
            output,
            json!({
                "id": 3,
                "name": "PI",
                "kind": 32,
                "kindString": "Variable",
                "flags": {},
                "sources": [{
                    "fileName": "src/math.ts",
                    "line": 12,
                    "character": 4,
                    "url": "https://example.com/src/math.ts#L12"
                }]
            })
        );
    }

    #[test]
    fn test_signature_without_sources_omits_field() {
        let signature = SignatureReflection::new(2, "run", ReflectionKind::CallSignature);
        let output = Serializer::with_builtins().to_value(&signature).unwrap();
        assert!(output.get("sources").is_none());
    }
}
