use super::{GROUPING, Subject, downcast, insert_list, nested_all};
use crate::component::{Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::Value;
use tessera_model::{ModelKind, ReflectionCategory, ReflectionGroup, ReflectionId};

fn ids(children: &[ReflectionId]) -> Vec<Value> {
    children.iter().map(|id| Value::from(*id)).collect()
}

/// Writes `title` and the member ids of a category.
pub struct ReflectionCategorySerializer;

impl SerializerComponent<Subject> for ReflectionCategorySerializer {
    fn name(&self) -> &'static str {
        "ReflectionCategorySerializer"
    }

    fn group(&self) -> Group<Subject> {
        GROUPING
    }

    fn supports(&self, value: &Subject) -> bool {
        value.model_kind() == ModelKind::ReflectionCategory
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        _serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let category = downcast::<ReflectionCategory>(value, self.name())?;
        output.insert("title".to_string(), Value::from(category.title.as_str()));
        insert_list(&mut output, "children", ids(&category.children));
        Ok(output)
    }
}

/// Writes `title`, `kind`, member ids and nested categories of a group.
pub struct ReflectionGroupSerializer;

impl SerializerComponent<Subject> for ReflectionGroupSerializer {
    fn name(&self) -> &'static str {
        "ReflectionGroupSerializer"
    }

    fn group(&self) -> Group<Subject> {
        GROUPING
    }

    fn supports(&self, value: &Subject) -> bool {
        value.model_kind() == ModelKind::ReflectionGroup
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let group = downcast::<ReflectionGroup>(value, self.name())?;
        output.insert("title".to_string(), Value::from(group.title.as_str()));
        output.insert("kind".to_string(), Value::from(group.kind.value()));
        insert_list(&mut output, "children", ids(&group.children));
        insert_list(
            &mut output,
            "categories",
            nested_all(serializer, &group.categories)?,
        );
        Ok(output)
    }
}
