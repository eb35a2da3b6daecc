use super::{COMMENT, Subject, downcast, insert_list, nested_all};
use crate::component::{Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::Value;
use tessera_model::{Comment, CommentTag, ModelKind};

/// Writes `tag`, `param` and `text` of a block tag.
pub struct CommentTagSerializer;

impl SerializerComponent<Subject> for CommentTagSerializer {
    fn name(&self) -> &'static str {
        "CommentTagSerializer"
    }

    fn group(&self) -> Group<Subject> {
        COMMENT
    }

    fn supports(&self, value: &Subject) -> bool {
        value.model_kind() == ModelKind::CommentTag
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        _serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let tag = downcast::<CommentTag>(value, self.name())?;
        output.insert("tag".to_string(), Value::from(tag.tag_name.as_str()));
        if let Some(param) = &tag.param_name {
            output.insert("param".to_string(), Value::from(param.as_str()));
        }
        output.insert("text".to_string(), Value::from(tag.text.as_str()));
        Ok(output)
    }
}

/// Writes the text parts of a comment and its tags. Empty parts are omitted.
pub struct CommentSerializer;

impl SerializerComponent<Subject> for CommentSerializer {
    fn name(&self) -> &'static str {
        "CommentSerializer"
    }

    fn group(&self) -> Group<Subject> {
        COMMENT
    }

    fn supports(&self, value: &Subject) -> bool {
        value.model_kind() == ModelKind::Comment
    }

    fn to_object(
        &self,
        value: &Subject,
        mut output: Output,
        serializer: &Serializer<Subject>,
    ) -> Result<Output, SerializeError> {
        let comment = downcast::<Comment>(value, self.name())?;
        if !comment.short_text.is_empty() {
            output.insert(
                "shortText".to_string(),
                Value::from(comment.short_text.as_str()),
            );
        }
        if !comment.text.is_empty() {
            output.insert("text".to_string(), Value::from(comment.text.as_str()));
        }
        if let Some(returns) = &comment.returns {
            output.insert("returns".to_string(), Value::from(returns.as_str()));
        }
        insert_list(&mut output, "tags", nested_all(serializer, &comment.tags)?);
        Ok(output)
    }
}
