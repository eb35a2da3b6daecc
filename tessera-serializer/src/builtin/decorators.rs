use super::{REFLECTION, Subject, insert_list, insert_nested, nested_all};
use crate::component::{Output, SerializerComponent};
use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::{Map, Value};
use tessera_model::Decorator;

/// Writes `decorators` applied to a reflection and the `decorates` list of
/// decorator functions.
pub struct DecoratorContainerSerializer;

impl SerializerComponent<Subject> for DecoratorContainerSerializer {
    fn name(&self) -> &'static str {
        "DecoratorContainerSerializer"
    }

    fn group(&self) -> Group<Subject> {
        REFLECTION
    }

    fn supports(&self, value: &Subject) -> bool {
        value
            .as_reflection()
            .is_some_and(|base| !base.decorators.is_empty() || !base.decorates.is_empty())
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

        let decorators = base
            .decorators
            .iter()
            .map(|decorator| decorator_to_value(decorator, serializer))
            .collect::<Result<Vec<_>, _>>()?;
        insert_list(&mut output, "decorators", decorators);
        insert_list(
            &mut output,
            "decorates",
            nested_all(serializer, &base.decorates)?,
        );
        Ok(output)
    }
}

fn decorator_to_value(
    decorator: &Decorator,
    serializer: &Serializer<Subject>,
) -> Result<Value, SerializeError> {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::from(decorator.name.as_str()));
    insert_nested(
        &mut map,
        "type",
        serializer,
        decorator.decorator_type.as_ref(),
    )?;
    if !decorator.arguments.is_empty() {
        let arguments: Map<String, Value> = decorator
            .arguments
            .iter()
            .map(|(name, source)| (name.clone(), Value::from(source.as_str())))
            .collect();
        map.insert("arguments".to_string(), Value::Object(arguments));
    }
    Ok(Value::Object(map))
}
