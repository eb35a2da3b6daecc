//! The unit of transformation plugged into a [`Serializer`].

use crate::error::SerializeError;
use crate::group::Group;
use crate::serializer::Serializer;
use serde_json::{Map, Value};

/// The plain-data object built up by successive components.
pub type Output = Map<String, Value>;

/// Identity of a value for logs and error reports.
pub trait Describe {
    fn describe(&self) -> String;
}

/// A pluggable serializer component.
///
/// Components never see each other. They compose through priority order and
/// field names: each one receives the output built so far, adds or overwrites
/// fields, and hands it on. Overwriting is legal; the last writer of a field
/// wins.
pub trait SerializerComponent<V: ?Sized> {
    /// Name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// The bucket this component is stored in.
    fn group(&self) -> Group<V>;

    /// Components with a higher priority run earlier within their group.
    fn priority(&self) -> i32 {
        0
    }

    /// Fine-grained eligibility, only asked once the group matched.
    fn supports(&self, value: &V) -> bool;

    /// Augment `output` with this component's fields.
    ///
    /// Nested values are serialized by calling back into `serializer`.
    /// Must not rely on the order of the fields already in `output`.
    fn to_object(
        &self,
        value: &V,
        output: Output,
        serializer: &Serializer<V>,
    ) -> Result<Output, SerializeError>;
}
