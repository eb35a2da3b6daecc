//! The component registry and its `to_object` entry points.

use crate::component::{Describe, Output, SerializerComponent};
use crate::dispatch::{Bucket, find_serializers};
use crate::error::SerializeError;
use crate::events::{EntryPointHooks, EventDispatcher, SerializeEvent, SerializeEventKind};
use serde_json::Value;
use tracing::{debug, trace};

/// Registry of serializer components for values of type `V`.
///
/// Built once at startup, then passed to every call site. Registration takes
/// `&mut self` and serialization takes `&self`, so the registry cannot change
/// while a pass is running.
pub struct Serializer<V: ?Sized> {
    buckets: Vec<Bucket<V>>,
    events: EventDispatcher<V>,
}

impl<V: ?Sized + Describe> Default for Serializer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized + Describe> Serializer<V> {
    /// An empty registry. Every value serializes to its `init` object.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            events: EventDispatcher::new(),
        }
    }

    /// Register a component.
    ///
    /// The component lands in the bucket of its group, which is created the
    /// first time the group name is seen. There is no deduplication: adding
    /// two equal components applies both.
    pub fn add_serializer(&mut self, component: Box<dyn SerializerComponent<V>>) {
        let group = component.group();
        debug!(
            component = component.name(),
            group = group.name(),
            priority = component.priority(),
            "Registering serializer"
        );

        match self.buckets.iter_mut().find(|b| b.group.name() == group.name()) {
            Some(bucket) => bucket.insert(component),
            None => {
                let mut bucket = Bucket::new(group);
                bucket.insert(component);
                self.buckets.push(bucket);
            }
        }
    }

    /// Subscribe to an entry-point event.
    pub fn on<F>(&mut self, kind: SerializeEventKind, listener: F)
    where
        F: Fn(&mut SerializeEvent<'_, V>) -> Result<(), SerializeError> + 'static,
    {
        self.events.on(kind, Box::new(listener));
    }

    /// Serialize `value` by folding every applicable component over `init`.
    ///
    /// Returns `init` unchanged when no component applies.
    pub fn to_object(&self, value: &V, init: Output) -> Result<Output, SerializeError> {
        let routes = find_serializers(&self.buckets, value);
        trace!(
            subject = %value.describe(),
            components = routes.len(),
            "Dispatching"
        );

        routes.into_iter().try_fold(init, |output, component| {
            component
                .to_object(value, output, self)
                .map_err(|source| SerializeError::ComponentFailed {
                    component: component.name(),
                    subject: value.describe(),
                    source: Box::new(source),
                })
        })
    }

    /// [`to_object`](Self::to_object) from an empty object, as a JSON value.
    pub fn to_value(&self, value: &V) -> Result<Value, SerializeError> {
        self.to_object(value, Output::new()).map(Value::Object)
    }

    /// Serialize a whole graph, raising `begin` before and `end` after.
    ///
    /// Begin listeners seed the accumulator that the fold starts from; end
    /// listeners see and may change the finished object. Listeners get no
    /// access to the registry, so a pass cannot be restarted from inside one.
    pub fn serialize_entry_point(
        &self,
        value: &V,
        hooks: EntryPointHooks,
    ) -> Result<Output, SerializeError> {
        debug!(subject = %value.describe(), "Serialization pass started");

        let mut begin =
            SerializeEvent::new(SerializeEventKind::Begin, value, Output::new(), hooks.begin);
        self.events.trigger(&mut begin)?;

        let output = self.to_object(value, begin.output)?;

        let mut end = SerializeEvent::new(SerializeEventKind::End, value, output, hooks.end);
        self.events.trigger(&mut end)?;

        debug!(fields = end.output.len(), "Serialization pass finished");
        Ok(end.output)
    }

    /// Number of distinct groups, in registration order.
    pub fn group_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn group_names(&self) -> Vec<&'static str> {
        self.buckets.iter().map(|b| b.group.name()).collect()
    }

    pub fn component_count(&self) -> usize {
        self.buckets.iter().map(|b| b.components.len()).sum()
    }

    pub fn listener_count(&self, kind: SerializeEventKind) -> usize {
        self.events.listener_count(kind)
    }
}
