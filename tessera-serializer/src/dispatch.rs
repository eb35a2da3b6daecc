//! Two-level lookup of the components that apply to a value.

use crate::component::SerializerComponent;
use crate::group::Group;
use std::cmp::Reverse;

/// Components registered under one group, sorted by descending priority.
pub(crate) struct Bucket<V: ?Sized> {
    pub(crate) group: Group<V>,
    pub(crate) components: Vec<Box<dyn SerializerComponent<V>>>,
}

impl<V: ?Sized> Bucket<V> {
    pub(crate) fn new(group: Group<V>) -> Self {
        Self {
            group,
            components: Vec::new(),
        }
    }

    /// Append and re-sort. The sort is stable, so equal priorities keep
    /// registration order.
    pub(crate) fn insert(&mut self, component: Box<dyn SerializerComponent<V>>) {
        self.components.push(component);
        self.components.sort_by_key(|c| Reverse(c.priority()));
    }
}

/// Ordered components for `value`.
///
/// Buckets are visited in the order their groups were first registered.
/// `supports` is only asked of components whose group matched, and priority
/// ordering applies within a bucket only: every component of an earlier
/// matching group runs before any component of a later one.
pub(crate) fn find_serializers<'r, V: ?Sized>(
    buckets: &'r [Bucket<V>],
    value: &V,
) -> Vec<&'r dyn SerializerComponent<V>> {
    let mut routes = Vec::new();
    for bucket in buckets.iter().filter(|b| b.group.matches(value)) {
        for component in &bucket.components {
            if component.supports(value) {
                routes.push(component.as_ref());
            }
        }
    }
    routes
}
