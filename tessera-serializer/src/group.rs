//! Routing predicates that bucket components by broad value category.

use std::fmt;

/// A coarse category of values.
///
/// Components sharing a group are stored in one bucket, and the bucket is
/// skipped entirely when the group predicate rejects a value. Groups are
/// identified by name; the predicate registered first under a name is the
/// one used for routing. Groups are not a partition: a value may match
/// several of them.
pub struct Group<V: ?Sized> {
    name: &'static str,
    predicate: fn(&V) -> bool,
}

impl<V: ?Sized> Group<V> {
    pub const fn new(name: &'static str, predicate: fn(&V) -> bool) -> Self {
        Self { name, predicate }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Must be cheap and side-effect free: it runs once per value per group.
    pub fn matches(&self, value: &V) -> bool {
        (self.predicate)(value)
    }
}

impl<V: ?Sized> Clone for Group<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for Group<V> {}

impl<V: ?Sized> fmt::Debug for Group<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group").field("name", &self.name).finish()
    }
}
