//! Query system for component access
//!
//! A [`Query`] is a capability set: fragment types an entity must carry, must
//! not carry, or must carry at least one of. [`World::query`] resolves it into
//! a [`QueryIter`], an owned snapshot that stays valid while the caller mutates
//! the world.
//!
//! [`World::query`]: super::World::query

use std::any::TypeId;

use super::{Component, Entity};

/// Capability set used to select entities
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub(crate) required: Vec<TypeId>,
    pub(crate) excluded: Vec<TypeId>,
    pub(crate) any_of: Vec<TypeId>,
}

impl Query {
    /// Create an empty query (matches every live entity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Require fragment `T`
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        self.required.push(TypeId::of::<T>());
        self
    }

    /// Reject entities carrying fragment `T`
    #[must_use]
    pub fn without<T: Component>(mut self) -> Self {
        self.excluded.push(TypeId::of::<T>());
        self
    }

    /// Accept entities carrying `T` or any other `any` fragment of this query
    #[must_use]
    pub fn any<T: Component>(mut self) -> Self {
        self.any_of.push(TypeId::of::<T>());
        self
    }
}

/// Snapshot of the entities that matched a query
///
/// Iteration order is the order of the driving store at query time.
/// [`restart`](Self::restart) rewinds to the first entry.
#[derive(Debug, Clone, Default)]
pub struct QueryIter {
    entities: Vec<Entity>,
    cursor: usize,
}

impl QueryIter {
    pub(crate) fn new(entities: Vec<Entity>) -> Self {
        Self { entities, cursor: 0 }
    }

    /// Rewind to the start of the snapshot
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Every entity in the snapshot, including already visited ones
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }
}

impl Iterator for QueryIter {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let entity = self.entities.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(entity)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entities.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for QueryIter {}
