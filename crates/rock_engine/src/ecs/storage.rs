//! Type-erased component storage
//!
//! One `ComponentStorage<T>` per fragment type, keyed by [`Entity`]. The world
//! holds them behind `dyn ComponentStore` so it can sweep every store when an
//! entity is destroyed without knowing the concrete types.

use std::any::Any;

use slotmap::SecondaryMap;

use super::{Component, Entity};

/// Operations the world needs on any store regardless of its fragment type
pub(crate) trait ComponentStore: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn contains(&self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn entities(&self) -> Vec<Entity>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for a single fragment type
pub(crate) struct ComponentStorage<T: Component> {
    pub(crate) components: SecondaryMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    pub(crate) fn new() -> Self {
        Self {
            components: SecondaryMap::new(),
        }
    }
}

impl<T: Component> ComponentStore for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.components.remove(entity);
    }

    fn contains(&self, entity: Entity) -> bool {
        self.components.contains_key(entity)
    }

    fn len(&self) -> usize {
        self.components.len()
    }

    fn entities(&self) -> Vec<Entity> {
        self.components.keys().collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
