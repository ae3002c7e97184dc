//! ECS World implementation

use std::any::TypeId;
use std::collections::HashMap;

use slotmap::SlotMap;

use super::storage::{ComponentStorage, ComponentStore};
use super::{Component, Entity, Query, QueryIter};

/// ECS World containing all entities and components
///
/// The world exclusively owns every fragment; destroying an entity drops all
/// of them. Cascades to other subsystems (render parts and the like) are the
/// caller's job and must happen before [`destroy`](Self::destroy).
pub struct World {
    entities: SlotMap<Entity, ()>,
    stores: HashMap<TypeId, Box<dyn ComponentStore>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            stores: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity and release every fragment attached to it
    ///
    /// Returns `false` when the identifier was already invalid.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for store in self.stores.values_mut() {
            store.remove_entity(entity);
        }
        true
    }

    /// Whether the identifier still refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Attach a fragment, replacing any previous value of the same type
    ///
    /// Returns the replaced value. Attaching to a dead entity is ignored.
    pub fn attach<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        if !self.is_alive(entity) {
            log::warn!(
                "Ignoring {} attached to dead entity {:?}",
                std::any::type_name::<T>(),
                entity
            );
            return None;
        }

        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .components
            .insert(entity, component)
    }

    /// Remove a fragment if present
    pub fn detach<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.components.remove(entity)
    }

    /// Get a fragment
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.components.get(entity)
    }

    /// Get a mutable fragment
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.components.get_mut(entity)
    }

    /// Whether the entity carries fragment `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.has_type(TypeId::of::<T>(), entity)
    }

    /// Snapshot every entity matching the capability set
    pub fn query(&self, query: &Query) -> QueryIter {
        let candidates = match self.driving_store(query) {
            Some(Some(store)) => store.entities(),
            Some(None) => Vec::new(),
            None => self.entities.keys().collect(),
        };

        QueryIter::new(
            candidates
                .into_iter()
                .filter(|entity| self.matches(*entity, query))
                .collect(),
        )
    }

    /// Number of entities matching the capability set
    pub fn count(&self, query: &Query) -> usize {
        self.query(query).len()
    }

    /// First entity matching the capability set, for singleton lookups
    pub fn single(&self, query: &Query) -> Option<Entity> {
        self.query(query).next()
    }

    /// Destroy every entity
    pub fn clear(&mut self) {
        self.entities.clear();
        self.stores.clear();
    }

    /// Smallest required store, `Some(None)` if a required type has no store
    /// at all, `None` when the query has no required types.
    fn driving_store(&self, query: &Query) -> Option<Option<&dyn ComponentStore>> {
        if query.required.is_empty() {
            return None;
        }

        let mut smallest: Option<&dyn ComponentStore> = None;
        for type_id in &query.required {
            let Some(store) = self.stores.get(type_id) else {
                return Some(None);
            };
            if smallest.map_or(true, |current| store.len() < current.len()) {
                smallest = Some(store.as_ref());
            }
        }
        Some(smallest)
    }

    fn matches(&self, entity: Entity, query: &Query) -> bool {
        query.required.iter().all(|type_id| self.has_type(*type_id, entity))
            && !query.excluded.iter().any(|type_id| self.has_type(*type_id, entity))
            && (query.any_of.is_empty()
                || query.any_of.iter().any(|type_id| self.has_type(*type_id, entity)))
    }

    fn has_type(&self, type_id: TypeId, entity: Entity) -> bool {
        self.stores
            .get(&type_id)
            .is_some_and(|store| store.contains(entity))
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.as_any().downcast_ref::<ComponentStorage<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|store| store.as_any_mut().downcast_mut::<ComponentStorage<T>>())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
