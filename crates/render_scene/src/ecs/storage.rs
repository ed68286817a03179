//! Component Storage
//!
//! Slot-map backed storage used by the reference component managers. Each
//! component type gets its own key type so instance handles of different
//! managers cannot be mixed up.

use std::collections::HashMap;

use slotmap::{Key, SlotMap};

use super::Entity;

/// Component storage keyed by a per-component instance handle
#[derive(Debug)]
pub struct ComponentStore<K: Key, T> {
    components: SlotMap<K, (Entity, T)>,
    instances: HashMap<Entity, K>,
}

impl<K: Key, T> ComponentStore<K, T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            components: SlotMap::with_key(),
            instances: HashMap::new(),
        }
    }

    /// Attach a component to an entity, replacing any existing one
    ///
    /// Replacing keeps the entity's instance handle stable.
    pub fn insert(&mut self, entity: Entity, component: T) -> K {
        if let Some(&key) = self.instances.get(&entity) {
            if let Some(slot) = self.components.get_mut(key) {
                slot.1 = component;
                return key;
            }
        }
        let key = self.components.insert((entity, component));
        self.instances.insert(entity, key);
        key
    }

    /// Detach the entity's component, if any
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let key = self.instances.remove(&entity)?;
        self.components.remove(key).map(|(_, component)| component)
    }

    /// Instance handle of the entity's component
    pub fn instance(&self, entity: Entity) -> Option<K> {
        self.instances.get(&entity).copied()
    }

    /// Component behind an instance handle
    pub fn get(&self, instance: K) -> Option<&T> {
        self.components.get(instance).map(|(_, component)| component)
    }

    /// Mutable component behind an instance handle
    pub fn get_mut(&mut self, instance: K) -> Option<&mut T> {
        self.components.get_mut(instance).map(|(_, component)| component)
    }

    /// Component attached to an entity
    pub fn get_for(&self, entity: Entity) -> Option<&T> {
        self.instance(entity).and_then(|key| self.get(key))
    }

    /// Mutable component attached to an entity
    pub fn get_for_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let key = self.instance(entity)?;
        self.get_mut(key)
    }

    /// Entity owning an instance
    pub fn entity(&self, instance: K) -> Option<Entity> {
        self.components.get(instance).map(|(entity, _)| *entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if the store holds no component
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over all (entity, component) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.components.values().map(|(entity, component)| (*entity, component))
    }
}

impl<K: Key, T> Default for ComponentStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
