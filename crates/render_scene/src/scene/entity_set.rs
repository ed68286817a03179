//! Scene membership

use indexmap::IndexSet;

use crate::ecs::{Entity, EntityRegistry};

/// Entities that belong to a scene
///
/// Holds ids only. Whether an entity is alive, or has any component at all,
/// is asked of the registry at the time of use.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    entities: IndexSet<Entity>,
}

impl EntitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: IndexSet::with_capacity(capacity),
        }
    }

    /// Add an entity; returns false if it was already present
    pub fn insert(&mut self, entity: Entity) -> bool {
        self.entities.insert(entity)
    }

    /// Remove an entity; returns false if it was not present
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.entities.shift_remove(&entity)
    }

    /// Whether the entity is a member
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of members, dead ones included
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if the set has no members
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Count live members for which `predicate` holds
    pub fn count<F>(&self, registry: &dyn EntityRegistry, predicate: F) -> usize
    where
        F: Fn(Entity) -> bool,
    {
        self.iter()
            .filter(|&entity| registry.is_alive(entity) && predicate(entity))
            .count()
    }
}
