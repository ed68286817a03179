//! Entity implementation and the liveness registry

/// Entity identifier
///
/// Entities are plain ids; id 0 is reserved for the null entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// The null entity, never alive
    pub const NULL: Self = Self { id: 0 };

    /// Create an entity handle from a raw ID
    pub const fn from_raw(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// True for the null entity
    pub fn is_null(&self) -> bool {
        self.id == 0
    }
}

/// Answers whether an entity still exists
///
/// The scene never caches the answer; it asks again every time it looks at
/// an entity.
pub trait EntityRegistry {
    /// Whether the entity has been created and not yet destroyed
    fn is_alive(&self, entity: Entity) -> bool;
}

/// Simple entity registry handing out sequential IDs
#[derive(Debug, Default)]
pub struct EntityManager {
    alive: Vec<bool>,
    live_count: usize,
}

impl EntityManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create(&mut self) -> Entity {
        if self.alive.is_empty() {
            // Slot 0 belongs to the null entity.
            self.alive.push(false);
        }
        let id = u32::try_from(self.alive.len()).unwrap_or(u32::MAX);
        self.alive.push(true);
        self.live_count += 1;
        Entity::from_raw(id)
    }

    /// Destroy an entity; destroying a dead or unknown entity does nothing
    pub fn destroy(&mut self, entity: Entity) {
        if let Some(slot) = self.alive.get_mut(entity.id() as usize) {
            if *slot {
                *slot = false;
                self.live_count -= 1;
            }
        }
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// True if no entity is alive
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }
}

impl EntityRegistry for EntityManager {
    fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.id() as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_entities_are_alive_until_destroyed() {
        let mut manager = EntityManager::new();
        let a = manager.create();
        let b = manager.create();

        assert_ne!(a, b);
        assert!(!a.is_null());
        assert!(manager.is_alive(a));
        assert!(manager.is_alive(b));
        assert_eq!(manager.len(), 2);

        manager.destroy(a);
        manager.destroy(a);
        assert!(!manager.is_alive(a));
        assert!(manager.is_alive(b));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_null_and_unknown_entities_are_dead() {
        let manager = EntityManager::new();
        assert!(!manager.is_alive(Entity::NULL));
        assert!(!manager.is_alive(Entity::from_raw(42)));
    }
}
