//! ECS World implementation

use super::components::{
    LightComponent, LightInstance, LightStore, RenderableComponent, RenderableInstance,
    RenderableStore, TransformComponent, TransformInstance, TransformStore,
};
use super::{Entity, EntityManager};
use crate::scene::SceneContext;

/// ECS World containing all entities and components
///
/// Destroying an entity only ends its life in the registry; its components
/// stay in their stores until removed.
#[derive(Debug, Default)]
pub struct World {
    /// Entity liveness registry
    pub entities: EntityManager,
    /// Transform components
    pub transforms: TransformStore,
    /// Renderable components
    pub renderables: RenderableStore,
    /// Light components
    pub lights: LightStore,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Mark an entity as destroyed
    pub fn destroy_entity(&mut self, entity: Entity) {
        self.entities.destroy(entity);
    }

    /// Attach a transform component
    pub fn add_transform(&mut self, entity: Entity, transform: TransformComponent) -> TransformInstance {
        self.transforms.insert(entity, transform)
    }

    /// Attach a renderable component
    pub fn add_renderable(&mut self, entity: Entity, renderable: RenderableComponent) -> RenderableInstance {
        self.renderables.insert(entity, renderable)
    }

    /// Attach a light component
    pub fn add_light(&mut self, entity: Entity, light: LightComponent) -> LightInstance {
        self.lights.insert(entity, light)
    }

    /// Borrow every store as the read-only context the scene extracts from
    pub fn context(&self) -> SceneContext<'_> {
        SceneContext {
            entities: &self.entities,
            transforms: &self.transforms,
            renderables: &self.renderables,
            lights: &self.lights,
        }
    }
}
