//! # Scene
//!
//! A scene owns its membership set, the environment it references and the
//! two extraction buffers rebuilt every frame. Per-frame work is split over
//! several passes, each in its own module:
//!
//! - [`Scene::prepare`] fills the extraction buffers from the component stores
//! - [`Scene::prepare_lights`] budgets and packs lights into the GPU buffer
//! - [`Scene::compute_bounds`] accumulates shadow caster/receiver bounds

use std::ops::Range;
use std::sync::Arc;

use super::context::SceneContext;
use super::entity_set::EntitySet;
use super::soa::{LightSoa, RenderableSoa};
use crate::config::SceneConfig;
use crate::ecs::{Entity, RenderableManager};
use crate::render::{IndirectLight, Skybox};

/// Renderable scene
#[derive(Debug)]
pub struct Scene {
    /// Scene configuration
    pub(super) config: SceneConfig,

    /// Member entities
    pub(super) entities: EntitySet,

    /// Active skybox; its entity is a member while set
    pub(super) skybox: Option<Arc<Skybox>>,

    /// Image-based light
    pub(super) indirect_light: Option<Arc<IndirectLight>>,

    /// Drawables extracted by the last `prepare`
    pub(super) renderable_data: RenderableSoa,

    /// Lights extracted by the last `prepare`, budgeted by `prepare_lights`
    pub(super) light_data: LightSoa,

    /// Priority distances, kept across frames to avoid reallocating
    pub(super) light_distances: Vec<f32>,
}

impl Scene {
    /// Create an empty scene with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            entities: EntitySet::with_capacity(config.initial_entity_capacity),
            config,
            skybox: None,
            indirect_light: None,
            renderable_data: RenderableSoa::new(),
            light_data: LightSoa::new(),
            light_distances: Vec::new(),
        }
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Add an entity to the scene; adding it twice has no effect
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity);
    }

    /// Remove an entity from the scene; removing a non-member has no effect
    pub fn remove(&mut self, entity: Entity) {
        self.entities.remove(entity);
    }

    /// Whether the entity is a member
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Member entities
    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    /// Replace the skybox
    ///
    /// The previous skybox's entity leaves the scene and the new one's joins
    /// it, so at most one skybox entity is ever a member.
    pub fn set_skybox(&mut self, skybox: Option<Arc<Skybox>>) {
        if let Some(previous) = std::mem::replace(&mut self.skybox, skybox) {
            self.entities.remove(previous.entity());
        }
        if let Some(current) = &self.skybox {
            self.entities.insert(current.entity());
        }
    }

    /// Active skybox
    pub fn skybox(&self) -> Option<&Arc<Skybox>> {
        self.skybox.as_ref()
    }

    /// Replace the image-based light; `None` clears it
    pub fn set_indirect_light(&mut self, indirect_light: Option<Arc<IndirectLight>>) {
        self.indirect_light = indirect_light;
    }

    /// Image-based light
    pub fn indirect_light(&self) -> Option<&Arc<IndirectLight>> {
        self.indirect_light.as_ref()
    }

    /// Live members with a renderable component
    ///
    /// Counted from the stores, not from the extraction buffer, which may be
    /// a frame old.
    pub fn renderable_count(&self, ctx: &SceneContext<'_>) -> usize {
        self.entities
            .count(ctx.entities, |entity| ctx.renderables.instance(entity).is_some())
    }

    /// Live members with a light component
    pub fn light_count(&self, ctx: &SceneContext<'_>) -> usize {
        self.entities
            .count(ctx.entities, |entity| ctx.lights.instance(entity).is_some())
    }

    /// Drawables extracted by the last [`prepare`](Self::prepare)
    pub fn renderable_data(&self) -> &RenderableSoa {
        &self.renderable_data
    }

    /// Drawables, writable for the culler's reserved columns
    pub fn renderable_data_mut(&mut self) -> &mut RenderableSoa {
        &mut self.renderable_data
    }

    /// Lights extracted by the last [`prepare`](Self::prepare)
    pub fn light_data(&self) -> &LightSoa {
        &self.light_data
    }

    /// Stage per-object uniforms for the drawable rows in `visible`
    ///
    /// # Panics
    ///
    /// Panics if `visible` extends past the extracted rows.
    pub fn update_ubos(&self, visible: Range<usize>, renderables: &mut dyn RenderableManager) {
        let data = &self.renderable_data;
        let instances = &data.instances()[visible.clone()];
        let transforms = &data.world_transforms()[visible];
        for (&instance, world_transform) in instances.iter().zip(transforms) {
            renderables.update_local_ubo(instance, world_transform);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
