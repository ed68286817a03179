//! Renderable component for entities that can be drawn
//!
//! This component carries what the extraction pass needs from a drawable:
//! its local bounds, visibility flags, layer mask and the GPU handles of its
//! per-object uniform blocks.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use slotmap::new_key_type;

use crate::ecs::storage::ComponentStore;
use crate::ecs::Entity;
use crate::foundation::bounds::BoundingBox;
use crate::foundation::math::{normal_matrix, Mat4};

new_key_type! {
    /// Handle to a renderable component instance
    pub struct RenderableInstance;
}

/// Handle to a GPU uniform buffer owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UniformHandle(pub u32);

bitflags! {
    /// Per-renderable visibility state
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VisibilityFlags: u8 {
        /// Subject to frustum culling
        const CULLING = 1 << 0;
        /// Contributes to shadow casters bounds
        const CAST_SHADOWS = 1 << 1;
        /// Contributes to shadow receivers bounds
        const RECEIVE_SHADOWS = 1 << 2;
    }
}

/// Layer bit every renderable is on unless told otherwise
pub const DEFAULT_LAYER: u8 = 0x1;

/// Per-object uniform block, std140 compatible
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model to world matrix (column-major)
    pub world_from_model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix, padded to 4x4
    pub world_from_model_normal: [[f32; 4]; 4],
}

impl ObjectUniforms {
    /// Pack the uniforms for a world transform
    pub fn from_world_transform(world: &Mat4) -> Self {
        Self {
            world_from_model: (*world).into(),
            world_from_model_normal: normal_matrix(world).to_homogeneous().into(),
        }
    }
}

/// Read (and per-object uniform write) access to the renderable store
pub trait RenderableManager {
    /// Renderable instance attached to the entity, if any
    fn instance(&self, entity: Entity) -> Option<RenderableInstance>;

    /// Local-space bounds
    fn aabb(&self, instance: RenderableInstance) -> BoundingBox;

    /// Visibility flags
    fn visibility(&self, instance: RenderableInstance) -> VisibilityFlags;

    /// Main per-object uniform block
    fn uniform(&self, instance: RenderableInstance) -> UniformHandle;

    /// Skinning bones uniform block, if the renderable is skinned
    fn bones_uniform(&self, instance: RenderableInstance) -> Option<UniformHandle>;

    /// Layer bitmask
    fn layer_mask(&self, instance: RenderableInstance) -> u8;

    /// Stage the per-object uniforms for the given world transform
    fn update_local_ubo(&mut self, instance: RenderableInstance, world_transform: &Mat4);
}

/// Component for entities that can be rendered
#[derive(Debug, Clone)]
pub struct RenderableComponent {
    /// Bounds in local space
    pub aabb: BoundingBox,

    /// Visibility state
    pub visibility: VisibilityFlags,

    /// Layer bitmask
    pub layer_mask: u8,

    /// Main per-object uniform block
    pub uniform: UniformHandle,

    /// Optional skinning bones block
    pub bones_uniform: Option<UniformHandle>,

    /// Staged uniform data, written by [`RenderableManager::update_local_ubo`]
    pub uniforms: ObjectUniforms,
}

impl RenderableComponent {
    /// Create a new renderable casting and receiving shadows on the default layer
    pub fn new(aabb: BoundingBox, uniform: UniformHandle) -> Self {
        Self {
            aabb,
            visibility: VisibilityFlags::all(),
            layer_mask: DEFAULT_LAYER,
            uniform,
            bones_uniform: None,
            uniforms: ObjectUniforms::zeroed(),
        }
    }

    /// Builder pattern: Set visibility flags
    pub fn with_visibility(mut self, visibility: VisibilityFlags) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder pattern: Set layer mask
    pub fn with_layer_mask(mut self, layer_mask: u8) -> Self {
        self.layer_mask = layer_mask;
        self
    }

    /// Builder pattern: Attach a skinning bones block
    pub fn with_bones(mut self, bones_uniform: UniformHandle) -> Self {
        self.bones_uniform = Some(bones_uniform);
        self
    }
}

/// Reference renderable store
pub type RenderableStore = ComponentStore<RenderableInstance, RenderableComponent>;

impl RenderableManager for RenderableStore {
    fn instance(&self, entity: Entity) -> Option<RenderableInstance> {
        ComponentStore::instance(self, entity)
    }

    fn aabb(&self, instance: RenderableInstance) -> BoundingBox {
        self.get(instance).map(|r| r.aabb).unwrap_or_default()
    }

    fn visibility(&self, instance: RenderableInstance) -> VisibilityFlags {
        self.get(instance).map(|r| r.visibility).unwrap_or_default()
    }

    fn uniform(&self, instance: RenderableInstance) -> UniformHandle {
        self.get(instance).map(|r| r.uniform).unwrap_or_default()
    }

    fn bones_uniform(&self, instance: RenderableInstance) -> Option<UniformHandle> {
        self.get(instance).and_then(|r| r.bones_uniform)
    }

    fn layer_mask(&self, instance: RenderableInstance) -> u8 {
        self.get(instance).map_or(0, |r| r.layer_mask)
    }

    fn update_local_ubo(&mut self, instance: RenderableInstance, world_transform: &Mat4) {
        if let Some(renderable) = self.get_mut(instance) {
            renderable.uniforms = ObjectUniforms::from_world_transform(world_transform);
        }
    }
}
