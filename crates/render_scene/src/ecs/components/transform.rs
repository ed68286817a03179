//! Transform component for the ECS system
//!
//! Hierarchies are resolved upstream; the component here already holds the
//! entity's local-to-world placement as position, rotation and scale.

use slotmap::new_key_type;

use crate::ecs::storage::ComponentStore;
use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Quat, Vec3};

new_key_type! {
    /// Handle to a transform component instance
    pub struct TransformInstance;
}

/// Read access to the transform component store
pub trait TransformManager {
    /// Transform instance attached to the entity, if any
    fn instance(&self, entity: Entity) -> Option<TransformInstance>;

    /// Local-to-world matrix of a transform instance
    fn world_transform(&self, instance: TransformInstance) -> Mat4;
}

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Reference transform store
pub type TransformStore = ComponentStore<TransformInstance, TransformComponent>;

impl TransformManager for TransformStore {
    fn instance(&self, entity: Entity) -> Option<TransformInstance> {
        ComponentStore::instance(self, entity)
    }

    fn world_transform(&self, instance: TransformInstance) -> Mat4 {
        self.get(instance)
            .map_or_else(Mat4::identity, TransformComponent::to_matrix)
    }
}
