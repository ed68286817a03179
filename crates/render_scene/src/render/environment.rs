//! Environment resources a scene references: skybox and image-based light

use crate::ecs::Entity;
use crate::foundation::math::Mat3;

/// Skybox resource
///
/// A skybox is drawn through its own entity, which the scene adds to its
/// membership set while the skybox is active.
#[derive(Debug, Clone, PartialEq)]
pub struct Skybox {
    entity: Entity,
    /// Brightness multiplier applied to the environment map
    pub intensity: f32,
}

impl Skybox {
    /// Create a skybox rendered through `entity`
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            intensity: 1.0,
        }
    }

    /// Entity carrying the skybox renderable
    pub fn entity(&self) -> Entity {
        self.entity
    }
}

/// Image-based (indirect) light
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectLight {
    /// Brightness multiplier
    pub intensity: f32,
    /// Rotation applied to the environment
    pub rotation: Mat3,
    /// Spherical harmonics irradiance, 9 bands of RGB
    pub irradiance: [[f32; 3]; 9],
}

impl IndirectLight {
    /// Indirect light with uniform ambient irradiance
    pub fn uniform(color: [f32; 3], intensity: f32) -> Self {
        let mut irradiance = [[0.0; 3]; 9];
        irradiance[0] = color;
        Self {
            intensity,
            rotation: Mat3::identity(),
            irradiance,
        }
    }
}

impl Default for IndirectLight {
    fn default() -> Self {
        Self::uniform([1.0, 1.0, 1.0], 30_000.0)
    }
}
