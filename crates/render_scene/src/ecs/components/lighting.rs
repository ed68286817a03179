//! Lighting component for ECS
//!
//! Pure data component plus the read interface the scene uses to extract
//! and pack lights. Positions and directions are in the entity's local space;
//! the extraction pass moves them into world space.

use slotmap::new_key_type;

use crate::ecs::storage::ComponentStore;
use crate::ecs::Entity;
use crate::foundation::math::Vec3;

new_key_type! {
    /// Handle to a light component instance
    pub struct LightInstance;
}

/// Smallest cone width used when deriving spot scale/offset
const MIN_SPOT_COS_DELTA: f32 = 1.0 / 1024.0;

/// Read access to the light component store
pub trait LightManager {
    /// Light instance attached to the entity, if any
    fn instance(&self, entity: Entity) -> Option<LightInstance>;

    /// True for directional (sun-like) lights
    fn is_directional(&self, instance: LightInstance) -> bool;

    /// True for point lights
    fn is_point(&self, instance: LightInstance) -> bool;

    /// True if the light carries an IES photometric profile
    fn is_ies(&self, instance: LightInstance) -> bool;

    /// Direction in the entity's local space
    fn local_direction(&self, instance: LightInstance) -> Vec3;

    /// Position in the entity's local space
    fn local_position(&self, instance: LightInstance) -> Vec3;

    /// Radius of the light's sphere of influence
    fn radius(&self, instance: LightInstance) -> f32;

    /// Intensity multiplier
    fn intensity(&self, instance: LightInstance) -> f32;

    /// Linear RGB color
    fn color(&self, instance: LightInstance) -> Vec3;

    /// Inverse of the squared falloff distance, zero when the light has no falloff
    fn squared_falloff_inv(&self, instance: LightInstance) -> f32;

    /// Spot cone attenuation as (scale, offset)
    fn spot_scale_offset(&self, instance: LightInstance) -> [f32; 2];
}

/// Types of lights supported by the lighting system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light (like sunlight) with parallel rays
    Directional,
    /// Point light that radiates in all directions from a position
    Point,
    /// Spot light that creates a cone of light from a position
    Spot,
}

/// Pure data component for lights
#[derive(Debug, Clone)]
pub struct LightComponent {
    /// The type of light (directional, point, or spot)
    pub light_type: LightType,
    /// RGB color values for the light (0.0 to 1.0 range)
    pub color: Vec3,
    /// Light intensity multiplier
    pub intensity: f32,
    /// Direction vector for directional/spot lights in local space
    pub direction: Vec3,
    /// Position for point/spot lights in local space
    pub position: Vec3,
    /// Distance at which the light's contribution reaches zero
    pub falloff: f32,
    /// Inner cone angle for spot lights in radians
    pub inner_cone: f32,
    /// Outer cone angle for spot lights in radians
    pub outer_cone: f32,
    /// Whether an IES profile shapes this light
    pub ies_profile: bool,
}

impl LightComponent {
    /// Cone attenuation parameters derived from the spot angles
    pub fn spot_scale_offset(&self) -> [f32; 2] {
        let outer = self.outer_cone;
        let inner = self.inner_cone.min(outer);
        let cos_outer = outer.cos();
        let cos_inner = inner.cos();
        let scale = 1.0 / (cos_inner - cos_outer).max(MIN_SPOT_COS_DELTA);
        [scale, -cos_outer * scale]
    }

    /// Inverse of the squared falloff distance
    pub fn squared_falloff_inv(&self) -> f32 {
        if self.falloff > 0.0 {
            1.0 / (self.falloff * self.falloff)
        } else {
            0.0
        }
    }

    /// Builder pattern: Attach an IES profile
    pub fn with_ies_profile(mut self) -> Self {
        self.ies_profile = true;
        self
    }
}

/// Factory functions for creating light components
pub struct LightFactory;

impl LightFactory {
    /// Create directional light component
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Directional,
            color,
            intensity,
            direction,
            position: Vec3::zeros(), // Irrelevant for directional lights
            falloff: 0.0,
            inner_cone: 0.0,
            outer_cone: 0.0,
            ies_profile: false,
        }
    }

    /// Create point light component
    pub fn point(position: Vec3, color: Vec3, intensity: f32, falloff: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Point,
            color,
            intensity,
            direction: Vec3::new(0.0, -1.0, 0.0), // Only used with an IES profile
            position,
            falloff,
            inner_cone: 0.0,
            outer_cone: 0.0,
            ies_profile: false,
        }
    }

    /// Create spot light component
    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        intensity: f32,
        falloff: f32,
        inner_cone: f32,
        outer_cone: f32,
    ) -> LightComponent {
        LightComponent {
            light_type: LightType::Spot,
            color,
            intensity,
            direction,
            position,
            falloff,
            inner_cone,
            outer_cone,
            ies_profile: false,
        }
    }
}

/// Reference light store
pub type LightStore = ComponentStore<LightInstance, LightComponent>;

impl LightManager for LightStore {
    fn instance(&self, entity: Entity) -> Option<LightInstance> {
        ComponentStore::instance(self, entity)
    }

    fn is_directional(&self, instance: LightInstance) -> bool {
        self.get(instance)
            .is_some_and(|l| l.light_type == LightType::Directional)
    }

    fn is_point(&self, instance: LightInstance) -> bool {
        self.get(instance)
            .is_some_and(|l| l.light_type == LightType::Point)
    }

    fn is_ies(&self, instance: LightInstance) -> bool {
        self.get(instance).is_some_and(|l| l.ies_profile)
    }

    fn local_direction(&self, instance: LightInstance) -> Vec3 {
        self.get(instance).map_or_else(Vec3::zeros, |l| l.direction)
    }

    fn local_position(&self, instance: LightInstance) -> Vec3 {
        self.get(instance).map_or_else(Vec3::zeros, |l| l.position)
    }

    fn radius(&self, instance: LightInstance) -> f32 {
        self.get(instance).map_or(0.0, |l| l.falloff)
    }

    fn intensity(&self, instance: LightInstance) -> f32 {
        self.get(instance).map_or(0.0, |l| l.intensity)
    }

    fn color(&self, instance: LightInstance) -> Vec3 {
        self.get(instance).map_or_else(Vec3::zeros, |l| l.color)
    }

    fn squared_falloff_inv(&self, instance: LightInstance) -> f32 {
        self.get(instance).map_or(0.0, LightComponent::squared_falloff_inv)
    }

    fn spot_scale_offset(&self, instance: LightInstance) -> [f32; 2] {
        self.get(instance)
            .map_or([0.0, 0.0], LightComponent::spot_scale_offset)
    }
}
