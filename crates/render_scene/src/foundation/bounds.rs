//! Bounding volumes
//!
//! Two representations are used by the scene: [`BoundingBox`] (center and
//! half-extent) is what renderables carry and what the extraction buffer
//! stores, [`Aabb`] (min and max corners) is what shadow fitting accumulates.

use super::math::{upper_left, transform_point, Mat4, Vec3};

/// Axis-aligned box stored as center and half-extent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Center of the box
    pub center: Vec3,
    /// Half of the box size along each axis
    pub half_extent: Vec3,
}

impl BoundingBox {
    /// Create a box from its center and half-extent
    pub fn new(center: Vec3, half_extent: Vec3) -> Self {
        Self { center, half_extent }
    }

    /// Create a box from its min and max corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extent: (max - min) * 0.5,
        }
    }

    /// Transform the box by an affine matrix, returning the enclosing axis-aligned box
    ///
    /// The center moves as a point; the half-extent is projected through the
    /// absolute value of the rotation/scale block.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            center: transform_point(matrix, &self.center),
            half_extent: upper_left(matrix).abs() * self.half_extent,
        }
    }

    /// Min/max corner form of this box
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(self.center - self.half_extent, self.center + self.half_extent)
    }
}

/// Axis-Aligned Bounding Box stored as min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any expansion replaces entirely
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// True if min exceeds max on any axis
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow this box to also enclose `other`
    pub fn expand(&mut self, other: &Self) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
