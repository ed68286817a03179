//! Columnar extraction buffers
//!
//! Each buffer stores one attribute per `Vec`, all columns indexed by the
//! same row number. Rows only mean something within the frame that produced
//! them; both buffers are rebuilt from scratch by every extraction.

use crate::ecs::{LightInstance, RenderableInstance, UniformHandle, VisibilityFlags};
use crate::foundation::bounds::BoundingBox;
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Row count granularity of the extraction buffers, for fixed-width loops
pub const SIMD_BLOCK_SIZE: usize = 16;

/// Leading light rows reserved for directional lights
pub const DIRECTIONAL_LIGHTS_COUNT: usize = 1;

/// Capacity needed to extract `entity_count` entities
///
/// Rounded up to whole [`SIMD_BLOCK_SIZE`] blocks, plus one trailing row for
/// the summed primitive count.
pub fn extraction_capacity(entity_count: usize) -> usize {
    ((entity_count + SIMD_BLOCK_SIZE - 1) & !(SIMD_BLOCK_SIZE - 1)) + 1
}

/// Everything the extraction pass writes for one renderable
#[derive(Debug, Clone, Copy)]
pub struct RenderableRow {
    /// Renderable component handle
    pub instance: RenderableInstance,
    /// World transform including the world origin
    pub world_transform: Mat4,
    /// Visibility flags
    pub visibility: VisibilityFlags,
    /// Main per-object uniform block
    pub uniform: UniformHandle,
    /// Skinning bones block
    pub bones_uniform: Option<UniformHandle>,
    /// World-space bounds
    pub world_aabb: BoundingBox,
    /// Layer bitmask
    pub layers: u8,
}

/// Drawable extraction buffer
///
/// The `summed_primitive_counts` column always holds one element more than
/// the buffer has rows. That trailing sentinel receives the grand total of
/// an exclusive prefix sum, so consumers can read `sums[i + 1] - sums[i]`
/// for every row without a bounds check.
#[derive(Debug)]
pub struct RenderableSoa {
    capacity: usize,
    instances: Vec<RenderableInstance>,
    world_transforms: Vec<Mat4>,
    visibility: Vec<VisibilityFlags>,
    uniforms: Vec<UniformHandle>,
    bones_uniforms: Vec<Option<UniformHandle>>,
    world_aabb_centers: Vec<Vec3>,
    visible_masks: Vec<u8>,
    layers: Vec<u8>,
    world_aabb_extents: Vec<Vec3>,
    primitive_counts: Vec<u32>,
    summed_primitive_counts: Vec<u32>,
}

impl RenderableSoa {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            capacity: 0,
            instances: Vec::new(),
            world_transforms: Vec::new(),
            visibility: Vec::new(),
            uniforms: Vec::new(),
            bones_uniforms: Vec::new(),
            world_aabb_centers: Vec::new(),
            visible_masks: Vec::new(),
            layers: Vec::new(),
            world_aabb_extents: Vec::new(),
            primitive_counts: Vec::new(),
            summed_primitive_counts: vec![0],
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True if the buffer has no rows
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Allocated rows, sentinel included
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all rows, keeping the allocation
    pub fn clear(&mut self) {
        self.instances.clear();
        self.world_transforms.clear();
        self.visibility.clear();
        self.uniforms.clear();
        self.bones_uniforms.clear();
        self.world_aabb_centers.clear();
        self.visible_masks.clear();
        self.layers.clear();
        self.world_aabb_extents.clear();
        self.primitive_counts.clear();
        self.summed_primitive_counts.clear();
        self.summed_primitive_counts.push(0);
    }

    /// Grow every column to hold `capacity` rows; never shrinks
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity <= self.capacity {
            return;
        }
        let additional = capacity - self.len();
        self.instances.reserve_exact(additional);
        self.world_transforms.reserve_exact(additional);
        self.visibility.reserve_exact(additional);
        self.uniforms.reserve_exact(additional);
        self.bones_uniforms.reserve_exact(additional);
        self.world_aabb_centers.reserve_exact(additional);
        self.visible_masks.reserve_exact(additional);
        self.layers.reserve_exact(additional);
        self.world_aabb_extents.reserve_exact(additional);
        self.primitive_counts.reserve_exact(additional);
        self.summed_primitive_counts
            .reserve_exact(capacity.saturating_sub(self.summed_primitive_counts.len()));
        self.capacity = capacity;
    }

    /// Append a row; culler-owned columns start at zero
    pub(crate) fn push(&mut self, row: RenderableRow) {
        debug_assert!(self.len() + 1 < self.capacity, "renderable buffer capacity exceeded");
        self.instances.push(row.instance);
        self.world_transforms.push(row.world_transform);
        self.visibility.push(row.visibility);
        self.uniforms.push(row.uniform);
        self.bones_uniforms.push(row.bones_uniform);
        self.world_aabb_centers.push(row.world_aabb.center);
        self.visible_masks.push(0);
        self.layers.push(row.layers);
        self.world_aabb_extents.push(row.world_aabb.half_extent);
        self.primitive_counts.push(0);
        // Every element is still zero here, so appending keeps the sentinel last.
        self.summed_primitive_counts.push(0);
    }

    /// Renderable handles
    pub fn instances(&self) -> &[RenderableInstance] {
        &self.instances
    }

    /// World transforms
    pub fn world_transforms(&self) -> &[Mat4] {
        &self.world_transforms
    }

    /// Visibility flags
    pub fn visibility(&self) -> &[VisibilityFlags] {
        &self.visibility
    }

    /// Per-object uniform blocks
    pub fn uniforms(&self) -> &[UniformHandle] {
        &self.uniforms
    }

    /// Skinning bones blocks
    pub fn bones_uniforms(&self) -> &[Option<UniformHandle>] {
        &self.bones_uniforms
    }

    /// World AABB centers
    pub fn world_aabb_centers(&self) -> &[Vec3] {
        &self.world_aabb_centers
    }

    /// World AABB half-extents
    pub fn world_aabb_extents(&self) -> &[Vec3] {
        &self.world_aabb_extents
    }

    /// Layer bitmasks
    pub fn layers(&self) -> &[u8] {
        &self.layers
    }

    /// Culler visibility masks
    pub fn visible_masks(&self) -> &[u8] {
        &self.visible_masks
    }

    /// Culler visibility masks, writable
    pub fn visible_masks_mut(&mut self) -> &mut [u8] {
        &mut self.visible_masks
    }

    /// Primitive counts per row
    pub fn primitive_counts(&self) -> &[u32] {
        &self.primitive_counts
    }

    /// Primitive counts per row, writable
    pub fn primitive_counts_mut(&mut self) -> &mut [u32] {
        &mut self.primitive_counts
    }

    /// Summed primitive counts, `len() + 1` elements
    pub fn summed_primitive_counts(&self) -> &[u32] {
        &self.summed_primitive_counts
    }

    /// World bounds of one row
    pub fn world_aabb(&self, index: usize) -> BoundingBox {
        BoundingBox::new(self.world_aabb_centers[index], self.world_aabb_extents[index])
    }

    /// Exclusive prefix sum of the primitive counts into the summed column
    ///
    /// Returns the total, which also lands in the sentinel element.
    pub fn accumulate_primitive_counts(&mut self) -> u32 {
        let mut total = 0u32;
        for (sum, &count) in self.summed_primitive_counts.iter_mut().zip(&self.primitive_counts) {
            *sum = total;
            total += count;
        }
        let sentinel = self.primitive_counts.len();
        self.summed_primitive_counts[sentinel] = total;
        total
    }
}

impl Default for RenderableSoa {
    fn default() -> Self {
        Self::new()
    }
}

/// Light extraction buffer
///
/// The first [`DIRECTIONAL_LIGHTS_COUNT`] rows always exist and hold the
/// frame's directional light, or zeros with no instance when there is none.
#[derive(Debug)]
pub struct LightSoa {
    capacity: usize,
    positions_radius: Vec<Vec4>,
    directions: Vec<Vec3>,
    instances: Vec<Option<LightInstance>>,
    visibility: Vec<u64>,
}

impl LightSoa {
    /// Create a buffer holding only the reserved rows
    pub fn new() -> Self {
        let mut soa = Self {
            capacity: 0,
            positions_radius: Vec::new(),
            directions: Vec::new(),
            instances: Vec::new(),
            visibility: Vec::new(),
        };
        soa.reset();
        soa
    }

    /// Number of rows, reserved rows included
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True if no light beyond the reserved rows was extracted
    pub fn is_empty(&self) -> bool {
        self.len() <= DIRECTIONAL_LIGHTS_COUNT
    }

    /// Allocated rows
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every extracted light and zero the reserved rows
    pub fn reset(&mut self) {
        self.positions_radius.clear();
        self.directions.clear();
        self.instances.clear();
        self.visibility.clear();
        self.positions_radius.resize(DIRECTIONAL_LIGHTS_COUNT, Vec4::zeros());
        self.directions.resize(DIRECTIONAL_LIGHTS_COUNT, Vec3::zeros());
        self.instances.resize(DIRECTIONAL_LIGHTS_COUNT, None);
        self.visibility.resize(DIRECTIONAL_LIGHTS_COUNT, 0);
    }

    /// Grow every column to hold `capacity` rows; never shrinks
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity <= self.capacity {
            return;
        }
        let additional = capacity.saturating_sub(self.len());
        self.positions_radius.reserve_exact(additional);
        self.directions.reserve_exact(additional);
        self.instances.reserve_exact(additional);
        self.visibility.reserve_exact(additional);
        self.capacity = capacity;
    }

    /// Overwrite one row
    pub(crate) fn set(&mut self, index: usize, position_radius: Vec4, direction: Vec3, instance: LightInstance) {
        self.positions_radius[index] = position_radius;
        self.directions[index] = direction;
        self.instances[index] = Some(instance);
        self.visibility[index] = 0;
    }

    /// Append a row after the reserved ones
    pub(crate) fn push(&mut self, position_radius: Vec4, direction: Vec3, instance: LightInstance) {
        debug_assert!(self.len() < self.capacity, "light buffer capacity exceeded");
        self.positions_radius.push(position_radius);
        self.directions.push(direction);
        self.instances.push(Some(instance));
        self.visibility.push(0);
    }

    /// Keep the first `len` rows; the reserved rows are never dropped
    pub(crate) fn truncate(&mut self, len: usize) {
        let len = len.max(DIRECTIONAL_LIGHTS_COUNT);
        self.positions_radius.truncate(len);
        self.directions.truncate(len);
        self.instances.truncate(len);
        self.visibility.truncate(len);
    }

    /// Reorder the rows from `start` on; `order[k]` is the old offset (from
    /// `start`) of the row that ends up at offset `k`
    pub(crate) fn permute_tail(&mut self, start: usize, order: &[usize]) {
        debug_assert_eq!(start + order.len(), self.len());
        permute_column(&mut self.positions_radius, start, order);
        permute_column(&mut self.directions, start, order);
        permute_column(&mut self.instances, start, order);
        permute_column(&mut self.visibility, start, order);
    }

    /// Positions (xyz) and falloff radius (w)
    pub fn positions_radius(&self) -> &[Vec4] {
        &self.positions_radius
    }

    /// World directions, zero for lights without one
    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Light component handles, `None` for an empty reserved row
    pub fn instances(&self) -> &[Option<LightInstance>] {
        &self.instances
    }

    /// Per-light visibility placeholder
    pub fn visibility(&self) -> &[u64] {
        &self.visibility
    }
}

impl Default for LightSoa {
    fn default() -> Self {
        Self::new()
    }
}

fn permute_column<T: Copy>(column: &mut Vec<T>, start: usize, order: &[usize]) {
    let tail: Vec<T> = order.iter().map(|&offset| column[start + offset]).collect();
    column.truncate(start);
    column.extend(tail);
}
