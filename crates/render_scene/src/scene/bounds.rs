//! Shadow caster and receiver bounds

use super::render_scene::Scene;
use crate::ecs::VisibilityFlags;
use crate::foundation::bounds::Aabb;

impl Scene {
    /// Grow `casters` and `receivers` by the world bounds of every extracted
    /// drawable on one of `visible_layers`
    ///
    /// Only expands; pass [`Aabb::empty`] boxes to start from nothing.
    pub fn compute_bounds(&self, casters: &mut Aabb, receivers: &mut Aabb, visible_layers: u8) {
        let data = &self.renderable_data;
        let rows = data
            .layers()
            .iter()
            .zip(data.visibility())
            .zip(data.world_aabb_centers().iter().zip(data.world_aabb_extents()));

        for ((&layers, &visibility), (center, extent)) in rows {
            if layers & visible_layers == 0 {
                continue;
            }
            let aabb = Aabb::new(center - extent, center + extent);
            if visibility.contains(VisibilityFlags::CAST_SHADOWS) {
                casters.expand(&aabb);
            }
            if visibility.contains(VisibilityFlags::RECEIVE_SHADOWS) {
                receivers.expand(&aabb);
            }
        }
    }
}
