//! Extraction pass
//!
//! Sweeps the membership set once and copies what culling, shadow fitting
//! and light budgeting need into the columnar buffers.

use super::context::SceneContext;
use super::render_scene::Scene;
use super::soa::{extraction_capacity, RenderableRow, DIRECTIONAL_LIGHTS_COUNT};
use crate::foundation::math::{transform_direction, transform_point, Mat4, Vec3, Vec4};

impl Scene {
    /// Rebuild both extraction buffers for this frame
    ///
    /// Dead entities and entities with neither a renderable nor a light are
    /// skipped. A renderable needs a transform to be drawn; a light without
    /// one sits at the world origin. Of all directional lights, only the most
    /// intense one is kept, in the reserved first light row; on equal
    /// intensity the one met last wins.
    pub fn prepare(&mut self, world_origin: &Mat4, ctx: &SceneContext<'_>) {
        let capacity = extraction_capacity(self.entities.len());
        self.renderable_data.clear();
        self.renderable_data.set_capacity(capacity);
        self.light_data.reset();
        self.light_data.set_capacity(capacity);

        let mut max_intensity = 0.0_f32;
        for entity in self.entities.iter() {
            if !ctx.entities.is_alive(entity) {
                log::trace!("Skipping dead entity {}", entity.id());
                continue;
            }

            let ri = ctx.renderables.instance(entity);
            let li = ctx.lights.instance(entity);
            if ri.is_none() && li.is_none() {
                continue;
            }

            let ti = ctx.transforms.instance(entity);
            let local = ti.map_or_else(Mat4::identity, |ti| ctx.transforms.world_transform(ti));
            let world = world_origin * local;

            if let Some(ri) = ri {
                if ti.is_some() {
                    self.renderable_data.push(RenderableRow {
                        instance: ri,
                        world_transform: world,
                        visibility: ctx.renderables.visibility(ri),
                        uniform: ctx.renderables.uniform(ri),
                        bones_uniform: ctx.renderables.bones_uniform(ri),
                        world_aabb: ctx.renderables.aabb(ri).transformed(&world),
                        layers: ctx.renderables.layer_mask(ri),
                    });
                } else {
                    log::trace!("Skipping renderable entity {} without transform", entity.id());
                }
            }

            let Some(li) = li else {
                continue;
            };
            let lights = ctx.lights;
            if lights.is_directional(li) {
                let intensity = lights.intensity(li);
                if intensity >= max_intensity {
                    max_intensity = intensity;
                    let direction = transform_direction(&world, &lights.local_direction(li));
                    self.light_data.set(0, Vec4::zeros(), direction, li);
                }
            } else {
                let position = transform_point(&world, &lights.local_position(li));
                let direction = if !lights.is_point(li) || lights.is_ies(li) {
                    transform_direction(&world, &lights.local_direction(li))
                } else {
                    Vec3::zeros()
                };
                self.light_data
                    .push(position.push(lights.radius(li)), direction, li);
            }
        }

        log::trace!(
            "Extracted {} renderables and {} lights from {} entities",
            self.renderable_data.len(),
            self.light_data.len() - DIRECTIONAL_LIGHTS_COUNT,
            self.entities.len()
        );
    }
}
