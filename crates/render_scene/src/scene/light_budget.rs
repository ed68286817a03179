//! Light budgeting and GPU packing
//!
//! When a frame has more point and spot lights than the GPU buffer holds,
//! the ones farthest from the camera are dropped. Distance is measured to
//! the light's sphere of influence, so a light whose sphere contains the
//! camera always ranks first. A far spot light aimed at the camera can still
//! lose to a closer one; that is accepted.

use super::render_scene::Scene;
use super::soa::DIRECTIONAL_LIGHTS_COUNT;
use crate::ecs::LightManager;
use crate::foundation::math::{Vec3, Vec4};
use crate::render::{
    CameraInfo, DirectionalLightData, GpuLightBuffer, LightBufferError, LightBufferSink,
    LightParameters,
};

/// Distance from the camera to the light's sphere of influence, zero inside it
pub fn priority_distance(camera: &Vec3, position_radius: &Vec4) -> f32 {
    ((camera - position_radius.xyz()).norm() - position_radius.w).max(0.0)
}

impl Scene {
    /// Fit the extracted lights into the GPU buffer, pack them and commit
    ///
    /// Must run after [`prepare`](Self::prepare) in the same frame. The
    /// directional light row is never dropped and never packed here; see
    /// [`directional_light`](Self::directional_light).
    ///
    /// # Panics
    ///
    /// Panics if more lights survive budgeting than the buffer holds.
    pub fn prepare_lights(
        &mut self,
        camera: &CameraInfo,
        lights: &dyn LightManager,
        gpu: &mut GpuLightBuffer,
        sink: &mut dyn LightBufferSink,
    ) -> Result<(), LightBufferError> {
        let capacity = gpu.capacity();
        let limit = DIRECTIONAL_LIGHTS_COUNT + capacity;

        if self.light_data.len() > limit {
            self.sort_lights_by_priority(&camera.position());
            let dropped = self.light_data.len() - limit;
            self.light_data.truncate(limit);
            self.light_distances.truncate(capacity);
            if self.config.log_dropped_lights {
                log::debug!(
                    "Light budget exceeded: dropped {} lights farthest from the camera (capacity {})",
                    dropped,
                    capacity
                );
            }
        }

        let light_data = &self.light_data;
        assert!(
            light_data.len() <= limit,
            "{} lights exceed the GPU buffer capacity {}",
            light_data.len() - DIRECTIONAL_LIGHTS_COUNT,
            capacity
        );

        let positions = &light_data.positions_radius()[DIRECTIONAL_LIGHTS_COUNT..];
        let directions = &light_data.directions()[DIRECTIONAL_LIGHTS_COUNT..];
        let instances = &light_data.instances()[DIRECTIONAL_LIGHTS_COUNT..];
        let mut count = 0;
        for (slot, ((position, direction), instance)) in
            positions.iter().zip(directions).zip(instances).enumerate()
        {
            let Some(li) = *instance else {
                continue;
            };
            let color = lights.color(li);
            let [scale, offset] = lights.spot_scale_offset(li);
            *gpu.light_parameters_mut(slot) = LightParameters {
                position_falloff: [position.x, position.y, position.z, lights.squared_falloff_inv(li)],
                color_intensity: [color.x, color.y, color.z, lights.intensity(li)],
                direction_ies: [
                    direction.x,
                    direction.y,
                    direction.z,
                    if lights.is_ies(li) { 1.0 } else { 0.0 },
                ],
                spot_scale_offset: [scale, offset, 0.0, 0.0],
            };
            count = slot + 1;
        }

        gpu.set_light_count(count);
        gpu.invalidate(0, count)?;
        gpu.commit(sink)
    }

    /// Stable sort of the non-reserved light rows by ascending priority distance
    fn sort_lights_by_priority(&mut self, camera: &Vec3) {
        let distances = &mut self.light_distances;
        distances.clear();
        distances.extend(
            self.light_data.positions_radius()[DIRECTIONAL_LIGHTS_COUNT..]
                .iter()
                .map(|position_radius| priority_distance(camera, position_radius)),
        );

        let mut order: Vec<usize> = (0..distances.len()).collect();
        order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

        self.light_data.permute_tail(DIRECTIONAL_LIGHTS_COUNT, &order);
        let sorted: Vec<f32> = order.iter().map(|&i| distances[i]).collect();
        *distances = sorted;
    }

    /// Pack the frame's directional light for the per-frame uniforms
    ///
    /// All zeros when no directional light was extracted.
    pub fn directional_light(&self, lights: &dyn LightManager) -> DirectionalLightData {
        let Some(li) = self.light_data.instances()[0] else {
            return DirectionalLightData::default();
        };
        let direction = self.light_data.directions()[0];
        let color = lights.color(li);
        DirectionalLightData {
            direction: [direction.x, direction.y, direction.z, lights.intensity(li)],
            color: [color.x, color.y, color.z, 0.0],
        }
    }
}
