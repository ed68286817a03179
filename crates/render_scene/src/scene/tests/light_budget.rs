//! Light budgeting, GPU packing and commit

use super::{spawn_light, spawn_point_light, white};
use crate::config::SceneConfig;
use crate::ecs::{Entity, LightFactory, LightInstance, TransformComponent, World};
use crate::foundation::logging;
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::{
    CameraInfo, GpuLightBuffer, HeadlessLightSink, LightBufferError, LightParameters,
};
use crate::scene::{Scene, DIRECTIONAL_LIGHTS_COUNT};
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn instance_of(world: &World, entity: Entity) -> Option<LightInstance> {
        world.lights.instance(entity)
    }

    fn run_frame(world: &World, scene: &mut Scene, gpu: &mut GpuLightBuffer, sink: &mut HeadlessLightSink) {
        scene.prepare(&Mat4::identity(), &world.context());
        scene
            .prepare_lights(&CameraInfo::default(), &world.lights, gpu, sink)
            .unwrap();
    }

    #[test]
    fn test_under_budget_keeps_encounter_order() {
        let mut world = World::new();
        let mut scene = Scene::new();
        let entities: Vec<_> = (0..10)
            .map(|i| spawn_point_light(&mut world, &mut scene, Vec3::new(10.0 - i as f32, 0.0, 0.0), 1.0))
            .collect();
        let mut gpu = GpuLightBuffer::default();
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        let expected: Vec<_> = entities.iter().map(|&e| instance_of(&world, e)).collect();
        assert_eq!(&scene.light_data().instances()[DIRECTIONAL_LIGHTS_COUNT..], expected.as_slice());
        assert_eq!(gpu.light_count(), 10);
        assert_eq!(sink.lights().len(), 10);
        assert_relative_eq!(sink.lights()[0].position_falloff[0], 10.0);
    }

    #[test]
    fn test_over_budget_keeps_nearest_lights() {
        logging::init_test();
        let mut world = World::new();
        let mut scene = Scene::new();
        spawn_point_light(&mut world, &mut scene, Vec3::new(5.0, 0.0, 0.0), 0.0);
        let near = spawn_point_light(&mut world, &mut scene, Vec3::new(1.0, 0.0, 0.0), 0.0);
        let mid = spawn_point_light(&mut world, &mut scene, Vec3::new(3.0, 0.0, 0.0), 0.0);
        let mut gpu = GpuLightBuffer::new(2);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        let lights = scene.light_data();
        assert_eq!(lights.len(), DIRECTIONAL_LIGHTS_COUNT + 2);
        assert_eq!(lights.instances()[1], instance_of(&world, near));
        assert_eq!(lights.instances()[2], instance_of(&world, mid));

        let uploaded = sink.lights();
        assert_eq!(uploaded.len(), 2);
        assert_relative_eq!(uploaded[0].position_falloff[0], 1.0, epsilon = EPSILON);
        assert_relative_eq!(uploaded[1].position_falloff[0], 3.0, epsilon = EPSILON);
    }

    #[test]
    fn test_light_containing_camera_is_never_dropped_first() {
        let mut world = World::new();
        let mut scene = Scene::new();
        spawn_point_light(&mut world, &mut scene, Vec3::new(2.0, 0.0, 0.0), 0.0);
        spawn_point_light(&mut world, &mut scene, Vec3::new(4.0, 0.0, 0.0), 0.0);
        let huge = spawn_point_light(&mut world, &mut scene, Vec3::new(100.0, 0.0, 0.0), 200.0);
        let mut gpu = GpuLightBuffer::new(1);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        assert_eq!(scene.light_data().len(), DIRECTIONAL_LIGHTS_COUNT + 1);
        assert_eq!(scene.light_data().instances()[1], instance_of(&world, huge));
    }

    #[test]
    fn test_equal_priorities_keep_encounter_order() {
        let mut world = World::new();
        let mut scene = Scene::new();
        spawn_point_light(&mut world, &mut scene, Vec3::new(10.0, 0.0, 0.0), 0.0);
        let right = spawn_point_light(&mut world, &mut scene, Vec3::new(2.0, 0.0, 0.0), 0.0);
        let left = spawn_point_light(&mut world, &mut scene, Vec3::new(-2.0, 0.0, 0.0), 0.0);
        let mut gpu = GpuLightBuffer::new(2);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        assert_eq!(scene.light_data().instances()[1], instance_of(&world, right));
        assert_eq!(scene.light_data().instances()[2], instance_of(&world, left));
    }

    #[test]
    fn test_directional_light_survives_budgeting() {
        let mut world = World::new();
        let mut scene = Scene::new();
        let sun = spawn_light(
            &mut world,
            &mut scene,
            TransformComponent::identity(),
            LightFactory::directional(Vec3::new(0.0, -1.0, 0.0), white(), 1.0),
        );
        for i in 0..3 {
            spawn_point_light(&mut world, &mut scene, Vec3::new(i as f32, 0.0, 0.0), 0.5);
        }
        let mut gpu = GpuLightBuffer::new(1);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        assert_eq!(scene.light_data().len(), DIRECTIONAL_LIGHTS_COUNT + 1);
        assert_eq!(scene.light_data().instances()[0], instance_of(&world, sun));
        assert_eq!(gpu.light_count(), 1);
    }

    #[test]
    fn test_packed_spot_light_parameters() {
        let mut world = World::new();
        let mut scene = Scene::new();
        let spot = LightFactory::spot(
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.5, 0.25),
            8.0,
            6.0,
            0.2,
            0.4,
        )
        .with_ies_profile();
        let [scale, offset] = spot.spot_scale_offset();
        spawn_light(&mut world, &mut scene, TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0)), spot);
        let mut gpu = GpuLightBuffer::new(4);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        let expected = LightParameters {
            position_falloff: [1.0, 2.0, 3.0, 1.0 / 36.0],
            color_intensity: [1.0, 0.5, 0.25, 8.0],
            direction_ies: [0.0, 0.0, -1.0, 1.0],
            spot_scale_offset: [scale, offset, 0.0, 0.0],
        };
        let packed = gpu.lights()[0];
        for (actual, wanted) in [
            (packed.position_falloff, expected.position_falloff),
            (packed.color_intensity, expected.color_intensity),
            (packed.direction_ies, expected.direction_ies),
            (packed.spot_scale_offset, expected.spot_scale_offset),
        ] {
            assert_relative_eq!(Vec4::from(actual), Vec4::from(wanted), epsilon = EPSILON);
        }
        assert_eq!(sink.lights(), gpu.lights().to_vec());
    }

    #[test]
    fn test_no_point_lights_uploads_nothing() {
        let mut world = World::new();
        let mut scene = Scene::new();
        spawn_light(
            &mut world,
            &mut scene,
            TransformComponent::identity(),
            LightFactory::directional(Vec3::new(0.0, -1.0, 0.0), white(), 1.0),
        );
        let mut gpu = GpuLightBuffer::new(4);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        assert_eq!(gpu.light_count(), 0);
        assert_eq!(gpu.dirty_range(), None);
        assert_eq!(gpu.generation(), 1);
        assert_eq!(sink.upload_count(), 0);
    }

    #[test]
    fn test_second_frame_rewrites_only_current_lights() {
        let mut world = World::new();
        let mut scene = Scene::new();
        let first = spawn_point_light(&mut world, &mut scene, Vec3::new(1.0, 0.0, 0.0), 1.0);
        spawn_point_light(&mut world, &mut scene, Vec3::new(2.0, 0.0, 0.0), 1.0);
        let mut gpu = GpuLightBuffer::new(4);
        let mut sink = HeadlessLightSink::new();
        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        scene.remove(first);
        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        assert_eq!(gpu.light_count(), 1);
        assert_eq!(gpu.generation(), 2);
        assert_eq!(sink.upload_count(), 2);
        assert_relative_eq!(gpu.lights()[0].position_falloff[0], 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_terminated_buffer_error_propagates() {
        let mut world = World::new();
        let mut scene = Scene::new();
        spawn_point_light(&mut world, &mut scene, Vec3::zeros(), 1.0);
        let mut gpu = GpuLightBuffer::new(4);
        let mut sink = HeadlessLightSink::new();
        gpu.terminate(&mut sink);

        scene.prepare(&Mat4::identity(), &world.context());
        let result = scene.prepare_lights(&CameraInfo::default(), &world.lights, &mut gpu, &mut sink);

        assert_eq!(result, Err(LightBufferError::Terminated));
    }

    #[test]
    fn test_buffer_sized_from_config() {
        let config = SceneConfig::from_toml_str("light_capacity = 1\nlog_dropped_lights = false").unwrap();
        let mut world = World::new();
        let mut scene = Scene::with_config(config.clone());
        spawn_point_light(&mut world, &mut scene, Vec3::new(3.0, 0.0, 0.0), 0.0);
        let near = spawn_point_light(&mut world, &mut scene, Vec3::new(1.0, 0.0, 0.0), 0.0);
        let mut gpu = GpuLightBuffer::from_config(&config);
        let mut sink = HeadlessLightSink::new();

        run_frame(&world, &mut scene, &mut gpu, &mut sink);

        assert_eq!(gpu.capacity(), 1);
        assert_eq!(scene.light_data().instances()[1], instance_of(&world, near));
    }

    #[test]
    fn test_directional_light_packing() {
        let mut world = World::new();
        let mut scene = Scene::new();
        scene.prepare(&Mat4::identity(), &world.context());
        let none = scene.directional_light(&world.lights);
        assert!(none.is_none());
        assert_eq!(none, Default::default());

        spawn_light(
            &mut world,
            &mut scene,
            TransformComponent::identity(),
            LightFactory::directional(Vec3::new(0.0, -2.0, 0.0), Vec3::new(1.0, 0.5, 0.25), 4.0),
        );
        scene.prepare(&Mat4::identity(), &world.context());
        let sun = scene.directional_light(&world.lights);

        assert_relative_eq!(Vec4::from(sun.direction), Vec4::new(0.0, -1.0, 0.0, 4.0), epsilon = EPSILON);
        assert_eq!(sun.color, [1.0, 0.5, 0.25, 0.0]);
        assert!(!sun.is_none());
    }
}
