//! Shadow caster/receiver bounds over extracted drawables

use super::{spawn_renderable, unit_cube};
use crate::ecs::{TransformComponent, VisibilityFlags, World};
use crate::foundation::bounds::Aabb;
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::Scene;
use approx::assert_relative_eq;

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_scene(world: &mut World) -> Scene {
        let mut scene = Scene::new();
        spawn_renderable(
            world,
            &mut scene,
            TransformComponent::from_position(Vec3::new(-5.0, 0.0, 0.0)),
            unit_cube(1).with_visibility(VisibilityFlags::CAST_SHADOWS),
        );
        spawn_renderable(
            world,
            &mut scene,
            TransformComponent::from_position(Vec3::new(5.0, 0.0, 0.0)),
            unit_cube(2).with_visibility(VisibilityFlags::RECEIVE_SHADOWS),
        );
        spawn_renderable(
            world,
            &mut scene,
            TransformComponent::from_position(Vec3::new(0.0, 20.0, 0.0)),
            unit_cube(3).with_layer_mask(0b10),
        );
        scene.prepare(&Mat4::identity(), &world.context());
        scene
    }

    #[test]
    fn test_casters_and_receivers_are_split() {
        let mut world = World::new();
        let scene = mixed_scene(&mut world);
        let mut casters = Aabb::empty();
        let mut receivers = Aabb::empty();

        scene.compute_bounds(&mut casters, &mut receivers, 0b01);

        assert_relative_eq!(casters.min, Vec3::new(-6.0, -1.0, -1.0));
        assert_relative_eq!(casters.max, Vec3::new(-4.0, 1.0, 1.0));
        assert_relative_eq!(receivers.min, Vec3::new(4.0, -1.0, -1.0));
        assert_relative_eq!(receivers.max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_layer_filter() {
        let mut world = World::new();
        let scene = mixed_scene(&mut world);
        let mut casters = Aabb::empty();
        let mut receivers = Aabb::empty();

        scene.compute_bounds(&mut casters, &mut receivers, 0b11);

        // The cube on layer 2 both casts and receives.
        assert_relative_eq!(casters.max, Vec3::new(1.0, 21.0, 1.0));
        assert_relative_eq!(receivers.min, Vec3::new(-1.0, -1.0, -1.0));
        assert!(casters.contains_point(Vec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_empty_mask_leaves_boxes_untouched() {
        let mut world = World::new();
        let scene = mixed_scene(&mut world);
        let start = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let mut casters = start;
        let mut receivers = Aabb::empty();

        scene.compute_bounds(&mut casters, &mut receivers, 0);

        assert_eq!(casters, start);
        assert!(receivers.is_empty());
    }

    #[test]
    fn test_bounds_only_expand() {
        let mut world = World::new();
        let scene = mixed_scene(&mut world);
        let mut casters = Aabb::new(Vec3::new(-100.0, -100.0, -100.0), Vec3::new(100.0, 100.0, 100.0));
        let mut receivers = Aabb::empty();

        scene.compute_bounds(&mut casters, &mut receivers, 0xff);

        assert_relative_eq!(casters.min, Vec3::new(-100.0, -100.0, -100.0));
        assert_relative_eq!(casters.max, Vec3::new(100.0, 100.0, 100.0));
    }
}
