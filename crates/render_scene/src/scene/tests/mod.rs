//! Pipeline tests driving the scene through the reference component stores

mod bounds;
mod light_budget;

use crate::ecs::{
    Entity, LightComponent, LightFactory, RenderableComponent, TransformComponent, UniformHandle,
    World,
};
use crate::foundation::bounds::BoundingBox;
use crate::foundation::math::Vec3;
use crate::scene::Scene;

/// Unit cube renderable centered on the entity's origin
pub(super) fn unit_cube(uniform: u32) -> RenderableComponent {
    RenderableComponent::new(
        BoundingBox::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)),
        UniformHandle(uniform),
    )
}

pub(super) fn white() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// Create a scene member with a transform and a renderable
pub(super) fn spawn_renderable(
    world: &mut World,
    scene: &mut Scene,
    transform: TransformComponent,
    renderable: RenderableComponent,
) -> Entity {
    let entity = world.create_entity();
    world.add_transform(entity, transform);
    world.add_renderable(entity, renderable);
    scene.add_entity(entity);
    entity
}

/// Create a scene member with a transform and a light
pub(super) fn spawn_light(
    world: &mut World,
    scene: &mut Scene,
    transform: TransformComponent,
    light: LightComponent,
) -> Entity {
    let entity = world.create_entity();
    world.add_transform(entity, transform);
    world.add_light(entity, light);
    scene.add_entity(entity);
    entity
}

/// Point light placed by its transform
pub(super) fn spawn_point_light(world: &mut World, scene: &mut Scene, position: Vec3, radius: f32) -> Entity {
    spawn_light(
        world,
        scene,
        TransformComponent::from_position(position),
        LightFactory::point(Vec3::zeros(), white(), 1.0, radius),
    )
}
