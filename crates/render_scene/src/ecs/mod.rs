//! Entity-Component-System collaborators
//!
//! The scene only talks to entities and components through the traits in
//! this module. The stores here are simple reference implementations used
//! to drive the pipeline headless.

pub mod entity;
pub mod storage;
pub mod components;
pub mod world;

pub use entity::{Entity, EntityManager, EntityRegistry};
pub use components::{
    LightComponent, LightFactory, LightInstance, LightManager, LightType,
    RenderableComponent, RenderableInstance, RenderableManager, UniformHandle, VisibilityFlags,
    TransformComponent, TransformInstance, TransformManager,
};
pub use world::World;
