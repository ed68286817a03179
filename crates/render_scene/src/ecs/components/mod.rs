//! ECS Components
//!
//! Component data and the manager interfaces the scene reads them through.

pub mod lighting;
pub mod renderable;
pub mod transform;

pub use lighting::{LightComponent, LightFactory, LightInstance, LightManager, LightStore, LightType};
pub use renderable::{
    ObjectUniforms, RenderableComponent, RenderableInstance, RenderableManager, RenderableStore,
    UniformHandle, VisibilityFlags, DEFAULT_LAYER,
};
pub use transform::{TransformComponent, TransformInstance, TransformManager, TransformStore};
