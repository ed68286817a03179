//! # Render Scene
//!
//! Per-frame scene extraction for a real-time renderer: turns the entities
//! of a scene into flat, column-oriented buffers for culling and shadow
//! fitting, and budgets the scene's lights into a fixed-size GPU buffer.
//!
//! ## Features
//!
//! - **Extraction**: one pass over the scene fills drawable and light buffers
//! - **Light Budgeting**: nearest lights win when the GPU buffer is full
//! - **Shadow Bounds**: caster and receiver boxes filtered by layer
//! - **Headless**: GPU uploads go through a trait, so everything runs in tests
//!
//! ## Quick Start
//!
//! ```rust
//! use render_scene::prelude::*;
//!
//! fn main() -> Result<(), LightBufferError> {
//!     let mut world = World::new();
//!     let mut scene = Scene::new();
//!
//!     let lamp = world.create_entity();
//!     world.add_transform(lamp, TransformComponent::from_position(Vec3::new(0.0, 3.0, 0.0)));
//!     world.add_light(lamp, LightFactory::point(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 10.0, 5.0));
//!     scene.add_entity(lamp);
//!
//!     let mut gpu = GpuLightBuffer::default();
//!     let mut sink = HeadlessLightSink::new();
//!     scene.prepare(&Mat4::identity(), &world.context());
//!     scene.prepare_lights(&CameraInfo::default(), &world.lights, &mut gpu, &mut sink)?;
//!
//!     assert_eq!(gpu.light_count(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig},
        ecs::{
            Entity, EntityRegistry, LightComponent, LightFactory, LightManager,
            RenderableComponent, RenderableManager, TransformComponent, TransformManager,
            UniformHandle, VisibilityFlags, World,
        },
        foundation::{
            bounds::{Aabb, BoundingBox},
            math::{Mat4, Vec3, Vec4},
        },
        render::{
            CameraInfo, DirectionalLightData, GpuLightBuffer, HeadlessLightSink, IndirectLight,
            LightBufferError, LightBufferSink, Skybox,
        },
        scene::{Scene, SceneContext},
    };
}
