//! Scene extraction
//!
//! Per-frame pipeline turning the entities of a scene into flat buffers for
//! culling, shadow fitting and light upload.

mod bounds;
pub mod context;
pub mod entity_set;
mod extraction;
pub mod light_budget;
pub mod render_scene;
pub mod soa;

#[cfg(test)]
mod tests;

pub use context::SceneContext;
pub use entity_set::EntitySet;
pub use light_budget::priority_distance;
pub use render_scene::Scene;
pub use soa::{
    extraction_capacity, LightSoa, RenderableRow, RenderableSoa, DIRECTIONAL_LIGHTS_COUNT,
    SIMD_BLOCK_SIZE,
};
