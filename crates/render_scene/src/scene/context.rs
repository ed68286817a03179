//! Read-only view of the component stores used by extraction

use crate::ecs::{EntityRegistry, LightManager, RenderableManager, TransformManager};

/// Collaborators the extraction pass reads from
///
/// Every field is a shared borrow, so the stores cannot change while a
/// frame is being extracted.
#[derive(Clone, Copy)]
pub struct SceneContext<'a> {
    /// Entity liveness
    pub entities: &'a dyn EntityRegistry,
    /// Transform components
    pub transforms: &'a dyn TransformManager,
    /// Renderable components
    pub renderables: &'a dyn RenderableManager,
    /// Light components
    pub lights: &'a dyn LightManager,
}
