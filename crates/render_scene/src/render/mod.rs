//! Render-side resources the scene writes into or references
//!
//! Nothing here talks to a graphics API directly: uploads go through the
//! [`LightBufferSink`] trait so the pipeline can run headless.

pub mod camera;
pub mod environment;
pub mod gpu_light_buffer;
pub mod lighting;

pub use camera::CameraInfo;
pub use environment::{IndirectLight, Skybox};
pub use gpu_light_buffer::{
    GpuLightBuffer, HeadlessLightSink, LightBufferError, LightBufferSink, MAX_LIGHT_COUNT,
};
pub use lighting::{DirectionalLightData, LightParameters};
