//! GPU layouts for light data
//!
//! Both structures are std140 compatible and uploaded as raw bytes.

use bytemuck::{Pod, Zeroable};

/// Packed parameters of one point or spot light
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightParameters {
    /// World position and inverse squared falloff [x, y, z, 1/falloff²]
    pub position_falloff: [f32; 4],
    /// Light color and intensity [r, g, b, intensity]
    pub color_intensity: [f32; 4],
    /// World direction and IES profile flag [x, y, z, ies]
    pub direction_ies: [f32; 4],
    /// Spot cone attenuation [scale, offset, unused, unused]
    pub spot_scale_offset: [f32; 4],
}

/// Directional light data for GPU uniform buffer
///
/// All zeros means the frame has no directional light.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct DirectionalLightData {
    /// Light direction and intensity [x, y, z, intensity]
    pub direction: [f32; 4],
    /// Light color [r, g, b, padding]
    pub color: [f32; 4],
}

impl DirectionalLightData {
    /// True when no directional light contributes
    pub fn is_none(&self) -> bool {
        self.direction[3] == 0.0
    }
}
