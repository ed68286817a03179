//! Per-frame camera information

use crate::foundation::math::{translation, Mat4, Vec3};

/// Camera state the scene needs for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    /// Camera to world matrix
    pub world_from_camera: Mat4,
}

impl CameraInfo {
    /// Camera placed at a world position with no rotation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            world_from_camera: Mat4::new_translation(&position),
        }
    }

    /// Camera from its camera-to-world matrix
    pub fn from_world_transform(world_from_camera: Mat4) -> Self {
        Self { world_from_camera }
    }

    /// World-space position of the camera
    pub fn position(&self) -> Vec3 {
        translation(&self.world_from_camera)
    }
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            world_from_camera: Mat4::identity(),
        }
    }
}
