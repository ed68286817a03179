//! Math utilities and types
//!
//! Provides the nalgebra aliases used by the extraction buffers and the
//! direction/point transforms shared by the extraction pass.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Minimum length a direction must have to be normalized
const MIN_DIRECTION_LENGTH: f32 = 1e-12;

/// Upper-left 3x3 block of an affine transform (rotation and scale)
pub fn upper_left(matrix: &Mat4) -> Mat3 {
    matrix.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Inverse-transpose of the upper-left 3x3 block
///
/// Directions and normals must go through this matrix rather than the plain
/// upper-left block, otherwise non-uniform scale skews them. A singular block
/// has no inverse; it is returned unchanged.
pub fn normal_matrix(matrix: &Mat4) -> Mat3 {
    let upper = upper_left(matrix);
    upper
        .try_inverse()
        .map_or(upper, |inverse| inverse.transpose())
}

/// Transform a direction into world space and normalize it
///
/// Degenerate results (zero length) come back as the zero vector.
pub fn transform_direction(matrix: &Mat4, direction: &Vec3) -> Vec3 {
    (normal_matrix(matrix) * direction)
        .try_normalize(MIN_DIRECTION_LENGTH)
        .unwrap_or_else(Vec3::zeros)
}

/// Transform a position by a full affine matrix
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*point)).coords
}

/// Translation part of an affine matrix
pub fn translation(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}
