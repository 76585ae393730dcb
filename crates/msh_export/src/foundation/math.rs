//! Math utilities and types
//!
//! Provides the vector, matrix and quaternion aliases used by the exporter,
//! plus the local transform stored on every model.

use serde::{Deserialize, Serialize};

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
    Quaternion,
    UnitQuaternion,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Local transform of a model relative to its parent
///
/// The legacy format has no per-model scale; scale is baked into vertex
/// positions upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    /// Translation relative to the parent
    pub translation: Vec3,

    /// Rotation relative to the parent
    pub rotation: Quat,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl ModelTransform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with translation and rotation
    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    /// Convert to a transformation matrix (translation applied after rotation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation) * self.rotation.to_homogeneous()
    }
}
