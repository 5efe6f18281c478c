//! Physics type re-exports from glam
//!
//! Core mathematical types used throughout the build core, plus the rigid
//! [`Transform`] every piece, connector and collider is expressed in.

pub use glam::{Mat3, Mat4, Quat, Vec3};

use serde::{Deserialize, Serialize};

/// Rigid transform: rotation followed by translation. No scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World (or parent) space translation
    pub translation: Vec3,
    /// Orientation relative to the parent frame
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Map a point from this frame into the parent frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    /// Map a direction from this frame into the parent frame.
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Compose `self * child`: the child frame expressed in this frame's parent.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Local +Y expressed in the parent frame.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Column-major model matrix for GPU upload.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
