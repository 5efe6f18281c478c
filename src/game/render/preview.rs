//! Preview Instance Data
//!
//! Per-instance GPU record for the build preview: model matrix plus a tint
//! that shows whether the current placement would be accepted.
//!
//! WGSL layout (80 bytes):
//! - offset 0:  model (mat4x4<f32>) = 64 bytes
//! - offset 64: tint (vec4<f32>)    = 16 bytes

use bytemuck::{Pod, Zeroable};

use crate::game::pieces::Piece;
use crate::physics::Transform;

/// Tint for a placement that would be accepted (translucent green)
pub const VALID_TINT: [f32; 4] = [0.3, 0.9, 0.4, 0.5];
/// Tint for a rejected placement (translucent red)
pub const INVALID_TINT: [f32; 4] = [0.9, 0.25, 0.2, 0.5];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PreviewInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// RGBA tint, alpha is the preview opacity
    pub tint: [f32; 4],
}

static_assertions::assert_eq_size!(PreviewInstance, [u8; 80]);

impl PreviewInstance {
    pub fn new(transform: &Transform, valid: bool) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
            tint: if valid { VALID_TINT } else { INVALID_TINT },
        }
    }

    /// Instance data for a visible piece, `None` while it is hidden.
    pub fn from_piece(piece: &Piece) -> Option<Self> {
        piece
            .is_visible()
            .then(|| Self::new(piece.transform(), piece.placement_valid()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
