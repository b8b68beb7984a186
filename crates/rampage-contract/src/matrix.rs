//! `glam` interop for filling a [`crate::Uniforms`] block.
//!
//! Host code does its transform math with [`glam::Mat4`] and converts to the
//! column-major wire type at the edge. Conventions match wgpu: right-handed
//! view space looking down -Z, clip-space depth in `0..=1`.

use glam::Mat4 as Transform;

use crate::uniforms::{Mat4, Uniforms};

/// Column-major wire form of `m`.
#[inline]
pub fn to_wire(m: Transform) -> Mat4 {
    m.to_cols_array_2d()
}

#[inline]
pub fn from_wire(m: &Mat4) -> Transform {
    Transform::from_cols_array_2d(m)
}

#[inline]
pub fn identity() -> Mat4 {
    to_wire(Transform::IDENTITY)
}

/// Maps a `width × height` pixel rect (top-left origin, +Y down) to NDC, with
/// `z = 0` landing at depth 0.5.
pub fn pixel_ortho(width: f32, height: f32) -> Transform {
    Transform::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
}

impl Uniforms {
    /// Builds a block from `glam` transforms.
    pub fn from_transforms(projection: Transform, model_view: Transform, ortho: Transform) -> Self {
        Self::new(to_wire(projection), to_wire(model_view), to_wire(ortho))
    }
}
