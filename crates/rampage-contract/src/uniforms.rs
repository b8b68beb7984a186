//! Per-frame uniform block.
//!
//! The Rust struct is the wire format: it is uploaded to the uniform slot with
//! `bytemuck::bytes_of` and read by the shader as `struct Uniforms`. Size and
//! offsets are asserted at compile time below.

use std::mem::{align_of, offset_of, size_of};

use bytemuck::{Pod, Zeroable};

use crate::error::ContractError;
use crate::matrix;

/// Column-major 4×4 matrix; `m[c][r]` is column `c`, row `r`.
pub type Mat4 = [[f32; 4]; 4];

/// Size of [`Uniforms`] in bytes.
pub const UNIFORMS_SIZE: usize = 192;

const MAT4_SIZE: usize = size_of::<Mat4>();

/// Transform matrices shared by every vertex and fragment of a frame's draws.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub projection_matrix: Mat4,
    pub model_view_matrix: Mat4,
    /// Pixel-space projection for overlay geometry.
    pub ortho_matrix: Mat4,
}

const _: () = assert!(size_of::<Uniforms>() == UNIFORMS_SIZE);
const _: () = assert!(MAT4_SIZE == 64);
const _: () = assert!(align_of::<Uniforms>() == align_of::<f32>());
const _: () = assert!(offset_of!(Uniforms, projection_matrix) == 0);
const _: () = assert!(offset_of!(Uniforms, model_view_matrix) == 64);
const _: () = assert!(offset_of!(Uniforms, ortho_matrix) == 128);

/// Placement of one field inside the block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FieldLayout {
    /// Rust field name.
    pub name: &'static str,
    /// Member name in the generated WGSL struct.
    pub wgsl_name: &'static str,
    pub offset: usize,
    pub size: usize,
}

impl Uniforms {
    /// Field table in declaration order.
    pub const FIELDS: [FieldLayout; 3] = [
        FieldLayout {
            name: "projection_matrix",
            wgsl_name: "projectionMatrix",
            offset: offset_of!(Uniforms, projection_matrix),
            size: MAT4_SIZE,
        },
        FieldLayout {
            name: "model_view_matrix",
            wgsl_name: "modelViewMatrix",
            offset: offset_of!(Uniforms, model_view_matrix),
            size: MAT4_SIZE,
        },
        FieldLayout {
            name: "ortho_matrix",
            wgsl_name: "orthoMatrix",
            offset: offset_of!(Uniforms, ortho_matrix),
            size: MAT4_SIZE,
        },
    ];

    #[inline]
    pub const fn new(projection_matrix: Mat4, model_view_matrix: Mat4, ortho_matrix: Mat4) -> Self {
        Self { projection_matrix, model_view_matrix, ortho_matrix }
    }

    /// Borrowed byte view, ready for `Queue::write_buffer`.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Owned copy of the 192-byte wire form.
    pub fn to_bytes(&self) -> [u8; UNIFORMS_SIZE] {
        let mut out = [0u8; UNIFORMS_SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// Decodes a block from its wire form.
    ///
    /// `bytes` need not be aligned; any length other than [`UNIFORMS_SIZE`] is
    /// rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContractError> {
        if bytes.len() != UNIFORMS_SIZE {
            return Err(ContractError::ByteLength { expected: UNIFORMS_SIZE, actual: bytes.len() });
        }
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        let id = matrix::identity();
        Self::new(id, id, id)
    }
}
