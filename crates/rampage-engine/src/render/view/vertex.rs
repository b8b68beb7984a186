use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use rampage_contract::binding::shader_location;
use rampage_contract::VertexAttribute;

/// Interleaved vertex carried by `BufferIndex::MeshPositions`.
///
/// Field order follows the `VertexAttribute` slots.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ViewVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    pub color: [f32; 4], // linear premultiplied RGBA
}

const _: () = assert!(size_of::<ViewVertex>() == 36);

impl ViewVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        shader_location(VertexAttribute::Position) => Float32x3,
        shader_location(VertexAttribute::Texcoord) => Float32x2,
        shader_location(VertexAttribute::Color) => Float32x4
    ];

    #[inline]
    pub const fn new(position: [f32; 3], texcoord: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, texcoord, color }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<ViewVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Byte offset of the field bound to `attr`.
    pub const fn field_offset(attr: VertexAttribute) -> usize {
        match attr {
            VertexAttribute::Position => offset_of!(ViewVertex, position),
            VertexAttribute::Texcoord => offset_of!(ViewVertex, texcoord),
            VertexAttribute::Color => offset_of!(ViewVertex, color),
        }
    }
}
