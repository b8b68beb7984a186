//! Mapping from contract slots to wgpu/WGSL binding points.
//!
//! Metal-style slot namespaces are independent, while WGSL bindings share one
//! namespace per group. The mapping below keeps each slot number visible in the
//! binding it produces:
//!
//! | Slot | Binding |
//! |------|---------|
//! | `BufferIndex::MeshPositions` (N) | vertex buffer N |
//! | `BufferIndex::Uniforms` (N) | `@group(0) @binding(N)` |
//! | `TextureIndex::*` (N) | `@group(1) @binding(2N)`, sampler at `2N + 1` |
//! | `VertexAttribute::*` (N) | `@location(N)` |

use crate::slots::{BufferIndex, TextureIndex, VertexAttribute};

/// Bind group holding uniform buffers.
pub const UNIFORM_GROUP: u32 = 0;

/// Bind group holding textures and their samplers.
pub const TEXTURE_GROUP: u32 = 1;

/// Binding inside [`UNIFORM_GROUP`] for buffer slots bound as resources.
///
/// Returns `None` for slots consumed as vertex buffers.
pub const fn uniform_binding(slot: BufferIndex) -> Option<u32> {
    match slot {
        BufferIndex::Uniforms => Some(slot.index()),
        BufferIndex::MeshPositions => None,
    }
}

/// Vertex buffer index for buffer slots consumed by the input assembler.
pub const fn vertex_buffer_slot(slot: BufferIndex) -> Option<u32> {
    match slot {
        BufferIndex::MeshPositions => Some(slot.index()),
        BufferIndex::Uniforms => None,
    }
}

/// Texture binding inside [`TEXTURE_GROUP`].
pub const fn texture_binding(slot: TextureIndex) -> u32 {
    slot.index() * 2
}

/// Sampler binding paired with [`texture_binding`].
pub const fn sampler_binding(slot: TextureIndex) -> u32 {
    slot.index() * 2 + 1
}

/// Vertex shader input location.
pub const fn shader_location(attr: VertexAttribute) -> u32 {
    attr.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_buffer_slot_is_bound_exactly_one_way() {
        for slot in BufferIndex::ALL {
            let uniform = uniform_binding(slot).is_some();
            let vertex = vertex_buffer_slot(slot).is_some();
            assert!(uniform ^ vertex, "{slot:?}");
        }
    }

    #[test]
    fn buffer_bindings_keep_the_slot_number() {
        assert_eq!(uniform_binding(BufferIndex::Uniforms), Some(1));
        assert_eq!(vertex_buffer_slot(BufferIndex::MeshPositions), Some(0));
    }

    #[test]
    fn texture_and_sampler_bindings_never_collide() {
        let mut seen: Vec<u32> = TextureIndex::ALL
            .iter()
            .flat_map(|&t| [texture_binding(t), sampler_binding(t)])
            .collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(texture_binding(TextureIndex::Color), 0);
        assert_eq!(sampler_binding(TextureIndex::Color), 1);
    }

    #[test]
    fn shader_locations_follow_attribute_slots() {
        let locs: Vec<u32> = VertexAttribute::ALL.iter().map(|&a| shader_location(a)).collect();
        assert_eq!(locs, vec![0, 1, 2]);
    }
}
