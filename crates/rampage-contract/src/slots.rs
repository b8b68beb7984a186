//! Slot namespaces.
//!
//! Each namespace is a closed set of small integers starting at 0 with no gaps.
//! The discriminants are the values the shader sees; [`crate::wgsl`] emits them
//! from these enums so neither side spells a number by hand.

use crate::error::ContractError;

macro_rules! slot_enum {
    (
        $(#[$meta:meta])*
        $ty:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $name:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum $ty {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $ty {
            /// Every member, in slot order.
            pub const ALL: [Self; Self::COUNT] = [$(Self::$variant),+];

            /// Number of members in this namespace.
            pub const COUNT: usize = [$($value),+].len();

            /// Integer slot as seen by the shader.
            #[inline]
            pub const fn index(self) -> u32 {
                self as u32
            }

            /// Symbolic name shared with the generated shader constants.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }
        }

        impl TryFrom<u32> for $ty {
            type Error = ContractError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|slot| slot.index() == value)
                    .ok_or(ContractError::UnknownSlot { kind: stringify!($ty), value })
            }
        }

        impl From<$ty> for u32 {
            #[inline]
            fn from(slot: $ty) -> u32 {
                slot.index()
            }
        }
    };
}

slot_enum! {
    /// GPU buffer-binding slots.
    BufferIndex {
        /// Per-vertex mesh data (position, texcoord, color).
        MeshPositions = 0 => "BUFFER_INDEX_MESH_POSITIONS",
        /// Per-frame [`crate::Uniforms`] block.
        Uniforms = 1 => "BUFFER_INDEX_UNIFORMS",
    }
}

slot_enum! {
    /// Vertex shader input locations.
    VertexAttribute {
        Position = 0 => "VERTEX_ATTRIBUTE_POSITION",
        Texcoord = 1 => "VERTEX_ATTRIBUTE_TEXCOORD",
        Color = 2 => "VERTEX_ATTRIBUTE_COLOR",
    }
}

slot_enum! {
    /// Texture-binding slots.
    TextureIndex {
        /// Primary color texture sampled by the fragment stage.
        Color = 0 => "TEXTURE_INDEX_COLOR",
    }
}

impl VertexAttribute {
    /// Number of `f32` components carried by this attribute.
    pub const fn components(self) -> u32 {
        match self {
            Self::Position => 3,
            Self::Texcoord => 2,
            Self::Color => 4,
        }
    }

    /// Member name in the generated `VertexIn` struct.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Texcoord => "texcoord",
            Self::Color => "color",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy + Into<u32>>(all: &[T]) -> Vec<u32> {
        all.iter().map(|s| (*s).into()).collect()
    }

    // ── values ────────────────────────────────────────────────────────────

    #[test]
    fn buffer_slots_are_fixed() {
        assert_eq!(BufferIndex::MeshPositions.index(), 0);
        assert_eq!(BufferIndex::Uniforms.index(), 1);
    }

    #[test]
    fn vertex_attribute_slots_are_fixed() {
        assert_eq!(VertexAttribute::Position.index(), 0);
        assert_eq!(VertexAttribute::Texcoord.index(), 1);
        assert_eq!(VertexAttribute::Color.index(), 2);
    }

    #[test]
    fn texture_slots_are_fixed() {
        assert_eq!(TextureIndex::Color.index(), 0);
    }

    // ── contiguity ────────────────────────────────────────────────────────

    #[test]
    fn namespaces_are_contiguous_from_zero() {
        assert_eq!(values(&BufferIndex::ALL), vec![0, 1]);
        assert_eq!(values(&VertexAttribute::ALL), vec![0, 1, 2]);
        assert_eq!(values(&TextureIndex::ALL), vec![0]);
    }

    #[test]
    fn count_matches_all() {
        assert_eq!(BufferIndex::COUNT, 2);
        assert_eq!(VertexAttribute::COUNT, 3);
        assert_eq!(TextureIndex::COUNT, 1);
    }

    // ── decoding ──────────────────────────────────────────────────────────

    #[test]
    fn try_from_accepts_every_member() {
        for slot in BufferIndex::ALL {
            assert_eq!(BufferIndex::try_from(slot.index()), Ok(slot));
        }
        for slot in VertexAttribute::ALL {
            assert_eq!(VertexAttribute::try_from(slot.index()), Ok(slot));
        }
        for slot in TextureIndex::ALL {
            assert_eq!(TextureIndex::try_from(slot.index()), Ok(slot));
        }
    }

    #[test]
    fn try_from_rejects_first_value_past_the_end() {
        assert_eq!(
            BufferIndex::try_from(2),
            Err(ContractError::UnknownSlot { kind: "BufferIndex", value: 2 })
        );
        assert!(VertexAttribute::try_from(3).is_err());
        assert!(TextureIndex::try_from(1).is_err());
        assert!(TextureIndex::try_from(u32::MAX).is_err());
    }

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn names_are_unique_across_namespaces() {
        let mut names: Vec<&str> = Vec::new();
        names.extend(BufferIndex::ALL.iter().map(|s| s.name()));
        names.extend(VertexAttribute::ALL.iter().map(|s| s.name()));
        names.extend(TextureIndex::ALL.iter().map(|s| s.name()));
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
