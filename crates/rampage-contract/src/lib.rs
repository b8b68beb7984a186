//! Binding contract between the Rampage view renderer and its shaders.
//!
//! One source of truth for which slot carries what and for the byte layout of
//! the per-frame uniform block. Host code uses the Rust types directly; shader
//! code is compiled from [`wgsl::compose`], which emits the same values as
//! WGSL declarations.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`slots`] | `BufferIndex`, `VertexAttribute`, `TextureIndex` |
//! | [`uniforms`] | `Uniforms`, `Mat4`, `FieldLayout` |
//! | [`binding`] | slot → wgpu group/binding/location mapping |
//! | [`wgsl`] | generated shader prelude |
//! | [`matrix`] | `glam` ↔ wire-matrix conversion for filling `Uniforms` |
//! | [`error`] | `ContractError` |
//!
//! # Quick start
//!
//! ```rust
//! use rampage_contract::{BufferIndex, Uniforms};
//!
//! let block = Uniforms::default();
//! assert_eq!(block.as_bytes().len(), 192);
//! assert_eq!(BufferIndex::Uniforms.index(), 1);
//! ```

pub mod binding;
pub mod error;
pub mod matrix;
pub mod slots;
pub mod uniforms;
pub mod wgsl;

pub use error::ContractError;
pub use slots::{BufferIndex, TextureIndex, VertexAttribute};
pub use uniforms::{FieldLayout, Mat4, Uniforms, UNIFORMS_SIZE};
