//! GPU rendering subsystem.
//!
//! The view renderer issues wgpu commands against the slots and uniform layout
//! defined in `rampage-contract`. It owns its GPU resources (pipeline, buffers,
//! textures); the surface and the frame loop belong to the caller.
//!
//! Convention:
//! - Mesh geometry is in world space, transformed by `projectionMatrix * modelViewMatrix`.
//! - Overlay geometry is in logical pixels, transformed by `orthoMatrix`.

mod ctx;
pub mod view;

pub use ctx::{RenderCtx, RenderTarget};
