//! Coordinate types shared by the view renderer and its callers.
//!
//! Canonical CPU space for overlays:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The uniform block's ortho matrix maps this space to NDC.

mod viewport;

pub use viewport::Viewport;
