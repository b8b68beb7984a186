//! Rampage engine crate.
//!
//! Host-side consumer of the `rampage-contract` binding contract: wgpu layouts
//! derived from the contract's slots, a per-frame uniform ring, and the view
//! renderer that draws with them.

pub mod coords;
pub mod logging;
pub mod render;

pub use rampage_contract as contract;
