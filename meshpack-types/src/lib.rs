//! Type declarations for the meshpack vertex and index packing crate.
//!
//! This is reexported in the meshpack crate proper and includes all the
//! "surface" api arguments: attribute formats, vertex roles, index formats
//! and the CPU side mesh data that gets packed.

/// Reexport of the glam version meshpack is using.
pub use glam;
/// Reexport of the wgpu-types version meshpack describes its buffers with.
pub use wgt;

mod attribute;
mod mesh;

pub use attribute::*;
pub use mesh::*;
