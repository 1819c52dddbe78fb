//! Packs CPU side mesh data into GPU ready byte buffers.
//!
//! The flow is:
//!
//! 1. Describe the vertex record as an ordered list of
//!    [`AttributeDescriptor`](types::AttributeDescriptor)s and build a
//!    [`VertexLayout`] from it. This computes every attribute's offset and the
//!    stride.
//! 2. Hand per-role source arrays to [`pack_vertices`] to get one interleaved
//!    [`PackedVertexBuffer`].
//! 3. Narrow the `u32` triangle indices with [`pack_indices`].
//!
//! [`MeshPackBuilder`] does all of this for a [`MeshData`](types::MeshData).
//! Per-instance transforms are packed separately with [`pack_instances`].
//!
//! Nothing here touches a GPU. Buffers come with enough layout information
//! ([`BufferLayoutDescriptor`], [`PackedIndexBuffer::wgt_format`]) to create
//! and bind them with wgpu.

mod error;
mod index;
mod instance;
mod layout;
mod mesh;
mod vertex;

pub use error::*;
pub use index::*;
pub use instance::*;
pub use layout::*;
pub use mesh::*;
/// Reexport of meshpack-types.
pub use meshpack_types as types;
pub use vertex::*;
