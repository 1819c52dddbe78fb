use meshpack_types::{AttributeFormat, IndexFormat, MeshValidationError, VertexRole};
use thiserror::Error;

/// Error returned when a layout can't be built or data can't be packed.
///
/// All of these are caller errors. Packing checks everything before writing,
/// so an error never comes with a partially filled buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("Attribute {index} ({role}) uses {format:?}, which can only be used as an instance attribute")]
    InstanceOnlyFormat {
        index: usize,
        role: VertexRole,
        format: AttributeFormat,
    },
    #[error("Attribute {index} ({role}) uses {format:?}, which has no matching wgpu vertex format")]
    NoGpuVertexFormat {
        index: usize,
        role: VertexRole,
        format: AttributeFormat,
    },
    #[error("Layout requires a {role} buffer but none was provided")]
    MissingSource { role: VertexRole },
    #[error("Source {role} buffer has {actual} vertices but {expected} were requested")]
    MismatchedVertexCount {
        role: VertexRole,
        expected: usize,
        actual: usize,
    },
    #[error("Packing vec3 {role} data into {format:?} is not supported")]
    UnsupportedVertexFormat { role: VertexRole, format: AttributeFormat },
    #[error("{format:?} indices can address at most {max} vertices, but the mesh has {vertex_count}")]
    IndexFormatTooNarrow {
        format: IndexFormat,
        vertex_count: usize,
        max: u64,
    },
    #[error("{format:?} index buffers are not supported")]
    UnsupportedIndexFormat { format: IndexFormat },
    #[error("{count} elements of {stride} bytes do not fit in memory")]
    BufferTooLarge { count: usize, stride: u32 },
    #[error("Mesh failed validation")]
    InvalidMesh(#[from] MeshValidationError),
}
