use meshpack_types::{wgt, IndexFormat};

use crate::PackError;

/// Index data narrowed to a fixed width, ready to be uploaded to an index
/// buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedIndexBuffer {
    data: Vec<u8>,
    format: IndexFormat,
    count: usize,
}

impl PackedIndexBuffer {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn format(&self) -> IndexFormat {
        self.format
    }

    /// Number of indices in the buffer.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn byte_width(&self) -> u32 {
        self.format.byte_width()
    }

    /// Format to bind this buffer with in wgpu. `None` for 8 bit indices,
    /// which wgpu can't draw with.
    pub fn wgt_format(&self) -> Option<wgt::IndexFormat> {
        self.format.to_wgt()
    }
}

/// Narrows `indices` to `format`.
///
/// `format` must be able to address every vertex in `0..vertex_count`.
/// Indices themselves are truncated, not checked; pair this with
/// [`MeshData::validate`](meshpack_types::MeshData::validate) to catch
/// out of range values.
pub fn pack_indices(indices: &[u32], format: IndexFormat, vertex_count: usize) -> Result<PackedIndexBuffer, PackError> {
    profiling::scope!("pack_indices");

    if let Some(max) = format.max_vertex_count() {
        if vertex_count as u64 > max {
            return Err(PackError::IndexFormatTooNarrow {
                format,
                vertex_count,
                max,
            });
        }
    }

    let data: Vec<u8> = match format {
        IndexFormat::Uint8 => indices.iter().map(|&i| i as u8).collect(),
        IndexFormat::Uint16 => indices.iter().flat_map(|&i| (i as u16).to_le_bytes()).collect(),
        IndexFormat::Uint32 if cfg!(target_endian = "little") => bytemuck::cast_slice(indices).to_vec(),
        IndexFormat::Uint32 => indices.iter().flat_map(|&i| i.to_le_bytes()).collect(),
        IndexFormat::Uint24 => return Err(PackError::UnsupportedIndexFormat { format }),
    };

    log::debug!(
        "Packed {} indices as {format:?} into {} bytes",
        indices.len(),
        data.len()
    );

    Ok(PackedIndexBuffer {
        data,
        format,
        count: indices.len(),
    })
}
