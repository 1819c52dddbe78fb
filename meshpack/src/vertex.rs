use glam::Vec3;
use half::f16;
use meshpack_types::{AttributeFormat, MeshData, VertexRole};
use smallvec::SmallVec;

use crate::{LayoutAttribute, PackError, VertexLayout};

/// Borrowed per-role source data for the vertex packer.
///
/// Holds at most one array per role; inserting a role twice replaces the
/// earlier array.
#[derive(Debug, Default, Clone)]
pub struct SourceVertexArrays<'a> {
    arrays: SmallVec<[(VertexRole, &'a [Vec3]); 5]>,
}

impl<'a> SourceVertexArrays<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: VertexRole, data: &'a [Vec3]) -> Self {
        self.insert(role, data);
        self
    }

    pub fn insert(&mut self, role: VertexRole, data: &'a [Vec3]) {
        match self.arrays.iter_mut().find(|(r, _)| *r == role) {
            Some(slot) => slot.1 = data,
            None => self.arrays.push((role, data)),
        }
    }

    pub fn get(&self, role: VertexRole) -> Option<&'a [Vec3]> {
        self.arrays
            .iter()
            .find_map(|&(r, data)| (r == role).then_some(data))
    }
}

impl<'a> From<&'a MeshData> for SourceVertexArrays<'a> {
    fn from(mesh: &'a MeshData) -> Self {
        let mut sources = Self::new();
        for (role, data) in mesh.attributes() {
            sources.insert(role, data);
        }
        sources
    }
}

/// Interleaved vertex data, ready to be uploaded to a vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedVertexBuffer {
    data: Vec<u8>,
    layout: VertexLayout,
    vertex_count: usize,
}

impl PackedVertexBuffer {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The layout the data was packed with. Carries stride and offsets.
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn stride(&self) -> u32 {
        self.layout.stride()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Bytes of a single vertex record.
    pub fn vertex(&self, index: usize) -> Option<&[u8]> {
        if index >= self.vertex_count {
            return None;
        }
        let stride = self.layout.stride() as usize;
        self.data.get(index * stride..(index + 1) * stride)
    }
}

/// Packs `vertex_count` vertices from `sources` into one interleaved buffer.
///
/// `Float3` attributes are copied as-is. `Half4` attributes get a 4th
/// component of zero and are converted to binary16. Every other format is
/// rejected. Everything is little-endian; bytes not covered by an attribute
/// stay zero.
pub fn pack_vertices(
    layout: &VertexLayout,
    sources: &SourceVertexArrays<'_>,
    vertex_count: usize,
) -> Result<PackedVertexBuffer, PackError> {
    profiling::scope!("pack_vertices");

    // Check everything up front so we never hand back a half written buffer.
    let mut inputs: SmallVec<[(&LayoutAttribute, Encoding, &[Vec3]); 5]> = SmallVec::new();
    for attribute in layout.attributes() {
        let encoding = match attribute.format {
            AttributeFormat::Float3 => Encoding::Float3,
            AttributeFormat::Half4 => Encoding::Half4,
            format => {
                return Err(PackError::UnsupportedVertexFormat {
                    role: attribute.role,
                    format,
                })
            }
        };

        let data = sources
            .get(attribute.role)
            .ok_or(PackError::MissingSource { role: attribute.role })?;
        if data.len() != vertex_count {
            return Err(PackError::MismatchedVertexCount {
                role: attribute.role,
                expected: vertex_count,
                actual: data.len(),
            });
        }

        inputs.push((attribute, encoding, data));
    }

    let stride = layout.stride() as usize;
    let size = vertex_count.checked_mul(stride).ok_or(PackError::BufferTooLarge {
        count: vertex_count,
        stride: layout.stride(),
    })?;
    let mut data = vec![0_u8; size];

    for (attribute, encoding, source) in inputs {
        let offset = attribute.offset as usize;
        let width = attribute.format.size() as usize;
        let records = data.chunks_exact_mut(stride);
        for (record, value) in records.zip(source) {
            let dst = &mut record[offset..offset + width];
            match encoding {
                Encoding::Float3 => write_f32s(dst, &value.to_array()),
                Encoding::Half4 => write_f16s(dst, &value.extend(0.0).to_array()),
            }
        }
    }

    log::debug!(
        "Packed {vertex_count} vertices with {} attributes into {size} bytes",
        layout.attributes().len()
    );

    Ok(PackedVertexBuffer {
        data,
        layout: layout.clone(),
        vertex_count,
    })
}

/// How a `Vec3` source is written into an attribute slot.
#[derive(Debug, Copy, Clone)]
enum Encoding {
    Float3,
    /// `w` is always zero.
    Half4,
}

fn write_f32s(dst: &mut [u8], values: &[f32]) {
    for (bytes, value) in dst.chunks_exact_mut(4).zip(values) {
        bytes.copy_from_slice(&value.to_le_bytes());
    }
}

fn write_f16s(dst: &mut [u8], values: &[f32]) {
    for (bytes, &value) in dst.chunks_exact_mut(2).zip(values) {
        bytes.copy_from_slice(&f16::from_f32(value).to_le_bytes());
    }
}
