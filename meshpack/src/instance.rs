use glam::Mat4;
use meshpack_types::{wgt, AttributeFormat};

use crate::BufferLayoutDescriptor;

const MATRIX_COLUMNS: u32 = 4;
const COLUMN_SIZE: u32 = AttributeFormat::Float4.size();

/// Per-instance layout holding a single [`AttributeFormat::Mat4x4`]
/// transform.
///
/// The matrix is fetched as four `vec4<f32>` columns in consecutive shader
/// locations starting at `first_shader_location`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InstanceLayout {
    first_shader_location: u32,
}

impl InstanceLayout {
    pub fn new(first_shader_location: u32) -> Self {
        Self { first_shader_location }
    }

    /// Places the instance attributes right after the vertex attributes of
    /// `layout`.
    pub fn after(layout: &crate::VertexLayout) -> Self {
        Self::new(layout.attributes().len() as u32)
    }

    pub fn format(&self) -> AttributeFormat {
        AttributeFormat::Mat4x4
    }

    pub fn stride(&self) -> u32 {
        AttributeFormat::Mat4x4.size()
    }

    pub fn shader_locations(&self) -> std::ops::Range<u32> {
        self.first_shader_location..self.first_shader_location + MATRIX_COLUMNS
    }

    pub fn buffer_layout(&self) -> BufferLayoutDescriptor {
        BufferLayoutDescriptor {
            array_stride: self.stride() as wgt::BufferAddress,
            step_mode: wgt::VertexStepMode::Instance,
            attributes: self
                .shader_locations()
                .enumerate()
                .map(|(column, shader_location)| wgt::VertexAttribute {
                    format: wgt::VertexFormat::Float32x4,
                    offset: (column as u32 * COLUMN_SIZE) as wgt::BufferAddress,
                    shader_location,
                })
                .collect(),
        }
    }
}

/// Packed per-instance transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedInstanceBuffer {
    data: Vec<u8>,
    layout: InstanceLayout,
    instance_count: usize,
}

impl PackedInstanceBuffer {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn layout(&self) -> &InstanceLayout {
        &self.layout
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }
}

/// Packs one column-major, little-endian matrix per instance.
pub fn pack_instances(layout: &InstanceLayout, transforms: &[Mat4]) -> PackedInstanceBuffer {
    profiling::scope!("pack_instances");

    let data: Vec<u8> = if cfg!(target_endian = "little") {
        bytemuck::cast_slice(transforms).to_vec()
    } else {
        transforms
            .iter()
            .flat_map(|m| m.to_cols_array())
            .flat_map(f32::to_le_bytes)
            .collect()
    };

    log::debug!("Packed {} instance transforms into {} bytes", transforms.len(), data.len());

    PackedInstanceBuffer {
        data,
        layout: *layout,
        instance_count: transforms.len(),
    }
}
