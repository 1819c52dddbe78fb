use meshpack_types::{wgt, AttributeDescriptor, AttributeFormat, VertexRole};

use crate::PackError;

/// A non-null attribute of a [`VertexLayout`] with its place in the vertex
/// record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LayoutAttribute {
    /// Index of the descriptor this attribute came from.
    pub descriptor_index: usize,
    pub role: VertexRole,
    pub format: AttributeFormat,
    /// Byte offset from the start of the vertex record.
    pub offset: u32,
    /// Binding index, counted over non-null attributes only.
    pub shader_location: u32,
}

/// Ordered, interleaved vertex layout.
///
/// Offsets are assigned cumulatively in descriptor order. Null descriptors
/// stay in [`VertexLayout::descriptors`] but take no space and get no
/// offset or shader location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    descriptors: Vec<AttributeDescriptor>,
    attributes: Vec<LayoutAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Computes offsets and stride for the given descriptors.
    pub fn build<I>(descriptors: I) -> Result<Self, PackError>
    where
        I: IntoIterator,
        I::Item: Into<AttributeDescriptor>,
    {
        let descriptors: Vec<AttributeDescriptor> = descriptors.into_iter().map(Into::into).collect();

        let mut attributes = Vec::with_capacity(descriptors.len());
        let mut stride = 0_u32;
        for (descriptor_index, descriptor) in descriptors.iter().enumerate() {
            let format = match descriptor.format {
                Some(format) => format,
                None => continue,
            };
            if format == AttributeFormat::Mat4x4 {
                return Err(PackError::InstanceOnlyFormat {
                    index: descriptor_index,
                    role: descriptor.role,
                    format,
                });
            }

            attributes.push(LayoutAttribute {
                descriptor_index,
                role: descriptor.role,
                format,
                offset: stride,
                shader_location: attributes.len() as u32,
            });
            stride += format.size();
        }

        log::trace!(
            "Built vertex layout with {} attributes ({} null), stride {stride}",
            attributes.len(),
            descriptors.len() - attributes.len()
        );

        Ok(Self {
            descriptors,
            attributes,
            stride,
        })
    }

    /// Size of one vertex record in bytes.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn descriptors(&self) -> &[AttributeDescriptor] {
        &self.descriptors
    }

    /// Non-null attributes, in layout order.
    pub fn attributes(&self) -> &[LayoutAttribute] {
        &self.attributes
    }

    /// Byte offset of the descriptor at `descriptor_index`. `None` for null
    /// descriptors and out of range indices.
    pub fn offset_of(&self, descriptor_index: usize) -> Option<u32> {
        self.attributes
            .iter()
            .find_map(|attr| (attr.descriptor_index == descriptor_index).then_some(attr.offset))
    }

    /// First attribute with the given role.
    pub fn find(&self, role: VertexRole) -> Option<&LayoutAttribute> {
        self.attributes.iter().find(|attr| attr.role == role)
    }

    /// Describes this layout for a wgpu vertex buffer.
    pub fn buffer_layout(&self) -> Result<BufferLayoutDescriptor, PackError> {
        let attributes = self
            .attributes
            .iter()
            .map(|attr| {
                let format = attr.format.vertex_format().ok_or(PackError::NoGpuVertexFormat {
                    index: attr.descriptor_index,
                    role: attr.role,
                    format: attr.format,
                })?;
                Ok(wgt::VertexAttribute {
                    format,
                    offset: attr.offset as wgt::BufferAddress,
                    shader_location: attr.shader_location,
                })
            })
            .collect::<Result<Vec<_>, PackError>>()?;

        Ok(BufferLayoutDescriptor {
            array_stride: self.stride as wgt::BufferAddress,
            step_mode: wgt::VertexStepMode::Vertex,
            attributes,
        })
    }
}

/// Owned equivalent of `wgpu::VertexBufferLayout`.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferLayoutDescriptor {
    pub array_stride: wgt::BufferAddress,
    pub step_mode: wgt::VertexStepMode,
    pub attributes: Vec<wgt::VertexAttribute>,
}

#[cfg(test)]
mod tests {
    use meshpack_types::{wgt, AttributeDescriptor, AttributeFormat, VertexRole};

    use super::VertexLayout;
    use crate::PackError;

    #[test]
    fn position_and_half_normal() {
        let layout = VertexLayout::build([
            (VertexRole::Position, AttributeFormat::Float3),
            (VertexRole::Normal, AttributeFormat::Half4),
        ])
        .unwrap();

        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.offset_of(0), Some(0));
        assert_eq!(layout.offset_of(1), Some(12));
        assert_eq!(layout.find(VertexRole::Normal).unwrap().shader_location, 1);
    }

    #[test]
    fn null_descriptor_takes_no_space() {
        let layout = VertexLayout::build([
            AttributeDescriptor::null(VertexRole::Color),
            AttributeDescriptor::new(VertexRole::Position, AttributeFormat::Float3),
        ])
        .unwrap();

        assert_eq!(layout.stride(), 12);
        assert_eq!(layout.descriptors().len(), 2);
        assert_eq!(layout.attributes().len(), 1);
        assert_eq!(layout.offset_of(0), None);
        assert_eq!(layout.offset_of(1), Some(0));
        assert_eq!(layout.attributes()[0].shader_location, 0);
    }

    #[test]
    fn duplicate_roles_get_separate_slots() {
        let layout = VertexLayout::build([
            (VertexRole::Color, AttributeFormat::Float3),
            (VertexRole::Color, AttributeFormat::Half4),
        ])
        .unwrap();

        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.offset_of(1), Some(12));
        assert_eq!(layout.attributes()[1].shader_location, 1);
    }

    #[test]
    fn empty_layout() {
        let layout = VertexLayout::build(Vec::<AttributeDescriptor>::new()).unwrap();
        assert_eq!(layout.stride(), 0);
        assert!(layout.attributes().is_empty());
    }

    #[test]
    fn matrices_are_instance_only() {
        let err = VertexLayout::build([
            (VertexRole::Position, AttributeFormat::Float3),
            (VertexRole::Tangent, AttributeFormat::Mat4x4),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            PackError::InstanceOnlyFormat {
                index: 1,
                role: VertexRole::Tangent,
                format: AttributeFormat::Mat4x4,
            }
        );
    }

    #[test]
    fn wgpu_buffer_layout() {
        let layout = VertexLayout::build([
            AttributeDescriptor::new(VertexRole::Position, AttributeFormat::Float3),
            AttributeDescriptor::null(VertexRole::Tangent),
            AttributeDescriptor::new(VertexRole::Normal, AttributeFormat::Half4),
        ])
        .unwrap();
        let buffer = layout.buffer_layout().unwrap();

        assert_eq!(buffer.array_stride, 20);
        assert_eq!(buffer.step_mode, wgt::VertexStepMode::Vertex);
        assert_eq!(
            buffer.attributes,
            vec![
                wgt::VertexAttribute {
                    format: wgt::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgt::VertexAttribute {
                    format: wgt::VertexFormat::Float16x4,
                    offset: 12,
                    shader_location: 1,
                },
            ]
        );
    }

    #[test]
    fn wgpu_has_no_single_byte_attribute() {
        let layout = VertexLayout::build([(VertexRole::Color, AttributeFormat::Uint8)]).unwrap();
        assert_eq!(
            layout.buffer_layout().unwrap_err(),
            PackError::NoGpuVertexFormat {
                index: 0,
                role: VertexRole::Color,
                format: AttributeFormat::Uint8,
            }
        );
    }
}
