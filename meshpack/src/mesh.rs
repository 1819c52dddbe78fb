use meshpack_types::{IndexFormat, MeshData};

use crate::{
    pack_indices, pack_vertices, PackError, PackedIndexBuffer, PackedVertexBuffer, SourceVertexArrays, VertexLayout,
};

/// Packs a whole [`MeshData`] against a vertex layout and an index width.
#[derive(Debug, Clone)]
pub struct MeshPackBuilder {
    layout: VertexLayout,
    index_format: Option<IndexFormat>,
    label: Option<String>,
    without_validation: bool,
}

impl MeshPackBuilder {
    pub fn new(layout: VertexLayout) -> Self {
        Self {
            layout,
            index_format: None,
            label: None,
            without_validation: false,
        }
    }

    /// Index width to pack with. Defaults to the smallest width that can
    /// address every vertex of the mesh.
    pub fn index_format(mut self, format: IndexFormat) -> Self {
        self.index_format = Some(format);
        self
    }

    /// Debug label carried over to the [`PackedMesh`].
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Skips [`MeshData::validate`] before packing.
    ///
    /// Vertex counts and index widths are still checked by the packers, but
    /// out of bounds index values are passed through.
    pub fn without_validation(mut self) -> Self {
        self.without_validation = true;
        self
    }

    pub fn build(&self, mesh: &MeshData) -> Result<PackedMesh, PackError> {
        profiling::scope!("MeshPackBuilder::build");

        if !self.without_validation {
            mesh.validate()?;
        }

        let vertex_count = mesh.vertex_count();
        let index_format = self
            .index_format
            .unwrap_or_else(|| IndexFormat::smallest_for(vertex_count as u64));

        let vertices = pack_vertices(&self.layout, &SourceVertexArrays::from(mesh), vertex_count)?;
        let indices = pack_indices(&mesh.indices, index_format, vertex_count)?;

        log::debug!(
            "Packed mesh {:?}: {vertex_count} vertices ({} bytes), {} {index_format:?} indices ({} bytes)",
            self.label.as_deref().unwrap_or("<unnamed>"),
            vertices.data().len(),
            indices.count(),
            indices.data().len(),
        );

        Ok(PackedMesh {
            label: self.label.clone(),
            vertices,
            indices,
        })
    }
}

/// Vertex and index buffers of a mesh, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMesh {
    pub label: Option<String>,
    pub vertices: PackedVertexBuffer,
    pub indices: PackedIndexBuffer,
}

impl PackedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.indices.count()
    }
}

#[cfg(test)]
mod tests {
    use meshpack_types::{AttributeFormat, IndexFormat, MeshData, MeshDataBuilder, MeshValidationError, VertexRole};

    use super::MeshPackBuilder;
    use crate::{PackError, VertexLayout};

    fn layout() -> VertexLayout {
        VertexLayout::build([
            (VertexRole::Position, AttributeFormat::Float3),
            (VertexRole::Normal, AttributeFormat::Half4),
        ])
        .unwrap()
    }

    #[test]
    fn cube_defaults_to_u8_indices() {
        let mesh = MeshPackBuilder::new(layout())
            .label("cube")
            .build(&MeshData::cylindrical_normal_cube())
            .unwrap();

        assert_eq!(mesh.label.as_deref(), Some("cube"));
        assert_eq!(mesh.vertices.data().len(), 160);
        assert_eq!(mesh.indices.format(), IndexFormat::Uint8);
        assert_eq!(mesh.indices.data().len(), 36);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.vertex_count(), 8);
    }

    #[test]
    fn explicit_index_format() {
        let mesh = MeshPackBuilder::new(layout())
            .index_format(IndexFormat::Uint16)
            .build(&MeshData::plane_z())
            .unwrap();

        assert_eq!(mesh.indices.data().len(), 12);
    }

    #[test]
    fn validates_first() {
        let mesh = MeshDataBuilder::new(MeshData::plane_z().positions)
            .with_indices(vec![0, 1, 4])
            .without_validation()
            .build()
            .unwrap();

        assert_eq!(
            MeshPackBuilder::new(layout()).build(&mesh).unwrap_err(),
            PackError::InvalidMesh(MeshValidationError::IndexOutOfBounds {
                index: 2,
                value: 4,
                max: 4,
            })
        );
        assert!(MeshPackBuilder::new(layout()).without_validation().build(&mesh).is_ok());
    }

    #[test]
    fn missing_attribute_source() {
        let layout = VertexLayout::build([
            (VertexRole::Position, AttributeFormat::Float3),
            (VertexRole::Tangent, AttributeFormat::Float3),
        ])
        .unwrap();

        assert_eq!(
            MeshPackBuilder::new(layout).build(&MeshData::plane_z()).unwrap_err(),
            PackError::MissingSource {
                role: VertexRole::Tangent
            }
        );
    }
}
