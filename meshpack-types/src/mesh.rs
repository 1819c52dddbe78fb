use glam::Vec3;
use thiserror::Error;

use crate::VertexRole;

/// The maximum amount of vertices any one mesh can have.
pub const MAX_VERTEX_COUNT: u64 = u32::MAX as u64;
/// The maximum amount of indices any one mesh can have.
pub const MAX_INDEX_COUNT: u64 = u32::MAX as u64;

/// Error returned from mesh validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshValidationError {
    #[error("Mesh's {role} buffer has {actual} vertices but the position buffer has {expected}")]
    MismatchedVertexCount {
        role: VertexRole,
        expected: usize,
        actual: usize,
    },
    #[error("Mesh has {count} vertices when the vertex limit is {MAX_VERTEX_COUNT}")]
    ExceededMaxVertexCount { count: usize },
    #[error("Mesh has {count} indices when maximum index count is {MAX_INDEX_COUNT}")]
    ExceededMaxIndexCount { count: usize },
    #[error("Mesh has {count} indices which is not a multiple of three. Meshes are always composed of triangles")]
    IndexCountNotMultipleOfThree { count: usize },
    #[error(
        "Index at position {index} has the value {value} which is out of bounds for vertex buffers of {max} length"
    )]
    IndexOutOfBounds { index: usize, value: u32, max: usize },
}

/// Builder for [`MeshData`] that fills in whatever wasn't provided.
#[derive(Debug, Default)]
pub struct MeshDataBuilder {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    tangents: Option<Vec<Vec3>>,
    bitangents: Option<Vec<Vec3>>,
    colors: Option<Vec<Vec3>>,
    indices: Option<Vec<u32>>,
    without_validation: bool,
}

impl MeshDataBuilder {
    /// Create a new [`MeshDataBuilder`] with a given set of positions.
    ///
    /// All vertices must have positions.
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_tangents(mut self, tangents: Vec<Vec3>) -> Self {
        self.tangents = Some(tangents);
        self
    }

    pub fn with_bitangents(mut self, bitangents: Vec<Vec3>) -> Self {
        self.bitangents = Some(bitangents);
        self
    }

    pub fn with_colors(mut self, colors: Vec<Vec3>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Triangle list indices. Defaults to `0..vertex_count`.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Skips [`MeshData::validate`] in [`MeshDataBuilder::build`].
    ///
    /// The packers still check everything they rely on, so an invalid mesh
    /// built this way fails at pack time instead.
    pub fn without_validation(mut self) -> Self {
        self.without_validation = true;
        self
    }

    /// Build the mesh. Normals that weren't provided are zero filled.
    pub fn build(self) -> Result<MeshData, MeshValidationError> {
        let vertex_count = self.positions.len();
        let mesh = MeshData {
            normals: self.normals.unwrap_or_else(|| vec![Vec3::ZERO; vertex_count]),
            tangents: self.tangents,
            bitangents: self.bitangents,
            colors: self.colors,
            indices: self
                .indices
                .unwrap_or_else(|| (0..vertex_count as u32).collect()),
            positions: self.positions,
        };

        if !self.without_validation {
            mesh.validate()?;
        }

        Ok(mesh)
    }
}

/// CPU side geometry of a mesh in Structure of Array form.
///
/// Every present attribute array has one entry per position.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Option<Vec<Vec3>>,
    pub bitangents: Option<Vec<Vec3>>,
    pub colors: Option<Vec<Vec3>>,

    pub indices: Vec<u32>,
}

impl MeshData {
    /// A two triangle quad covering [-1, 1] on the Z = 0 plane, facing +Z.
    pub fn plane_z() -> Self {
        Self {
            positions: vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            tangents: None,
            bitangents: None,
            colors: None,
            indices: vec![0, 1, 2, 2, 1, 3],
        }
    }

    /// An eight vertex cube spanning [-1, 1] whose normals point away from
    /// the Z axis, so it shades like a cylinder.
    ///
    /// Corner `i` sits at +1 on x, y or z when bit 2, 1 or 0 of `i` is set.
    pub fn cylindrical_normal_cube() -> Self {
        let sign = |set: bool| if set { 1.0 } else { -1.0 };

        let positions: Vec<Vec3> = (0..8)
            .map(|i| Vec3::new(sign(i & 4 != 0), sign(i & 2 != 0), sign(i & 1 != 0)))
            .collect();
        let normals = positions
            .iter()
            .map(|p| Vec3::new(p.x, p.y, 0.0).normalize_or_zero())
            .collect();

        let mut indices = Vec::with_capacity(36);
        let mut quad = |p0: u32, p1: u32, p2: u32, p3: u32| indices.extend_from_slice(&[p0, p1, p2, p2, p1, p3]);
        quad(0, 1, 4, 5);
        quad(1, 3, 5, 7);
        quad(3, 2, 7, 6);
        quad(2, 0, 6, 4);
        // top and bottom
        quad(4, 5, 6, 7);
        quad(0, 1, 2, 3);

        Self {
            positions,
            normals,
            tangents: None,
            bitangents: None,
            colors: None,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// The array holding `role`, if the mesh has one.
    pub fn attribute(&self, role: VertexRole) -> Option<&[Vec3]> {
        match role {
            VertexRole::Position => Some(&self.positions),
            VertexRole::Normal => Some(&self.normals),
            VertexRole::Tangent => self.tangents.as_deref(),
            VertexRole::Bitangent => self.bitangents.as_deref(),
            VertexRole::Color => self.colors.as_deref(),
        }
    }

    /// Every attribute this mesh has, positions first.
    pub fn attributes(&self) -> impl Iterator<Item = (VertexRole, &[Vec3])> + '_ {
        VertexRole::ALL
            .into_iter()
            .filter_map(move |role| self.attribute(role).map(|data| (role, data)))
    }

    /// Validates that all vertex attributes have the same length and that
    /// the indices form in-bounds triangles.
    pub fn validate(&self) -> Result<(), MeshValidationError> {
        let position_length = self.positions.len();
        let indices_length = self.indices.len();

        if position_length as u64 > MAX_VERTEX_COUNT {
            return Err(MeshValidationError::ExceededMaxVertexCount { count: position_length });
        }

        for (role, data) in self.attributes() {
            if data.len() != position_length {
                return Err(MeshValidationError::MismatchedVertexCount {
                    role,
                    expected: position_length,
                    actual: data.len(),
                });
            }
        }

        if indices_length % 3 != 0 {
            return Err(MeshValidationError::IndexCountNotMultipleOfThree { count: indices_length });
        }

        if indices_length as u64 > MAX_INDEX_COUNT {
            return Err(MeshValidationError::ExceededMaxIndexCount { count: indices_length });
        }

        for (index, &value) in self.indices.iter().enumerate() {
            if value as usize >= position_length {
                return Err(MeshValidationError::IndexOutOfBounds {
                    index,
                    value,
                    max: position_length,
                });
            }
        }

        Ok(())
    }
}
