use anyhow::{Context, Result};
use glam::Vec3;
use meshpack::{
    types::{AttributeFormat, MeshData, MeshDataBuilder, VertexRole},
    VertexLayout,
};

/// `Position: Float3` followed by `Normal: Half4`, the layout the demos use.
pub fn position_half_normal_layout() -> Result<VertexLayout> {
    VertexLayout::build([
        (VertexRole::Position, AttributeFormat::Float3),
        (VertexRole::Normal, AttributeFormat::Half4),
    ])
    .context("Failed to build position/normal layout")
}

/// A `width` by `height` grid of vertices on the Z = 0 plane, facing +Z,
/// triangulated into quads.
pub fn grid(width: u32, height: u32) -> Result<MeshData> {
    let mut positions = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            positions.push(Vec3::new(x as f32, y as f32, 0.0));
        }
    }

    let mut indices = Vec::new();
    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let p0 = y * width + x;
            let p1 = p0 + 1;
            let p2 = p0 + width;
            let p3 = p2 + 1;
            indices.extend_from_slice(&[p0, p1, p2, p2, p1, p3]);
        }
    }

    let vertex_count = positions.len();
    MeshDataBuilder::new(positions)
        .with_normals(vec![Vec3::Z; vertex_count])
        .with_indices(indices)
        .build()
        .context("Failed to build grid mesh")
}
