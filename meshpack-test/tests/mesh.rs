use anyhow::{Context, Result};
use glam::Vec3;
use meshpack::{
    types::{AttributeFormat, IndexFormat, MeshData, MeshDataBuilder, VertexRole},
    MeshPackBuilder, PackError, VertexLayout,
};
use meshpack_test::{attribute_bytes, init_logger, read_f16s, read_f32s};

#[test]
pub fn rotating_cube() -> Result<()> {
    init_logger();

    let cube = MeshData::cylindrical_normal_cube();
    let mesh = MeshPackBuilder::new(meshpack_test::position_half_normal_layout()?)
        .label("cube")
        .build(&cube)
        .context("Failed to pack cube")?;

    assert_eq!(mesh.vertices.stride(), 20);
    assert_eq!(mesh.vertices.data().len(), 160);
    assert_eq!(mesh.indices.format(), IndexFormat::Uint8);
    assert_eq!(mesh.indices.data(), &cube.indices.iter().map(|&i| i as u8).collect::<Vec<_>>()[..]);

    let normal = read_f16s(attribute_bytes(&mesh.vertices, 7, VertexRole::Normal)?)?;
    let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
    assert!((normal[0] - expected.x).abs() < 1e-3);
    assert!((normal[1] - expected.y).abs() < 1e-3);
    assert_eq!(&normal[2..], &[0.0, 0.0]);
    Ok(())
}

#[test]
pub fn colored_quad() -> Result<()> {
    let plane = MeshData::plane_z();
    let colors = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];
    let quad = MeshDataBuilder::new(plane.positions)
        .with_normals(plane.normals)
        .with_colors(colors.clone())
        .with_indices(plane.indices)
        .build()?;

    let layout = VertexLayout::build([
        (VertexRole::Position, AttributeFormat::Float3),
        (VertexRole::Color, AttributeFormat::Float3),
    ])?;
    let mesh = MeshPackBuilder::new(layout)
        .index_format(IndexFormat::Uint16)
        .build(&quad)?;

    assert_eq!(mesh.vertices.stride(), 24);
    for (vertex, color) in colors.iter().enumerate() {
        let packed = read_f32s(attribute_bytes(&mesh.vertices, vertex, VertexRole::Color)?)?;
        assert_eq!(packed, color.to_array().to_vec());
    }
    assert_eq!(mesh.indices.wgt_format(), Some(meshpack::types::wgt::IndexFormat::Uint16));
    Ok(())
}

#[test]
pub fn large_grid_picks_u16() -> Result<()> {
    let grid = meshpack_test::grid(20, 15)?;
    let mesh = MeshPackBuilder::new(meshpack_test::position_half_normal_layout()?).build(&grid)?;

    assert_eq!(mesh.indices.format(), IndexFormat::Uint16);
    assert_eq!(mesh.index_count(), grid.index_count());
    Ok(())
}

#[test]
pub fn forced_narrow_format_fails() -> Result<()> {
    let grid = meshpack_test::grid(20, 15)?;
    let err = MeshPackBuilder::new(meshpack_test::position_half_normal_layout()?)
        .index_format(IndexFormat::Uint8)
        .build(&grid)
        .unwrap_err();

    assert!(matches!(err, PackError::IndexFormatTooNarrow { vertex_count: 300, .. }));
    Ok(())
}
