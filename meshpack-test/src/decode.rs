use anyhow::{ensure, Context, Result};
use half::f16;
use meshpack::{types::VertexRole, PackedVertexBuffer};

pub fn read_f32s(bytes: &[u8]) -> Result<Vec<f32>> {
    ensure!(bytes.len() % 4 == 0, "{} bytes is not a whole number of f32s", bytes.len());
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Reads binary16 values, widened to f32.
pub fn read_f16s(bytes: &[u8]) -> Result<Vec<f32>> {
    ensure!(bytes.len() % 2 == 0, "{} bytes is not a whole number of f16s", bytes.len());
    Ok(bytes
        .chunks_exact(2)
        .map(|b| f16::from_le_bytes([b[0], b[1]]).to_f32())
        .collect())
}

pub fn read_u16s(bytes: &[u8]) -> Result<Vec<u16>> {
    ensure!(bytes.len() % 2 == 0, "{} bytes is not a whole number of u16s", bytes.len());
    Ok(bytes.chunks_exact(2).map(|b| u16::from_le_bytes([b[0], b[1]])).collect())
}

pub fn read_u32s(bytes: &[u8]) -> Result<Vec<u32>> {
    ensure!(bytes.len() % 4 == 0, "{} bytes is not a whole number of u32s", bytes.len());
    Ok(bytes
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// The bytes of the first `role` attribute of vertex `vertex`.
pub fn attribute_bytes(buffer: &PackedVertexBuffer, vertex: usize, role: VertexRole) -> Result<&[u8]> {
    let attribute = buffer
        .layout()
        .find(role)
        .with_context(|| format!("layout has no {role} attribute"))?;
    let record = buffer
        .vertex(vertex)
        .with_context(|| format!("buffer has no vertex {vertex}"))?;

    let start = attribute.offset as usize;
    Ok(&record[start..start + attribute.format.size() as usize])
}
