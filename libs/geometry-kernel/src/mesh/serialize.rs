//! JSON and binary encodings of a [`PolygonMesh`].
//!
//! ## JSON
//!
//! ```text
//! { "vertex_array": [{"x": 0.0, "y": 0.0, "z": 0.0}, ...],
//!   "polygon_array": [[0, 1, 2], ...] }
//! ```
//!
//! ## Binary (little-endian)
//!
//! ```text
//! u32 num_vertices, u32 num_polygons
//! num_vertices x (f64 x, f64 y, f64 z)
//! num_polygons x (u32 count, count x i32 index)
//! ```
//!
//! Decoding validates every index against the vertex pool. On any failure
//! the target mesh is left cleared.

use std::io::{Read, Write};

use serde::Deserialize;
use serde_json::{json, Value};

use super::{MeshPolygon, PolygonMesh};
use crate::error::{KernelError, KernelResult};
use crate::math::Vec3;
use config::constants::{MAX_POLYGONS, MAX_VERTICES, MIN_POLYGON_VERTICES};

#[derive(Debug, Deserialize)]
struct VertexRecord {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Deserialize)]
struct MeshRecord {
    vertex_array: Vec<VertexRecord>,
    polygon_array: Vec<Vec<i64>>,
}

/// Converts raw indices, rejecting negatives and indices past `count`.
fn checked_indices(raw: &[i64], count: usize) -> KernelResult<Vec<usize>> {
    if raw.len() < MIN_POLYGON_VERTICES {
        return Err(KernelError::malformed(format!(
            "polygon with {} indices",
            raw.len()
        )));
    }
    raw.iter()
        .map(|&index| match usize::try_from(index) {
            Ok(i) if i < count => Ok(i),
            _ => Err(KernelError::IndexOutOfRange { index, count }),
        })
        .collect()
}

fn to_u32(value: usize, what: &str) -> KernelResult<u32> {
    u32::try_from(value).map_err(|_| KernelError::malformed(format!("{what} {value} exceeds u32")))
}

fn read_u32(reader: &mut impl Read) -> KernelResult<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_i32(reader: &mut impl Read) -> KernelResult<i32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_f64(reader: &mut impl Read) -> KernelResult<f64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(f64::from_le_bytes(bytes))
}

impl PolygonMesh {
    // =========================================================================
    // JSON
    // =========================================================================

    /// Encodes the mesh as a JSON value.
    pub fn to_json(&self) -> Value {
        let vertex_array: Vec<Value> = self
            .vertices
            .iter()
            .map(|v| json!({ "x": v.x, "y": v.y, "z": v.z }))
            .collect();
        let polygon_array: Vec<Value> = self
            .polygons
            .iter()
            .map(|face| json!(face.indices))
            .collect();
        json!({
            "vertex_array": vertex_array,
            "polygon_array": polygon_array,
        })
    }

    /// Encodes the mesh as a JSON string.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Replaces the mesh with one decoded from a JSON value.
    ///
    /// # Errors
    ///
    /// [`KernelError::Json`] for missing fields or wrong types,
    /// [`KernelError::IndexOutOfRange`] for negative or dangling indices,
    /// [`KernelError::MalformedData`] for faces under three corners.
    pub fn from_json(&mut self, value: &Value) -> KernelResult<()> {
        self.clear();
        let record: MeshRecord = serde_json::from_value(value.clone())?;

        let mut mesh = PolygonMesh::new();
        mesh.vertices = record
            .vertex_array
            .iter()
            .map(|v| Vec3::new(v.x, v.y, v.z))
            .collect();
        let count = mesh.vertices.len();
        for raw in &record.polygon_array {
            let indices = checked_indices(raw, count)?;
            mesh.polygons.push(MeshPolygon { indices });
        }

        *self = mesh;
        Ok(())
    }

    /// Replaces the mesh with one decoded from a JSON string.
    pub fn from_json_str(&mut self, text: &str) -> KernelResult<()> {
        self.clear();
        let value: Value = serde_json::from_str(text)?;
        self.from_json(&value)
    }

    // =========================================================================
    // BINARY
    // =========================================================================

    /// Writes the binary encoding to `writer`.
    pub fn dump(&self, writer: &mut impl Write) -> KernelResult<()> {
        writer.write_all(&to_u32(self.vertices.len(), "vertex count")?.to_le_bytes())?;
        writer.write_all(&to_u32(self.polygons.len(), "polygon count")?.to_le_bytes())?;

        for v in &self.vertices {
            writer.write_all(&v.x.to_le_bytes())?;
            writer.write_all(&v.y.to_le_bytes())?;
            writer.write_all(&v.z.to_le_bytes())?;
        }

        for face in &self.polygons {
            writer.write_all(&to_u32(face.indices.len(), "corner count")?.to_le_bytes())?;
            for &index in &face.indices {
                let index = i32::try_from(index).map_err(|_| {
                    KernelError::malformed(format!("vertex index {index} exceeds i32"))
                })?;
                writer.write_all(&index.to_le_bytes())?;
            }
        }
        Ok(())
    }

    /// Replaces the mesh with one read from `reader`.
    ///
    /// # Errors
    ///
    /// [`KernelError::Io`] on a short read, [`KernelError::MalformedData`]
    /// for counts beyond the safety limits or faces under three corners,
    /// [`KernelError::IndexOutOfRange`] for dangling indices.
    pub fn restore(&mut self, reader: &mut impl Read) -> KernelResult<()> {
        self.clear();

        let vertex_count = read_u32(reader)? as usize;
        let polygon_count = read_u32(reader)? as usize;
        if vertex_count > MAX_VERTICES {
            return Err(KernelError::malformed(format!(
                "vertex count {vertex_count} exceeds limit {MAX_VERTICES}"
            )));
        }
        if polygon_count > MAX_POLYGONS {
            return Err(KernelError::malformed(format!(
                "polygon count {polygon_count} exceeds limit {MAX_POLYGONS}"
            )));
        }

        let mut mesh = PolygonMesh::new();
        for _ in 0..vertex_count {
            let x = read_f64(reader)?;
            let y = read_f64(reader)?;
            let z = read_f64(reader)?;
            mesh.vertices.push(Vec3::new(x, y, z));
        }

        for _ in 0..polygon_count {
            let corner_count = read_u32(reader)? as usize;
            if corner_count > MAX_VERTICES {
                return Err(KernelError::malformed(format!(
                    "polygon with {corner_count} corners exceeds limit {MAX_VERTICES}"
                )));
            }
            let mut raw = Vec::new();
            for _ in 0..corner_count {
                raw.push(i64::from(read_i32(reader)?));
            }
            let indices = checked_indices(&raw, vertex_count)?;
            mesh.polygons.push(MeshPolygon { indices });
        }

        *self = mesh;
        Ok(())
    }
}
