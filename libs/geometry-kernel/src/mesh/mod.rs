//! # Polygon Mesh
//!
//! Indexed polygon soup: a shared vertex pool plus faces that are lists of
//! indices into it. Every index is range checked when a face is added or a
//! mesh is decoded, so a `PolygonMesh` never holds a dangling reference.
//!
//! ## Pipeline
//!
//! ```text
//! points ──generate_convex_hull──→ triangle hull
//!        ──simplify_faces──→ merged (optionally convex) coplanar faces
//!        ──reduce_edge_count──→ coarser hull
//! ```
//!
//! The hull, simplification and serialization entry points live in the
//! `hull`, `simplify` and `serialize` submodules.

mod hull;
mod serialize;
mod simplify;


use std::collections::HashSet;

use crate::error::{KernelError, KernelResult};
use crate::math::{points_coincide, Aabb, Ray, Vec3};
use crate::polygon::Polygon;
use config::constants::{approx_zero, EPSILON, MIN_POLYGON_VERTICES};

// =============================================================================
// FACES AND HITS
// =============================================================================

/// One mesh face: an ordered cycle of vertex indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshPolygon {
    indices: Vec<usize>,
}

impl MeshPolygon {
    /// Indices into the owning mesh's vertex pool.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the face has no corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Nearest intersection of a ray with a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray.
    pub alpha: f64,
    /// Face normal, turned to face against the ray.
    pub normal: Vec3,
}

// =============================================================================
// POLYGON MESH
// =============================================================================

/// A polygon mesh with a shared vertex pool.
///
/// # Example
///
/// ```rust
/// use geometry_kernel::{PolygonMesh, Vec3};
///
/// let mut mesh = PolygonMesh::new();
/// let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
/// mesh.add_polygon(vec![a, b, c]).unwrap();
///
/// assert_eq!(mesh.polygon_count(), 1);
/// assert!(mesh.add_polygon(vec![a, b, 7]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMesh {
    vertices: Vec<Vec3>,
    polygons: Vec<MeshPolygon>,
}

impl PolygonMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// The vertex pool.
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// The faces.
    #[inline]
    pub fn polygons(&self) -> &[MeshPolygon] {
        &self.polygons
    }

    /// Number of vertices in the pool.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// True when the mesh has neither vertices nor faces.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.polygons.is_empty()
    }

    /// Removes every vertex and face.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.polygons.clear();
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Vec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Index of a vertex within `epsilon` of `position`, adding one if none.
    pub fn find_or_add_vertex(&mut self, position: Vec3, epsilon: f64) -> usize {
        match self
            .vertices
            .iter()
            .position(|v| points_coincide(*v, position, epsilon))
        {
            Some(index) => index,
            None => self.add_vertex(position),
        }
    }

    /// Adds a face and returns its index.
    ///
    /// # Errors
    ///
    /// [`KernelError::IndexOutOfRange`] for an index past the vertex pool,
    /// [`KernelError::DegenerateGeometry`] for fewer than three corners.
    pub fn add_polygon(&mut self, indices: Vec<usize>) -> KernelResult<usize> {
        if indices.len() < MIN_POLYGON_VERTICES {
            return Err(KernelError::degenerate(format!(
                "face needs {MIN_POLYGON_VERTICES} corners, got {}",
                indices.len()
            )));
        }
        let count = self.vertices.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= count) {
            return Err(KernelError::IndexOutOfRange {
                index: index as i64,
                count,
            });
        }
        self.polygons.push(MeshPolygon { indices });
        Ok(self.polygons.len() - 1)
    }

    /// Adds a standalone polygon, sharing vertices within `epsilon`.
    ///
    /// Corners that collapse onto their neighbour are dropped. Returns the
    /// face index, or `None` when fewer than three distinct corners remain
    /// (vertices already pooled stay in the pool).
    pub fn add_standalone_polygon(&mut self, polygon: &Polygon, epsilon: f64) -> Option<usize> {
        let mut indices: Vec<usize> = Vec::with_capacity(polygon.len());
        for vertex in polygon.vertices() {
            let index = self.find_or_add_vertex(*vertex, epsilon);
            if indices.last() != Some(&index) {
                indices.push(index);
            }
        }
        while indices.len() > 1 && indices.first() == indices.last() {
            indices.pop();
        }
        self.add_polygon(indices).ok()
    }

    /// Face `index` as a standalone polygon.
    pub fn to_standalone_polygon(&self, index: usize) -> Option<Polygon> {
        let face = self.polygons.get(index)?;
        let vertices = face
            .indices
            .iter()
            .map(|&i| self.vertices.get(i).copied())
            .collect::<Option<Vec<_>>>()?;
        Some(Polygon::new(vertices))
    }

    /// Every face as a standalone polygon.
    pub fn to_standalone_polygons(&self) -> Vec<Polygon> {
        (0..self.polygons.len())
            .filter_map(|i| self.to_standalone_polygon(i))
            .collect()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for face in &self.polygons {
            let n = face.indices.len();
            for k in 0..n {
                let a = face.indices[k];
                let b = face.indices[(k + 1) % n];
                if a != b {
                    edges.insert((a.min(b), a.max(b)));
                }
            }
        }
        edges.len()
    }

    /// Box around the vertex pool, `None` when it is empty.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Checks the structural invariants: every face has at least three
    /// corners and every index is inside the vertex pool.
    pub fn validate(&self) -> KernelResult<()> {
        let count = self.vertices.len();
        for face in &self.polygons {
            if face.indices.len() < MIN_POLYGON_VERTICES {
                return Err(KernelError::degenerate(format!(
                    "face with {} corners",
                    face.indices.len()
                )));
            }
            if let Some(&index) = face.indices.iter().find(|&&i| i >= count) {
                return Err(KernelError::IndexOutOfRange {
                    index: index as i64,
                    count,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // MASS PROPERTIES
    // =========================================================================

    /// Signed tetrahedra from the origin to each fan triangle of each face.
    fn fan_tetrahedra(&self) -> impl Iterator<Item = (f64, Vec3)> + '_ {
        self.polygons.iter().flat_map(move |face| {
            let corners = &face.indices;
            (1..corners.len().saturating_sub(1)).map(move |k| {
                let a = self.vertices[corners[0]];
                let b = self.vertices[corners[k]];
                let c = self.vertices[corners[k + 1]];
                (a.dot(b.cross(c)) / 6.0, (a + b + c) / 4.0)
            })
        })
    }

    /// Enclosed volume of a closed, outward-wound mesh.
    pub fn volume(&self) -> f64 {
        self.fan_tetrahedra().map(|(volume, _)| volume).sum()
    }

    /// Centroid of the enclosed solid; the vertex average when the mesh
    /// encloses no volume.
    pub fn center(&self) -> Vec3 {
        let (volume, moment) = self
            .fan_tetrahedra()
            .fold((0.0, Vec3::ZERO), |(v, m), (tv, tc)| (v + tv, m + tc * tv));
        if !approx_zero(volume) {
            return moment / volume;
        }
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        self.vertices.iter().copied().sum::<Vec3>() / self.vertices.len() as f64
    }

    // =========================================================================
    // RAY CAST
    // =========================================================================

    /// Nearest face hit by `ray`.
    ///
    /// The returned normal always opposes the ray direction, whichever way
    /// the face is wound.
    pub fn ray_cast(&self, ray: &Ray) -> Option<RayHit> {
        let bounds = self.bounding_box()?;
        let padded = Aabb::new(bounds.min - Vec3::splat(EPSILON), bounds.max + Vec3::splat(EPSILON));
        ray.cast_against_aabb(&padded)?;

        let mut nearest: Option<RayHit> = None;
        for polygon in self.to_standalone_polygons() {
            let Some(alpha) = polygon.ray_cast(ray, EPSILON) else {
                continue;
            };
            if nearest.is_some_and(|hit| hit.alpha <= alpha) {
                continue;
            }
            let Some(plane) = polygon.calc_plane(false) else {
                continue;
            };
            let normal = if plane.unit_normal.dot(ray.direction) > 0.0 {
                -plane.unit_normal
            } else {
                plane.unit_normal
            };
            nearest = Some(RayHit { alpha, normal });
        }
        nearest
    }
}
