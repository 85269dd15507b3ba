//! Convex hull construction into a [`PolygonMesh`].

use std::collections::HashMap;

use super::PolygonMesh;
use crate::epa::{ExpandingPolytope, Triangle, TriangleArena};
use crate::error::{KernelError, KernelResult};
use crate::math::{normalized_volume, points_coincide, Aabb, Vec3};
use config::constants::{hull_triangle_budget, MIN_SEED_VOLUME};
use config::KernelConfig;

impl PolygonMesh {
    /// Replaces the mesh with the convex hull of `points`, one triangular
    /// face per hull triangle.
    ///
    /// Uses the default [`KernelConfig`]. See
    /// [`generate_convex_hull_with`](Self::generate_convex_hull_with).
    pub fn generate_convex_hull(&mut self, points: &[Vec3]) -> KernelResult<()> {
        self.generate_convex_hull_with(points, &KernelConfig::default())
    }

    /// Replaces the mesh with the convex hull of `points`.
    ///
    /// The first index quadruple `(i, j, k, l)` spanning a volume seeds an
    /// [`ExpandingPolytope`], which then absorbs every other point. Only
    /// points that end up on the hull are kept, in order of first use.
    ///
    /// # Errors
    ///
    /// [`KernelError::DegenerateGeometry`] when the points are fewer than
    /// four or span no volume; the mesh is left untouched.
    pub fn generate_convex_hull_with(
        &mut self,
        points: &[Vec3],
        config: &KernelConfig,
    ) -> KernelResult<()> {
        if points.len() < 4 {
            return Err(KernelError::degenerate(format!(
                "convex hull needs 4 points, got {}",
                points.len()
            )));
        }

        let seed = find_seed(points, config.epsilon).ok_or_else(|| {
            KernelError::degenerate(format!(
                "no seed tetrahedron among {} points (coplanar or collinear)",
                points.len()
            ))
        })?;
        log::debug!("convex hull seed {seed:?} among {} points", points.len());

        let mut arena = TriangleArena::with_capacity(hull_triangle_budget(points.len()));
        let tetrahedron = seed.map(|i| points[i]);
        let mut polytope = ExpandingPolytope::seed(tetrahedron, &mut arena)?
            .with_plane_thickness(config.plane_thickness);

        let remaining = points
            .iter()
            .enumerate()
            .filter(|(i, _)| !seed.contains(i))
            .map(|(_, p)| *p);
        polytope.expand(remaining, &mut arena)?;

        let (vertices, triangles) = polytope.release(&mut arena)?;
        *self = compact(&vertices, &triangles)?;
        Ok(())
    }
}

/// First index quadruple whose tetrahedron has volume.
///
/// Every test is relative: coincidence is measured against the extent of the
/// cloud, collinearity against the sine of the angle between the two edges
/// and volume through [`normalized_volume`]. A tiny cube seeds as readily as
/// a unit one.
///
/// Worst case O(n^4) for nearly degenerate clouds; coincident pairs and
/// collinear triples are skipped before the innermost loop.
fn find_seed(points: &[Vec3], epsilon: f64) -> Option<[usize; 4]> {
    let extent = Aabb::from_points(points.iter().copied())
        .map(|aabb| aabb.max.distance(aabb.min))
        .unwrap_or(0.0);
    let coincidence = epsilon * extent;

    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if points_coincide(points[i], points[j], coincidence) {
                continue;
            }
            for k in (j + 1)..n {
                let ab = points[j] - points[i];
                let ac = points[k] - points[i];
                if ab.cross(ac).length() <= epsilon * ab.length() * ac.length() {
                    continue;
                }
                for l in (k + 1)..n {
                    let volume = normalized_volume(points[i], points[j], points[k], points[l]);
                    if volume.abs() > MIN_SEED_VOLUME {
                        return Some([i, j, k, l]);
                    }
                }
            }
        }
    }
    log::trace!("seed search exhausted {n} points");
    None
}

/// Mesh holding only the referenced vertices, numbered by first use.
fn compact(vertices: &[Vec3], triangles: &[Triangle]) -> KernelResult<PolygonMesh> {
    let mut mesh = PolygonMesh::new();
    let mut remap: HashMap<usize, usize> = HashMap::new();
    for triangle in triangles {
        let mut indices = Vec::with_capacity(3);
        for &old in &triangle.vertex {
            let position = vertices
                .get(old)
                .copied()
                .ok_or(KernelError::IndexOutOfRange {
                    index: old as i64,
                    count: vertices.len(),
                })?;
            let new = *remap.entry(old).or_insert_with(|| mesh.add_vertex(position));
            indices.push(new);
        }
        mesh.add_polygon(indices)?;
    }
    Ok(mesh)
}
