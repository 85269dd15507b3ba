//! Face simplification, triangulation and edge-count reduction.

use super::PolygonMesh;
use crate::error::KernelResult;
use crate::graph::Graph;
use crate::polygon::Polygon;

impl PolygonMesh {
    /// Merges coplanar adjacent faces.
    ///
    /// Faces go through [`Polygon::compress`] (optionally tessellated back
    /// into convex pieces) and are re-pooled with vertices shared within
    /// `epsilon`. The mesh is only replaced when compression succeeds.
    pub fn simplify_faces(&mut self, must_be_convex: bool, epsilon: f64) -> KernelResult<()> {
        let before = self.polygons.len();
        let merged = Polygon::compress(self.to_standalone_polygons(), must_be_convex, true, epsilon)?;
        *self = PolygonMesh::from_standalone_polygons(&merged, epsilon);
        log::debug!("simplified {before} faces into {}", self.polygons.len());
        Ok(())
    }

    /// Splits every face into triangles in place.
    pub fn tessellate_faces(&mut self) -> KernelResult<()> {
        let mut triangles = Vec::new();
        for polygon in self.to_standalone_polygons() {
            polygon.tessellate_until_triangular(&mut triangles)?;
        }

        let mut mesh = PolygonMesh {
            vertices: self.vertices.clone(),
            polygons: Vec::with_capacity(triangles.len()),
        };
        for triangle in &triangles {
            // Pieces reuse the exact input positions
            mesh.add_standalone_polygon(triangle, 0.0);
        }
        *self = mesh;
        Ok(())
    }

    /// Collapses up to `edges` of the shortest edges, rebuilding the mesh.
    ///
    /// Returns how many edges were actually collapsed.
    pub fn reduce_edge_count(&mut self, edges: usize) -> KernelResult<usize> {
        let mut graph = Graph::from_mesh(self);
        let collapsed = graph.collapse_edges(edges);
        *self = graph.to_mesh()?;
        log::debug!("collapsed {collapsed} of {edges} requested edges");
        Ok(collapsed)
    }

    /// Mesh built from standalone polygons, sharing vertices within
    /// `epsilon`. Polygons that collapse below three corners are skipped.
    pub fn from_standalone_polygons(polygons: &[Polygon], epsilon: f64) -> PolygonMesh {
        let mut mesh = PolygonMesh::new();
        for polygon in polygons {
            if mesh.add_standalone_polygon(polygon, epsilon).is_none() {
                log::debug!("skipped polygon collapsing below 3 corners");
            }
        }
        mesh
    }
}
