//! # Expanding Polytope
//!
//! Incremental 3D convex hull. A non-degenerate seed tetrahedron is grown one
//! point at a time: every hull triangle that sees the new point is replaced
//! by a cone of triangles joining the point to that triangle's edges.
//!
//! ## Algorithm Steps
//!
//! For each point `p`:
//! 1. Collect the live triangles whose plane has `p` strictly in front
//! 2. Skip `p` when nothing is visible (it is inside or on the hull)
//! 3. Append `p` to the vertex array
//! 4. For each visible triangle emit its reverse plus the three cone
//!    triangles `(p, e0, e1)`, `(p, e1, e2)`, `(p, e2, e0)`
//! 5. Weld: an emitted triangle whose reverse is live cancels it and both
//!    disappear; otherwise it becomes live
//!
//! Cancellation removes the visible faces (via their reverses) and the
//! internal walls shared by neighbouring cones, leaving a closed hull.

mod arena;

#[cfg(test)]
mod tests;

pub use arena::{Handle, ObjectHeap};

use crate::error::{KernelError, KernelResult};
use crate::math::{normalized_volume, tetrahedron_determinant, Plane, Vec3};
use config::constants::{MIN_SEED_VOLUME, PLANE_THICKNESS};

/// Arena holding the hull triangles while a polytope is being expanded.
pub type TriangleArena = ObjectHeap<Triangle>;

// =============================================================================
// TRIANGLE
// =============================================================================

/// A hull face as three indices into the polytope's vertex array, wound
/// counter-clockwise when seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Vertex indices.
    pub vertex: [usize; 3],
}

impl Triangle {
    /// Creates a triangle from three vertex indices.
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { vertex: [a, b, c] }
    }

    /// The same face with opposite winding.
    pub fn reversed(&self) -> Triangle {
        Triangle::new(self.vertex[0], self.vertex[2], self.vertex[1])
    }

    /// True when `other` lists the same vertices in the same cyclic order.
    pub fn same_cycle(&self, other: &Triangle) -> bool {
        let [a, b, c] = self.vertex;
        let rotations = [[a, b, c], [b, c, a], [c, a, b]];
        rotations.contains(&other.vertex)
    }

    /// True when `other` is this triangle with reversed winding.
    pub fn cancels(&self, other: &Triangle) -> bool {
        self.reversed().same_cycle(other)
    }

    /// Supporting plane; `None` for a collinear triangle.
    pub fn plane(&self, vertices: &[Vec3]) -> Option<Plane> {
        let [a, b, c] = self.vertex.map(|i| vertices[i]);
        Plane::from_points(a, b, c)
    }

    /// The three directed edges `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertex;
        [(a, b), (b, c), (c, a)]
    }
}

// =============================================================================
// EXPANDING POLYTOPE
// =============================================================================

/// Convex polytope under incremental construction.
///
/// # Example
///
/// ```rust
/// use geometry_kernel::epa::{ExpandingPolytope, TriangleArena};
/// use geometry_kernel::Vec3;
///
/// let mut arena = TriangleArena::with_capacity(64);
/// let seed = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
/// let mut polytope = ExpandingPolytope::seed(seed, &mut arena).unwrap();
///
/// let accepted = polytope
///     .expand([Vec3::splat(2.0), Vec3::splat(0.1)], &mut arena)
///     .unwrap();
/// assert_eq!(accepted, 1);
/// assert_eq!(polytope.vertices().len(), 5);
/// ```
#[derive(Debug)]
pub struct ExpandingPolytope {
    vertices: Vec<Vec3>,
    triangles: Vec<Handle>,
    plane_thickness: f64,
}

impl ExpandingPolytope {
    /// Seeds a polytope from a tetrahedron, orienting every face outward.
    ///
    /// Fails with [`KernelError::DegenerateGeometry`] when the four points
    /// enclose no volume, judged by [`normalized_volume`] so the scale of the
    /// tetrahedron does not matter.
    pub fn seed(tetrahedron: [Vec3; 4], arena: &mut TriangleArena) -> KernelResult<Self> {
        let [a, b, c, d] = tetrahedron;
        if normalized_volume(a, b, c, d).abs() <= MIN_SEED_VOLUME {
            return Err(KernelError::degenerate(
                "Seed tetrahedron has zero volume",
            ));
        }

        let faces = if tetrahedron_determinant(a, b, c, d) > 0.0 {
            // d lies in front of (a, b, c), so that face must be flipped
            [
                Triangle::new(0, 2, 1),
                Triangle::new(0, 1, 3),
                Triangle::new(1, 2, 3),
                Triangle::new(0, 3, 2),
            ]
        } else {
            [
                Triangle::new(0, 1, 2),
                Triangle::new(0, 3, 1),
                Triangle::new(1, 3, 2),
                Triangle::new(0, 2, 3),
            ]
        };

        let mut triangles = Vec::with_capacity(faces.len());
        for face in faces {
            triangles.push(arena.allocate(face)?);
        }

        Ok(Self {
            vertices: tetrahedron.to_vec(),
            triangles,
            plane_thickness: PLANE_THICKNESS,
        })
    }

    /// Overrides the plane thickness used for visibility tests.
    pub fn with_plane_thickness(mut self, plane_thickness: f64) -> Self {
        self.plane_thickness = plane_thickness;
        self
    }

    /// Hull vertices found so far, seed first, then accepted points in order.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Number of live hull triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Copies of the live hull triangles.
    pub fn triangles(&self, arena: &TriangleArena) -> Vec<Triangle> {
        self.triangles
            .iter()
            .filter_map(|handle| arena.get(*handle).copied())
            .collect()
    }

    /// Absorbs every point of `points` in order.
    ///
    /// Returns how many points expanded the hull. Arena exhaustion aborts
    /// the expansion with [`KernelError::ArenaExhausted`].
    pub fn expand<I>(&mut self, points: I, arena: &mut TriangleArena) -> KernelResult<usize>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut accepted = 0;
        for point in points {
            if self.absorb(point, arena)? {
                accepted += 1;
            }
        }
        log::debug!(
            "expanding polytope: accepted {accepted} points, {} vertices, {} triangles",
            self.vertices.len(),
            self.triangles.len()
        );
        Ok(accepted)
    }

    /// Frees every live triangle and returns the hull as plain data.
    pub fn release(self, arena: &mut TriangleArena) -> KernelResult<(Vec<Vec3>, Vec<Triangle>)> {
        let mut triangles = Vec::with_capacity(self.triangles.len());
        for handle in self.triangles {
            triangles.push(arena.deallocate(handle)?);
        }
        Ok((self.vertices, triangles))
    }

    fn absorb(&mut self, point: Vec3, arena: &mut TriangleArena) -> KernelResult<bool> {
        let mut visible = Vec::new();
        for handle in &self.triangles {
            let triangle = live(arena, *handle)?;
            let in_front = triangle
                .plane(&self.vertices)
                .is_some_and(|plane| plane.is_in_front(point, self.plane_thickness));
            if in_front {
                visible.push(triangle);
            }
        }

        if visible.is_empty() {
            return Ok(false);
        }

        let apex = self.vertices.len();
        self.vertices.push(point);

        let mut generated = Vec::with_capacity(visible.len() * 4);
        for triangle in &visible {
            generated.push(triangle.reversed());
            for (from, to) in triangle.edges() {
                generated.push(Triangle::new(apex, from, to));
            }
        }

        for triangle in generated {
            self.weld(triangle, arena)?;
        }

        log::trace!(
            "absorbed point {point:?}: {} visible faces, {} live triangles",
            visible.len(),
            self.triangles.len()
        );
        Ok(true)
    }

    /// Removes the live triangle cancelled by `triangle`, or adds `triangle`.
    fn weld(&mut self, triangle: Triangle, arena: &mut TriangleArena) -> KernelResult<()> {
        let partner = self
            .triangles
            .iter()
            .position(|handle| arena.get(*handle).is_some_and(|live| triangle.cancels(live)));

        match partner {
            Some(position) => {
                let handle = self.triangles.swap_remove(position);
                arena.deallocate(handle)?;
            }
            None => {
                let handle = arena.allocate(triangle)?;
                self.triangles.push(handle);
            }
        }
        Ok(())
    }
}

fn live(arena: &TriangleArena, handle: Handle) -> KernelResult<Triangle> {
    arena.get(handle).copied().ok_or(KernelError::InvalidHandle {
        index: handle.index(),
        generation: handle.generation(),
    })
}
