//! # Polygon
//!
//! A single planar polygon stored as an implicitly closed vertex cycle.
//!
//! Winding is not fixed up front: the normal comes from [`Polygon::calc_plane`],
//! which picks the most stable cross product among vertex triples and, when
//! convexity cannot be assumed, orients it by the sign of the total turn.
//!
//! ## Operations
//!
//! - **Analysis**: area, best-fit plane, convexity partition
//! - **Splitting**: chord splits with interior and obstruction checks
//! - **Tessellation**: recursive splitting into convex pieces or triangles
//! - **Merging**: coplanar pair merge with reduction and self-overlap rejection
//! - **Compression**: grouping by plane and merging each group to a fixed point
//! - **Planar hull**: divide-and-conquer convex hull of coplanar points

mod hull;
mod merge;
mod reduce;
mod split;
mod tessellate;


use crate::math::{signed_angle, LineSegment, Plane, Ray, Vec3};
use config::constants::MIN_POLYGON_VERTICES;

// =============================================================================
// CONVEXITY INFO
// =============================================================================

/// Partition of a polygon's vertex indices into convex and concave corners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvexityInfo {
    /// Corners turning with the polygon's winding (or straight).
    pub convex_indices: Vec<usize>,
    /// Reflex corners turning against the winding.
    pub concave_indices: Vec<usize>,
}

// =============================================================================
// POLYGON
// =============================================================================

/// A planar polygon; the last vertex connects back to the first.
///
/// # Example
///
/// ```rust
/// use geometry_kernel::{Polygon, Vec3};
///
/// let square = Polygon::new(vec![
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(1.0, 0.0, 0.0),
///     Vec3::new(1.0, 1.0, 0.0),
///     Vec3::new(0.0, 1.0, 0.0),
/// ]);
/// assert!((square.area() - 1.0).abs() < 1e-12);
/// assert!(square.is_convex(1e-4).0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec3>,
}

impl Polygon {
    /// Creates a polygon from its vertex cycle.
    pub fn new(vertices: Vec<Vec3>) -> Self {
        Self { vertices }
    }

    /// The vertex cycle.
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Consumes the polygon, returning its vertices.
    pub fn into_vertices(self) -> Vec<Vec3> {
        self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True when the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the polygon has enough vertices to enclose an area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= MIN_POLYGON_VERTICES
    }

    /// Index after `i`, wrapping.
    #[inline]
    pub(crate) fn next_index(&self, i: usize) -> usize {
        (i + 1) % self.vertices.len()
    }

    /// Index before `i`, wrapping.
    #[inline]
    pub(crate) fn prev_index(&self, i: usize) -> usize {
        (i + self.vertices.len() - 1) % self.vertices.len()
    }

    /// Edge from vertex `i` to the vertex after it.
    pub fn edge(&self, i: usize) -> LineSegment {
        LineSegment::new(self.vertices[i], self.vertices[self.next_index(i)])
    }

    /// The polygon with its winding reversed.
    pub fn reversed(&self) -> Polygon {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Polygon { vertices }
    }

    /// Average of the vertices.
    pub fn center(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        self.vertices.iter().copied().sum::<Vec3>() / self.vertices.len() as f64
    }

    /// Newell normal: direction follows the winding, length is twice the area.
    pub fn area_vector(&self) -> Vec3 {
        (0..self.vertices.len())
            .map(|i| self.vertices[i].cross(self.vertices[self.next_index(i)]))
            .sum()
    }

    /// Enclosed area of a simple planar polygon.
    pub fn area(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        self.area_vector().length() * 0.5
    }

    /// Best-supported plane through the polygon.
    ///
    /// The candidate normal is the longest cross product over all vertex
    /// triples. Unless `assume_convex` is set, its sign is chosen so the
    /// signed turn angles sum positive. Returns `None` when every triple is
    /// collinear.
    pub fn calc_plane(&self, assume_convex: bool) -> Option<Plane> {
        if !self.is_valid() {
            return None;
        }

        let n = self.vertices.len();
        let mut best = Vec3::ZERO;
        let mut best_length = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let ij = self.vertices[j] - self.vertices[i];
                for k in (j + 1)..n {
                    let cross = ij.cross(self.vertices[k] - self.vertices[i]);
                    let length = cross.length_squared();
                    if length > best_length {
                        best = cross;
                        best_length = length;
                    }
                }
            }
        }

        let mut normal = best.try_normalize()?;
        if !assume_convex {
            let total: f64 = self.turn_angles(normal).iter().sum();
            if total < 0.0 {
                normal = -normal;
            }
        }
        Plane::new(self.center(), normal)
    }

    /// Signed turn angle at every vertex about `normal`.
    ///
    /// Positive turns follow counter-clockwise winding; zero-length edges
    /// contribute no turn.
    pub fn turn_angles(&self, normal: Vec3) -> Vec<f64> {
        (0..self.vertices.len())
            .map(|i| {
                let incoming = self.vertices[i] - self.vertices[self.prev_index(i)];
                let outgoing = self.vertices[self.next_index(i)] - self.vertices[i];
                if incoming.length_squared() == 0.0 || outgoing.length_squared() == 0.0 {
                    0.0
                } else {
                    signed_angle(incoming, outgoing, normal)
                }
            })
            .collect()
    }

    /// Convexity test.
    ///
    /// A corner is concave when it turns against the winding by more than
    /// `tolerance` radians. Degenerate polygons report `false` with an empty
    /// partition.
    pub fn is_convex(&self, tolerance: f64) -> (bool, ConvexityInfo) {
        let Some(plane) = self.calc_plane(false) else {
            return (false, ConvexityInfo::default());
        };

        let mut info = ConvexityInfo::default();
        for (i, turn) in self.turn_angles(plane.unit_normal).into_iter().enumerate() {
            if turn < -tolerance {
                info.concave_indices.push(i);
            } else {
                info.convex_indices.push(i);
            }
        }
        (info.concave_indices.is_empty(), info)
    }

    /// True when `point` lies on the polygon's plane (within `epsilon`) and
    /// inside or on its boundary.
    pub fn contains_point(&self, point: Vec3, epsilon: f64) -> bool {
        let Some(plane) = self.calc_plane(false) else {
            return false;
        };
        if plane.signed_distance(point).abs() > epsilon {
            return false;
        }
        if (0..self.vertices.len()).any(|i| self.edge(i).contains_point(point, epsilon)) {
            return true;
        }

        // Winding number via summed angles
        let winding: f64 = (0..self.vertices.len())
            .map(|i| {
                let a = self.vertices[i] - point;
                let b = self.vertices[self.next_index(i)] - point;
                signed_angle(a, b, plane.unit_normal)
            })
            .sum();
        winding.abs() > std::f64::consts::PI
    }

    /// Distance along `ray` to where it hits the polygon, if it does.
    pub fn ray_cast(&self, ray: &Ray, epsilon: f64) -> Option<f64> {
        let plane = self.calc_plane(false)?;
        let alpha = ray.cast_against_plane(&plane)?;
        self.contains_point(ray.point_at(alpha), epsilon)
            .then_some(alpha)
    }
}
