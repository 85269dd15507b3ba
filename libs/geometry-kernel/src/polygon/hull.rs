//! Convex hull of coplanar points.
//!
//! Points are projected onto a basis of their plane, sorted, and hulled by
//! divide and conquer: each half is hulled recursively and the two sub-hulls
//! are joined by running the monotone chain over their combined corners.

use super::Polygon;
use crate::error::{KernelError, KernelResult};
use crate::math::Vec3;
use config::constants::EPSILON;

/// Projected point: plane coordinates plus the index of the source point.
#[derive(Debug, Clone, Copy)]
struct Projected {
    u: f64,
    v: f64,
    index: usize,
}

/// Below this many points a half is hulled directly.
const LEAF_SIZE: usize = 4;

impl Polygon {
    /// Convex hull of a set of coplanar points.
    ///
    /// The result is built from the input points themselves, wound
    /// counter-clockwise about the normal of the first non-degenerate
    /// triple found, with collinear boundary points removed.
    ///
    /// # Errors
    ///
    /// [`KernelError::DegenerateGeometry`] when the points are fewer than
    /// three, coincide or are collinear.
    pub fn convex_hull(points: &[Vec3]) -> KernelResult<Polygon> {
        if points.len() < 3 {
            return Err(KernelError::degenerate(format!(
                "planar hull needs 3 points, got {}",
                points.len()
            )));
        }

        let origin = points[0];
        let far = farthest_by(points, |p| p.distance_squared(origin));
        let axis = far - origin;
        if axis.length() <= EPSILON {
            return Err(KernelError::degenerate("all hull points coincide"));
        }
        let axis_unit = axis.normalize();
        let off_axis = farthest_by(points, |p| (p - origin).cross(axis_unit).length_squared());
        if (off_axis - origin).cross(axis_unit).length() <= EPSILON {
            return Err(KernelError::degenerate("all hull points are collinear"));
        }

        let normal = axis.cross(off_axis - origin).normalize();
        let basis_u = axis_unit;
        let basis_v = normal.cross(basis_u);

        let mut projected: Vec<Projected> = points
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let d = *p - origin;
                Projected {
                    u: d.dot(basis_u),
                    v: d.dot(basis_v),
                    index,
                }
            })
            .collect();
        sort_lexicographic(&mut projected);

        let hull = divide_and_conquer(&projected);
        Ok(Polygon::new(hull.iter().map(|p| points[p.index]).collect()))
    }
}

fn farthest_by(points: &[Vec3], key: impl Fn(Vec3) -> f64) -> Vec3 {
    points
        .iter()
        .copied()
        .max_by(|a, b| key(*a).total_cmp(&key(*b)))
        .unwrap_or(Vec3::ZERO)
}

fn sort_lexicographic(points: &mut [Projected]) {
    points.sort_by(|a, b| a.u.total_cmp(&b.u).then(a.v.total_cmp(&b.v)));
}

/// Hull of points already sorted by `(u, v)`.
fn divide_and_conquer(sorted: &[Projected]) -> Vec<Projected> {
    if sorted.len() <= LEAF_SIZE {
        return monotone_chain(sorted);
    }
    let (left, right) = sorted.split_at(sorted.len() / 2);
    let mut corners = divide_and_conquer(left);
    corners.extend(divide_and_conquer(right));
    sort_lexicographic(&mut corners);
    monotone_chain(&corners)
}

fn turn(o: &Projected, a: &Projected, b: &Projected) -> f64 {
    (a.u - o.u) * (b.v - o.v) - (a.v - o.v) * (b.u - o.u)
}

/// Andrew's monotone chain over sorted points; counter-clockwise output.
fn monotone_chain(sorted: &[Projected]) -> Vec<Projected> {
    if sorted.len() < 3 {
        return sorted.to_vec();
    }

    let mut lower: Vec<Projected> = Vec::with_capacity(sorted.len());
    for p in sorted {
        while lower.len() >= 2 && turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Projected> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
