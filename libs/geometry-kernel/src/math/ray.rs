//! Half-line with a unit direction, cast against planes and boxes.

use super::{Aabb, Plane, Vec3};

/// A ray starting at `origin` travelling along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// Returns `None` for a zero-length direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            direction: direction.try_normalize()?,
        })
    }

    /// The point `alpha` units along the ray.
    #[inline]
    pub fn point_at(&self, alpha: f64) -> Vec3 {
        self.origin + self.direction * alpha
    }

    /// Distance along the ray to the plane, if the ray hits it ahead of the
    /// origin.
    ///
    /// Rays parallel to the plane never hit, even when lying in it.
    pub fn cast_against_plane(&self, plane: &Plane) -> Option<f64> {
        let denominator = self.direction.dot(plane.unit_normal);
        if denominator.abs() < f64::EPSILON {
            return None;
        }
        let alpha = (plane.center - self.origin).dot(plane.unit_normal) / denominator;
        (alpha >= 0.0).then_some(alpha)
    }

    /// Distance along the ray to where it enters the box (slab test).
    ///
    /// Returns `Some(0.0)` when the origin is inside the box.
    pub fn cast_against_aabb(&self, aabb: &Aabb) -> Option<f64> {
        let mut t_min = 0.0_f64;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if direction.abs() < f64::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}
