//! # Line Segment
//!
//! Finite segment between two points with closest-point queries, used by the
//! polygon module for collinearity, spike and chord-obstruction tests.

use super::{points_coincide, Vec3};

#[cfg(test)]
mod tests;

/// Segment from `point_a` to `point_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Start point.
    pub point_a: Vec3,
    /// End point.
    pub point_b: Vec3,
}

impl LineSegment {
    /// Creates a segment between two points.
    pub fn new(point_a: Vec3, point_b: Vec3) -> Self {
        Self { point_a, point_b }
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.point_a.distance(self.point_b)
    }

    /// Unnormalized direction `point_b - point_a`.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.point_b - self.point_a
    }

    /// Point at parameter `t` (0 = `point_a`, 1 = `point_b`).
    #[inline]
    pub fn lerp(&self, t: f64) -> Vec3 {
        self.point_a.lerp(self.point_b, t)
    }

    /// Parameter of the point on the segment closest to `point`, in `[0, 1]`.
    pub fn closest_parameter(&self, point: Vec3) -> f64 {
        let direction = self.direction();
        let length_squared = direction.length_squared();
        if length_squared == 0.0 {
            return 0.0;
        }
        ((point - self.point_a).dot(direction) / length_squared).clamp(0.0, 1.0)
    }

    /// Point on the segment closest to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        self.lerp(self.closest_parameter(point))
    }

    /// Distance from `point` to the segment.
    pub fn distance_to_point(&self, point: Vec3) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// True when `point` is within `epsilon` of the segment.
    pub fn contains_point(&self, point: Vec3, epsilon: f64) -> bool {
        self.distance_to_point(point) <= epsilon
    }

    /// True when `point` is within `epsilon` of the segment but not within
    /// `epsilon` of either endpoint.
    pub fn contains_interior_point(&self, point: Vec3, epsilon: f64) -> bool {
        self.contains_point(point, epsilon)
            && !points_coincide(point, self.point_a, epsilon)
            && !points_coincide(point, self.point_b, epsilon)
    }

    /// Shortest segment connecting this segment to `other`.
    ///
    /// `point_a` of the result lies on `self`, `point_b` on `other`. Handles
    /// parallel and degenerate (zero-length) inputs.
    pub fn shortest_connector(&self, other: &LineSegment) -> LineSegment {
        let d1 = self.direction();
        let d2 = other.direction();
        let r = self.point_a - other.point_a;
        let a = d1.length_squared();
        let e = d2.length_squared();
        let f = d2.dot(r);

        let (s, t) = if a <= f64::EPSILON && e <= f64::EPSILON {
            (0.0, 0.0)
        } else if a <= f64::EPSILON {
            (0.0, (f / e).clamp(0.0, 1.0))
        } else {
            let c = d1.dot(r);
            if e <= f64::EPSILON {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else {
                let b = d1.dot(d2);
                let denominator = a * e - b * b;
                // Parallel segments: any s works, start from point_a
                let mut s = if denominator > f64::EPSILON * a * e {
                    ((b * f - c * e) / denominator).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let mut t = (b * s + f) / e;
                if t < 0.0 {
                    t = 0.0;
                    s = (-c / a).clamp(0.0, 1.0);
                } else if t > 1.0 {
                    t = 1.0;
                    s = ((b - c) / a).clamp(0.0, 1.0);
                }
                (s, t)
            }
        };

        LineSegment::new(self.lerp(s), other.lerp(t))
    }

    /// Minimum distance between this segment and `other`.
    pub fn distance_to_segment(&self, other: &LineSegment) -> f64 {
        self.shortest_connector(other).length()
    }
}
