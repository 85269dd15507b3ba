//! # Geometric Primitives
//!
//! Value types with geometric predicates shared by every kernel module:
//! vectors, planes, rays, line segments and axis-aligned boxes.
//!
//! `Vec3` is a thin alias of `glam::DVec3`; all kernel math is `f64`.

mod aabb;
mod line_segment;
mod plane;
mod ray;

pub use aabb::Aabb;
pub use line_segment::LineSegment;
pub use plane::{Plane, Side};
pub use ray::Ray;

pub use glam::DVec3 as Vec3;

/// Signed angle (radians, in `(-PI, PI]`) that rotates `from` onto `to`
/// about `axis`, counter-clockwise positive.
///
/// # Example
///
/// ```rust
/// use geometry_kernel::math::{signed_angle, Vec3};
///
/// let angle = signed_angle(Vec3::X, Vec3::Y, Vec3::Z);
/// assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
#[inline]
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f64 {
    let sin = axis.dot(from.cross(to));
    let cos = from.dot(to);
    sin.atan2(cos)
}

/// Counter-clockwise angle (radians, in `[0, 2PI)`) from `from` to `to`
/// about `axis`.
#[inline]
pub fn ccw_angle(from: Vec3, to: Vec3, axis: Vec3) -> f64 {
    let angle = signed_angle(from, to, axis);
    if angle < 0.0 {
        angle + std::f64::consts::TAU
    } else {
        angle
    }
}

/// True when two points are within `epsilon` of each other.
#[inline]
pub fn points_coincide(a: Vec3, b: Vec3, epsilon: f64) -> bool {
    a.distance_squared(b) <= epsilon * epsilon
}

/// Six times the signed volume of the tetrahedron `(a, b, c, d)`.
///
/// Positive when `d` lies on the side of `(b - a) x (c - a)`.
#[inline]
pub fn tetrahedron_determinant(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> f64 {
    (b - a).cross(c - a).dot(d - a)
}

/// [`tetrahedron_determinant`] divided by the lengths of the three edges
/// leaving `a`.
///
/// The ratio is the same for a tetrahedron and any scaled copy of it: `1.0`
/// for three orthogonal edges, `0.0` when the points are coplanar or an edge
/// has zero length.
///
/// # Example
///
/// ```rust
/// use geometry_kernel::math::{normalized_volume, Vec3};
///
/// let tiny = normalized_volume(Vec3::ZERO, Vec3::X * 1e-5, Vec3::Y * 1e-5, Vec3::Z * 1e-5);
/// assert!((tiny - 1.0).abs() < 1e-12);
/// ```
pub fn normalized_volume(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> f64 {
    let scale = (b - a).length() * (c - a).length() * (d - a).length();
    if scale == 0.0 {
        return 0.0;
    }
    tetrahedron_determinant(a, b, c, d) / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_signed_angle_sign_follows_axis() {
        assert_relative_eq!(signed_angle(Vec3::X, Vec3::Y, Vec3::Z), FRAC_PI_2);
        assert_relative_eq!(signed_angle(Vec3::X, Vec3::Y, -Vec3::Z), -FRAC_PI_2);
    }

    #[test]
    fn test_ccw_angle_wraps_to_positive() {
        assert_relative_eq!(ccw_angle(Vec3::X, -Vec3::Y, Vec3::Z), 3.0 * FRAC_PI_2);
        assert_relative_eq!(ccw_angle(Vec3::X, -Vec3::X, Vec3::Z), PI);
    }

    #[test]
    fn test_tetrahedron_determinant_orientation() {
        let det = tetrahedron_determinant(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z);
        assert_relative_eq!(det, 1.0);
        let det = tetrahedron_determinant(Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::Z);
        assert_relative_eq!(det, -1.0);
    }

    #[test]
    fn test_normalized_volume_ignores_scale() {
        for scale in [1e-6, 1e-3, 1.0, 1e4] {
            let v = normalized_volume(
                Vec3::ZERO,
                Vec3::Y * scale,
                Vec3::X * scale,
                Vec3::Z * scale,
            );
            assert_relative_eq!(v, -1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalized_volume_degenerate() {
        assert_eq!(normalized_volume(Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::Y), 0.0);
        let flat = normalized_volume(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(flat, 0.0);
    }
}
