//! # Plane
//!
//! Plane stored as a point on the plane plus a unit normal, with
//! thickness-tolerant point classification.

use super::{points_coincide, Vec3};


// =============================================================================
// SIDE
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Point is in front of the plane (positive side, beyond the thickness).
    Front,
    /// Point is behind the plane (negative side, beyond the thickness).
    Back,
    /// Point lies within the plane's thickness.
    Neither,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space defined by a center point and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub center: Vec3,
    /// Unit normal; the front side is the side it points into.
    pub unit_normal: Vec3,
}

impl Plane {
    /// Creates a plane from a point and a (not necessarily unit) normal.
    ///
    /// Returns `None` for a zero-length normal.
    pub fn new(center: Vec3, normal: Vec3) -> Option<Self> {
        let unit_normal = normal.try_normalize()?;
        Some(Self {
            center,
            unit_normal,
        })
    }

    /// Creates a plane through three points.
    ///
    /// The normal follows the right-hand rule over `a -> b -> c`; collinear
    /// points yield `None`.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        Self::new(a, (b - a).cross(c - a))
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        (point - self.center).dot(self.unit_normal)
    }

    /// Classifies a point, treating the plane as `thickness` thick on each side.
    pub fn side(&self, point: Vec3, thickness: f64) -> Side {
        let distance = self.signed_distance(point);
        if distance > thickness {
            Side::Front
        } else if distance < -thickness {
            Side::Back
        } else {
            Side::Neither
        }
    }

    /// True when `point` is strictly in front of the plane.
    #[inline]
    pub fn is_in_front(&self, point: Vec3, thickness: f64) -> bool {
        self.side(point, thickness) == Side::Front
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point - self.unit_normal * self.signed_distance(point)
    }

    /// The same plane facing the other way.
    pub fn reversed(&self) -> Plane {
        Plane {
            center: self.center,
            unit_normal: -self.unit_normal,
        }
    }

    /// True when both planes face the same way and contain each other's
    /// centers, within `epsilon`.
    pub fn is_equal(&self, other: &Plane, epsilon: f64) -> bool {
        points_coincide(self.unit_normal, other.unit_normal, epsilon)
            && self.signed_distance(other.center).abs() <= epsilon
            && other.signed_distance(self.center).abs() <= epsilon
    }
}
