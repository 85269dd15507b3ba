//! Axis-aligned bounding box.

use super::Vec3;

/// An axis-aligned box spanning `min..=max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Tightest box around `points`; `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for point in iter {
            aabb.expand_to_include(point);
        }
        Some(aabb)
    }

    /// Grows the box to contain `point`.
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True when `point` is inside the box grown by `epsilon`.
    pub fn contains_point(&self, point: Vec3, epsilon: f64) -> bool {
        let slack = Vec3::splat(epsilon);
        point.cmpge(self.min - slack).all() && point.cmple(self.max + slack).all()
    }

    /// True when the boxes share at least one point.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points([
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -2.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 4.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_contains_and_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0));
        let c = Aabb::new(Vec3::splat(3.0), Vec3::splat(4.0));

        assert!(a.contains_point(Vec3::splat(0.5), 0.0));
        assert!(a.contains_point(Vec3::new(1.0 + 1e-9, 0.0, 0.0), 1e-6));
        assert!(!a.contains_point(Vec3::splat(1.5), 1e-6));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_measures() {
        let aabb = Aabb::new(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO);
        assert_eq!(aabb.center(), Vec3::ONE);
        assert_relative_eq!(aabb.volume(), 8.0);
        let merged = aabb.merge(&Aabb::new(Vec3::splat(-1.0), Vec3::ZERO));
        assert_eq!(merged.min, Vec3::splat(-1.0));
    }
}
