//! Tests for segment closest-point queries.

use super::*;
use approx::assert_relative_eq;

fn seg(a: [f64; 3], b: [f64; 3]) -> LineSegment {
    LineSegment::new(Vec3::from_array(a), Vec3::from_array(b))
}

#[test]
fn test_closest_point_clamps_to_endpoints() {
    let s = seg([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    assert_eq!(s.closest_point(Vec3::new(-1.0, 1.0, 0.0)), Vec3::ZERO);
    assert_eq!(s.closest_point(Vec3::new(5.0, 1.0, 0.0)), Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(s.closest_point(Vec3::new(1.0, 1.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_distance_to_point() {
    let s = seg([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    assert_relative_eq!(s.distance_to_point(Vec3::new(1.0, 3.0, 4.0)), 5.0);
}

#[test]
fn test_contains_interior_point() {
    let s = seg([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    assert!(s.contains_interior_point(Vec3::new(1.0, 1e-9, 0.0), 1e-6));
    assert!(!s.contains_interior_point(Vec3::ZERO, 1e-6));
    assert!(s.contains_point(Vec3::ZERO, 1e-6));
}

#[test]
fn test_shortest_connector_crossing() {
    let a = seg([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let b = seg([0.0, -1.0, 1.0], [0.0, 1.0, 1.0]);
    let connector = a.shortest_connector(&b);
    assert_relative_eq!(connector.length(), 1.0);
    assert_relative_eq!(connector.point_a.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(connector.point_b.z, 1.0);
}

#[test]
fn test_shortest_connector_parallel() {
    let a = seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let b = seg([0.5, 2.0, 0.0], [3.0, 2.0, 0.0]);
    assert_relative_eq!(a.distance_to_segment(&b), 2.0);
}

#[test]
fn test_shortest_connector_disjoint_collinear() {
    let a = seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let b = seg([3.0, 0.0, 0.0], [4.0, 0.0, 0.0]);
    assert_relative_eq!(a.distance_to_segment(&b), 2.0);
}

#[test]
fn test_shortest_connector_degenerate() {
    let point = seg([1.0, 1.0, 0.0], [1.0, 1.0, 0.0]);
    let line = seg([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    assert_relative_eq!(point.distance_to_segment(&line), 1.0);
    assert_relative_eq!(line.distance_to_segment(&point), 1.0);
}

#[test]
fn test_shortest_connector_touching_endpoint() {
    let a = seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    let b = seg([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
    assert!(a.distance_to_segment(&b) < 1e-12);
}
