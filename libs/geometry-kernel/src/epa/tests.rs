//! # Expanding Polytope Tests
//!
//! Seeding, expansion scenarios, and the containment/closure properties of
//! the resulting hull.

use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn unit_seed() -> [Vec3; 4] {
    [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]
}

/// Every directed edge must be matched by exactly one reversed edge.
fn assert_closed(triangles: &[Triangle]) {
    let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
    for triangle in triangles {
        for edge in triangle.edges() {
            *directed.entry(edge).or_insert(0) += 1;
        }
    }
    for (&(a, b), &count) in &directed {
        assert_eq!(count, 1, "edge ({a}, {b}) used {count} times");
        assert_eq!(
            directed.get(&(b, a)),
            Some(&1),
            "edge ({a}, {b}) has no opposite"
        );
    }
}

/// No point may lie in front of any hull face.
fn assert_contains(vertices: &[Vec3], triangles: &[Triangle], points: &[Vec3]) {
    for triangle in triangles {
        let Some(plane) = triangle.plane(vertices) else {
            continue;
        };
        for point in points {
            assert!(
                plane.signed_distance(*point) <= 1e-6,
                "point {point:?} outside face {triangle:?}"
            );
        }
    }
}

// =============================================================================
// TRIANGLE
// =============================================================================

#[test]
fn test_triangle_cancels_reverse_in_any_rotation() {
    let t = Triangle::new(1, 2, 3);
    assert!(t.cancels(&Triangle::new(1, 3, 2)));
    assert!(t.cancels(&Triangle::new(3, 2, 1)));
    assert!(t.cancels(&Triangle::new(2, 1, 3)));
    assert!(!t.cancels(&Triangle::new(2, 3, 1)));
    assert!(!t.cancels(&t));
}

// =============================================================================
// SEEDING
// =============================================================================

#[test]
fn test_seed_faces_point_outward() {
    for seed in [unit_seed(), [Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::Z]] {
        let mut arena = TriangleArena::with_capacity(16);
        let polytope = ExpandingPolytope::seed(seed, &mut arena).unwrap();
        let centroid = seed.iter().copied().sum::<Vec3>() / 4.0;

        let triangles = polytope.triangles(&arena);
        assert_eq!(triangles.len(), 4);
        for triangle in &triangles {
            let plane = triangle.plane(polytope.vertices()).unwrap();
            assert!(plane.signed_distance(centroid) < 0.0);
        }
        assert_closed(&triangles);
    }
}

#[test]
fn test_seed_rejects_flat_tetrahedron() {
    let mut arena = TriangleArena::with_capacity(16);
    let flat = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
    let result = ExpandingPolytope::seed(flat, &mut arena);
    assert!(matches!(result, Err(KernelError::DegenerateGeometry { .. })));
    assert_eq!(arena.live_count(), 0);
}

#[test]
fn test_seed_accepts_tiny_tetrahedron() {
    let mut arena = TriangleArena::with_capacity(16);
    let tiny = unit_seed().map(|p| p * 1e-5);
    let polytope = ExpandingPolytope::seed(tiny, &mut arena).unwrap();
    assert_eq!(polytope.triangle_count(), 4);
}

// =============================================================================
// EXPANSION
// =============================================================================

#[test]
fn test_expand_with_exterior_point() {
    let mut arena = TriangleArena::with_capacity(32);
    let mut polytope = ExpandingPolytope::seed(unit_seed(), &mut arena).unwrap();

    let accepted = polytope.expand([Vec3::splat(2.0)], &mut arena).unwrap();
    assert_eq!(accepted, 1);
    assert!(polytope.vertices().contains(&Vec3::splat(2.0)));

    // The slanted face is replaced by a three-triangle cone
    let triangles = polytope.triangles(&arena);
    assert_eq!(triangles.len(), 6);
    assert!(triangles.iter().any(|t| t.vertex.contains(&4)));
    assert_closed(&triangles);
    assert_contains(polytope.vertices(), &triangles, &unit_seed());
}

#[test]
fn test_expand_ignores_interior_point() {
    let mut arena = TriangleArena::with_capacity(32);
    let mut polytope = ExpandingPolytope::seed(unit_seed(), &mut arena).unwrap();
    polytope.expand([Vec3::splat(2.0)], &mut arena).unwrap();

    let vertex_count = polytope.vertices().len();
    let triangle_count = polytope.triangle_count();

    let accepted = polytope.expand([Vec3::splat(0.1)], &mut arena).unwrap();
    assert_eq!(accepted, 0);
    assert_eq!(polytope.vertices().len(), vertex_count);
    assert_eq!(polytope.triangle_count(), triangle_count);
}

#[test]
fn test_expand_ignores_point_on_face() {
    let mut arena = TriangleArena::with_capacity(32);
    let mut polytope = ExpandingPolytope::seed(unit_seed(), &mut arena).unwrap();
    let accepted = polytope
        .expand([Vec3::new(0.25, 0.25, 0.0)], &mut arena)
        .unwrap();
    assert_eq!(accepted, 0);
    assert_eq!(polytope.triangle_count(), 4);
}

#[test]
fn test_expand_to_cube() {
    let mut arena = TriangleArena::with_capacity(128);
    let mut polytope = ExpandingPolytope::seed(unit_seed(), &mut arena).unwrap();
    let rest = [
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, 1.0),
        Vec3::ONE,
    ];
    polytope.expand(rest, &mut arena).unwrap();

    let triangles = polytope.triangles(&arena);
    // Cube: 8 vertices, 6 faces of 2 triangles
    assert_eq!(polytope.vertices().len(), 8);
    assert_eq!(triangles.len(), 12);
    assert_closed(&triangles);
}

#[test]
fn test_expand_reports_arena_exhaustion() {
    // Room for the seed only
    let mut arena = TriangleArena::with_capacity(4);
    let mut polytope = ExpandingPolytope::seed(unit_seed(), &mut arena).unwrap();
    let result = polytope.expand([Vec3::splat(2.0)], &mut arena);
    assert!(matches!(result, Err(KernelError::ArenaExhausted { .. })));
}

#[test]
fn test_release_frees_arena() {
    let mut arena = TriangleArena::with_capacity(32);
    let mut polytope = ExpandingPolytope::seed(unit_seed(), &mut arena).unwrap();
    polytope.expand([Vec3::splat(2.0)], &mut arena).unwrap();

    let (vertices, triangles) = polytope.release(&mut arena).unwrap();
    assert_eq!(vertices.len(), 5);
    assert_eq!(triangles.len(), 6);
    assert_eq!(arena.live_count(), 0);
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_random_cloud_is_contained_and_closed() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..10 {
        let points: Vec<Vec3> = (0..60)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                )
            })
            .collect();

        let mut arena = TriangleArena::with_capacity(config::constants::hull_triangle_budget(64));
        let seed = [
            Vec3::new(-2.0, -2.0, -2.0),
            Vec3::new(2.0, -2.0, -2.0),
            Vec3::new(0.0, 2.0, -2.0),
            Vec3::new(0.0, 0.0, 2.0),
        ];
        let mut polytope = ExpandingPolytope::seed(seed, &mut arena).unwrap();
        polytope.expand(points.iter().copied(), &mut arena).unwrap();

        let triangles = polytope.triangles(&arena);
        assert_closed(&triangles);
        assert_contains(polytope.vertices(), &triangles, &points);
    }
}

#[test]
fn test_random_sphere_points_all_become_vertices() {
    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<Vec3> = (0..40)
        .map(|_| {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            v.normalize_or_zero()
        })
        .filter(|v| v.length() > 0.5)
        .collect();

    let mut arena = TriangleArena::with_capacity(config::constants::hull_triangle_budget(points.len()));
    let seed = [points[0], points[1], points[2], points[3]];
    let mut polytope = ExpandingPolytope::seed(seed, &mut arena).unwrap();
    polytope.expand(points[4..].iter().copied(), &mut arena).unwrap();

    let triangles = polytope.triangles(&arena);
    assert_closed(&triangles);
    assert_contains(polytope.vertices(), &triangles, &points);
    // Euler: a closed triangulated sphere with V vertices has 2V - 4 faces
    let used: std::collections::HashSet<usize> =
        triangles.iter().flat_map(|t| t.vertex).collect();
    assert_eq!(triangles.len(), 2 * used.len() - 4);
}
