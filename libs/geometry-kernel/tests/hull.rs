use geometry_kernel::epa::TriangleArena;
use geometry_kernel::{ExpandingPolytope, PolygonMesh, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_unit_vector(rng: &mut StdRng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let length = v.length();
        if length > 0.1 && length <= 1.0 {
            return v / length;
        }
    }
}

#[test]
fn epa_scenario_exterior_point_joins_interior_point_ignored() {
    let mut arena = TriangleArena::with_capacity(64);
    let mut polytope =
        ExpandingPolytope::seed([Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z], &mut arena).unwrap();

    let accepted = polytope
        .expand([Vec3::splat(2.0), Vec3::splat(0.1)], &mut arena)
        .unwrap();

    assert_eq!(accepted, 1);
    assert!(polytope.vertices().contains(&Vec3::splat(2.0)));
    assert!(!polytope.vertices().contains(&Vec3::splat(0.1)));
    assert_eq!(polytope.triangle_count(), 6);

    polytope.release(&mut arena).unwrap();
    assert_eq!(arena.live_count(), 0);
}

#[test]
fn sphere_hull_keeps_every_point_and_satisfies_euler() {
    let mut rng = StdRng::seed_from_u64(7);
    let points: Vec<Vec3> = (0..200).map(|_| random_unit_vector(&mut rng) * 3.0).collect();

    let mut mesh = PolygonMesh::new();
    mesh.generate_convex_hull(&points).unwrap();

    let v = mesh.vertex_count() as i64;
    let e = mesh.edge_count() as i64;
    let f = mesh.polygon_count() as i64;
    assert_eq!(v, 200);
    assert_eq!(v - e + f, 2);
    assert!(mesh.volume() > 0.0);
    assert!(mesh.volume() < 4.0 / 3.0 * std::f64::consts::PI * 27.0);
}

#[test]
fn hull_is_idempotent_on_its_own_vertices() {
    let mut rng = StdRng::seed_from_u64(11);
    let points: Vec<Vec3> = (0..100)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();

    let mut first = PolygonMesh::new();
    first.generate_convex_hull(&points).unwrap();
    let mut second = PolygonMesh::new();
    second.generate_convex_hull(first.vertices()).unwrap();

    assert_eq!(first.vertex_count(), second.vertex_count());
    assert_eq!(first.polygon_count(), second.polygon_count());
    assert!((first.volume() - second.volume()).abs() < 1e-9);
}
