use geometry_kernel::{Polygon, PolygonMesh, Vec3};

const EPSILON: f64 = 1e-6;
const TOLERANCE: f64 = 1e-4;

fn xy(points: &[(f64, f64)]) -> Polygon {
    Polygon::new(points.iter().map(|&(x, y)| Vec3::new(x, y, 0.0)).collect())
}

#[test]
fn two_unit_squares_merge_into_hexagon_of_area_two() {
    let left = xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let right = xy(&[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]);

    let merged = Polygon::compress(vec![left, right], false, true, EPSILON).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].len(), 6);
    assert!((merged[0].area() - 2.0).abs() < 1e-9);
}

#[test]
fn single_reflex_vertex_tessellates_into_two_convex_pieces() {
    let polygon = xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (1.0, 2.0), (0.0, 4.0)]);

    let (convex, info) = polygon.is_convex(TOLERANCE);
    assert!(!convex);
    assert_eq!(info.concave_indices, vec![3]);

    let mut pieces = Vec::new();
    polygon.tessellate_until_convex(&mut pieces).unwrap();
    assert_eq!(pieces.len(), 2);
    for piece in &pieces {
        assert!(piece.is_convex(TOLERANCE).0);
        for vertex in piece.vertices() {
            assert!(polygon.vertices().contains(vertex));
        }
    }
}

#[test]
fn reduce_is_idempotent_after_merge() {
    let square = xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let wide = xy(&[(1.0, -1.0), (3.0, -1.0), (3.0, 2.0), (1.0, 2.0)]);

    let mut merged = Polygon::merge_coplanar_pair(&square, &wide, EPSILON).unwrap();
    let snapshot = merged.clone();
    assert!(!merged.reduce(EPSILON));
    assert_eq!(merged, snapshot);
    assert!((merged.area() - 7.0).abs() < 1e-9);
}

#[test]
fn simplified_box_survives_serialization() {
    let corners: Vec<Vec3> = (0..8)
        .map(|i| {
            Vec3::new(
                2.0 * (i & 1) as f64,
                3.0 * ((i >> 1) & 1) as f64,
                ((i >> 2) & 1) as f64,
            )
        })
        .collect();

    let mut mesh = PolygonMesh::new();
    mesh.generate_convex_hull(&corners).unwrap();
    mesh.simplify_faces(true, EPSILON).unwrap();
    assert_eq!(mesh.polygon_count(), 6);
    assert!((mesh.volume() - 6.0).abs() < 1e-9);

    let mut bytes = Vec::new();
    mesh.dump(&mut bytes).unwrap();
    let mut restored = PolygonMesh::new();
    restored.restore(&mut bytes.as_slice()).unwrap();
    assert_eq!(restored, mesh);

    let mut from_json = PolygonMesh::new();
    from_json.from_json(&mesh.to_json()).unwrap();
    assert_eq!(from_json, mesh);
}
