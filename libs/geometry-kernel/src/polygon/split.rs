//! Splitting a polygon along a chord between two of its vertices.

use super::Polygon;
use crate::math::{ccw_angle, LineSegment, Vec3};
use config::constants::{CONVEXITY_TOLERANCE, EPSILON};

impl Polygon {
    /// Splits the polygon along the chord from vertex `i` to vertex `j`.
    ///
    /// The first piece runs `i..=j`, the second `j..=i` (both wrapping).
    /// Identical or adjacent indices and polygons with fewer than 4 vertices
    /// are refused. Unless `assume_convex` is set the chord must also leave
    /// both endpoints into the interior, and no other edge may come within
    /// epsilon of it.
    pub fn split(&self, i: usize, j: usize, assume_convex: bool) -> Option<(Polygon, Polygon)> {
        let n = self.vertices.len();
        if n < 4 || i >= n || j >= n || i == j {
            return None;
        }
        if self.next_index(i) == j || self.next_index(j) == i {
            return None;
        }

        if !assume_convex {
            let normal = self.calc_plane(false)?.unit_normal;
            if !self.chord_enters_interior(i, j, normal) || !self.chord_enters_interior(j, i, normal)
            {
                return None;
            }
            if self.chord_is_obstructed(i, j, EPSILON) {
                return None;
            }
        }

        Some((self.sub_cycle(i, j), self.sub_cycle(j, i)))
    }

    /// Vertices from `from` to `to` inclusive, walking forward.
    pub(crate) fn sub_cycle(&self, from: usize, to: usize) -> Polygon {
        let mut vertices = Vec::new();
        let mut k = from;
        loop {
            vertices.push(self.vertices[k]);
            if k == to {
                break;
            }
            k = self.next_index(k);
        }
        Polygon::new(vertices)
    }

    /// True when the chord from `i` towards `j` starts inside the corner at `i`.
    ///
    /// The corner's interior spans counter-clockwise from the outgoing edge
    /// to the reversed incoming edge.
    fn chord_enters_interior(&self, i: usize, j: usize, normal: Vec3) -> bool {
        let corner = self.vertices[i];
        let outgoing = self.vertices[self.next_index(i)] - corner;
        let back = self.vertices[self.prev_index(i)] - corner;
        let chord = self.vertices[j] - corner;

        let interior = ccw_angle(outgoing, back, normal);
        let chord_angle = ccw_angle(outgoing, chord, normal);
        chord_angle > CONVEXITY_TOLERANCE && chord_angle < interior - CONVEXITY_TOLERANCE
    }

    /// True when an edge not touching `i` or `j` passes within `epsilon` of
    /// the chord.
    fn chord_is_obstructed(&self, i: usize, j: usize, epsilon: f64) -> bool {
        let chord = LineSegment::new(self.vertices[i], self.vertices[j]);
        let incident = [self.prev_index(i), i, self.prev_index(j), j];
        (0..self.vertices.len())
            .filter(|k| !incident.contains(k))
            .any(|k| chord.distance_to_segment(&self.edge(k)) < epsilon)
    }
}
