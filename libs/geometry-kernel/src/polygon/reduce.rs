//! Removal of redundant vertices.
//!
//! Reduction is a rewrite system over four local rules, applied until none
//! matches. Every rule removes at least one vertex, so it terminates, and the
//! result has no redundant vertices left (reducing again changes nothing).
//!
//! Straight-through collinear vertices are kept: they are legitimate corners
//! of the boundary (for example where two merged faces met).

use super::Polygon;
use crate::math::{points_coincide, LineSegment};

impl Polygon {
    /// Removes repeated points, points doubling back over their outgoing
    /// edge, and symmetric or asymmetric spikes.
    ///
    /// Returns true when any vertex was removed.
    pub fn reduce(&mut self, epsilon: f64) -> bool {
        let mut changed = false;
        while self.remove_repeated_point(epsilon)
            || self.remove_point_on_edge(epsilon)
            || self.remove_symmetric_spike(epsilon)
            || self.remove_asymmetric_spike(epsilon)
        {
            changed = true;
        }
        changed
    }

    /// `v[i] == v[i + 1]`: drop the repeat.
    fn remove_repeated_point(&mut self, epsilon: f64) -> bool {
        if self.vertices.len() < 2 {
            return false;
        }
        let found = (0..self.vertices.len()).find(|&i| {
            points_coincide(self.vertices[i], self.vertices[self.next_index(i)], epsilon)
        });
        match found {
            Some(i) => {
                let next = self.next_index(i);
                self.vertices.remove(next);
                true
            }
            None => false,
        }
    }

    /// `v[i - 1]` lies inside the edge `v[i] -> v[i + 1]`: the boundary runs
    /// out to `v[i]` and straight back over its own incoming edge.
    fn remove_point_on_edge(&mut self, epsilon: f64) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let found = (0..self.vertices.len()).find(|&i| {
            self.edge(i)
                .contains_interior_point(self.vertices[self.prev_index(i)], epsilon)
        });
        self.remove_vertex(found)
    }

    /// `v[i - 1] == v[i + 1]`: the boundary pokes out to `v[i]` and returns
    /// to where it started. Both the tip and the duplicate go.
    fn remove_symmetric_spike(&mut self, epsilon: f64) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let found = (0..self.vertices.len()).find(|&i| {
            let prev = self.vertices[self.prev_index(i)];
            let next = self.vertices[self.next_index(i)];
            points_coincide(prev, next, epsilon)
                && !points_coincide(prev, self.vertices[i], epsilon)
        });
        match found {
            Some(i) => {
                let next = self.next_index(i);
                // Remove the higher index first so the other stays valid
                self.vertices.remove(i.max(next));
                self.vertices.remove(i.min(next));
                true
            }
            None => false,
        }
    }

    /// `v[i + 1]` lies inside the edge `v[i - 1] -> v[i]`: the boundary runs
    /// out to `v[i]` and comes partway back.
    fn remove_asymmetric_spike(&mut self, epsilon: f64) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let found = (0..self.vertices.len()).find(|&i| {
            let incoming = LineSegment::new(self.vertices[self.prev_index(i)], self.vertices[i]);
            incoming.contains_interior_point(self.vertices[self.next_index(i)], epsilon)
        });
        self.remove_vertex(found)
    }

    fn remove_vertex(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) => {
                self.vertices.remove(i);
                true
            }
            None => false,
        }
    }
}
