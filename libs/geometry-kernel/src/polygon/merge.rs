//! Coplanar merging and plane-grouped compression.

use rayon::prelude::*;

use super::Polygon;
use crate::error::KernelResult;
use crate::math::{Plane, Vec3};
use config::constants::AREA_RELATIVE_TOLERANCE;

/// Margin above -1 under which two adjacent unit edge directions count as
/// folded back.
const FOLD_TOLERANCE: f64 = 1e-9;

// =============================================================================
// PAIR MERGE
// =============================================================================

impl Polygon {
    /// Merges two coplanar polygons that share an anti-parallel edge overlap.
    ///
    /// Every edge pair is tried in turn. For a pair `P -> Q` of `a` and
    /// `R -> S` of `b` the cycles are stitched as `Q .. P` followed by
    /// `S .. R`, which covers full overlap, partial overlap and containment
    /// of one edge in the other. The stitched cycle is reduced, and accepted
    /// only when it does not overlap itself and its area equals the sum of
    /// the inputs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_kernel::{Polygon, Vec3};
    ///
    /// let left = Polygon::new(vec![
    ///     Vec3::new(0.0, 0.0, 0.0),
    ///     Vec3::new(1.0, 0.0, 0.0),
    ///     Vec3::new(1.0, 1.0, 0.0),
    ///     Vec3::new(0.0, 1.0, 0.0),
    /// ]);
    /// let right = Polygon::new(vec![
    ///     Vec3::new(1.0, 0.0, 0.0),
    ///     Vec3::new(2.0, 0.0, 0.0),
    ///     Vec3::new(2.0, 1.0, 0.0),
    ///     Vec3::new(1.0, 1.0, 0.0),
    /// ]);
    ///
    /// let merged = Polygon::merge_coplanar_pair(&left, &right, 1e-6).unwrap();
    /// assert_eq!(merged.len(), 6);
    /// assert!((merged.area() - 2.0).abs() < 1e-9);
    /// ```
    pub fn merge_coplanar_pair(a: &Polygon, b: &Polygon, epsilon: f64) -> Option<Polygon> {
        if !a.is_valid() || !b.is_valid() {
            return None;
        }
        let plane_a = a.calc_plane(false)?;
        let plane_b = b.calc_plane(false)?;
        if plane_a.unit_normal.dot(plane_b.unit_normal) <= 0.0 {
            return None;
        }

        let expected_area = a.area() + b.area();
        for i in 0..a.len() {
            for j in 0..b.len() {
                if !edges_overlap_antiparallel(a, i, b, j, epsilon) {
                    continue;
                }

                let mut vertices = a.sub_cycle(a.next_index(i), i).into_vertices();
                vertices.extend(b.sub_cycle(b.next_index(j), j).into_vertices());
                let mut merged = Polygon::new(vertices);
                merged.reduce(epsilon);

                if !merged.is_valid() || merged.self_overlaps(epsilon) {
                    continue;
                }
                let area = merged.area();
                if (area - expected_area).abs() > AREA_RELATIVE_TOLERANCE * expected_area {
                    continue;
                }
                log::trace!(
                    "merged polygons of {} and {} vertices into {}",
                    a.len(),
                    b.len(),
                    merged.len()
                );
                return Some(merged);
            }
        }
        None
    }

    /// True when the boundary crosses or touches itself.
    ///
    /// Non-adjacent edges closer than `epsilon` overlap, as do adjacent
    /// edges that fold straight back over each other. Zero-length edges are
    /// ignored.
    ///
    /// This rejects strictly more shapes than comparing the angular order of
    /// the four edges at each shared point would: a simple polygon whose
    /// boundary merely passes within `epsilon` of itself also counts.
    pub fn self_overlaps(&self, epsilon: f64) -> bool {
        let n = self.len();
        if n < 3 {
            return false;
        }

        for k in 0..n {
            let edge = self.edge(k);
            if edge.length() <= epsilon {
                continue;
            }

            let next = self.edge(self.next_index(k));
            if next.length() > epsilon {
                let along = edge.direction().normalize().dot(next.direction().normalize());
                if along < -1.0 + FOLD_TOLERANCE {
                    return true;
                }
            }

            for l in (k + 1)..n {
                if l == self.next_index(k) || k == self.next_index(l) {
                    continue;
                }
                let other = self.edge(l);
                if other.length() <= epsilon {
                    continue;
                }
                if edge.distance_to_segment(&other) < epsilon {
                    return true;
                }
            }
        }
        false
    }

    // =========================================================================
    // COMPRESSION
    // =========================================================================

    /// Merges every mergeable coplanar pair in `polygons`.
    ///
    /// Polygons are grouped by plane equality within `epsilon`; polygons
    /// without a plane are dropped. Each group is merged pairwise until no
    /// pair merges, with groups processed in parallel and reassembled in
    /// first-seen order. With `must_be_convex` every result is tessellated
    /// into convex pieces. With `sanity_check` debug builds assert that the
    /// total area is preserved.
    pub fn compress(
        polygons: Vec<Polygon>,
        must_be_convex: bool,
        sanity_check: bool,
        epsilon: f64,
    ) -> KernelResult<Vec<Polygon>> {
        let area_before = if sanity_check && cfg!(debug_assertions) {
            total_area(&polygons)
        } else {
            0.0
        };
        let input_count = polygons.len();

        let groups = group_by_plane(polygons, epsilon);
        let group_count = groups.len();
        let merged: Vec<Polygon> = groups
            .into_par_iter()
            .map(|group| merge_group(group, epsilon))
            .flatten()
            .collect();

        let result = if must_be_convex {
            let mut pieces = Vec::with_capacity(merged.len());
            for polygon in &merged {
                polygon.tessellate_until_convex(&mut pieces)?;
            }
            pieces
        } else {
            merged
        };

        log::debug!(
            "compressed {} polygons in {} planes into {}",
            input_count,
            group_count,
            result.len()
        );

        if sanity_check && cfg!(debug_assertions) {
            let area_after = total_area(&result);
            debug_assert!(
                (area_before - area_after).abs() <= AREA_RELATIVE_TOLERANCE * area_before.max(1.0),
                "compress changed total area from {area_before} to {area_after}"
            );
        }

        Ok(result)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// True when edge `i` of `a` and edge `j` of `b` lie on the same line,
/// point in opposite directions and share a stretch longer than `epsilon`.
fn edges_overlap_antiparallel(a: &Polygon, i: usize, b: &Polygon, j: usize, epsilon: f64) -> bool {
    let edge_a = a.edge(i);
    let edge_b = b.edge(j);
    let length = edge_a.length();
    if length <= epsilon || edge_b.length() <= epsilon {
        return false;
    }

    let dir_a = edge_a.direction() / length;
    let dir_b = edge_b.direction().normalize();
    if dir_a.cross(dir_b).length() > epsilon || dir_a.dot(dir_b) >= 0.0 {
        return false;
    }
    if distance_to_line(edge_b.point_a, edge_a.point_a, dir_a) > epsilon
        || distance_to_line(edge_b.point_b, edge_a.point_a, dir_a) > epsilon
    {
        return false;
    }

    let t_r = (edge_b.point_a - edge_a.point_a).dot(dir_a);
    let t_s = (edge_b.point_b - edge_a.point_a).dot(dir_a);
    let lo = t_r.min(t_s).max(0.0);
    let hi = t_r.max(t_s).min(length);
    hi - lo > epsilon
}

fn distance_to_line(point: Vec3, origin: Vec3, unit_direction: Vec3) -> f64 {
    (point - origin).cross(unit_direction).length()
}

fn total_area(polygons: &[Polygon]) -> f64 {
    polygons.iter().map(Polygon::area).sum()
}

/// Buckets polygons by plane, keeping first-seen group order.
fn group_by_plane(polygons: Vec<Polygon>, epsilon: f64) -> Vec<Vec<Polygon>> {
    let mut planes: Vec<Plane> = Vec::new();
    let mut groups: Vec<Vec<Polygon>> = Vec::new();

    for polygon in polygons {
        let Some(plane) = polygon.calc_plane(false) else {
            log::debug!("dropping degenerate polygon with {} vertices", polygon.len());
            continue;
        };
        match planes.iter().position(|p| p.is_equal(&plane, epsilon)) {
            Some(index) => groups[index].push(polygon),
            None => {
                planes.push(plane);
                groups.push(vec![polygon]);
            }
        }
    }
    groups
}

/// Merges pairs within one coplanar group until none merge.
fn merge_group(mut group: Vec<Polygon>, epsilon: f64) -> Vec<Polygon> {
    'restart: loop {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                if let Some(merged) = Polygon::merge_coplanar_pair(&group[i], &group[j], epsilon) {
                    group[i] = merged;
                    group.remove(j);
                    continue 'restart;
                }
            }
        }
        return group;
    }
}
