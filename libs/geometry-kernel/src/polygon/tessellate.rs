//! Recursive tessellation into convex pieces or triangles.
//!
//! Every split yields two pieces with strictly fewer vertices than their
//! parent, so the recursion always terminates.

use super::Polygon;
use crate::error::{KernelError, KernelResult};
use config::constants::CONVEXITY_TOLERANCE;

impl Polygon {
    /// Splits the polygon recursively until every piece is convex, appending
    /// the pieces to `out`.
    ///
    /// Chords are tried closest first, concave-to-concave before
    /// concave-to-convex.
    pub fn tessellate_until_convex(&self, out: &mut Vec<Polygon>) -> KernelResult<()> {
        let (convex, info) = self.is_convex(CONVEXITY_TOLERANCE);
        if convex {
            out.push(self.clone());
            return Ok(());
        }
        if info.concave_indices.is_empty() {
            return Err(KernelError::tessellation(format!(
                "polygon with {} vertices has no usable plane",
                self.len()
            )));
        }

        // (prefer concave target, distance, i, j)
        let mut candidates: Vec<(bool, f64, usize, usize)> = Vec::new();
        for &i in &info.concave_indices {
            for j in 0..self.len() {
                if j == i || self.next_index(i) == j || self.next_index(j) == i {
                    continue;
                }
                let to_convex = !info.concave_indices.contains(&j);
                let distance = self.vertices[i].distance(self.vertices[j]);
                candidates.push((to_convex, distance, i, j));
            }
        }
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

        for (_, _, i, j) in candidates {
            if let Some((piece_a, piece_b)) = self.split(i, j, false) {
                piece_a.tessellate_until_convex(out)?;
                piece_b.tessellate_until_convex(out)?;
                return Ok(());
            }
        }

        Err(KernelError::tessellation(format!(
            "no valid chord from {} concave vertices",
            info.concave_indices.len()
        )))
    }

    /// Splits the polygon recursively until every piece is a triangle,
    /// appending the triangles to `out`.
    ///
    /// Each level picks the valid chord whose two pieces are closest to
    /// equal area.
    pub fn tessellate_until_triangular(&self, out: &mut Vec<Polygon>) -> KernelResult<()> {
        let n = self.len();
        if n < 3 {
            return Err(KernelError::tessellation(format!(
                "cannot triangulate a polygon with {n} vertices"
            )));
        }
        if n == 3 {
            out.push(self.clone());
            return Ok(());
        }

        let assume_convex = self.is_convex(CONVEXITY_TOLERANCE).0;
        let mut best: Option<(f64, Polygon, Polygon)> = None;
        for i in 0..n {
            for j in (i + 2)..n {
                let Some((piece_a, piece_b)) = self.split(i, j, assume_convex) else {
                    continue;
                };
                let area_a = piece_a.area();
                let total = area_a + piece_b.area();
                let ratio = if total > 0.0 { area_a / total } else { 0.5 };
                let score = (ratio - 0.5).abs();
                if best.as_ref().map_or(true, |(s, _, _)| score < *s) {
                    best = Some((score, piece_a, piece_b));
                }
            }
        }

        let Some((_, piece_a, piece_b)) = best else {
            return Err(KernelError::tessellation(format!(
                "no valid chord in polygon with {n} vertices"
            )));
        };
        piece_a.tessellate_until_triangular(out)?;
        piece_b.tessellate_until_triangular(out)
    }
}
