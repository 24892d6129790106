//! Pairwise stroke overlap detection.
//!
//! Two strokes overlap when their outlines plausibly share filled area,
//! which in practice means they meet at a junction. The test is distance
//! based: endpoints first (the cheap common case), then a bounded
//! subsample of both spines. O(strokes²) with a constant-size sample per
//! stroke; glyphs rarely exceed ~20 strokes.

use kurbo::Point;

use crate::geom::resample;
use crate::stroke::Stroke;

/// Populate every stroke's `overlapping` set, symmetrically.
///
/// The comparison distance per pair is
/// `max(mean width A, mean width B) × 2 × threshold` — widths store radii,
/// so the ×2 puts the threshold on the diameter scale.
pub fn compute_overlaps(strokes: &mut [Stroke], threshold: f64, samples: usize) {
    for i in 0..strokes.len() {
        for j in (i + 1)..strokes.len() {
            let dist_threshold =
                strokes[i].mean_width().max(strokes[j].mean_width()) * 2.0 * threshold;
            if strokes_overlap(&strokes[i], &strokes[j], dist_threshold, samples) {
                let (id_i, id_j) = (strokes[i].id, strokes[j].id);
                strokes[i].overlapping.insert(id_j);
                strokes[j].overlapping.insert(id_i);
            }
        }
    }
}

fn strokes_overlap(a: &Stroke, b: &Stroke, dist_threshold: f64, samples: usize) -> bool {
    if endpoints_close(a, b, dist_threshold) {
        return true;
    }
    min_cross_distance(&resample(&a.spine, samples), &resample(&b.spine, samples))
        < dist_threshold
}

/// Any of A's two endpoints within threshold of any of B's.
fn endpoints_close(a: &Stroke, b: &Stroke, dist_threshold: f64) -> bool {
    let ends = |s: &Stroke| -> Vec<Point> {
        s.spine
            .first()
            .into_iter()
            .chain(s.spine.last())
            .copied()
            .collect()
    };
    let ea = ends(a);
    let eb = ends(b);
    ea.iter()
        .any(|pa| eb.iter().any(|pb| pa.distance(*pb) < dist_threshold))
}

/// Minimum distance over the full cross-product of two point samples.
fn min_cross_distance(a: &[Point], b: &[Point]) -> f64 {
    let mut min = f64::INFINITY;
    for pa in a {
        for pb in b {
            min = min.min(pa.distance(*pb));
        }
    }
    min
}
