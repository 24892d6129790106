//! Stroke and decomposition output model.
//!
//! A [`Stroke`] is one recovered calligraphic path: a spine (centerline)
//! plus a width profile, one width per spine point. Widths store the local
//! medial-axis radius, so the drawn stroke is about twice that wide; the
//! outline construction offsets by the stored value on each side.

use std::collections::BTreeSet;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geom;
use crate::graph::JunctionType;

/// One recovered stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Sequential id, unique and contiguous from 0 within a decomposition.
    pub id: usize,
    /// Centerline points. A single-point spine is permitted (zero length).
    pub spine: Vec<Point>,
    /// Local radius at each spine point. Same length as `spine`, all ≥ 0.
    pub widths: Vec<f64>,
    /// Junction classification at the first spine point, if the upstream
    /// detector classified that vertex.
    pub start_junction: Option<JunctionType>,
    /// Junction classification at the last spine point.
    pub end_junction: Option<JunctionType>,
    /// Ids of other strokes whose outlines overlap this one. Symmetric,
    /// never contains `id` itself.
    pub overlapping: BTreeSet<usize>,
}

impl Stroke {
    /// Arc length of the spine.
    pub fn length(&self) -> f64 {
        geom::polyline_length(&self.spine)
    }

    /// Mean of the width profile (0.0 for an empty profile).
    pub fn mean_width(&self) -> f64 {
        if self.widths.is_empty() {
            0.0
        } else {
            self.widths.iter().sum::<f64>() / self.widths.len() as f64
        }
    }

    /// Left and right outlines: each spine point offset perpendicular to
    /// the local tangent by its width value, one polyline per side.
    ///
    /// Simple per-point perpendicular offset — no miter or bevel handling
    /// at sharp spine turns. Self-intersections in the offset polylines
    /// are tolerated downstream (rasterization just fills them).
    pub fn outline(&self) -> (Vec<Point>, Vec<Point>) {
        let mut left = Vec::with_capacity(self.spine.len());
        let mut right = Vec::with_capacity(self.spine.len());
        for (i, &p) in self.spine.iter().enumerate() {
            let t = geom::tangent_at(&self.spine, i);
            let normal = kurbo::Vec2::new(-t.y, t.x);
            let w = self.widths[i];
            left.push(p + normal * w);
            right.push(p - normal * w);
        }
        (left, right)
    }

    /// Closed outline polygon: the left side forward, then the right side
    /// reversed. Suitable for polygon fill.
    pub fn closed_outline(&self) -> Vec<Point> {
        let (left, mut right) = self.outline();
        let mut poly = left;
        right.reverse();
        poly.extend(right);
        poly
    }

    /// Smooth the width profile with a centered moving average.
    ///
    /// `window` is the half-width: each width becomes the mean of itself
    /// and up to `window` neighbors on each side. A window of 0 is a no-op.
    pub fn smooth_widths(&mut self, window: usize) {
        if window == 0 || self.widths.len() < 3 {
            return;
        }
        let n = self.widths.len();
        let smoothed: Vec<f64> = (0..n)
            .map(|i| {
                let lo = i.saturating_sub(window);
                let hi = (i + window + 1).min(n);
                self.widths[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
            })
            .collect();
        self.widths = smoothed;
    }
}

/// Final result of stroke recovery for one glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeDecomposition {
    pub glyph_name: String,
    pub strokes: Vec<Stroke>,
    /// Fraction of the glyph's filled area covered by the stroke outlines,
    /// in [0, 1].
    pub coverage: f64,
}

impl StrokeDecomposition {
    /// Serialize to a JSON value (nested-mapping persistence format).
    pub fn to_json(&self) -> serde_json::Value {
        // Serialization of plain data cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Rebuild a decomposition from [`Self::to_json`] output.
    ///
    /// Round-trips glyph name, stroke count, and coverage exactly (modulo
    /// floating-point text formatting, well within 1e-6).
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal_stroke(id: usize, y: f64, width: f64, n: usize) -> Stroke {
        Stroke {
            id,
            spine: (0..n).map(|i| Point::new(i as f64, y)).collect(),
            widths: vec![width; n],
            start_junction: None,
            end_junction: None,
            overlapping: BTreeSet::new(),
        }
    }

    #[test]
    fn length_and_mean_width() {
        let s = horizontal_stroke(0, 0.0, 2.5, 5);
        assert!((s.length() - 4.0).abs() < 1e-12);
        assert!((s.mean_width() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn outline_offsets_perpendicular() {
        let s = horizontal_stroke(0, 0.0, 2.0, 3);
        let (left, right) = s.outline();
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 3);
        // Horizontal spine: normal is +y on the left, -y on the right.
        for (i, (l, r)) in left.iter().zip(&right).enumerate() {
            assert!((l.x - i as f64).abs() < 1e-12);
            assert!((l.y - 2.0).abs() < 1e-12);
            assert!((r.y + 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn closed_outline_is_left_then_reversed_right() {
        let s = horizontal_stroke(0, 0.0, 1.0, 3);
        let poly = s.closed_outline();
        assert_eq!(poly.len(), 6);
        assert_eq!(poly[0], Point::new(0.0, 1.0));
        assert_eq!(poly[2], Point::new(2.0, 1.0));
        // Right side comes back from the far end.
        assert_eq!(poly[3], Point::new(2.0, -1.0));
        assert_eq!(poly[5], Point::new(0.0, -1.0));
    }

    #[test]
    fn smooth_widths_averages_neighbors() {
        let mut s = horizontal_stroke(0, 0.0, 1.0, 5);
        s.widths = vec![1.0, 1.0, 4.0, 1.0, 1.0];
        s.smooth_widths(1);
        assert_eq!(s.widths.len(), 5);
        assert!((s.widths[2] - 2.0).abs() < 1e-12);
        assert!(s.widths.iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn json_round_trip() {
        let mut stroke = horizontal_stroke(0, 0.0, 2.0, 4);
        stroke.overlapping.insert(1);
        let d = StrokeDecomposition {
            glyph_name: "A".to_string(),
            strokes: vec![stroke, horizontal_stroke(1, 5.0, 1.5, 3)],
            coverage: 0.8125,
        };
        let restored = StrokeDecomposition::from_json(d.to_json()).unwrap();
        assert_eq!(restored.glyph_name, d.glyph_name);
        assert_eq!(restored.strokes.len(), d.strokes.len());
        assert!((restored.coverage - d.coverage).abs() < 1e-6);
        assert_eq!(restored, d);
    }
}
