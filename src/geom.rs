//! Shared geometry utilities.

use kurbo::{Point, Vec2};

/// Signed area of a closed polygon via the shoelace formula.
///
/// Positive = counter-clockwise, negative = clockwise. The polygon is
/// implicitly closed (last vertex connects back to the first).
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            points[i].x * points[j].y - points[j].x * points[i].y
        })
        .sum::<f64>()
        / 2.0
}

/// Total arc length of a polyline (sum of segment lengths).
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Pick at most `count` evenly spaced points from a polyline, always
/// including the first and last point.
///
/// Polylines with `count` or fewer points are returned unchanged. Used by
/// the overlap detector to bound its pairwise distance matrix.
pub fn resample(points: &[Point], count: usize) -> Vec<Point> {
    let n = points.len();
    if n <= count || count < 2 {
        return points.to_vec();
    }
    (0..count)
        .map(|i| points[i * (n - 1) / (count - 1)])
        .collect()
}

/// Unit tangent at spine index `i`, estimated from the neighboring points.
///
/// Interior points use the central difference; endpoints use the one-sided
/// difference. Degenerate (coincident-neighbor) cases fall back to +x so a
/// perpendicular offset is always defined.
pub fn tangent_at(points: &[Point], i: usize) -> Vec2 {
    let n = points.len();
    let (a, b) = if n < 2 {
        return Vec2::new(1.0, 0.0);
    } else if i == 0 {
        (points[0], points[1])
    } else if i == n - 1 {
        (points[n - 2], points[n - 1])
    } else {
        (points[i - 1], points[i + 1])
    };
    let d = b - a;
    let len = d.hypot();
    if len < 1e-12 {
        Vec2::new(1.0, 0.0)
    } else {
        d / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shoelace_unit_square() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!((signed_area(&square) - 1.0).abs() < 1e-12);

        let reversed: Vec<Point> = square.iter().rev().copied().collect();
        assert!((signed_area(&reversed) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn shoelace_degenerate() {
        assert_eq!(signed_area(&[]), 0.0);
        assert_eq!(signed_area(&[Point::new(1.0, 2.0)]), 0.0);
    }

    #[test]
    fn polyline_length_chain() {
        let chain = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
        ];
        assert!((polyline_length(&chain) - 7.0).abs() < 1e-12);
        assert_eq!(polyline_length(&[Point::new(5.0, 5.0)]), 0.0);
    }

    #[test]
    fn resample_keeps_endpoints() {
        let pts: Vec<Point> = (0..50).map(|i| Point::new(i as f64, 0.0)).collect();
        let sampled = resample(&pts, 10);
        assert_eq!(sampled.len(), 10);
        assert_eq!(sampled[0], pts[0]);
        assert_eq!(sampled[9], pts[49]);
    }

    #[test]
    fn resample_short_input_unchanged() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(resample(&pts, 10), pts);
    }

    #[test]
    fn tangent_central_difference() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let t = tangent_at(&pts, 1);
        assert!((t.x - 1.0).abs() < 1e-12);
        assert!(t.y.abs() < 1e-12);
    }
}
