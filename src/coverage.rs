//! Coverage estimation: how much of the glyph's filled polygon the
//! recovered stroke outlines account for.
//!
//! Two interchangeable strategies behind [`CoverageEstimator`]:
//!
//! - [`RasterCoverage`] scan-converts the polygon and every stroke outline
//!   onto a fixed square grid and counts pixels. Accurate, handles stroke
//!   overlap correctly (union mask), cost bounded by the grid size.
//! - [`AnalyticCoverage`] compares Σ(length × mean width) against the
//!   shoelace polygon area. Cheap, double-counts overlapping strokes;
//!   kept so the pipeline degrades instead of failing on geometry the
//!   rasterizer cannot digest.

use std::collections::HashSet;

use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::region_labelling::{connected_components, Connectivity};
use kurbo::{Point, Rect};

use crate::config::CoverageMethod;
use crate::geom::signed_area;
use crate::stroke::Stroke;

/// A coverage metric strategy.
pub trait CoverageEstimator {
    /// Fraction of the polygon's filled area covered by the strokes,
    /// in [0, 1].
    fn estimate(&self, polygon: &[Point], strokes: &[Stroke]) -> f64;
}

/// Dispatch on the configured method.
pub fn estimate_coverage(polygon: &[Point], strokes: &[Stroke], method: CoverageMethod) -> f64 {
    match method {
        CoverageMethod::Raster { resolution, padding } => {
            RasterCoverage { resolution, padding }.estimate(polygon, strokes)
        }
        CoverageMethod::Analytic => AnalyticCoverage.estimate(polygon, strokes),
    }
}

/// Pixel-counting estimate on a `resolution`² grid.
pub struct RasterCoverage {
    pub resolution: u32,
    pub padding: f64,
}

/// Σ(length × mean width) vs. shoelace area.
pub struct AnalyticCoverage;

impl CoverageEstimator for AnalyticCoverage {
    fn estimate(&self, polygon: &[Point], strokes: &[Stroke]) -> f64 {
        let polygon_area = signed_area(polygon).abs();
        if polygon_area == 0.0 {
            return 0.0;
        }
        let stroke_area: f64 = strokes.iter().map(|s| s.length() * s.mean_width()).sum();
        (stroke_area / polygon_area).min(1.0)
    }
}

impl CoverageEstimator for RasterCoverage {
    fn estimate(&self, polygon: &[Point], strokes: &[Stroke]) -> f64 {
        let Some(transform) = RasterTransform::fit(polygon, self.resolution, self.padding) else {
            // Unrasterizable polygon: degrade to the analytic estimate.
            return AnalyticCoverage.estimate(polygon, strokes);
        };

        let res = self.resolution;
        let mut poly_mask = GrayImage::new(res, res);
        if !rasterize_polygon(&mut poly_mask, polygon, &transform) {
            return AnalyticCoverage.estimate(polygon, strokes);
        }
        fill_holes(&mut poly_mask);
        let poly_area = count_on(&poly_mask);
        if poly_area == 0 {
            return 0.0;
        }

        let mut union_mask = GrayImage::new(res, res);
        let mut scratch = GrayImage::new(res, res);
        for stroke in strokes {
            for p in scratch.pixels_mut() {
                p.0[0] = 0;
            }
            if !rasterize_polygon(&mut scratch, &stroke.closed_outline(), &transform) {
                continue;
            }
            fill_holes(&mut scratch);
            for (u, s) in union_mask.pixels_mut().zip(scratch.pixels()) {
                u.0[0] |= s.0[0];
            }
        }
        let stroke_area = count_on(&union_mask);

        (stroke_area as f64 / poly_area as f64).min(1.0)
    }
}

/// Uniform polygon-space → raster-space mapping.
struct RasterTransform {
    origin: Point,
    scale: f64,
    max_coord: i32,
}

impl RasterTransform {
    /// Fit the polygon's bounding box (plus padding on each side) into a
    /// square grid. `None` when the polygon has no spatial extent.
    fn fit(polygon: &[Point], resolution: u32, padding: f64) -> Option<Self> {
        if polygon.len() < 3 || resolution == 0 {
            return None;
        }
        let mut bbox = Rect::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for p in polygon {
            bbox.x0 = bbox.x0.min(p.x);
            bbox.y0 = bbox.y0.min(p.y);
            bbox.x1 = bbox.x1.max(p.x);
            bbox.y1 = bbox.y1.max(p.y);
        }
        let span = bbox.width().max(bbox.height());
        if !(span > 0.0) {
            return None;
        }
        let scale = resolution as f64 / (span * (1.0 + 2.0 * padding));
        Some(Self {
            origin: Point::new(bbox.x0 - padding * span, bbox.y0 - padding * span),
            scale,
            max_coord: resolution as i32 - 1,
        })
    }

    fn map(&self, p: Point) -> imageproc::point::Point<i32> {
        let x = ((p.x - self.origin.x) * self.scale).round() as i32;
        let y = ((p.y - self.origin.y) * self.scale).round() as i32;
        imageproc::point::Point::new(x.clamp(0, self.max_coord), y.clamp(0, self.max_coord))
    }
}

/// Scan-convert a filled polygon into the mask. Returns false when the
/// mapped vertices collapse below a drawable polygon.
fn rasterize_polygon(mask: &mut GrayImage, polygon: &[Point], transform: &RasterTransform) -> bool {
    let mut mapped: Vec<imageproc::point::Point<i32>> = Vec::with_capacity(polygon.len());
    for &p in polygon {
        let q = transform.map(p);
        if mapped.last() != Some(&q) {
            mapped.push(q);
        }
    }
    // draw_polygon_mut closes the polygon itself and rejects an explicit
    // duplicate of the first point at the end.
    while mapped.len() > 1 && mapped.last() == mapped.first() {
        mapped.pop();
    }
    if mapped.len() < 3 {
        return false;
    }
    draw_polygon_mut(mask, &mapped, Luma([255u8]));
    true
}

/// Fill enclosed background regions: any off-pixel component that never
/// touches the raster border is a hole inside the shape.
fn fill_holes(mask: &mut GrayImage) {
    let labels = connected_components(mask, Connectivity::Four, Luma([255u8]));
    let (w, h) = mask.dimensions();
    if w == 0 || h == 0 {
        return;
    }

    let mut outside: HashSet<u32> = HashSet::new();
    for x in 0..w {
        for y in [0, h - 1] {
            let l = labels.get_pixel(x, y)[0];
            if l != 0 {
                outside.insert(l);
            }
        }
    }
    for y in 0..h {
        for x in [0, w - 1] {
            let l = labels.get_pixel(x, y)[0];
            if l != 0 {
                outside.insert(l);
            }
        }
    }

    for (x, y, pixel) in labels.enumerate_pixels() {
        let l = pixel[0];
        if l != 0 && !outside.contains(&l) {
            mask.put_pixel(x, y, Luma([255u8]));
        }
    }
}

fn count_on(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p.0[0] != 0).count() as u64
}
