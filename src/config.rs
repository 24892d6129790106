use serde::{Deserialize, Serialize};

/// All stroke-recovery parameters in one struct.
/// Designed to be serializable (for saving presets) and
/// adjustable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    // -- Terminal classification --
    /// Branch significance threshold as a multiple of the median edge
    /// length. Branches shorter than this (and not ending at a true
    /// endpoint) are skeletonization noise near junctions.
    pub branch_length_factor: f64,
    /// Widens the significance threshold near thick strokes: a branch at
    /// junction `n` must also reach `radius(n) × branch_radius_factor`.
    pub branch_radius_factor: f64,

    // -- Overlap detection --
    /// Fraction of the (diameter-scale) mean stroke width within which two
    /// strokes count as overlapping.
    pub overlap_threshold: f64,
    /// Maximum spine samples per stroke when computing the cross-distance
    /// matrix.
    pub overlap_samples: usize,

    // -- Coverage --
    /// Which coverage estimate to compute.
    pub coverage: CoverageMethod,

    // -- Post-processing --
    /// Moving-average window for width-profile smoothing. 0 = off.
    pub smooth_widths_window: usize,
}

/// Strategy for the coverage metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum CoverageMethod {
    /// Rasterize polygon and stroke outlines onto a square grid and count
    /// pixels. Accurate, cost bounded by `resolution`².
    Raster {
        /// Grid edge length in pixels.
        resolution: u32,
        /// Extra margin around the polygon bounding box, as a fraction of
        /// its larger extent, on each side.
        padding: f64,
    },
    /// Shoelace polygon area vs. Σ(length × mean width). Cheap
    /// approximation that double-counts stroke overlaps.
    Analytic,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            branch_length_factor: 3.0,
            branch_radius_factor: 2.0,
            overlap_threshold: 0.1,
            overlap_samples: 10,
            coverage: CoverageMethod::Raster {
                resolution: 1000,
                padding: 0.1,
            },
            smooth_widths_window: 0,
        }
    }
}
