//! skel2stroke: medial-axis skeleton → calligraphic strokes.
//!
//! Reconstructs a minimal set of pen strokes (centerline + width profile)
//! that together approximate a glyph's filled outline, starting from the
//! glyph's medial-axis graph and an upstream junction classification.
//!
//! # Example
//!
//! ```
//! use kurbo::Point;
//! use skel2stroke::{recover, MedialAxisGraph, RecoveryConfig};
//!
//! // A bare vertical bar: five skeleton vertices in a chain.
//! let mut graph = MedialAxisGraph::new();
//! for i in 0..5u32 {
//!     graph.add_vertex(i, Point::new(0.0, i as f64 * 10.0), 3.0);
//! }
//! for i in 0..4u32 {
//!     graph.add_edge(i, i + 1)?;
//! }
//! let polygon = vec![
//!     Point::new(-3.0, 0.0),
//!     Point::new(3.0, 0.0),
//!     Point::new(3.0, 40.0),
//!     Point::new(-3.0, 40.0),
//! ];
//!
//! let result = recover("I", &graph, &[], &polygon, &RecoveryConfig::default());
//! assert_eq!(result.strokes.len(), 1);
//! # Ok::<(), skel2stroke::GraphError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod stroke;

pub mod coverage;
pub mod error;
pub mod geom;
pub mod graph;
pub mod overlap;
pub mod terminals;
pub mod tracer;

// Re-export kurbo so downstream users get the same version used by
// Stroke.spine (Vec<kurbo::Point>).
pub use kurbo;

pub use config::{CoverageMethod, RecoveryConfig};
pub use error::GraphError;
pub use graph::{Junction, JunctionType, MedialAxisGraph, MedialVertex};
pub use stroke::{Stroke, StrokeDecomposition};

use kurbo::Point;
use log::debug;

/// Full pipeline: medial-axis graph → stroke decomposition.
///
/// Stages: terminal-node classification, path tracing, overlap detection,
/// coverage estimation, assembly. Never fails for a structurally valid
/// graph — an empty graph yields an empty stroke list and coverage 0.0,
/// and degenerate geometry degrades to cheaper estimates instead of
/// erroring.
pub fn recover(
    glyph_name: &str,
    graph: &MedialAxisGraph,
    junctions: &[Junction],
    polygon: &[Point],
    config: &RecoveryConfig,
) -> StrokeDecomposition {
    if graph.is_empty() {
        return StrokeDecomposition {
            glyph_name: glyph_name.to_string(),
            strokes: Vec::new(),
            coverage: 0.0,
        };
    }

    // ── Terminal nodes ────────────────────────────────────
    let terminals = terminals::terminal_nodes(graph, config);
    debug!(
        "{glyph_name}: {} vertices, {} edges, {} terminal nodes",
        graph.vertex_count(),
        graph.edge_count(),
        terminals.len()
    );

    // ── Trace ─────────────────────────────────────────────
    let junction_index = graph::junction_index(junctions);
    let mut strokes = tracer::trace_strokes(graph, &junction_index, &terminals);
    debug!("{glyph_name}: traced {} strokes", strokes.len());

    // ── Post-processing ───────────────────────────────────
    if config.smooth_widths_window > 0 {
        for stroke in &mut strokes {
            stroke.smooth_widths(config.smooth_widths_window);
        }
    }

    // ── Overlaps ──────────────────────────────────────────
    overlap::compute_overlaps(&mut strokes, config.overlap_threshold, config.overlap_samples);

    // ── Coverage ──────────────────────────────────────────
    let coverage = coverage::estimate_coverage(polygon, &strokes, config.coverage);
    debug!("{glyph_name}: coverage {coverage:.3}");

    StrokeDecomposition {
        glyph_name: glyph_name.to_string(),
        strokes,
        coverage,
    }
}
