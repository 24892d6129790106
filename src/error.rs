use thiserror::Error;

/// Contract violations when building a [`crate::MedialAxisGraph`].
///
/// Stroke recovery itself never fails for a structurally valid graph —
/// degenerate geometry falls back to "no stroke" or the analytic coverage
/// estimate. The only loud failure is handing the graph an edge whose
/// endpoint was never added.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphError {
    #[error("edge references unknown vertex {0}")]
    MissingVertex(u32),
}
