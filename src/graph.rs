//! Medial-axis graph and junction input model.
//!
//! The graph is produced upstream (skeletonization of the glyph outline)
//! and consumed read-only by stroke recovery. It is an undirected simple
//! graph: duplicate edges and self-loops are dropped at insertion time so
//! the tracer never has to special-case them.

use std::collections::BTreeMap;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// One skeleton vertex: position plus the local radius of the maximal
/// inscribed circle (half the glyph width at that point).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MedialVertex {
    pub pos: Point,
    pub radius: f64,
}

/// Junction classification from the upstream detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JunctionType {
    /// One stroke ends against the side of another.
    T,
    /// Three strokes fan out from a common point.
    Y,
    /// Two strokes cross.
    X,
    /// A stroke terminal (serif or flat cap).
    Cap,
}

/// A classified junction: which vertex it sits on and what kind it is.
///
/// Entries whose `vertex` id is absent from the graph are harmless; they
/// simply never match during endpoint annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub vertex: u32,
    pub kind: JunctionType,
    pub pos: Point,
}

/// Undirected medial-axis graph: vertex id → (position, radius) plus
/// adjacency lists.
///
/// Vertices are kept in a `BTreeMap` so every iteration over the graph is
/// in ascending id order — stroke recovery must be deterministic, and the
/// vertex order leaks into stroke ids.
#[derive(Debug, Clone, Default)]
pub struct MedialAxisGraph {
    vertices: BTreeMap<u32, MedialVertex>,
    adjacency: BTreeMap<u32, Vec<u32>>,
}

impl MedialAxisGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) a vertex.
    pub fn add_vertex(&mut self, id: u32, pos: Point, radius: f64) {
        self.vertices.insert(id, MedialVertex { pos, radius });
        self.adjacency.entry(id).or_default();
    }

    /// Insert an undirected edge between two existing vertices.
    ///
    /// Self-loops and duplicate edges are silently dropped (skeletonizers
    /// occasionally emit both). Referencing a vertex that was never added
    /// is a caller contract violation and fails loudly.
    pub fn add_edge(&mut self, a: u32, b: u32) -> Result<(), GraphError> {
        if !self.vertices.contains_key(&a) {
            return Err(GraphError::MissingVertex(a));
        }
        if !self.vertices.contains_key(&b) {
            return Err(GraphError::MissingVertex(b));
        }
        if a == b {
            return Ok(());
        }
        let fwd = self.adjacency.entry(a).or_default();
        if fwd.contains(&b) {
            return Ok(());
        }
        fwd.push(b);
        self.adjacency.entry(b).or_default().push(a);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertices.keys().copied()
    }

    /// Neighbors of `id` in insertion order (empty for unknown ids).
    pub fn neighbors(&self, id: u32) -> &[u32] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn degree(&self, id: u32) -> usize {
        self.neighbors(id).len()
    }

    pub fn position(&self, id: u32) -> Option<Point> {
        self.vertices.get(&id).map(|v| v.pos)
    }

    pub fn radius(&self, id: u32) -> Option<f64> {
        self.vertices.get(&id).map(|v| v.radius)
    }

    /// All undirected edges as (low id, high id) pairs, ascending.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&a, nbrs)| nbrs.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| a < b)
    }

    /// Euclidean length of the edge (a, b). Zero for unknown vertices.
    pub fn edge_length(&self, a: u32, b: u32) -> f64 {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => pa.distance(pb),
            _ => 0.0,
        }
    }
}

/// Lookup table from vertex id to junction type, built once per recovery
/// run from the externally supplied junction list.
pub(crate) fn junction_index(junctions: &[Junction]) -> BTreeMap<u32, JunctionType> {
    junctions.iter().map(|j| (j.vertex, j.kind)).collect()
}
