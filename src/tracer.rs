//! Stroke path tracing.
//!
//! From every terminal node, each unvisited incident edge seeds one trace
//! that follows degree-2 chains until the next terminal node. Edges are
//! consumed as they are walked, so the undirected edge set is partitioned
//! across strokes with no duplication. Dense junction clusters can leave a
//! few edges unconsumed when the significance filter demoted all their
//! vertices; that is accepted output, not a fault.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::warn;

use crate::graph::{JunctionType, MedialAxisGraph};
use crate::stroke::Stroke;

/// Visited-edge state for one recovery run.
///
/// Owns the set of consumed undirected edges and is threaded explicitly
/// through every [`trace`] call, so the "each edge used once" invariant
/// lives in one place instead of hidden shared state.
#[derive(Debug, Default)]
pub struct TracingSession {
    visited: HashSet<(u32, u32)>,
}

impl TracingSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: u32, b: u32) -> (u32, u32) {
        (a.min(b), a.max(b))
    }

    pub fn is_visited(&self, a: u32, b: u32) -> bool {
        self.visited.contains(&Self::key(a, b))
    }

    pub fn visit(&mut self, a: u32, b: u32) {
        self.visited.insert(Self::key(a, b));
    }

    /// Number of consumed undirected edges.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// How a trace ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Reached a terminal node (or returned to the start vertex).
    Terminal,
    /// No unvisited onward edge remained. The partial path is still a
    /// valid stroke.
    DeadEnd,
    /// More than one unvisited onward edge at a non-terminal vertex —
    /// the significance filter under-counted there. The trace stops
    /// rather than guessing a direction.
    Branching,
}

/// Result of one trace: the vertex path and how it ended.
#[derive(Debug, Clone)]
pub struct TracedPath {
    pub vertices: Vec<u32>,
    pub termination: Termination,
}

/// Trace one path starting along the edge (start, next).
///
/// Marks edges visited as it consumes them. Advances through degree-2
/// continuations (including demoted high-degree vertices with exactly one
/// unvisited onward edge) until a terminal node, the start vertex (trivial
/// self-loop guard), a dead end, or an ambiguous branching.
pub fn trace(
    graph: &MedialAxisGraph,
    start: u32,
    next: u32,
    terminals: &BTreeSet<u32>,
    session: &mut TracingSession,
) -> TracedPath {
    session.visit(start, next);
    let mut vertices = vec![start, next];
    let mut prev = start;
    let mut cur = next;
    let mut termination = Termination::Terminal;

    while !terminals.contains(&cur) && cur != start {
        let onward: Vec<u32> = graph
            .neighbors(cur)
            .iter()
            .copied()
            .filter(|&v| v != prev && !session.is_visited(cur, v))
            .collect();
        match onward[..] {
            [] => {
                termination = Termination::DeadEnd;
                break;
            }
            [only] => {
                session.visit(cur, only);
                vertices.push(only);
                prev = cur;
                cur = only;
            }
            _ => {
                termination = Termination::Branching;
                break;
            }
        }
    }

    TracedPath {
        vertices,
        termination,
    }
}

/// Top-level tracing driver: one stroke per unvisited edge incident to a
/// terminal node.
///
/// Terminal nodes are walked in ascending id order and their neighbor
/// lists in insertion order, so stroke ids are deterministic. Paths
/// shorter than 2 vertices are discarded. Junction types are annotated
/// from the upstream classifier at the two path ends when present.
pub fn trace_strokes(
    graph: &MedialAxisGraph,
    junctions: &BTreeMap<u32, JunctionType>,
    terminals: &BTreeSet<u32>,
) -> Vec<Stroke> {
    let mut session = TracingSession::new();
    let mut strokes: Vec<Stroke> = Vec::new();

    for &start in terminals {
        for &next in graph.neighbors(start) {
            if session.is_visited(start, next) {
                continue;
            }
            let path = trace(graph, start, next, terminals, &mut session);
            if path.termination == Termination::Branching {
                warn!(
                    "trace from vertex {start} stopped at ambiguous branching after {} vertices",
                    path.vertices.len()
                );
            }
            // `trace` currently always returns at least [start, next];
            // this guards the <2-vertex contract, not a reachable case.
            if path.vertices.len() < 2 {
                continue;
            }

            let mut spine = Vec::with_capacity(path.vertices.len());
            let mut widths = Vec::with_capacity(path.vertices.len());
            for &v in &path.vertices {
                if let (Some(pos), Some(radius)) = (graph.position(v), graph.radius(v)) {
                    spine.push(pos);
                    widths.push(radius.max(0.0));
                }
            }

            let first = path.vertices[0];
            let last = *path.vertices.last().unwrap_or(&first);
            strokes.push(Stroke {
                id: strokes.len(),
                spine,
                widths,
                start_junction: junctions.get(&first).copied(),
                end_junction: junctions.get(&last).copied(),
                overlapping: BTreeSet::new(),
            });
        }
    }

    strokes
}
