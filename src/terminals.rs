//! Terminal-node classification.
//!
//! Decides which graph vertices are valid stroke start/end points, from
//! topology alone — the upstream junction list is never consulted here.
//! Skeletons of rasterized outlines sprout tiny spurious branches near
//! true junctions; counting those would turn ordinary curve points into
//! false junctions, so a degree≥3 vertex only becomes terminal when at
//! least three of its branches are geometrically significant.

use std::collections::BTreeSet;

use crate::config::RecoveryConfig;
use crate::graph::MedialAxisGraph;

/// Median Euclidean edge length of the graph (0.0 when edgeless).
pub fn median_edge_length(graph: &MedialAxisGraph) -> f64 {
    let mut lengths: Vec<f64> = graph
        .edges()
        .map(|(a, b)| graph.edge_length(a, b))
        .collect();
    if lengths.is_empty() {
        return 0.0;
    }
    lengths.sort_by(|a, b| a.total_cmp(b));
    let n = lengths.len();
    if n % 2 == 1 {
        lengths[n / 2]
    } else {
        (lengths[n / 2 - 1] + lengths[n / 2]) / 2.0
    }
}

/// Count the geometrically significant branches of a degree≥3 vertex.
///
/// For each neighbor, walk forward through the chain of degree-2 vertices,
/// accumulating arc length, until a vertex of degree ≠ 2. The branch is
/// significant if it ends at a true endpoint (degree 1) or its length
/// reaches `max(base_min_length, radius(n) × radius_factor)` — the local
/// radius widens the bar near thick strokes, where branch geometry is
/// naturally longer.
pub fn significant_branches(
    graph: &MedialAxisGraph,
    n: u32,
    base_min_length: f64,
    radius_factor: f64,
) -> usize {
    let min_length = base_min_length.max(graph.radius(n).unwrap_or(0.0) * radius_factor);
    graph
        .neighbors(n)
        .iter()
        .filter(|&&first| {
            let (end, length) = walk_branch(graph, n, first);
            graph.degree(end) == 1 || length >= min_length
        })
        .count()
}

/// Follow the degree-2 chain starting with edge (from, first).
///
/// Returns the terminating vertex (first one of degree ≠ 2) and the
/// accumulated arc length. Bounded by the vertex count; a chain that
/// loops back always re-reaches a degree≠2 vertex (`from` itself at
/// worst).
fn walk_branch(graph: &MedialAxisGraph, from: u32, first: u32) -> (u32, f64) {
    let mut length = graph.edge_length(from, first);
    let mut prev = from;
    let mut cur = first;
    for _ in 0..graph.vertex_count() {
        if graph.degree(cur) != 2 {
            break;
        }
        let Some(&next) = graph.neighbors(cur).iter().find(|&&v| v != prev) else {
            break;
        };
        length += graph.edge_length(cur, next);
        prev = cur;
        cur = next;
    }
    (cur, length)
}

/// Classify the terminal nodes of a medial-axis graph.
///
/// Degree-1 vertices are always terminal. Degree≥3 vertices are terminal
/// only with ≥3 significant branches (see [`significant_branches`]);
/// otherwise the tracer passes through them as if they were degree 2.
/// A non-empty graph with no terminals (a closed loop) is seeded with its
/// smallest connected vertex id so tracing still has somewhere to start.
pub fn terminal_nodes(graph: &MedialAxisGraph, config: &RecoveryConfig) -> BTreeSet<u32> {
    let median = median_edge_length(graph);
    let base_min_length = if median > 0.0 {
        config.branch_length_factor * median
    } else {
        1.0
    };

    let mut terminals = BTreeSet::new();
    for id in graph.vertex_ids() {
        let degree = graph.degree(id);
        if degree == 1 {
            terminals.insert(id);
        } else if degree >= 3
            && significant_branches(graph, id, base_min_length, config.branch_radius_factor) >= 3
        {
            terminals.insert(id);
        }
    }

    if terminals.is_empty() {
        // Prefer a connected vertex: seeding an isolated one would leave
        // a coexisting loop untraced.
        let seed = graph
            .vertex_ids()
            .find(|&id| graph.degree(id) > 0)
            .or_else(|| graph.vertex_ids().next());
        if let Some(seed) = seed {
            terminals.insert(seed);
        }
    }
    terminals
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn cfg() -> RecoveryConfig {
        RecoveryConfig::default()
    }

    /// Horizontal chain of `n` unit-spaced vertices with ids from `base`.
    fn add_chain(g: &mut MedialAxisGraph, base: u32, n: u32, y: f64) {
        for i in 0..n {
            g.add_vertex(base + i, Point::new(i as f64, y), 1.0);
        }
        for i in 0..n - 1 {
            g.add_edge(base + i, base + i + 1).unwrap();
        }
    }

    /// Plus-shaped graph: four arms of `arm` unit edges around vertex 0.
    fn cross(arm: u32) -> MedialAxisGraph {
        let mut g = MedialAxisGraph::new();
        g.add_vertex(0, Point::ZERO, 1.0);
        let dirs = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];
        let mut id = 1;
        for (dx, dy) in dirs {
            let mut prev = 0;
            for step in 1..=arm {
                g.add_vertex(id, Point::new(dx * step as f64, dy * step as f64), 1.0);
                g.add_edge(prev, id).unwrap();
                prev = id;
                id += 1;
            }
        }
        g
    }

    #[test]
    fn median_of_unit_chain() {
        let mut g = MedialAxisGraph::new();
        add_chain(&mut g, 0, 5, 0.0);
        assert!((median_edge_length(&g) - 1.0).abs() < 1e-12);
        assert_eq!(median_edge_length(&MedialAxisGraph::new()), 0.0);
    }

    #[test]
    fn chain_endpoints_are_terminal() {
        let mut g = MedialAxisGraph::new();
        add_chain(&mut g, 0, 5, 0.0);
        let t = terminal_nodes(&g, &cfg());
        assert_eq!(t.into_iter().collect::<Vec<_>>(), vec![0, 4]);
    }

    #[test]
    fn cross_center_is_terminal() {
        let g = cross(4);
        let t = terminal_nodes(&g, &cfg());
        assert!(t.contains(&0));
        // Four arm tips plus the center.
        assert_eq!(t.len(), 5);
        assert_eq!(significant_branches(&g, 0, 3.0, 2.0), 4);
    }

    #[test]
    fn short_spur_does_not_create_a_junction() {
        // Long horizontal chain with a tiny triangle bump between
        // vertices 4 and 5. The bump branches terminate quickly at a
        // degree-3 vertex (not an endpoint), far below the length bar,
        // so neither bump vertex becomes a junction.
        let mut g = MedialAxisGraph::new();
        add_chain(&mut g, 0, 9, 0.0);
        g.add_vertex(100, Point::new(4.3, 0.1), 1.0);
        g.add_edge(4, 100).unwrap();
        g.add_edge(100, 5).unwrap();
        // Vertex 4 has degree 3. Toward vertex 3 the walk reaches the
        // degree-1 endpoint 0, so that branch counts. Toward 5 and via
        // the bump vertex 100 both walks stop at degree-3 vertex 5 after
        // ~1 unit of length, far below base_min_length = 3.0: only one
        // significant branch.
        assert_eq!(significant_branches(&g, 4, 3.0, 2.0), 1);
        let t = terminal_nodes(&g, &cfg());
        assert!(!t.contains(&4));
        assert!(!t.contains(&5));
        assert_eq!(t.into_iter().collect::<Vec<_>>(), vec![0, 8]);
    }

    #[test]
    fn closed_loop_falls_back_to_one_seed() {
        let mut g = MedialAxisGraph::new();
        for i in 0..8u32 {
            let a = std::f64::consts::TAU * i as f64 / 8.0;
            g.add_vertex(i, Point::new(a.cos() * 10.0, a.sin() * 10.0), 2.0);
        }
        for i in 0..8u32 {
            g.add_edge(i, (i + 1) % 8).unwrap();
        }
        let t = terminal_nodes(&g, &cfg());
        assert_eq!(t.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn loop_seed_skips_isolated_vertices() {
        // An isolated vertex with the smallest id must not win the
        // no-terminals fallback over a coexisting closed loop.
        let mut g = MedialAxisGraph::new();
        g.add_vertex(0, Point::new(100.0, 100.0), 1.0);
        for i in 1..=8u32 {
            let a = std::f64::consts::TAU * i as f64 / 8.0;
            g.add_vertex(i, Point::new(a.cos() * 10.0, a.sin() * 10.0), 2.0);
        }
        for i in 1..=8u32 {
            g.add_edge(i, i % 8 + 1).unwrap();
        }
        let t = terminal_nodes(&g, &cfg());
        assert_eq!(t.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn empty_graph_has_no_terminals() {
        assert!(terminal_nodes(&MedialAxisGraph::new(), &cfg()).is_empty());
    }

    #[test]
    fn large_radius_raises_the_bar() {
        // Arms of length 4 clear base_min_length = 3 but not the
        // radius-widened bar once the center radius is large. Endpoint
        // branches still count, so use arms joined into a ring to remove
        // the degree-1 escape hatch.
        let mut g = cross(4);
        // Re-add the center with a huge radius.
        g.add_vertex(0, Point::ZERO, 50.0);
        // Connect the four arm tips (ids 4, 8, 12, 16) into a square so
        // no branch ends at a degree-1 vertex.
        g.add_edge(4, 12).unwrap();
        g.add_edge(12, 8).unwrap();
        g.add_edge(8, 16).unwrap();
        g.add_edge(16, 4).unwrap();
        // Each branch walk from the center runs 4 units to an arm tip of
        // degree 3: below 50 × 2.0.
        assert_eq!(significant_branches(&g, 0, 3.0, 2.0), 0);
    }
}
