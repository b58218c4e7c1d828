/*!
# Shortest-Path Oracle

On-demand single-pair shortest-path length and node sequence between two
coordinates, resolved to the nearest *node* (not edge) on each side (a
deliberate simplification: tour cost is measured node-to-node, treating
snap offsets as negligible). Wraps [`crate::core::paths::dijkstra_path_impl`].
*/

use crate::core::paths::dijkstra_path_impl;
use crate::core::types::NodeId;
use crate::geometry::Coordinate;
use crate::graph::{EdgeAttrs, RoadGraph};

/// The result of a single shortest-path query.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Length in meters, or `f64::INFINITY` if no path exists.
    pub length_m: f64,
    /// The node sequence from source to target. When no path exists this
    /// is the straight-line `[source, target]` fallback, for use only by
    /// the Path Materializer, never by the Cost Matrix Builder.
    pub nodes: Vec<NodeId>,
}

/// Computes the shortest path between the graph nodes nearest to `source`
/// and `target`.
///
/// If both coordinates resolve to the same node, returns length 0 and a
/// single-node sequence. If the graph has no path between them, returns
/// `length_m = f64::INFINITY` and the two resolved nodes as a straight-line
/// fallback sequence.
pub fn shortest_path(graph: &RoadGraph, source: Coordinate, target: Coordinate) -> PathResult {
    let source_node = graph
        .nearest_node(source)
        .expect("shortest_path requires a non-empty graph");
    let target_node = graph
        .nearest_node(target)
        .expect("shortest_path requires a non-empty graph");

    if source_node == target_node {
        return PathResult {
            length_m: 0.0,
            nodes: vec![source_node],
        };
    }

    let (dist, trace) = dijkstra_path_impl(graph.inner(), source_node, |attrs: &EdgeAttrs| {
        Some(attrs.length)
    })
    .expect("edge lengths are always non-negative finite values");

    match dist.get(&target_node).copied().flatten() {
        Some(length_m) => {
            let mut nodes = vec![target_node];
            let mut current = target_node;
            while current != source_node {
                let prev = trace[&current].expect("predecessor chain must reach source");
                nodes.push(prev);
                current = prev;
            }
            nodes.reverse();
            PathResult { length_m, nodes }
        }
        None => PathResult {
            length_m: f64::INFINITY,
            nodes: vec![source_node, target_node],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> (RoadGraph, Coordinate, Coordinate, Coordinate) {
        let mut g = RoadGraph::new();
        let c0 = Coordinate::new(-74.05, 0.0);
        let c1 = Coordinate::new(-74.04, 0.0);
        let c2 = Coordinate::new(-74.02, 0.0);
        let a = g.add_node(c0);
        let b = g.add_node(c1);
        let c = g.add_node(c2);
        g.add_edge(a, b, 100.0, None);
        g.add_edge(b, a, 100.0, None);
        g.add_edge(b, c, 350.0, None);
        g.add_edge(c, b, 350.0, None);
        (g, c0, c1, c2)
    }

    #[test]
    fn same_node_round_trip_is_zero_length() {
        let (g, c0, _, _) = chain_graph();
        let result = shortest_path(&g, c0, c0);
        assert_eq!(result.length_m, 0.0);
        assert_eq!(result.nodes.len(), 1);
    }

    #[test]
    fn finds_shortest_path_through_an_intermediate_node() {
        let (g, c0, _, c2) = chain_graph();
        let result = shortest_path(&g, c0, c2);
        assert_eq!(result.length_m, 450.0);
        assert_eq!(result.nodes.len(), 3);
    }

    #[test]
    fn unreachable_target_falls_back_to_straight_line() {
        let mut g = RoadGraph::new();
        let a = g.add_node(Coordinate::new(0.0, 0.0));
        let b = g.add_node(Coordinate::new(10.0, 10.0));
        let result = shortest_path(&g, Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0));
        assert_eq!(result.length_m, f64::INFINITY);
        assert_eq!(result.nodes, vec![a, b]);
    }
}
