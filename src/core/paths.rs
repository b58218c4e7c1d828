/*!
# Dijkstra's Algorithm

The only shortest-path primitive the crate needs: a generic Dijkstra over
a `BaseGraph` with nonnegative edge costs, parameterized by a cost-eval
closure so a single implementation serves both the Road Graph (whose edge
weight is an `EdgeAttrs` struct, not a bare `f64`) and any future
all-`f64`-weighted graph.
*/

use crate::core::error::TourError;
use crate::core::types::{BaseGraph, GraphConstructor, NodeId, NodeMap};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use ordered_float::NotNan;

/// `(distance, predecessor)` maps produced by [`dijkstra_path_impl`], keyed by node.
pub type PathFindResult = (NodeMap<Option<f64>>, NodeMap<Option<NodeId>>);

/// Full Dijkstra implementation over a graph with arbitrary edge weights,
/// given a callback that evaluates the traversal cost of an edge.
///
/// # Arguments
///
/// * `graph`: the target graph.
/// * `source`: the source node.
/// * `eval_cost`: maps an edge weight to `Some(cost)`, or `None` if the
///   edge is not passable.
///
/// # Returns
///
/// A map from every node to `Some(cost)` if reachable or `None` otherwise,
/// and a predecessor map for path reconstruction.
///
/// # Errors
///
/// Returns an error if a negative or NaN cost is encountered.
///
/// # Complexity
///
/// Time: O(E log V). Space: O(V).
pub fn dijkstra_path_impl<A, W, Ty>(
    graph: &BaseGraph<A, W, Ty>,
    source: NodeId,
    eval_cost: impl Fn(&W) -> Option<f64>,
) -> Result<PathFindResult, TourError>
where
    Ty: GraphConstructor<A, W>,
{
    let mut dist: NodeMap<Option<f64>> = graph.to_nodemap_default();
    let mut trace: NodeMap<Option<NodeId>> = graph.to_nodemap_default();
    let mut heap = BinaryHeap::new();

    dist.insert(source, Some(0.0));
    heap.push(Reverse((NotNan::new(0.0).unwrap(), source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if let Some(Some(current)) = dist.get(&u) {
            if *d > *current {
                continue;
            }
        }
        for (v, edge) in graph.outgoing_edges(u) {
            let Some(w) = eval_cost(edge) else {
                continue;
            };
            if w.is_sign_negative() {
                return Err(TourError::internal(format!(
                    "dijkstra requires nonnegative costs, found {:?} on edge {:?} -> {:?}",
                    w, u, v
                )));
            }
            let Ok(w) = NotNan::new(w) else {
                return Err(TourError::internal(format!(
                    "dijkstra requires non-NaN costs, found {:?} on edge {:?} -> {:?}",
                    w, u, v
                )));
            };
            let next = d + w;
            let better = match dist.get(&v) {
                Some(Some(current)) => *next < *current,
                _ => true,
            };
            if better {
                dist.insert(v, Some(*next));
                trace.insert(v, Some(u));
                heap.push(Reverse((next, v)));
            }
        }
    }
    Ok((dist, trace))
}
