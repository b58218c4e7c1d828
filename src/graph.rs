/*!
# Road Graph

A directed multigraph over integer node identifiers: the substrate every
other module builds on. Node attributes are geographic [`Coordinate`]s;
edge attributes are [`EdgeAttrs`] (length in meters, plus an optional
geometry for curved roads). The graph is read-only once built: nothing
here mutates a `RoadGraph` after [`RoadGraph::add_edge`] calls finish, by
convention of the adapters that build one (see [`crate::osm`]).

Node ids are remapped to contiguous indices at construction time
(Design Notes, spec §9) by virtue of wrapping `petgraph`'s `StableGraph`,
whose `NodeIndex`es are exactly that.
*/

use crate::core::types::{Digraph, EdgeId, NodeId};
use crate::geometry::Coordinate;
use std::collections::HashMap;

/// Attributes carried by a single directed edge.
#[derive(Debug, Clone)]
pub struct EdgeAttrs {
    /// Length in meters. Always non-negative.
    pub length: f64,
    /// Polyline from `u` to `v`, if the road curves. `None` means "assume
    /// the straight segment between the endpoint coordinates".
    pub geometry: Option<Vec<Coordinate>>,
    /// Disambiguates parallel edges between the same `(u, v)` pair.
    pub key: u32,
}

/// A directed multigraph of a street network.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    inner: Digraph<Coordinate, EdgeAttrs>,
    /// Tracks the next unused `key` for each `(u, v)` pair so parallel
    /// edges get distinct keys in insertion order.
    next_key: HashMap<(NodeId, NodeId), u32>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            inner: Digraph::with_capacity(nodes, edges),
            next_key: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The underlying generic graph, for callers (the Shortest-Path Oracle)
    /// that need to run algorithms from `core` directly.
    pub(crate) fn inner(&self) -> &Digraph<Coordinate, EdgeAttrs> {
        &self.inner
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Adds a node at the given coordinate, returning its id.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeId {
        self.inner.add_node(coord)
    }

    /// Adds a directed edge from `u` to `v` with the given length and
    /// optional curved geometry. Returns the assigned `(edge id, key)`.
    pub fn add_edge(
        &mut self,
        u: NodeId,
        v: NodeId,
        length: f64,
        geometry: Option<Vec<Coordinate>>,
    ) -> (EdgeId, u32) {
        debug_assert!(length >= 0.0, "edge length must be non-negative");
        let key = *self.next_key.entry((u, v)).and_modify(|k| *k += 1).or_insert(0);
        let edge_id = self.inner.add_edge(
            u,
            v,
            EdgeAttrs {
                length,
                geometry,
                key,
            },
        );
        (edge_id, key)
    }

    /// Coordinate of a node, if it exists.
    pub fn node_coordinate(&self, node: NodeId) -> Option<Coordinate> {
        self.inner.node_attr(node).copied()
    }

    /// Attributes of an edge, if it exists.
    pub fn edge_attrs(&self, edge: EdgeId) -> Option<&EdgeAttrs> {
        self.inner.edge_weight(edge)
    }

    /// All nodes as `(id, coordinate)`, in the underlying container's order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Coordinate)> + '_ {
        self.inner.nodes().map(|(id, coord)| (id, *coord))
    }

    /// All edges as `(u, v, edge id, attrs)`, in the underlying container's
    /// order. Use [`RoadGraph::edges_sorted`] when a deterministic,
    /// container-independent order is required (e.g. the Point Snapper's
    /// tie-breaking rule).
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, EdgeId, &EdgeAttrs)> + '_ {
        self.inner.edges().map(|(u, v, attrs)| {
            let edge_id = self
                .inner
                .find_edge(u, v)
                .expect("edge just yielded by iteration must be findable");
            (u, v, edge_id, attrs)
        })
    }

    /// All edges sorted by `(u, v, key)`, for algorithms that must see a
    /// deterministic order regardless of how the graph was built.
    pub fn edges_sorted(&self) -> Vec<(NodeId, NodeId, &EdgeAttrs)> {
        let mut edges: Vec<(NodeId, NodeId, &EdgeAttrs)> = self
            .inner
            .edges()
            .map(|(u, v, attrs)| (u, v, attrs))
            .collect();
        edges.sort_by_key(|(u, v, attrs)| (u.index(), v.index(), attrs.key));
        edges
    }

    /// Resolves a coordinate to the id of the nearest node by Euclidean
    /// degree-space distance. Used by the Shortest-Path Oracle, which
    /// measures node-to-node rather than from the exact snapped location
    /// (spec §4.3, Open Question in §9).
    pub fn nearest_node(&self, coord: Coordinate) -> Option<NodeId> {
        self.nodes()
            .map(|(id, node_coord)| (id, coord.degree_distance(&node_coord)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(id, _)| id)
    }

    /// The straight-segment or curved geometry of an edge, from its own
    /// node coordinates if no explicit geometry was recorded.
    pub fn edge_geometry(&self, u: NodeId, v: NodeId, attrs: &EdgeAttrs) -> Vec<Coordinate> {
        if let Some(geom) = &attrs.geometry {
            geom.clone()
        } else {
            let cu = self.node_coordinate(u).expect("edge endpoint must exist");
            let cv = self.node_coordinate(v).expect("edge endpoint must exist");
            vec![cu, cv]
        }
    }
}
