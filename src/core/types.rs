/*!
# Graph Types

This module defines the generic graph wrapper shared by every other
module in the crate. `BaseGraph` wraps a `petgraph::stable_graph::StableGraph`
and provides a uniform, opaque-id API for directed road networks (and,
incidentally, undirected graphs, though the road-graph adapter only ever
builds a `Digraph`).

# Examples

```rust
use tournet::core::types::Digraph;

let mut g = Digraph::<i32, f64>::new();
let n1 = g.add_node(10);
let n2 = g.add_node(20);
g.add_edge(n1, n2, 5.0);
assert_eq!(g.node_count(), 2);
assert_eq!(g.edge_count(), 1);
```
*/

use petgraph::EdgeType;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::StableGraph as PetGraph;
use petgraph::visit::{IntoEdgeReferences, IntoNodeReferences};
use std::collections::HashMap;

/// Marker type for directed graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Directed;

/// Marker type for undirected graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Undirected;

impl EdgeType for Directed {
    fn is_directed() -> bool {
        true
    }
}

impl EdgeType for Undirected {
    fn is_directed() -> bool {
        false
    }
}

/// Trait for constructing graphs with specific edge types.
pub trait GraphConstructor<A, W>: EdgeType + Sized {
    fn new_graph() -> PetGraph<A, W, Self>;
    fn is_directed() -> bool;
}

impl<A, W> GraphConstructor<A, W> for Directed {
    fn new_graph() -> PetGraph<A, W, Directed> {
        PetGraph::<A, W, Directed>::with_capacity(0, 0)
    }
    fn is_directed() -> bool {
        true
    }
}

impl<A, W> GraphConstructor<A, W> for Undirected {
    fn new_graph() -> PetGraph<A, W, Undirected> {
        PetGraph::<A, W, Undirected>::with_capacity(0, 0)
    }
    fn is_directed() -> bool {
        false
    }
}

/// Wrapper for `NodeIndex` that hides petgraph from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) NodeIndex);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0.index()
    }
    pub(crate) fn new(index: NodeIndex) -> Self {
        Self(index)
    }
}

/// Wrapper for `EdgeIndex` that hides petgraph from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) EdgeIndex);

impl EdgeId {
    pub fn index(&self) -> usize {
        self.0.index()
    }
    pub(crate) fn new(index: EdgeIndex) -> Self {
        Self(index)
    }
}

/// Base graph structure wrapping a petgraph `StableGraph`.
///
/// Generic parameters:
/// - `A`: Node attribute type.
/// - `W`: Edge weight/attribute type.
/// - `Ty`: `Directed` or `Undirected`.
#[derive(Debug, Clone)]
pub struct BaseGraph<A, W, Ty: GraphConstructor<A, W> + EdgeType> {
    inner: PetGraph<A, W, Ty>,
}

impl<A, W, Ty: GraphConstructor<A, W> + EdgeType> Default for BaseGraph<A, W, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, W, Ty: GraphConstructor<A, W> + EdgeType> BaseGraph<A, W, Ty> {
    pub fn new() -> Self {
        Self {
            inner: Ty::new_graph(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            inner: PetGraph::<A, W, Ty>::with_capacity(nodes, edges),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.inner.is_directed()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.inner.node_weight(node.0).is_some()
    }

    pub fn add_node(&mut self, attr: A) -> NodeId {
        NodeId::new(self.inner.add_node(attr))
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: W) -> EdgeId {
        EdgeId::new(self.inner.add_edge(source.0, target.0, weight))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns a reference to the attribute of a node.
    pub fn node_attr(&self, node: NodeId) -> Option<&A> {
        self.inner.node_weight(node.0)
    }

    /// Returns a reference to the weight of an edge.
    pub fn edge_weight(&self, edge: EdgeId) -> Option<&W> {
        self.inner.edge_weight(edge.0)
    }

    /// Returns an iterator over all nodes and their attributes.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &A)> + '_ {
        self.inner
            .node_references()
            .map(|(idx, attr)| (NodeId::new(idx), attr))
    }

    /// Returns an iterator over all edges as `(source, target, weight)`.
    ///
    /// Iteration order follows petgraph's internal edge order, which is
    /// insertion order for a freshly built `StableGraph`. Callers that
    /// need a stable, id-independent order (such as the Point Snapper's
    /// tie-breaking rule) should sort by `(u, v, key)` themselves.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &W)> + '_ {
        self.inner.edge_references().map(|edge| {
            (
                NodeId::new(edge.source()),
                NodeId::new(edge.target()),
                edge.weight(),
            )
        })
    }

    /// Returns an iterator over outgoing `(target, weight)` pairs from `source`.
    pub fn outgoing_edges(&self, source: NodeId) -> impl Iterator<Item = (NodeId, &W)> + '_ {
        self.inner
            .edges(source.0)
            .map(|edge| (NodeId(edge.target()), edge.weight()))
    }

    /// Returns an iterator over all node ids.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices().map(NodeId::new)
    }

    /// Maps every node to a value, producing a dense `NodeMap`.
    pub fn to_nodemap<T>(&self, mut eval: impl FnMut(NodeId, &A) -> T) -> NodeMap<T> {
        self.nodes()
            .map(|(nodeid, a)| (nodeid, eval(nodeid, a)))
            .collect()
    }

    pub fn to_nodemap_default<T: Default>(&self) -> NodeMap<T> {
        self.to_nodemap(|_, _| Default::default())
    }

    /// Finds the first edge from `source` to `target`, if any.
    pub fn find_edge(&self, source: NodeId, target: NodeId) -> Option<EdgeId> {
        self.inner
            .edge_references()
            .find(|edge| edge.source() == source.0 && edge.target() == target.0)
            .map(|edge| EdgeId::new(edge.id()))
    }
}

/// Extra per-topology behavior Graphina's algorithms rely on: on an
/// undirected graph, traversals must consider both directions of each
/// stored edge; on a directed graph, only the stored direction.
pub trait GraphinaGraph<A, W> {
    fn flow_edges<'a>(&'a self) -> impl Iterator<Item = (NodeId, NodeId, &'a W)> + 'a
    where
        W: 'a;
}

impl<A, W> GraphinaGraph<A, W> for BaseGraph<A, W, Undirected> {
    fn flow_edges<'a>(&'a self) -> impl Iterator<Item = (NodeId, NodeId, &'a W)> + 'a
    where
        W: 'a,
    {
        self.edges()
            .flat_map(|(src, dst, w)| [(src, dst, w), (dst, src, w)].into_iter())
    }
}

impl<A, W> GraphinaGraph<A, W> for BaseGraph<A, W, Directed> {
    fn flow_edges<'a>(&'a self) -> impl Iterator<Item = (NodeId, NodeId, &'a W)> + 'a
    where
        W: 'a,
    {
        self.edges()
    }
}

/// Type alias for a directed graph.
pub type Digraph<A, W> = BaseGraph<A, W, Directed>;
/// Type alias for an undirected graph.
pub type Graph<A, W> = BaseGraph<A, W, Undirected>;

/// Type alias for a `HashMap` keyed by `NodeId`.
pub type NodeMap<T> = HashMap<NodeId, T>;
/// Type alias for a `HashMap` keyed by `EdgeId`.
pub type EdgeMap<T> = HashMap<EdgeId, T>;
