//! The read/write contract shared by [`Multigraph`](super::Multigraph) and
//! [`Subgraph`](super::Subgraph)
//!
//! Downstream analysis code (ranking, clustering, motif counting) should be
//! written against [`TypedGraph`] so that it runs unchanged over a whole graph
//! or over any filtered subgraph of it.

use super::edge::Edge;
use super::registry::FxIndexSet;
use super::store::GraphResult;
use super::types::{EdgeLabel, Orientation, VertexId};
use super::view::{AdjacencyView, EdgeTypesView, EdgeView, NeighborView, VertexView};

/// A typed multigraph, or a live projection of one.
///
/// Mutating methods take `&self`: graphs are shared handles, and every
/// subgraph derived from a graph observes its mutations immediately.
///
/// The `Vec`-returning methods are point-in-time snapshots used by the live
/// collection views; prefer [`vertices`](Self::vertices),
/// [`edges`](Self::edges), [`adjacency`](Self::adjacency) and
/// [`neighbors`](Self::neighbors) in client code.
pub trait TypedGraph {
    type Label: EdgeLabel;

    fn orientation(&self) -> Orientation;

    /// Number of vertices
    fn order(&self) -> usize;

    /// Number of edges
    fn size(&self) -> usize;

    fn contains_vertex(&self, vertex: VertexId) -> bool;

    fn contains_edge(&self, edge: &Edge<Self::Label>) -> bool;

    /// Check for any edge `v1 -> v2` (directed) or `v1 - v2` (undirected)
    fn contains_pair(&self, v1: VertexId, v2: VertexId) -> bool;

    /// Check for an edge `v1 -> v2` (directed) or `v1 - v2` (undirected) of one type
    fn contains_typed(&self, v1: VertexId, v2: VertexId, edge_type: &Self::Label) -> bool;

    fn has_edge_type(&self, edge_type: &Self::Label) -> bool;

    /// Number of edges touching `vertex` (a self-loop counts once)
    fn degree(&self, vertex: VertexId) -> usize;

    fn in_degree(&self, vertex: VertexId) -> usize;

    fn out_degree(&self, vertex: VertexId) -> usize;

    fn vertex_ids(&self) -> Vec<VertexId>;

    fn type_list(&self) -> Vec<Self::Label>;

    /// All edges joining `v1` and `v2`, in either direction
    fn edges_between(&self, v1: VertexId, v2: VertexId) -> Vec<Edge<Self::Label>>;

    fn incident_edges(&self, vertex: VertexId) -> Vec<Edge<Self::Label>>;

    fn neighbor_ids(&self, vertex: VertexId) -> Vec<VertexId>;

    /// Edges whose canonical owner is `vertex` (see [`Edge::owner`]). Every
    /// edge is owned by exactly one vertex, so the union over all vertices
    /// enumerates each edge once.
    fn owned_edges(&self, vertex: VertexId) -> Vec<Edge<Self::Label>>;

    fn add_vertex(&self, vertex: VertexId) -> GraphResult<bool>;

    fn add_edge(&self, edge: Edge<Self::Label>) -> GraphResult<bool>;

    fn remove_vertex(&self, vertex: VertexId) -> GraphResult<bool>;

    /// Remove an edge. Removing an absent edge is not an error.
    fn remove_edge(&self, edge: &Edge<Self::Label>) -> bool;

    fn is_directed(&self) -> bool {
        self.orientation().is_directed()
    }

    fn is_empty(&self) -> bool {
        self.order() == 0
    }

    /// Live, write-through view of the vertex set
    fn vertices(&self) -> VertexView<'_, Self> {
        VertexView::new(self)
    }

    /// Live, write-through view of the edge set
    fn edges(&self) -> EdgeView<'_, Self> {
        EdgeView::new(self)
    }

    /// Live, read-only view of the edge types in use
    fn edge_types(&self) -> EdgeTypesView<'_, Self> {
        EdgeTypesView::new(self)
    }

    /// Live, write-through view of the edges touching `vertex`
    fn adjacency(&self, vertex: VertexId) -> AdjacencyView<'_, Self> {
        AdjacencyView::new(self, vertex)
    }

    /// Live view of the vertices adjacent to `vertex`
    fn neighbors(&self, vertex: VertexId) -> NeighborView<'_, Self> {
        NeighborView::new(self, vertex)
    }

    fn edges_of_type(&self, edge_type: &Self::Label) -> Vec<Edge<Self::Label>> {
        self.vertex_ids()
            .into_iter()
            .flat_map(|v| self.owned_edges(v))
            .filter(|e| &e.edge_type == edge_type)
            .collect()
    }

    /// Edges pointing at `vertex`; every incident edge when undirected
    fn in_edges(&self, vertex: VertexId) -> Vec<Edge<Self::Label>> {
        let directed = self.is_directed();
        self.incident_edges(vertex)
            .into_iter()
            .filter(|e| !directed || e.to == vertex)
            .collect()
    }

    /// Edges leaving `vertex`; every incident edge when undirected
    fn out_edges(&self, vertex: VertexId) -> Vec<Edge<Self::Label>> {
        let directed = self.is_directed();
        self.incident_edges(vertex)
            .into_iter()
            .filter(|e| !directed || e.from == vertex)
            .collect()
    }

    fn successors(&self, vertex: VertexId) -> Vec<VertexId> {
        let unique: FxIndexSet<VertexId> = self
            .out_edges(vertex)
            .iter()
            .filter_map(|e| e.other(vertex))
            .collect();
        unique.into_iter().collect()
    }

    fn predecessors(&self, vertex: VertexId) -> Vec<VertexId> {
        let unique: FxIndexSet<VertexId> = self
            .in_edges(vertex)
            .iter()
            .filter_map(|e| e.other(vertex))
            .collect();
        unique.into_iter().collect()
    }
}

/// Same orientation, order, size, vertex set and edge set
pub fn structurally_equal<A, B>(a: &A, b: &B) -> bool
where
    A: TypedGraph + ?Sized,
    B: TypedGraph<Label = A::Label> + ?Sized,
{
    if a.orientation() != b.orientation() || a.order() != b.order() || a.size() != b.size() {
        return false;
    }
    if !a.vertex_ids().into_iter().all(|v| b.contains_vertex(v)) {
        return false;
    }
    a.vertex_ids()
        .into_iter()
        .flat_map(|v| a.owned_edges(v))
        .all(|e| b.contains_edge(&e))
}
