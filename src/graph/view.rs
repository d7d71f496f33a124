//! Live collection views over a [`TypedGraph`]
//!
//! Each view borrows its owner and answers every call against the owner's
//! current state; nothing is cached. `insert` and `remove` on a view have the
//! same effect as the owner's own add/remove methods, and cursors support
//! removing the element they last yielded.
//!
//! Cursors snapshot the owner's vertex ids when created and fetch each
//! vertex's elements as they reach it. An element removed from the owner
//! before the cursor reaches it is skipped.

use super::edge::Edge;
use super::store::{GraphError, GraphResult};
use super::traits::TypedGraph;
use super::types::VertexId;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Fresh,
    Yielded,
    Removed,
}

/// Remembers the last element a cursor yielded so it can be removed once
#[derive(Debug)]
struct LastYielded<X> {
    state: CursorState,
    last: Option<X>,
}

impl<X: Clone> LastYielded<X> {
    fn new() -> Self {
        LastYielded {
            state: CursorState::Fresh,
            last: None,
        }
    }

    fn record(&mut self, item: &X) {
        self.last = Some(item.clone());
        self.state = CursorState::Yielded;
    }

    fn take(&mut self) -> GraphResult<X> {
        match (self.state, self.last.take()) {
            (CursorState::Yielded, Some(item)) => {
                self.state = CursorState::Removed;
                Ok(item)
            }
            (CursorState::Removed, _) => Err(GraphError::IteratorMisuse(
                "remove called twice without an intervening next",
            )),
            _ => Err(GraphError::IteratorMisuse("remove called before next")),
        }
    }
}

// ---------------------------------------------------------------------------
// Vertices
// ---------------------------------------------------------------------------

/// Write-through view of a graph's vertex set
pub struct VertexView<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: TypedGraph + ?Sized> VertexView<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        VertexView { graph }
    }

    pub fn len(&self) -> usize {
        self.graph.order()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.graph.contains_vertex(vertex)
    }

    pub fn insert(&self, vertex: VertexId) -> GraphResult<bool> {
        self.graph.add_vertex(vertex)
    }

    pub fn remove(&self, vertex: VertexId) -> GraphResult<bool> {
        self.graph.remove_vertex(vertex)
    }

    pub fn iter(&self) -> VertexCursor<'g, G> {
        VertexCursor {
            graph: self.graph,
            ids: self.graph.vertex_ids().into(),
            last: LastYielded::new(),
        }
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for VertexView<'g, G> {
    type Item = VertexId;
    type IntoIter = VertexCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for &VertexView<'g, G> {
    type Item = VertexId;
    type IntoIter = VertexCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct VertexCursor<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
    ids: VecDeque<VertexId>,
    last: LastYielded<VertexId>,
}

impl<'g, G: TypedGraph + ?Sized> VertexCursor<'g, G> {
    /// Remove the vertex last returned by `next` from the owner
    pub fn remove(&mut self) -> GraphResult<()> {
        let vertex = self.last.take()?;
        self.graph.remove_vertex(vertex)?;
        Ok(())
    }
}

impl<'g, G: TypedGraph + ?Sized> Iterator for VertexCursor<'g, G> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        while let Some(v) = self.ids.pop_front() {
            if self.graph.contains_vertex(v) {
                self.last.record(&v);
                return Some(v);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Write-through view of a graph's edge set
pub struct EdgeView<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: TypedGraph + ?Sized> EdgeView<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        EdgeView { graph }
    }

    pub fn len(&self) -> usize {
        self.graph.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, edge: &Edge<G::Label>) -> bool {
        self.graph.contains_edge(edge)
    }

    pub fn insert(&self, edge: Edge<G::Label>) -> GraphResult<bool> {
        self.graph.add_edge(edge)
    }

    pub fn remove(&self, edge: &Edge<G::Label>) -> bool {
        self.graph.remove_edge(edge)
    }

    /// Every edge once, grouped by owning vertex
    pub fn iter(&self) -> EdgeCursor<'g, G> {
        EdgeCursor::new(self.graph, self.graph.vertex_ids(), G::owned_edges)
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for EdgeView<'g, G> {
    type Item = Edge<G::Label>;
    type IntoIter = EdgeCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for &EdgeView<'g, G> {
    type Item = Edge<G::Label>;
    type IntoIter = EdgeCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over edges, shared by [`EdgeView`] and [`AdjacencyView`]
pub struct EdgeCursor<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
    ids: VecDeque<VertexId>,
    source: fn(&G, VertexId) -> Vec<Edge<G::Label>>,
    buffer: VecDeque<Edge<G::Label>>,
    last: LastYielded<Edge<G::Label>>,
}

impl<'g, G: TypedGraph + ?Sized> EdgeCursor<'g, G> {
    fn new(
        graph: &'g G,
        ids: Vec<VertexId>,
        source: fn(&G, VertexId) -> Vec<Edge<G::Label>>,
    ) -> Self {
        EdgeCursor {
            graph,
            ids: ids.into(),
            source,
            buffer: VecDeque::new(),
            last: LastYielded::new(),
        }
    }

    /// Remove the edge last returned by `next` from the owner
    pub fn remove(&mut self) -> GraphResult<()> {
        let edge = self.last.take()?;
        self.graph.remove_edge(&edge);
        Ok(())
    }
}

impl<'g, G: TypedGraph + ?Sized> Iterator for EdgeCursor<'g, G> {
    type Item = Edge<G::Label>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(edge) = self.buffer.pop_front() {
                if self.graph.contains_edge(&edge) {
                    self.last.record(&edge);
                    return Some(edge);
                }
            }
            let v = self.ids.pop_front()?;
            self.buffer = (self.source)(self.graph, v).into();
        }
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Write-through view of the edges touching one vertex
pub struct AdjacencyView<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
    root: VertexId,
}

impl<'g, G: TypedGraph + ?Sized> AdjacencyView<'g, G> {
    pub fn new(graph: &'g G, root: VertexId) -> Self {
        AdjacencyView { graph, root }
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.graph.degree(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, edge: &Edge<G::Label>) -> bool {
        edge.touches(self.root) && self.graph.contains_edge(edge)
    }

    /// Add an edge touching the root
    pub fn insert(&self, edge: Edge<G::Label>) -> GraphResult<bool> {
        if !edge.touches(self.root) {
            return Err(GraphError::OutsideFrame(format!(
                "edge {} (adjacency of {})",
                edge, self.root
            )));
        }
        self.graph.add_edge(edge)
    }

    pub fn remove(&self, edge: &Edge<G::Label>) -> bool {
        edge.touches(self.root) && self.graph.remove_edge(edge)
    }

    pub fn iter(&self) -> EdgeCursor<'g, G> {
        EdgeCursor::new(self.graph, vec![self.root], G::incident_edges)
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for AdjacencyView<'g, G> {
    type Item = Edge<G::Label>;
    type IntoIter = EdgeCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for &AdjacencyView<'g, G> {
    type Item = Edge<G::Label>;
    type IntoIter = EdgeCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// View of the vertices sharing at least one edge with the root
///
/// Removing a neighbor removes every edge between it and the root. Neighbors
/// cannot be inserted, since that would need an edge type.
pub struct NeighborView<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
    root: VertexId,
}

impl<'g, G: TypedGraph + ?Sized> NeighborView<'g, G> {
    pub fn new(graph: &'g G, root: VertexId) -> Self {
        NeighborView { graph, root }
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.graph.neighbor_ids(self.root).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        !self.graph.edges_between(self.root, vertex).is_empty()
    }

    pub fn insert(&self, _vertex: VertexId) -> GraphResult<bool> {
        Err(GraphError::Unsupported("inserting a neighbor without an edge"))
    }

    /// Remove every edge joining the root and `vertex`
    pub fn remove(&self, vertex: VertexId) -> bool {
        disconnect(self.graph, self.root, vertex)
    }

    pub fn iter(&self) -> NeighborCursor<'g, G> {
        NeighborCursor {
            graph: self.graph,
            root: self.root,
            ids: self.graph.neighbor_ids(self.root).into(),
            last: LastYielded::new(),
        }
    }
}

fn disconnect<G: TypedGraph + ?Sized>(graph: &G, root: VertexId, vertex: VertexId) -> bool {
    let mut removed = false;
    for edge in graph.edges_between(root, vertex) {
        removed |= graph.remove_edge(&edge);
    }
    removed
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for NeighborView<'g, G> {
    type Item = VertexId;
    type IntoIter = NeighborCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for &NeighborView<'g, G> {
    type Item = VertexId;
    type IntoIter = NeighborCursor<'g, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct NeighborCursor<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
    root: VertexId,
    ids: VecDeque<VertexId>,
    last: LastYielded<VertexId>,
}

impl<'g, G: TypedGraph + ?Sized> NeighborCursor<'g, G> {
    /// Remove every edge between the root and the neighbor last returned by `next`
    pub fn remove(&mut self) -> GraphResult<()> {
        let vertex = self.last.take()?;
        disconnect(self.graph, self.root, vertex);
        Ok(())
    }
}

impl<'g, G: TypedGraph + ?Sized> Iterator for NeighborCursor<'g, G> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        while let Some(v) = self.ids.pop_front() {
            if !self.graph.edges_between(self.root, v).is_empty() {
                self.last.record(&v);
                return Some(v);
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Edge types
// ---------------------------------------------------------------------------

/// Read-only view of the edge types in use
pub struct EdgeTypesView<'g, G: TypedGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: TypedGraph + ?Sized> EdgeTypesView<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        EdgeTypesView { graph }
    }

    pub fn len(&self) -> usize {
        self.graph.type_list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, edge_type: &G::Label) -> bool {
        self.graph.has_edge_type(edge_type)
    }

    pub fn iter(&self) -> std::vec::IntoIter<G::Label> {
        self.graph.type_list().into_iter()
    }
}

impl<'g, G: TypedGraph + ?Sized> IntoIterator for EdgeTypesView<'g, G> {
    type Item = G::Label;
    type IntoIter = std::vec::IntoIter<G::Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
