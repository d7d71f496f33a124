//! In-memory multigraph storage
//!
//! [`MultigraphCore`] owns the per-vertex edge sets and the edge-type
//! cardinality index. [`Multigraph`] is the shared handle clients mutate: it
//! forwards to the core and then tells the subgraph registry about any change
//! that can shrink what a subgraph is allowed to see.

use super::config::MultigraphConfig;
use super::edge::Edge;
use super::edge_set::VertexEdgeSet;
use super::event::GraphEvent;
use super::registry::{FxIndexSet, SubgraphFrame, SubgraphRegistry};
use super::snapshot::GraphSnapshot;
use super::subgraph::Subgraph;
use super::traits::{structurally_equal, TypedGraph};
use super::type_index::TypeCardinalityIndex;
use super::types::{EdgeLabel, EdgeType, Orientation, VertexId};
use rustc_hash::FxHashMap;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("At least one edge type must be specified")]
    EmptyTypeSet,

    #[error("Edge type {0} is not present in the graph")]
    UnknownEdgeType(String),

    #[error("Provided {0} is not a subset of the subgraph's {0}")]
    NotASubset(&'static str),

    #[error("{0} lies outside the view")]
    OutsideFrame(String),

    #[error("Cannot add a {found} edge to a {expected} graph")]
    OrientationMismatch {
        expected: Orientation,
        found: Orientation,
    },

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Iterator misuse: {0}")]
    IteratorMisuse(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Broad classes of [`GraphError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request named something that does not exist or is not allowed
    Argument,
    /// The request would violate a subgraph frame or the graph's shape
    Structural,
    /// A cursor was driven out of protocol
    IteratorMisuse,
    /// Snapshot encoding or decoding failed
    Serialization,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::VertexNotFound(_)
            | GraphError::EmptyTypeSet
            | GraphError::UnknownEdgeType(_)
            | GraphError::NotASubset(_) => ErrorKind::Argument,
            GraphError::OutsideFrame(_)
            | GraphError::OrientationMismatch { .. }
            | GraphError::Unsupported(_) => ErrorKind::Structural,
            GraphError::IteratorMisuse(_) => ErrorKind::IteratorMisuse,
            GraphError::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Vertex map, type index and edge count of one graph
///
/// - vertices: VertexId -> VertexEdgeSet (every edge is stored in both endpoint sets)
/// - types: EdgeType -> number of edges of that type
#[derive(Debug, Clone)]
pub struct MultigraphCore<T> {
    orientation: Orientation,
    vertices: FxHashMap<VertexId, VertexEdgeSet<T>>,
    types: TypeCardinalityIndex<T>,
    size: usize,
}

impl<T: EdgeLabel> MultigraphCore<T> {
    pub fn new(config: &MultigraphConfig) -> Self {
        let mut vertices = FxHashMap::default();
        vertices.reserve(config.vertex_capacity);
        MultigraphCore {
            orientation: config.orientation,
            vertices,
            types: TypeCardinalityIndex::new(),
            size: 0,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn edge_set(&self, vertex: VertexId) -> Option<&VertexEdgeSet<T>> {
        self.vertices.get(&vertex)
    }

    pub fn type_index(&self) -> &TypeCardinalityIndex<T> {
        &self.types
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains_key(&vertex)
    }

    pub fn contains_edge(&self, edge: &Edge<T>) -> bool {
        self.vertices
            .get(&edge.to)
            .is_some_and(|set| set.contains(edge))
    }

    pub fn contains_pair(&self, v1: VertexId, v2: VertexId) -> bool {
        self.vertices
            .get(&v1)
            .is_some_and(|set| set.has_successor(v2))
    }

    pub fn contains_typed(&self, v1: VertexId, v2: VertexId, edge_type: &T) -> bool {
        self.vertices
            .get(&v1)
            .is_some_and(|set| set.has_successor_of_type(v2, edge_type))
    }

    pub fn degree(&self, vertex: VertexId) -> usize {
        self.vertices.get(&vertex).map_or(0, VertexEdgeSet::len)
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    pub fn add_vertex(&mut self, vertex: VertexId) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        self.vertices
            .insert(vertex, VertexEdgeSet::new(vertex, self.orientation));
        true
    }

    pub fn add_edge(&mut self, edge: &Edge<T>) -> GraphResult<bool> {
        if edge.orientation != self.orientation {
            return Err(GraphError::OrientationMismatch {
                expected: self.orientation,
                found: edge.orientation,
            });
        }
        let orientation = self.orientation;
        let from = self
            .vertices
            .entry(edge.from)
            .or_insert_with(|| VertexEdgeSet::new(edge.from, orientation));
        if !from.insert(edge) {
            return Ok(false);
        }
        if !edge.is_self_loop() {
            self.vertices
                .entry(edge.to)
                .or_insert_with(|| VertexEdgeSet::new(edge.to, orientation))
                .insert(edge);
        }
        self.types.increment(&edge.edge_type);
        self.size += 1;
        Ok(true)
    }

    /// Remove a vertex and every edge touching it.
    /// Returns `None` if the vertex was absent, else the edge types retired by the removal.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> Option<Vec<T>> {
        let edges = self.vertices.remove(&vertex)?;
        for other in edges.neighbors() {
            if other == vertex {
                continue;
            }
            if let Some(set) = self.vertices.get_mut(&other) {
                set.disconnect(vertex);
            }
        }
        let mut retired = Vec::new();
        for edge in edges.iter() {
            if self.types.decrement(&edge.edge_type) {
                retired.push(edge.edge_type);
            }
        }
        self.size -= edges.len();
        debug!(
            "Removed vertex {} ({} edges, {} edge types retired)",
            vertex,
            edges.len(),
            retired.len()
        );
        Some(retired)
    }

    /// Remove one edge.
    /// Returns `None` if the edge was absent, else whether its type was retired.
    pub fn remove_edge(&mut self, edge: &Edge<T>) -> Option<bool> {
        let removed = self
            .vertices
            .get_mut(&edge.from)
            .is_some_and(|set| set.remove(edge));
        if !removed {
            return None;
        }
        if !edge.is_self_loop() {
            if let Some(set) = self.vertices.get_mut(&edge.to) {
                set.remove(edge);
            }
        }
        self.size -= 1;
        Some(self.types.decrement(&edge.edge_type))
    }

    /// Remove every edge of one type. Returns how many were removed.
    pub fn remove_type(&mut self, edge_type: &T) -> usize {
        if !self.types.contains(edge_type) {
            return 0;
        }
        let doomed: Vec<Edge<T>> = self
            .vertices
            .values()
            .flat_map(|set| {
                let root = set.root();
                set.edges_of_type(edge_type)
                    .into_iter()
                    .filter(move |e| e.owner() == root)
            })
            .collect();
        for edge in &doomed {
            self.remove_edge(edge);
        }
        debug_assert!(!self.types.contains(edge_type));
        doomed.len()
    }

    pub fn clear_edges(&mut self) {
        for set in self.vertices.values_mut() {
            set.clear();
        }
        self.types.clear();
        self.size = 0;
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.types.clear();
        self.size = 0;
    }
}

/// State shared between a [`Multigraph`] and every [`Subgraph`] derived from it
#[derive(Debug)]
pub(crate) struct Backing<T> {
    config: MultigraphConfig,
    core: RefCell<MultigraphCore<T>>,
    registry: RefCell<SubgraphRegistry<T>>,
}

impl<T: EdgeLabel> Backing<T> {
    fn new(config: MultigraphConfig, core: MultigraphCore<T>) -> Self {
        Backing {
            config,
            core: RefCell::new(core),
            registry: RefCell::new(SubgraphRegistry::new()),
        }
    }

    pub(crate) fn core(&self) -> Ref<'_, MultigraphCore<T>> {
        self.core.borrow()
    }

    pub(crate) fn add_vertex(&self, vertex: VertexId) -> bool {
        self.core.borrow_mut().add_vertex(vertex)
    }

    pub(crate) fn add_edge(&self, edge: &Edge<T>) -> GraphResult<bool> {
        self.core.borrow_mut().add_edge(edge)
    }

    pub(crate) fn remove_vertex(&self, vertex: VertexId) -> bool {
        let retired = self.core.borrow_mut().remove_vertex(vertex);
        match retired {
            Some(retired_types) => {
                self.notify(GraphEvent::VertexRemoved {
                    vertex,
                    retired_types,
                });
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_edge(&self, edge: &Edge<T>) -> bool {
        let outcome = self.core.borrow_mut().remove_edge(edge);
        match outcome {
            Some(true) => {
                debug!("Retired edge type {:?}", edge.edge_type);
                self.notify(GraphEvent::TypeRetired(edge.edge_type.clone()));
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    pub(crate) fn remove_type(&self, edge_type: &T) -> usize {
        let removed = self.core.borrow_mut().remove_type(edge_type);
        if removed > 0 {
            debug!("Cleared {} edges of type {:?}", removed, edge_type);
            self.notify(GraphEvent::TypeRetired(edge_type.clone()));
        }
        removed
    }

    pub(crate) fn clear_edges(&self) {
        self.core.borrow_mut().clear_edges();
        debug!("Cleared all edges");
        self.notify(GraphEvent::EdgesCleared);
    }

    pub(crate) fn clear(&self) {
        self.core.borrow_mut().clear();
        debug!("Cleared graph");
        self.notify(GraphEvent::Cleared);
    }

    fn notify(&self, event: GraphEvent<T>) {
        self.registry.borrow_mut().notify(&event);
    }

    /// Create and register a subgraph. Callers validate the frame first.
    pub(crate) fn new_subgraph(
        self: &Rc<Self>,
        vertices: FxIndexSet<VertexId>,
        types: FxIndexSet<T>,
    ) -> Subgraph<T> {
        debug!(
            "Created subgraph over {} vertices and {} edge types",
            vertices.len(),
            types.len()
        );
        let frame = Rc::new(RefCell::new(SubgraphFrame::new(vertices, types)));
        self.registry.borrow_mut().register(&frame);
        Subgraph::new(Rc::clone(self), frame)
    }

    pub(crate) fn config(&self) -> &MultigraphConfig {
        &self.config
    }
}

/// A sparse typed multigraph
///
/// `Multigraph` is a handle: its mutating methods take `&self`, and every
/// [`Subgraph`] obtained from it stays synchronized with later mutations.
/// The graph only holds weak references to its subgraphs, so dropping a
/// subgraph frees it.
pub struct Multigraph<T: EdgeLabel = EdgeType> {
    backing: Rc<Backing<T>>,
}

impl<T: EdgeLabel> Multigraph<T> {
    /// Create an empty graph with the given edge orientation
    pub fn new(orientation: Orientation) -> Self {
        Self::with_config(MultigraphConfig {
            orientation,
            ..MultigraphConfig::default()
        })
    }

    pub fn directed() -> Self {
        Self::new(Orientation::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Orientation::Undirected)
    }

    pub fn with_config(config: MultigraphConfig) -> Self {
        let core = MultigraphCore::new(&config);
        Self::from_core(config, core)
    }

    fn from_core(config: MultigraphConfig, core: MultigraphCore<T>) -> Self {
        Multigraph {
            backing: Rc::new(Backing::new(config, core)),
        }
    }

    /// Build a graph from a list of edges, creating endpoints as needed
    pub fn from_edges(
        orientation: Orientation,
        edges: impl IntoIterator<Item = Edge<T>>,
    ) -> GraphResult<Self> {
        let graph = Self::new(orientation);
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn config(&self) -> &MultigraphConfig {
        self.backing.config()
    }

    /// Number of edges currently carrying `edge_type`
    pub fn edge_type_count(&self, edge_type: &T) -> usize {
        self.backing.core().type_index().count(edge_type)
    }

    /// A live view over `vertices` and every edge type currently in the graph
    pub fn subgraph(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
    ) -> GraphResult<Subgraph<T>> {
        let vertices = self.checked_vertices(vertices)?;
        let types: FxIndexSet<T> = self.backing.core().type_index().types().cloned().collect();
        Ok(self.backing.new_subgraph(vertices, types))
    }

    /// A live view over `vertices` restricted to `edge_types`
    pub fn subgraph_with_types(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
        edge_types: impl IntoIterator<Item = T>,
    ) -> GraphResult<Subgraph<T>> {
        let vertices = self.checked_vertices(vertices)?;
        let types: FxIndexSet<T> = edge_types.into_iter().collect();
        if types.is_empty() {
            return Err(GraphError::EmptyTypeSet);
        }
        {
            let core = self.backing.core();
            if let Some(missing) = types.iter().find(|t| !core.type_index().contains(t)) {
                return Err(GraphError::UnknownEdgeType(format!("{:?}", missing)));
            }
        }
        Ok(self.backing.new_subgraph(vertices, types))
    }

    fn checked_vertices(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
    ) -> GraphResult<FxIndexSet<VertexId>> {
        let core = self.backing.core();
        let mut checked = FxIndexSet::default();
        for v in vertices {
            if !core.contains_vertex(v) {
                return Err(GraphError::VertexNotFound(v));
            }
            checked.insert(v);
        }
        Ok(checked)
    }

    /// Deep copy of the subgraph induced by `vertices`
    ///
    /// The copy is independent of this graph. Copying every vertex yields a
    /// graph structurally equal to this one.
    pub fn copy(&self, vertices: impl IntoIterator<Item = VertexId>) -> GraphResult<Multigraph<T>> {
        let subset = self.checked_vertices(vertices)?;
        let core = self.backing.core();
        let config = self.config().clone();

        if subset.len() == core.order() {
            return Ok(Self::from_core(config, core.clone()));
        }

        let mut copy = MultigraphCore::new(&config.clone().with_vertex_capacity(subset.len()));
        for &v in &subset {
            copy.add_vertex(v);
        }

        // When the subset is larger than a typical neighborhood, scanning each
        // vertex's own edges touches fewer entries than probing every pair.
        let average_degree = if core.order() > 0 {
            core.size() / core.order()
        } else {
            0
        };
        let verts: Vec<VertexId> = subset.iter().copied().collect();
        if verts.len() > average_degree {
            for &v in &verts {
                let Some(set) = core.edge_set(v) else { continue };
                for edge in set.owned() {
                    if edge.other(v).is_some_and(|u| subset.contains(&u)) {
                        copy.add_edge(&edge)?;
                    }
                }
            }
        } else {
            for (i, &v) in verts.iter().enumerate() {
                let Some(set) = core.edge_set(v) else { continue };
                for &u in &verts[i..] {
                    for edge in set.iter_to(u) {
                        copy.add_edge(&edge)?;
                    }
                }
            }
        }
        debug!("Copied {} vertices and {} edges", copy.order(), copy.size());
        Ok(Self::from_core(config, copy))
    }

    /// Remove every vertex and edge. Every live subgraph becomes empty.
    pub fn clear(&self) {
        self.backing.clear();
    }

    /// Remove every edge but keep the vertices. Every live subgraph loses all its types.
    pub fn clear_edges(&self) {
        self.backing.clear_edges();
    }

    /// Remove every edge of `edge_type`. Returns how many edges were removed.
    pub fn clear_edges_of_type(&self, edge_type: &T) -> usize {
        self.backing.remove_type(edge_type)
    }

    /// Registry entries, including subgraphs dropped since the last pruning walk
    pub fn tracked_subgraphs(&self) -> usize {
        self.backing.registry.borrow().tracked()
    }

    /// Subgraphs still referenced by a client
    pub fn live_subgraphs(&self) -> usize {
        self.backing.registry.borrow().live()
    }

    /// Plain-data copy of the graph, with vertices sorted by id
    pub fn snapshot(&self) -> GraphSnapshot<T> {
        let core = self.backing.core();
        let mut vertices: Vec<VertexId> = core.vertex_ids().collect();
        vertices.sort_unstable();
        let edges = vertices
            .iter()
            .filter_map(|&v| core.edge_set(v))
            .flat_map(|set| set.owned())
            .collect();
        GraphSnapshot {
            orientation: core.orientation(),
            vertices,
            edges,
        }
    }

    /// Rebuild a graph from a snapshot
    pub fn from_snapshot(snapshot: GraphSnapshot<T>) -> GraphResult<Self> {
        let graph = Self::new(snapshot.orientation);
        for v in snapshot.vertices {
            graph.backing.add_vertex(v);
        }
        for edge in snapshot.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}

impl<T: EdgeLabel> TypedGraph for Multigraph<T> {
    type Label = T;

    fn orientation(&self) -> Orientation {
        self.backing.core().orientation()
    }

    fn order(&self) -> usize {
        self.backing.core().order()
    }

    fn size(&self) -> usize {
        self.backing.core().size()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.backing.core().contains_vertex(vertex)
    }

    fn contains_edge(&self, edge: &Edge<T>) -> bool {
        self.backing.core().contains_edge(edge)
    }

    fn contains_pair(&self, v1: VertexId, v2: VertexId) -> bool {
        self.backing.core().contains_pair(v1, v2)
    }

    fn contains_typed(&self, v1: VertexId, v2: VertexId, edge_type: &T) -> bool {
        self.backing.core().contains_typed(v1, v2, edge_type)
    }

    fn has_edge_type(&self, edge_type: &T) -> bool {
        self.backing.core().type_index().contains(edge_type)
    }

    fn degree(&self, vertex: VertexId) -> usize {
        self.backing.core().degree(vertex)
    }

    fn in_degree(&self, vertex: VertexId) -> usize {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or(0, VertexEdgeSet::in_degree)
    }

    fn out_degree(&self, vertex: VertexId) -> usize {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or(0, VertexEdgeSet::out_degree)
    }

    fn vertex_ids(&self) -> Vec<VertexId> {
        self.backing.core().vertex_ids().collect()
    }

    fn type_list(&self) -> Vec<T> {
        self.backing.core().type_index().types().cloned().collect()
    }

    fn edges_between(&self, v1: VertexId, v2: VertexId) -> Vec<Edge<T>> {
        self.backing
            .core()
            .edge_set(v1)
            .map_or_else(Vec::new, |set| set.edges_to(v2))
    }

    fn incident_edges(&self, vertex: VertexId) -> Vec<Edge<T>> {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or_else(Vec::new, |set| set.iter().collect())
    }

    fn neighbor_ids(&self, vertex: VertexId) -> Vec<VertexId> {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or_else(Vec::new, |set| set.neighbors().collect())
    }

    fn owned_edges(&self, vertex: VertexId) -> Vec<Edge<T>> {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or_else(Vec::new, |set| set.owned().collect())
    }

    fn add_vertex(&self, vertex: VertexId) -> GraphResult<bool> {
        Ok(self.backing.add_vertex(vertex))
    }

    fn add_edge(&self, edge: Edge<T>) -> GraphResult<bool> {
        self.backing.add_edge(&edge)
    }

    fn remove_vertex(&self, vertex: VertexId) -> GraphResult<bool> {
        Ok(self.backing.remove_vertex(vertex))
    }

    fn remove_edge(&self, edge: &Edge<T>) -> bool {
        self.backing.remove_edge(edge)
    }

    fn edges_of_type(&self, edge_type: &T) -> Vec<Edge<T>> {
        let core = self.backing.core();
        if !core.type_index().contains(edge_type) {
            return Vec::new();
        }
        core.vertex_ids()
            .filter_map(|v| core.edge_set(v))
            .flat_map(|set| {
                let root = set.root();
                set.edges_of_type(edge_type)
                    .into_iter()
                    .filter(move |e| e.owner() == root)
            })
            .collect()
    }

    fn successors(&self, vertex: VertexId) -> Vec<VertexId> {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or_else(Vec::new, |set| set.successors().collect())
    }

    fn predecessors(&self, vertex: VertexId) -> Vec<VertexId> {
        self.backing
            .core()
            .edge_set(vertex)
            .map_or_else(Vec::new, |set| set.predecessors().collect())
    }
}

impl<T: EdgeLabel> Default for Multigraph<T> {
    fn default() -> Self {
        Self::with_config(MultigraphConfig::default())
    }
}

impl<T: EdgeLabel> PartialEq for Multigraph<T> {
    fn eq(&self, other: &Self) -> bool {
        structurally_equal(self, other)
    }
}

impl<T: EdgeLabel> fmt::Debug for Multigraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.backing.core();
        f.debug_struct("Multigraph")
            .field("orientation", &core.orientation())
            .field("order", &core.order())
            .field("size", &core.size())
            .field("edge_types", &core.type_index().len())
            .finish()
    }
}

impl<T: EdgeLabel> fmt::Display for Multigraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        write!(f, "{{ vertices: {:?}, edges: [", snapshot.vertices)?;
        for (i, edge) in snapshot.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", edge)?;
        }
        write!(f, "] }}")
    }
}
