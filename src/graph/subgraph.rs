//! Live filtered projection of a multigraph
//!
//! A [`Subgraph`] sees the vertices and edge types of its frame, intersected
//! with whatever the backing graph currently holds. It never copies edge data:
//! every read is answered by the backing graph and filtered through the frame,
//! and every write goes to the backing graph.

use super::edge::Edge;
use super::registry::{FrameHandle, FxIndexSet, SubgraphFrame};
use super::store::{Backing, GraphError, GraphResult, Multigraph, MultigraphCore};
use super::traits::TypedGraph;
use super::types::{EdgeLabel, Orientation, VertexId};
use std::cell::Ref;
use std::fmt;
use std::rc::Rc;

/// A vertex subset and an edge-type subset over a shared [`Multigraph`]
///
/// Both subsets only shrink: removing a vertex from the backing graph drops it
/// from the frame, and so does retiring an edge type. Cloning a `Subgraph`
/// yields another handle to the same frame.
pub struct Subgraph<T: EdgeLabel> {
    backing: Rc<Backing<T>>,
    frame: FrameHandle<T>,
}

impl<T: EdgeLabel> Subgraph<T> {
    pub(crate) fn new(backing: Rc<Backing<T>>, frame: FrameHandle<T>) -> Self {
        Subgraph { backing, frame }
    }

    fn frame(&self) -> Ref<'_, SubgraphFrame<T>> {
        self.frame.borrow()
    }

    fn core(&self) -> Ref<'_, MultigraphCore<T>> {
        self.backing.core()
    }

    fn visible(frame: &SubgraphFrame<T>, edge: &Edge<T>) -> bool {
        frame.admits(edge.from, edge.to, &edge.edge_type)
    }

    fn visible_incident(&self, vertex: VertexId) -> Vec<Edge<T>> {
        let frame = self.frame();
        if !frame.has_vertex(vertex) {
            return Vec::new();
        }
        let core = self.core();
        core.edge_set(vertex).map_or_else(Vec::new, |set| {
            set.iter().filter(|e| Self::visible(&frame, e)).collect()
        })
    }

    /// A narrower live view. `vertices` must lie inside this subgraph; the
    /// new view keeps this subgraph's current edge types.
    pub fn subgraph(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
    ) -> GraphResult<Subgraph<T>> {
        let vertices = self.checked_subset(vertices)?;
        let types = self.frame().types.clone();
        Ok(self.backing.new_subgraph(vertices, types))
    }

    /// A narrower live view over `vertices` and `edge_types`, both of which
    /// must lie inside this subgraph
    pub fn subgraph_with_types(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
        edge_types: impl IntoIterator<Item = T>,
    ) -> GraphResult<Subgraph<T>> {
        let vertices = self.checked_subset(vertices)?;
        let types: FxIndexSet<T> = edge_types.into_iter().collect();
        if types.is_empty() {
            return Err(GraphError::EmptyTypeSet);
        }
        if !types.iter().all(|t| self.frame().has_type(t)) {
            return Err(GraphError::NotASubset("edge types"));
        }
        Ok(self.backing.new_subgraph(vertices, types))
    }

    fn checked_subset(
        &self,
        vertices: impl IntoIterator<Item = VertexId>,
    ) -> GraphResult<FxIndexSet<VertexId>> {
        let frame = self.frame();
        let mut checked = FxIndexSet::default();
        for v in vertices {
            if !frame.has_vertex(v) {
                return Err(GraphError::NotASubset("vertices"));
            }
            checked.insert(v);
        }
        Ok(checked)
    }

    /// Independent deep copy of the visible subgraph induced by `vertices`
    pub fn copy(&self, vertices: impl IntoIterator<Item = VertexId>) -> GraphResult<Multigraph<T>> {
        let subset: FxIndexSet<VertexId> = {
            let frame = self.frame();
            let mut subset = FxIndexSet::default();
            for v in vertices {
                if !frame.has_vertex(v) {
                    return Err(GraphError::VertexNotFound(v));
                }
                subset.insert(v);
            }
            subset
        };
        let config = self
            .backing
            .config()
            .clone()
            .with_vertex_capacity(subset.len());
        let copy = Multigraph::with_config(config);
        for &v in &subset {
            copy.add_vertex(v)?;
        }
        for &v in &subset {
            for edge in self.owned_edges(v) {
                if edge.other(v).is_some_and(|u| subset.contains(&u)) {
                    copy.add_edge(edge)?;
                }
            }
        }
        Ok(copy)
    }

    /// Remove every vertex of this subgraph from the backing graph
    pub fn clear(&self) {
        for v in self.vertex_ids() {
            self.backing.remove_vertex(v);
        }
    }

    /// Remove every visible edge from the backing graph
    pub fn clear_edges(&self) {
        let doomed: Vec<Edge<T>> = self
            .vertex_ids()
            .into_iter()
            .flat_map(|v| self.owned_edges(v))
            .collect();
        for edge in &doomed {
            self.backing.remove_edge(edge);
        }
    }
}

impl<T: EdgeLabel> TypedGraph for Subgraph<T> {
    type Label = T;

    fn orientation(&self) -> Orientation {
        self.core().orientation()
    }

    fn order(&self) -> usize {
        self.frame().vertices.len()
    }

    /// Counted afresh on every call. Pairwise lookups over the frame's
    /// unordered vertex pairs are used when there are fewer pairs than
    /// incident edges to scan.
    fn size(&self) -> usize {
        let frame = self.frame();
        let core = self.core();
        if frame.types.is_empty() {
            return 0;
        }
        let verts: Vec<VertexId> = frame.vertices.iter().copied().collect();
        let k = verts.len();
        let pairs = k * (k + 1) / 2;
        let scan: usize = verts.iter().map(|&v| core.degree(v)).sum();

        if pairs < scan {
            let mut count = 0;
            for (i, &v) in verts.iter().enumerate() {
                let Some(set) = core.edge_set(v) else { continue };
                for &u in &verts[i..] {
                    count += set
                        .iter_to(u)
                        .filter(|e| frame.has_type(&e.edge_type))
                        .count();
                }
            }
            count
        } else {
            verts
                .iter()
                .filter_map(|&v| core.edge_set(v))
                .flat_map(|set| set.owned())
                .filter(|e| Self::visible(&frame, e))
                .count()
        }
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.frame().has_vertex(vertex)
    }

    fn contains_edge(&self, edge: &Edge<T>) -> bool {
        Self::visible(&self.frame(), edge) && self.core().contains_edge(edge)
    }

    fn contains_pair(&self, v1: VertexId, v2: VertexId) -> bool {
        let directed = self.is_directed();
        self.edges_between(v1, v2)
            .iter()
            .any(|e| !directed || (e.from == v1 && e.to == v2))
    }

    fn contains_typed(&self, v1: VertexId, v2: VertexId, edge_type: &T) -> bool {
        self.frame().admits(v1, v2, edge_type) && self.core().contains_typed(v1, v2, edge_type)
    }

    fn has_edge_type(&self, edge_type: &T) -> bool {
        self.frame().has_type(edge_type)
    }

    fn degree(&self, vertex: VertexId) -> usize {
        self.visible_incident(vertex).len()
    }

    fn in_degree(&self, vertex: VertexId) -> usize {
        self.in_edges(vertex).len()
    }

    fn out_degree(&self, vertex: VertexId) -> usize {
        self.out_edges(vertex).len()
    }

    fn vertex_ids(&self) -> Vec<VertexId> {
        self.frame().vertices.iter().copied().collect()
    }

    fn type_list(&self) -> Vec<T> {
        self.frame().types.iter().cloned().collect()
    }

    fn edges_between(&self, v1: VertexId, v2: VertexId) -> Vec<Edge<T>> {
        let frame = self.frame();
        if !frame.has_vertex(v1) || !frame.has_vertex(v2) {
            return Vec::new();
        }
        let core = self.core();
        core.edge_set(v1).map_or_else(Vec::new, |set| {
            set.iter_to(v2)
                .filter(|e| frame.has_type(&e.edge_type))
                .collect()
        })
    }

    fn incident_edges(&self, vertex: VertexId) -> Vec<Edge<T>> {
        self.visible_incident(vertex)
    }

    fn neighbor_ids(&self, vertex: VertexId) -> Vec<VertexId> {
        let unique: FxIndexSet<VertexId> = self
            .visible_incident(vertex)
            .iter()
            .filter_map(|e| e.other(vertex))
            .collect();
        unique.into_iter().collect()
    }

    fn owned_edges(&self, vertex: VertexId) -> Vec<Edge<T>> {
        let frame = self.frame();
        if !frame.has_vertex(vertex) {
            return Vec::new();
        }
        let core = self.core();
        core.edge_set(vertex).map_or_else(Vec::new, |set| {
            set.owned().filter(|e| Self::visible(&frame, e)).collect()
        })
    }

    /// Succeeds only for vertices already in the frame
    fn add_vertex(&self, vertex: VertexId) -> GraphResult<bool> {
        if self.frame().has_vertex(vertex) {
            Ok(false)
        } else {
            Err(GraphError::OutsideFrame(format!("vertex {}", vertex)))
        }
    }

    fn add_edge(&self, edge: Edge<T>) -> GraphResult<bool> {
        let admitted = Self::visible(&self.frame(), &edge);
        if !admitted {
            return Err(GraphError::OutsideFrame(format!("edge {}", edge)));
        }
        self.backing.add_edge(&edge)
    }

    fn remove_vertex(&self, _vertex: VertexId) -> GraphResult<bool> {
        Err(GraphError::Unsupported("removing a vertex through a subgraph"))
    }

    fn remove_edge(&self, edge: &Edge<T>) -> bool {
        let admitted = Self::visible(&self.frame(), edge);
        admitted && self.backing.remove_edge(edge)
    }
}

impl<T: EdgeLabel> Clone for Subgraph<T> {
    fn clone(&self) -> Self {
        Subgraph {
            backing: Rc::clone(&self.backing),
            frame: Rc::clone(&self.frame),
        }
    }
}

impl<T: EdgeLabel> fmt::Debug for Subgraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame();
        f.debug_struct("Subgraph")
            .field("vertices", &frame.vertices)
            .field("types", &frame.types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::ErrorKind;
    use crate::graph::types::EdgeType;

    fn e(from: VertexId, to: VertexId, t: &str) -> Edge<EdgeType> {
        Edge::directed(from, to, t)
    }

    fn sample() -> Multigraph {
        let graph = Multigraph::directed();
        graph.add_edge(e(0, 1, "a")).unwrap();
        graph.add_edge(e(0, 1, "b")).unwrap();
        graph.add_edge(e(1, 2, "a")).unwrap();
        graph.add_edge(e(2, 0, "b")).unwrap();
        graph.add_edge(e(2, 3, "a")).unwrap();
        graph.add_edge(e(1, 1, "a")).unwrap();
        graph
    }

    #[test]
    fn test_filtered_reads() {
        let graph = sample();
        let sub = graph
            .subgraph_with_types([0, 1, 2], [EdgeType::new("a")])
            .unwrap();

        assert_eq!(sub.order(), 3);
        assert_eq!(sub.size(), 3);
        assert!(sub.contains_edge(&e(0, 1, "a")));
        assert!(!sub.contains_edge(&e(0, 1, "b")));
        assert!(!sub.contains_edge(&e(2, 3, "a")));
        assert!(!sub.contains_vertex(3));
        assert!(sub.contains_pair(0, 1));
        assert!(!sub.contains_pair(1, 0));
        assert_eq!(sub.degree(1), 3);
        assert_eq!(sub.in_degree(1), 2);
        assert_eq!(sub.out_degree(1), 2);
        assert_eq!(sub.degree(3), 0);
        assert_eq!(sub.edges_between(0, 1), vec![e(0, 1, "a")]);
    }

    #[test]
    fn test_size_paths_agree() {
        let graph = sample();
        let whole = graph.subgraph([0, 1, 2, 3]).unwrap();
        assert_eq!(whole.size(), graph.size());

        // Few vertex pairs, many parallel edges: pairwise lookups
        let dense = Multigraph::directed();
        for t in ["a", "b", "c", "d"] {
            dense.add_edge(e(0, 1, t)).unwrap();
            dense.add_edge(e(1, 0, t)).unwrap();
        }
        dense.add_edge(e(0, 0, "a")).unwrap();
        let pair = dense.subgraph([0, 1]).unwrap();
        assert_eq!(pair.size(), 9);

        // Many mostly isolated vertices: owned-edge scan
        let sparse = Multigraph::directed();
        for v in 0..20 {
            sparse.add_vertex(v).unwrap();
        }
        sparse.add_edge(e(0, 1, "a")).unwrap();
        sparse.add_edge(e(3, 3, "a")).unwrap();
        sparse.add_edge(e(5, 19, "b")).unwrap();
        let most = sparse.subgraph(0..19).unwrap();
        assert_eq!(most.size(), 2);
        let typed = sparse.subgraph_with_types(0..20, [EdgeType::new("b")]).unwrap();
        assert_eq!(typed.size(), 1);
    }

    #[test]
    fn test_writes_respect_frame() {
        let graph = sample();
        let sub = graph.subgraph_with_types([0, 1], [EdgeType::new("a")]).unwrap();

        assert!(!sub.add_vertex(0).unwrap());
        let err = sub.add_vertex(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);

        assert!(sub.add_edge(e(1, 0, "a")).unwrap());
        assert!(graph.contains_edge(&e(1, 0, "a")));
        assert!(sub.add_edge(e(1, 0, "b")).is_err());
        assert!(sub.add_edge(e(0, 2, "a")).is_err());

        assert!(!sub.remove_edge(&e(0, 1, "b")));
        assert!(graph.contains_edge(&e(0, 1, "b")));
        assert!(sub.remove_edge(&e(0, 1, "a")));
        assert!(!graph.contains_edge(&e(0, 1, "a")));

        let err = sub.remove_vertex(0).unwrap_err();
        assert!(matches!(err, GraphError::Unsupported(_)));
    }

    #[test]
    fn test_nested_subgraph() {
        let graph = sample();
        let sub = graph.subgraph([0, 1, 2]).unwrap();
        let inner = sub.subgraph([0, 1]).unwrap();
        assert_eq!(inner.size(), 3);

        let err = sub.subgraph([0, 3]).unwrap_err();
        assert!(matches!(err, GraphError::NotASubset("vertices")));

        let narrow = sub.subgraph_with_types([1], [EdgeType::new("a")]).unwrap();
        assert_eq!(narrow.size(), 1);
        let err = narrow
            .subgraph_with_types([1], [EdgeType::new("b")])
            .unwrap_err();
        assert!(matches!(err, GraphError::NotASubset("edge types")));

        assert_eq!(graph.live_subgraphs(), 3);
    }

    #[test]
    fn test_clone_shares_frame() {
        let graph = sample();
        let sub = graph.subgraph([0, 1]).unwrap();
        let twin = sub.clone();
        graph.remove_vertex(1).unwrap();
        assert_eq!(sub.vertex_ids(), vec![0]);
        assert_eq!(twin.vertex_ids(), vec![0]);
        assert_eq!(graph.live_subgraphs(), 1);
    }

    #[test]
    fn test_copy_visible_part() {
        let graph = sample();
        let sub = graph.subgraph_with_types([0, 1, 2], [EdgeType::new("b")]).unwrap();
        let copy = sub.copy([0, 1, 2]).unwrap();
        assert_eq!(copy.order(), 3);
        assert_eq!(copy.size(), 2);
        assert!(copy.contains_edge(&e(2, 0, "b")));
        assert!(sub.copy([3]).is_err());
    }

    #[test]
    fn test_clear_edges_and_clear() {
        let graph = sample();
        let sub = graph.subgraph_with_types([0, 1], [EdgeType::new("a")]).unwrap();
        sub.clear_edges();
        assert_eq!(graph.size(), 4);
        assert!(graph.contains_edge(&e(0, 1, "b")));
        assert!(!graph.contains_edge(&e(1, 1, "a")));

        sub.clear();
        assert_eq!(sub.order(), 0);
        assert_eq!(graph.order(), 2);
        assert_eq!(graph.size(), 1);
    }
}
