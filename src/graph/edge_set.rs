//! Per-vertex incident edge storage
//!
//! Every vertex owns one [`VertexEdgeSet`] holding all edges that touch it.
//! Edges are keyed by the neighbor on the other end and then by type, with a
//! secondary type -> neighbors index so that add, remove and contains are
//! amortized O(1) and per-type lookups avoid scanning the whole set.

use super::edge::Edge;
use super::types::{EdgeLabel, Orientation, VertexId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Which side of the root an edge sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// root -> other (also every undirected edge and directed self-loops)
    Out,
    /// other -> root
    In,
}

/// Edge types linking the root to a single neighbor
#[derive(Debug, Clone)]
struct Link<T> {
    out: FxHashSet<T>,
    inc: FxHashSet<T>,
}

impl<T: EdgeLabel> Link<T> {
    fn new() -> Self {
        Link {
            out: FxHashSet::default(),
            inc: FxHashSet::default(),
        }
    }

    fn slot(&self, slot: Slot) -> &FxHashSet<T> {
        match slot {
            Slot::Out => &self.out,
            Slot::In => &self.inc,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut FxHashSet<T> {
        match slot {
            Slot::Out => &mut self.out,
            Slot::In => &mut self.inc,
        }
    }

    fn has_type(&self, edge_type: &T) -> bool {
        self.out.contains(edge_type) || self.inc.contains(edge_type)
    }

    fn len(&self) -> usize {
        self.out.len() + self.inc.len()
    }

    fn is_empty(&self) -> bool {
        self.out.is_empty() && self.inc.is_empty()
    }
}

/// All edges incident on one vertex
#[derive(Debug, Clone)]
pub struct VertexEdgeSet<T> {
    root: VertexId,
    orientation: Orientation,
    links: FxHashMap<VertexId, Link<T>>,
    by_type: FxHashMap<T, FxHashSet<VertexId>>,
    len: usize,
}

impl<T: EdgeLabel> VertexEdgeSet<T> {
    pub fn new(root: VertexId, orientation: Orientation) -> Self {
        VertexEdgeSet {
            root,
            orientation,
            links: FxHashMap::default(),
            by_type: FxHashMap::default(),
            len: 0,
        }
    }

    /// The vertex every edge in this set touches
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Number of incident edges (a self-loop counts once)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve an edge to (neighbor, slot), or `None` if it can never live here
    fn locate(&self, edge: &Edge<T>) -> Option<(VertexId, Slot)> {
        if edge.orientation != self.orientation {
            return None;
        }
        if edge.from == self.root {
            Some((edge.to, Slot::Out))
        } else if edge.to == self.root {
            match self.orientation {
                Orientation::Directed => Some((edge.from, Slot::In)),
                Orientation::Undirected => Some((edge.from, Slot::Out)),
            }
        } else {
            None
        }
    }

    fn materialize(&self, other: VertexId, slot: Slot, edge_type: &T) -> Edge<T> {
        let (from, to) = match slot {
            Slot::Out => (self.root, other),
            Slot::In => (other, self.root),
        };
        Edge {
            from,
            to,
            edge_type: edge_type.clone(),
            orientation: self.orientation,
        }
    }

    /// Add an edge. Returns false if it is already present or does not touch the root.
    pub fn insert(&mut self, edge: &Edge<T>) -> bool {
        let Some((other, slot)) = self.locate(edge) else {
            return false;
        };
        let link = self.links.entry(other).or_insert_with(Link::new);
        if !link.slot_mut(slot).insert(edge.edge_type.clone()) {
            return false;
        }
        self.by_type
            .entry(edge.edge_type.clone())
            .or_default()
            .insert(other);
        self.len += 1;
        true
    }

    /// Remove an edge. Returns false if it was not present.
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        let Some((other, slot)) = self.locate(edge) else {
            return false;
        };
        let Some(link) = self.links.get_mut(&other) else {
            return false;
        };
        if !link.slot_mut(slot).remove(&edge.edge_type) {
            return false;
        }
        let still_typed = link.has_type(&edge.edge_type);
        if link.is_empty() {
            self.links.remove(&other);
        }
        if !still_typed {
            self.unindex_type(&edge.edge_type, other);
        }
        self.len -= 1;
        true
    }

    fn unindex_type(&mut self, edge_type: &T, other: VertexId) {
        if let Some(neighbors) = self.by_type.get_mut(edge_type) {
            neighbors.remove(&other);
            if neighbors.is_empty() {
                self.by_type.remove(edge_type);
            }
        }
    }

    pub fn contains(&self, edge: &Edge<T>) -> bool {
        match self.locate(edge) {
            Some((other, slot)) => self
                .links
                .get(&other)
                .is_some_and(|link| link.slot(slot).contains(&edge.edge_type)),
            None => false,
        }
    }

    /// Check whether any edge joins the root and `other`, in either direction
    pub fn connects(&self, other: VertexId) -> bool {
        self.links.contains_key(&other)
    }

    /// Check whether an edge leads from the root to `other`.
    /// For undirected sets this is the same as [`connects`](Self::connects).
    pub fn has_successor(&self, other: VertexId) -> bool {
        self.links.get(&other).is_some_and(|link| !link.out.is_empty())
    }

    /// Check whether an edge of `edge_type` leads from the root to `other`
    pub fn has_successor_of_type(&self, other: VertexId, edge_type: &T) -> bool {
        self.links
            .get(&other)
            .is_some_and(|link| link.out.contains(edge_type))
    }

    /// Every edge in the set
    pub fn iter(&self) -> impl Iterator<Item = Edge<T>> + '_ {
        self.links
            .iter()
            .flat_map(move |(&other, link)| self.link_edges(other, link))
    }

    fn link_edges<'a>(
        &'a self,
        other: VertexId,
        link: &'a Link<T>,
    ) -> impl Iterator<Item = Edge<T>> + 'a {
        link.out
            .iter()
            .map(move |t| self.materialize(other, Slot::Out, t))
            .chain(link.inc.iter().map(move |t| self.materialize(other, Slot::In, t)))
    }

    /// Edges joining the root and `other`, in either direction
    pub fn iter_to(&self, other: VertexId) -> impl Iterator<Item = Edge<T>> + '_ {
        self.links
            .get(&other)
            .into_iter()
            .flat_map(move |link| self.link_edges(other, link))
    }

    /// Edges joining the root and `other`, in either direction
    pub fn edges_to(&self, other: VertexId) -> Vec<Edge<T>> {
        self.iter_to(other).collect()
    }

    /// Number of edges joining the root and `other`
    pub fn count_to(&self, other: VertexId) -> usize {
        self.links.get(&other).map_or(0, Link::len)
    }

    /// Edges of a single type
    pub fn edges_of_type(&self, edge_type: &T) -> Vec<Edge<T>> {
        let Some(neighbors) = self.by_type.get(edge_type) else {
            return Vec::new();
        };
        let mut edges = Vec::new();
        for &other in neighbors {
            if let Some(link) = self.links.get(&other) {
                if link.out.contains(edge_type) {
                    edges.push(self.materialize(other, Slot::Out, edge_type));
                }
                if link.inc.contains(edge_type) {
                    edges.push(self.materialize(other, Slot::In, edge_type));
                }
            }
        }
        edges
    }

    /// Edges for which the root is the canonical owner (see [`Edge::owner`])
    pub fn owned(&self) -> impl Iterator<Item = Edge<T>> + '_ {
        let root = self.root;
        self.iter().filter(move |e| e.owner() == root)
    }

    /// Types present on at least one incident edge
    pub fn types(&self) -> impl Iterator<Item = &T> + '_ {
        self.by_type.keys()
    }

    /// Adjacent vertices (includes the root itself when it has a self-loop)
    pub fn neighbors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.links.keys().copied()
    }

    /// Vertices reachable over one outgoing edge
    pub fn successors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.links
            .iter()
            .filter(|(_, link)| !link.out.is_empty())
            .map(|(&v, _)| v)
    }

    /// Vertices with an edge leading to the root
    pub fn predecessors(&self) -> impl Iterator<Item = VertexId> + '_ {
        let root = self.root;
        let directed = self.orientation.is_directed();
        self.links
            .iter()
            .filter(move |&(&v, link)| {
                !directed || !link.inc.is_empty() || (v == root && !link.out.is_empty())
            })
            .map(|(&v, _)| v)
    }

    pub fn out_degree(&self) -> usize {
        match self.orientation {
            Orientation::Directed => self.links.values().map(|l| l.out.len()).sum(),
            Orientation::Undirected => self.len,
        }
    }

    pub fn in_degree(&self) -> usize {
        match self.orientation {
            Orientation::Directed => {
                let self_loops = self.links.get(&self.root).map_or(0, |l| l.out.len());
                self.links.values().map(|l| l.inc.len()).sum::<usize>() + self_loops
            }
            Orientation::Undirected => self.len,
        }
    }

    /// Drop every edge joining the root and `other`, returning the removed edges
    pub fn disconnect(&mut self, other: VertexId) -> Vec<Edge<T>> {
        let Some(link) = self.links.remove(&other) else {
            return Vec::new();
        };
        let removed: Vec<Edge<T>> = self.link_edges(other, &link).collect();
        for edge_type in link.out.iter().chain(link.inc.iter()) {
            self.unindex_type(edge_type, other);
        }
        self.len -= removed.len();
        removed
    }

    /// Drop every edge, keeping the set itself
    pub fn clear(&mut self) {
        self.links.clear();
        self.by_type.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::EdgeType;

    type E = Edge<EdgeType>;

    fn directed_set(root: VertexId) -> VertexEdgeSet<EdgeType> {
        VertexEdgeSet::new(root, Orientation::Directed)
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = directed_set(1);
        let e = E::directed(1, 2, "KNOWS");

        assert!(set.insert(&e));
        assert!(!set.insert(&e));
        assert!(set.contains(&e));
        assert!(!set.contains(&E::directed(2, 1, "KNOWS")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_rejects_foreign_edges() {
        let mut set = directed_set(1);
        assert!(!set.insert(&E::directed(2, 3, "KNOWS")));
        assert!(!set.insert(&E::undirected(1, 3, "KNOWS")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_in_out_partition() {
        let mut set = directed_set(1);
        set.insert(&E::directed(1, 2, "a"));
        set.insert(&E::directed(1, 3, "a"));
        set.insert(&E::directed(4, 1, "a"));
        set.insert(&E::directed(2, 1, "b"));

        assert_eq!(set.len(), 4);
        assert_eq!(set.out_degree(), 2);
        assert_eq!(set.in_degree(), 2);

        let mut succ: Vec<_> = set.successors().collect();
        succ.sort();
        assert_eq!(succ, vec![2, 3]);
        let mut pred: Vec<_> = set.predecessors().collect();
        pred.sort();
        assert_eq!(pred, vec![2, 4]);
        assert!(set.has_successor(2));
        assert!(!set.has_successor(4));
    }

    #[test]
    fn test_parallel_typed_edges() {
        let mut set = directed_set(0);
        set.insert(&E::directed(0, 1, "type-1"));
        set.insert(&E::directed(0, 1, "type-2"));
        set.insert(&E::directed(1, 0, "type-1"));

        assert_eq!(set.count_to(1), 3);
        assert_eq!(set.edges_to(1).len(), 3);
        assert_eq!(set.edges_of_type(&EdgeType::new("type-1")).len(), 2);

        // Removing one direction keeps the type indexed for the neighbor
        assert!(set.remove(&E::directed(0, 1, "type-1")));
        assert_eq!(set.edges_of_type(&EdgeType::new("type-1")).len(), 1);
        assert!(set.remove(&E::directed(1, 0, "type-1")));
        assert!(set.edges_of_type(&EdgeType::new("type-1")).is_empty());
        assert_eq!(set.types().count(), 1);
    }

    #[test]
    fn test_remove_cleans_links() {
        let mut set = directed_set(5);
        let e = E::directed(5, 6, "x");
        set.insert(&e);
        assert!(set.remove(&e));
        assert!(!set.remove(&e));
        assert!(!set.connects(6));
        assert_eq!(set.neighbors().count(), 0);
        assert_eq!(set.types().count(), 0);
    }

    #[test]
    fn test_self_loop_counts_once() {
        let mut set = directed_set(3);
        let e = E::directed(3, 3, "loop");
        assert!(set.insert(&e));
        assert!(!set.insert(&e));
        assert_eq!(set.len(), 1);
        assert_eq!(set.in_degree(), 1);
        assert_eq!(set.out_degree(), 1);
        assert_eq!(set.predecessors().collect::<Vec<_>>(), vec![3]);
        assert_eq!(set.owned().count(), 1);
    }

    #[test]
    fn test_undirected_both_orders_match() {
        let mut set = VertexEdgeSet::<EdgeType>::new(2, Orientation::Undirected);
        assert!(set.insert(&E::undirected(1, 2, "t")));
        assert!(!set.insert(&E::undirected(2, 1, "t")));
        assert!(set.contains(&E::undirected(2, 1, "t")));
        assert_eq!(set.in_degree(), 1);
        assert_eq!(set.out_degree(), 1);
        assert!(set.has_successor(1));
    }

    #[test]
    fn test_owned_edges() {
        let mut set = directed_set(1);
        set.insert(&E::directed(1, 2, "t"));
        set.insert(&E::directed(0, 1, "t"));
        let owned: Vec<_> = set.owned().collect();
        assert_eq!(owned, vec![E::directed(0, 1, "t")]);
    }

    #[test]
    fn test_disconnect() {
        let mut set = directed_set(1);
        set.insert(&E::directed(1, 2, "a"));
        set.insert(&E::directed(2, 1, "b"));
        set.insert(&E::directed(1, 3, "a"));

        let removed = set.disconnect(2);
        assert_eq!(removed.len(), 2);
        assert_eq!(set.len(), 1);
        assert!(!set.connects(2));
        assert!(set.edges_of_type(&EdgeType::new("b")).is_empty());
        assert_eq!(set.edges_of_type(&EdgeType::new("a")).len(), 1);
        assert!(set.disconnect(2).is_empty());
    }
}
