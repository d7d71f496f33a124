//! Typed edge record
//!
//! An edge is a `(from, to, type)` triple plus the orientation of the graph it
//! belongs to. Equality and hashing follow the orientation: directed edges
//! compare endpoints in order, undirected edges compare them as a set.

use super::types::{EdgeLabel, Orientation, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An edge between two vertices with a type label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    /// Source vertex (tail for directed edges)
    pub from: VertexId,

    /// Target vertex (head for directed edges)
    pub to: VertexId,

    /// Type of the edge
    pub edge_type: T,

    /// Whether `from`/`to` order is part of the edge's identity
    pub orientation: Orientation,
}

impl<T: EdgeLabel> Edge<T> {
    /// Create an edge with an explicit orientation
    pub fn new(
        from: VertexId,
        to: VertexId,
        edge_type: impl Into<T>,
        orientation: Orientation,
    ) -> Self {
        Edge {
            from,
            to,
            edge_type: edge_type.into(),
            orientation,
        }
    }

    /// Create a directed edge `from -> to`
    pub fn directed(from: VertexId, to: VertexId, edge_type: impl Into<T>) -> Self {
        Self::new(from, to, edge_type, Orientation::Directed)
    }

    /// Create an undirected edge `from - to`
    pub fn undirected(from: VertexId, to: VertexId, edge_type: impl Into<T>) -> Self {
        Self::new(from, to, edge_type, Orientation::Undirected)
    }

    pub fn is_directed(&self) -> bool {
        self.orientation.is_directed()
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Check if this edge has `vertex` as either endpoint
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.from == vertex || self.to == vertex
    }

    /// Check if this edge connects two specific vertices (in either direction)
    pub fn connects(&self, v1: VertexId, v2: VertexId) -> bool {
        (self.from == v1 && self.to == v2) || (self.from == v2 && self.to == v1)
    }

    /// The endpoint opposite to `vertex`, if `vertex` is an endpoint at all
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if self.from == vertex {
            Some(self.to)
        } else if self.to == vertex {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn starts_from(&self, vertex: VertexId) -> bool {
        self.from == vertex
    }

    pub fn ends_at(&self, vertex: VertexId) -> bool {
        self.to == vertex
    }

    /// The same edge with its endpoints swapped
    pub fn reversed(&self) -> Self {
        Edge {
            from: self.to,
            to: self.from,
            edge_type: self.edge_type.clone(),
            orientation: self.orientation,
        }
    }

    /// The endpoint whose edge set yields this edge during whole-graph
    /// iteration: the head of a directed edge, the larger id of an undirected one.
    pub fn owner(&self) -> VertexId {
        match self.orientation {
            Orientation::Directed => self.to,
            Orientation::Undirected => self.from.max(self.to),
        }
    }

    fn identity(&self) -> (VertexId, VertexId) {
        match self.orientation {
            Orientation::Directed => (self.from, self.to),
            Orientation::Undirected => (self.from.min(self.to), self.from.max(self.to)),
        }
    }
}

impl<T: EdgeLabel> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation
            && self.edge_type == other.edge_type
            && self.identity() == other.identity()
    }
}

impl<T: EdgeLabel> Eq for Edge<T> {}

impl<T: EdgeLabel> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.orientation.hash(state);
        self.identity().hash(state);
        self.edge_type.hash(state);
    }
}

impl<T: EdgeLabel> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.orientation {
            Orientation::Directed => write!(f, "{} -[{:?}]-> {}", self.from, self.edge_type, self.to),
            Orientation::Undirected => write!(f, "{} -[{:?}]- {}", self.from, self.edge_type, self.to),
        }
    }
}
