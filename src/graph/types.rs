//! Core type definitions for the multigraph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Vertex identifier. Vertices are plain non-negative integers chosen by the caller.
pub type VertexId = u32;

/// Anything usable as an edge-type label.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type, so callers
/// can key their graphs by enums, integers or the provided [`EdgeType`].
pub trait EdgeLabel: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> EdgeLabel for T {}

/// Whether edges are ordered pairs or unordered pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `a -> b` and `b -> a` are distinct edges
    #[default]
    Directed,
    /// `a - b` and `b - a` are the same edge
    Undirected,
}

impl Orientation {
    pub fn is_directed(&self) -> bool {
        matches!(self, Orientation::Directed)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Directed => write!(f, "directed"),
            Orientation::Undirected => write!(f, "undirected"),
        }
    }
}

/// String edge type (e.g., "type-1", "cites", "co-occurs")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeType(String);

impl EdgeType {
    pub fn new(edge_type: impl Into<String>) -> Self {
        EdgeType(edge_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeType {
    fn from(s: String) -> Self {
        EdgeType(s)
    }
}

impl From<&str> for EdgeType {
    fn from(s: &str) -> Self {
        EdgeType(s.to_string())
    }
}
