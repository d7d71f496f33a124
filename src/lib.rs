//! Typed Multigraph
//!
//! A sparse multigraph keyed by integer vertex ids, with typed edges and live
//! subgraph views that stay synchronized with the graph they were cut from.
//!
//! # Architecture
//!
//! - [`Multigraph`] is a shared handle over the vertex map and the edge-type
//!   index. Its mutating methods take `&self`.
//! - [`Subgraph`] is a vertex subset and an edge-type subset over a graph. The
//!   graph keeps only weak references to its subgraphs and shrinks their
//!   frames when vertices are removed or edge types retire.
//! - [`TypedGraph`] is the read/write contract both implement, including the
//!   live [`VertexView`], [`EdgeView`], [`AdjacencyView`], [`NeighborView`]
//!   and [`EdgeTypesView`] collections.
//!
//! ## Example Usage
//!
//! ```rust
//! use typed_multigraph::prelude::*;
//!
//! let graph: Multigraph = Multigraph::directed();
//! graph.add_edge(Edge::directed(0, 1, "KNOWS")).unwrap();
//! graph.add_edge(Edge::directed(0, 1, "WORKS_WITH")).unwrap();
//! graph.add_edge(Edge::directed(1, 2, "KNOWS")).unwrap();
//!
//! // Live view over two vertices and one edge type
//! let knows = graph
//!     .subgraph_with_types([0, 1], [EdgeType::new("KNOWS")])
//!     .unwrap();
//! assert_eq!(knows.size(), 1);
//!
//! // The view follows later mutations of the graph
//! graph.remove_vertex(1).unwrap();
//! assert_eq!(knows.order(), 1);
//! assert_eq!(knows.size(), 0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    structurally_equal, AdjacencyView, Edge, EdgeLabel, EdgeTypesView, EdgeType, EdgeView,
    ErrorKind, GraphError, GraphResult, GraphSnapshot, Multigraph, MultigraphConfig,
    NeighborView, Orientation, Subgraph, TypedGraph, VertexId, VertexView,
};

/// Everything needed to build and query graphs
pub mod prelude {
    pub use crate::graph::{
        Edge, EdgeType, GraphError, GraphResult, Multigraph, MultigraphConfig, Orientation,
        Subgraph, TypedGraph, VertexId,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
