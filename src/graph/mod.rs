//! Core multigraph implementation
//!
//! This module implements the typed multigraph data model with:
//! - Integer vertex ids and typed edges, directed or undirected
//! - Parallel edges between the same vertices when their types differ
//! - Per-vertex adjacency indexed by neighbor and by edge type
//! - Live subgraph views tracked through weak references
//! - Write-through vertex, edge, adjacency and neighbor views

pub mod config;
pub mod edge;
pub mod edge_set;
pub mod event;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod subgraph;
pub mod traits;
pub mod type_index;
pub mod types;
pub mod view;

// Re-export main types
pub use config::MultigraphConfig;
pub use edge::Edge;
pub use edge_set::VertexEdgeSet;
pub use event::GraphEvent;
pub use registry::{SubgraphFrame, SubgraphRegistry};
pub use snapshot::GraphSnapshot;
pub use store::{ErrorKind, GraphError, GraphResult, Multigraph, MultigraphCore};
pub use subgraph::Subgraph;
pub use traits::{structurally_equal, TypedGraph};
pub use type_index::TypeCardinalityIndex;
pub use types::{EdgeLabel, EdgeType, Orientation, VertexId};
pub use view::{
    AdjacencyView, EdgeCursor, EdgeTypesView, EdgeView, NeighborCursor, NeighborView,
    VertexCursor, VertexView,
};
