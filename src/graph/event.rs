//! Structural change notifications
//!
//! Emitted by the backing graph to every live subgraph frame whenever a
//! mutation can shrink what a subgraph is allowed to see.

use super::types::VertexId;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent<T> {
    /// A vertex and all of its edges were removed. `retired_types` lists the
    /// edge types whose last edge went with it.
    VertexRemoved {
        vertex: VertexId,
        retired_types: Vec<T>,
    },
    /// The last edge of a type was removed
    TypeRetired(T),
    /// Every edge was removed; vertices remain
    EdgesCleared,
    /// Every vertex and edge was removed
    Cleared,
}
