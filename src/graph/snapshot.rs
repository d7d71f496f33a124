//! Plain-data graph snapshot
//!
//! The exchange format between a live [`Multigraph`](super::Multigraph) and
//! anything that writes graphs to disk or over the wire.

use super::edge::Edge;
use super::store::GraphResult;
use super::types::{Orientation, VertexId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot<T> {
    pub orientation: Orientation,
    /// Every vertex, sorted by id (isolated vertices included)
    pub vertices: Vec<VertexId>,
    /// Every edge exactly once
    pub edges: Vec<Edge<T>>,
}

impl<T: Serialize + DeserializeOwned> GraphSnapshot<T> {
    pub fn to_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
