//! Multigraph construction settings

use super::types::Orientation;
use serde::{Deserialize, Serialize};

/// Multigraph configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultigraphConfig {
    /// Edge orientation for every edge in the graph
    pub orientation: Orientation,
    /// Number of vertices to reserve space for up front
    pub vertex_capacity: usize,
}

impl Default for MultigraphConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Directed,
            vertex_capacity: 16,
        }
    }
}

impl MultigraphConfig {
    pub fn directed() -> Self {
        Self::default()
    }

    pub fn undirected() -> Self {
        Self {
            orientation: Orientation::Undirected,
            ..Self::default()
        }
    }

    pub fn with_vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }
}
