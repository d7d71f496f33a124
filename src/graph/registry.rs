//! Weak registry of subgraph frames
//!
//! The backing graph keeps a [`Weak`] handle to the frame of every subgraph
//! it has handed out. Dropping the last [`Subgraph`](super::Subgraph) handle
//! frees the frame; the dangling entry is pruned the next time a mutation
//! walks the registry.

use super::event::GraphEvent;
use super::types::{EdgeLabel, VertexId};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::trace;

pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// The filter sets of one subgraph
#[derive(Debug, Clone)]
pub struct SubgraphFrame<T> {
    pub(crate) vertices: FxIndexSet<VertexId>,
    pub(crate) types: FxIndexSet<T>,
}

impl<T: EdgeLabel> SubgraphFrame<T> {
    pub(crate) fn new(vertices: FxIndexSet<VertexId>, types: FxIndexSet<T>) -> Self {
        SubgraphFrame { vertices, types }
    }

    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    pub fn has_type(&self, edge_type: &T) -> bool {
        self.types.contains(edge_type)
    }

    /// Both endpoints and the type pass the frame
    pub fn admits(&self, from: VertexId, to: VertexId, edge_type: &T) -> bool {
        self.has_vertex(from) && self.has_vertex(to) && self.has_type(edge_type)
    }

    /// Shrink the frame in response to a backing mutation
    pub fn apply(&mut self, event: &GraphEvent<T>) {
        match event {
            GraphEvent::VertexRemoved {
                vertex,
                retired_types,
            } => {
                self.vertices.shift_remove(vertex);
                for edge_type in retired_types {
                    self.types.shift_remove(edge_type);
                }
            }
            GraphEvent::TypeRetired(edge_type) => {
                self.types.shift_remove(edge_type);
            }
            GraphEvent::EdgesCleared => self.types.clear(),
            GraphEvent::Cleared => {
                self.vertices.clear();
                self.types.clear();
            }
        }
    }
}

pub(crate) type FrameHandle<T> = Rc<RefCell<SubgraphFrame<T>>>;

#[derive(Debug)]
pub struct SubgraphRegistry<T> {
    frames: Vec<Weak<RefCell<SubgraphFrame<T>>>>,
}

impl<T: EdgeLabel> SubgraphRegistry<T> {
    pub fn new() -> Self {
        SubgraphRegistry { frames: Vec::new() }
    }

    pub(crate) fn register(&mut self, frame: &FrameHandle<T>) {
        self.frames.push(Rc::downgrade(frame));
    }

    /// Deliver an event to every live frame, dropping entries whose subgraph is gone
    pub fn notify(&mut self, event: &GraphEvent<T>) {
        let before = self.frames.len();
        self.frames.retain(|weak| match weak.upgrade() {
            Some(frame) => {
                frame.borrow_mut().apply(event);
                true
            }
            None => false,
        });
        let pruned = before - self.frames.len();
        if pruned > 0 {
            trace!("Pruned {} dropped subgraphs, {} remaining", pruned, self.frames.len());
        }
    }

    /// Entries currently tracked, including ones not yet pruned
    pub fn tracked(&self) -> usize {
        self.frames.len()
    }

    /// Entries whose subgraph is still alive
    pub fn live(&self) -> usize {
        self.frames.iter().filter(|w| w.strong_count() > 0).count()
    }
}

impl<T: EdgeLabel> Default for SubgraphRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
