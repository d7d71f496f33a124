//! Global edge-type cardinality index
//!
//! Counts how many edges carry each type. A type is present exactly while its
//! count is positive; the decrement that reaches zero retires it.

use super::types::EdgeLabel;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct TypeCardinalityIndex<T> {
    counts: FxHashMap<T, usize>,
}

impl<T: EdgeLabel> TypeCardinalityIndex<T> {
    pub fn new() -> Self {
        TypeCardinalityIndex {
            counts: FxHashMap::default(),
        }
    }

    /// Record one more edge of `edge_type`. Returns true if the type is new.
    pub fn increment(&mut self, edge_type: &T) -> bool {
        match self.counts.get_mut(edge_type) {
            Some(count) => {
                *count += 1;
                false
            }
            None => {
                self.counts.insert(edge_type.clone(), 1);
                true
            }
        }
    }

    /// Record one fewer edge of `edge_type`. Returns true if the type was retired.
    pub fn decrement(&mut self, edge_type: &T) -> bool {
        let Some(count) = self.counts.get_mut(edge_type) else {
            debug_assert!(false, "decrement of absent edge type {:?}", edge_type);
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(edge_type);
            true
        } else {
            false
        }
    }

    /// Drop a type regardless of its count. Returns the count it had.
    pub fn retire(&mut self, edge_type: &T) -> usize {
        self.counts.remove(edge_type).unwrap_or(0)
    }

    pub fn contains(&self, edge_type: &T) -> bool {
        self.counts.contains_key(edge_type)
    }

    pub fn count(&self, edge_type: &T) -> usize {
        self.counts.get(edge_type).copied().unwrap_or(0)
    }

    pub fn types(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts.keys()
    }

    /// Number of distinct types
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

impl<T: EdgeLabel> Default for TypeCardinalityIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
