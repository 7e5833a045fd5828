use std::fmt::Debug;

use indexmap::IndexMap;

use crate::{edge_arena::EdgeIndex, edge_key::EdgeKey};

/// Holds the arena indices of the edges stored under one neighbor entry of
/// the adjacency store.
pub trait EdgeSlot: Clone + Debug + Sized {
    /// Creates a slot holding a single edge.
    fn new(key: EdgeKey, index: EdgeIndex) -> Self;

    /// Returns the number of edges in the slot.
    fn len(&self) -> usize;

    /// Returns `true` if the slot holds no edges and should be dropped.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the index of the edge with the given key.
    fn get(&self, key: &EdgeKey) -> Option<EdgeIndex>;

    /// Gets the index of the first edge in the slot.
    fn first(&self) -> Option<EdgeIndex>;

    /// Gets the key and index of the most recently inserted edge.
    fn last(&self) -> Option<(&EdgeKey, EdgeIndex)>;

    fn contains_key(&self, key: &EdgeKey) -> bool {
        self.get(key).is_some()
    }

    /// Inserts an edge, returning the index of the edge it replaced, if any.
    fn insert(&mut self, key: EdgeKey, index: EdgeIndex) -> Option<EdgeIndex>;

    /// Removes the edge with the given key, returning its index.
    fn remove(&mut self, key: &EdgeKey) -> Option<EdgeIndex>;

    /// Iterates over the edge indices in insertion order.
    fn indices(&self) -> impl Iterator<Item = EdgeIndex> + '_;

    /// Iterates over the edge keys in insertion order.
    fn keys(&self) -> impl Iterator<Item = &EdgeKey> + '_;
}

/// Slot for single-edge graphs: at most one edge per neighbor.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSlot(Option<(EdgeKey, EdgeIndex)>);

impl EdgeSlot for SingleSlot {
    fn new(key: EdgeKey, index: EdgeIndex) -> Self {
        SingleSlot(Some((key, index)))
    }

    fn len(&self) -> usize {
        usize::from(self.0.is_some())
    }

    fn get(&self, key: &EdgeKey) -> Option<EdgeIndex> {
        self.0
            .as_ref()
            .and_then(|(k, index)| (k == key).then_some(*index))
    }

    fn first(&self) -> Option<EdgeIndex> {
        self.0.as_ref().map(|(_, index)| *index)
    }

    fn last(&self) -> Option<(&EdgeKey, EdgeIndex)> {
        self.0.as_ref().map(|(key, index)| (key, *index))
    }

    fn insert(&mut self, key: EdgeKey, index: EdgeIndex) -> Option<EdgeIndex> {
        self.0.replace((key, index)).map(|(_, old)| old)
    }

    fn remove(&mut self, key: &EdgeKey) -> Option<EdgeIndex> {
        if self.contains_key(key) {
            self.0.take().map(|(_, index)| index)
        } else {
            None
        }
    }

    fn indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.0.iter().map(|(_, index)| *index)
    }

    fn keys(&self) -> impl Iterator<Item = &EdgeKey> + '_ {
        self.0.iter().map(|(key, _)| key)
    }
}

/// Slot for multigraphs: any number of edges, each under a distinct key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedSlots {
    entries: IndexMap<EdgeKey, EdgeIndex>,
}

impl EdgeSlot for KeyedSlots {
    fn new(key: EdgeKey, index: EdgeIndex) -> Self {
        let mut entries = IndexMap::with_capacity(1);
        entries.insert(key, index);
        KeyedSlots { entries }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, key: &EdgeKey) -> Option<EdgeIndex> {
        self.entries.get(key).copied()
    }

    fn first(&self) -> Option<EdgeIndex> {
        self.entries.first().map(|(_, index)| *index)
    }

    fn last(&self) -> Option<(&EdgeKey, EdgeIndex)> {
        self.entries.last().map(|(key, index)| (key, *index))
    }

    fn insert(&mut self, key: EdgeKey, index: EdgeIndex) -> Option<EdgeIndex> {
        self.entries.insert(key, index)
    }

    fn remove(&mut self, key: &EdgeKey) -> Option<EdgeIndex> {
        self.entries.shift_remove(key)
    }

    fn indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.entries.values().copied()
    }

    fn keys(&self) -> impl Iterator<Item = &EdgeKey> + '_ {
        self.entries.keys()
    }
}
