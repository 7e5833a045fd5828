//! The node → neighbor → edge-slot map underlying every graph kind.

use std::hash::Hash;

use indexmap::{IndexMap, map::Entry};

use crate::{edge_arena::EdgeIndex, edge_key::EdgeKey, edge_slot::EdgeSlot};

/// One node's neighbor map.
pub type Row<N, S> = IndexMap<N, S>;

/// Maps each node to its neighbors, and each neighbor to the slot holding
/// the indices of the edges between them.
///
/// Rows and neighbors are kept in insertion order.  Removals shift later
/// entries down so the relative order of the survivors never changes.
#[derive(Clone, Debug)]
pub struct AdjacencyStore<N, S> {
    rows: IndexMap<N, Row<N, S>>,
}

impl<N, S> Default for AdjacencyStore<N, S> {
    fn default() -> Self {
        AdjacencyStore {
            rows: IndexMap::new(),
        }
    }
}

impl<N, S> AdjacencyStore<N, S>
where
    N: Eq + Hash + Clone,
    S: EdgeSlot,
{
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    /// Adds an empty row for `node` if it has none.
    pub fn insert_node(&mut self, node: N) {
        self.rows.entry(node).or_default();
    }

    /// Removes the row for `node`, returning it.  Back-references held by
    /// other rows are the caller's responsibility.
    pub fn remove_node(&mut self, node: &N) -> Option<Row<N, S>> {
        self.rows.shift_remove(node)
    }

    /// Gets the stored node key together with its row.
    pub fn row(&self, node: &N) -> Option<(&N, &Row<N, S>)> {
        self.rows.get_key_value(node)
    }

    pub fn slot(&self, from: &N, to: &N) -> Option<&S> {
        self.rows.get(from)?.get(to)
    }

    /// Records the edge `index` under `from → to`, creating the neighbor
    /// entry if needed.  Both rows must already exist.
    pub fn link(&mut self, from: &N, to: &N, key: EdgeKey, index: EdgeIndex) {
        debug_assert!(self.rows.contains_key(to), "link target has no row");
        let Some(row) = self.rows.get_mut(from) else {
            debug_assert!(false, "link source has no row");
            return;
        };
        match row.entry(to.clone()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().insert(key, index);
            }
            Entry::Vacant(entry) => {
                entry.insert(S::new(key, index));
            }
        }
    }

    /// Removes the edge with `key` from `from → to`, dropping the neighbor
    /// entry when its last edge goes.
    pub fn unlink(&mut self, from: &N, to: &N, key: &EdgeKey) -> Option<EdgeIndex> {
        let row = self.rows.get_mut(from)?;
        let slot = row.get_mut(to)?;
        let removed = slot.remove(key);
        if slot.is_empty() {
            row.shift_remove(to);
        }
        removed
    }

    /// Empties every row while keeping the nodes.
    pub fn clear_edges(&mut self) {
        for row in self.rows.values_mut() {
            row.clear();
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
