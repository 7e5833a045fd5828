use crate::{attributes::Attributes, edge_key::EdgeKey};

/// An index into an `EdgeArena`.  Stable for the lifetime of the edge; a
/// freed index may be reused by a later edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(usize);

impl EdgeIndex {
    pub(crate) fn from_raw(index: usize) -> Self {
        EdgeIndex(index)
    }
}

/// The single owned record of one edge.  Every adjacency entry that refers
/// to the edge stores its `EdgeIndex`, never a copy of the record.
///
/// Endpoints are not stored here; they are the adjacency positions the
/// index is entered under.
#[derive(Clone, Debug)]
pub struct EdgeRecord {
    pub key: EdgeKey,
    pub attrs: Attributes,
}

/// Slot-vector storage for edge records with a free list for reuse.
#[derive(Clone, Debug)]
pub struct EdgeArena {
    slots: Vec<Option<EdgeRecord>>,
    free: Vec<usize>,
    len: usize,
}

impl Default for EdgeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeArena {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        EdgeArena {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Gets the number of live records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reserves capacity for at least `additional` more records.
    pub fn reserve(&mut self, additional: usize) {
        self.slots
            .reserve(additional.saturating_sub(self.free.len()));
    }

    /// Inserts a record, returning its index.
    pub fn insert(&mut self, record: EdgeRecord) -> EdgeIndex {
        self.len += 1;
        match self.free.pop() {
            Some(i) => {
                debug_assert!(self.slots[i].is_none());
                self.slots[i] = Some(record);
                EdgeIndex(i)
            }
            None => {
                self.slots.push(Some(record));
                EdgeIndex(self.slots.len() - 1)
            }
        }
    }

    /// Removes the record at the given index, returning it if it exists.
    pub fn remove(&mut self, index: EdgeIndex) -> Option<EdgeRecord> {
        let record = self.slots.get_mut(index.0)?.take()?;
        self.free.push(index.0);
        self.len -= 1;
        Some(record)
    }

    pub fn get(&self, index: EdgeIndex) -> Option<&EdgeRecord> {
        self.slots.get(index.0)?.as_ref()
    }

    pub fn get_mut(&mut self, index: EdgeIndex) -> Option<&mut EdgeRecord> {
        self.slots.get_mut(index.0)?.as_mut()
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attributes::AttrValue, attrs};

    fn record(w: i32) -> EdgeRecord {
        EdgeRecord {
            key: EdgeKey::default(),
            attrs: attrs! { "w" => w },
        }
    }

    fn weight(record: Option<&EdgeRecord>) -> Option<&AttrValue> {
        record.and_then(|r| r.attrs.get("w"))
    }

    #[test]
    fn test_insert_get_remove() {
        let mut arena = EdgeArena::new();
        let a = arena.insert(record(3));
        let b = arena.insert(record(5));
        assert_eq!(arena.len(), 2);
        assert_eq!(weight(arena.get(a)), Some(&3.into()));

        let removed = arena.remove(a);
        assert_eq!(weight(removed.as_ref()), Some(&3.into()));
        assert!(arena.get(a).is_none());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.len(), 1);
        assert_eq!(weight(arena.get(b)), Some(&5.into()));
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut arena = EdgeArena::new();
        let a = arena.insert(record(3));
        arena.insert(record(5));
        arena.remove(a);
        let c = arena.insert(record(9));
        assert_eq!(a, c);
        assert_eq!(arena.len(), 2);
        assert_eq!(weight(arena.get(c)), Some(&9.into()));
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut arena = EdgeArena::new();
        let a = arena.insert(record(1));
        if let Some(record) = arena.get_mut(a) {
            record.attrs.set("w", 2);
        }
        assert_eq!(weight(arena.get(a)), Some(&2.into()));
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(a).is_none());
    }
}
