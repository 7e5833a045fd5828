use std::fmt::Debug;

use crate::edge_slot::{EdgeSlot, KeyedSlots, SingleSlot};

/// Marker type representing single edges (no multiple edges between same nodes).
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SingleEdge;

/// Marker type representing multiple edges (multiple edges allowed between same nodes).
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MultipleEdges;

/// Trait defining the edge multiplicity behavior of graphs.
///
/// This trait is implemented by [`SingleEdge`] and [`MultipleEdges`] marker
/// types.  Besides answering whether parallel edges are allowed, it selects
/// the container that holds the edges between one pair of neighbors in the
/// adjacency store.
pub trait EdgeMultiplicity: Copy + Debug + Default + 'static {
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    /// Container for the edges between one ordered pair of adjacency entries.
    type Slot: EdgeSlot;

    fn allows_parallel_edges() -> bool;
}

impl EdgeMultiplicity for SingleEdge {
    const NAME: &'static str = "single-edge";

    type Slot = SingleSlot;

    fn allows_parallel_edges() -> bool {
        false
    }
}

impl EdgeMultiplicity for MultipleEdges {
    const NAME: &'static str = "multi-edge";

    type Slot = KeyedSlots;

    fn allows_parallel_edges() -> bool {
        true
    }
}
