use std::fmt::Debug;

/// Marker type representing directed graph edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Directed;

/// Marker type representing undirected graph edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Undirected;

/// Trait defining the directedness behavior of graph edges.
///
/// This trait is implemented by [`Directed`] and [`Undirected`] marker types
/// to provide compile-time specialization of graph behavior.  It is
/// orthogonal to [`EdgeMultiplicity`](crate::EdgeMultiplicity); the two are
/// combined as type parameters of [`CoreGraph`](crate::CoreGraph).
pub trait Directedness: Copy + Debug + Default + 'static {
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    fn is_directed() -> bool;
}

impl Directedness for Directed {
    const NAME: &'static str = "directed";

    fn is_directed() -> bool {
        true
    }
}

impl Directedness for Undirected {
    const NAME: &'static str = "undirected";

    fn is_directed() -> bool {
        false
    }
}
