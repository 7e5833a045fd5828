//! Node and edge predicates used by [`SubgraphView`](crate::graph_views::SubgraphView).
//!
//! Any `Fn(&N) -> bool` closure is a node filter and any
//! `Fn(&N, &N, &EdgeKey) -> bool` closure is an edge filter.  The stock
//! filters below cover the common cases of showing or hiding explicit sets.

use std::collections::HashSet;

use crate::{edge_key::EdgeKey, view::NodeKey};

pub trait NodeFilter<N> {
    fn show_node(&self, node: &N) -> bool;
}

pub trait EdgeFilter<N> {
    fn show_edge(&self, source: &N, target: &N, key: &EdgeKey) -> bool;
}

impl<N, F> NodeFilter<N> for F
where
    F: Fn(&N) -> bool,
{
    fn show_node(&self, node: &N) -> bool {
        self(node)
    }
}

impl<N, F> EdgeFilter<N> for F
where
    F: Fn(&N, &N, &EdgeKey) -> bool,
{
    fn show_edge(&self, source: &N, target: &N, key: &EdgeKey) -> bool {
        self(source, target, key)
    }
}

/// Shows everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFilter;

impl<N> NodeFilter<N> for NoFilter {
    fn show_node(&self, _node: &N) -> bool {
        true
    }
}

impl<N> EdgeFilter<N> for NoFilter {
    fn show_edge(&self, _source: &N, _target: &N, _key: &EdgeKey) -> bool {
        true
    }
}

/// Shows only the listed nodes.
#[derive(Clone, Debug)]
pub struct ShowNodes<N> {
    nodes: HashSet<N>,
}

impl<N: NodeKey> ShowNodes<N> {
    pub fn new(nodes: impl IntoIterator<Item = N>) -> Self {
        ShowNodes {
            nodes: nodes.into_iter().collect(),
        }
    }
}

impl<N: NodeKey> NodeFilter<N> for ShowNodes<N> {
    fn show_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }
}

/// Hides the listed nodes.
#[derive(Clone, Debug)]
pub struct HideNodes<N> {
    nodes: HashSet<N>,
}

impl<N: NodeKey> HideNodes<N> {
    pub fn new(nodes: impl IntoIterator<Item = N>) -> Self {
        HideNodes {
            nodes: nodes.into_iter().collect(),
        }
    }
}

impl<N: NodeKey> NodeFilter<N> for HideNodes<N> {
    fn show_node(&self, node: &N) -> bool {
        !self.nodes.contains(node)
    }
}

/// A set of edges named either by endpoints alone, matching every parallel
/// edge between them, or by endpoints and key.
///
/// An undirected set matches an edge in either orientation.
#[derive(Clone, Debug)]
pub struct EdgeSet<N> {
    pairs: HashSet<(N, N)>,
    keyed: HashSet<(N, N, EdgeKey)>,
    directed: bool,
}

impl<N: NodeKey> EdgeSet<N> {
    fn from_pairs(directed: bool, pairs: impl IntoIterator<Item = (N, N)>) -> Self {
        EdgeSet {
            pairs: pairs.into_iter().collect(),
            keyed: HashSet::new(),
            directed,
        }
    }

    fn from_triples(directed: bool, triples: impl IntoIterator<Item = (N, N, EdgeKey)>) -> Self {
        EdgeSet {
            pairs: HashSet::new(),
            keyed: triples.into_iter().collect(),
            directed,
        }
    }

    pub fn contains(&self, source: &N, target: &N, key: &EdgeKey) -> bool {
        self.contains_oriented(source, target, key)
            || (!self.directed && self.contains_oriented(target, source, key))
    }

    fn contains_oriented(&self, source: &N, target: &N, key: &EdgeKey) -> bool {
        // Tuple lookups need owned keys.
        (!self.pairs.is_empty() && self.pairs.contains(&(source.clone(), target.clone())))
            || (!self.keyed.is_empty()
                && self
                    .keyed
                    .contains(&(source.clone(), target.clone(), key.clone())))
    }

    /// Iterates over every node named as an endpoint.
    pub fn endpoints(&self) -> impl Iterator<Item = &N> {
        self.pairs
            .iter()
            .flat_map(|(s, t)| [s, t])
            .chain(self.keyed.iter().flat_map(|(s, t, _)| [s, t]))
    }
}

/// Shows only the listed edges.
#[derive(Clone, Debug)]
pub struct ShowEdges<N>(EdgeSet<N>);

/// Hides the listed edges.
#[derive(Clone, Debug)]
pub struct HideEdges<N>(EdgeSet<N>);

macro_rules! edge_set_filter {
    ($name:ident, $show:expr) => {
        impl<N: NodeKey> $name<N> {
            /// Edges of an undirected graph, matched in either orientation.
            pub fn undirected(pairs: impl IntoIterator<Item = (N, N)>) -> Self {
                $name(EdgeSet::from_pairs(false, pairs))
            }

            /// Edges of a directed graph.
            pub fn directed(pairs: impl IntoIterator<Item = (N, N)>) -> Self {
                $name(EdgeSet::from_pairs(true, pairs))
            }

            /// Keyed edges of an undirected multigraph.
            pub fn multi(triples: impl IntoIterator<Item = (N, N, EdgeKey)>) -> Self {
                $name(EdgeSet::from_triples(false, triples))
            }

            /// Keyed edges of a directed multigraph.
            pub fn multi_directed(triples: impl IntoIterator<Item = (N, N, EdgeKey)>) -> Self {
                $name(EdgeSet::from_triples(true, triples))
            }

            pub fn for_pairs(directed: bool, pairs: impl IntoIterator<Item = (N, N)>) -> Self {
                $name(EdgeSet::from_pairs(directed, pairs))
            }

            pub fn endpoints(&self) -> impl Iterator<Item = &N> {
                self.0.endpoints()
            }
        }

        impl<N: NodeKey> EdgeFilter<N> for $name<N> {
            fn show_edge(&self, source: &N, target: &N, key: &EdgeKey) -> bool {
                self.0.contains(source, target, key) == $show
            }
        }
    };
}

edge_set_filter!(ShowEdges, true);
edge_set_filter!(HideEdges, false);
