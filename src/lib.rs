pub mod adjacency;
pub mod attributes;
pub mod bulk;
pub mod directedness;
pub mod edge_arena;
pub mod edge_key;
pub mod edge_multiplicity;
pub mod edge_slot;
pub mod error;
pub mod filters;
pub mod format_debug;
pub mod graph;
pub mod graph_test_support;
pub mod graph_views;
pub mod prelude;
pub mod reporting;
pub mod tracing_support;
pub mod view;

mod util;

pub use crate::attributes::{AttrValue, Attributes, SharedValue};
pub use crate::bulk::EdgeSpec;
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::edge_key::EdgeKey;
pub use crate::edge_multiplicity::{EdgeMultiplicity, MultipleEdges, SingleEdge};
pub use crate::error::{GraphError, Result};
pub use crate::graph::{CoreGraph, DiGraph, Graph, MultiDiGraph, MultiGraph};
pub use crate::graph_views::{
    ReverseView, SubgraphView, restricted_multi_view, restricted_view, reverse_view,
    subgraph_view,
};
pub use crate::view::{EdgeRef, GraphView, NodeKey};
