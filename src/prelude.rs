pub use crate::attributes::{AttrValue, Attributes, SharedValue};
pub use crate::attrs;
pub use crate::bulk::EdgeSpec;
pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::edge_key::EdgeKey;
pub use crate::edge_multiplicity::{EdgeMultiplicity, MultipleEdges, SingleEdge};
pub use crate::error::GraphError;
pub use crate::filters::{EdgeFilter, HideEdges, HideNodes, NoFilter, NodeFilter, ShowEdges, ShowNodes};
pub use crate::graph::{CoreGraph, DiGraph, Graph, MultiDiGraph, MultiGraph};
pub use crate::graph_views::{
    ReverseView, SubgraphView, restricted_multi_view, restricted_view, reverse_view,
    subgraph_view,
};
pub use crate::view::{EdgeRef, GraphView, NodeKey};
