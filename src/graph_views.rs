//! Filtered and reversed views over another graph or view.
//!
//! A view owns a handle to the graph it wraps.  The handle is usually a
//! reference (`&CoreGraph`, `&mut CoreGraph`, or a reference to another
//! view) but may also be an owned graph.  No node, edge or attribute data
//! is copied; every query is answered from the wrapped graph at call time.

use std::{
    fmt::{self, Debug, Formatter},
    ops::DerefMut,
};

use crate::{
    attributes::Attributes,
    directedness::Directedness,
    edge_key::EdgeKey,
    error::Result,
    filters::{EdgeFilter, HideEdges, HideNodes, NodeFilter},
    format_debug::format_debug,
    view::{EdgeRef, GraphView, not_implemented},
};

/// A view showing only the nodes and edges accepted by two filters.
///
/// A hidden node has no incident edges in the view, whatever its
/// neighbors.  An edge is visible when both endpoints and the edge itself
/// pass the filters.
pub struct SubgraphView<G, FN, FE> {
    graph: G,
    node_filter: FN,
    edge_filter: FE,
}

impl<G, FN, FE> SubgraphView<G, FN, FE>
where
    G: GraphView,
    FN: NodeFilter<G::Node>,
    FE: EdgeFilter<G::Node>,
{
    pub fn new(graph: G, node_filter: FN, edge_filter: FE) -> Self {
        SubgraphView {
            graph,
            node_filter,
            edge_filter,
        }
    }

    fn shows(&self, edge: &EdgeRef<'_, G::Node>) -> bool {
        self.node_filter.show_node(edge.source)
            && self.node_filter.show_node(edge.target)
            && self
                .edge_filter
                .show_edge(edge.source, edge.target, edge.key)
    }
}

impl<G, FN, FE> SubgraphView<G, FN, FE> {
    /// Gets the wrapped graph handle.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_inner(self) -> G {
        self.graph
    }
}

impl<G: DerefMut, FN, FE> SubgraphView<G, FN, FE> {
    /// Gets mutable access to the graph behind a `&mut` handle.  Changes
    /// made through it are seen by this view straight away.
    pub fn graph_mut(&mut self) -> &mut G::Target {
        &mut self.graph
    }
}

impl<G, FN, FE> GraphView for SubgraphView<G, FN, FE>
where
    G: GraphView,
    FN: NodeFilter<G::Node>,
    FE: EdgeFilter<G::Node>,
{
    type Node = G::Node;
    type Directedness = G::Directedness;
    type EdgeMultiplicity = G::EdgeMultiplicity;

    fn graph_attrs(&self) -> &Attributes {
        self.graph.graph_attrs()
    }

    fn node_iter(&self) -> impl Iterator<Item = &Self::Node> + '_ {
        self.graph
            .node_iter()
            .filter(|n| self.node_filter.show_node(n))
    }

    fn get_node(&self, node: &Self::Node) -> Option<&Self::Node> {
        self.graph
            .get_node(node)
            .filter(|n| self.node_filter.show_node(n))
    }

    fn node_attrs(&self, node: &Self::Node) -> Option<&Attributes> {
        if self.node_filter.show_node(node) {
            self.graph.node_attrs(node)
        } else {
            None
        }
    }

    fn edges_from<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        let visible = self.node_filter.show_node(node);
        self.graph
            .edges_from(node)
            .filter(move |e| visible && self.shows(e))
    }

    fn edges_into<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        let visible = self.node_filter.show_node(node);
        self.graph
            .edges_into(node)
            .filter(move |e| visible && self.shows(e))
    }

    fn edges_between<'a>(
        &'a self,
        source: &'a Self::Node,
        target: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        let visible = self.node_filter.show_node(source) && self.node_filter.show_node(target);
        self.graph
            .edges_between(source, target)
            .filter(move |e| {
                visible && self.edge_filter.show_edge(e.source, e.target, e.key)
            })
    }

    fn is_frozen(&self) -> bool {
        true
    }
}

impl<G, FN, FE> Debug for SubgraphView<G, FN, FE>
where
    G: GraphView,
    FN: NodeFilter<G::Node>,
    FE: EdgeFilter<G::Node>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        format_debug(self, f, "SubgraphView")
    }
}

/// A view of a directed graph with every edge pointing the other way.
pub struct ReverseView<G> {
    graph: G,
}

impl<G> ReverseView<G> {
    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_inner(self) -> G {
        self.graph
    }
}

impl<G: DerefMut> ReverseView<G> {
    pub fn graph_mut(&mut self) -> &mut G::Target {
        &mut self.graph
    }
}

impl<G: GraphView> GraphView for ReverseView<G> {
    type Node = G::Node;
    type Directedness = G::Directedness;
    type EdgeMultiplicity = G::EdgeMultiplicity;

    fn graph_attrs(&self) -> &Attributes {
        self.graph.graph_attrs()
    }

    fn node_iter(&self) -> impl Iterator<Item = &Self::Node> + '_ {
        self.graph.node_iter()
    }

    fn get_node(&self, node: &Self::Node) -> Option<&Self::Node> {
        self.graph.get_node(node)
    }

    fn node_attrs(&self, node: &Self::Node) -> Option<&Attributes> {
        self.graph.node_attrs(node)
    }

    fn edges_from<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        self.graph.edges_into(node).map(EdgeRef::reversed)
    }

    fn edges_into<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        self.graph.edges_from(node).map(EdgeRef::reversed)
    }

    fn edges_between<'a>(
        &'a self,
        source: &'a Self::Node,
        target: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        self.graph
            .edges_between(target, source)
            .map(EdgeRef::reversed)
    }

    fn is_frozen(&self) -> bool {
        true
    }

    fn number_of_nodes(&self) -> usize {
        self.graph.number_of_nodes()
    }

    fn number_of_edges(&self) -> usize {
        self.graph.number_of_edges()
    }
}

impl<G: GraphView> Debug for ReverseView<G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        format_debug(self, f, "ReverseView")
    }
}

/// Wraps `graph` in a view filtered by `node_filter` and `edge_filter`.
pub fn subgraph_view<G, FN, FE>(graph: G, node_filter: FN, edge_filter: FE) -> SubgraphView<G, FN, FE>
where
    G: GraphView,
    FN: NodeFilter<G::Node>,
    FE: EdgeFilter<G::Node>,
{
    SubgraphView::new(graph, node_filter, edge_filter)
}

/// Wraps a directed `graph` in a view with every edge reversed.
pub fn reverse_view<G: GraphView>(graph: G) -> Result<ReverseView<G>> {
    if !G::Directedness::is_directed() {
        return Err(not_implemented::<G>("reverse_view", true));
    }
    Ok(ReverseView { graph })
}

/// Wraps `graph` in a view hiding the given nodes and every edge between
/// each given pair.
pub fn restricted_view<G: GraphView>(
    graph: G,
    nodes: impl IntoIterator<Item = G::Node>,
    edges: impl IntoIterator<Item = (G::Node, G::Node)>,
) -> SubgraphView<G, HideNodes<G::Node>, HideEdges<G::Node>> {
    let edges = HideEdges::for_pairs(G::Directedness::is_directed(), edges);
    SubgraphView::new(graph, HideNodes::new(nodes), edges)
}

/// Like [`restricted_view`], naming each hidden edge by its key.
pub fn restricted_multi_view<G: GraphView>(
    graph: G,
    nodes: impl IntoIterator<Item = G::Node>,
    edges: impl IntoIterator<Item = (G::Node, G::Node, EdgeKey)>,
) -> SubgraphView<G, HideNodes<G::Node>, HideEdges<G::Node>> {
    let edges = if G::Directedness::is_directed() {
        HideEdges::multi_directed(edges)
    } else {
        HideEdges::multi(edges)
    };
    SubgraphView::new(graph, HideNodes::new(nodes), edges)
}
