//! Live, read-only views reporting the nodes, edges, degrees and adjacency
//! of a graph.
//!
//! Constructing a reporting view only stores a reference; every method
//! recomputes its answer from the graph it was taken from.

use std::{fmt, ops::Index};

use crate::{
    attributes::{AttrValue, Attributes},
    directedness::Directedness,
    edge_key::EdgeKey,
    edge_multiplicity::EdgeMultiplicity,
    error::{GraphError, Result},
    view::{EdgeRef, GraphView, count_degree, sum_degree},
};

/// The node set of a graph, with lookup of node attributes.
pub struct NodeView<'g, G> {
    graph: &'g G,
}

impl<'g, G: GraphView> NodeView<'g, G> {
    pub(crate) fn new(graph: &'g G) -> Self {
        NodeView { graph }
    }

    pub fn len(&self) -> usize {
        self.graph.number_of_nodes()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: &G::Node) -> bool {
        self.graph.has_node(node)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'g G::Node> + 'g {
        self.graph.node_iter()
    }

    pub fn attrs(&self, node: &G::Node) -> Result<&'g Attributes> {
        self.graph
            .node_attrs(node)
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    /// Iterates over nodes with their attribute maps.
    pub fn with_data(&self) -> impl Iterator<Item = (&'g G::Node, &'g Attributes)> + 'g {
        let graph = self.graph;
        graph
            .node_iter()
            .filter_map(move |n| graph.node_attrs(n).map(|attrs| (n, attrs)))
    }

    /// Iterates over nodes with the value of one attribute, using `default`
    /// where a node lacks it.
    pub fn data(
        &self,
        name: &'g str,
        default: AttrValue,
    ) -> impl Iterator<Item = (&'g G::Node, AttrValue)> + 'g {
        self.with_data()
            .map(move |(n, attrs)| (n, attrs.get(name).cloned().unwrap_or_else(|| default.clone())))
    }
}

impl<G: GraphView> Index<&G::Node> for NodeView<'_, G> {
    type Output = Attributes;

    fn index(&self, node: &G::Node) -> &Attributes {
        match self.graph.node_attrs(node) {
            Some(attrs) => attrs,
            None => panic!("node {node:?} is not in the graph"),
        }
    }
}

impl<G: GraphView> fmt::Debug for NodeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The edge set of a graph.  Undirected edges are reported once.
pub struct EdgeView<'g, G> {
    graph: &'g G,
}

impl<'g, G: GraphView> EdgeView<'g, G> {
    pub(crate) fn new(graph: &'g G) -> Self {
        EdgeView { graph }
    }

    pub fn len(&self) -> usize {
        self.graph.number_of_edges()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn contains(&self, source: &G::Node, target: &G::Node) -> bool {
        self.graph.has_edge(source, target)
    }

    pub fn contains_with_key(&self, source: &G::Node, target: &G::Node, key: &EdgeKey) -> bool {
        self.graph.has_edge_with_key(source, target, key)
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeRef<'g, G::Node>> + 'g {
        self.graph.edge_iter()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'g G::Node, &'g G::Node)> + 'g {
        self.iter().map(|e| (e.source, e.target))
    }

    pub fn triples(&self) -> impl Iterator<Item = (&'g G::Node, &'g G::Node, &'g EdgeKey)> + 'g {
        self.iter().map(|e| (e.source, e.target, e.key))
    }

    /// Iterates over edges with the value of one attribute, using `default`
    /// where an edge lacks it.
    pub fn data(
        &self,
        name: &'g str,
        default: AttrValue,
    ) -> impl Iterator<Item = (&'g G::Node, &'g G::Node, AttrValue)> + 'g {
        self.iter().map(move |e| {
            let value = e.attrs.get(name).cloned().unwrap_or_else(|| default.clone());
            (e.source, e.target, value)
        })
    }

    /// Iterates over the edges incident to `nodes`, skipping nodes that are
    /// not in the graph.
    pub fn incident<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n G::Node>,
    ) -> impl Iterator<Item = EdgeRef<'g, G::Node>> + 'g
    where
        G::Node: 'n,
    {
        let graph = self.graph;
        let nodes: Vec<&'g G::Node> = nodes.into_iter().filter_map(|n| graph.get_node(n)).collect();
        graph.edges_over(nodes)
    }

    pub fn attrs(&self, source: &G::Node, target: &G::Node) -> Result<&'g Attributes> {
        self.graph.edge_attrs(source, target)
    }

    pub fn attrs_with_key(
        &self,
        source: &G::Node,
        target: &G::Node,
        key: &EdgeKey,
    ) -> Result<&'g Attributes> {
        self.graph.edge_attrs_with_key(source, target, key)
    }
}

impl<G: GraphView> Index<(&G::Node, &G::Node)> for EdgeView<'_, G> {
    type Output = Attributes;

    fn index(&self, (source, target): (&G::Node, &G::Node)) -> &Attributes {
        match self.graph.edge_attrs(source, target) {
            Ok(attrs) => attrs,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<G: GraphView> Index<(&G::Node, &G::Node, &EdgeKey)> for EdgeView<'_, G> {
    type Output = Attributes;

    fn index(&self, (source, target, key): (&G::Node, &G::Node, &EdgeKey)) -> &Attributes {
        match self.graph.edge_attrs_with_key(source, target, key) {
            Ok(attrs) => attrs,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<G: GraphView> fmt::Debug for EdgeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if G::EdgeMultiplicity::allows_parallel_edges() {
            f.debug_list().entries(self.triples()).finish()
        } else {
            f.debug_list().entries(self.pairs()).finish()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DegreeKind {
    Total,
    In,
    Out,
}

/// Node degrees.  An undirected self-loop adds 2 to its node's degree.
pub struct DegreeView<'g, G> {
    graph: &'g G,
    kind: DegreeKind,
}

impl<'g, G: GraphView> DegreeView<'g, G> {
    pub(crate) fn new(graph: &'g G, kind: DegreeKind) -> Self {
        DegreeView { graph, kind }
    }

    pub fn kind(&self) -> DegreeKind {
        self.kind
    }

    pub fn get(&self, node: &G::Node) -> Result<usize> {
        let node = self
            .graph
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(count_degree(self.graph, node, self.kind))
    }

    /// Gets the sum of the `weight` attribute over the counted edges, taking
    /// 1 for edges without it.
    pub fn weighted(&self, node: &G::Node, weight: &str) -> Result<f64> {
        let node = self
            .graph
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        sum_degree(self.graph, node, self.kind, weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'g G::Node, usize)> + 'g {
        let (graph, kind) = (self.graph, self.kind);
        graph
            .node_iter()
            .map(move |n| (n, count_degree(graph, n, kind)))
    }

    /// Iterates over the degrees of `nodes`, skipping nodes that are not in
    /// the graph.
    pub fn iter_nodes<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n G::Node>,
    ) -> impl Iterator<Item = (&'g G::Node, usize)> + 'g
    where
        G::Node: 'n,
    {
        let (graph, kind) = (self.graph, self.kind);
        let nodes: Vec<&'g G::Node> = nodes.into_iter().filter_map(|n| graph.get_node(n)).collect();
        nodes
            .into_iter()
            .map(move |n| (n, count_degree(graph, n, kind)))
    }

    pub fn iter_weighted(
        &self,
        weight: &'g str,
    ) -> impl Iterator<Item = Result<(&'g G::Node, f64)>> + 'g {
        let (graph, kind) = (self.graph, self.kind);
        graph
            .node_iter()
            .map(move |n| sum_degree(graph, n, kind, weight).map(|w| (n, w)))
    }
}

impl<G: GraphView> fmt::Debug for DegreeView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps each node to the [`AtlasView`] of its neighbors.  For directed
/// graphs this follows either successors or predecessors.
pub struct AdjacencyView<'g, G> {
    graph: &'g G,
    incoming: bool,
}

impl<'g, G: GraphView> AdjacencyView<'g, G> {
    pub(crate) fn successors(graph: &'g G) -> Self {
        AdjacencyView {
            graph,
            incoming: false,
        }
    }

    pub(crate) fn predecessors(graph: &'g G) -> Self {
        AdjacencyView {
            graph,
            incoming: true,
        }
    }

    pub fn len(&self) -> usize {
        self.graph.number_of_nodes()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: &G::Node) -> bool {
        self.graph.has_node(node)
    }

    pub fn get(&self, node: &G::Node) -> Result<AtlasView<'g, G>> {
        let node = self
            .graph
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(self.atlas(node))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'g G::Node, AtlasView<'g, G>)> + 'g {
        let (graph, incoming) = (self.graph, self.incoming);
        graph.node_iter().map(move |node| {
            (
                node,
                AtlasView {
                    graph,
                    node,
                    incoming,
                },
            )
        })
    }

    fn atlas(&self, node: &'g G::Node) -> AtlasView<'g, G> {
        AtlasView {
            graph: self.graph,
            node,
            incoming: self.incoming,
        }
    }
}

/// The neighbors of one node and the edges leading to each of them.
pub struct AtlasView<'g, G: GraphView> {
    graph: &'g G,
    node: &'g G::Node,
    incoming: bool,
}

impl<'g, G: GraphView> AtlasView<'g, G> {
    pub fn node(&self) -> &'g G::Node {
        self.node
    }

    /// Iterates over every edge of the node, each oriented away from it.
    fn edges(&self) -> impl Iterator<Item = EdgeRef<'g, G::Node>> + 'g {
        let (graph, node, incoming) = (self.graph, self.node, self.incoming);
        let (from, into) = if incoming {
            (None, Some(graph.edges_into(node).map(EdgeRef::reversed)))
        } else {
            (Some(graph.edges_from(node)), None)
        };
        from.into_iter().flatten().chain(into.into_iter().flatten())
    }

    /// Iterates over the distinct neighbors in first-edge order.
    pub fn neighbors(&self) -> impl Iterator<Item = &'g G::Node> + 'g {
        let mut seen = std::collections::HashSet::new();
        self.edges()
            .map(|e| e.target)
            .filter(move |n| seen.insert(*n))
    }

    pub fn len(&self) -> usize {
        self.neighbors().count()
    }

    pub fn is_empty(&self) -> bool {
        self.edges().next().is_none()
    }

    pub fn contains(&self, neighbor: &G::Node) -> bool {
        self.edges_to(neighbor).next().is_some()
    }

    /// Iterates over the parallel edges to `neighbor`.
    pub fn edges_to<'n>(
        &self,
        neighbor: &'n G::Node,
    ) -> impl Iterator<Item = EdgeRef<'g, G::Node>> + 'n
    where
        'g: 'n,
    {
        self.edges().filter(move |e| e.target == neighbor)
    }

    /// Gets the attributes of the edge to `neighbor`.  On multigraphs this
    /// is the first of the parallel edges.
    pub fn get(&self, neighbor: &G::Node) -> Result<&'g Attributes> {
        self.edges_to(neighbor)
            .next()
            .map(|e| e.attrs)
            .ok_or_else(|| self.missing(neighbor))
    }

    pub fn get_with_key(&self, neighbor: &G::Node, key: &EdgeKey) -> Result<&'g Attributes> {
        self.edges_to(neighbor)
            .find(|e| e.key == key)
            .map(|e| e.attrs)
            .ok_or_else(|| self.missing(neighbor))
    }

    fn missing(&self, neighbor: &G::Node) -> GraphError {
        if self.incoming && G::Directedness::is_directed() {
            GraphError::edge_not_found(neighbor, self.node)
        } else {
            GraphError::edge_not_found(self.node, neighbor)
        }
    }
}

impl<G: GraphView> fmt::Debug for AtlasView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.edges().map(|e| ((e.target, e.key), e.attrs)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{attributes::AttrValue, attrs, error::Result, graph::*, view::GraphView};

    fn weighted() -> Graph<&'static str> {
        let mut graph = Graph::new();
        graph.add_edge_with("A", "B", attrs! { "weight" => 4 }).unwrap();
        graph.add_edge_with("B", "D", attrs! { "weight" => 2 }).unwrap();
        graph.add_edge_with("A", "C", attrs! { "weight" => 3 }).unwrap();
        graph.add_edge_with("C", "D", attrs! { "weight" => 4 }).unwrap();
        graph.add_node_with("E", attrs! { "color" => "red" }).unwrap();
        graph
    }

    #[test]
    fn test_node_view() {
        let graph = weighted();
        let nodes = graph.nodes();
        assert_eq!(nodes.len(), 5);
        assert!(nodes.contains(&"C"));
        assert!(!nodes.contains(&"Z"));
        assert_eq!(nodes[&"E"].get("color"), Some(&"red".into()));
        assert!(nodes.attrs(&"Z").is_err());

        let colors: Vec<_> = nodes.data("color", AttrValue::Null).collect();
        assert_eq!(colors[0], (&"A", AttrValue::Null));
        assert_eq!(colors[4], (&"E", AttrValue::from("red")));
        assert_eq!(format!("{nodes:?}"), r#"{"A", "B", "D", "C", "E"}"#);
    }

    #[test]
    fn test_edge_view() {
        let graph = weighted();
        let edges = graph.edges();
        assert_eq!(edges.len(), 4);
        assert!(edges.contains(&"D", &"B"));
        assert_eq!(edges[(&"B", &"A")].get("weight"), Some(&4.into()));
        assert_eq!(
            edges.pairs().collect::<Vec<_>>(),
            vec![(&"A", &"B"), (&"A", &"C"), (&"B", &"D"), (&"D", &"C")]
        );
        let weights: Vec<_> = edges
            .data("weight", AttrValue::Int(1))
            .map(|(_, _, w)| w.as_i64())
            .collect();
        assert_eq!(weights, vec![Some(4), Some(3), Some(2), Some(4)]);
    }

    #[test]
    fn test_edge_view_incident() {
        let graph = weighted();
        let edges = graph.edges();
        let incident: Vec<_> = edges.incident([&"B", &"D", &"Z"]).map(|e| e.ends()).collect();
        assert_eq!(incident, vec![(&"B", &"A"), (&"B", &"D"), (&"D", &"C")]);
    }

    #[test]
    fn test_degree_view() {
        let graph = weighted();
        let degrees = graph.degrees();
        assert_eq!(degrees.get(&"A"), Ok(2));
        assert_eq!(degrees.get(&"E"), Ok(0));
        assert_eq!(degrees.weighted(&"A", "weight"), Ok(7.0));
        assert_eq!(
            degrees.iter_nodes([&"D", &"E"]).collect::<Vec<_>>(),
            vec![(&"D", 2), (&"E", 0)]
        );
        let weighted: Result<Vec<_>> = degrees.iter_weighted("weight").collect();
        assert_eq!(weighted.unwrap()[4], (&"E", 0.0));
    }

    #[test]
    fn test_in_out_degree_views() {
        let mut graph = DiGraph::new();
        graph.add_edges_from([(1, 2), (1, 3), (3, 1), (2, 2)]).unwrap();
        let ins = graph.in_degrees().unwrap();
        let outs = graph.out_degrees().unwrap();
        assert_eq!(ins.iter().collect::<Vec<_>>(), vec![(&1, 1), (&2, 2), (&3, 1)]);
        assert_eq!(outs.iter().collect::<Vec<_>>(), vec![(&1, 2), (&2, 1), (&3, 1)]);
        assert_eq!(graph.degrees().get(&2), Ok(3));
        assert!(Graph::<i32>::new().in_degrees().is_err());
    }

    #[test]
    fn test_adjacency_view() {
        let mut graph = MultiDiGraph::new();
        let k0 = graph.add_edge_with(1, 2, attrs! { "w" => 1 }).unwrap();
        let k1 = graph.add_edge_with(1, 2, attrs! { "w" => 2 }).unwrap();
        graph.add_edge(3, 1).unwrap();

        let adj = graph.adj();
        let atlas = adj.get(&1).unwrap();
        assert_eq!(atlas.neighbors().collect::<Vec<_>>(), vec![&2]);
        assert_eq!(atlas.len(), 1);
        assert_eq!(atlas.edges_to(&2).count(), 2);
        assert_eq!(atlas.get_with_key(&2, &k1).unwrap().get("w"), Some(&2.into()));
        assert_eq!(atlas.get(&2).unwrap().get("w"), Some(&1.into()));
        assert!(atlas.get(&3).is_err());
        assert_ne!(k0, k1);

        let pred = graph.pred().unwrap();
        let atlas = pred.get(&1).unwrap();
        assert_eq!(atlas.neighbors().collect::<Vec<_>>(), vec![&3]);
        assert_eq!(adj.iter().count(), 3);
    }

    #[test]
    fn test_views_are_live() {
        let mut graph = Graph::new();
        graph.add_edge(1, 2).unwrap();
        assert_eq!(graph.edges().len(), 1);
        graph.add_edge(2, 3).unwrap();
        assert_eq!(graph.edges().len(), 2);
        graph.remove_node(&2).unwrap();
        assert!(graph.edges().is_empty());
        assert_eq!(graph.nodes().len(), 2);
    }
}
