//! The read-only query surface shared by concrete graphs and graph views.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use derivative::Derivative;

use crate::{
    attributes::Attributes,
    directedness::{Directed, Directedness, Undirected},
    edge_key::EdgeKey,
    edge_multiplicity::EdgeMultiplicity,
    error::{GraphError, Result},
    filters::{NoFilter, ShowEdges, ShowNodes},
    graph::CoreGraph,
    graph_views::{SubgraphView, reverse_view},
    reporting::{AdjacencyView, DegreeKind, DegreeView, EdgeView, NodeView},
};

/// Types usable as graph nodes.
pub trait NodeKey: Eq + Hash + Clone + Debug {}

impl<T> NodeKey for T where T: Eq + Hash + Clone + Debug {}

/// One edge as seen through a graph or view.
///
/// `source` and `target` are oriented the way the edge was reached: for
/// `edges_from(n)` the source is `n`, for `edges_into(n)` the target is `n`.
#[derive(Derivative)]
#[derivative(Debug(bound = "N: Debug"))]
pub struct EdgeRef<'a, N> {
    pub source: &'a N,
    pub target: &'a N,
    pub key: &'a EdgeKey,
    pub attrs: &'a Attributes,
}

impl<N> Clone for EdgeRef<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for EdgeRef<'_, N> {}

impl<'a, N: PartialEq> EdgeRef<'a, N> {
    /// Swaps the endpoints.
    pub fn reversed(self) -> Self {
        EdgeRef {
            source: self.target,
            target: self.source,
            ..self
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn ends(&self) -> (&'a N, &'a N) {
        (self.source, self.target)
    }
}

/// A read-only, live perspective on a graph.
///
/// Implementors provide node lookup and per-node edge iteration; everything
/// else is derived from those on every call, so results always reflect the
/// current state of the underlying storage.  Directed-only and
/// multigraph-only queries exist on every implementor and report
/// `GraphError::NotImplemented` when the kind does not support them.
pub trait GraphView {
    type Node: NodeKey;
    type Directedness: Directedness;
    type EdgeMultiplicity: EdgeMultiplicity;

    fn graph_attrs(&self) -> &Attributes;

    /// Iterates over the visible nodes in insertion order.
    fn node_iter(&self) -> impl Iterator<Item = &Self::Node> + '_;

    /// Gets the stored copy of `node` if it is visible.
    fn get_node(&self, node: &Self::Node) -> Option<&Self::Node>;

    fn node_attrs(&self, node: &Self::Node) -> Option<&Attributes>;

    /// Iterates over the edges leaving `node`.  For undirected graphs this is
    /// every incident edge, with `node` as the source.
    fn edges_from<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a;

    /// Iterates over the edges entering `node`.  For undirected graphs this is
    /// every incident edge, with `node` as the target.
    fn edges_into<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a;

    /// Iterates over the edges from `source` to `target`, parallel edges in
    /// key insertion order.
    fn edges_between<'a>(
        &'a self,
        source: &'a Self::Node,
        target: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        self.edges_from(source).filter(move |e| e.target == target)
    }

    fn is_directed(&self) -> bool {
        Self::Directedness::is_directed()
    }

    fn is_multigraph(&self) -> bool {
        Self::EdgeMultiplicity::allows_parallel_edges()
    }

    /// Returns true if structural mutation is rejected.  Views are always
    /// frozen.
    fn is_frozen(&self) -> bool {
        false
    }

    fn has_node(&self, node: &Self::Node) -> bool {
        self.get_node(node).is_some()
    }

    fn number_of_nodes(&self) -> usize {
        self.node_iter().count()
    }

    /// Iterates over every edge once.  An undirected edge is reported from
    /// the endpoint that comes first in node order.
    fn edge_iter(&self) -> impl Iterator<Item = EdgeRef<'_, Self::Node>> + '_ {
        self.edges_over(self.node_iter())
    }

    /// Iterates over the edges incident to `nodes`, reporting an undirected
    /// edge between two of them only once.
    fn edges_over<'a>(
        &'a self,
        nodes: impl IntoIterator<Item = &'a Self::Node> + 'a,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        let directed = Self::Directedness::is_directed();
        let mut seen: HashSet<&'a Self::Node> = HashSet::new();
        nodes.into_iter().flat_map(move |node| {
            let row: Vec<_> = self
                .edges_from(node)
                .filter(|e| directed || !seen.contains(e.target))
                .collect();
            if !directed {
                seen.insert(node);
            }
            row
        })
    }

    fn number_of_edges(&self) -> usize {
        self.edge_iter().count()
    }

    /// Counts the edges joining `source` and `target`.
    fn number_of_edges_between(&self, source: &Self::Node, target: &Self::Node) -> usize {
        match (self.get_node(source), self.get_node(target)) {
            (Some(source), Some(target)) => self.edges_between(source, target).count(),
            _ => 0,
        }
    }

    fn has_edge(&self, source: &Self::Node, target: &Self::Node) -> bool {
        self.number_of_edges_between(source, target) > 0
    }

    fn has_edge_with_key(&self, source: &Self::Node, target: &Self::Node, key: &EdgeKey) -> bool {
        self.find_edge(source, target, key).is_some()
    }

    /// Gets the edge `source → target` with the given key.
    fn find_edge<'a>(
        &'a self,
        source: &Self::Node,
        target: &Self::Node,
        key: &EdgeKey,
    ) -> Option<EdgeRef<'a, Self::Node>> {
        let source = self.get_node(source)?;
        let target = self.get_node(target)?;
        self.edges_between(source, target).find(|e| e.key == key)
    }

    /// Gets the attributes of the single edge `source → target`.
    ///
    /// Multigraphs need a key to name an edge; use
    /// [`edge_attrs_with_key`](Self::edge_attrs_with_key).
    fn edge_attrs(&self, source: &Self::Node, target: &Self::Node) -> Result<&Attributes> {
        if Self::EdgeMultiplicity::allows_parallel_edges() {
            return Err(not_implemented::<Self>("edge_attrs", false));
        }
        let s = self.get_node(source);
        let t = self.get_node(target);
        s.zip(t)
            .and_then(|(s, t)| self.edges_between(s, t).next())
            .map(|e| e.attrs)
            .ok_or_else(|| GraphError::edge_not_found(source, target))
    }

    fn edge_attrs_with_key(
        &self,
        source: &Self::Node,
        target: &Self::Node,
        key: &EdgeKey,
    ) -> Result<&Attributes> {
        self.find_edge(source, target, key)
            .map(|e| e.attrs)
            .ok_or_else(|| GraphError::keyed_edge_not_found(source, target, key))
    }

    /// Iterates over the keys of the edges joining `source` and `target`.
    fn edge_key_set<'a>(
        &'a self,
        source: &Self::Node,
        target: &Self::Node,
    ) -> impl Iterator<Item = &'a EdgeKey> + 'a {
        self.get_node(source)
            .zip(self.get_node(target))
            .into_iter()
            .flat_map(move |(s, t)| self.edges_between(s, t).map(|e| e.key))
    }

    /// Iterates over the distinct nodes adjacent to `node`.  For directed
    /// graphs these are the successors.
    fn neighbors<'a>(
        &'a self,
        node: &Self::Node,
    ) -> Result<impl Iterator<Item = &'a Self::Node> + 'a> {
        let node = self
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(distinct(self.edges_from(node).map(|e| e.target)))
    }

    fn successors<'a>(
        &'a self,
        node: &Self::Node,
    ) -> Result<impl Iterator<Item = &'a Self::Node> + 'a> {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("successors", true));
        }
        self.neighbors(node)
    }

    fn predecessors<'a>(
        &'a self,
        node: &Self::Node,
    ) -> Result<impl Iterator<Item = &'a Self::Node> + 'a> {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("predecessors", true));
        }
        let node = self
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(distinct(self.edges_into(node).map(|e| e.source)))
    }

    /// Gets the number of edges incident to `node`.  An undirected self-loop
    /// counts twice; a directed one counts once in and once out.
    fn degree(&self, node: &Self::Node) -> Result<usize> {
        let node = self
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(count_degree(self, node, DegreeKind::Total))
    }

    fn in_degree(&self, node: &Self::Node) -> Result<usize> {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("in_degree", true));
        }
        let node = self
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(count_degree(self, node, DegreeKind::In))
    }

    fn out_degree(&self, node: &Self::Node) -> Result<usize> {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("out_degree", true));
        }
        let node = self
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        Ok(count_degree(self, node, DegreeKind::Out))
    }

    /// Sums the `weight` attribute over the edges incident to `node`, taking
    /// 1 for edges without it.
    fn weighted_degree(&self, node: &Self::Node, weight: &str) -> Result<f64> {
        let node = self
            .get_node(node)
            .ok_or_else(|| GraphError::node_not_found(node))?;
        sum_degree(self, node, DegreeKind::Total, weight)
    }

    /// Gets the number of edges, or the sum of their `weight` attribute.
    fn size(&self, weight: Option<&str>) -> Result<f64> {
        match weight {
            None => Ok(self.number_of_edges() as f64),
            Some(name) => self
                .edge_iter()
                .try_fold(0.0, |total, e| Ok(total + edge_weight(e.attrs, name)?)),
        }
    }

    fn nodes_with_selfloops(&self) -> impl Iterator<Item = &Self::Node> + '_ {
        self.node_iter()
            .filter(|&n| self.edges_between(n, n).next().is_some())
    }

    fn selfloop_edges(&self) -> impl Iterator<Item = EdgeRef<'_, Self::Node>> + '_ {
        self.edge_iter().filter(|e| e.is_self_loop())
    }

    fn number_of_selfloops(&self) -> usize {
        self.selfloop_edges().count()
    }

    fn nodes(&self) -> NodeView<'_, Self>
    where
        Self: Sized,
    {
        NodeView::new(self)
    }

    fn edges(&self) -> EdgeView<'_, Self>
    where
        Self: Sized,
    {
        EdgeView::new(self)
    }

    fn degrees(&self) -> DegreeView<'_, Self>
    where
        Self: Sized,
    {
        DegreeView::new(self, DegreeKind::Total)
    }

    fn in_degrees(&self) -> Result<DegreeView<'_, Self>>
    where
        Self: Sized,
    {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("in_degree", true));
        }
        Ok(DegreeView::new(self, DegreeKind::In))
    }

    fn out_degrees(&self) -> Result<DegreeView<'_, Self>>
    where
        Self: Sized,
    {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("out_degree", true));
        }
        Ok(DegreeView::new(self, DegreeKind::Out))
    }

    /// Gets the adjacency (successor) view.
    fn adj(&self) -> AdjacencyView<'_, Self>
    where
        Self: Sized,
    {
        AdjacencyView::successors(self)
    }

    fn pred(&self) -> Result<AdjacencyView<'_, Self>>
    where
        Self: Sized,
    {
        if !Self::Directedness::is_directed() {
            return Err(not_implemented::<Self>("pred", true));
        }
        Ok(AdjacencyView::predecessors(self))
    }

    /// Builds an independent graph of the same kind.  Attribute maps are
    /// cloned; `Shared` and `Opaque` values keep referring to the same
    /// underlying values.
    fn copy(&self) -> CoreGraph<Self::Node, Self::Directedness, Self::EdgeMultiplicity>
    where
        Self: Sized,
    {
        CoreGraph::from_graph(self)
    }

    /// Like [`copy`](Self::copy), but `Shared` values are detached.
    fn deep_copy(&self) -> CoreGraph<Self::Node, Self::Directedness, Self::EdgeMultiplicity>
    where
        Self: Sized,
    {
        CoreGraph::from_graph_with(self, Attributes::deep_clone)
    }

    /// Builds a directed copy.  Each undirected edge becomes a pair of
    /// opposite directed edges.
    fn to_directed(&self) -> CoreGraph<Self::Node, Directed, Self::EdgeMultiplicity>
    where
        Self: Sized,
    {
        CoreGraph::from_graph(self)
    }

    /// Builds an undirected copy.  When both directions of a pair exist their
    /// attributes are merged, later edges overriding earlier ones.
    fn to_undirected(&self) -> CoreGraph<Self::Node, Undirected, Self::EdgeMultiplicity>
    where
        Self: Sized,
    {
        CoreGraph::from_graph(self)
    }

    /// Builds a copy with every edge reversed.
    fn reverse(&self) -> Result<CoreGraph<Self::Node, Self::Directedness, Self::EdgeMultiplicity>>
    where
        Self: Sized,
    {
        Ok(reverse_view(self)?.copy())
    }

    /// Gets a view of the subgraph induced by `nodes`.  Nodes not in the
    /// graph are ignored.
    fn subgraph(
        &self,
        nodes: impl IntoIterator<Item = Self::Node>,
    ) -> SubgraphView<&Self, ShowNodes<Self::Node>, NoFilter>
    where
        Self: Sized,
    {
        SubgraphView::new(self, ShowNodes::new(nodes), NoFilter)
    }

    /// Gets a view holding the given edges and their endpoints.  Every
    /// parallel edge between a listed pair is included.
    fn edge_subgraph(
        &self,
        edges: impl IntoIterator<Item = (Self::Node, Self::Node)>,
    ) -> SubgraphView<&Self, ShowNodes<Self::Node>, ShowEdges<Self::Node>>
    where
        Self: Sized,
    {
        let filter = ShowEdges::for_pairs(Self::Directedness::is_directed(), edges);
        let nodes = ShowNodes::new(filter.endpoints().cloned().collect::<Vec<_>>());
        SubgraphView::new(self, nodes, filter)
    }
}

impl<T: GraphView> GraphView for &T {
    type Node = T::Node;
    type Directedness = T::Directedness;
    type EdgeMultiplicity = T::EdgeMultiplicity;

    fn graph_attrs(&self) -> &Attributes {
        (**self).graph_attrs()
    }

    fn node_iter(&self) -> impl Iterator<Item = &Self::Node> + '_ {
        (**self).node_iter()
    }

    fn get_node(&self, node: &Self::Node) -> Option<&Self::Node> {
        (**self).get_node(node)
    }

    fn node_attrs(&self, node: &Self::Node) -> Option<&Attributes> {
        (**self).node_attrs(node)
    }

    fn edges_from<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        (**self).edges_from(node)
    }

    fn edges_into<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        (**self).edges_into(node)
    }

    fn edges_between<'a>(
        &'a self,
        source: &'a Self::Node,
        target: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        (**self).edges_between(source, target)
    }

    fn is_frozen(&self) -> bool {
        (**self).is_frozen()
    }

    fn number_of_nodes(&self) -> usize {
        (**self).number_of_nodes()
    }

    fn number_of_edges(&self) -> usize {
        (**self).number_of_edges()
    }
}

impl<T: GraphView> GraphView for &mut T {
    type Node = T::Node;
    type Directedness = T::Directedness;
    type EdgeMultiplicity = T::EdgeMultiplicity;

    fn graph_attrs(&self) -> &Attributes {
        (**self).graph_attrs()
    }

    fn node_iter(&self) -> impl Iterator<Item = &Self::Node> + '_ {
        (**self).node_iter()
    }

    fn get_node(&self, node: &Self::Node) -> Option<&Self::Node> {
        (**self).get_node(node)
    }

    fn node_attrs(&self, node: &Self::Node) -> Option<&Attributes> {
        (**self).node_attrs(node)
    }

    fn edges_from<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        (**self).edges_from(node)
    }

    fn edges_into<'a>(
        &'a self,
        node: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        (**self).edges_into(node)
    }

    fn edges_between<'a>(
        &'a self,
        source: &'a Self::Node,
        target: &'a Self::Node,
    ) -> impl Iterator<Item = EdgeRef<'a, Self::Node>> + 'a {
        (**self).edges_between(source, target)
    }

    fn is_frozen(&self) -> bool {
        (**self).is_frozen()
    }

    fn number_of_nodes(&self) -> usize {
        (**self).number_of_nodes()
    }

    fn number_of_edges(&self) -> usize {
        (**self).number_of_edges()
    }
}

pub(crate) fn not_implemented<G: GraphView + ?Sized>(
    operation: &'static str,
    directed_only: bool,
) -> GraphError {
    let kind = if directed_only {
        G::Directedness::NAME
    } else {
        G::EdgeMultiplicity::NAME
    };
    GraphError::NotImplemented { operation, kind }
}

/// Reads the named weight of one edge.  A missing attribute weighs 1.
pub(crate) fn edge_weight(attrs: &Attributes, name: &str) -> Result<f64> {
    match attrs.get(name) {
        None => Ok(1.0),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| GraphError::NotNumeric(name.to_string())),
    }
}

/// Counts the edges of `node` that contribute to the given kind of degree.
pub(crate) fn count_degree<G: GraphView + ?Sized>(
    graph: &G,
    node: &G::Node,
    kind: DegreeKind,
) -> usize {
    let directed = G::Directedness::is_directed();
    let out = || {
        graph
            .edges_from(node)
            .map(|e| if !directed && e.is_self_loop() { 2 } else { 1 })
            .sum::<usize>()
    };
    match kind {
        DegreeKind::Total if directed => out() + graph.edges_into(node).count(),
        DegreeKind::Total | DegreeKind::Out => out(),
        DegreeKind::In => graph.edges_into(node).count(),
    }
}

/// Sums the named weight over the edges counted by [`count_degree`].
pub(crate) fn sum_degree<G: GraphView + ?Sized>(
    graph: &G,
    node: &G::Node,
    kind: DegreeKind,
    weight: &str,
) -> Result<f64> {
    let directed = G::Directedness::is_directed();
    let out = || -> Result<f64> {
        graph.edges_from(node).try_fold(0.0, |total, e| {
            let w = edge_weight(e.attrs, weight)?;
            Ok(total + if !directed && e.is_self_loop() { 2.0 * w } else { w })
        })
    };
    let into = || -> Result<f64> {
        graph
            .edges_into(node)
            .try_fold(0.0, |total, e| Ok(total + edge_weight(e.attrs, weight)?))
    };
    match kind {
        DegreeKind::Total if directed => Ok(out()? + into()?),
        DegreeKind::Total | DegreeKind::Out => out(),
        DegreeKind::In => into(),
    }
}

fn distinct<'a, N: NodeKey + 'a>(
    nodes: impl Iterator<Item = &'a N> + 'a,
) -> impl Iterator<Item = &'a N> + 'a {
    let mut seen = HashSet::new();
    nodes.filter(move |n| seen.insert(*n))
}
