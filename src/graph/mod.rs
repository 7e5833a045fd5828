//! The mutable graph type behind all four graph kinds.

mod construct;

use std::{
    borrow::Borrow,
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
};

use derivative::Derivative;
use indexmap::{IndexMap, map::Entry};

use crate::{
    adjacency::AdjacencyStore,
    attributes::{AttrValue, Attributes},
    bulk::EdgeSpec,
    directedness::{Directed, Directedness, Undirected},
    edge_arena::{EdgeArena, EdgeIndex, EdgeRecord},
    edge_key::EdgeKey,
    edge_multiplicity::{EdgeMultiplicity, MultipleEdges, SingleEdge},
    edge_slot::EdgeSlot,
    error::{GraphError, Result},
    format_debug::format_debug,
    tracing_support::{debug, info_span},
    view::{EdgeRef, GraphView, NodeKey},
};

/// An undirected graph without parallel edges.
pub type Graph<N> = CoreGraph<N, Undirected, SingleEdge>;

/// A directed graph without parallel edges.
pub type DiGraph<N> = CoreGraph<N, Directed, SingleEdge>;

/// An undirected graph allowing parallel edges.
pub type MultiGraph<N> = CoreGraph<N, Undirected, MultipleEdges>;

/// A directed graph allowing parallel edges.
pub type MultiDiGraph<N> = CoreGraph<N, Directed, MultipleEdges>;

/// A graph stored as adjacency maps over an arena of edge records.
///
/// Each edge is one [`EdgeRecord`] holding its key and attributes.  The
/// adjacency maps hold only the record's index: an undirected edge `u -- v`
/// is entered under `succ[u][v]` and `succ[v][u]` (once for a self-loop),
/// and a directed edge `u -> v` under `succ[u][v]` and `pred[v][u]`.  Both
/// entries resolve to the same record, so attribute changes made from
/// either end are seen from the other.
///
/// All entries for an edge are written by `link_edge` and erased by
/// `unlink_edge`; nothing else touches the adjacency maps' edge slots.
///
/// Structural mutators return `GraphError::Frozen` once [`freeze`] has been
/// called.  Attribute maps stay writable through the `*_attrs_mut` methods.
///
/// [`freeze`]: CoreGraph::freeze
#[derive(Derivative)]
#[derivative(Clone(bound = "N: Clone"))]
pub struct CoreGraph<N, D = Undirected, M = SingleEdge>
where
    D: Directedness,
    M: EdgeMultiplicity,
{
    attrs: Attributes,
    nodes: IndexMap<N, Attributes>,
    succ: AdjacencyStore<N, M::Slot>,
    /// Unused by undirected graphs.
    pred: AdjacencyStore<N, M::Slot>,
    edges: EdgeArena,
    frozen: bool,
    directedness: PhantomData<D>,
}

impl<N: NodeKey, D: Directedness, M: EdgeMultiplicity> Default for CoreGraph<N, D, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey, D: Directedness, M: EdgeMultiplicity> CoreGraph<N, D, M> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_attrs(Attributes::new())
    }

    /// Creates an empty graph carrying the given graph attributes.
    pub fn with_attrs(attrs: Attributes) -> Self {
        CoreGraph {
            attrs,
            nodes: IndexMap::new(),
            succ: AdjacencyStore::default(),
            pred: AdjacencyStore::default(),
            edges: EdgeArena::new(),
            frozen: false,
            directedness: PhantomData,
        }
    }

    /// Reserves room for `nodes` more nodes and `edges` more edges.
    pub fn reserve(&mut self, nodes: usize, edges: usize) {
        self.nodes.reserve(nodes);
        self.succ.reserve(nodes);
        if D::is_directed() {
            self.pred.reserve(nodes);
        }
        self.edges.reserve(edges);
    }

    /// Makes every later structural mutation fail with `GraphError::Frozen`.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn graph_attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    pub fn node_attrs_mut(&mut self, node: &N) -> Result<&mut Attributes> {
        self.nodes
            .get_mut(node)
            .ok_or_else(|| GraphError::node_not_found(node))
    }

    /// Gets the attributes of the single edge `source → target` for writing.
    pub fn edge_attrs_mut(&mut self, source: &N, target: &N) -> Result<&mut Attributes> {
        self.require_single_edge("edge_attrs_mut")?;
        let index = self
            .succ
            .slot(source, target)
            .and_then(|slot| slot.first());
        index
            .and_then(|index| self.edges.get_mut(index))
            .map(|record| &mut record.attrs)
            .ok_or_else(|| GraphError::edge_not_found(source, target))
    }

    pub fn edge_attrs_with_key_mut(
        &mut self,
        source: &N,
        target: &N,
        key: &EdgeKey,
    ) -> Result<&mut Attributes> {
        let index = self
            .succ
            .slot(source, target)
            .and_then(|slot| slot.get(key));
        index
            .and_then(|index| self.edges.get_mut(index))
            .map(|record| &mut record.attrs)
            .ok_or_else(|| GraphError::keyed_edge_not_found(source, target, key))
    }

    /// Adds `node` if it is absent.
    pub fn add_node(&mut self, node: N) -> Result<()> {
        self.add_node_with(node, Attributes::new())
    }

    /// Adds `node` if it is absent, then merges `attrs` into its attributes.
    pub fn add_node_with(&mut self, node: N, attrs: Attributes) -> Result<()> {
        self.check_mutable("add_node")?;
        self.insert_node(node, attrs);
        Ok(())
    }

    pub fn add_nodes_from(&mut self, nodes: impl IntoIterator<Item = N>) -> Result<()> {
        self.check_mutable("add_nodes_from")?;
        let _span = info_span!("add_nodes_from").entered();
        for node in nodes {
            self.insert_node(node, Attributes::new());
        }
        Ok(())
    }

    pub fn add_nodes_with_attrs_from(
        &mut self,
        nodes: impl IntoIterator<Item = (N, Attributes)>,
    ) -> Result<()> {
        self.check_mutable("add_nodes_from")?;
        let _span = info_span!("add_nodes_with_attrs_from").entered();
        for (node, attrs) in nodes {
            self.insert_node(node, attrs);
        }
        Ok(())
    }

    /// Removes `node` and every edge incident to it, returning its
    /// attributes.
    pub fn remove_node(&mut self, node: &N) -> Result<Attributes> {
        self.check_mutable("remove_node")?;
        if !self.nodes.contains_key(node) {
            return Err(GraphError::node_not_found(node));
        }
        let _span = info_span!("remove_node", node = ?node).entered();
        Ok(self.delete_node(node))
    }

    /// Removes each listed node that is present.  Absent nodes are skipped.
    pub fn remove_nodes_from<B: Borrow<N>>(&mut self, nodes: impl IntoIterator<Item = B>) -> Result<()> {
        self.check_mutable("remove_nodes_from")?;
        let _span = info_span!("remove_nodes_from").entered();
        for node in nodes {
            let node = node.borrow();
            if self.nodes.contains_key(node) {
                self.delete_node(node);
            }
        }
        Ok(())
    }

    /// Adds an edge, creating missing endpoints.  On single-edge graphs an
    /// existing edge is kept and returned; on multigraphs a new parallel edge
    /// is added under a fresh key.
    pub fn add_edge(&mut self, source: N, target: N) -> Result<EdgeKey> {
        self.add_edge_with(source, target, Attributes::new())
    }

    /// Like [`add_edge`](Self::add_edge), merging `attrs` into the edge's
    /// attributes.  Returns the key of the edge.
    pub fn add_edge_with(&mut self, source: N, target: N, attrs: Attributes) -> Result<EdgeKey> {
        self.check_mutable("add_edge")?;
        Ok(self.insert_edge(source, target, None, attrs))
    }

    /// Adds or updates the multigraph edge with the given key.
    pub fn add_edge_with_key(
        &mut self,
        source: N,
        target: N,
        key: impl Into<EdgeKey>,
        attrs: Attributes,
    ) -> Result<EdgeKey> {
        self.check_mutable("add_edge_with_key")?;
        self.require_multigraph("add_edge_with_key")?;
        Ok(self.insert_edge(source, target, Some(key.into()), attrs))
    }

    /// Adds each edge in order, returning their keys.  Elements naming a key
    /// are rejected by single-edge graphs, in which case nothing is added.
    pub fn add_edges_from<E: Into<EdgeSpec<N>>>(
        &mut self,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Vec<EdgeKey>> {
        self.check_mutable("add_edges_from")?;
        let specs: Vec<EdgeSpec<N>> = edges.into_iter().map(Into::into).collect();
        if specs.iter().any(|spec| spec.key.is_some()) {
            self.require_multigraph("add_edges_from")?;
        }
        let _span = info_span!("add_edges_from", count = specs.len()).entered();
        Ok(specs
            .into_iter()
            .map(|spec| self.insert_edge(spec.source, spec.target, spec.key, spec.attrs))
            .collect())
    }

    /// Adds each `(source, target, value)` with `value` stored under the
    /// attribute `weight`.
    pub fn add_weighted_edges_from<V: Into<AttrValue>>(
        &mut self,
        edges: impl IntoIterator<Item = (N, N, V)>,
        weight: &str,
    ) -> Result<Vec<EdgeKey>> {
        self.add_edges_from(edges.into_iter().map(|(source, target, value)| {
            let mut attrs = Attributes::new();
            attrs.set(weight, value);
            EdgeSpec::new(source, target).with_attrs(attrs)
        }))
    }

    /// Gets the key the next keyless `add_edge(source, target)` would use.
    pub fn new_edge_key(&self, source: &N, target: &N) -> Result<EdgeKey> {
        self.require_multigraph("new_edge_key")?;
        Ok(self.next_key(source, target))
    }

    /// Removes the edge `source → target`, returning its attributes.  On
    /// multigraphs the most recently added parallel edge goes.
    pub fn remove_edge(&mut self, source: &N, target: &N) -> Result<Attributes> {
        self.check_mutable("remove_edge")?;
        let key = self
            .succ
            .slot(source, target)
            .and_then(|slot| slot.last())
            .map(|(key, _)| key.clone())
            .ok_or_else(|| GraphError::edge_not_found(source, target))?;
        let _span = info_span!("remove_edge", source = ?source, target = ?target).entered();
        self.unlink_edge(source, target, &key)
            .map(|record| record.attrs)
            .ok_or_else(|| GraphError::edge_not_found(source, target))
    }

    pub fn remove_edge_with_key(&mut self, source: &N, target: &N, key: &EdgeKey) -> Result<Attributes> {
        self.check_mutable("remove_edge_with_key")?;
        self.require_multigraph("remove_edge_with_key")?;
        let _span = info_span!("remove_edge_with_key", key = %key).entered();
        self.unlink_edge(source, target, key)
            .map(|record| record.attrs)
            .ok_or_else(|| GraphError::keyed_edge_not_found(source, target, key))
    }

    /// Removes each listed edge that is present.  Absent edges are skipped.
    /// An element without a key removes the most recently added parallel
    /// edge.
    pub fn remove_edges_from<E: Into<EdgeSpec<N>>>(
        &mut self,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<()> {
        self.check_mutable("remove_edges_from")?;
        let _span = info_span!("remove_edges_from").entered();
        for spec in edges {
            let spec = spec.into();
            let Some(slot) = self.succ.slot(&spec.source, &spec.target) else {
                continue;
            };
            let key = match spec.key {
                Some(key) if slot.contains_key(&key) => key,
                Some(_) => continue,
                None => match slot.last() {
                    Some((key, _)) => key.clone(),
                    None => continue,
                },
            };
            self.unlink_edge(&spec.source, &spec.target, &key);
        }
        Ok(())
    }

    /// Removes all nodes, edges and graph attributes.
    pub fn clear(&mut self) -> Result<()> {
        self.check_mutable("clear")?;
        let _span = info_span!("clear").entered();
        self.attrs.clear();
        self.nodes.clear();
        self.succ.clear();
        self.pred.clear();
        self.edges.clear();
        Ok(())
    }

    /// Removes all edges, keeping nodes and graph attributes.
    pub fn clear_edges(&mut self) -> Result<()> {
        self.check_mutable("clear_edges")?;
        let _span = info_span!("clear_edges").entered();
        self.succ.clear_edges();
        self.pred.clear_edges();
        self.edges.clear();
        Ok(())
    }

    fn check_mutable(&self, operation: &'static str) -> Result<()> {
        if self.frozen {
            debug!(operation, "rejected mutation of frozen graph");
            return Err(GraphError::Frozen);
        }
        Ok(())
    }

    fn require_multigraph(&self, operation: &'static str) -> Result<()> {
        if !M::allows_parallel_edges() {
            debug!(operation, kind = M::NAME, "operation needs a multigraph");
            return Err(GraphError::NotImplemented {
                operation,
                kind: M::NAME,
            });
        }
        Ok(())
    }

    fn require_single_edge(&self, operation: &'static str) -> Result<()> {
        if M::allows_parallel_edges() {
            debug!(operation, kind = M::NAME, "operation needs an edge key");
            return Err(GraphError::NotImplemented {
                operation,
                kind: M::NAME,
            });
        }
        Ok(())
    }

    /// Adds `node` if absent and merges `attrs` into its attributes.
    fn insert_node(&mut self, node: N, attrs: Attributes) {
        match self.nodes.entry(node) {
            Entry::Occupied(entry) => entry.into_mut().update(attrs),
            Entry::Vacant(entry) => {
                let node = entry.key().clone();
                entry.insert(attrs);
                if D::is_directed() {
                    self.pred.insert_node(node.clone());
                }
                self.succ.insert_node(node);
            }
        }
    }

    /// Adds or updates one edge.  Without a key, multigraphs get a fresh
    /// parallel edge and single-edge graphs update the existing one.
    fn insert_edge(&mut self, source: N, target: N, key: Option<EdgeKey>, attrs: Attributes) -> EdgeKey {
        self.insert_node(source.clone(), Attributes::new());
        self.insert_node(target.clone(), Attributes::new());
        let key = match key {
            Some(key) if M::allows_parallel_edges() => key,
            None if M::allows_parallel_edges() => self.next_key(&source, &target),
            _ => EdgeKey::default(),
        };
        let existing = self
            .succ
            .slot(&source, &target)
            .and_then(|slot| slot.get(&key));
        match existing.and_then(|index| self.edges.get_mut(index)) {
            Some(record) => record.attrs.update(attrs),
            None => self.link_edge(source, target, key.clone(), attrs),
        }
        key
    }

    fn next_key(&self, source: &N, target: &N) -> EdgeKey {
        let slot = self.succ.slot(source, target);
        let mut key = slot.map_or(0, |slot| slot.len());
        while slot.is_some_and(|slot| slot.contains_key(&EdgeKey::Index(key))) {
            key += 1;
        }
        EdgeKey::Index(key)
    }

    /// Stores a new edge record and enters it in both adjacency positions.
    fn link_edge(&mut self, source: N, target: N, key: EdgeKey, attrs: Attributes) {
        let index = self.edges.insert(EdgeRecord {
            key: key.clone(),
            attrs,
        });
        if D::is_directed() {
            self.pred.link(&target, &source, key.clone(), index);
        } else if source != target {
            self.succ.link(&target, &source, key.clone(), index);
        }
        self.succ.link(&source, &target, key, index);
        self.check_pair(&source, &target);
    }

    /// Erases an edge from both adjacency positions and drops its record.
    fn unlink_edge(&mut self, source: &N, target: &N, key: &EdgeKey) -> Option<EdgeRecord> {
        let index = self.succ.unlink(source, target, key)?;
        let mirrored = if D::is_directed() {
            self.pred.unlink(target, source, key)
        } else if source != target {
            self.succ.unlink(target, source, key)
        } else {
            Some(index)
        };
        debug_assert!(
            cfg!(feature = "unchecked") || mirrored == Some(index),
            "mirror entry of ({source:?}, {target:?}, {key}) is missing"
        );
        self.check_pair(source, target);
        self.edges.remove(index)
    }

    /// Lists every edge incident to `node` as `(source, target, key)`.
    fn incident_keys(&self, node: &N) -> Vec<(N, N, EdgeKey)> {
        let mut keys = Vec::new();
        if let Some((_, row)) = self.succ.row(node) {
            for (neighbor, slot) in row {
                keys.extend(
                    slot.keys()
                        .map(|key| (node.clone(), neighbor.clone(), key.clone())),
                );
            }
        }
        if D::is_directed() {
            if let Some((_, row)) = self.pred.row(node) {
                for (neighbor, slot) in row.iter().filter(|(n, _)| *n != node) {
                    keys.extend(
                        slot.keys()
                            .map(|key| (neighbor.clone(), node.clone(), key.clone())),
                    );
                }
            }
        }
        keys
    }

    fn delete_node(&mut self, node: &N) -> Attributes {
        for (source, target, key) in self.incident_keys(node) {
            self.unlink_edge(&source, &target, &key);
        }
        self.succ.remove_node(node);
        self.pred.remove_node(node);
        self.nodes.shift_remove(node).unwrap_or_default()
    }

    /// Asserts that the two adjacency entries of a node pair agree.
    fn check_pair(&self, source: &N, target: &N) {
        if cfg!(all(debug_assertions, not(feature = "unchecked"))) {
            let mirror = if D::is_directed() {
                &self.pred
            } else {
                &self.succ
            };
            let forward: Option<Vec<EdgeIndex>> = self
                .succ
                .slot(source, target)
                .map(|slot| slot.indices().collect());
            let backward: Option<Vec<EdgeIndex>> = mirror
                .slot(target, source)
                .map(|slot| slot.indices().collect());
            assert_eq!(
                forward, backward,
                "adjacency entries of ({source:?}, {target:?}) disagree"
            );
        }
    }

    fn row_edges<'a>(
        &'a self,
        store: &'a AdjacencyStore<N, M::Slot>,
        node: &'a N,
        reversed: bool,
    ) -> impl Iterator<Item = EdgeRef<'a, N>> + 'a {
        store.row(node).into_iter().flat_map(move |(node, row)| {
            row.iter().flat_map(move |(neighbor, slot)| {
                slot.indices().filter_map(move |index| {
                    if reversed {
                        self.edge_ref(neighbor, node, index)
                    } else {
                        self.edge_ref(node, neighbor, index)
                    }
                })
            })
        })
    }

    fn edge_ref<'a>(&'a self, source: &'a N, target: &'a N, index: EdgeIndex) -> Option<EdgeRef<'a, N>> {
        let record = self.edges.get(index)?;
        Some(EdgeRef {
            source,
            target,
            key: &record.key,
            attrs: &record.attrs,
        })
    }

    fn kind_name() -> &'static str {
        match (D::is_directed(), M::allows_parallel_edges()) {
            (false, false) => "Graph",
            (true, false) => "DiGraph",
            (false, true) => "MultiGraph",
            (true, true) => "MultiDiGraph",
        }
    }
}

impl<N: NodeKey, D: Directedness, M: EdgeMultiplicity> GraphView for CoreGraph<N, D, M> {
    type Node = N;
    type Directedness = D;
    type EdgeMultiplicity = M;

    fn graph_attrs(&self) -> &Attributes {
        &self.attrs
    }

    fn node_iter(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.keys()
    }

    fn get_node(&self, node: &N) -> Option<&N> {
        self.nodes.get_key_value(node).map(|(node, _)| node)
    }

    fn node_attrs(&self, node: &N) -> Option<&Attributes> {
        self.nodes.get(node)
    }

    fn edges_from<'a>(&'a self, node: &'a N) -> impl Iterator<Item = EdgeRef<'a, N>> + 'a {
        self.row_edges(&self.succ, node, false)
    }

    fn edges_into<'a>(&'a self, node: &'a N) -> impl Iterator<Item = EdgeRef<'a, N>> + 'a {
        let store = if D::is_directed() {
            &self.pred
        } else {
            &self.succ
        };
        self.row_edges(store, node, true)
    }

    fn edges_between<'a>(
        &'a self,
        source: &'a N,
        target: &'a N,
    ) -> impl Iterator<Item = EdgeRef<'a, N>> + 'a {
        self.succ
            .row(source)
            .and_then(|(source, row)| {
                row.get_key_value(target)
                    .map(|(target, slot)| (source, target, slot))
            })
            .into_iter()
            .flat_map(move |(source, target, slot)| {
                slot.indices()
                    .filter_map(move |index| self.edge_ref(source, target, index))
            })
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn has_node(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    fn number_of_edges_between(&self, source: &N, target: &N) -> usize {
        self.succ.slot(source, target).map_or(0, |slot| slot.len())
    }

    fn has_edge(&self, source: &N, target: &N) -> bool {
        self.succ.slot(source, target).is_some()
    }
}

impl<N: NodeKey, D: Directedness, M: EdgeMultiplicity> Debug for CoreGraph<N, D, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        format_debug(self, f, Self::kind_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    fn scenario() -> Graph<&'static str> {
        let mut graph = Graph::new();
        graph.add_edge_with("A", "B", attrs! { "weight" => 4 }).unwrap();
        graph.add_edge_with("B", "D", attrs! { "weight" => 2 }).unwrap();
        graph.add_edge_with("A", "C", attrs! { "weight" => 3 }).unwrap();
        graph.add_edge_with("C", "D", attrs! { "weight" => 4 }).unwrap();
        graph
    }

    #[test]
    fn test_scenario_counts() {
        let graph = scenario();
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 4);
        assert_eq!(graph.degree(&"A"), Ok(2));
        assert_eq!(graph.edges()[(&"A", &"B")].get("weight"), Some(&4.into()));
    }

    #[test]
    fn test_scenario_remove_node() {
        let mut graph = scenario();
        let attrs = graph.remove_node(&"B").unwrap();
        assert!(attrs.is_empty());
        assert!(!graph.nodes().contains(&"B"));
        let edges: Vec<_> = graph.edges().pairs().collect();
        assert_eq!(edges, vec![(&"A", &"C"), (&"D", &"C")]);
        assert_eq!(graph.remove_node(&"B"), Err(GraphError::node_not_found(&"B")));
    }

    #[test]
    fn test_undirected_attrs_are_shared() {
        let mut graph = scenario();
        graph
            .edge_attrs_mut(&"D", &"B")
            .unwrap()
            .set("color", "blue");
        assert_eq!(
            graph.edge_attrs(&"B", &"D").unwrap().get("color"),
            Some(&"blue".into())
        );
        assert!(std::ptr::eq(
            graph.edge_attrs(&"B", &"D").unwrap(),
            graph.edge_attrs(&"D", &"B").unwrap()
        ));
    }

    #[test]
    fn test_add_edge_merges_on_single_edge_graphs() {
        let mut graph = DiGraph::new();
        graph.add_edge_with(1, 2, attrs! { "a" => 1, "b" => 1 }).unwrap();
        graph.add_edge_with(1, 2, attrs! { "b" => 2 }).unwrap();
        assert_eq!(graph.number_of_edges(), 1);
        let attrs = graph.edge_attrs(&1, &2).unwrap();
        assert_eq!(attrs.get("a"), Some(&1.into()));
        assert_eq!(attrs.get("b"), Some(&2.into()));
    }

    #[test]
    fn test_add_node_merges_attrs() {
        let mut graph = Graph::new();
        graph.add_node_with("x", attrs! { "a" => 1, "b" => 1 }).unwrap();
        graph.add_edge("x", "y").unwrap();
        graph.add_node_with("x", attrs! { "b" => 2 }).unwrap();
        assert_eq!(graph.number_of_nodes(), 2);
        assert_eq!(graph.number_of_edges(), 1);
        let attrs = graph.node_attrs(&"x").unwrap();
        assert_eq!(attrs.get("a"), Some(&1.into()));
        assert_eq!(attrs.get("b"), Some(&2.into()));
    }

    #[test]
    fn test_self_loop_occupies_one_slot() {
        let mut graph = Graph::new();
        graph.add_edge(7, 7).unwrap();
        assert_eq!(graph.degree(&7), Ok(2));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.edges_from(&7).count(), 1);
        graph.remove_edge(&7, &7).unwrap();
        assert_eq!(graph.degree(&7), Ok(0));
        assert!(graph.has_node(&7));
    }

    #[test]
    fn test_directed_dual_store() {
        let mut graph = DiGraph::new();
        graph.add_edges_from([(1, 2), (2, 3), (3, 1), (1, 1)]).unwrap();
        assert_eq!(graph.successors(&1).unwrap().collect::<Vec<_>>(), vec![&2, &1]);
        assert_eq!(graph.predecessors(&1).unwrap().collect::<Vec<_>>(), vec![&3, &1]);

        graph.remove_node(&1).unwrap();
        assert_eq!(graph.predecessors(&2).unwrap().count(), 0);
        assert_eq!(graph.successors(&3).unwrap().count(), 0);
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn test_multigraph_keys() {
        let mut graph = MultiGraph::new();
        let keys: Vec<_> = (0..3).map(|_| graph.add_edge("u", "v").unwrap()).collect();
        assert_eq!(keys, vec![EdgeKey::Index(0), EdgeKey::Index(1), EdgeKey::Index(2)]);
        assert_eq!(graph.number_of_edges_between(&"v", &"u"), 3);

        graph.remove_edge_with_key(&"v", &"u", &EdgeKey::Index(1)).unwrap();
        assert_eq!(graph.new_edge_key(&"u", &"v"), Ok(EdgeKey::Index(3)));
        assert_eq!(graph.add_edge("u", "v"), Ok(EdgeKey::Index(3)));

        // Removing without a key takes the most recent edge.
        graph.remove_edge(&"u", &"v").unwrap();
        assert!(!graph.has_edge_with_key(&"u", &"v", &EdgeKey::Index(3)));
        assert!(graph.has_edge_with_key(&"u", &"v", &EdgeKey::Index(2)));
    }

    #[test]
    fn test_user_keys() {
        let mut graph = MultiDiGraph::new();
        graph
            .add_edge_with_key(1, 2, "road", attrs! { "len" => 5 })
            .unwrap();
        graph
            .add_edge_with_key(1, 2, "road", attrs! { "lanes" => 2 })
            .unwrap();
        graph.add_edge(1, 2).unwrap();
        assert_eq!(graph.number_of_edges(), 2);
        let road = graph.edge_attrs_with_key(&1, &2, &"road".into()).unwrap();
        assert_eq!(road.len(), 2);
    }

    #[test]
    fn test_capability_errors_leave_graph_unchanged() {
        let mut graph = Graph::new();
        graph.add_edge(1, 2).unwrap();
        assert!(matches!(
            graph.add_edge_with_key(3, 4, EdgeKey::Index(0), Attributes::new()),
            Err(GraphError::NotImplemented { operation: "add_edge_with_key", kind: "single-edge" })
        ));
        assert!(graph.new_edge_key(&1, &2).is_err());
        assert!(!graph.has_node(&3));

        let result = graph.add_edges_from([
            EdgeSpec::new(5, 6),
            EdgeSpec::new(7, 8).with_key(EdgeKey::Index(1)),
        ]);
        assert!(result.is_err());
        assert!(!graph.has_node(&5));
        assert!(!graph.has_node(&7));
    }

    #[test]
    fn test_bulk_remove_skips_missing() {
        let mut graph = scenario();
        assert!(graph.remove_node(&"Z").is_err());
        graph.remove_nodes_from(["Z"]).unwrap();
        assert_eq!(graph.number_of_nodes(), 4);

        graph.remove_edges_from([("A", "B"), ("A", "Z"), ("A", "D")]).unwrap();
        assert_eq!(graph.number_of_edges(), 3);
        assert!(graph.remove_edge(&"A", &"B").unwrap_err().is_not_found());
    }

    #[test]
    fn test_frozen_graph() {
        let mut graph = scenario();
        graph.freeze();
        assert!(graph.is_frozen());
        assert_eq!(graph.add_node("E"), Err(GraphError::Frozen));
        assert_eq!(graph.add_edge("A", "D"), Err(GraphError::Frozen));
        assert_eq!(graph.remove_node(&"A"), Err(GraphError::Frozen));
        assert_eq!(graph.clear(), Err(GraphError::Frozen));
        assert_eq!(graph.number_of_edges(), 4);

        graph.node_attrs_mut(&"A").unwrap().set("seen", true);
        assert_eq!(graph.nodes().attrs(&"A").unwrap().get("seen"), Some(&true.into()));
        assert!(!graph.copy().is_frozen());
    }

    #[test]
    fn test_clear_and_clear_edges() {
        let mut graph = scenario();
        graph.graph_attrs_mut().set("name", "diamond");
        graph.clear_edges().unwrap();
        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 0);
        assert!(graph.graph_attrs().contains("name"));

        graph.clear().unwrap();
        assert_eq!(graph.number_of_nodes(), 0);
        assert!(graph.graph_attrs().is_empty());
    }

    #[test]
    fn test_node_order_after_removal() {
        let mut graph = Graph::new();
        graph.add_nodes_from([3, 1, 4, 5]).unwrap();
        graph.remove_node(&1).unwrap();
        graph.add_node(1).unwrap();
        assert_eq!(graph.node_iter().collect::<Vec<_>>(), vec![&3, &4, &5, &1]);
    }

    #[test]
    fn test_neighbor_order_after_edge_removal() {
        let mut graph = Graph::new();
        graph.add_edges_from([(0, 1), (0, 2), (0, 3)]).unwrap();
        graph.remove_edge(&0, &1).unwrap();
        graph.add_edge(0, 1).unwrap();
        assert_eq!(graph.neighbors(&0).unwrap().collect::<Vec<_>>(), vec![&2, &3, &1]);
    }

    #[test]
    fn test_weighted_edges() {
        let mut graph = DiGraph::new();
        graph
            .add_weighted_edges_from([(1, 2, 0.5), (2, 3, 1.5)], "weight")
            .unwrap();
        assert_eq!(graph.size(Some("weight")), Ok(2.0));
        assert_eq!(graph.out_degrees().unwrap().weighted(&2, "weight"), Ok(1.5));
    }

    #[test]
    fn test_debug_format() {
        let mut graph = DiGraph::new();
        graph.add_edge_with("a", "b", attrs! { "w" => 1 }).unwrap();
        assert_eq!(
            format!("{graph:?}"),
            r#"DiGraph { nodes: {"a": {}, "b": {}}, edges: {"a" -> "b": {"w": 1}} }"#
        );
    }
}
