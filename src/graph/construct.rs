use std::collections::HashSet;

use crate::{
    attributes::Attributes,
    bulk::EdgeSpec,
    directedness::Directedness,
    edge_key::EdgeKey,
    edge_multiplicity::EdgeMultiplicity,
    error::Result,
    tracing_support::info_span,
    view::{GraphView, NodeKey},
};

use super::CoreGraph;

impl<N: NodeKey, D: Directedness, M: EdgeMultiplicity> CoreGraph<N, D, M> {
    /// Builds a graph holding the nodes, edges and attributes of any graph
    /// or view.  Attribute maps are cloned, so `Shared` and `Opaque` values
    /// alias those of `source`.
    ///
    /// Converting between kinds follows the rules of
    /// [`to_directed`](GraphView::to_directed) and
    /// [`to_undirected`](GraphView::to_undirected); keys are dropped when
    /// either side is a single-edge graph.
    pub fn from_graph<G: GraphView<Node = N>>(source: &G) -> Self {
        Self::from_graph_with(source, Attributes::clone)
    }

    /// Like [`from_graph`](Self::from_graph), copying every attribute map
    /// with `copy_attrs`.
    pub fn from_graph_with<G, F>(source: &G, copy_attrs: F) -> Self
    where
        G: GraphView<Node = N>,
        F: Fn(&Attributes) -> Attributes,
    {
        let _span = info_span!("from_graph").entered();
        let mut graph = Self::with_attrs(copy_attrs(source.graph_attrs()));
        graph.reserve(source.number_of_nodes(), 0);
        for node in source.node_iter() {
            let attrs = source.node_attrs(node).map(&copy_attrs).unwrap_or_default();
            graph.insert_node(node.clone(), attrs);
        }
        graph.merge_edges_from(source, &copy_attrs);
        graph
    }

    /// Builds a graph from `(node, neighbors)` rows, each neighbor paired
    /// with the attributes of the edge to it.
    ///
    /// Listing an edge again merges its attributes, except on undirected
    /// multigraphs: there an edge `(u, v)` whose reverse `(v, u)` was listed
    /// by an earlier row is taken to be that edge's mirror and skipped, so
    /// symmetric input does not double up parallel edges.  Use
    /// [`from_keyed_adjacency`](Self::from_keyed_adjacency) to keep edge keys.
    pub fn from_adjacency<R>(rows: impl IntoIterator<Item = (N, R)>) -> Self
    where
        R: IntoIterator<Item = (N, Attributes)>,
    {
        let _span = info_span!("from_adjacency").entered();
        let mut graph = Self::new();
        let skip_mirrors = !D::is_directed() && M::allows_parallel_edges();
        let mut listed = HashSet::new();
        for (node, neighbors) in rows {
            graph.insert_node(node.clone(), Attributes::new());
            let mut row_pairs = Vec::new();
            for (neighbor, attrs) in neighbors {
                if skip_mirrors && listed.contains(&(node.clone(), neighbor.clone())) {
                    continue;
                }
                if skip_mirrors {
                    row_pairs.push((neighbor.clone(), node.clone()));
                }
                graph.insert_edge(node.clone(), neighbor, None, attrs);
            }
            listed.extend(row_pairs);
        }
        graph
    }

    /// Like [`from_adjacency`](Self::from_adjacency), with each neighbor
    /// entry carrying an edge key.  Entries with the same key merge, so
    /// symmetric undirected input yields one edge per key.  Keys are ignored
    /// by single-edge graphs.
    pub fn from_keyed_adjacency<R>(rows: impl IntoIterator<Item = (N, R)>) -> Self
    where
        R: IntoIterator<Item = (N, EdgeKey, Attributes)>,
    {
        let _span = info_span!("from_keyed_adjacency").entered();
        let mut graph = Self::new();
        for (node, neighbors) in rows {
            graph.insert_node(node.clone(), Attributes::new());
            for (neighbor, key, attrs) in neighbors {
                graph.insert_edge(node.clone(), neighbor, Some(key), attrs);
            }
        }
        graph
    }

    /// Builds a graph from an edge list.  Fails like
    /// [`add_edges_from`](Self::add_edges_from).
    pub fn from_edges<E: Into<EdgeSpec<N>>>(edges: impl IntoIterator<Item = E>) -> Result<Self> {
        let mut graph = Self::new();
        graph.add_edges_from(edges)?;
        Ok(graph)
    }

    /// Adds the graph attributes, nodes and edges of `other` to this graph,
    /// merging attributes where they already exist.
    pub fn update<G: GraphView<Node = N>>(&mut self, other: &G) -> Result<()> {
        self.check_mutable("update")?;
        let _span = info_span!("update").entered();
        self.attrs.update(other.graph_attrs().clone());
        for node in other.node_iter() {
            let attrs = other.node_attrs(node).cloned().unwrap_or_default();
            self.insert_node(node.clone(), attrs);
        }
        self.merge_edges_from(other, &Attributes::clone);
        Ok(())
    }

    fn merge_edges_from<G, F>(&mut self, source: &G, copy_attrs: &F)
    where
        G: GraphView<Node = N>,
        F: Fn(&Attributes) -> Attributes,
    {
        let keep_keys =
            M::allows_parallel_edges() && G::EdgeMultiplicity::allows_parallel_edges();
        let mirror = D::is_directed() && !G::Directedness::is_directed();
        for edge in source.edge_iter() {
            let key = keep_keys.then(|| edge.key.clone());
            self.insert_edge(
                edge.source.clone(),
                edge.target.clone(),
                key.clone(),
                copy_attrs(edge.attrs),
            );
            if mirror && !edge.is_self_loop() {
                self.insert_edge(
                    edge.target.clone(),
                    edge.source.clone(),
                    key,
                    copy_attrs(edge.attrs),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        attributes::{AttrValue, SharedValue},
        attrs,
        edge_key::EdgeKey,
        graph::*,
        view::GraphView,
    };

    #[test]
    fn test_round_trip_through_edge_list() {
        let graph = Graph::from_edges([
            (1, 2, attrs! { "weight" => 4 }),
            (2, 3, attrs! { "weight" => 2 }),
            (1, 3, attrs! { "weight" => 3 }),
        ])
        .unwrap();
        let edges: Vec<_> = graph
            .edge_iter()
            .map(|e| (*e.source, *e.target, e.attrs.clone()))
            .collect();
        let rebuilt = Graph::from_edges(edges).unwrap();
        assert_eq!(
            rebuilt.node_iter().collect::<Vec<_>>(),
            graph.node_iter().collect::<Vec<_>>()
        );
        for edge in graph.edge_iter() {
            assert_eq!(
                rebuilt.edge_attrs(edge.source, edge.target),
                Ok(edge.attrs)
            );
        }
        assert_eq!(rebuilt.number_of_edges(), 3);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut graph = Graph::new();
        graph.add_edge_with("a", "b", attrs! { "w" => 1 }).unwrap();
        let mut copy = graph.copy();
        copy.edge_attrs_mut(&"a", &"b").unwrap().set("w", 2);
        copy.add_edge("b", "c").unwrap();
        assert_eq!(graph.edge_attrs(&"a", &"b").unwrap().get("w"), Some(&1.into()));
        assert!(!graph.has_node(&"c"));
    }

    #[test]
    fn test_copy_shares_cells_and_deep_copy_detaches() {
        let cell = SharedValue::new(vec![AttrValue::from(1)]);
        let mut graph = DiGraph::new();
        graph
            .add_node_with(0, attrs! { "cell" => cell.clone() })
            .unwrap();

        let shallow = graph.copy();
        let deep = graph.deep_copy();
        cell.set("changed");

        assert_eq!(
            shallow.node_attrs(&0).unwrap().get("cell"),
            Some(&AttrValue::Shared(cell.clone()))
        );
        match deep.node_attrs(&0).unwrap().get("cell") {
            Some(AttrValue::Shared(detached)) => {
                assert!(!detached.ptr_eq(&cell));
                assert_eq!(detached.get(), AttrValue::List(vec![1.into()]));
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_to_directed_mirrors_edges() {
        let mut graph = Graph::new();
        graph.add_edge_with(1, 2, attrs! { "w" => 7 }).unwrap();
        graph.add_edge(3, 3).unwrap();
        let directed = graph.to_directed();
        assert!(directed.is_directed());
        assert_eq!(directed.number_of_edges(), 3);
        assert_eq!(directed.edge_attrs(&2, &1).unwrap().get("w"), Some(&7.into()));
        assert!(!std::ptr::eq(
            directed.edge_attrs(&1, &2).unwrap(),
            directed.edge_attrs(&2, &1).unwrap()
        ));
    }

    #[test]
    fn test_to_undirected_last_writer_wins() {
        let mut graph = DiGraph::new();
        graph.add_edge_with(1, 2, attrs! { "w" => 1, "a" => true }).unwrap();
        graph.add_edge_with(2, 1, attrs! { "w" => 2 }).unwrap();
        let undirected = graph.to_undirected();
        assert_eq!(undirected.number_of_edges(), 1);
        let attrs = undirected.edge_attrs(&1, &2).unwrap();
        assert_eq!(attrs.get("w"), Some(&2.into()));
        assert_eq!(attrs.get("a"), Some(&true.into()));
    }

    #[test]
    fn test_multigraph_copy_keeps_keys() {
        let mut graph = MultiDiGraph::new();
        graph.add_edge_with_key("a", "b", "x", attrs! {}).unwrap();
        graph.add_edge("a", "b").unwrap();
        let copy = graph.copy();
        assert_eq!(
            copy.edge_key_set(&"a", &"b").cloned().collect::<Vec<_>>(),
            vec![EdgeKey::from("x"), EdgeKey::Index(1)]
        );

        let collapsed = DiGraph::from_graph(&graph);
        assert_eq!(collapsed.number_of_edges(), 1);
    }

    #[test]
    fn test_reverse() {
        let mut graph = DiGraph::new();
        graph.add_edges_from([(1, 2), (2, 3)]).unwrap();
        let reversed = graph.reverse().unwrap();
        assert!(reversed.has_edge(&2, &1));
        assert!(reversed.has_edge(&3, &2));
        assert!(!reversed.has_edge(&1, &2));
    }

    #[test]
    fn test_from_adjacency() {
        let graph = Graph::from_adjacency([
            (1, vec![(2, attrs! { "w" => 1 }), (3, attrs! {})]),
            (2, vec![(1, attrs! { "w" => 1 })]),
            (3, vec![(1, attrs! {})]),
        ]);
        assert_eq!(graph.number_of_edges(), 2);

        let graph = MultiDiGraph::from_adjacency([(1, vec![(2, attrs! {}), (2, attrs! {})])]);
        assert_eq!(graph.number_of_edges_between(&1, &2), 2);
    }

    #[test]
    fn test_from_adjacency_keeps_edges_listed_on_one_side() {
        let graph = Graph::from_adjacency([(2, vec![]), (1, vec![(2, attrs! { "w" => 5 })])]);
        assert!(graph.has_edge(&1, &2));
        assert_eq!(graph.edge_attrs(&2, &1).unwrap().get("w"), Some(&5.into()));

        let graph = MultiGraph::from_adjacency([
            (1, vec![(3, attrs! {})]),
            (2, vec![(1, attrs! {}), (1, attrs! {})]),
            (3, vec![(1, attrs! {}), (2, attrs! {})]),
        ]);
        assert_eq!(graph.number_of_edges_between(&1, &2), 2);
        assert_eq!(graph.number_of_edges_between(&1, &3), 1);
        assert_eq!(graph.number_of_edges_between(&2, &3), 1);
        assert_eq!(graph.number_of_edges(), 4);
    }

    #[test]
    fn test_from_keyed_adjacency() {
        let rows = || {
            [
                (
                    "a",
                    vec![
                        ("b", EdgeKey::from("x"), attrs! { "w" => 1 }),
                        ("b", EdgeKey::from("y"), attrs! {}),
                    ],
                ),
                ("b", vec![("a", EdgeKey::from("x"), attrs! { "c" => true })]),
            ]
        };
        let graph = MultiGraph::from_keyed_adjacency(rows());
        assert_eq!(
            graph.edge_key_set(&"a", &"b").cloned().collect::<Vec<_>>(),
            vec![EdgeKey::from("x"), EdgeKey::from("y")]
        );
        let x = graph.edge_attrs_with_key(&"b", &"a", &EdgeKey::from("x")).unwrap();
        assert_eq!(x.get("w"), Some(&1.into()));
        assert_eq!(x.get("c"), Some(&true.into()));

        let collapsed = Graph::from_keyed_adjacency(rows());
        assert_eq!(collapsed.number_of_edges(), 1);
    }

    #[test]
    fn test_update() {
        let mut graph = Graph::new();
        graph.add_edge(1, 2).unwrap();
        let mut other = Graph::new();
        other.graph_attrs_mut().set("name", "other");
        other.add_edge_with(2, 3, attrs! { "w" => 1 }).unwrap();
        graph.update(&other).unwrap();
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.graph_attrs().get("name"), Some(&"other".into()));

        graph.update(&other.subgraph([2])).unwrap();
        assert_eq!(graph.number_of_edges(), 2);
    }
}
