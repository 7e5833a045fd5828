use std::ptr;

use netgraph::{
    graph_test_support::check_graph_consistency,
    prelude::*,
    reporting::DegreeKind,
};

/// The weighted diamond `A-B-D-C-A`.
fn diamond() -> Graph<&'static str> {
    let mut graph = Graph::new();
    graph
        .add_edges_from([
            ("A", "B", attrs! { "weight" => 4 }),
            ("B", "D", attrs! { "weight" => 2 }),
            ("A", "C", attrs! { "weight" => 3 }),
            ("C", "D", attrs! { "weight" => 4 }),
        ])
        .unwrap();
    graph
}

#[test]
fn test_diamond_queries() {
    let graph = diamond();
    assert_eq!(graph.nodes().len(), 4);
    assert_eq!(graph.edges().len(), 4);
    assert_eq!(graph.neighbors(&"A").unwrap().collect::<Vec<_>>(), vec![&"B", &"C"]);
    assert_eq!(graph.degree(&"D"), Ok(2));
    assert_eq!(graph.weighted_degree(&"D", "weight"), Ok(6.0));
    assert_eq!(graph.size(Some("weight")), Ok(13.0));
    assert_eq!(
        graph.adj().get(&"A").unwrap().get(&"C").unwrap().get("weight"),
        Some(&3.into())
    );
    assert!(ptr::eq(
        &graph.edges()[(&"A", &"B")],
        &graph.edges()[(&"B", &"A")]
    ));
    check_graph_consistency(&graph);
}

#[test]
fn test_diamond_remove_node() {
    let mut graph = diamond();
    graph.remove_node(&"B").unwrap();
    assert_eq!(graph.nodes().iter().collect::<Vec<_>>(), vec![&"A", &"D", &"C"]);
    assert!(!graph.has_edge(&"A", &"B"));
    assert!(!graph.has_edge(&"D", &"B"));
    assert_eq!(graph.degree(&"A"), Ok(1));
    assert!(matches!(graph.degree(&"B"), Err(GraphError::NodeNotFound(_))));
    check_graph_consistency(&graph);
}

#[test]
fn test_edge_data_with_default() {
    let mut graph = diamond();
    graph.add_edge("D", "E").unwrap();
    let weights: Vec<_> = graph
        .edges()
        .data("weight", AttrValue::from(1))
        .map(|(u, v, w)| (*u, *v, w.as_i64()))
        .collect();
    assert_eq!(
        weights,
        vec![
            ("A", "B", Some(4)),
            ("A", "C", Some(3)),
            ("B", "D", Some(2)),
            ("D", "C", Some(4)),
            ("D", "E", Some(1)),
        ]
    );
}

#[test]
fn test_degree_view_over_subset() {
    let mut graph = DiGraph::new();
    graph.add_edges_from([(1, 2), (1, 3), (3, 1), (2, 2)]).unwrap();
    let out = graph.out_degrees().unwrap();
    assert_eq!(out.kind(), DegreeKind::Out);
    assert_eq!(
        out.iter_nodes([&1, &2]).collect::<Vec<_>>(),
        vec![(&1, 2), (&2, 1)]
    );
    assert_eq!(graph.in_degrees().unwrap().get(&1), Ok(1));
    assert_eq!(graph.degrees().get(&2), Ok(3));
}

#[test]
fn test_nested_views_share_the_graph() {
    let mut graph = diamond();
    graph.add_edge("D", "E").unwrap();
    {
        let without_c = restricted_view(&graph, ["C"], []);
        let without_c_or_de = subgraph_view(&without_c, NoFilter, HideEdges::undirected([("D", "E")]));
        assert_eq!(without_c_or_de.number_of_nodes(), 4);
        assert_eq!(without_c_or_de.number_of_edges(), 2);
        assert!(!without_c_or_de.has_edge(&"E", &"D"));
        assert_eq!(without_c_or_de.degree(&"E"), Ok(0));
        check_graph_consistency(&without_c_or_de);

        let copy = without_c_or_de.copy();
        assert!(!copy.is_frozen());
        assert_eq!(copy.number_of_edges(), 2);
    }

    let mut view = subgraph_view(&mut graph, |n: &&str| *n != "C", NoFilter);
    view.graph_mut().add_edge("A", "E").unwrap();
    assert!(view.has_edge(&"E", &"A"));
    assert_eq!(view.neighbors(&"A").unwrap().collect::<Vec<_>>(), vec![&"B", &"E"]);
}

#[test]
fn test_reverse_view_is_live() {
    let mut graph = MultiDiGraph::new();
    graph.add_edge_with(1, 2, attrs! { "w" => 1 }).unwrap();
    let mut reversed = reverse_view(&mut graph).unwrap();
    assert!(reversed.has_edge(&2, &1));
    assert!(!reversed.has_edge(&1, &2));

    reversed.graph_mut().add_edge(2, 3).unwrap();
    assert_eq!(reversed.successors(&2).unwrap().collect::<Vec<_>>(), vec![&1]);
    assert_eq!(reversed.predecessors(&2).unwrap().collect::<Vec<_>>(), vec![&3]);
    check_graph_consistency(&reversed);

    assert!(reverse_view(&Graph::<u8>::new()).is_err());
}

#[test]
fn test_edge_subgraph_keeps_parallel_edges() {
    let mut graph = MultiGraph::new();
    graph.add_edges_from([(1, 2), (2, 1), (2, 3), (3, 4)]).unwrap();
    let view = graph.edge_subgraph([(2, 1), (3, 4)]);
    let mut nodes: Vec<_> = view.node_iter().copied().collect();
    nodes.sort();
    assert_eq!(nodes, vec![1, 2, 3, 4]);
    assert_eq!(view.number_of_edges_between(&1, &2), 2);
    assert!(!view.has_edge(&2, &3));
}

#[test]
fn test_restricted_multi_view_hides_one_key() {
    let mut graph = MultiDiGraph::new();
    graph.add_edges_from([(1, 2), (1, 2), (2, 3)]).unwrap();
    let view = restricted_multi_view(&graph, [], [(1, 2, EdgeKey::Index(0))]);
    assert_eq!(view.edge_key_set(&1, &2).collect::<Vec<_>>(), vec![&EdgeKey::Index(1)]);
    assert_eq!(view.number_of_edges(), 2);
}

#[test]
fn test_opaque_values_hold_graphs() {
    let mut inner = Graph::new();
    inner.add_edge(1, 2).unwrap();
    let mut outer = Graph::new();
    outer
        .add_node_with("g", attrs! { "graph" => AttrValue::opaque(inner) })
        .unwrap();
    let copy = outer.deep_copy();
    let stored = copy
        .node_attrs(&"g")
        .and_then(|attrs| attrs.get("graph"))
        .and_then(|v| v.downcast_ref::<Graph<i32>>())
        .unwrap();
    assert_eq!(stored.number_of_edges(), 1);
}

#[test]
fn test_frozen_view_and_frozen_graph() {
    let mut graph = diamond();
    assert!(graph.subgraph(["A", "B"]).is_frozen());
    graph.freeze();
    assert_eq!(graph.add_edges_from([("A", "D")]), Err(GraphError::Frozen));
    assert_eq!(graph.remove_edge(&"A", &"B"), Err(GraphError::Frozen));
    graph.edge_attrs_mut(&"A", &"B").unwrap().set("weight", 5);
    assert_eq!(graph.edges()[(&"B", &"A")].get("weight"), Some(&5.into()));
}

#[test]
fn test_iteration_order() {
    let mut graph = MultiGraph::new();
    graph.add_nodes_from(["x", "y", "z"]).unwrap();
    graph.add_edges_from([("y", "z"), ("y", "x"), ("y", "z")]).unwrap();
    assert_eq!(
        graph.edges().triples().collect::<Vec<_>>(),
        vec![
            (&"x", &"y", &EdgeKey::Index(0)),
            (&"y", &"z", &EdgeKey::Index(0)),
            (&"y", &"z", &EdgeKey::Index(1)),
        ]
    );
    graph.remove_node(&"x").unwrap();
    graph.add_node("x").unwrap();
    assert_eq!(graph.nodes().iter().collect::<Vec<_>>(), vec![&"y", &"z", &"x"]);
}
