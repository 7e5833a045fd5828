use std::{collections::HashSet, hash::Hash, ptr};

use quickcheck::{Arbitrary, Gen};

use crate::{
    attrs,
    directedness::Directedness,
    edge_multiplicity::EdgeMultiplicity,
    graph::CoreGraph,
    tracing_support::{TimingScope, info_span, init_tracing, set_timing_scope},
    view::GraphView,
};

/// A graph built by a random sequence of mutations over nodes `0..20`,
/// including removals, parallel edges (on multigraphs) and self-loops.
/// Every edge carries a `"w"` attribute holding the step that created it.
#[derive(Debug, Clone)]
pub struct ArbGraph<G> {
    pub graph: G,
}

const NODE_RANGE: u32 = 20;

fn max_steps() -> usize {
    if cfg!(feature = "slow_tests") { 400 } else { 60 }
}

impl<D, M> Arbitrary for ArbGraph<CoreGraph<u32, D, M>>
where
    D: Directedness + 'static,
    M: EdgeMultiplicity + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        let mut graph = CoreGraph::new();
        let steps = usize::arbitrary(g) % max_steps();
        let node = |g: &mut Gen| u32::arbitrary(g) % NODE_RANGE;
        for step in 0..steps {
            let (u, v) = (node(g), node(g));
            // Removing something absent fails and is skipped.
            let _ = match u8::arbitrary(g) % 10 {
                0 => graph.add_node(u).map(drop),
                1 => graph.remove_node(&u).map(drop),
                2 => graph.remove_edge(&u, &v).map(drop),
                3 => graph.add_edge_with(u, u, attrs! { "w" => step }).map(drop),
                4 => graph
                    .add_edge_with(u, v, attrs! { "w" => step })
                    .and_then(|_| graph.add_edge_with(u, v, attrs! { "w" => step }))
                    .map(drop),
                _ => graph.add_edge_with(u, v, attrs! { "w" => step }).map(drop),
            };
        }
        ArbGraph { graph }
    }
}

pub fn has_duplicates<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    items.into_iter().any(|item| !seen.insert(item))
}

/// Checks the internal consistency of a graph or view.
///
/// Every edge must be reachable from both of its endpoints, resolving to the
/// same attribute map from each side, and every count must agree with the
/// corresponding iteration.
pub fn check_graph_consistency<G: GraphView>(graph: &G) {
    let _scope = set_timing_scope(TimingScope::Consistency);
    init_tracing();
    let directed = graph.is_directed();

    for node in graph.node_iter() {
        let _span = info_span!("check_node").entered();
        assert!(graph.has_node(node));

        for edge in graph.edges_from(node) {
            assert_eq!(edge.source, node);
            assert!(graph.has_node(edge.target), "dangling edge {edge:?}");
            let mut mirror = if directed {
                graph
                    .edges_into(edge.target)
                    .filter(|e| e.source == node)
                    .collect::<Vec<_>>()
            } else {
                graph
                    .edges_from(edge.target)
                    .filter(|e| e.target == node)
                    .collect::<Vec<_>>()
            };
            mirror.retain(|e| e.key == edge.key);
            assert_eq!(mirror.len(), 1, "missing mirror of {edge:?}");
            assert!(
                ptr::eq(mirror[0].attrs, edge.attrs),
                "mirror of {edge:?} has its own attributes"
            );
        }

        for edge in graph.edges_into(node) {
            assert_eq!(edge.target, node);
            assert!(graph.has_edge_with_key(edge.source, edge.target, edge.key));
        }

        if !graph.is_multigraph() {
            for neighbor in graph.node_iter() {
                assert!(graph.number_of_edges_between(node, neighbor) <= 1);
            }
        }
        assert!(!has_duplicates(
            graph.edges_from(node).map(|e| (e.target, e.key))
        ));
    }

    let _span = info_span!("check_counts").entered();
    assert!(!has_duplicates(graph.node_iter()));
    assert_eq!(graph.node_iter().count(), graph.number_of_nodes());
    assert!(!has_duplicates(
        graph.edge_iter().map(|e| ptr::from_ref(e.attrs))
    ));
    assert_eq!(graph.edge_iter().count(), graph.number_of_edges());

    let total_degree: usize = graph
        .node_iter()
        .map(|node| graph.degree(node).unwrap_or_default())
        .sum();
    assert_eq!(total_degree, 2 * graph.number_of_edges());
    if directed {
        let out: usize = graph
            .node_iter()
            .map(|node| graph.edges_from(node).count())
            .sum();
        let into: usize = graph
            .node_iter()
            .map(|node| graph.edges_into(node).count())
            .sum();
        assert_eq!(out, graph.number_of_edges());
        assert_eq!(into, graph.number_of_edges());
    }
    assert!(graph.number_of_nodes() > 0 || graph.number_of_edges() == 0);
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::graph::{DiGraph, Graph, MultiDiGraph, MultiGraph};

    #[quickcheck]
    fn prop_arbitrary_graphs_are_consistent(
        a: ArbGraph<Graph<u32>>,
        b: ArbGraph<DiGraph<u32>>,
        c: ArbGraph<MultiGraph<u32>>,
        d: ArbGraph<MultiDiGraph<u32>>,
    ) {
        check_graph_consistency(&a.graph);
        check_graph_consistency(&b.graph);
        check_graph_consistency(&c.graph);
        check_graph_consistency(&d.graph);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(has_duplicates([1, 2, 1]));
        assert!(!has_duplicates([1, 2, 3]));
    }
}
