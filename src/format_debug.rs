use std::fmt::{Debug, Formatter};

use crate::{
    edge_multiplicity::EdgeMultiplicity,
    util::{FormatDebugAs, FormatDebugWith},
    view::{EdgeRef, GraphView},
};

/// Formats a graph or view for debug output.
///
/// Nodes are listed with their attributes, in iteration order.  Edges are
/// tagged `u -- v` (undirected) or `u -> v` (directed), followed by `[key]`
/// on multigraphs, and listed with their attributes.  Graph attributes are
/// shown only when present.
pub fn format_debug<G: GraphView>(graph: &G, fmt: &mut Formatter<'_>, name: &str) -> std::fmt::Result {
    let arrow = if graph.is_directed() { "->" } else { "--" };
    let keyed = G::EdgeMultiplicity::allows_parallel_edges();
    let edge_tag = |edge: &EdgeRef<'_, G::Node>| {
        let tag = if keyed {
            format!("{:?} {arrow} {:?} [{}]", edge.source, edge.target, edge.key)
        } else {
            format!("{:?} {arrow} {:?}", edge.source, edge.target)
        };
        FormatDebugAs(tag)
    };

    let mut out = fmt.debug_struct(name);
    if !graph.graph_attrs().is_empty() {
        out.field("attrs", graph.graph_attrs());
    }
    out.field(
        "nodes",
        &FormatDebugWith(|f: &mut Formatter<'_>| {
            f.debug_map()
                .entries(
                    graph
                        .node_iter()
                        .filter_map(|node| Some((node, graph.node_attrs(node)?))),
                )
                .finish()
        }),
    )
    .field(
        "edges",
        &FormatDebugWith(|f: &mut Formatter<'_>| {
            f.debug_map()
                .entries(graph.edge_iter().map(|edge| (edge_tag(&edge), edge.attrs)))
                .finish()
        }),
    )
    .finish()
}

/// Formats a graph by its node and edge counts only.
pub fn format_summary<G: GraphView>(graph: &G, fmt: &mut Formatter<'_>, name: &str) -> std::fmt::Result {
    write!(
        fmt,
        "{name} with {} nodes and {} edges",
        graph.number_of_nodes(),
        graph.number_of_edges()
    )
}

/// Wraps a graph so that `{:?}` prints only its summary line.
pub struct Summary<'g, G>(pub &'g G);

impl<G: GraphView> Debug for Summary<'_, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match (self.0.is_directed(), self.0.is_multigraph()) {
            (false, false) => "Graph",
            (true, false) => "DiGraph",
            (false, true) => "MultiGraph",
            (true, true) => "MultiDiGraph",
        };
        format_summary(self.0, f, name)
    }
}
