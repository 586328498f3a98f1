//! Dense adjacency extraction

use ndarray::Array2;
use crate::error::Result;
use crate::graph::AttributedGraph;

/// Dense adjacency matrix with rows = source and columns = target.
///
/// Multi-edges are summed. Without a weight attribute every edge counts 1.
/// Undirected graphs give a symmetric matrix; an undirected self-loop adds its
/// weight twice on the diagonal, so that halving the diagonal of a folded
/// contact layer recovers exactly one unit per edge.
pub fn adjacency_matrix<G: AttributedGraph + ?Sized>(
    graph: &G,
    weight_attr: Option<&str>,
) -> Result<Array2<f64>> {
    let n = graph.node_count();
    let weights = match weight_attr {
        Some(name) => Some(graph.require_edge_attribute(name)?),
        None => None,
    };
    let directed = graph.is_directed();

    let mut adj = Array2::<f64>::zeros((n, n));
    for edge in graph.edges() {
        let w = weights.map_or(1.0, |w| w[edge.index]);
        adj[[edge.source, edge.target]] += w;
        if !directed {
            adj[[edge.target, edge.source]] += w;
        }
    }

    log::debug!(
        "Extracted {}x{} adjacency ({}, {})",
        n,
        n,
        if directed { "directed" } else { "undirected" },
        weight_attr.unwrap_or("unweighted")
    );

    Ok(adj)
}

/// 0/1 matrix of vertex pairs joined by at least one edge, self-pairs cleared
pub fn presence_matrix<G: AttributedGraph + ?Sized>(graph: &G) -> Array2<f64> {
    let n = graph.node_count();
    let directed = graph.is_directed();

    let mut adj = Array2::<f64>::zeros((n, n));
    for edge in graph.edges() {
        if edge.source == edge.target {
            continue;
        }
        adj[[edge.source, edge.target]] = 1.0;
        if !directed {
            adj[[edge.target, edge.source]] = 1.0;
        }
    }

    adj
}
