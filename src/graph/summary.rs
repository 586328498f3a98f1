//! Descriptive graph statistics

use petgraph::algo::{connected_components, dijkstra, kosaraju_scc};
use petgraph::graph::{DiGraph, Graph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef as _;
use petgraph::EdgeType;
use serde::{Serialize, Deserialize};
use crate::error::{Result, SegregationError};
use crate::graph::AttributedGraph;

/// Size, density and connectivity of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,

    /// Edges over two: mutual ties count once per pair in a retweet network
    pub dyads: f64,

    /// Edges over possible edges (`N(N−1)` ordered, `N(N−1)/2` unordered)
    pub density: f64,

    /// Weakly connected components (plain components when undirected)
    pub weak_components: usize,

    /// Strongly connected components (equal to weak ones when undirected)
    pub strong_components: usize,

    /// Longest shortest path in hops between mutually reachable vertices
    pub diameter: Option<f64>,

    /// Longest shortest path summing an edge weight, when one was requested
    pub weighted_diameter: Option<f64>,

    pub directed: bool,
}

impl GraphSummary {
    /// Compute the summary of any attributed graph.
    ///
    /// `weighted_diameter` stays unset; fill it from [`weighted_diameter`].
    pub fn compute<G: AttributedGraph + ?Sized>(graph: &G) -> Self {
        let n = graph.node_count();
        let e = graph.edge_count();
        let directed = graph.is_directed();

        let possible = if n < 2 {
            0.0
        } else if directed {
            (n * (n - 1)) as f64
        } else {
            (n * (n - 1)) as f64 / 2.0
        };
        let density = if possible > 0.0 { e as f64 / possible } else { 0.0 };

        let undirected: UnGraph<(), f64> = to_petgraph(graph, None);
        let weak_components = connected_components(&undirected);

        let strong_components = if directed {
            let digraph: DiGraph<(), f64> = to_petgraph(graph, None);
            kosaraju_scc(&digraph).len()
        } else {
            weak_components
        };

        log::debug!(
            "Graph summary: {} nodes, {} edges, {} weak / {} strong components",
            n,
            e,
            weak_components,
            strong_components
        );

        Self {
            node_count: n,
            edge_count: e,
            dyads: e as f64 / 2.0,
            density,
            weak_components,
            strong_components,
            diameter: diameter(graph),
            weighted_diameter: None,
            directed,
        }
    }
}

/// Hop-count diameter, following edge direction on directed graphs.
///
/// Unreachable pairs are skipped; `None` only for a graph without vertices.
pub fn diameter<G: AttributedGraph + ?Sized>(graph: &G) -> Option<f64> {
    if graph.is_directed() {
        longest_shortest_path(&to_petgraph::<G, petgraph::Directed>(graph, None))
    } else {
        longest_shortest_path(&to_petgraph::<G, petgraph::Undirected>(graph, None))
    }
}

/// Diameter with path lengths summed over an edge weight.
///
/// Weights must be finite and non-negative; anything else is `InvalidGraph`.
pub fn weighted_diameter<G: AttributedGraph + ?Sized>(graph: &G, weight_attr: &str) -> Result<Option<f64>> {
    let weights = graph.require_edge_attribute(weight_attr)?;
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(SegregationError::InvalidGraph(format!(
            "edge attribute '{}' holds {} where path lengths need non-negative weights",
            weight_attr, bad
        )));
    }

    let longest = if graph.is_directed() {
        longest_shortest_path(&to_petgraph::<G, petgraph::Directed>(graph, Some(weights)))
    } else {
        longest_shortest_path(&to_petgraph::<G, petgraph::Undirected>(graph, Some(weights)))
    };
    Ok(longest)
}

/// Mirror the graph into petgraph, with unit edge costs unless weights are given
fn to_petgraph<G, Ty>(graph: &G, weights: Option<&[f64]>) -> Graph<(), f64, Ty>
where
    G: AttributedGraph + ?Sized,
    Ty: EdgeType,
{
    let n = graph.node_count();
    let mut mirrored = Graph::<(), f64, Ty>::with_capacity(n, graph.edge_count());
    for _ in 0..n {
        mirrored.add_node(());
    }
    for edge in graph.edges() {
        let cost = weights.map_or(1.0, |w| w[edge.index]);
        mirrored.add_edge(NodeIndex::new(edge.source), NodeIndex::new(edge.target), cost);
    }
    mirrored
}

/// Largest finite shortest-path distance over every source
fn longest_shortest_path<Ty: EdgeType>(graph: &Graph<(), f64, Ty>) -> Option<f64> {
    graph.node_indices()
        .map(|source| {
            dijkstra(graph, source, None, |edge| *edge.weight())
                .into_values()
                .fold(0.0, f64::max)
        })
        .reduce(f64::max)
}
