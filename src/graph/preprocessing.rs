//! Subgraph extraction by group membership

use crate::error::Result;
use crate::graph::{AttributedGraph, SocialGraph};
use crate::groups::GroupPartition;

/// Extract the subgraph induced by one group.
///
/// Keeps the vertices labelled `label` under `group_attr` and only the edges
/// with both endpoints among them. Vertex and edge attribute columns named in
/// `vertex_attrs` / `edge_attrs` are carried over; the group column always is.
pub fn induced_subgraph<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    label: &str,
    vertex_attrs: &[&str],
    edge_attrs: &[&str],
) -> Result<SocialGraph> {
    let partition = GroupPartition::new(graph, group_attr)?;
    let group = partition.index_of(label)?;

    // Create mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count()];
    let mut kept = Vec::with_capacity(partition.size_of(group));
    for vertex in 0..graph.node_count() {
        if partition.group_of(vertex) == group {
            orig_to_sub[vertex] = kept.len() as u32;
            kept.push(vertex);
        }
    }

    // Only include edges where both endpoints are in the subgraph
    let mut edges = Vec::new();
    let mut edge_positions = Vec::new();
    for edge in graph.edges() {
        let src = orig_to_sub[edge.source];
        let dst = orig_to_sub[edge.target];
        if src != u32::MAX && dst != u32::MAX {
            edges.push((src, dst));
            edge_positions.push(edge.index);
        }
    }

    log::debug!(
        "Induced subgraph for '{}': {} of {} vertices, {} of {} edges",
        label,
        kept.len(),
        graph.node_count(),
        edges.len(),
        graph.edge_count()
    );

    let mut subgraph = SocialGraph::from_edges(kept.len(), graph.is_directed(), &edges)?;

    let mut carried: Vec<&str> = vec![group_attr];
    carried.extend(vertex_attrs.iter().filter(|&&name| name != group_attr));
    for name in carried {
        let column = graph.require_vertex_attribute(name)?.select(&kept);
        subgraph = subgraph.with_vertex_attribute(name, column)?;
    }
    for &name in edge_attrs {
        let column = graph.require_edge_attribute(name)?;
        let values = edge_positions.iter().map(|&pos| column[pos]).collect();
        subgraph = subgraph.with_edge_attribute(name, values)?;
    }

    Ok(subgraph)
}
