//! Contact layer: observed tie weight between and within groups

use ndarray::Array2;
use crate::error::Result;
use crate::graph::AttributedGraph;
use crate::graph::adjacency::adjacency_matrix;
use crate::groups::GroupPartition;

/// G×G contact layer of `graph` grouped by `group_attr`.
///
/// Directed graphs give `M[i][j]` = weight of edges from group i to group j.
/// Undirected graphs give the folded upper-triangular layer, whose entries
/// sum to the total edge weight.
pub fn contact_layer<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    weight_attr: Option<&str>,
) -> Result<Array2<f64>> {
    let partition = GroupPartition::new(graph, group_attr)?;
    contact_from_partition(graph, &partition, weight_attr)
}

/// Contact layer for an already resolved partition
pub fn contact_from_partition<G: AttributedGraph + ?Sized>(
    graph: &G,
    partition: &GroupPartition,
    weight_attr: Option<&str>,
) -> Result<Array2<f64>> {
    let adjacency = adjacency_matrix(graph, weight_attr)?;
    Ok(contact_from_parts(&adjacency, partition, graph.is_directed()))
}

/// `Tᵀ·A·T`, folded when the adjacency is undirected
pub fn contact_from_parts(adjacency: &Array2<f64>, partition: &GroupPartition, directed: bool) -> Array2<f64> {
    let indicator = partition.indicator();
    let m = indicator.t().dot(adjacency).dot(&indicator);

    if directed {
        m
    } else {
        fold_undirected(&m)
    }
}

/// Zero the strict lower triangle and halve the diagonal of a symmetric layer
pub fn fold_undirected(m: &Array2<f64>) -> Array2<f64> {
    let mut folded = m.clone();
    for ((i, j), value) in folded.indexed_iter_mut() {
        if i > j {
            *value = 0.0;
        } else if i == j {
            *value /= 2.0;
        }
    }
    folded
}
