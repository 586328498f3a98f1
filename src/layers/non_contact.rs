//! Non-contact layer: possible dyads between and within groups with no tie

use ndarray::Array2;
use crate::error::Result;
use crate::graph::AttributedGraph;
use crate::graph::adjacency::presence_matrix;
use crate::groups::GroupPartition;

/// G×G count of absent ordered dyads.
///
/// Off the diagonal: `n_i·n_j` minus the dyads from group i to group j joined
/// by an edge. On the diagonal: `k(k−1)` ordered pairs minus observed
/// within-group dyads, or 0 for groups with fewer than two members.
/// Multi-edges count as one dyad and self-loops are not dyads. On undirected
/// graphs a within-group tie is observed once, as in the folded contact layer,
/// so contact and non-contact diagonals still add up to `k(k−1)`.
pub fn non_contact_layer<G: AttributedGraph + ?Sized>(graph: &G, group_attr: &str) -> Result<Array2<f64>> {
    let partition = GroupPartition::new(graph, group_attr)?;
    Ok(non_contact_from_partition(graph, &partition))
}

/// Non-contact layer for an already resolved partition
pub fn non_contact_from_partition<G: AttributedGraph + ?Sized>(graph: &G, partition: &GroupPartition) -> Array2<f64> {
    let presence = presence_matrix(graph);
    let indicator = partition.indicator();
    let mut observed = indicator.t().dot(&presence).dot(&indicator);
    if !graph.is_directed() {
        observed.diag_mut().mapv_inplace(|within| within / 2.0);
    }

    let sizes = partition.sizes();
    Array2::from_shape_fn(observed.dim(), |(i, j)| {
        let possible = if i == j {
            ordered_pairs(sizes[i])
        } else {
            (sizes[i] * sizes[j]) as f64
        };
        if i == j && sizes[i] < 2 {
            0.0
        } else {
            possible - observed[[i, j]]
        }
    })
}

/// Number of ordered pairs of distinct members in a group of size k
pub fn ordered_pairs(k: usize) -> f64 {
    if k < 2 {
        0.0
    } else {
        (k * (k - 1)) as f64
    }
}
