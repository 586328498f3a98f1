//! Freeman segregation indices
//!
//! Every index has the form `1 − P/Pi`, with `P` the observed share of
//! between-group ties and `Pi` the share expected when ties join distinct
//! vertices uniformly at random given the group sizes. 1 means complete
//! segregation, 0 random mixing, negative values more mixing than random.

use ndarray::Array2;
use crate::error::{Result, SegregationError};
use crate::graph::{as_undirected, AttributedGraph};
use crate::groups::GroupPartition;
use crate::layers::contact::contact_from_partition;
use crate::layers::reduce::me_vs_others;

/// Classic two-group index on the undirected version of the graph.
///
/// Fails with `ShapeError` unless the attribute has exactly two groups.
pub fn freeman_two_group<G: AttributedGraph + ?Sized>(graph: &G, group_attr: &str) -> Result<f64> {
    let undirected = as_undirected(graph);
    let partition = GroupPartition::new(&undirected, group_attr)?;
    if partition.group_count() != 2 {
        return Err(SegregationError::ShapeError {
            expected: 2,
            found: partition.group_count(),
        });
    }

    let m = contact_from_partition(&undirected, &partition, None)?;
    let observed = share(m[[0, 1]], m.sum())?;
    let expected = random_cross_share(partition.size_of(0), partition.size_of(1), partition.vertex_count())?;

    let index = 1.0 - observed / expected;
    log::debug!("Two-group Freeman index for '{}': P={} Pi={} S={}", group_attr, observed, expected, index);
    Ok(index)
}

/// Global index for any number of groups.
///
/// Directed graphs count ties in both directions between distinct groups.
pub fn freeman_global<G: AttributedGraph + ?Sized>(graph: &G, group_attr: &str) -> Result<f64> {
    let partition = GroupPartition::new(graph, group_attr)?;
    let m = contact_from_partition(graph, &partition, None)?;
    global_from_layer(&m, &partition, graph.is_directed())
}

/// Global index from a resolved contact layer
pub fn global_from_layer(m: &Array2<f64>, partition: &GroupPartition, directed: bool) -> Result<f64> {
    let between: f64 = m.indexed_iter()
        .filter(|((i, j), _)| i < j || (directed && i > j))
        .map(|(_, &value)| value)
        .sum();
    let observed = share(between, m.sum())?;

    let n = partition.vertex_count() as f64;
    let total: f64 = partition.sizes().iter().map(|&k| k as f64).sum();
    let squares: f64 = partition.sizes().iter().map(|&k| (k * k) as f64).sum();
    let denominator = total * total - squares;
    if denominator == 0.0 {
        return Err(SegregationError::DegenerateGroups(format!(
            "{} group(s) over {} vertices leave no between-group pairs",
            partition.group_count(),
            partition.vertex_count()
        )));
    }

    Ok(1.0 - observed * n * (n - 1.0) / denominator)
}

/// One group against the union of all other groups.
///
/// Unweighted, `Pi` is the share of vertex pairs straddling the group boundary.
/// With `weight_attr`, the contact layer is weighted and `Pi` becomes the
/// share of vertices outside the group.
pub fn freeman_one_vs_rest<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    group: &str,
    weight_attr: Option<&str>,
) -> Result<f64> {
    let undirected = as_undirected(graph);
    let partition = GroupPartition::new(&undirected, group_attr)?;
    let group_index = partition.index_of(group)?;
    let m = contact_from_partition(&undirected, &partition, weight_attr)?;
    one_vs_rest_from_layer(&m, &partition, group_index, weight_attr.is_some())
}

/// One-vs-rest index from a folded (undirected) contact layer
pub fn one_vs_rest_from_layer(
    m: &Array2<f64>,
    partition: &GroupPartition,
    group_index: usize,
    weighted: bool,
) -> Result<f64> {
    let reduced = me_vs_others(m, group_index, false)?;
    let observed = share(reduced[[0, 1]], reduced.sum())?;

    let n = partition.vertex_count();
    let inside = partition.size_of(group_index);
    let outside = n - inside;
    let expected = if weighted {
        share(outside as f64, n as f64)?
    } else {
        random_cross_share(inside, outside, n)?
    };
    if expected == 0.0 {
        return Err(SegregationError::DegenerateGroups(format!(
            "group '{}' holds every vertex",
            partition.label(group_index)
        )));
    }

    Ok((expected - observed) / expected)
}

/// `2·n1·n2 / (N(N−1))`: chance that a random pair of distinct vertices straddles groups
pub fn random_cross_share(n1: usize, n2: usize, n: usize) -> Result<f64> {
    let pairs = (n as f64) * (n as f64 - 1.0);
    let expected = share(2.0 * (n1 * n2) as f64, pairs)?;
    if expected == 0.0 {
        return Err(SegregationError::DegenerateGroups(format!(
            "groups of size {} and {} have no cross pairs",
            n1, n2
        )));
    }
    Ok(expected)
}

fn share(part: f64, whole: f64) -> Result<f64> {
    if whole <= 0.0 {
        return Err(SegregationError::DegenerateGroups(
            "nothing to normalize by (no edges or no vertex pairs)".to_string(),
        ));
    }
    Ok(part / whole)
}
