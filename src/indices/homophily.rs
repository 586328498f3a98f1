//! Homophily indices computed from edge-level group membership

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::error::{Result, SegregationError};
use crate::graph::AttributedGraph;
use crate::groups::GroupPartition;

/// Per-category homophily summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomophilyResult {
    /// Population share of the category
    pub w: f64,

    /// Share of all edges that stay within the category
    pub s: f64,

    /// Share of all edges leaving the category for another one (both
    /// endpoint categories when undirected)
    pub d: f64,

    /// Share of the category's outgoing ties that stay in-group
    pub h: f64,

    /// Coleman's inbreeding homophily: 0 under random mixing
    pub ih: f64,
}

/// Homophily of every category, keyed by label.
///
/// On directed graphs ties are anchored at their source. On undirected graphs
/// a cross-group tie counts as leaving both endpoint groups, so the stored
/// orientation of an edge never matters.
///
/// Fails with `DegenerateGroups` for an edgeless graph, a category holding
/// every vertex, or a category without ties of its own.
pub fn homophily<G: AttributedGraph + ?Sized>(graph: &G, group_attr: &str) -> Result<BTreeMap<String, HomophilyResult>> {
    let partition = GroupPartition::new(graph, group_attr)?;
    let groups = partition.group_count();

    let mut within = vec![0usize; groups];
    let mut leaving = vec![0usize; groups];
    let mut edges = 0usize;
    let directed = graph.is_directed();
    for edge in graph.edges() {
        let source = partition.group_of(edge.source);
        let target = partition.group_of(edge.target);
        if source == target {
            within[source] += 1;
        } else {
            leaving[source] += 1;
            // an undirected cross tie leaves both endpoint groups
            if !directed {
                leaving[target] += 1;
            }
        }
        edges += 1;
    }
    if edges == 0 {
        return Err(SegregationError::DegenerateGroups("graph has no edges".to_string()));
    }

    let n = partition.vertex_count() as f64;
    let total = edges as f64;
    let mut results = BTreeMap::new();
    for group in 0..groups {
        let label = partition.label(group);
        let w = partition.size_of(group) as f64 / n;
        let s = within[group] as f64 / total;
        let d = leaving[group] as f64 / total;

        if within[group] + leaving[group] == 0 {
            return Err(SegregationError::DegenerateGroups(format!(
                "category '{}' has no outgoing ties",
                label
            )));
        }
        if w >= 1.0 {
            return Err(SegregationError::DegenerateGroups(format!(
                "category '{}' holds every vertex",
                label
            )));
        }

        let h = s / (s + d);
        let ih = (h - w) / (1.0 - w);
        results.insert(label.to_string(), HomophilyResult { w, s, d, h, ih });
    }

    Ok(results)
}

/// Cross-tie propensity between two groups, relative to random mixing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseHomophily {
    /// Share of ties from the second group into the first, over `Pi`
    pub inward: f64,

    /// Share of ties from the first group into the second, over `Pi`
    pub outward: f64,
}

/// Freeman-style in/out homophily between `first` and `second`.
///
/// Only vertices of the two groups and the edges among them are considered.
/// `Pi = 2·n1·n2 / (n(n−1))` with `n = n1 + n2`.
pub fn pairwise_homophily<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    first: &str,
    second: &str,
) -> Result<PairwiseHomophily> {
    let partition = GroupPartition::new(graph, group_attr)?;
    let g1 = partition.index_of(first)?;
    let g2 = partition.index_of(second)?;

    let mut inward = 0usize;
    let mut outward = 0usize;
    let mut edges = 0usize;
    for edge in graph.edges() {
        let source = partition.group_of(edge.source);
        let target = partition.group_of(edge.target);
        let kept = |g: usize| g == g1 || g == g2;
        if !kept(source) || !kept(target) {
            continue;
        }
        if source == g1 && target == g2 {
            outward += 1;
        } else if source == g2 && target == g1 {
            inward += 1;
        }
        edges += 1;
    }
    if edges == 0 {
        return Err(SegregationError::DegenerateGroups(format!(
            "no ties among groups '{}' and '{}'",
            first, second
        )));
    }

    let n1 = partition.size_of(g1) as f64;
    let n2 = partition.size_of(g2) as f64;
    let n = n1 + n2;
    let pi = 2.0 * n1 * n2 / (n * (n - 1.0));
    if g1 == g2 || pi == 0.0 || !pi.is_finite() {
        return Err(SegregationError::DegenerateGroups(format!(
            "groups '{}' and '{}' have no cross pairs",
            first, second
        )));
    }

    Ok(PairwiseHomophily {
        inward: inward as f64 / edges as f64 / pi,
        outward: outward as f64 / edges as f64 / pi,
    })
}
