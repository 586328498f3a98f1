//! Spectral segregation index (SSI)
//!
//! The undirected adjacency is row-normalized into a random-walk matrix
//! `B = D⁻¹A` and restricted to the members of one group. Within each
//! connected component of that restriction, the dominant eigenvalue measures
//! how strongly a walk starting in the group stays there, and its eigenvector
//! gives node-level loadings.
//!
//! A component block `B_c = D_c⁻¹ A_c` is similar to the symmetric
//! `D_c^{-1/2} A_c D_c^{-1/2}`, so the decomposition is done on the symmetric
//! form and the eigenvectors are mapped back by `D_c^{-1/2}`.

use std::collections::BTreeMap;
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array2, Axis};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::graph::{as_undirected, AttributedGraph};
use crate::graph::adjacency::adjacency_matrix;
use crate::groups::GroupPartition;

/// SSI of one connected component of the restricted graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSegregation {
    /// Eigenvalue of largest magnitude of the component block
    pub eigenvalue: f64,

    /// Original vertex indices, ascending
    pub vertices: Vec<usize>,

    /// Right eigenvector entries aligned with `vertices` (unit norm, non-negative sum)
    pub loadings: Vec<f64>,
}

/// SSI per connected component of `target_group`'s restricted random-walk matrix.
///
/// Component ids follow the order of each component's smallest vertex.
/// Members left without ties inside the group form 1×1 components.
pub fn spectral_segregation<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    target_group: &str,
) -> Result<BTreeMap<usize, ComponentSegregation>> {
    let undirected = as_undirected(graph);
    let partition = GroupPartition::new(&undirected, group_attr)?;
    let target = partition.index_of(target_group)?;

    let adjacency = adjacency_matrix(&undirected, None)?;
    let degrees: Vec<f64> = adjacency.sum_axis(Axis(1)).to_vec();
    let normalized = row_normalize(&adjacency, &degrees);

    let members: Vec<usize> = (0..partition.vertex_count())
        .filter(|&v| partition.group_of(v) == target)
        .collect();
    let restricted = normalized.select(Axis(0), &members).select(Axis(1), &members);

    let restricted_graph = weighted_graph(&restricted, &members);
    let mut components: Vec<Vec<usize>> = tarjan_scc(&restricted_graph)
        .into_iter()
        .map(|component| {
            let mut local: Vec<usize> = component.iter().map(|node| node.index()).collect();
            local.sort_unstable();
            local
        })
        .collect();
    components.sort_by_key(|local| local[0]);

    log::debug!(
        "SSI for '{}': {} members in {} components",
        target_group,
        members.len(),
        components.len()
    );

    let mut scores = BTreeMap::new();
    for (id, local) in components.into_iter().enumerate() {
        let local_degrees: Vec<f64> = local.iter().map(|&i| degrees[members[i]]).collect();
        let (eigenvalue, loadings) = dominant_eigenpair(&restricted, &local, &local_degrees);
        scores.insert(id, ComponentSegregation {
            eigenvalue,
            vertices: local.iter().map(|&i| members[i]).collect(),
            loadings,
        });
    }

    Ok(scores)
}

/// Divide each row by its degree; rows with zero degree stay zero
pub fn row_normalize(adjacency: &Array2<f64>, degrees: &[f64]) -> Array2<f64> {
    let mut normalized = adjacency.clone();
    for (mut row, &degree) in normalized.rows_mut().into_iter().zip(degrees) {
        if degree > 0.0 {
            row /= degree;
        }
    }
    normalized
}

/// Undirected weighted graph whose node weights are the original vertex ids
fn weighted_graph(restricted: &Array2<f64>, members: &[usize]) -> UnGraph<usize, f64> {
    let k = members.len();
    let mut graph = UnGraph::<usize, f64>::with_capacity(k, 0);
    let nodes: Vec<NodeIndex> = members.iter().map(|&v| graph.add_node(v)).collect();

    for i in 0..k {
        for j in i..k {
            let weight = if i == j {
                restricted[[i, i]]
            } else {
                restricted[[i, j]] + restricted[[j, i]]
            };
            if weight > 0.0 {
                graph.add_edge(nodes[i], nodes[j], weight);
            }
        }
    }

    graph
}

/// Largest-magnitude eigenvalue of the block `restricted[local, local]` and its right eigenvector
fn dominant_eigenpair(restricted: &Array2<f64>, local: &[usize], degrees: &[f64]) -> (f64, Vec<f64>) {
    let k = local.len();
    if k == 1 {
        return (restricted[[local[0], local[0]]], vec![1.0]);
    }

    // Every vertex of a multi-vertex component has a tie, so degrees are positive
    let scale: Vec<f64> = degrees.iter().map(|d| d.sqrt()).collect();
    let block = |a: usize, b: usize| restricted[[local[a], local[b]]] * scale[a] / scale[b];
    let symmetric = DMatrix::from_fn(k, k, |a, b| 0.5 * (block(a, b) + block(b, a)));
    let eigen = SymmetricEigen::new(symmetric);

    let mut best = 0;
    for (idx, &value) in eigen.eigenvalues.iter().enumerate() {
        let current = eigen.eigenvalues[best];
        let tie = (value.abs() - current.abs()).abs() <= 1e-9;
        if (!tie && value.abs() > current.abs()) || (tie && value > current) {
            best = idx;
        }
    }

    let mut loadings: Vec<f64> = eigen.eigenvectors
        .column(best)
        .iter()
        .zip(&scale)
        .map(|(v, s)| v / s)
        .collect();
    let norm = loadings.iter().map(|x| x * x).sum::<f64>().sqrt();
    let sign = if loadings.iter().sum::<f64>() < 0.0 { -1.0 } else { 1.0 };
    for x in loadings.iter_mut() {
        *x *= sign / norm;
    }

    (eigen.eigenvalues[best], loadings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SocialGraph, VertexAttribute};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // a = {0, 1, 2, 3, 5}, b = {4}; a-ties 0-1 and 2-3, 5 only tied to b
    fn two_islands() -> SocialGraph {
        SocialGraph::from_edges(6, true, &[(0, 1), (2, 3), (1, 4), (5, 4)])
            .unwrap()
            .with_vertex_attribute(
                "group",
                VertexAttribute::Category(
                    ["a", "a", "a", "a", "b", "a"].iter().map(|s| s.to_string()).collect(),
                ),
            )
            .unwrap()
    }

    #[test]
    fn components_are_scored_separately() {
        let scores = spectral_segregation(&two_islands(), "group", "a").unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[&0].vertices, vec![0, 1]);
        assert_eq!(scores[&1].vertices, vec![2, 3]);
        assert_eq!(scores[&2].vertices, vec![5]);

        // block [[0, 1], [1/2, 0]] has eigenvalues ±sqrt(1/2)
        assert_abs_diff_eq!(scores[&0].eigenvalue, 0.5f64.sqrt(), epsilon = 1e-9);
        // block [[0, 1], [1, 0]]: ±1, the positive root wins the tie
        assert_abs_diff_eq!(scores[&1].eigenvalue, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scores[&2].eigenvalue, 0.0);
    }

    #[test]
    fn loadings_are_right_eigenvectors() {
        let scores = spectral_segregation(&two_islands(), "group", "a").unwrap();
        let first = &scores[&0];

        // B u = λ u with u = (1, λ) up to scale
        let lambda = first.eigenvalue;
        let norm = (1.0 + lambda * lambda).sqrt();
        assert_abs_diff_eq!(first.loadings[0], 1.0 / norm, epsilon = 1e-9);
        assert_abs_diff_eq!(first.loadings[1], lambda / norm, epsilon = 1e-9);

        for x in &scores[&1].loadings {
            assert_abs_diff_eq!(*x, 0.5f64.sqrt(), epsilon = 1e-9);
        }
    }

    #[test]
    fn closed_group_reaches_one() {
        // triangle with no ties out of the group: every walk stays inside
        let g = SocialGraph::from_edges(4, false, &[(0, 1), (1, 2), (2, 0)])
            .unwrap()
            .with_vertex_attribute("member", VertexAttribute::Flag(vec![true, true, true, false]))
            .unwrap();
        let scores = spectral_segregation(&g, "member", "true").unwrap();

        assert_eq!(scores.len(), 1);
        assert_abs_diff_eq!(scores[&0].eigenvalue, 1.0, epsilon = 1e-9);
        assert_eq!(scores[&0].vertices, vec![0, 1, 2]);
    }

    #[test]
    fn zero_rows_stay_zero() {
        let adjacency = array![[0.0, 2.0], [0.0, 0.0]];
        let normalized = row_normalize(&adjacency, &[2.0, 0.0]);
        assert_eq!(normalized, array![[0.0, 1.0], [0.0, 0.0]]);
    }
}
