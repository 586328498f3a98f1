//! Partition of vertices into groups by a vertex attribute

use std::cmp::Ordering;
use std::collections::HashMap;
use itertools::Itertools;
use ndarray::Array2;
use serde::{Serialize, Deserialize};
use crate::error::{Result, SegregationError};
use crate::graph::{AttributedGraph, VertexAttribute};

/// Groups derived from the observed values of one vertex attribute.
///
/// Categories are sorted ascending by the attribute's natural order
/// (lexicographic strings, numeric values by total order, `false < true`),
/// and that order fixes every group index used by the contact layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPartition {
    /// Category labels in index order
    categories: Vec<String>,

    /// Label -> group index
    index: HashMap<String, usize>,

    /// Group index of every vertex
    membership: Vec<usize>,

    /// Number of vertices per group
    sizes: Vec<usize>,
}

impl GroupPartition {
    /// Resolve `attr` on `graph` into a partition
    pub fn new<G: AttributedGraph + ?Sized>(graph: &G, attr: &str) -> Result<Self> {
        let partition = Self::from_attribute(graph.require_vertex_attribute(attr)?);
        log::debug!(
            "Partitioned {} vertices by '{}' into {} groups",
            partition.membership.len(),
            attr,
            partition.categories.len()
        );
        Ok(partition)
    }

    /// Partition a resolved attribute column
    pub fn from_attribute(values: &VertexAttribute) -> Self {
        match values {
            VertexAttribute::Category(v) => Self::from_values(v, |a, b| a.cmp(b)),
            VertexAttribute::Integer(v) => Self::from_values(v, |a, b| a.cmp(b)),
            VertexAttribute::Numeric(v) => Self::from_values(v, |a, b| a.total_cmp(b)),
            VertexAttribute::Flag(v) => Self::from_values(v, |a, b| a.cmp(b)),
        }
    }

    fn from_values<T, F>(values: &[T], cmp: F) -> Self
    where
        T: Clone + ToString,
        F: Fn(&T, &T) -> Ordering,
    {
        let distinct: Vec<T> = values.iter()
            .cloned()
            .sorted_by(|a, b| cmp(a, b))
            .dedup_by(|a, b| cmp(a, b) == Ordering::Equal)
            .collect();

        let mut sizes = vec![0usize; distinct.len()];
        let membership: Vec<usize> = values.iter()
            .map(|value| {
                // Every value is in `distinct`, so the search always hits
                let idx = distinct.binary_search_by(|candidate| cmp(candidate, value)).unwrap_or_else(|i| i);
                sizes[idx] += 1;
                idx
            })
            .collect();

        let categories: Vec<String> = distinct.iter().map(|v| v.to_string()).collect();
        let index = categories.iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        Self {
            categories,
            index,
            membership,
            sizes,
        }
    }

    /// Category labels in index order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.membership.len()
    }

    /// Index of a category label
    pub fn index_of(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| SegregationError::UnknownGroup(label.to_string()))
    }

    /// Label of a group index
    pub fn label(&self, group: usize) -> &str {
        &self.categories[group]
    }

    /// Group index of every vertex
    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    /// Group index of one vertex
    pub fn group_of(&self, vertex: usize) -> usize {
        self.membership[vertex]
    }

    /// Vertices per group, in index order
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn size_of(&self, group: usize) -> usize {
        self.sizes[group]
    }

    /// N×G matrix with a 1 where a vertex belongs to a group
    pub fn indicator(&self) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((self.membership.len(), self.categories.len()));
        for (vertex, &group) in self.membership.iter().enumerate() {
            matrix[[vertex, group]] = 1.0;
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SocialGraph;

    #[test]
    fn categories_are_sorted_not_first_seen() {
        let attr = VertexAttribute::Category(vec!["right".into(), "left".into(), "center".into(), "left".into()]);
        let partition = GroupPartition::from_attribute(&attr);

        assert_eq!(partition.categories(), &["center", "left", "right"]);
        assert_eq!(partition.membership(), &[2, 1, 0, 1]);
        assert_eq!(partition.sizes(), &[1, 2, 1]);
        assert_eq!(partition.index_of("left").unwrap(), 1);
    }

    #[test]
    fn numeric_labels_sort_by_value() {
        let partition = GroupPartition::from_attribute(&VertexAttribute::Integer(vec![10, 2, 2, -1]));
        assert_eq!(partition.categories(), &["-1", "2", "10"]);

        let flags = GroupPartition::from_attribute(&VertexAttribute::Flag(vec![true, false, true]));
        assert_eq!(flags.categories(), &["false", "true"]);
        assert_eq!(flags.sizes(), &[1, 2]);
    }

    #[test]
    fn indicator_columns_sum_to_sizes() {
        let attr = VertexAttribute::Numeric(vec![0.5, 1.5, 0.5, 0.5, 2.0]);
        let partition = GroupPartition::from_attribute(&attr);
        let indicator = partition.indicator();

        assert_eq!(indicator.dim(), (5, 3));
        for (group, column) in indicator.columns().into_iter().enumerate() {
            assert_eq!(column.sum() as usize, partition.size_of(group));
        }
        for row in indicator.rows() {
            assert_eq!(row.sum(), 1.0);
        }
    }

    #[test]
    fn missing_attribute_and_unknown_label() {
        let graph = SocialGraph::from_edges(1, true, &[]).unwrap();
        assert!(matches!(
            GroupPartition::new(&graph, "party"),
            Err(SegregationError::MissingAttribute { .. })
        ));

        let partition = GroupPartition::from_attribute(&VertexAttribute::Flag(vec![true]));
        assert!(matches!(partition.index_of("false"), Err(SegregationError::UnknownGroup(_))));
    }
}
