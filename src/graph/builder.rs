//! Graph construction module

use std::collections::{BTreeMap, HashMap};
use crate::error::{Result, SegregationError};
use crate::graph::{SocialGraph, VertexAttribute};

/// Values collected for one vertex attribute before the graph is built
#[derive(Debug, Clone)]
enum PendingColumn {
    Category(Vec<Option<String>>),
    Numeric(Vec<Option<f64>>),
    Flag(Vec<Option<bool>>),
}

impl PendingColumn {
    fn grow(&mut self, len: usize) {
        match self {
            PendingColumn::Category(v) => v.resize(len, None),
            PendingColumn::Numeric(v) => v.resize(len, None),
            PendingColumn::Flag(v) => v.resize(len, None),
        }
    }

    fn finish(self, name: &str) -> Result<VertexAttribute> {
        let missing = || SegregationError::InvalidGraph(format!(
            "vertex attribute '{}' is not set on every vertex",
            name
        ));
        Ok(match self {
            PendingColumn::Category(v) => VertexAttribute::Category(
                v.into_iter().collect::<Option<Vec<_>>>().ok_or_else(missing)?,
            ),
            PendingColumn::Numeric(v) => VertexAttribute::Numeric(
                v.into_iter().collect::<Option<Vec<_>>>().ok_or_else(missing)?,
            ),
            PendingColumn::Flag(v) => VertexAttribute::Flag(
                v.into_iter().collect::<Option<Vec<_>>>().ok_or_else(missing)?,
            ),
        })
    }
}

/// Builder for incrementally constructing a SocialGraph from string IDs
pub struct GraphBuilder {
    /// Whether the resulting graph is directed
    directed: bool,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Edges in insertion order
    edges: Vec<(u32, u32)>,

    /// Edge columns, each padded to `edges.len()` with 0.0
    edge_columns: BTreeMap<String, Vec<f64>>,

    /// Vertex columns, each padded to `node_ids.len()`
    vertex_columns: BTreeMap<String, PendingColumn>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(directed: bool, capacity: usize) -> Self {
        Self {
            directed,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            edges: Vec::new(),
            edge_columns: BTreeMap::new(),
            vertex_columns: BTreeMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::with_capacity(true, 0)
    }

    pub fn undirected() -> Self {
        Self::with_capacity(false, 0)
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        let len = self.node_ids.len();
        for column in self.vertex_columns.values_mut() {
            column.grow(len);
        }

        idx
    }

    /// Add an unweighted edge from one node to another
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) -> &mut Self {
        self.add_edge_with(src_id, dst_id, &[])
    }

    /// Add an edge carrying named numeric attributes; unnamed columns get 0.0
    pub fn add_edge_with(&mut self, src_id: &str, dst_id: &str, values: &[(&str, f64)]) -> &mut Self {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.edges.push((src_idx, dst_idx));

        let len = self.edges.len();
        for &(name, _) in values {
            self.edge_columns
                .entry(name.to_string())
                .or_insert_with(|| vec![0.0; len - 1]);
        }
        for (name, column) in self.edge_columns.iter_mut() {
            let value = values.iter()
                .find(|(n, _)| *n == name.as_str())
                .map(|&(_, v)| v)
                .unwrap_or(0.0);
            column.push(value);
        }

        self
    }

    /// Set a categorical attribute on a node (created if new)
    pub fn set_category(&mut self, id: &str, name: &str, label: &str) -> Result<&mut Self> {
        let idx = self.get_or_create_node(id) as usize;
        let len = self.node_ids.len();
        match self.vertex_columns
            .entry(name.to_string())
            .or_insert_with(|| PendingColumn::Category(vec![None; len]))
        {
            PendingColumn::Category(v) => v[idx] = Some(label.to_string()),
            _ => return Err(type_clash(name, "categorical")),
        }
        Ok(self)
    }

    /// Set a numeric attribute on a node (created if new)
    pub fn set_numeric(&mut self, id: &str, name: &str, value: f64) -> Result<&mut Self> {
        let idx = self.get_or_create_node(id) as usize;
        let len = self.node_ids.len();
        match self.vertex_columns
            .entry(name.to_string())
            .or_insert_with(|| PendingColumn::Numeric(vec![None; len]))
        {
            PendingColumn::Numeric(v) => v[idx] = Some(value),
            _ => return Err(type_clash(name, "numeric")),
        }
        Ok(self)
    }

    /// Set a boolean attribute on a node (created if new)
    pub fn set_flag(&mut self, id: &str, name: &str, value: bool) -> Result<&mut Self> {
        let idx = self.get_or_create_node(id) as usize;
        let len = self.node_ids.len();
        match self.vertex_columns
            .entry(name.to_string())
            .or_insert_with(|| PendingColumn::Flag(vec![None; len]))
        {
            PendingColumn::Flag(v) => v[idx] = Some(value),
            _ => return Err(type_clash(name, "boolean")),
        }
        Ok(self)
    }

    /// Build the graph; every vertex column must be set on every vertex
    pub fn build(self) -> Result<SocialGraph> {
        log::debug!(
            "Building graph with {} nodes and {} edges",
            self.node_ids.len(),
            self.edges.len()
        );

        let mut graph = SocialGraph::from_edges(self.node_ids.len(), self.directed, &self.edges)?
            .with_node_ids(self.node_ids)?;

        for (name, column) in self.edge_columns {
            graph = graph.with_edge_attribute(&name, column)?;
        }
        for (name, column) in self.vertex_columns {
            let values = column.finish(&name)?;
            graph = graph.with_vertex_attribute(&name, values)?;
        }

        Ok(graph)
    }
}

fn type_clash(name: &str, expected: &'static str) -> SegregationError {
    SegregationError::AttributeType {
        name: name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AttributedGraph;

    #[test]
    fn builds_columns_in_node_order() {
        let mut builder = GraphBuilder::directed();
        builder.add_edge_with("alice", "bob", &[("weight", 3.0)]);
        builder.add_edge("bob", "carol");
        for (id, party) in [("alice", "left"), ("bob", "right"), ("carol", "left")] {
            builder.set_category(id, "party", party).unwrap();
        }
        let graph = builder.build().unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node_id(2), Some("carol"));
        assert_eq!(graph.edge_attribute("weight").unwrap(), &[3.0, 0.0]);
        assert_eq!(
            graph.vertex_attribute("party"),
            Some(&VertexAttribute::Category(vec!["left".into(), "right".into(), "left".into()]))
        );
    }

    #[test]
    fn late_edge_columns_are_backfilled() {
        let mut builder = GraphBuilder::undirected();
        builder.add_edge("a", "b");
        builder.add_edge_with("b", "c", &[("weight", 2.5)]);
        let graph = builder.build().unwrap();

        assert_eq!(graph.edge_attribute("weight").unwrap(), &[0.0, 2.5]);
    }

    #[test]
    fn unset_vertex_values_fail_the_build() {
        let mut builder = GraphBuilder::directed();
        builder.add_edge("a", "b");
        builder.set_numeric("a", "tweets", 4.0).unwrap();

        assert!(matches!(builder.build(), Err(SegregationError::InvalidGraph(_))));
    }

    #[test]
    fn column_type_is_fixed_by_first_use() {
        let mut builder = GraphBuilder::directed();
        builder.set_flag("a", "isolate", true).unwrap();

        assert!(builder.set_numeric("a", "isolate", 1.0).is_err());
    }
}
