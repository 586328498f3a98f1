//! Compressed in-memory social graph with typed attribute columns

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::error::{Result, SegregationError};
use crate::graph::{AttributedGraph, EdgeRef, VertexAttribute};

/// Compressed sparse representation of an attributed interaction graph.
///
/// Edges are stored grouped by source; the edges of one source keep the order
/// in which they were supplied. Edge attribute columns follow the stored order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialGraph {
    /// Number of nodes in the graph
    node_count: usize,

    /// Whether edges are ordered pairs
    directed: bool,

    /// offsets[i] to offsets[i+1] defines the edge range for node i
    offsets: Vec<u32>,

    /// Edge array: concatenated lists of target nodes
    targets: Vec<u32>,

    /// Stored edge position -> position in the caller's edge list
    input_positions: Vec<u32>,

    /// Optional mapping from internal node IDs to original string IDs
    node_ids: Option<Vec<String>>,

    /// Named per-vertex columns
    vertex_attributes: HashMap<String, VertexAttribute>,

    /// Named per-edge columns, in stored order
    edge_attributes: HashMap<String, Vec<f64>>,
}

impl SocialGraph {
    /// Build a graph from `(source, target)` pairs
    pub fn from_edges(node_count: usize, directed: bool, edges: &[(u32, u32)]) -> Result<Self> {
        let mut degrees = vec![0u32; node_count];
        for &(src, dst) in edges {
            if src as usize >= node_count || dst as usize >= node_count {
                return Err(SegregationError::InvalidGraph(format!(
                    "edge ({}, {}) references a vertex outside 0..{}",
                    src, dst, node_count
                )));
            }
            degrees[src as usize] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut offset = 0;
        for &degree in &degrees {
            offset += degree;
            offsets.push(offset);
        }

        // Counting sort by source keeps per-source input order
        let mut cursor: Vec<u32> = offsets[..node_count].to_vec();
        let mut targets = vec![0u32; edges.len()];
        let mut input_positions = vec![0u32; edges.len()];
        for (input_idx, &(src, dst)) in edges.iter().enumerate() {
            let pos = cursor[src as usize] as usize;
            targets[pos] = dst;
            input_positions[pos] = input_idx as u32;
            cursor[src as usize] += 1;
        }

        Ok(Self {
            node_count,
            directed,
            offsets,
            targets,
            input_positions,
            node_ids: None,
            vertex_attributes: HashMap::new(),
            edge_attributes: HashMap::new(),
        })
    }

    /// Attach a per-vertex column
    pub fn with_vertex_attribute(mut self, name: &str, values: VertexAttribute) -> Result<Self> {
        if values.len() != self.node_count {
            return Err(SegregationError::InvalidGraph(format!(
                "vertex attribute '{}' has {} values for {} vertices",
                name,
                values.len(),
                self.node_count
            )));
        }
        self.vertex_attributes.insert(name.to_string(), values);
        Ok(self)
    }

    /// Attach a per-edge column given in the same order as the edge list
    pub fn with_edge_attribute(mut self, name: &str, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.targets.len() {
            return Err(SegregationError::InvalidGraph(format!(
                "edge attribute '{}' has {} values for {} edges",
                name,
                values.len(),
                self.targets.len()
            )));
        }
        let stored = self.input_positions.iter()
            .map(|&input_idx| values[input_idx as usize])
            .collect();
        self.edge_attributes.insert(name.to_string(), stored);
        Ok(self)
    }

    /// Attach original string IDs
    pub fn with_node_ids(mut self, node_ids: Vec<String>) -> Result<Self> {
        if node_ids.len() != self.node_count {
            return Err(SegregationError::InvalidGraph(format!(
                "{} node ids for {} vertices",
                node_ids.len(),
                self.node_count
            )));
        }
        self.node_ids = Some(node_ids);
        Ok(self)
    }

    /// Original string ID of a node, if known
    pub fn node_id(&self, node: usize) -> Option<&str> {
        self.node_ids.as_ref().and_then(|ids| ids.get(node)).map(|s| s.as_str())
    }

    /// Stored edge positions of a node's outgoing edges
    pub fn outgoing_positions(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize..self.offsets[node + 1] as usize
    }
}

impl AttributedGraph for SocialGraph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edge_count(&self) -> usize {
        self.targets.len()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef> + '_> {
        Box::new((0..self.node_count).flat_map(move |src| {
            self.outgoing_positions(src).map(move |pos| EdgeRef {
                index: pos,
                source: src,
                target: self.targets[pos] as usize,
            })
        }))
    }

    fn vertex_attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.vertex_attributes.get(name)
    }

    fn edge_attribute(&self, name: &str) -> Option<&[f64]> {
        self.edge_attributes.get(name).map(|v| v.as_slice())
    }

    fn out_degree(&self, vertex: usize) -> usize {
        self.outgoing_positions(vertex).len()
    }
}
