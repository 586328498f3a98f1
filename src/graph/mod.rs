//! Graph representation and the attribute contract consumed by the indices

pub mod social;
pub mod builder;
pub mod adjacency;
pub mod preprocessing;
pub mod summary;

pub use social::SocialGraph;
pub use builder::GraphBuilder;

use serde::{Serialize, Deserialize};
use crate::error::{AttributeKind, Result, SegregationError};

/// A single edge as seen through the graph contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    /// Position of the edge; indexes every edge attribute column
    pub index: usize,
    pub source: usize,
    pub target: usize,
}

/// Typed per-vertex attribute column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VertexAttribute {
    Category(Vec<String>),
    Integer(Vec<i64>),
    Numeric(Vec<f64>),
    Flag(Vec<bool>),
}

impl VertexAttribute {
    /// Number of vertices covered by the column
    pub fn len(&self) -> usize {
        match self {
            VertexAttribute::Category(v) => v.len(),
            VertexAttribute::Integer(v) => v.len(),
            VertexAttribute::Numeric(v) => v.len(),
            VertexAttribute::Flag(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric view of the column; categories have none
    pub fn to_numeric(&self) -> Option<Vec<f64>> {
        match self {
            VertexAttribute::Category(_) => None,
            VertexAttribute::Integer(v) => Some(v.iter().map(|&x| x as f64).collect()),
            VertexAttribute::Numeric(v) => Some(v.clone()),
            VertexAttribute::Flag(v) => Some(v.iter().map(|&x| if x { 1.0 } else { 0.0 }).collect()),
        }
    }

    /// Keep only the vertices at the given positions, in that order
    pub fn select(&self, vertices: &[usize]) -> VertexAttribute {
        match self {
            VertexAttribute::Category(v) => {
                VertexAttribute::Category(vertices.iter().map(|&i| v[i].clone()).collect())
            }
            VertexAttribute::Integer(v) => {
                VertexAttribute::Integer(vertices.iter().map(|&i| v[i]).collect())
            }
            VertexAttribute::Numeric(v) => {
                VertexAttribute::Numeric(vertices.iter().map(|&i| v[i]).collect())
            }
            VertexAttribute::Flag(v) => {
                VertexAttribute::Flag(vertices.iter().map(|&i| v[i]).collect())
            }
        }
    }
}

/// What the segregation engine needs from a graph.
///
/// Implementors own the data; every index only reads through this trait, so a
/// loader for any on-disk format can plug in by implementing it.
pub trait AttributedGraph {
    /// Number of vertices
    fn node_count(&self) -> usize;

    /// Whether edges are ordered pairs
    fn is_directed(&self) -> bool;

    /// Number of edges
    fn edge_count(&self) -> usize;

    /// Iterate all edges; `EdgeRef::index` ranges over `0..edge_count()`
    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef> + '_>;

    /// Named per-vertex column
    fn vertex_attribute(&self, name: &str) -> Option<&VertexAttribute>;

    /// Named per-edge numeric column, indexed by `EdgeRef::index`
    fn edge_attribute(&self, name: &str) -> Option<&[f64]>;

    /// Edges stored with `vertex` as source
    fn out_degree(&self, vertex: usize) -> usize {
        self.edges().filter(|edge| edge.source == vertex).count()
    }

    /// Vertex column or `MissingAttribute`
    fn require_vertex_attribute(&self, name: &str) -> Result<&VertexAttribute> {
        let attr = self.vertex_attribute(name).ok_or_else(|| SegregationError::MissingAttribute {
            name: name.to_string(),
            kind: AttributeKind::Vertex,
        })?;
        if attr.len() != self.node_count() {
            return Err(SegregationError::InvalidGraph(format!(
                "vertex attribute '{}' has {} values for {} vertices",
                name,
                attr.len(),
                self.node_count()
            )));
        }
        Ok(attr)
    }

    /// Edge column or `MissingAttribute`
    fn require_edge_attribute(&self, name: &str) -> Result<&[f64]> {
        let attr = self.edge_attribute(name).ok_or_else(|| SegregationError::MissingAttribute {
            name: name.to_string(),
            kind: AttributeKind::Edge,
        })?;
        if attr.len() != self.edge_count() {
            return Err(SegregationError::InvalidGraph(format!(
                "edge attribute '{}' has {} values for {} edges",
                name,
                attr.len(),
                self.edge_count()
            )));
        }
        Ok(attr)
    }

    /// Numeric vertex column (integers and flags are widened)
    fn require_numeric_attribute(&self, name: &str) -> Result<Vec<f64>> {
        self.require_vertex_attribute(name)?
            .to_numeric()
            .ok_or_else(|| SegregationError::AttributeType {
                name: name.to_string(),
                expected: "numeric",
            })
    }

    /// Boolean vertex column
    fn require_flag_attribute(&self, name: &str) -> Result<&[bool]> {
        match self.require_vertex_attribute(name)? {
            VertexAttribute::Flag(v) => Ok(v),
            _ => Err(SegregationError::AttributeType {
                name: name.to_string(),
                expected: "boolean",
            }),
        }
    }
}

/// Read-only view of a graph with directedness dropped.
///
/// The wrapped graph is never modified; edges keep their stored orientation.
#[derive(Debug, Clone, Copy)]
pub struct UndirectedView<'a, G: ?Sized> {
    inner: &'a G,
}

/// Treat `graph` as undirected without copying or mutating it
pub fn as_undirected<G: AttributedGraph + ?Sized>(graph: &G) -> UndirectedView<'_, G> {
    UndirectedView { inner: graph }
}

impl<'a, G: AttributedGraph + ?Sized> AttributedGraph for UndirectedView<'a, G> {
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeRef> + '_> {
        self.inner.edges()
    }

    fn vertex_attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.inner.vertex_attribute(name)
    }

    fn edge_attribute(&self, name: &str) -> Option<&[f64]> {
        self.inner.edge_attribute(name)
    }

    fn out_degree(&self, vertex: usize) -> usize {
        self.inner.out_degree(vertex)
    }
}
