//! Error types for segregation analysis

use std::fmt;
use thiserror::Error;

/// Where a named attribute was looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Vertex,
    Edge,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Vertex => write!(f, "vertex"),
            AttributeKind::Edge => write!(f, "edge"),
        }
    }
}

/// Top-level error type for segregation and attention indices.
#[derive(Debug, Error)]
pub enum SegregationError {
    /// The requested vertex or edge attribute does not exist on the graph.
    #[error("missing {kind} attribute '{name}'")]
    MissingAttribute { name: String, kind: AttributeKind },

    /// The attribute exists but holds the wrong kind of values.
    #[error("attribute '{name}' must be {expected}")]
    AttributeType { name: String, expected: &'static str },

    /// A formula needs a specific number of groups.
    #[error("expected {expected} groups, found {found}")]
    ShapeError { expected: usize, found: usize },

    /// A denominator of the requested index is zero.
    #[error("degenerate groups: {0}")]
    DegenerateGroups(String),

    /// The index is not defined for this input (e.g. an isolate vertex).
    #[error("no value: {0}")]
    NoValue(String),

    /// The requested group label is not present in the partition.
    #[error("unknown group '{0}'")]
    UnknownGroup(String),

    /// Graph data is inconsistent (attribute column length, dangling edge...).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Report serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SegregationError {
    /// True for the "not applicable" outcome rather than a misconfiguration
    pub fn is_no_value(&self) -> bool {
        matches!(self, SegregationError::NoValue(_))
    }
}

/// Result type for segregation analysis.
pub type Result<T> = std::result::Result<T, SegregationError>;
