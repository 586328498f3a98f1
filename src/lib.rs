//! Group segregation and intergroup attention statistics for labelled social graphs

pub mod config;
pub mod error;
pub mod graph;
pub mod groups;
pub mod layers;
pub mod indices;
pub mod report;

pub use config::AnalysisConfig;
pub use error::{AttributeKind, Result, SegregationError};
pub use graph::{as_undirected, AttributedGraph, EdgeRef, GraphBuilder, SocialGraph, UndirectedView, VertexAttribute};
pub use graph::adjacency::adjacency_matrix;
pub use groups::GroupPartition;
pub use layers::{contact_layer, me_vs_others, non_contact_layer};
pub use indices::{
    attention_baseline, freeman_global, freeman_one_vs_rest, freeman_two_group, homophily,
    pairwise_homophily, proximity, spectral_segregation, ComponentSegregation, Direction,
    HomophilyResult, PairwiseHomophily, Proximity, Target,
};
pub use report::SegregationReport;
