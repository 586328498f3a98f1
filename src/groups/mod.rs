//! Vertex grouping

pub mod partition;

pub use partition::GroupPartition;
