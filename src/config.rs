//! Configuration management for segregation reports

use serde::{Serialize, Deserialize};

/// Attribute names and tuning knobs used when building a full report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Vertex attribute holding the group label
    pub group_attr: String,

    /// Edge attribute holding tie weights (weighted indices are skipped if unset)
    pub weight_attr: Option<String>,

    /// Vertex attribute holding activity volume (e.g. tweet count)
    pub activity_attr: Option<String>,

    /// Boolean vertex attribute marking isolates for node-level proximity
    pub isolate_attr: Option<String>,

    /// Minimum number of groups before per-group indices run on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            group_attr: "group".to_string(),
            weight_attr: None,
            activity_attr: None,
            isolate_attr: None,
            parallel_threshold: 8,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration for the given group attribute
    pub fn new(group_attr: &str) -> Self {
        Self {
            group_attr: group_attr.to_string(),
            ..Self::default()
        }
    }

    /// Use the named edge attribute as tie weight
    pub fn with_weight(mut self, weight_attr: &str) -> Self {
        self.weight_attr = Some(weight_attr.to_string());
        self
    }

    /// Use the named vertex attribute as activity volume
    pub fn with_activity(mut self, activity_attr: &str) -> Self {
        self.activity_attr = Some(activity_attr.to_string());
        self
    }

    /// Use the named boolean vertex attribute as isolate flag
    pub fn with_isolate_flag(mut self, isolate_attr: &str) -> Self {
        self.isolate_attr = Some(isolate_attr.to_string());
        self
    }

    /// Set the group count at which per-group work is parallelised
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
