//! Full segregation report over every group of a graph

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use serde_json::to_string_pretty;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::graph::{as_undirected, AttributedGraph};
use crate::graph::summary::{weighted_diameter, GraphSummary};
use crate::groups::GroupPartition;
use crate::indices::freeman::{freeman_two_group, global_from_layer, one_vs_rest_from_layer};
use crate::indices::homophily::{homophily, HomophilyResult};
use crate::indices::proximity::{Direction, Proximity, Target};
use crate::layers::contact::contact_from_partition;
use crate::layers::non_contact::non_contact_from_partition;

/// Indices of a single group against the rest of the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    pub label: String,
    pub size: usize,

    /// Unweighted one-vs-rest Freeman index
    pub one_vs_rest: Option<f64>,

    /// Weighted one-vs-rest Freeman index (needs a weight attribute)
    pub weighted_one_vs_rest: Option<f64>,

    /// Outgoing attention to all other groups (needs weight and activity)
    pub attention_to_others: Option<f64>,

    pub homophily: Option<HomophilyResult>,
}

/// Everything the engine computes for one graph and group attribute.
///
/// Individual indices that are undefined for this graph are `None`; the
/// reason is logged as a warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegregationReport {
    pub group_attr: String,
    pub summary: GraphSummary,
    pub categories: Vec<String>,
    pub sizes: Vec<usize>,

    /// Contact layer in the graph's own directedness
    pub contact: Vec<Vec<f64>>,

    pub non_contact: Vec<Vec<f64>>,
    pub global: Option<f64>,

    /// Classic index, only when there are exactly two groups
    pub two_group: Option<f64>,

    pub groups: Vec<GroupReport>,
}

impl SegregationReport {
    /// Compute the report; fails only if the group attribute cannot be resolved
    pub fn compute<G: AttributedGraph + Sync + ?Sized>(graph: &G, config: &AnalysisConfig) -> Result<Self> {
        log::info!(
            "Computing segregation report for '{}' over {} nodes and {} edges",
            config.group_attr,
            graph.node_count(),
            graph.edge_count()
        );

        let partition = GroupPartition::new(graph, &config.group_attr)?;
        let mut summary = GraphSummary::compute(graph);
        if let Some(weight) = &config.weight_attr {
            summary.weighted_diameter = isolate("weighted diameter", weighted_diameter(graph, weight)).flatten();
        }

        // 1. Group layers
        let contact = contact_from_partition(graph, &partition, None)?;
        let non_contact = non_contact_from_partition(graph, &partition);
        let undirected = as_undirected(graph);
        let folded = contact_from_partition(&undirected, &partition, None)?;
        let weighted = match &config.weight_attr {
            Some(name) => isolate(
                "weighted contact layer",
                contact_from_partition(&undirected, &partition, Some(name.as_str())),
            ),
            None => None,
        };

        // 2. Graph-level indices
        let global = isolate("global index", global_from_layer(&contact, &partition, graph.is_directed()));
        let two_group = if partition.group_count() == 2 {
            isolate("two-group index", freeman_two_group(graph, &config.group_attr))
        } else {
            None
        };
        let homophily_by_group = isolate("homophily", homophily(graph, &config.group_attr));

        let proximity = match (&config.weight_attr, &config.activity_attr) {
            (Some(weight), Some(activity)) => {
                let built = Proximity::new(graph, &config.group_attr, weight, activity).and_then(|p| {
                    match &config.isolate_attr {
                        Some(flag) => p.with_isolate_flag(flag),
                        None => Ok(p),
                    }
                });
                isolate("proximity columns", built)
            }
            _ => None,
        };

        // 3. Per-group indices
        let build = |group: usize| {
            let label = partition.label(group).to_string();
            GroupReport {
                size: partition.size_of(group),
                one_vs_rest: isolate(&label, one_vs_rest_from_layer(&folded, &partition, group, false)),
                weighted_one_vs_rest: weighted.as_ref().and_then(|m| {
                    isolate(&label, one_vs_rest_from_layer(m, &partition, group, true))
                }),
                attention_to_others: proximity.as_ref().and_then(|p| {
                    isolate(&label, p.index(&label, Target::Others, Direction::Outgoing))
                }),
                homophily: homophily_by_group.as_ref().and_then(|h| h.get(&label).copied()),
                label,
            }
        };

        let groups: Vec<GroupReport> = if partition.group_count() >= config.parallel_threshold {
            log::info!("Processing {} groups in parallel", partition.group_count());
            (0..partition.group_count()).into_par_iter().map(&build).collect()
        } else {
            (0..partition.group_count()).map(&build).collect()
        };

        log::info!("Report complete for {} groups", groups.len());

        Ok(Self {
            group_attr: config.group_attr.clone(),
            summary,
            categories: partition.categories().to_vec(),
            sizes: partition.sizes().to_vec(),
            contact: to_rows(&contact),
            non_contact: to_rows(&non_contact),
            global,
            two_group,
            groups,
        })
    }

    /// Pretty JSON rendering of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(to_string_pretty(self)?)
    }
}

fn to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Keep one undefined index from failing the whole report
fn isolate<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Skipping {}: {}", what, err);
            None
        }
    }
}
