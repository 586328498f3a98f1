//! Proximity and attention indices for directed, weighted interaction graphs
//!
//! The observed side is the tie weight a group sends (or receives) per active
//! member; the random side is the share of total activity volume produced by
//! the target. Their ratio is the attention index: 1 means the group attends
//! to the target exactly as much as the target's share of activity predicts.

use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use crate::error::{Result, SegregationError};
use crate::graph::AttributedGraph;
use crate::groups::GroupPartition;

/// The side a group's ties are measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// One named group
    Group(&'a str),

    /// Every group but the source group
    Others,
}

/// Which way ties are counted relative to the source group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ties sent from the source group to the target
    Outgoing,

    /// Ties sent from the target to the source group
    Incoming,
}

/// Attribute columns resolved once and reused across proximity queries
pub struct Proximity<'g, G: AttributedGraph + ?Sized> {
    graph: &'g G,
    partition: GroupPartition,
    weights: &'g [f64],
    activity: Vec<f64>,
    isolates: Option<Vec<bool>>,
}

impl<'g, G: AttributedGraph + ?Sized> Proximity<'g, G> {
    /// Resolve group, weight and activity columns of `graph`
    pub fn new(graph: &'g G, group_attr: &str, weight_attr: &str, activity_attr: &str) -> Result<Self> {
        let partition = GroupPartition::new(graph, group_attr)?;
        let weights = graph.require_edge_attribute(weight_attr)?;
        let activity = graph.require_numeric_attribute(activity_attr)?;

        Ok(Self {
            graph,
            partition,
            weights,
            activity,
            isolates: None,
        })
    }

    /// Mark isolates with a boolean vertex attribute instead of zero out-degree
    pub fn with_isolate_flag(mut self, isolate_attr: &str) -> Result<Self> {
        self.isolates = Some(self.graph.require_flag_attribute(isolate_attr)?.to_vec());
        Ok(self)
    }

    /// Tie weight per active member of `source_group`.
    ///
    /// Active members are vertices of the source group with at least one out
    /// edge, whatever the direction being measured.
    pub fn observed(&self, source_group: &str, target: Target<'_>, direction: Direction) -> Result<f64> {
        let g = self.partition.index_of(source_group)?;
        let in_target = self.target_matcher(g, target)?;

        let mut active = HashSet::new();
        let mut weight = 0.0;
        for edge in self.graph.edges() {
            let source = self.partition.group_of(edge.source);
            let dest = self.partition.group_of(edge.target);
            if source == g {
                active.insert(edge.source);
            }
            let counted = match direction {
                Direction::Outgoing => source == g && in_target(dest),
                Direction::Incoming => in_target(source) && dest == g,
            };
            if counted {
                weight += self.weights[edge.index];
            }
        }

        if active.is_empty() {
            return Err(SegregationError::DegenerateGroups(format!(
                "group '{}' has no active members",
                source_group
            )));
        }

        Ok(weight / active.len() as f64)
    }

    /// Share of total activity produced by the target side of `source_group`
    pub fn expected(&self, source_group: &str, target: Target<'_>) -> Result<f64> {
        let g = self.partition.index_of(source_group)?;
        let in_target = self.target_matcher(g, target)?;

        let mut total = 0.0;
        let mut on_target = 0.0;
        for (vertex, &volume) in self.activity.iter().enumerate() {
            total += volume;
            if in_target(self.partition.group_of(vertex)) {
                on_target += volume;
            }
        }

        if total <= 0.0 || on_target <= 0.0 {
            return Err(SegregationError::DegenerateGroups(format!(
                "target of '{}' produces no activity",
                source_group
            )));
        }

        Ok(on_target / total)
    }

    /// Observed over expected attention
    pub fn index(&self, source_group: &str, target: Target<'_>, direction: Direction) -> Result<f64> {
        let observed = self.observed(source_group, target, direction)?;
        let expected = self.expected(source_group, target)?;
        let index = observed / expected;

        log::debug!(
            "Attention of '{}' to {:?} ({:?}): observed={} expected={} index={}",
            source_group,
            target,
            direction,
            observed,
            expected,
            index
        );

        Ok(index)
    }

    /// Tie weight one vertex sends to the target.
    ///
    /// `Target::Others` means every group but the vertex's own. Isolates give
    /// `NoValue`.
    pub fn node_observed(&self, vertex: usize, target: Target<'_>) -> Result<f64> {
        if vertex >= self.partition.vertex_count() {
            return Err(SegregationError::InvalidGraph(format!("vertex {} out of range", vertex)));
        }
        if self.is_isolate(vertex) {
            return Err(SegregationError::NoValue(format!("vertex {} is an isolate", vertex)));
        }

        let own = self.partition.group_of(vertex);
        let in_target = self.target_matcher(own, target)?;
        let weight: f64 = self.graph.edges()
            .filter(|edge| edge.source == vertex && in_target(self.partition.group_of(edge.target)))
            .map(|edge| self.weights[edge.index])
            .sum();

        Ok(weight)
    }

    fn is_isolate(&self, vertex: usize) -> bool {
        match &self.isolates {
            Some(flags) => flags[vertex],
            None => self.graph.out_degree(vertex) == 0,
        }
    }

    fn target_matcher(&self, source: usize, target: Target<'_>) -> Result<Box<dyn Fn(usize) -> bool>> {
        let matcher: Box<dyn Fn(usize) -> bool> = match target {
            Target::Group(label) => {
                let h = self.partition.index_of(label)?;
                Box::new(move |group| group == h)
            }
            Target::Others => Box::new(move |group| group != source),
        };
        Ok(matcher)
    }
}

/// Attention index of `source_group` towards `target_group` (or every other group when `None`)
pub fn proximity<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    weight_attr: &str,
    activity_attr: &str,
    source_group: &str,
    target_group: Option<&str>,
    direction: Direction,
) -> Result<f64> {
    let target = target_group.map_or(Target::Others, Target::Group);
    Proximity::new(graph, group_attr, weight_attr, activity_attr)?.index(source_group, target, direction)
}

/// The at-random share of activity for `source_group`'s target
pub fn attention_baseline<G: AttributedGraph + ?Sized>(
    graph: &G,
    group_attr: &str,
    activity_attr: &str,
    source_group: &str,
    target_group: Option<&str>,
) -> Result<f64> {
    let partition = GroupPartition::new(graph, group_attr)?;
    let activity = graph.require_numeric_attribute(activity_attr)?;
    let g = partition.index_of(source_group)?;
    let h = target_group.map(|label| partition.index_of(label)).transpose()?;

    let total: f64 = activity.iter().sum();
    let on_target: f64 = activity.iter()
        .enumerate()
        .filter(|&(vertex, _)| {
            let group = partition.group_of(vertex);
            h.map_or(group != g, |h| group == h)
        })
        .map(|(_, volume)| volume)
        .sum();

    if total <= 0.0 {
        return Err(SegregationError::DegenerateGroups("graph produces no activity".to_string()));
    }

    Ok(on_target / total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::graph::SocialGraph;
    use approx::assert_abs_diff_eq;

    // left = {l1, l2, l3}, right = {r1, r2}, center = {c1}
    fn retweets() -> SocialGraph {
        let mut builder = GraphBuilder::directed();
        builder
            .add_edge_with("l1", "l2", &[("weight", 2.0)])
            .add_edge_with("l1", "r1", &[("weight", 1.0)])
            .add_edge_with("l2", "r2", &[("weight", 3.0)])
            .add_edge_with("r1", "l1", &[("weight", 4.0)])
            .add_edge_with("r2", "c1", &[("weight", 1.0)])
            .add_edge_with("c1", "l3", &[("weight", 5.0)]);
        for (id, party, tweets) in [
            ("l1", "left", 10.0),
            ("l2", "left", 20.0),
            ("l3", "left", 10.0),
            ("r1", "right", 30.0),
            ("r2", "right", 20.0),
            ("c1", "center", 10.0),
        ] {
            builder.set_category(id, "party", party).unwrap();
            builder.set_numeric(id, "tweets", tweets).unwrap();
            builder.set_flag(id, "isolate", id == "l3").unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn observed_weight_per_active_member() {
        let g = retweets();
        let prox = Proximity::new(&g, "party", "weight", "tweets").unwrap();

        // active left members: l1, l2
        assert_abs_diff_eq!(prox.observed("left", Target::Group("right"), Direction::Outgoing).unwrap(), 2.0);
        assert_abs_diff_eq!(prox.observed("left", Target::Others, Direction::Outgoing).unwrap(), 2.0);
        // right -> left 4, center -> left 5
        assert_abs_diff_eq!(prox.observed("left", Target::Others, Direction::Incoming).unwrap(), 4.5);
        assert_abs_diff_eq!(prox.observed("left", Target::Group("right"), Direction::Incoming).unwrap(), 2.0);
    }

    #[test]
    fn baseline_and_index() {
        let g = retweets();
        let prox = Proximity::new(&g, "party", "weight", "tweets").unwrap();

        assert_abs_diff_eq!(prox.expected("left", Target::Group("right")).unwrap(), 0.5);
        assert_abs_diff_eq!(prox.expected("left", Target::Others).unwrap(), 60.0 / 100.0);
        assert_abs_diff_eq!(
            prox.index("left", Target::Group("right"), Direction::Outgoing).unwrap(),
            4.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            proximity(&g, "party", "weight", "tweets", "left", None, Direction::Outgoing).unwrap(),
            2.0 / 0.6,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            attention_baseline(&g, "party", "tweets", "left", None).unwrap(),
            0.6,
            epsilon = 1e-12
        );
    }

    #[test]
    fn node_level_and_isolates() {
        let g = retweets();
        let prox = Proximity::new(&g, "party", "weight", "tweets").unwrap();

        let l1 = 0;
        assert_abs_diff_eq!(prox.node_observed(l1, Target::Others).unwrap(), 1.0);
        assert_abs_diff_eq!(prox.node_observed(l1, Target::Group("left")).unwrap(), 2.0);

        let l3 = (0..g.node_count()).find(|&v| g.node_id(v) == Some("l3")).unwrap();
        assert!(prox.node_observed(l3, Target::Others).unwrap_err().is_no_value());

        let flagged = Proximity::new(&g, "party", "weight", "tweets")
            .unwrap()
            .with_isolate_flag("isolate")
            .unwrap();
        assert!(flagged.node_observed(l3, Target::Others).unwrap_err().is_no_value());
        assert!(flagged.node_observed(l1, Target::Others).is_ok());
    }

    #[test]
    fn silent_group_is_degenerate() {
        let mut builder = GraphBuilder::directed();
        builder.add_edge_with("a", "b", &[("weight", 1.0)]);
        builder.set_category("a", "party", "x").unwrap();
        builder.set_category("b", "party", "y").unwrap();
        builder.set_numeric("a", "tweets", 1.0).unwrap();
        builder.set_numeric("b", "tweets", 0.0).unwrap();
        let g = builder.build().unwrap();
        let prox = Proximity::new(&g, "party", "weight", "tweets").unwrap();

        assert!(matches!(
            prox.observed("y", Target::Others, Direction::Outgoing),
            Err(SegregationError::DegenerateGroups(_))
        ));
        assert!(matches!(
            prox.expected("x", Target::Others),
            Err(SegregationError::DegenerateGroups(_))
        ));
    }
}
