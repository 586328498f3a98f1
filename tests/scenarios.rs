use anyhow::Result;
use approx::assert_abs_diff_eq;
use graph_segregation_analyzer::{
    as_undirected, contact_layer, freeman_global, freeman_one_vs_rest, freeman_two_group, homophily,
    me_vs_others, non_contact_layer, spectral_segregation, AnalysisConfig, AttributedGraph, GraphBuilder,
    SegregationError, SegregationReport, SocialGraph, VertexAttribute,
};
use ndarray::array;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Four vertices, A = {0, 1}, B = {2, 3}; edges 0->2, 1->3, 0->1
fn four_vertex_scenario() -> Result<SocialGraph> {
    let graph = SocialGraph::from_edges(4, true, &[(0, 2), (1, 3), (0, 1)])?
        .with_vertex_attribute(
            "group",
            VertexAttribute::Category(vec!["A".into(), "A".into(), "B".into(), "B".into()]),
        )?
        .with_edge_attribute("weight", vec![1.0, 1.0, 1.0])?;
    Ok(graph)
}

#[test]
fn four_vertex_contact_layer() -> Result<()> {
    init_logging();
    let graph = four_vertex_scenario()?;

    let directed = contact_layer(&graph, "group", None)?;
    assert_eq!(directed, array![[1.0, 2.0], [0.0, 0.0]]);

    let weighted = contact_layer(&graph, "group", Some("weight"))?;
    assert_eq!(weighted, directed);

    // the undirected fold moves nothing here: the lower triangle is already empty
    let folded = contact_layer(&as_undirected(&graph), "group", None)?;
    assert_eq!(folded, array![[1.0, 2.0], [0.0, 0.0]]);
    Ok(())
}

#[test]
fn four_vertex_two_group_index_is_random() -> Result<()> {
    init_logging();
    let graph = four_vertex_scenario()?;

    // P = 2/3 cross ties, Pi = 2*2*2 / (4*3) = 2/3
    assert_abs_diff_eq!(freeman_two_group(&graph, "group")?, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(freeman_global(&graph, "group")?, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(freeman_one_vs_rest(&graph, "group", "A", None)?, 0.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn four_vertex_non_contact_layer() -> Result<()> {
    let graph = four_vertex_scenario()?;
    let contact = contact_layer(&graph, "group", None)?;
    let non_contact = non_contact_layer(&graph, "group")?;

    assert_eq!(non_contact, array![[1.0, 2.0], [4.0, 2.0]]);
    for k in 0..2 {
        assert_eq!(contact[[k, k]] + non_contact[[k, k]], 2.0);
    }
    Ok(())
}

#[test]
fn four_vertex_homophily() -> Result<()> {
    let graph = four_vertex_scenario()?;

    // B never sends a tie, so its in-group share is undefined
    assert!(matches!(
        homophily(&graph, "group"),
        Err(SegregationError::DegenerateGroups(_))
    ));
    Ok(())
}

#[test]
fn reducer_on_three_party_network() -> Result<()> {
    init_logging();
    let mut builder = GraphBuilder::undirected();
    for (a, b) in [("l1", "l2"), ("l2", "c1"), ("c1", "r1"), ("r1", "r2"), ("r2", "l1"), ("c1", "c2")] {
        builder.add_edge(a, b);
    }
    for (id, party) in [("l1", "left"), ("l2", "left"), ("c1", "center"), ("c2", "center"), ("r1", "right"), ("r2", "right")] {
        builder.set_category(id, "party", party)?;
    }
    let graph = builder.build()?;

    let m = contact_layer(&graph, "party", None)?;
    assert_abs_diff_eq!(m.sum(), graph.edge_count() as f64);

    // categories: center, left, right
    let left = me_vs_others(&m, 1, false)?;
    assert_eq!(left, array![[1.0, 2.0], [0.0, 3.0]]);
    assert_abs_diff_eq!(left.sum(), m.sum());
    Ok(())
}

#[test]
fn spectral_index_on_two_disconnected_islands() -> Result<()> {
    init_logging();
    // target group t: islands {0, 1, 2} (path) and {3, 4}; o-vertices bridge to both
    let graph = SocialGraph::from_edges(7, false, &[(0, 1), (1, 2), (3, 4), (2, 5), (4, 6), (5, 6)])?
        .with_vertex_attribute(
            "side",
            VertexAttribute::Category(
                ["t", "t", "t", "t", "t", "o", "o"].iter().map(|s| s.to_string()).collect(),
            ),
        )?;

    let scores = spectral_segregation(&graph, "side", "t")?;
    assert_eq!(scores.len(), 2);
    for score in scores.values() {
        assert!(score.eigenvalue >= 0.0);
        assert!(score.eigenvalue <= score.vertices.len() as f64);
        assert_eq!(score.loadings.len(), score.vertices.len());
    }
    assert_eq!(scores[&0].vertices, vec![0, 1, 2]);
    assert_eq!(scores[&1].vertices, vec![3, 4]);
    Ok(())
}

#[test]
fn report_renders_json() -> Result<()> {
    init_logging();
    let graph = four_vertex_scenario()?;
    let report = SegregationReport::compute(&graph, &AnalysisConfig::new("group").with_weight("weight"))?;

    let json = report.to_json()?;
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(parsed["categories"], serde_json::json!(["A", "B"]));
    assert_eq!(parsed["summary"]["edge_count"], serde_json::json!(3));
    Ok(())
}
