// system-tests/tests/suites/visualization.rs
// ============================================================================
// Module: Visualization Tests
// Description: Treant and vis renderings of a documented issue.
// Purpose: Check tree shape, titles, and icons of the knowledge graph views.
// Dependencies: system-tests helpers
// ============================================================================

//! Graph view tests for the knowledge graph around one Jira issue.

use condec_core::KnowledgeType;
use condec_core::TreantNode;
use condec_core::annotate;
use system_tests::fixture::FixtureOptions;

use crate::helpers::harness::LiveJira;
use crate::helpers::harness::TestResult;
use crate::helpers::harness::ensure;

/// Root issue of the comment.
const QUESTION: &str = "How should we brew coffee?";
/// Decision answering the issue.
const DECISION: &str = "Use a french press to brew coffee!";
/// Alternative to the decision.
const ALTERNATIVE: &str = "Use a filter coffee machine";

/// Comment body documenting the coffee decision.
fn coffee_comment() -> String {
    [
        annotate(KnowledgeType::Issue, QUESTION),
        annotate(KnowledgeType::Decision, DECISION),
        annotate(KnowledgeType::Alternative, ALTERNATIVE),
    ]
    .join("\n")
}

/// Checks title, link title, and icon of a Treant node.
fn expect_node(node: &TreantNode, title: &str, knowledge_type: KnowledgeType) -> TestResult {
    ensure(node.title() == title, || format!("node title {:?}, expected {title:?}", node.title()))?;
    ensure(node.link_title() == Some(title), || {
        format!("link title {:?}, expected {title:?}", node.link_title())
    })?;
    ensure(node.has_icon_for(knowledge_type), || {
        format!("node {title:?} has icon {:?}, expected one for {knowledge_type}", node.image)
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn treant_tree_mirrors_comment() -> TestResult {
    let live = LiveJira::start("treant_tree_mirrors_comment", FixtureOptions::default()).await?;
    let task = live.create_task("Dummy task", None).await?;
    live.jira().add_comment(&task.key, &coffee_comment()).await?;

    let treant = live.condec().treant(&task.key, "").await?;
    live.reporter().artifacts().write_json("treant.json", &treant)?;

    let root_level = &treant.node_structure.children;
    ensure(root_level.len() == 1, || format!("root has {} children", root_level.len()))?;
    let issue = &root_level[0];
    expect_node(issue, QUESTION, KnowledgeType::Issue)?;

    let second_level = &issue.children;
    ensure(second_level.len() == 2, || format!("issue has {} children", second_level.len()))?;
    expect_node(&second_level[0], DECISION, KnowledgeType::Decision)?;
    expect_node(&second_level[1], ALTERNATIVE, KnowledgeType::Alternative)?;
    ensure(second_level.iter().all(|node| node.children.is_empty()), || {
        "decision and alternative should be leaves".to_string()
    })?;

    live.finish(vec!["treant tree has issue with decision and alternative".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn vis_graph_matches_treant_tree() -> TestResult {
    let live = LiveJira::start("vis_graph_matches_treant_tree", FixtureOptions::default()).await?;
    let task = live.create_task("Dummy task", None).await?;
    live.jira().add_comment(&task.key, &coffee_comment()).await?;

    let treant = live.condec().treant(&task.key, "").await?;
    let vis = live.condec().vis(&task.key, "").await?;
    live.reporter().artifacts().write_json("vis.json", &vis)?;

    let expected_nodes = treant.node_structure.node_count();
    ensure(vis.nodes.len() == expected_nodes, || {
        format!("vis has {} nodes, treant {expected_nodes}", vis.nodes.len())
    })?;
    ensure(vis.edges.len() == expected_nodes - 1, || {
        format!("vis has {} edges for {expected_nodes} nodes", vis.edges.len())
    })?;
    for title in [QUESTION, DECISION, ALTERNATIVE] {
        ensure(vis.nodes.iter().any(|node| node.label.contains(title)), || {
            format!("no vis node labelled {title:?}")
        })?;
    }

    live.finish(vec![format!("vis graph has {expected_nodes} nodes like the treant tree")])
}
