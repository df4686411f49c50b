// system-tests/tests/suites/create_knowledge.rs
// ============================================================================
// Module: Create Knowledge Tests
// Description: Creating decision knowledge elements through the plugin.
// Purpose: Check comment creation and the initial status of new elements.
// Dependencies: system-tests helpers
// ============================================================================

//! Creation tests for decision knowledge elements.

use condec_core::DocumentationLocation;
use condec_core::ElementRef;
use condec_core::KnowledgeStatus;
use condec_core::KnowledgeType;

use crate::helpers::harness::LiveJira;
use crate::helpers::harness::TestResult;
use crate::helpers::harness::ensure;

#[tokio::test(flavor = "multi_thread")]
async fn sentence_element_is_added_as_comment() -> TestResult {
    let live = LiveJira::with_issue_strategy("sentence_element_is_added_as_comment").await?;
    let task = live.create_task("Dummy task for R2", None).await?;

    live.condec()
        .create(
            "Dummy decision knowledge issue for R2",
            KnowledgeType::Issue,
            DocumentationLocation::JiraIssueText,
            Some(ElementRef::issue(task.element_id()?)),
            "",
        )
        .await?;

    let task = live.jira().find_issue(&task.key).await?;
    let expected = "{issue}Dummy decision knowledge issue for R2\n{issue}";
    ensure(task.comments().iter().any(|comment| comment.body == expected), || {
        format!("no comment with body {expected:?} in {:?}", task.comments())
    })?;

    live.finish(vec!["sentence element written as tagged comment".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn new_alternative_is_an_idea() -> TestResult {
    let live = LiveJira::with_issue_strategy("new_alternative_is_an_idea").await?;
    let issue = live
        .jira()
        .create_issue(live.project_key(), "Issue", "Which platforms should the app support?", None)
        .await?;

    let alternative = live
        .condec()
        .create(
            "The app should support Android!",
            KnowledgeType::Alternative,
            DocumentationLocation::JiraIssueText,
            Some(ElementRef::issue(issue.element_id()?)),
            "",
        )
        .await?;

    ensure(alternative.summary.trim() == "The app should support Android!", || {
        format!("unexpected summary {:?}", alternative.summary)
    })?;
    ensure(alternative.knowledge_type == KnowledgeType::Alternative, || {
        format!("unexpected type {}", alternative.knowledge_type)
    })?;
    ensure(alternative.status == Some(KnowledgeStatus::Idea), || {
        format!("unexpected status {:?}", alternative.status)
    })?;

    live.finish(vec!["alternative created with status idea".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn new_decision_is_decided() -> TestResult {
    let live = LiveJira::with_issue_strategy("new_decision_is_decided").await?;
    let issue = live
        .jira()
        .create_issue(live.project_key(), "Issue", "Dummy issue for R4", None)
        .await?;

    let decision = live
        .condec()
        .create(
            "dummy decision for R4",
            KnowledgeType::Decision,
            DocumentationLocation::JiraIssueText,
            Some(ElementRef::issue(issue.element_id()?)),
            "",
        )
        .await?;

    ensure(decision.knowledge_type == KnowledgeType::Decision, || {
        format!("unexpected type {}", decision.knowledge_type)
    })?;
    ensure(decision.status == Some(KnowledgeStatus::Decided), || {
        format!("unexpected status {:?}", decision.status)
    })?;

    live.finish(vec!["decision created with status decided".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn unlinked_issue_is_unresolved() -> TestResult {
    let live = LiveJira::with_issue_strategy("unlinked_issue_is_unresolved").await?;

    let issue = live
        .condec()
        .create("Dummy issue for R5", KnowledgeType::Issue, DocumentationLocation::JiraIssue, None, "")
        .await?;

    ensure(issue.summary == "Dummy issue for R5", || format!("unexpected summary {:?}", issue.summary))?;
    ensure(issue.knowledge_type == KnowledgeType::Issue, || {
        format!("unexpected type {}", issue.knowledge_type)
    })?;
    ensure(issue.status == Some(KnowledgeStatus::Unresolved), || {
        format!("unexpected status {:?}", issue.status)
    })?;

    live.finish(vec!["issue without decision is unresolved".to_string()])
}
