// system-tests/tests/suites/change_knowledge.rs
// ============================================================================
// Module: Change Knowledge Tests
// Description: Updating type and status of decision knowledge elements.
// Purpose: Check the status rules the plugin applies on update.
// Dependencies: system-tests helpers
// ============================================================================

//! Update tests for decision knowledge elements.

use condec_core::DocumentationLocation;
use condec_core::ElementId;
use condec_core::ElementRef;
use condec_core::KnowledgeElement;
use condec_core::KnowledgeStatus;
use condec_core::KnowledgeType;

use crate::helpers::harness::LiveJira;
use crate::helpers::harness::TestResult;
use crate::helpers::harness::ensure;

/// Creates a Jira-issue decision knowledge issue with a decision below it.
async fn issue_with_decision(
    live: &LiveJira,
    question: &str,
    answer: &str,
) -> TestResult<(KnowledgeElement, KnowledgeElement)> {
    let condec = live.condec();
    let issue =
        condec.create(question, KnowledgeType::Issue, DocumentationLocation::JiraIssue, None, "").await?;
    let decision = condec
        .create(
            answer,
            KnowledgeType::Decision,
            DocumentationLocation::JiraIssue,
            Some(issue.reference()),
            "",
        )
        .await?;
    Ok((issue, decision))
}

/// Checks the status the plugin now reports for `element`.
async fn expect_status(live: &LiveJira, element: ElementRef, expected: KnowledgeStatus) -> TestResult {
    let current = live.condec().knowledge_element(element).await?;
    ensure(current.status == Some(expected), || {
        format!("element {} has status {:?}, expected {expected}", current.id, current.status)
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn alternative_changed_to_decision_is_decided() -> TestResult {
    let live = LiveJira::with_issue_strategy("alternative_changed_to_decision_is_decided").await?;
    let condec = live.condec();
    let task = live.create_task("Enable persistence of user data", None).await?;
    let task_ref = ElementRef::issue(task.element_id()?);

    let issue = condec
        .create(
            "Which database should be used to store user data?",
            KnowledgeType::Issue,
            DocumentationLocation::JiraIssueText,
            Some(task_ref),
            "",
        )
        .await?;
    let alternative = condec
        .create(
            "Use Postgres to store user data!",
            KnowledgeType::Alternative,
            DocumentationLocation::JiraIssueText,
            Some(task_ref),
            "",
        )
        .await?;

    let changed = alternative.clone().with_type(KnowledgeType::Decision);
    condec.update_element(&changed, Some(issue.reference())).await?;

    let elements = condec.all_elements().await?;
    let updated = elements
        .iter()
        .find(|element| element.id == alternative.id)
        .ok_or_else(|| format!("element {} vanished after update", alternative.id))?;
    ensure(updated.knowledge_type == KnowledgeType::Decision, || {
        format!("unexpected type {}", updated.knowledge_type)
    })?;
    ensure(updated.status == Some(KnowledgeStatus::Decided), || {
        format!("unexpected status {:?}", updated.status)
    })?;

    live.finish(vec!["alternative promoted to decided decision".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn decision_changed_to_alternative_is_rejected() -> TestResult {
    let live = LiveJira::with_issue_strategy("decision_changed_to_alternative_is_rejected").await?;
    let condec = live.condec();
    let decision = condec
        .create(
            "Only users with admin rights should be able to set the toggle!",
            KnowledgeType::Decision,
            DocumentationLocation::JiraIssue,
            None,
            "",
        )
        .await?;

    condec.update_element(&decision.clone().with_type(KnowledgeType::Alternative), None).await?;

    let updated = condec.knowledge_element(decision.reference()).await?;
    ensure(updated.knowledge_type == KnowledgeType::Decision, || {
        format!("decision turned into {}", updated.knowledge_type)
    })?;
    ensure(updated.status == Some(KnowledgeStatus::Rejected), || {
        format!("unexpected status {:?}", updated.status)
    })?;

    live.finish(vec!["demoted decision kept its type and was rejected".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn challenged_decision_unresolves_issue() -> TestResult {
    let live = LiveJira::with_issue_strategy("challenged_decision_unresolves_issue").await?;
    let (issue, decision) = issue_with_decision(
        &live,
        "Which font should be used in the user interface?",
        "Use Wingdings for the user interface font!",
    )
    .await?;

    live.condec()
        .update_element(&decision.with_status(KnowledgeStatus::Challenged), None)
        .await?;
    expect_status(&live, issue.reference(), KnowledgeStatus::Unresolved).await?;

    live.finish(vec!["challenging the only decision unresolved the issue".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_decision_unresolves_issue() -> TestResult {
    let live = LiveJira::with_issue_strategy("rejected_decision_unresolves_issue").await?;
    let (issue, decision) = issue_with_decision(
        &live,
        "Which color scheme should be used for the website?",
        "Use a dark color scheme for the website!",
    )
    .await?;

    live.condec()
        .update_element(&decision.with_status(KnowledgeStatus::Rejected), None)
        .await?;
    expect_status(&live, issue.reference(), KnowledgeStatus::Unresolved).await?;

    live.finish(vec!["rejecting the only decision unresolved the issue".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn decided_decision_resolves_issue() -> TestResult {
    let live = LiveJira::with_issue_strategy("decided_decision_resolves_issue").await?;
    let (issue, decision) = issue_with_decision(
        &live,
        "Which options should be available for setting font size?",
        "Options for small, medium, and large should be available!",
    )
    .await?;

    ensure(decision.status == Some(KnowledgeStatus::Decided), || {
        format!("new decision has status {:?}", decision.status)
    })?;
    expect_status(&live, issue.reference(), KnowledgeStatus::Resolved).await?;

    live.finish(vec!["linked decision resolved the issue".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn alternative_decided_resolves_issue() -> TestResult {
    let live = LiveJira::with_issue_strategy("alternative_decided_resolves_issue").await?;
    let condec = live.condec();
    let issue = condec
        .create(
            "Which standards should be enforced for password creation?",
            KnowledgeType::Issue,
            DocumentationLocation::JiraIssue,
            None,
            "",
        )
        .await?;
    let alternative = condec
        .create(
            "A password should have at least 8 characters!",
            KnowledgeType::Alternative,
            DocumentationLocation::JiraIssue,
            Some(issue.reference()),
            "",
        )
        .await?;

    let promoted = alternative
        .clone()
        .with_type(KnowledgeType::Decision)
        .with_status(KnowledgeStatus::Decided);
    condec.update_element(&promoted, None).await?;

    let updated = condec.knowledge_element(alternative.reference()).await?;
    ensure(updated.knowledge_type == KnowledgeType::Decision, || {
        format!("unexpected type {}", updated.knowledge_type)
    })?;
    ensure(updated.status == Some(KnowledgeStatus::Decided), || {
        format!("unexpected status {:?}", updated.status)
    })?;
    expect_status(&live, issue.reference(), KnowledgeStatus::Resolved).await?;

    live.finish(vec!["decided former alternative resolved the issue".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_element_fails() -> TestResult {
    let live = LiveJira::with_issue_strategy("update_of_unknown_element_fails").await?;
    let issue = live
        .condec()
        .create("Dummy issue", KnowledgeType::Issue, DocumentationLocation::JiraIssue, None, "")
        .await?;

    let result = live.condec().update_element(&issue.with_id(ElementId::NONEXISTENT), None).await;
    let Err(err) = result else {
        return Err("update of element -1 unexpectedly succeeded".into());
    };
    ensure(err.status().is_some_and(|status| status >= 400), || {
        format!("expected an HTTP error status, got {err}")
    })?;

    live.finish(vec![format!("update of unknown id rejected: {err}")])
}
