// system-tests/tests/suites/link_knowledge.rs
// ============================================================================
// Module: Link Knowledge Tests
// Description: Linking decision knowledge elements.
// Purpose: Check where links are stored and how they affect issue status.
// Dependencies: system-tests helpers
// ============================================================================

//! Link tests for decision knowledge elements.

use condec_core::DocumentationLocation;
use condec_core::ElementId;
use condec_core::ElementRef;
use condec_core::KnowledgeStatus;
use condec_core::KnowledgeType;

use crate::helpers::harness::LiveJira;
use crate::helpers::harness::TestResult;
use crate::helpers::harness::ensure;

#[tokio::test(flavor = "multi_thread")]
async fn linking_two_jira_issues_creates_issue_link() -> TestResult {
    let live = LiveJira::with_issue_strategy("linking_two_jira_issues_creates_issue_link").await?;
    let jira = live.jira();
    let first = jira.create_issue(live.project_key(), "Issue", "Issue 1", None).await?;
    let second = jira.create_issue(live.project_key(), "Alternative", "Issue 2", None).await?;
    let first_id = first.element_id()?;
    let second_id = second.element_id()?;
    ensure(first_id.get() > 0 && second_id.get() > 0, || "jira returned non-positive ids".to_string())?;

    let link = live.condec().link(ElementRef::issue(first_id), ElementRef::issue(second_id)).await?;
    let link_id = link.id.to_string();

    let source = jira.find_issue(&first.id).await?;
    let outward = source.issue_links().first().ok_or("source issue has no link")?;
    ensure(outward.id == link_id, || format!("link id {} != {link_id}", outward.id))?;
    ensure(outward.link_type.name == "Relates", || format!("link type {}", outward.link_type.name))?;
    let target = outward.outward_issue.as_ref().ok_or("source link lacks outwardIssue")?;
    ensure(target.id == second.id && target.key == second.key, || format!("outward issue {target:?}"))?;

    let destination = jira.find_issue(&second.id).await?;
    let inward = destination.issue_links().first().ok_or("target issue has no link")?;
    ensure(inward.id == link_id, || format!("link id {} != {link_id}", inward.id))?;
    ensure(inward.link_type.name == "Relates", || format!("link type {}", inward.link_type.name))?;
    let origin = inward.inward_issue.as_ref().ok_or("target link lacks inwardIssue")?;
    ensure(origin.id == first.id && origin.key == first.key, || format!("inward issue {origin:?}"))?;

    live.finish(vec![format!("jira issue link {link_id} visible from both ends")])
}

#[tokio::test(flavor = "multi_thread")]
async fn linking_issue_and_sentence_creates_no_issue_link() -> TestResult {
    let live = LiveJira::with_issue_strategy("linking_issue_and_sentence_creates_no_issue_link").await?;
    let condec = live.condec();
    let issue = condec
        .create(
            "Which method of transportation should be used for pizza delivery?",
            KnowledgeType::Issue,
            DocumentationLocation::JiraIssue,
            None,
            "",
        )
        .await?;
    let decision = condec
        .create(
            "Use a car to deliver pizzas!",
            KnowledgeType::Decision,
            DocumentationLocation::JiraIssueText,
            Some(issue.reference()),
            "",
        )
        .await?;

    let jira_issue = live.jira().find_issue(&issue.id.to_string()).await?;
    ensure(jira_issue.issue_links().is_empty(), || {
        format!("unexpected jira links {:?}", jira_issue.issue_links())
    })?;
    let issue_key = issue.key.as_deref().ok_or("issue element has no key")?;
    let sentence_key = decision.key.as_deref().unwrap_or_default();
    ensure(sentence_key.contains(issue_key), || {
        format!("sentence key {sentence_key:?} does not name issue {issue_key}")
    })?;

    live.finish(vec!["issue-to-sentence link kept out of jira".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn linking_element_to_itself_fails() -> TestResult {
    let live = LiveJira::with_issue_strategy("linking_element_to_itself_fails").await?;
    let alternative =
        live.jira().create_issue(live.project_key(), "Alternative", "Dummy Alternative", None).await?;
    let element = ElementRef::issue(alternative.element_id()?);

    let Err(err) = live.condec().link(element, element).await else {
        return Err("self link unexpectedly succeeded".into());
    };
    ensure(err.status() == Some(400), || format!("expected HTTP 400, got {err}"))?;

    live.finish(vec!["self link rejected with 400".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn decided_decision_resolves_linked_issue() -> TestResult {
    let live = LiveJira::with_issue_strategy("decided_decision_resolves_linked_issue").await?;
    let summary = "Which board games should be played?";
    let issue = live.jira().create_issue(live.project_key(), "Issue", summary, None).await?;
    let issue_id = issue.element_id()?;

    let decision = live
        .condec()
        .create(
            "Settlers of Catan should be played!",
            KnowledgeType::Decision,
            DocumentationLocation::JiraIssueText,
            Some(ElementRef::issue(issue_id)),
            "",
        )
        .await?;
    ensure(decision.status == Some(KnowledgeStatus::Decided), || {
        format!("new decision has status {:?}", decision.status)
    })?;

    let elements = live.condec().all_elements().await?;
    ensure(
        elements.iter().any(|element| {
            element.id == issue_id
                && element.summary == summary
                && element.status == Some(KnowledgeStatus::Resolved)
        }),
        || format!("issue {issue_id} is not resolved in {elements:?}"),
    )?;

    live.finish(vec!["linked decision resolved the jira issue".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn linking_to_unknown_element_fails() -> TestResult {
    let live = LiveJira::with_issue_strategy("linking_to_unknown_element_fails").await?;
    let issue = live
        .condec()
        .create("Dummy issue", KnowledgeType::Issue, DocumentationLocation::JiraIssue, None, "")
        .await?;

    let missing = ElementRef::issue(ElementId::NONEXISTENT);
    let Err(err) = live.condec().link(issue.reference(), missing).await else {
        return Err("link to element -1 unexpectedly succeeded".into());
    };
    ensure(err.status() == Some(400), || format!("expected HTTP 400, got {err}"))?;

    live.finish(vec!["link to unknown element rejected with 400".to_string()])
}
