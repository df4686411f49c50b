// system-tests/tests/suites/ui.rs
// ============================================================================
// Module: UI Tests
// Description: Browser checks of how Jira renders decision knowledge.
// Purpose: Check the issue type label and the knowledge icons in comments.
// Dependencies: system-tests helpers, geckodriver
// ============================================================================

//! ## Overview
//! Drives Firefox through geckodriver with the configured profile. Each test
//! closes its browser session before reporting the outcome.

use condec_client::DEFAULT_IMPLICIT_WAIT;
use condec_client::Locator;
use condec_client::WebDriverSession;
use condec_core::KnowledgeType;
use condec_core::annotate;
use condec_core::markup::icon_file_stem;
use system_tests::fixture::FixtureOptions;

use crate::helpers::harness::LiveJira;
use crate::helpers::harness::TestResult;
use crate::helpers::harness::ensure;

/// Opens a browser session with the configured profile.
async fn open_browser(live: &LiveJira) -> TestResult<WebDriverSession> {
    let options = live.connection().firefox_options(live.headless());
    Ok(live.connection().web_driver()?.open_session(&options, DEFAULT_IMPLICIT_WAIT).await?)
}

#[tokio::test(flavor = "multi_thread")]
async fn issue_page_shows_knowledge_type() -> TestResult {
    let live = LiveJira::start("issue_page_shows_knowledge_type", FixtureOptions::default()).await?;
    let issue = live.jira().create_issue(live.project_key(), "Issue", "Dummy issue", None).await?;
    let session = open_browser(&live).await?;

    let outcome = async {
        session.goto(&live.connection().browse_url(&issue.key)).await?;
        let label = session.find_element(&Locator::Id("type-val".to_string())).await?;
        Ok::<_, Box<dyn std::error::Error>>(session.text(&label).await?)
    }
    .await;
    session.quit().await?;

    let label = outcome?;
    ensure(label.trim() == "Issue", || format!("type label {label:?}"))?;
    live.finish(vec!["issue page shows type Issue".to_string()])
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_shows_knowledge_icons() -> TestResult {
    let live = LiveJira::start("comment_shows_knowledge_icons", FixtureOptions::default()).await?;
    let task = live.create_task("Dummy task", None).await?;
    let lines = [
        (KnowledgeType::Issue, "How should we brew coffee?"),
        (KnowledgeType::Decision, "Use a french press to brew coffee!"),
        (KnowledgeType::Pro, "French press coffee tastes very good"),
        (KnowledgeType::Con, "French press coffee takes a lot of cleanup"),
        (KnowledgeType::Alternative, "Use a filter coffee machine"),
        (KnowledgeType::Con, "Filter coffee doesn't taste very good"),
        (KnowledgeType::Pro, "Filter coffee does not require much cleanup"),
    ];
    let body: Vec<String> =
        lines.iter().map(|(knowledge_type, text)| annotate(*knowledge_type, text)).collect();
    let comment = live.jira().add_comment(&task.key, &body.join("\n")).await?;
    let session = open_browser(&live).await?;

    let outcome = async {
        let url = format!("{}?focusedCommentId={}", live.connection().browse_url(&task.key), comment.id);
        session.goto(&url).await?;
        let icons = session
            .find_elements(&Locator::XPath(format!("//*[@id='comment-{}']//div/p/img", comment.id)))
            .await?;
        let mut sources = Vec::with_capacity(icons.len());
        for icon in &icons {
            sources.push(session.attribute(icon, "src").await?.unwrap_or_default());
        }
        Ok::<_, Box<dyn std::error::Error>>(sources)
    }
    .await;
    session.quit().await?;

    let sources = outcome?;
    ensure(sources.len() == lines.len(), || {
        format!("found {} icons for {} elements", sources.len(), lines.len())
    })?;
    for ((knowledge_type, _), src) in lines.iter().zip(&sources) {
        let stem = icon_file_stem(*knowledge_type).ok_or("type without icon")?;
        ensure(src.contains(&format!("{stem}.png")), || format!("icon {src:?} is not {stem}.png"))?;
    }
    live.reporter().artifacts().write_json("icon_sources.json", &sources)?;

    live.finish(vec!["comment icons follow the element order".to_string()])
}
