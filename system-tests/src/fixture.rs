// system-tests/src/fixture.rs
// ============================================================================
// Module: Jira Fixture
// Description: Resets the Jira test project to an empty, activated baseline.
// Purpose: Give every live test the same starting state.
// Dependencies: condec-client, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`set_up_jira`] deletes the configured project if it exists, recreates it,
//! activates ConDec, optionally chooses the issue persistence strategy, and
//! optionally creates seed issues. Steps run in that order, each logged, and
//! the first failure aborts the routine. Nothing is retried.
//!
//! # Invariants
//! - Without seed issues, the project holds no knowledge elements afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use condec_client::ClientError;
use condec_client::CreatedIssue;
use condec_client::NewProject;
use thiserror::Error;

use crate::connection::Connection;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Display name of the test project.
pub const PROJECT_NAME: &str = "ConDec Test";

/// Jira project type of the test project.
pub const PROJECT_TYPE_KEY: &str = "business";

/// Jira project template of the test project.
pub const PROJECT_TEMPLATE_KEY: &str =
    "com.atlassian.jira-core-project-templates:jira-core-project-management";

/// Description of the test project.
pub const PROJECT_DESCRIPTION: &str = "A project for testing the ConDec Jira plugin";

// ============================================================================
// SECTION: Types
// ============================================================================

/// What the fixture should do beyond the reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureOptions {
    /// `Some(true)` stores knowledge as Jira issues, `Some(false)` in the
    /// ConDec database, `None` keeps the plugin default.
    pub issue_strategy: Option<bool>,
    /// Summaries of Jira issues to create with the default issue type.
    pub seed_issues: Vec<String>,
}

impl FixtureOptions {
    /// Reset with the issue strategy switched on.
    #[must_use]
    pub fn issue_strategy() -> Self {
        Self {
            issue_strategy: Some(true),
            seed_issues: Vec::new(),
        }
    }
}

/// Fixture step, used to say where a reset failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureStep {
    /// Listing existing projects.
    ListProjects,
    /// Deleting the previous test project.
    DeleteProject,
    /// Creating the test project.
    CreateProject,
    /// Activating ConDec for the project.
    Activate,
    /// Choosing the persistence strategy.
    IssueStrategy,
    /// Creating seed issues.
    SeedIssues,
}

impl fmt::Display for FixtureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListProjects => "list projects",
            Self::DeleteProject => "delete project",
            Self::CreateProject => "create project",
            Self::Activate => "activate condec",
            Self::IssueStrategy => "set issue strategy",
            Self::SeedIssues => "create seed issues",
        })
    }
}

/// Fixture failure.
#[derive(Debug, Error)]
#[error("jira setup failed at step `{step}`: {source}")]
pub struct FixtureError {
    /// Step that failed.
    pub step: FixtureStep,
    /// Underlying client error.
    #[source]
    pub source: ClientError,
}

impl FixtureError {
    /// Returns a closure wrapping a client error for `step`.
    fn at(step: FixtureStep) -> impl FnOnce(ClientError) -> Self {
        move |source| Self {
            step,
            source,
        }
    }
}

/// What the fixture did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureReport {
    /// Whether a previous project was deleted.
    pub deleted_existing: bool,
    /// Seed issues that were created.
    pub seeded: Vec<CreatedIssue>,
}

// ============================================================================
// SECTION: Setup Routine
// ============================================================================

/// Brings the configured project to a known baseline.
///
/// # Errors
///
/// Returns [`FixtureError`] naming the first step that failed. A 404 while
/// deleting the previous project is not a failure.
pub async fn set_up_jira(
    connection: &Connection,
    options: &FixtureOptions,
) -> Result<FixtureReport, FixtureError> {
    let jira = connection.jira();
    let condec = connection.condec();
    let project_key = connection.project_key();
    let mut report = FixtureReport::default();

    let projects = jira.list_projects().await.map_err(FixtureError::at(FixtureStep::ListProjects))?;
    if projects.iter().any(|project| project.key == project_key.as_str()) {
        match jira.delete_project(project_key.as_str()).await {
            Ok(()) => {
                report.deleted_existing = true;
                tracing::info!(project = %project_key, "deleted existing test project");
            }
            Err(err) if err.status() == Some(404) => {
                tracing::info!(project = %project_key, "test project already gone");
            }
            Err(err) => return Err(FixtureError::at(FixtureStep::DeleteProject)(err)),
        }
    }

    let project = NewProject {
        key: project_key.clone(),
        name: PROJECT_NAME.to_string(),
        project_type_key: PROJECT_TYPE_KEY.to_string(),
        project_template_key: PROJECT_TEMPLATE_KEY.to_string(),
        description: PROJECT_DESCRIPTION.to_string(),
        lead: connection.config().local_jira_username.clone(),
    };
    jira.create_project(&project).await.map_err(FixtureError::at(FixtureStep::CreateProject))?;
    tracing::info!(project = %project_key, "created test project");

    condec.set_activated(true).await.map_err(FixtureError::at(FixtureStep::Activate))?;
    tracing::info!(project = %project_key, "activated condec");

    if let Some(issue_strategy) = options.issue_strategy {
        condec
            .set_issue_strategy(issue_strategy)
            .await
            .map_err(FixtureError::at(FixtureStep::IssueStrategy))?;
        tracing::info!(project = %project_key, issue_strategy, "set persistence strategy");
    }

    for summary in &options.seed_issues {
        let created = jira
            .create_issue(project_key, connection.default_issue_type(), summary, None)
            .await
            .map_err(FixtureError::at(FixtureStep::SeedIssues))?;
        report.seeded.push(created);
    }
    Ok(report)
}
