// crates/condec-client/src/jira.rs
// ============================================================================
// Module: Jira REST Client
// Description: Thin wrapper over the Jira REST API v2.
// Purpose: Create, read, change, and delete projects, issues, and comments.
// Dependencies: condec-core, reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! Each method maps to exactly one Jira REST call under `/rest/api/2`. The
//! wrapper does no validation and no retries; whatever Jira answers is
//! returned or surfaced as a [`ClientError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use condec_core::ElementId;
use condec_core::IdentifierError;
use condec_core::ProjectKey;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::error::ClientError;
use crate::transport::HttpTransport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path prefix of the Jira REST API.
const API_PREFIX: &str = "rest/api/2";

// ============================================================================
// SECTION: Projects
// ============================================================================

/// Project summary returned by the project list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JiraProject {
    /// Numeric id as a string.
    pub id: String,
    /// Project key.
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Request body for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Project key.
    pub key: ProjectKey,
    /// Display name.
    pub name: String,
    /// Project type, for example `business`.
    pub project_type_key: String,
    /// Project template key.
    pub project_template_key: String,
    /// Description.
    pub description: String,
    /// User name of the project lead.
    pub lead: String,
}

/// Response of project creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedProject {
    /// Numeric id.
    pub id: Value,
    /// Project key.
    pub key: String,
}

// ============================================================================
// SECTION: Issues
// ============================================================================

/// Response of issue creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedIssue {
    /// Numeric id as a string.
    pub id: String,
    /// Issue key.
    pub key: String,
}

impl CreatedIssue {
    /// Returns the issue id as a knowledge element id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when Jira returned a non-numeric id.
    pub fn element_id(&self) -> Result<ElementId, IdentifierError> {
        self.id.parse()
    }
}

/// Issue as returned by `GET /issue/{idOrKey}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JiraIssue {
    /// Numeric id as a string.
    pub id: String,
    /// Issue key.
    pub key: String,
    /// Issue fields.
    pub fields: JiraIssueFields,
}

impl JiraIssue {
    /// Returns the issue comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[JiraComment] {
        self.fields.comment.as_ref().map_or(&[], |page| page.comments.as_slice())
    }

    /// Returns the issue links.
    #[must_use]
    pub fn issue_links(&self) -> &[JiraIssueLink] {
        &self.fields.issuelinks
    }
}

/// Subset of issue fields the suite reads.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JiraIssueFields {
    /// Summary.
    #[serde(default)]
    pub summary: String,
    /// Description; Jira sends `null` when empty.
    #[serde(default)]
    pub description: Option<String>,
    /// Issue type.
    #[serde(default)]
    pub issuetype: Option<JiraIssueType>,
    /// Comment page.
    #[serde(default)]
    pub comment: Option<CommentPage>,
    /// Issue links.
    #[serde(default)]
    pub issuelinks: Vec<JiraIssueLink>,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Issue type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JiraIssueType {
    /// Numeric id as a string.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Page of comments embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommentPage {
    /// Comments, oldest first.
    #[serde(default)]
    pub comments: Vec<JiraComment>,
}

/// Issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JiraComment {
    /// Numeric id as a string.
    pub id: String,
    /// Comment text in Jira wiki markup.
    #[serde(default)]
    pub body: String,
}

/// Jira issue link as seen from one of its ends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssueLink {
    /// Numeric link id as a string.
    pub id: String,
    /// Link type.
    #[serde(rename = "type")]
    pub link_type: JiraIssueLinkType,
    /// Other end when this issue is the outward side's target.
    #[serde(default)]
    pub inward_issue: Option<LinkedIssue>,
    /// Other end when this issue is the source.
    #[serde(default)]
    pub outward_issue: Option<LinkedIssue>,
}

/// Issue link type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JiraIssueLinkType {
    /// Display name, for example `Relates`.
    pub name: String,
}

/// The issue at the other end of a link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkedIssue {
    /// Numeric id as a string.
    pub id: String,
    /// Issue key.
    pub key: String,
}

/// Server information used as a readiness probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Jira version.
    #[serde(default)]
    pub version: String,
    /// Base URL Jira believes it is served at.
    #[serde(default)]
    pub base_url: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Jira REST client.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// Transport rooted at the Jira base URL.
    transport: HttpTransport,
    /// User name set as reporter on created issues.
    reporter: String,
}

impl JiraClient {
    /// Creates a client that reports issues as `reporter`.
    #[must_use]
    pub fn new(transport: HttpTransport, reporter: impl Into<String>) -> Self {
        Self {
            transport,
            reporter: reporter.into(),
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Returns server information.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn server_info(&self) -> Result<ServerInfo, ClientError> {
        self.transport.send_typed::<Value, _>(Method::GET, &api("serverInfo"), &[], None).await
    }

    /// Lists every visible project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn list_projects(&self) -> Result<Vec<JiraProject>, ClientError> {
        self.transport.send_typed::<Value, _>(Method::GET, &api("project"), &[], None).await
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn create_project(&self, project: &NewProject) -> Result<CreatedProject, ClientError> {
        self.transport.send_typed(Method::POST, &api("project"), &[], Some(project)).await
    }

    /// Deletes a project and everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails, including 404 for an
    /// unknown key.
    pub async fn delete_project(&self, key_or_id: &str) -> Result<(), ClientError> {
        self.transport
            .send_empty(Method::DELETE, &api(&format!("project/{key_or_id}")), &[])
            .await
            .map(|_| ())
    }

    /// Lists issue types.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn issue_types(&self) -> Result<Vec<JiraIssueType>, ClientError> {
        self.transport.send_typed::<Value, _>(Method::GET, &api("issuetype"), &[], None).await
    }

    /// Creates an issue in `project` with the configured reporter.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails, for example when the
    /// issue type does not exist in the project.
    pub async fn create_issue(
        &self,
        project: &ProjectKey,
        issue_type: &str,
        summary: &str,
        description: Option<&str>,
    ) -> Result<CreatedIssue, ClientError> {
        let mut fields = json!({
            "project": { "key": project.as_str() },
            "summary": summary,
            "issuetype": { "name": issue_type },
            "reporter": { "name": self.reporter },
        });
        if let Some(description) = description {
            fields["description"] = Value::String(description.to_string());
        }
        let body = json!({ "fields": fields });
        let created: CreatedIssue =
            self.transport.send_typed(Method::POST, &api("issue"), &[], Some(&body)).await?;
        tracing::info!(key = %created.key, issue_type, "created jira issue");
        Ok(created)
    }

    /// Reads an issue with its comments and links.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn find_issue(&self, id_or_key: &str) -> Result<JiraIssue, ClientError> {
        self.transport
            .send_typed::<Value, _>(Method::GET, &api(&format!("issue/{id_or_key}")), &[], None)
            .await
    }

    /// Replaces the issue description.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn update_description(
        &self,
        id_or_key: &str,
        description: &str,
    ) -> Result<(), ClientError> {
        let body = json!({ "update": { "description": [{ "set": description }] } });
        self.transport
            .send(Method::PUT, &api(&format!("issue/{id_or_key}")), &[], Some(&body))
            .await
            .map(|_| ())
    }

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn delete_issue(&self, id_or_key: &str) -> Result<(), ClientError> {
        self.transport
            .send_empty(Method::DELETE, &api(&format!("issue/{id_or_key}")), &[])
            .await
            .map(|_| ())
    }

    /// Adds a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn add_comment(&self, id_or_key: &str, body: &str) -> Result<JiraComment, ClientError> {
        let payload = json!({ "body": body });
        self.transport
            .send_typed(
                Method::POST,
                &api(&format!("issue/{id_or_key}/comment")),
                &[],
                Some(&payload),
            )
            .await
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn delete_comment(&self, id_or_key: &str, comment_id: &str) -> Result<(), ClientError> {
        self.transport
            .send_empty(
                Method::DELETE,
                &api(&format!("issue/{id_or_key}/comment/{comment_id}")),
                &[],
            )
            .await
            .map(|_| ())
    }
}

/// Builds a path under the Jira REST prefix.
fn api(path: &str) -> String {
    format!("{API_PREFIX}/{path}")
}
