// crates/condec-client/src/condec.rs
// ============================================================================
// Module: ConDec REST Client
// Description: Calls into the ConDec plugin REST API.
// Purpose: Configure the plugin and manipulate decision knowledge.
// Dependencies: condec-core, reqwest, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! [`ConDecClient`] wraps the plugin endpoints under `/rest/condec/latest`.
//! The client is bound to one project; every element, link, and graph call
//! is scoped to it.
//!
//! Plugin failures are surfaced as [`ClientError::Status`] with the plugin's
//! `error` text, never as a success value carrying an error payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use condec_core::DocumentationLocation;
use condec_core::ElementId;
use condec_core::ElementRef;
use condec_core::FilterSettings;
use condec_core::GraphRequest;
use condec_core::KnowledgeElement;
use condec_core::KnowledgeType;
use condec_core::LinkDeletion;
use condec_core::LinkRequest;
use condec_core::NewElement;
use condec_core::ProjectKey;
use condec_core::TreantGraph;
use condec_core::VisGraph;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::HttpTransport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path prefix of the ConDec REST API.
const API_PREFIX: &str = "rest/condec/latest";

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Response of link creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedLink {
    /// Id of the new link.
    pub id: i64,
}

/// Body identifying one element for deletion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementLocator<'a> {
    /// Element id.
    id: ElementId,
    /// Owning project.
    project_key: &'a ProjectKey,
    /// Where the element is documented.
    documentation_location: DocumentationLocation,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// ConDec plugin client bound to one project.
#[derive(Debug, Clone)]
pub struct ConDecClient {
    /// Transport rooted at the Jira base URL.
    transport: HttpTransport,
    /// Project every call is scoped to.
    project_key: ProjectKey,
}

impl ConDecClient {
    /// Creates a client for `project_key`.
    #[must_use]
    pub const fn new(transport: HttpTransport, project_key: ProjectKey) -> Self {
        Self {
            transport,
            project_key,
        }
    }

    /// Returns the project this client is bound to.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Activates or deactivates the plugin for the project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn set_activated(&self, activated: bool) -> Result<(), ClientError> {
        let query = [
            ("projectKey", self.project_key.to_string()),
            ("isActivated", activated.to_string()),
        ];
        self.transport.send_empty(Method::POST, &api("config/setActivated.json"), &query).await?;
        Ok(())
    }

    /// Chooses whether knowledge is stored as Jira issues.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn set_issue_strategy(&self, issue_strategy: bool) -> Result<(), ClientError> {
        let query = [
            ("projectKey", self.project_key.to_string()),
            ("isIssueStrategy", issue_strategy.to_string()),
        ];
        self.transport
            .send_empty(Method::POST, &api("config/setIssueStrategy.json"), &query)
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    /// Creates an element, optionally as a child of `parent`.
    ///
    /// Sentence elements (`s`) are written as a new comment on the parent
    /// issue, wrapped in the macro of their type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the plugin rejects the element.
    pub async fn create_element(
        &self,
        element: &NewElement,
        parent: Option<ElementRef>,
    ) -> Result<KnowledgeElement, ClientError> {
        let query = parent_query("idOfExistingElement", "documentationLocationOfExistingElement", parent);
        let created: KnowledgeElement = self
            .transport
            .send_typed(
                Method::POST,
                &api("knowledge/createDecisionKnowledgeElement.json"),
                &query,
                Some(element),
            )
            .await?;
        tracing::info!(
            id = %created.id,
            knowledge_type = %created.knowledge_type,
            location = %created.documentation_location,
            "created knowledge element"
        );
        Ok(created)
    }

    /// Creates an element from its parts; see [`ConDecClient::create_element`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the plugin rejects the element.
    pub async fn create(
        &self,
        summary: &str,
        knowledge_type: KnowledgeType,
        location: DocumentationLocation,
        parent: Option<ElementRef>,
        description: &str,
    ) -> Result<KnowledgeElement, ClientError> {
        let element = NewElement::new(summary, knowledge_type, self.project_key.clone(), location)
            .with_description(description);
        self.create_element(&element, parent).await
    }

    /// Writes `element` back, optionally relinking it under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the plugin rejects the update, for
    /// example for an unknown id.
    pub async fn update_element(
        &self,
        element: &KnowledgeElement,
        parent: Option<ElementRef>,
    ) -> Result<(), ClientError> {
        let query = parent_query("idOfParentElement", "documentationLocationOfParentElement", parent);
        self.transport
            .send(
                Method::POST,
                &api("knowledge/updateDecisionKnowledgeElement.json"),
                &query,
                Some(element),
            )
            .await?;
        Ok(())
    }

    /// Deletes an element.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 500 for an unknown id.
    pub async fn delete_element(&self, element: ElementRef) -> Result<(), ClientError> {
        let body = ElementLocator {
            id: element.id,
            project_key: &self.project_key,
            documentation_location: element.location,
        };
        self.transport
            .send(
                Method::DELETE,
                &api("knowledge/deleteDecisionKnowledgeElement.json"),
                &[],
                Some(&body),
            )
            .await?;
        Ok(())
    }

    /// Reads one element.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the element does not exist.
    pub async fn knowledge_element(
        &self,
        element: ElementRef,
    ) -> Result<KnowledgeElement, ClientError> {
        let query = [
            ("projectKey", self.project_key.to_string()),
            ("id", element.id.to_string()),
            ("documentationLocation", element.location.to_string()),
        ];
        self.transport
            .send_typed::<Value, _>(Method::GET, &api("knowledge/knowledgeElement.json"), &query, None)
            .await
    }

    /// Marks a sentence as irrelevant, turning it into plain text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the sentence does not exist.
    pub async fn set_sentence_irrelevant(&self, id: ElementId) -> Result<(), ClientError> {
        let body = ElementLocator {
            id,
            project_key: &self.project_key,
            documentation_location: DocumentationLocation::JiraIssueText,
        };
        self.transport
            .send(Method::POST, &api("knowledge/setSentenceIrrelevant.json"), &[], Some(&body))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------------

    /// Links `child` under `parent` with the given link type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the plugin rejects the link, for example
    /// a self link or a missing element.
    pub async fn create_link(&self, request: &LinkRequest) -> Result<CreatedLink, ClientError> {
        let query = request.query_pairs();
        let link: CreatedLink = self
            .transport
            .send_typed::<Value, _>(Method::POST, &api("knowledge/createLink.json"), &query, None)
            .await?;
        tracing::info!(
            link_id = link.id,
            parent = %request.parent.id,
            child = %request.child.id,
            "created knowledge link"
        );
        Ok(link)
    }

    /// Links two elements of this project with a `relates` link.
    ///
    /// # Errors
    ///
    /// See [`ConDecClient::create_link`].
    pub async fn link(
        &self,
        parent: ElementRef,
        child: ElementRef,
    ) -> Result<CreatedLink, ClientError> {
        self.create_link(&LinkRequest::relates(self.project_key.clone(), parent, child)).await
    }

    /// Removes the link from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when no such link exists.
    pub async fn delete_link(
        &self,
        source: ElementRef,
        destination: ElementRef,
    ) -> Result<(), ClientError> {
        let query = [("projectKey", self.project_key.to_string())];
        let body = LinkDeletion::between(source, destination);
        self.transport
            .send(Method::DELETE, &api("knowledge/deleteLink.json"), &query, Some(&body))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Returns the elements matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn knowledge_elements(
        &self,
        filter: &FilterSettings,
    ) -> Result<Vec<KnowledgeElement>, ClientError> {
        self.transport
            .send_typed(Method::POST, &api("knowledge/knowledgeElements.json"), &[], Some(filter))
            .await
    }

    /// Returns every element of the project.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn all_elements(&self) -> Result<Vec<KnowledgeElement>, ClientError> {
        self.knowledge_elements(&FilterSettings::new(self.project_key.clone())).await
    }

    /// Returns the elements reachable from the issue `issue_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn elements_of_issue(
        &self,
        issue_key: &str,
    ) -> Result<Vec<KnowledgeElement>, ClientError> {
        let filter = FilterSettings::new(self.project_key.clone()).selected(issue_key);
        self.knowledge_elements(&filter).await
    }

    /// Returns the Treant tree rooted at `selected_element`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn treant(
        &self,
        selected_element: &str,
        search_term: &str,
    ) -> Result<TreantGraph, ClientError> {
        let request = self.graph_request(selected_element, search_term);
        self.transport.send_typed(Method::POST, &api("view/getTreant.json"), &[], Some(&request)).await
    }

    /// Returns the vis.js graph around `selected_element`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails.
    pub async fn vis(
        &self,
        selected_element: &str,
        search_term: &str,
    ) -> Result<VisGraph, ClientError> {
        let request = self.graph_request(selected_element, search_term);
        self.transport.send_typed(Method::POST, &api("view/getVis.json"), &[], Some(&request)).await
    }

    /// Builds the body shared by both graph views.
    fn graph_request(&self, selected_element: &str, search_term: &str) -> GraphRequest {
        GraphRequest::rooted_at(self.project_key.clone(), selected_element).search(search_term)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the parent query pair; omitted entirely when there is no parent.
fn parent_query(
    id_name: &'static str,
    location_name: &'static str,
    parent: Option<ElementRef>,
) -> Vec<(&'static str, String)> {
    parent.map_or_else(Vec::new, |parent| {
        vec![(id_name, parent.id.to_string()), (location_name, parent.location.to_string())]
    })
}

/// Builds a path under the ConDec REST prefix.
fn api(path: &str) -> String {
    format!("{API_PREFIX}/{path}")
}
