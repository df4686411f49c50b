// crates/condec-core/src/filter.rs
// ============================================================================
// Module: Filter Settings
// Description: Query body for knowledge element searches.
// Purpose: Build filter requests that omit every unset option.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The plugin treats a missing option differently from an empty one (an
//! empty type list matches nothing), so unset options are left out of the
//! JSON body rather than sent as `null` or `[]`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::element::DocumentationLocation;
use crate::element::KnowledgeType;
use crate::identifiers::ProjectKey;

// ============================================================================
// SECTION: Filter Settings
// ============================================================================

/// Filter for knowledge element queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    /// Project to search.
    pub project_key: ProjectKey,
    /// Free-text search over summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// Jira issue key whose knowledge subgraph is searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_element: Option<String>,
    /// Knowledge types to keep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_types: Option<Vec<KnowledgeType>>,
    /// Documentation locations to keep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_locations: Option<Vec<DocumentationLocation>>,
    /// Whether text classified as irrelevant is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_irrelevant_text_shown: Option<bool>,
}

impl FilterSettings {
    /// Creates a filter matching every element of the project.
    #[must_use]
    pub fn new(project_key: ProjectKey) -> Self {
        Self {
            project_key,
            search_term: None,
            selected_element: None,
            knowledge_types: None,
            documentation_locations: None,
            is_irrelevant_text_shown: None,
        }
    }

    /// Restricts results to summaries matching `term`.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Restricts results to the subgraph of a Jira issue.
    #[must_use]
    pub fn selected(mut self, issue_key: impl Into<String>) -> Self {
        self.selected_element = Some(issue_key.into());
        self
    }

    /// Restricts results to the given types.
    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = KnowledgeType>) -> Self {
        self.knowledge_types = Some(types.into_iter().collect());
        self
    }

    /// Restricts results to the given documentation locations.
    #[must_use]
    pub fn locations(mut self, locations: impl IntoIterator<Item = DocumentationLocation>) -> Self {
        self.documentation_locations = Some(locations.into_iter().collect());
        self
    }

    /// Includes or excludes irrelevant text.
    #[must_use]
    pub fn irrelevant_text_shown(mut self, shown: bool) -> Self {
        self.is_irrelevant_text_shown = Some(shown);
        self
    }
}
