// crates/condec-core/src/graph.rs
// ============================================================================
// Module: Knowledge Graph Views
// Description: Treant tree and vis node/edge renderings of the knowledge graph.
// Purpose: Decode both graph views the plugin serves for a selected element.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The plugin renders the knowledge graph rooted at a Jira issue in two
//! shapes: a Treant tree (nested nodes with titles and icons) and a vis
//! network (flat node and edge lists). Both are requested with the same
//! [`GraphRequest`]. Presentation fields the suite never checks are kept in
//! `extra` maps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::element::KnowledgeType;
use crate::identifiers::ProjectKey;
use crate::markup::icon_file_stem;

// ============================================================================
// SECTION: Request
// ============================================================================

/// Request body for both graph views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    /// Free-text search; empty matches everything.
    pub search_term: String,
    /// Jira issue key the graph is rooted at.
    pub selected_element: String,
    /// Project of the selected issue.
    pub project_key: ProjectKey,
}

impl GraphRequest {
    /// Requests the full graph rooted at `issue_key`.
    #[must_use]
    pub fn rooted_at(project_key: ProjectKey, issue_key: impl Into<String>) -> Self {
        Self {
            search_term: String::new(),
            selected_element: issue_key.into(),
            project_key,
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }
}

// ============================================================================
// SECTION: Treant
// ============================================================================

/// Treant tree rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreantGraph {
    /// Root node, the selected Jira issue.
    pub node_structure: TreantNode,
    /// Chart layout options.
    #[serde(default)]
    pub chart: Value,
}

/// Title block of a Treant node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreantLabel {
    /// Displayed title.
    #[serde(default)]
    pub title: String,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One node of the Treant tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreantNode {
    /// Node text.
    pub text: TreantLabel,
    /// Link target of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<TreantLabel>,
    /// Icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Child nodes in display order.
    #[serde(default)]
    pub children: Vec<Self>,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl TreantNode {
    /// Returns the node title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.text.title
    }

    /// Returns the link title, if the node has a link.
    #[must_use]
    pub fn link_title(&self) -> Option<&str> {
        self.link.as_ref().map(|link| link.title.as_str())
    }

    /// Returns true when the node icon is the one for `knowledge_type`.
    #[must_use]
    pub fn has_icon_for(&self, knowledge_type: KnowledgeType) -> bool {
        let Some(image) = self.image.as_deref() else {
            return false;
        };
        icon_file_stem(knowledge_type).is_some_and(|stem| image.contains(&format!("{stem}.png")))
    }

    /// Counts this node and all its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

// ============================================================================
// SECTION: Vis
// ============================================================================

/// Vis network rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisGraph {
    /// Nodes, including the selected root.
    #[serde(default)]
    pub nodes: Vec<VisNode>,
    /// Edges between nodes.
    #[serde(default)]
    pub edges: Vec<VisEdge>,
}

/// One vis node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisNode {
    /// Node id; the plugin prefixes element ids with their location.
    pub id: Value,
    /// Displayed label.
    #[serde(default)]
    pub label: String,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One vis edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisEdge {
    /// Source node id.
    pub from: Value,
    /// Target node id.
    pub to: Value,
    /// Unmodeled fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl VisGraph {
    /// Returns true when the graph holds only its root node.
    #[must_use]
    pub fn is_root_only(&self) -> bool {
        self.nodes.len() == 1 && self.edges.is_empty()
    }
}
