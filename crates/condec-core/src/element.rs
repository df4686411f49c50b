// crates/condec-core/src/element.rs
// ============================================================================
// Module: Decision Knowledge Elements
// Description: Knowledge element records as exchanged with the ConDec plugin.
// Purpose: Provide typed access to element fields without losing unknown ones.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A decision knowledge element is a typed, statused unit of rationale. It is
//! stored either as its own Jira issue (location `i`) or as tagged text inside
//! another issue's description or comments (location `s`).
//!
//! The plugin attaches fields this crate does not model (urls, creation
//! dates, origin keys). They are captured in [`KnowledgeElement::extra`] so
//! an element read from the plugin can be changed and sent back unchanged
//! apart from the edited fields. Type, status, and location names this crate
//! does not know decode to catch-all variants; the names as sent are kept on
//! the element and written back on encode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::identifiers::ElementId;
use crate::identifiers::ProjectKey;

// ============================================================================
// SECTION: Knowledge Type
// ============================================================================

/// Knowledge type of an element.
///
/// # Invariants
/// - Wire names are the variant names (`"Issue"`, `"Decision"`, ...).
/// - Types this crate does not know decode as [`KnowledgeType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnowledgeType {
    /// A decision problem.
    Issue,
    /// A chosen solution.
    Decision,
    /// A candidate solution.
    Alternative,
    /// Supporting argument.
    Pro,
    /// Attacking argument.
    Con,
    /// Text that is not decision knowledge.
    #[serde(other)]
    Other,
}

impl KnowledgeType {
    /// Maps a wire name to a type, [`KnowledgeType::Other`] when unknown.
    fn from_wire(name: &str) -> Self {
        match name {
            "Issue" => Self::Issue,
            "Decision" => Self::Decision,
            "Alternative" => Self::Alternative,
            "Pro" => Self::Pro,
            "Con" => Self::Con,
            _ => Self::Other,
        }
    }

    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "Issue",
            Self::Decision => "Decision",
            Self::Alternative => "Alternative",
            Self::Pro => "Pro",
            Self::Con => "Con",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for KnowledgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Knowledge Status
// ============================================================================

/// Status of an element as derived by the plugin.
///
/// # Invariants
/// - Wire names are lowercase.
/// - Unknown statuses decode as [`KnowledgeStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeStatus {
    /// Issue without a decided decision.
    Unresolved,
    /// Issue with at least one decided decision.
    Resolved,
    /// Decision currently in force.
    Decided,
    /// Fresh alternative.
    Idea,
    /// Decision under question.
    Challenged,
    /// Decision or alternative that was turned down.
    Rejected,
    /// Alternative that was dropped.
    Discarded,
    /// Text marked as not being knowledge.
    Irrelevant,
    /// Any other status.
    #[serde(other)]
    Other,
}

impl KnowledgeStatus {
    /// Maps a wire name to a status, [`KnowledgeStatus::Other`] when unknown.
    fn from_wire(name: &str) -> Self {
        match name {
            "unresolved" => Self::Unresolved,
            "resolved" => Self::Resolved,
            "decided" => Self::Decided,
            "idea" => Self::Idea,
            "challenged" => Self::Challenged,
            "rejected" => Self::Rejected,
            "discarded" => Self::Discarded,
            "irrelevant" => Self::Irrelevant,
            _ => Self::Other,
        }
    }

    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Resolved => "resolved",
            Self::Decided => "decided",
            Self::Idea => "idea",
            Self::Challenged => "challenged",
            Self::Rejected => "rejected",
            Self::Discarded => "discarded",
            Self::Irrelevant => "irrelevant",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for KnowledgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Documentation Location
// ============================================================================

/// Where an element is documented.
///
/// # Invariants
/// - Wire names are single letters.
/// - Letters this crate does not know decode as
///   [`DocumentationLocation::Unknown`]; the plugin rejects requests naming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentationLocation {
    /// Its own Jira issue.
    #[serde(rename = "i")]
    JiraIssue,
    /// A tagged sentence in the description or a comment of a Jira issue.
    #[serde(rename = "s")]
    JiraIssueText,
    /// A comment in source code, read-only from Jira.
    #[serde(rename = "c")]
    Code,
    /// A location added by a newer plugin version.
    #[serde(rename = "unknown")]
    #[serde(other)]
    Unknown,
}

impl DocumentationLocation {
    /// Returns the single-letter wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JiraIssue => "i",
            Self::JiraIssueText => "s",
            Self::Code => "c",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a wire letter to a location, [`DocumentationLocation::Unknown`]
    /// when unknown.
    fn from_wire(name: &str) -> Self {
        match name {
            "i" => Self::JiraIssue,
            "s" => Self::JiraIssueText,
            "c" => Self::Code,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DocumentationLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Element Reference
// ============================================================================

/// An (id, documentation location) pair naming one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Element id.
    pub id: ElementId,
    /// Documentation location the id is scoped to.
    pub location: DocumentationLocation,
}

impl ElementRef {
    /// Creates a reference.
    #[must_use]
    pub const fn new(id: ElementId, location: DocumentationLocation) -> Self {
        Self {
            id,
            location,
        }
    }

    /// References an element documented as its own Jira issue.
    #[must_use]
    pub const fn issue(id: ElementId) -> Self {
        Self::new(id, DocumentationLocation::JiraIssue)
    }

    /// References an element documented in Jira issue text.
    #[must_use]
    pub const fn sentence(id: ElementId) -> Self {
        Self::new(id, DocumentationLocation::JiraIssueText)
    }
}

// ============================================================================
// SECTION: Knowledge Element
// ============================================================================

/// A decision knowledge element as returned by the plugin.
///
/// # Invariants
/// - `extra` holds every field the plugin sent that is not modeled here and
///   is written back verbatim on encode.
/// - A type, status, or location that decoded to its catch-all variant is
///   encoded with the name the plugin sent, until it is changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireElement", into = "WireElement")]
pub struct KnowledgeElement {
    /// Element id.
    pub id: ElementId,
    /// Jira-style key; sentence elements embed the key of the owning issue.
    pub key: Option<String>,
    /// Short human text.
    pub summary: String,
    /// Longer text, empty when unset or null.
    pub description: String,
    /// Knowledge type.
    pub knowledge_type: KnowledgeType,
    /// Derived status.
    pub status: Option<KnowledgeStatus>,
    /// Documentation location.
    pub documentation_location: DocumentationLocation,
    /// Owning project.
    pub project_key: Option<String>,
    /// Relevance flag; absent means relevant.
    pub relevant: Option<bool>,
    /// Fields not modeled by this crate.
    pub extra: BTreeMap<String, Value>,
    /// Wire names that decoded to a catch-all variant.
    unrecognized: UnrecognizedNames,
}

impl KnowledgeElement {
    /// Returns the reference naming this element.
    #[must_use]
    pub const fn reference(&self) -> ElementRef {
        ElementRef::new(self.id, self.documentation_location)
    }

    /// Returns true unless the plugin marked the element irrelevant.
    #[must_use]
    pub fn is_relevant(&self) -> bool {
        self.relevant.unwrap_or(true)
    }

    /// Returns a copy with a different knowledge type.
    #[must_use]
    pub fn with_type(mut self, knowledge_type: KnowledgeType) -> Self {
        self.knowledge_type = knowledge_type;
        self.unrecognized.knowledge_type = None;
        self
    }

    /// Returns a copy with a different status.
    #[must_use]
    pub fn with_status(mut self, status: KnowledgeStatus) -> Self {
        self.status = Some(status);
        self.unrecognized.status = None;
        self
    }

    /// Returns a copy with a different id.
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }
}

// ============================================================================
// SECTION: Wire Form
// ============================================================================

/// Original names of fields that decoded to a catch-all variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UnrecognizedNames {
    /// Type name, set when the type decoded as `Other`.
    knowledge_type: Option<String>,
    /// Status name, set when the status decoded as `Other`.
    status: Option<String>,
    /// Location letter, set when the location decoded as `Unknown`.
    documentation_location: Option<String>,
}

/// Element exactly as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireElement {
    /// Element id.
    id: ElementId,
    /// Jira-style key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    /// Short human text.
    summary: String,
    /// Longer text; Jira sends `null` when unset.
    #[serde(default, deserialize_with = "null_as_empty")]
    description: String,
    /// Type name.
    #[serde(rename = "type")]
    knowledge_type: String,
    /// Status name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    /// Location letter.
    documentation_location: String,
    /// Owning project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_key: Option<String>,
    /// Relevance flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relevant: Option<bool>,
    /// Everything else.
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<WireElement> for KnowledgeElement {
    fn from(wire: WireElement) -> Self {
        let knowledge_type = KnowledgeType::from_wire(&wire.knowledge_type);
        let status = wire.status.as_deref().map(KnowledgeStatus::from_wire);
        let documentation_location =
            DocumentationLocation::from_wire(&wire.documentation_location);
        let unrecognized = UnrecognizedNames {
            knowledge_type: keep_if_unrecognized(wire.knowledge_type, knowledge_type.as_str()),
            status: wire
                .status
                .zip(status)
                .and_then(|(name, status)| keep_if_unrecognized(name, status.as_str())),
            documentation_location: keep_if_unrecognized(
                wire.documentation_location,
                documentation_location.as_str(),
            ),
        };
        Self {
            id: wire.id,
            key: wire.key,
            summary: wire.summary,
            description: wire.description,
            knowledge_type,
            status,
            documentation_location,
            project_key: wire.project_key,
            relevant: wire.relevant,
            extra: wire.extra,
            unrecognized,
        }
    }
}

impl From<KnowledgeElement> for WireElement {
    fn from(element: KnowledgeElement) -> Self {
        let names = element.unrecognized;
        let knowledge_type = wire_name(
            element.knowledge_type.as_str(),
            element.knowledge_type == KnowledgeType::Other,
            names.knowledge_type,
        );
        let status = element.status.map(|status| {
            wire_name(status.as_str(), status == KnowledgeStatus::Other, names.status)
        });
        let documentation_location = wire_name(
            element.documentation_location.as_str(),
            element.documentation_location == DocumentationLocation::Unknown,
            names.documentation_location,
        );
        Self {
            id: element.id,
            key: element.key,
            summary: element.summary,
            description: element.description,
            knowledge_type,
            status,
            documentation_location,
            project_key: element.project_key,
            relevant: element.relevant,
            extra: element.extra,
        }
    }
}

/// Keeps `name` when it differs from the name of the variant it decoded to.
fn keep_if_unrecognized(name: String, decoded: &str) -> Option<String> {
    (name != decoded).then_some(name)
}

/// Picks the original name for a catch-all variant, the known name otherwise.
fn wire_name(known: &str, catch_all: bool, original: Option<String>) -> String {
    match original {
        Some(original) if catch_all => original,
        _ => known.to_string(),
    }
}

/// Decodes a missing or `null` string as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// SECTION: New Element
// ============================================================================

/// Request body for creating an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    /// Short human text.
    pub summary: String,
    /// Knowledge type.
    #[serde(rename = "type")]
    pub knowledge_type: KnowledgeType,
    /// Target project.
    pub project_key: ProjectKey,
    /// Longer text, empty by default.
    pub description: String,
    /// Where the element is stored.
    pub documentation_location: DocumentationLocation,
}

impl NewElement {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(
        summary: impl Into<String>,
        knowledge_type: KnowledgeType,
        project_key: ProjectKey,
        documentation_location: DocumentationLocation,
    ) -> Self {
        Self {
            summary: summary.into(),
            knowledge_type,
            project_key,
            description: String::new(),
            documentation_location,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
