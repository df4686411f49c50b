// crates/condec-core/src/link.rs
// ============================================================================
// Module: Knowledge Links
// Description: Link creation parameters and link deletion payloads.
// Purpose: Pin the wire shape of link requests in one place.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Links are created with query parameters and deleted with a JSON body. The
//! plugin has been seen to depend on the order of the deletion body fields,
//! so [`LinkDeletion`] declares them in the order the plugin expects and
//! `serde` writes them in declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::element::DocumentationLocation;
use crate::element::ElementRef;
use crate::identifiers::ElementId;
use crate::identifiers::ProjectKey;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Link type used when the caller does not choose one.
pub const DEFAULT_LINK_TYPE: &str = "relates";

// ============================================================================
// SECTION: Link Creation
// ============================================================================

/// Parameters for creating a link between two elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// Project both elements belong to.
    pub project_key: ProjectKey,
    /// Parent (source) element.
    pub parent: ElementRef,
    /// Child (destination) element.
    pub child: ElementRef,
    /// Link type name, `relates` by default.
    pub link_type: String,
}

impl LinkRequest {
    /// Creates a `relates` link request.
    #[must_use]
    pub fn relates(project_key: ProjectKey, parent: ElementRef, child: ElementRef) -> Self {
        Self {
            project_key,
            parent,
            child,
            link_type: DEFAULT_LINK_TYPE.to_string(),
        }
    }

    /// Overrides the link type name.
    #[must_use]
    pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link_type = link_type.into();
        self
    }

    /// Returns the query parameters in the order the plugin documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("projectKey", self.project_key.to_string()),
            ("documentationLocationOfParent", self.parent.location.to_string()),
            ("documentationLocationOfChild", self.child.location.to_string()),
            ("idOfParent", self.parent.id.to_string()),
            ("idOfChild", self.child.id.to_string()),
            ("linkTypeName", self.link_type.clone()),
        ]
    }
}

// ============================================================================
// SECTION: Link Deletion
// ============================================================================

/// JSON body for deleting a link.
///
/// # Invariants
/// - Field order is part of the wire contract; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDeletion {
    /// Source element id.
    pub id_of_source_element: ElementId,
    /// Destination element id.
    pub id_of_destination_element: ElementId,
    /// Source element location.
    pub documentation_location_of_source_element: DocumentationLocation,
    /// Destination element location.
    pub documentation_location_of_destination_element: DocumentationLocation,
}

impl LinkDeletion {
    /// Builds the body for the link from `source` to `destination`.
    #[must_use]
    pub const fn between(source: ElementRef, destination: ElementRef) -> Self {
        Self {
            id_of_source_element: source.id,
            id_of_destination_element: destination.id,
            documentation_location_of_source_element: source.location,
            documentation_location_of_destination_element: destination.location,
        }
    }
}
