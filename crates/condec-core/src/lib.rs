// crates/condec-core/src/lib.rs
// ============================================================================
// Module: ConDec Core Library
// Description: Public API surface for the ConDec wire model.
// Purpose: Expose typed knowledge elements, links, filters, and graph views.
// Dependencies: crate::{identifiers, element, link, filter, graph, markup}
// ============================================================================

//! ## Overview
//! ConDec core models what the ConDec Jira plugin sends and accepts over its
//! REST interface: decision knowledge elements, links between them, filter
//! settings for knowledge queries, and the two knowledge-graph renderings.
//! It performs no I/O. The behavior of the plugin (status derivation, link
//! bookkeeping) is observed by the system tests, never reimplemented here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod element;
pub mod filter;
pub mod graph;
pub mod identifiers;
pub mod link;
pub mod markup;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use element::DocumentationLocation;
pub use element::ElementRef;
pub use element::KnowledgeElement;
pub use element::KnowledgeStatus;
pub use element::KnowledgeType;
pub use element::NewElement;
pub use filter::FilterSettings;
pub use graph::GraphRequest;
pub use graph::TreantGraph;
pub use graph::TreantNode;
pub use graph::VisEdge;
pub use graph::VisGraph;
pub use graph::VisNode;
pub use identifiers::ElementId;
pub use identifiers::IdentifierError;
pub use identifiers::ProjectKey;
pub use link::DEFAULT_LINK_TYPE;
pub use link::LinkDeletion;
pub use link::LinkRequest;
pub use markup::annotate;
pub use markup::contains_macro_tags;
pub use markup::parse_icon_prefix;
