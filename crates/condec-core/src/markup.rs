// crates/condec-core/src/markup.rs
// ============================================================================
// Module: Knowledge Markup
// Description: Macro tags, Jira icons, and UI icon names per knowledge type.
// Purpose: Build and inspect annotated Jira text in tests.
// Dependencies: crate::element
// ============================================================================

//! ## Overview
//! Users classify text in Jira by wrapping it in a macro (`{issue}...{issue}`)
//! or by prefixing it with a Jira icon (`(!)`). The plugin rewrites icons into
//! macros and renders each type with its own image. `Other` has no markup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::element::KnowledgeType;

// ============================================================================
// SECTION: Lookup Tables
// ============================================================================

/// Types that carry markup, in the order they are checked.
const MARKED_TYPES: [KnowledgeType; 5] = [
    KnowledgeType::Issue,
    KnowledgeType::Decision,
    KnowledgeType::Alternative,
    KnowledgeType::Pro,
    KnowledgeType::Con,
];

/// Returns the macro name for a type (`issue` for `{issue}`).
#[must_use]
pub const fn macro_tag(knowledge_type: KnowledgeType) -> Option<&'static str> {
    match knowledge_type {
        KnowledgeType::Issue => Some("issue"),
        KnowledgeType::Decision => Some("decision"),
        KnowledgeType::Alternative => Some("alternative"),
        KnowledgeType::Pro => Some("pro"),
        KnowledgeType::Con => Some("con"),
        KnowledgeType::Other => None,
    }
}

/// Returns the Jira icon shorthand for a type.
#[must_use]
pub const fn jira_icon(knowledge_type: KnowledgeType) -> Option<&'static str> {
    match knowledge_type {
        KnowledgeType::Issue => Some("(!)"),
        KnowledgeType::Decision => Some("(/)"),
        KnowledgeType::Alternative => Some("(on)"),
        KnowledgeType::Pro => Some("(+)"),
        KnowledgeType::Con => Some("(-)"),
        KnowledgeType::Other => None,
    }
}

/// Returns the file stem of the image the UI shows for a type.
#[must_use]
pub const fn icon_file_stem(knowledge_type: KnowledgeType) -> Option<&'static str> {
    match knowledge_type {
        KnowledgeType::Issue => Some("issue"),
        KnowledgeType::Decision => Some("decision"),
        KnowledgeType::Alternative => Some("alternative"),
        KnowledgeType::Pro => Some("argument_pro"),
        KnowledgeType::Con => Some("argument_con"),
        KnowledgeType::Other => None,
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Wraps `text` in the macro of `knowledge_type`.
///
/// `Other` text is returned unchanged.
#[must_use]
pub fn annotate(knowledge_type: KnowledgeType, text: &str) -> String {
    macro_tag(knowledge_type)
        .map_or_else(|| text.to_string(), |tag| format!("{{{tag}}}{text}{{{tag}}}"))
}

/// Prefixes `text` with the Jira icon of `knowledge_type`.
#[must_use]
pub fn with_icon(knowledge_type: KnowledgeType, text: &str) -> String {
    jira_icon(knowledge_type).map_or_else(|| text.to_string(), |icon| format!("{icon} {text}"))
}

// ============================================================================
// SECTION: Inspection
// ============================================================================

/// Returns true when `text` contains any knowledge macro tag.
#[must_use]
pub fn contains_macro_tags(text: &str) -> bool {
    MARKED_TYPES
        .iter()
        .filter_map(|knowledge_type| macro_tag(*knowledge_type))
        .any(|tag| text.contains(&format!("{{{tag}}}")))
}

/// Splits a line starting with a Jira icon into its type and remaining text.
#[must_use]
pub fn parse_icon_prefix(line: &str) -> Option<(KnowledgeType, &str)> {
    let trimmed = line.trim_start();
    MARKED_TYPES.iter().find_map(|knowledge_type| {
        let icon = jira_icon(*knowledge_type)?;
        trimmed.strip_prefix(icon).map(|rest| (*knowledge_type, rest.trim()))
    })
}
