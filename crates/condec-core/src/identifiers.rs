// crates/condec-core/src/identifiers.rs
// ============================================================================
// Module: ConDec Identifiers
// Description: Typed identifiers for knowledge elements and Jira projects.
// Purpose: Keep ids and project keys distinct from free-form strings.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Element ids are signed because the suite deliberately sends ids the plugin
//! never issues (for example `-1`) to exercise error paths. Jira hands out
//! issue ids as decimal strings, so [`ElementId`] parses from those too.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when constructing identifiers from untrusted text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The element id is not a decimal integer.
    #[error("invalid element id: {0}")]
    ElementId(String),
    /// The project key does not follow Jira's key rules.
    #[error("invalid project key: {0}")]
    ProjectKey(String),
}

// ============================================================================
// SECTION: Element Id
// ============================================================================

/// Knowledge element identifier.
///
/// # Invariants
/// - Unique only within a (documentation location, project) scope.
/// - Negative values are never issued by the plugin.
/// - Decodes from a JSON number or a decimal string; always encodes as a
///   number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(i64);

impl ElementId {
    /// Id that the plugin is guaranteed not to know.
    pub const NONEXISTENT: Self = Self(-1);

    /// Creates an element id from a raw value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ElementId {
    type Err = IdentifierError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim().parse::<i64>().map(Self).map_err(|_| IdentifierError::ElementId(raw.to_string()))
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Either wire form of an id.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            /// JSON number.
            Number(i64),
            /// Decimal string, as Jira sends issue ids.
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(raw) => Ok(Self(raw)),
            RawId::Text(raw) => raw.parse().map_err(de::Error::custom),
        }
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

// ============================================================================
// SECTION: Project Key
// ============================================================================

/// Jira project key.
///
/// # Invariants
/// - Starts with an ASCII uppercase letter.
/// - Contains only ASCII uppercase letters, digits, and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a project key after validating Jira's key rules.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::ProjectKey`] when the key is empty, does not
    /// start with an uppercase letter, or contains other characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        let mut chars = raw.chars();
        let valid_head = chars.next().is_some_and(|c| c.is_ascii_uppercase());
        let valid_tail =
            chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if valid_head && valid_tail {
            Ok(Self(raw))
        } else {
            Err(IdentifierError::ProjectKey(raw))
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for ProjectKey {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectKey> for String {
    fn from(value: ProjectKey) -> Self {
        value.0
    }
}
