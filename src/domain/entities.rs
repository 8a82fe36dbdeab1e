//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the source table, before hierarchy resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Classification code as it appeared in the table
    pub code: String,
    /// Human-readable name for the code
    pub label: String,
}

impl RawRecord {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Classification entry with its resolved position in the hierarchy.
///
/// `level` and `parent_code` are pure functions of `code`, see
/// [`crate::domain::resolver`]. Entries are read-only after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationEntry {
    /// Canonical code, the sole natural identifier
    pub code: String,
    /// Descriptive name, may be empty
    pub label: String,
    /// Hierarchy depth indicator (character length of the code)
    pub level: usize,
    /// Code of the structural parent, None for root-level entries
    pub parent_code: Option<String>,
}

impl fmt::Display for ClassificationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.label)
        }
    }
}

/// Descriptive metadata of the classification scheme itself.
///
/// Carried by the synthetic root node and serialized into the
/// IFCCLASSIFICATION container entity. Defaults match the eBKP-H 2020
/// edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeMeta {
    /// Publishing organisation, e.g. "CRB"
    pub source: String,
    /// Edition identifier
    pub edition: String,
    /// Edition date, ISO-8601 (YYYY-MM-DD)
    pub edition_date: String,
    /// Scheme name
    pub name: String,
    /// Scheme description
    pub description: String,
    /// Reference tokens identifying the scheme in downstream tools
    pub reference_tokens: Vec<String>,
}

impl Default for SchemeMeta {
    fn default() -> Self {
        Self {
            source: "CRB".to_string(),
            edition: "2020".to_string(),
            edition_date: "2020-09-28".to_string(),
            name: "eBKP-H".to_string(),
            description: "Elementbasierter Baukostenplan Hochbau Schweiz".to_string(),
            reference_tokens: vec!["eBKP-H".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display_with_and_without_label() {
        let entry = ClassificationEntry {
            code: "203".to_string(),
            label: "Walls".to_string(),
            level: 3,
            parent_code: Some("2".to_string()),
        };
        assert_eq!(entry.to_string(), "203 Walls");

        let bare = ClassificationEntry {
            label: String::new(),
            ..entry
        };
        assert_eq!(bare.to_string(), "203");
    }
}
