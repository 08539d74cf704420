//! Changelog types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single changelog fragment, as authored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Free-text change description
    pub message: String,
    /// Category (feature, bugfix, ...), used verbatim as a grouping key
    #[serde(rename = "type")]
    pub category: String,
    /// Affected subsystem; never empty after parsing
    pub scope: String,
    /// Pull request numbers
    pub prs: Vec<u64>,
    /// Issue numbers
    pub githubs: Vec<u64>,
    /// Tracker ticket IDs
    pub jiras: Vec<String>,
}

/// A tracker ticket resolved to a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTicket {
    /// Ticket ID (e.g. `FTI-123`)
    pub id: String,
    /// Hyperlink to the ticket
    pub link: String,
}

/// An issue or pull request resolved to a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIssue {
    /// Display label (`#123`)
    pub name: String,
    /// Hyperlink to the issue
    pub link: String,
}

/// An enriched fragment ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// The fragment, with inferred tickets and issue numbers filled in
    #[serde(flatten)]
    pub fragment: Fragment,
    /// Resolved tracker tickets
    pub tickets: Vec<ResolvedTicket>,
    /// Resolved issues
    pub issues: Vec<ResolvedIssue>,
}

impl ChangelogEntry {
    /// Category of the underlying fragment
    pub fn category(&self) -> &str {
        &self.fragment.category
    }

    /// Scope of the underlying fragment
    pub fn scope(&self) -> &str {
        &self.fragment.scope
    }
}

/// Entries of one scope within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeGroup {
    /// Scope name
    pub scope: String,
    /// Entries in encounter order
    pub entries: Vec<ChangelogEntry>,
}

impl ScopeGroup {
    /// Create an empty group
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            entries: Vec::new(),
        }
    }
}

/// Top-level render input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedDocument {
    /// System display name
    pub system: String,
    /// Category name to scope groups in priority order; categories iterate alphabetically
    pub categories: BTreeMap<String, Vec<ScopeGroup>>,
}

impl AggregatedDocument {
    /// Total number of entries across all categories
    pub fn entry_count(&self) -> usize {
        self.categories
            .values()
            .flatten()
            .map(|group| group.entries.len())
            .sum()
    }

    /// Check if the document has no entries
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
