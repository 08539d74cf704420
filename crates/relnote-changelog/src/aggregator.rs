//! Grouping of entries by category and scope

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use relnote_core::config::ScopeConfig;

use crate::types::{AggregatedDocument, ChangelogEntry, ScopeGroup};

/// Order scope groups by priority.
///
/// The sort is stable, so groups of equal priority keep their encounter order.
pub fn sort_scope_groups(groups: &mut [ScopeGroup], scopes: &ScopeConfig) {
    groups.sort_by_key(|group| scopes.priority_of(&group.scope));
}

/// Accumulates entries into category -> scope -> entries
pub struct Aggregator<'a> {
    scopes: &'a ScopeConfig,
    categories: BTreeMap<String, Vec<ScopeGroup>>,
}

impl<'a> Aggregator<'a> {
    /// Create an empty aggregator
    pub fn new(scopes: &'a ScopeConfig) -> Self {
        Self {
            scopes,
            categories: BTreeMap::new(),
        }
    }

    /// Add an entry, appending it to its scope's group
    pub fn add(&mut self, entry: ChangelogEntry) {
        let groups = self
            .categories
            .entry(entry.category().to_string())
            .or_default();

        match groups.iter_mut().find(|g| g.scope == entry.scope()) {
            Some(group) => group.entries.push(entry),
            None => {
                let mut group = ScopeGroup::new(entry.scope());
                group.entries.push(entry);
                groups.push(group);
            }
        }
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.categories
            .values()
            .flatten()
            .map(|g| g.entries.len())
            .sum()
    }

    /// Check if nothing has been added
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Order every category's scope groups and produce the document
    #[instrument(skip(self), fields(category_count = self.categories.len()))]
    pub fn finish(mut self, system: &str) -> AggregatedDocument {
        for (category, groups) in self.categories.iter_mut() {
            sort_scope_groups(groups, self.scopes);
            debug!(
                category = %category,
                scopes = ?groups.iter().map(|g| g.scope.as_str()).collect::<Vec<_>>(),
                "ordered scope groups"
            );
        }

        AggregatedDocument {
            system: system.to_string(),
            categories: self.categories,
        }
    }
}
