//! Fragment enrichment from the hosting API

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, info, instrument};

use relnote_core::config::{Config, GitHubConfig, PullSelection, TrackerConfig};
use relnote_core::error::{ConfigError, HostingError, Result};
use relnote_github::{HostingApi, PullRequestContext};

use crate::types::{ChangelogEntry, Fragment, ResolvedIssue, ResolvedTicket};

/// Find ticket IDs in `text`, deduplicated in first-seen order
pub fn extract_tickets(text: &str, pattern: &Regex) -> Vec<String> {
    let found = pattern.find_iter(text).map(|m| m.as_str().to_string());
    dedup_preserving_order(found)
}

/// Pick the governing pull request from the API's list
pub fn select_pull(
    pulls: Vec<PullRequestContext>,
    selection: PullSelection,
) -> Option<PullRequestContext> {
    match selection {
        PullSelection::First => pulls.into_iter().next(),
        PullSelection::Last => pulls.into_iter().last(),
    }
}

/// Issue numbers for a fragment: declared issues, else declared PRs, else the looked-up PR
pub fn resolve_issue_numbers(fragment: &Fragment, pull_number: u64) -> Vec<u64> {
    let numbers = if !fragment.githubs.is_empty() {
        fragment.githubs.clone()
    } else if !fragment.prs.is_empty() {
        fragment.prs.clone()
    } else {
        vec![pull_number]
    };
    dedup_preserving_order(numbers)
}

fn dedup_preserving_order<T, I>(items: I) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Enriches fragments with data from their introducing commit and pull request
pub struct Enricher<'a> {
    api: &'a dyn HostingApi,
    tracker: &'a TrackerConfig,
    github: &'a GitHubConfig,
    repo: &'a str,
    ticket_pattern: Regex,
}

impl<'a> Enricher<'a> {
    /// Create an enricher for `repo` (`owner/name`)
    pub fn new(api: &'a dyn HostingApi, config: &'a Config, repo: &'a str) -> Result<Self> {
        let ticket_pattern =
            Regex::new(&config.tracker.pattern).map_err(|e| ConfigError::InvalidValue {
                field: "tracker.pattern".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            api,
            tracker: &config.tracker,
            github: &config.github,
            repo,
            ticket_pattern,
        })
    }

    /// Look up the commit and pull request behind `path` and resolve the fragment's references.
    ///
    /// `path` is the fragment's location relative to the repository root.
    #[instrument(skip(self, fragment), fields(api = self.api.name()))]
    pub async fn enrich(&self, path: &str, fragment: Fragment) -> Result<ChangelogEntry> {
        let commit = self.api.latest_commit(path).await?;
        let pulls = self.api.pulls_for_commit(&commit.sha).await?;
        let candidates = pulls.len();

        let pull = select_pull(pulls, self.github.pull_selection).ok_or_else(|| {
            HostingError::PullLookupFailed {
                sha: commit.sha.clone(),
                reason: "no pull request associated with commit".to_string(),
            }
        })?;

        info!(
            sha = commit.short_sha(),
            pull = pull.number,
            candidates,
            "enriching fragment"
        );
        Ok(self.resolve(fragment, &pull))
    }

    /// Apply the inference rules against an already-selected pull request
    pub fn resolve(&self, mut fragment: Fragment, pull: &PullRequestContext) -> ChangelogEntry {
        fragment.jiras = if fragment.jiras.is_empty() {
            let inferred = extract_tickets(&pull.body, &self.ticket_pattern);
            if !inferred.is_empty() {
                debug!(pull = pull.number, tickets = ?inferred, "inferred tickets from pull request body");
            }
            inferred
        } else {
            dedup_preserving_order(fragment.jiras)
        };

        fragment.githubs = resolve_issue_numbers(&fragment, pull.number);

        let tickets = fragment
            .jiras
            .iter()
            .map(|id| ResolvedTicket {
                id: id.clone(),
                link: self.tracker.link(id),
            })
            .collect();

        let issues = fragment
            .githubs
            .iter()
            .map(|number| ResolvedIssue {
                name: format!("#{}", number),
                link: self.github.issue_link(self.repo, *number),
            })
            .collect();

        ChangelogEntry {
            fragment,
            tickets,
            issues,
        }
    }
}
