//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for relnote
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Issue tracker configuration
    pub tracker: TrackerConfig,

    /// Scope grouping configuration
    pub scopes: ScopeConfig,

    /// GitHub API configuration
    pub github: GitHubConfig,

    /// Template file used to render the document (built-in template when unset)
    pub template: Option<PathBuf>,
}

/// Issue tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL a ticket ID is appended to
    pub base_url: String,

    /// Pattern matching ticket IDs in pull request bodies
    pub pattern: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://konghq.atlassian.net/browse/".to_string(),
            pattern: r"[a-zA-Z]+-\d+".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Build the hyperlink for a ticket ID
    pub fn link(&self, id: &str) -> String {
        format!("{}{}", self.base_url, id)
    }
}

/// Scope grouping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Scope assigned to fragments that declare none
    pub default_scope: String,

    /// Scope priorities; lower sorts first
    pub priority: BTreeMap<String, i32>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        let priority = [
            ("Performance", 10),
            ("Configuration", 20),
            ("Core", 30),
            ("PDK", 40),
            ("Plugin", 50),
            ("Admin API", 60),
            ("Clustering", 70),
            ("Default", 100),
        ]
        .into_iter()
        .map(|(scope, rank)| (scope.to_string(), rank))
        .collect();

        Self {
            default_scope: "Default".to_string(),
            priority,
        }
    }
}

impl ScopeConfig {
    /// Priority of a scope.
    ///
    /// Scopes missing from the table share the default scope's priority.
    pub fn priority_of(&self, scope: &str) -> i32 {
        self.priority
            .get(scope)
            .or_else(|| self.priority.get(&self.default_scope))
            .copied()
            .unwrap_or(i32::MAX)
    }
}

/// Which pull request to use when a commit belongs to several
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullSelection {
    /// First entry returned by the API
    First,
    /// Last entry returned by the API
    #[default]
    Last,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,

    /// Web base URL used for issue links
    pub web_url: String,

    /// Environment variable holding the API token
    pub token_env: String,

    /// Pull request selection policy
    pub pull_selection: PullSelection,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            pull_selection: PullSelection::Last,
            timeout_secs: 30,
            user_agent: concat!("relnote/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GitHubConfig {
    /// Build the web link for an issue or pull request number
    pub fn issue_link(&self, repo: &str, number: u64) -> String {
        format!(
            "{}/{}/issues/{}",
            self.web_url.trim_end_matches('/'),
            repo,
            number
        )
    }
}
