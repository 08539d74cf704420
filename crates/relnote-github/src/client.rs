//! GitHub REST API client
//!
//! ## Authentication
//!
//! Uses the token from the environment variable named by `github.token_env`
//! (`GITHUB_TOKEN` by default). Without one, requests are unauthenticated and
//! subject to GitHub's anonymous rate limit.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, instrument};
use url::Url;

use relnote_core::config::GitHubConfig;
use relnote_core::error::HostingError;

use crate::api::{HostingApi, Result};
use crate::types::{CommitContext, CommitItem, PullItem, PullRequestContext};

/// GitHub REST API client scoped to one repository
pub struct GitHubClient {
    client: Client,
    api_url: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a new client for `repo` (`owner/name`)
    pub fn new(config: &GitHubConfig, repo: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| HostingError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repo: repo.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Create a client, reading the token from the configured environment variable
    pub fn from_env(config: &GitHubConfig, repo: impl Into<String>) -> Result<Self> {
        let token = Self::load_token(&config.token_env);
        Self::new(config, repo, token)
    }

    fn load_token(var: &str) -> Option<String> {
        match std::env::var(var) {
            Ok(token) if !token.is_empty() => {
                debug!(var, "loaded API token from environment");
                Some(token)
            }
            _ => {
                debug!(var, "no API token, using unauthenticated requests");
                None
            }
        }
    }

    /// Whether requests carry a bearer token
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, suffix: &str) -> Result<Url> {
        let raw = format!("{}/repos/{}/{}", self.api_url, self.repo, suffix);
        Url::parse(&raw).map_err(|e| HostingError::Client(format!("invalid URL {}: {}", raw, e)))
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl HostingApi for GitHubClient {
    fn name(&self) -> &str {
        "GitHub"
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn latest_commit(&self, path: &str) -> Result<CommitContext> {
        let fail = |reason: String| HostingError::CommitLookupFailed {
            path: path.to_string(),
            reason,
        };

        let mut url = self.endpoint("commits")?;
        url.query_pairs_mut().append_pair("path", path);

        let response = self.get(url).send().await.map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(fail(format!("{} {}", status, error_text.trim())));
        }

        let commits: Vec<CommitItem> = response
            .json()
            .await
            .map_err(|e| fail(format!("failed to parse response: {}", e)))?;

        let commit: CommitContext = commits
            .into_iter()
            .next()
            .ok_or_else(|| fail("no commit touches this path".to_string()))?
            .into();

        info!(sha = commit.short_sha(), "resolved introducing commit");
        Ok(commit)
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn pulls_for_commit(&self, sha: &str) -> Result<Vec<PullRequestContext>> {
        let fail = |reason: String| HostingError::PullLookupFailed {
            sha: sha.to_string(),
            reason,
        };

        let url = self.endpoint(&format!("commits/{}/pulls", sha))?;

        let response = self.get(url).send().await.map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(fail(format!("{} {}", status, error_text.trim())));
        }

        let pulls: Vec<PullItem> = response
            .json()
            .await
            .map_err(|e| fail(format!("failed to parse response: {}", e)))?;

        debug!(count = pulls.len(), "fetched pull requests for commit");
        Ok(pulls.into_iter().map(PullRequestContext::from).collect())
    }
}
