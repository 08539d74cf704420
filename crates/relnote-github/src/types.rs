//! Hosting API types

use serde::{Deserialize, Serialize};

/// The commit that introduced a fragment file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitContext {
    /// Commit hash (full)
    pub sha: String,
    /// Full commit message
    pub message: String,
}

impl CommitContext {
    /// Create a new CommitContext
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }

    /// Short hash (first 7 characters)
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// A pull request associated with a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestContext {
    /// Pull request number
    pub number: u64,
    /// Pull request title
    pub title: String,
    /// Pull request description (empty when the PR has none)
    pub body: String,
}

impl PullRequestContext {
    /// Create a new PullRequestContext
    pub fn new(number: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Item of `GET /repos/{repo}/commits`
#[derive(Debug, Deserialize)]
pub(crate) struct CommitItem {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub message: String,
}

impl From<CommitItem> for CommitContext {
    fn from(item: CommitItem) -> Self {
        Self {
            sha: item.sha,
            message: item.commit.message,
        }
    }
}

/// Item of `GET /repos/{repo}/commits/{sha}/pulls`
#[derive(Debug, Deserialize)]
pub(crate) struct PullItem {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<PullItem> for PullRequestContext {
    fn from(item: PullItem) -> Self {
        Self {
            number: item.number,
            title: item.title,
            body: item.body.unwrap_or_default(),
        }
    }
}
