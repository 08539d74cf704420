//! In-memory hosting API for tests

use std::collections::HashMap;
use std::sync::Mutex;

use relnote_core::error::HostingError;
use relnote_github::{CommitContext, HostingApi, PullRequestContext};

/// Answers lookups from fixed tables and records every call
#[derive(Default)]
pub(crate) struct FakeHosting {
    commits: HashMap<String, CommitContext>,
    pulls: HashMap<String, Vec<PullRequestContext>>,
    calls: Mutex<Vec<String>>,
}

impl FakeHosting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commit(mut self, path: &str, sha: &str) -> Self {
        self.commits.insert(
            path.to_string(),
            CommitContext::new(sha, format!("add {}", path)),
        );
        self
    }

    pub fn with_pulls(mut self, sha: &str, pulls: Vec<PullRequestContext>) -> Self {
        self.pulls.insert(sha.to_string(), pulls);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HostingApi for FakeHosting {
    fn name(&self) -> &str {
        "fake"
    }

    async fn latest_commit(&self, path: &str) -> relnote_github::Result<CommitContext> {
        self.calls.lock().unwrap().push(format!("commits?path={}", path));
        self.commits
            .get(path)
            .cloned()
            .ok_or_else(|| HostingError::CommitLookupFailed {
                path: path.to_string(),
                reason: "404 Not Found".to_string(),
            })
    }

    async fn pulls_for_commit(&self, sha: &str) -> relnote_github::Result<Vec<PullRequestContext>> {
        self.calls.lock().unwrap().push(format!("commits/{}/pulls", sha));
        self.pulls
            .get(sha)
            .cloned()
            .ok_or_else(|| HostingError::PullLookupFailed {
                sha: sha.to_string(),
                reason: "404 Not Found".to_string(),
            })
    }
}
