//! Hosting API trait

use crate::types::{CommitContext, PullRequestContext};
use relnote_core::error::HostingError;

/// Result type for hosting API operations
pub type Result<T> = std::result::Result<T, HostingError>;

/// Read-only view of a code hosting service
///
/// Implementations answer the two questions enrichment needs: which commit
/// last touched a path, and which pull requests contain a commit.
#[async_trait::async_trait]
pub trait HostingApi: Send + Sync {
    /// Get the service name
    fn name(&self) -> &str;

    /// Most recent commit touching `path` (relative to the repository root)
    ///
    /// Fails with `CommitLookupFailed` when no commit touches the path.
    async fn latest_commit(&self, path: &str) -> Result<CommitContext>;

    /// Pull requests containing the commit, in the order the service returns them
    async fn pulls_for_commit(&self, sha: &str) -> Result<Vec<PullRequestContext>>;
}
