//! relnote GitHub - hosting API access for fragment enrichment
//!
//! This crate answers which commit introduced a changelog fragment and which
//! pull requests carried that commit.

mod api;
mod client;
pub mod types;

pub use api::{HostingApi, Result};
pub use client::GitHubClient;
pub use types::{CommitContext, PullRequestContext};
