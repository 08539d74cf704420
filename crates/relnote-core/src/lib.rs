//! relnote core - configuration and error handling
//!
//! This crate provides the configuration model, its loader and validation,
//! and the error taxonomy shared by the relnote crates.

pub mod config;
pub mod error;

pub use config::{Config, GitHubConfig, PullSelection, ScopeConfig, TrackerConfig};
pub use error::{ConfigError, FragmentError, HostingError, RelnoteError, RenderError, Result};
