//! Error types for relnote

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnoteError
pub type Result<T> = std::result::Result<T, RelnoteError>;

/// Main error type for relnote operations
///
/// Every variant is fatal to a run: there is no partial-success mode and
/// nothing is retried.
#[derive(Debug, Error)]
pub enum RelnoteError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fragment store and parsing errors
    #[error(transparent)]
    Fragment(#[from] FragmentError),

    /// Hosting API errors
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// Rendering errors
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Fragment store and fragment parsing errors
#[derive(Debug, Error)]
pub enum FragmentError {
    /// The fragment directory (or a file in it) could not be read
    #[error("Fragment store unavailable at {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fragment could not be decoded
    #[error("Malformed fragment {file}: {source}")]
    MalformedFragment {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Hosting API errors
#[derive(Debug, Error)]
pub enum HostingError {
    /// Looking up the commit that introduced a fragment failed
    #[error("Commit lookup failed for {path}: {reason}")]
    CommitLookupFailed { path: String, reason: String },

    /// Looking up the pull request for a commit failed
    #[error("Pull request lookup failed for commit {sha}: {reason}")]
    PullLookupFailed { sha: String, reason: String },

    /// The API client could not be constructed
    #[error("Hosting client error: {0}")]
    Client(String),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// `dict` called with an odd number of arguments
    #[error("invalid dictionary call: expected key/value pairs, got {0} arguments")]
    InvalidMappingArity(usize),

    /// `dict` key that is neither a string nor a sequence of strings
    #[error("invalid dictionary key: {0}")]
    InvalidMappingKey(String),

    /// Template file could not be read
    #[error("Template not found at {path}: {source}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template failed to compile or evaluate
    #[error("Template error: {0}")]
    Template(String),
}
