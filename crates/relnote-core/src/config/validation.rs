//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_tracker(config)?;
    validate_scopes(config)?;
    validate_github(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Validate an `owner/name` repository identifier
pub fn validate_repo_slug(repo: &str) -> Result<()> {
    let valid = match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    };

    if !valid {
        return Err(ConfigError::InvalidValue {
            field: "repo".to_string(),
            message: format!("expected owner/name, got '{}'", repo),
        }
        .into());
    }

    Ok(())
}

fn validate_tracker(config: &Config) -> Result<()> {
    if config.tracker.base_url.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "tracker.base_url".to_string(),
            message: "base URL cannot be empty".to_string(),
        }
        .into());
    }

    if let Err(e) = Regex::new(&config.tracker.pattern) {
        return Err(ConfigError::InvalidValue {
            field: "tracker.pattern".to_string(),
            message: e.to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_scopes(config: &Config) -> Result<()> {
    if config.scopes.default_scope.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "scopes.default_scope".to_string(),
            message: "default scope cannot be empty".to_string(),
        }
        .into());
    }

    if !config
        .scopes
        .priority
        .contains_key(&config.scopes.default_scope)
    {
        return Err(ConfigError::InvalidValue {
            field: "scopes.priority".to_string(),
            message: format!(
                "must rank the default scope '{}'",
                config.scopes.default_scope
            ),
        }
        .into());
    }

    Ok(())
}

fn validate_github(config: &Config) -> Result<()> {
    for (field, value) in [
        ("github.api_url", &config.github.api_url),
        ("github.web_url", &config.github.web_url),
    ] {
        if url::Url::parse(value).is_err() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("'{}' is not a valid URL", value),
            }
            .into());
        }
    }

    if config.github.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "github.timeout_secs".to_string(),
            message: "timeout must be at least one second".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_pattern() {
        let mut config = Config::default();
        config.tracker.pattern = "[A-Z+-(".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unranked_default_scope() {
        let mut config = Config::default();
        config.scopes.default_scope = "Misc".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_api_url() {
        let mut config = Config::default();
        config.github.api_url = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_repo_slug() {
        assert!(validate_repo_slug("Kong/kong").is_ok());
        assert!(validate_repo_slug("kong").is_err());
        assert!(validate_repo_slug("/kong").is_err());
        assert!(validate_repo_slug("Kong/").is_err());
        assert!(validate_repo_slug("Kong/kong/extra").is_err());
    }
}
