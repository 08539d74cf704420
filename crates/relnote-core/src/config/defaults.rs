//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnote.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnote.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnote.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".relnote.toml",
        ALT_CONFIG_FILE,
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnote configuration

tracker:
  base_url: "https://konghq.atlassian.net/browse/"
  pattern: '[a-zA-Z]+-\d+'

scopes:
  default_scope: Default
  priority:
    Performance: 10
    Configuration: 20
    Core: 30
    PDK: 40
    Plugin: 50
    Admin API: 60
    Clustering: 70
    Default: 100

github:
  api_url: "https://api.github.com"
  web_url: "https://github.com"
  token_env: GITHUB_TOKEN
  pull_selection: last
  timeout_secs: 30
"#;
