//! Generate command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use relnote_changelog::{ChangelogGenerator, GenerateOptions, Renderer};
use relnote_core::config::{load_config_or_default, Config};
use relnote_core::RelnoteError;
use relnote_github::GitHubClient;

use crate::cli::{output, Cli, OutputFormat};

/// Generate the release notes document
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Fragment directory relative to the repository (e.g. changelog/unreleased/kong)
    #[arg(long, visible_alias = "changelog_path", value_name = "DIR")]
    pub changelog_path: PathBuf,

    /// System name shown in the document (e.g. Kong)
    #[arg(long)]
    pub system: String,

    /// Repository root on disk
    #[arg(long, visible_alias = "repo_path", value_name = "PATH")]
    pub repo_path: PathBuf,

    /// Repository identifier (e.g. Kong/kong)
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: String,

    /// Template file (overrides the configured template)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Output file (default: print to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            changelog_path = %self.changelog_path.display(),
            repo = %self.repo,
            "executing generate command"
        );

        let (config, config_path) = load_config_or_default(&self.repo_path)?;
        let template = resolve_template(
            self.template.as_deref(),
            &config,
            config_path.as_deref(),
            &self.repo_path,
        );

        let client = GitHubClient::from_env(&config.github, &self.repo).map_err(RelnoteError::from)?;
        if !client.is_authenticated() && !cli.quiet {
            output::warning(&format!(
                "{} is not set, using unauthenticated API requests",
                config.github.token_env
            ));
        }

        let options = GenerateOptions {
            changelog_path: self.changelog_path.clone(),
            system: self.system.clone(),
            repo_path: self.repo_path.clone(),
            repo: self.repo.clone(),
        };

        let runtime = tokio::runtime::Runtime::new()?;
        let generator = ChangelogGenerator::new(&client, &config);
        let content = runtime.block_on(produce(
            &generator,
            &options,
            cli.format,
            template.as_deref(),
        ))?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &content)?;
                if !cli.quiet {
                    output::success(&format!(
                        "Wrote release notes to {}",
                        output::path_style().apply_to(path.display())
                    ));
                }
            }
            None => print!("{}", content),
        }

        Ok(())
    }
}

/// Build the command output. The template is only loaded for text output.
async fn produce(
    generator: &ChangelogGenerator<'_>,
    options: &GenerateOptions,
    format: OutputFormat,
    template: Option<&Path>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let document = generator.collect(options).await?;
            Ok(format!("{}\n", serde_json::to_string_pretty(&document)?))
        }
        OutputFormat::Text => {
            let renderer = match template {
                Some(path) => Renderer::from_file(path)?,
                None => Renderer::builtin(),
            };
            Ok(generator.generate(options, &renderer).await?)
        }
    }
}

/// Pick the template file: the command line wins, then the configured
/// template (relative to the config file's directory), else none.
fn resolve_template(
    cli_template: Option<&Path>,
    config: &Config,
    config_path: Option<&Path>,
    repo_path: &Path,
) -> Option<PathBuf> {
    if let Some(path) = cli_template {
        return Some(path.to_path_buf());
    }

    let configured = config.template.as_ref()?;
    let base = config_path.and_then(Path::parent).unwrap_or(repo_path);
    Some(base.join(configured))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnote_core::error::RenderError;
    use relnote_core::GitHubConfig;
    use tempfile::TempDir;

    fn empty_repo() -> (TempDir, GenerateOptions) {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("changelog")).unwrap();
        let options = GenerateOptions {
            changelog_path: PathBuf::from("changelog"),
            system: "Kong".to_string(),
            repo_path: temp.path().to_path_buf(),
            repo: "Kong/kong".to_string(),
        };
        (temp, options)
    }

    fn offline_client() -> GitHubClient {
        GitHubClient::new(&GitHubConfig::default(), "Kong/kong", None).unwrap()
    }

    #[tokio::test]
    async fn test_json_output_ignores_missing_template() {
        let (temp, options) = empty_repo();
        let client = offline_client();
        let config = Config::default();
        let generator = ChangelogGenerator::new(&client, &config);
        let missing = temp.path().join("missing.j2");

        let content = produce(&generator, &options, OutputFormat::Json, Some(missing.as_path()))
            .await
            .unwrap();
        assert!(content.contains("\"system\": \"Kong\""));
    }

    #[tokio::test]
    async fn test_text_output_requires_template() {
        let (temp, options) = empty_repo();
        let client = offline_client();
        let config = Config::default();
        let generator = ChangelogGenerator::new(&client, &config);
        let missing = temp.path().join("missing.j2");

        let err = produce(&generator, &options, OutputFormat::Text, Some(missing.as_path()))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RelnoteError>(),
            Some(RelnoteError::Render(RenderError::TemplateNotFound { .. }))
        ));

        let content = produce(&generator, &options, OutputFormat::Text, None)
            .await
            .unwrap();
        assert!(content.contains("## Kong"));
    }

    #[test]
    fn test_template_from_command_line_wins() {
        let config = Config {
            template: Some(PathBuf::from("configured.j2")),
            ..Config::default()
        };
        let resolved = resolve_template(
            Some(Path::new("cli.j2")),
            &config,
            None,
            Path::new("/repo"),
        );
        assert_eq!(resolved, Some(PathBuf::from("cli.j2")));
    }

    #[test]
    fn test_configured_template_relative_to_config_file() {
        let config = Config {
            template: Some(PathBuf::from("notes.md.j2")),
            ..Config::default()
        };
        let resolved = resolve_template(
            None,
            &config,
            Some(Path::new("/repo/.github/relnote.yaml")),
            Path::new("/repo"),
        );
        assert_eq!(resolved, Some(PathBuf::from("/repo/.github/notes.md.j2")));
    }

    #[test]
    fn test_configured_template_without_config_file() {
        let config = Config {
            template: Some(PathBuf::from("notes.md.j2")),
            ..Config::default()
        };
        let resolved = resolve_template(None, &config, None, Path::new("/repo"));
        assert_eq!(resolved, Some(PathBuf::from("/repo/notes.md.j2")));
    }

    #[test]
    fn test_builtin_template_by_default() {
        let resolved = resolve_template(None, &Config::default(), None, Path::new("/repo"));
        assert!(resolved.is_none());
    }
}
