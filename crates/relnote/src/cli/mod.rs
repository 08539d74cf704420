//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{CheckCommand, CompletionsCommand, GenerateCommand, InitCommand};

/// relnote - Release notes from changelog fragment directories
#[derive(Debug, Parser)]
#[command(name = "relnote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the release notes document
    Generate(GenerateCommand),

    /// Parse every fragment without contacting the hosting API
    Check(CheckCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Generate(ref cmd) => cmd.execute(&self),
            Commands::Check(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "relnote",
            "--format",
            "json",
            "generate",
            "--changelog-path",
            "changelog/unreleased/kong",
            "--system",
            "Kong",
            "--repo-path",
            "/src/kong",
            "--repo",
            "Kong/kong",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Generate(cmd) => {
                assert_eq!(cmd.changelog_path, PathBuf::from("changelog/unreleased/kong"));
                assert_eq!(cmd.system, "Kong");
                assert_eq!(cmd.repo_path, PathBuf::from("/src/kong"));
                assert_eq!(cmd.repo, "Kong/kong");
                assert!(cmd.template.is_none());
                assert!(cmd.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_underscore_aliases() {
        let cli = Cli::try_parse_from([
            "relnote",
            "generate",
            "--changelog_path",
            "changelog",
            "--system",
            "Kong",
            "--repo_path",
            ".",
            "--repo",
            "Kong/kong",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn test_generate_requires_parameters() {
        let result = Cli::try_parse_from(["relnote", "generate", "--system", "Kong"]);
        assert!(result.is_err());
    }
}
