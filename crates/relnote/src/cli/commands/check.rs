//! Check command - parse fragments without contacting the hosting API

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use relnote_changelog::{FragmentParser, FragmentStore, SourcedFragment};
use relnote_core::config::{load_config_or_default, ScopeConfig};

use crate::cli::{output, Cli, OutputFormat};

/// Parse every fragment and report counts per category
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Fragment directory relative to the repository (e.g. changelog/unreleased/kong)
    #[arg(long, visible_alias = "changelog_path", value_name = "DIR")]
    pub changelog_path: PathBuf,

    /// Repository root on disk
    #[arg(long, visible_alias = "repo_path", value_name = "PATH", default_value = ".")]
    pub repo_path: PathBuf,
}

/// Result of checking a fragment directory
#[derive(Debug, Default)]
struct CheckSummary {
    total: usize,
    categories: BTreeMap<String, usize>,
    warnings: Vec<String>,
}

impl CheckCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(changelog_path = %self.changelog_path.display(), "executing check command");

        let (config, _) = load_config_or_default(&self.repo_path)?;
        let store = FragmentStore::new(self.repo_path.join(&self.changelog_path));
        let parser = FragmentParser::new(&config.scopes.default_scope);
        let fragments = parser.load_all(&store)?;

        let summary = summarize(&fragments, &config.scopes);

        match cli.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "fragments": summary.total,
                    "categories": summary.categories,
                    "warnings": summary.warnings,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                for (category, count) in &summary.categories {
                    println!("{}", output::key_value(category, &count.to_string()));
                }
                if !cli.quiet {
                    for warning in &summary.warnings {
                        output::warning(warning);
                    }
                    output::success(&format!(
                        "{} fragments parsed in {}",
                        summary.total,
                        output::path_style().apply_to(store.dir().display())
                    ));
                }
            }
        }

        Ok(())
    }
}

fn summarize(fragments: &[SourcedFragment], scopes: &ScopeConfig) -> CheckSummary {
    let mut summary = CheckSummary {
        total: fragments.len(),
        ..CheckSummary::default()
    };

    for sourced in fragments {
        let fragment = &sourced.fragment;
        *summary
            .categories
            .entry(fragment.category.clone())
            .or_default() += 1;

        if fragment.category.is_empty() {
            summary
                .warnings
                .push(format!("{} has no type", sourced.file.name));
        }
        if !scopes.priority.contains_key(&fragment.scope) {
            summary.warnings.push(format!(
                "{} uses unranked scope '{}'",
                sourced.file.name, fragment.scope
            ));
        }
    }

    summary
}
