//! Changelog generation pipeline

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument};

use relnote_core::config::{validate_repo_slug, Config};
use relnote_core::error::Result;
use relnote_github::HostingApi;

use crate::aggregator::Aggregator;
use crate::enricher::Enricher;
use crate::parser::FragmentParser;
use crate::renderer::Renderer;
use crate::store::FragmentStore;
use crate::types::AggregatedDocument;

/// Inputs of one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Fragment directory, relative to the repository root
    pub changelog_path: PathBuf,
    /// System display name
    pub system: String,
    /// Repository root on disk
    pub repo_path: PathBuf,
    /// Repository identifier (`owner/name`)
    pub repo: String,
}

impl GenerateOptions {
    /// Fragment directory on disk
    pub fn fragment_dir(&self) -> PathBuf {
        self.repo_path.join(&self.changelog_path)
    }

    /// Path of a fragment file as the hosting API sees it
    pub fn remote_path(&self, file_name: &str) -> String {
        to_remote_path(&self.changelog_path.join(file_name))
    }
}

/// Lexically cleaned, forward-slash form of a relative path.
///
/// `.` components are dropped and `..` removes the segment before it.
fn to_remote_path(path: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => match segments.last() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push("..".to_string()),
            },
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    segments.join("/")
}

/// Changelog generator
pub struct ChangelogGenerator<'a> {
    api: &'a dyn HostingApi,
    config: &'a Config,
}

impl<'a> ChangelogGenerator<'a> {
    /// Create a new generator
    pub fn new(api: &'a dyn HostingApi, config: &'a Config) -> Self {
        Self { api, config }
    }

    /// Read, parse, enrich and group every fragment.
    ///
    /// Fragments are processed one at a time in listing order; the first
    /// failure aborts the run.
    #[instrument(skip(self, options), fields(dir = %options.changelog_path.display(), repo = %options.repo))]
    pub async fn collect(&self, options: &GenerateOptions) -> Result<AggregatedDocument> {
        validate_repo_slug(&options.repo)?;

        let store = FragmentStore::new(options.fragment_dir());
        let parser = FragmentParser::new(&self.config.scopes.default_scope);
        let enricher = Enricher::new(self.api, self.config, &options.repo)?;
        let mut aggregator = Aggregator::new(&self.config.scopes);

        let fragments = parser.load_all(&store)?;
        info!(count = fragments.len(), "collecting changelog fragments");

        for sourced in fragments {
            let path = options.remote_path(&sourced.file.name);
            let entry = enricher.enrich(&path, sourced.fragment).await?;
            debug!(
                file = %sourced.file.name,
                category = entry.category(),
                scope = entry.scope(),
                "fragment aggregated"
            );
            aggregator.add(entry);
        }

        Ok(aggregator.finish(&options.system))
    }

    /// Collect and render in one step
    #[instrument(skip(self, options, renderer), fields(template = renderer.name()))]
    pub async fn generate(&self, options: &GenerateOptions, renderer: &Renderer) -> Result<String> {
        let document = self.collect(options).await?;
        let output = renderer.render(&document)?;
        debug!(output_len = output.len(), "changelog generated");
        Ok(output)
    }
}
