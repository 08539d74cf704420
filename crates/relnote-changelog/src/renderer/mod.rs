//! Document rendering

pub mod helpers;

use std::path::Path;

use minijinja::Environment;
use tracing::{debug, info, instrument};

use relnote_core::error::{RenderError, Result};

use crate::types::AggregatedDocument;

/// Built-in markdown template
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/changelog-markdown.md.j2");

const BUILTIN_TEMPLATE_NAME: &str = "changelog-markdown.md";

/// Renders an aggregated document through a template
#[derive(Debug, Clone)]
pub struct Renderer {
    name: String,
    source: String,
}

impl Renderer {
    /// Renderer using the built-in markdown template
    pub fn builtin() -> Self {
        Self::from_source(BUILTIN_TEMPLATE_NAME, BUILTIN_TEMPLATE)
    }

    /// Renderer for an in-memory template
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Renderer for a template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|source| RenderError::TemplateNotFound {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| BUILTIN_TEMPLATE_NAME.to_string());

        info!(path = %path.display(), "loaded template");
        Ok(Self::from_source(name, source))
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the document
    #[instrument(skip(self, document), fields(template = %self.name, entries = document.entry_count()))]
    pub fn render(&self, document: &AggregatedDocument) -> Result<String> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        helpers::register(&mut env);

        env.add_template(&self.name, &self.source)
            .map_err(template_error)?;
        let template = env.get_template(&self.name).map_err(template_error)?;
        let output = template.render(document).map_err(template_error)?;

        debug!(output_len = output.len(), "document rendered");
        Ok(output)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Surface helper misuse as its own error rather than a generic template failure
fn template_error(err: minijinja::Error) -> RenderError {
    let mut cause = std::error::Error::source(&err);
    while let Some(current) = cause {
        match current.downcast_ref::<RenderError>() {
            Some(RenderError::InvalidMappingArity(count)) => {
                return RenderError::InvalidMappingArity(*count)
            }
            Some(RenderError::InvalidMappingKey(key)) => {
                return RenderError::InvalidMappingKey(key.clone())
            }
            _ => cause = current.source(),
        }
    }

    RenderError::Template(err.to_string())
}
