//! relnote changelog - Changelog fragment aggregation and rendering
//!
//! This crate reads changelog fragments, enriches them with pull request and
//! ticket references, groups them by category and scope, and renders the
//! result through a template.

pub mod aggregator;
pub mod enricher;
pub mod generator;
pub mod parser;
pub mod renderer;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use aggregator::Aggregator;
pub use enricher::Enricher;
pub use generator::{ChangelogGenerator, GenerateOptions};
pub use parser::{FragmentParser, SourcedFragment};
pub use renderer::Renderer;
pub use store::{FragmentFile, FragmentStore};
pub use types::{AggregatedDocument, ChangelogEntry, Fragment, ScopeGroup};
