//! Fragment parsing

use serde::Deserialize;
use tracing::{debug, instrument};

use relnote_core::error::{FragmentError, Result};

use crate::store::{FragmentFile, FragmentStore};
use crate::types::Fragment;

/// On-disk fragment layout. Every field may be absent or null.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFragment {
    message: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    scope: Option<String>,
    prs: Option<Vec<u64>>,
    githubs: Option<Vec<u64>>,
    jiras: Option<Vec<String>>,
}

/// A parsed fragment together with the file it came from
#[derive(Debug, Clone)]
pub struct SourcedFragment {
    /// Source file
    pub file: FragmentFile,
    /// Parsed fragment
    pub fragment: Fragment,
}

/// Parser for YAML changelog fragments
pub struct FragmentParser {
    default_scope: String,
}

impl FragmentParser {
    /// Create a parser assigning `default_scope` to fragments without one
    pub fn new(default_scope: impl Into<String>) -> Self {
        Self {
            default_scope: default_scope.into(),
        }
    }

    /// Parse one fragment. `file` names the source in error messages.
    ///
    /// Content that is not valid UTF-8 is malformed like any other decode failure.
    pub fn parse(&self, file: &str, content: impl AsRef<[u8]>) -> Result<Fragment> {
        let content = content.as_ref();
        let raw: RawFragment = if content.iter().all(u8::is_ascii_whitespace) {
            RawFragment::default()
        } else {
            serde_yaml::from_slice(content).map_err(|source| FragmentError::MalformedFragment {
                file: file.to_string(),
                source,
            })?
        };

        let scope = raw
            .scope
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.default_scope.clone());

        Ok(Fragment {
            message: raw.message.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            scope,
            prs: raw.prs.unwrap_or_default(),
            githubs: raw.githubs.unwrap_or_default(),
            jiras: raw.jiras.unwrap_or_default(),
        })
    }

    /// Read and parse every fragment in the store, in listing order.
    ///
    /// Stops at the first unreadable or malformed fragment.
    #[instrument(skip(self, store), fields(dir = %store.dir().display()))]
    pub fn load_all(&self, store: &FragmentStore) -> Result<Vec<SourcedFragment>> {
        let files = store.list()?;
        let mut fragments = Vec::with_capacity(files.len());

        for file in files {
            let content = store.read(&file)?;
            let fragment = self.parse(&file.name, content)?;
            debug!(
                file = %file.name,
                category = %fragment.category,
                scope = %fragment.scope,
                "parsed fragment"
            );
            fragments.push(SourcedFragment { file, fragment });
        }

        Ok(fragments)
    }
}

impl Default for FragmentParser {
    fn default() -> Self {
        Self::new("Default")
    }
}
