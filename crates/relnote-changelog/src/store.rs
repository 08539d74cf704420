//! Fragment store reader

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use relnote_core::error::{FragmentError, Result};

/// File name suffixes recognized as fragments
const FRAGMENT_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Check if a file name denotes a fragment
pub fn is_fragment_file(name: &str) -> bool {
    FRAGMENT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// A fragment file in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
    /// File name within the store directory
    pub name: String,
    /// Full path on disk
    pub path: PathBuf,
}

/// Directory of changelog fragments
pub struct FragmentStore {
    dir: PathBuf,
}

impl FragmentStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List fragment files, sorted by name.
    ///
    /// Subdirectories and files without a fragment extension are skipped.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn list(&self) -> Result<Vec<FragmentFile>> {
        let unavailable = |source| FragmentError::StoreUnavailable {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(unavailable)? {
            let entry = entry.map_err(unavailable)?;
            let file_type = entry.file_type().map_err(unavailable)?;
            if file_type.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_fragment_file(&name) {
                debug!(file = %name, "skipping non-fragment file");
                continue;
            }

            files.push(FragmentFile {
                name,
                path: entry.path(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = files.len(), "listed fragment files");
        Ok(files)
    }

    /// Read the raw bytes of a fragment file; decoding is left to the parser
    pub fn read(&self, file: &FragmentFile) -> Result<Vec<u8>> {
        std::fs::read(&file.path).map_err(|source| {
            FragmentError::StoreUnavailable {
                path: file.path.clone(),
                source,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnote_core::RelnoteError;
    use tempfile::TempDir;

    #[test]
    fn test_is_fragment_file() {
        assert!(is_fragment_file("fix-dns.yml"));
        assert!(is_fragment_file("feat-plugin.yaml"));
        assert!(!is_fragment_file("README.md"));
        assert!(!is_fragment_file(".gitkeep"));
        assert!(!is_fragment_file("notes.yml.bak"));
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.yml"), "message: b").unwrap();
        std::fs::write(temp.path().join("a.yaml"), "message: a").unwrap();
        std::fs::write(temp.path().join("README.md"), "# notes").unwrap();
        std::fs::create_dir(temp.path().join("nested.yml")).unwrap();

        let store = FragmentStore::new(temp.path());
        let names: Vec<String> = store.list().unwrap().into_iter().map(|f| f.name).collect();

        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn test_read_content() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.yml"), "message: hello").unwrap();

        let store = FragmentStore::new(temp.path());
        let files = store.list().unwrap();
        assert_eq!(store.read(&files[0]).unwrap(), b"message: hello");
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let store = FragmentStore::new(temp.path().join("does-not-exist"));

        let err = store.list().unwrap_err();
        assert!(matches!(
            err,
            RelnoteError::Fragment(FragmentError::StoreUnavailable { .. })
        ));
    }
}
