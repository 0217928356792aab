//! An index kept in a file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::builder::{IndexBuilder, IndexSource};
use crate::document::Document;
use crate::error::Result;
use crate::index::Index;

/// What an upsert into an index file did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Whether a document with the same id was replaced.
    pub replaced: bool,
    /// Number of documents after the upsert.
    pub total_documents: usize,
}

/// A serialized index stored in a file.
///
/// A missing file counts as "no index yet". Writes go to a sibling temporary
/// file that is then renamed over the index file.
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
    builder: IndexBuilder,
}

impl IndexFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        IndexFile {
            path: path.as_ref().to_path_buf(),
            builder: IndexBuilder::new(),
        }
    }

    /// Use a custom builder for indexes created by this file.
    pub fn with_builder(mut self, builder: IndexBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the serialized index, `None` if the file does not exist.
    pub fn read(&self) -> Result<Option<String>> {
        if !self.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    /// Load the index, creating an empty one if the file does not exist.
    pub fn load(&self) -> Result<Index> {
        let serialized = self.read()?;
        self.builder
            .load(IndexSource::from_option(serialized.as_deref()))
    }

    /// Insert or replace a document and write the index back.
    ///
    /// Nothing is written when the document or the existing file is rejected.
    pub fn upsert(&self, doc: &Document) -> Result<UpsertOutcome> {
        doc.validate()?;
        let mut index = self.load()?;
        let replaced = index.has_doc(&doc.id);
        index.update_doc(doc)?;
        self.write(&index.to_json()?)?;

        debug!("Added {} to search index {}", doc.id, self.path.display());
        Ok(UpsertOutcome {
            replaced,
            total_documents: index.len(),
        })
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut temp_name = self.path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_creates_and_updates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = IndexFile::new(temp_dir.path().join("search_index.json"));
        assert!(file.read().unwrap().is_none());

        let outcome = file.upsert(&Document::new("a.html", "Agent", "", "")).unwrap();
        assert!(file.exists());
        assert_eq!(
            outcome,
            UpsertOutcome {
                replaced: false,
                total_documents: 1
            }
        );
        file.upsert(&Document::new("b.html", "Fake", "", "")).unwrap();
        let outcome = file.upsert(&Document::new("a.html", "Agent 2", "", "")).unwrap();
        assert!(outcome.replaced);
        assert_eq!(outcome.total_documents, 2);

        let index = file.load().unwrap();
        assert_eq!(index.refs().collect::<Vec<_>>(), vec!["a.html", "b.html"]);
        assert!(!temp_dir.path().join("search_index.json.tmp").exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file = IndexFile::new(temp_dir.path().join("public").join("index.json"));
        file.upsert(&Document::new("a.html", "", "", "")).unwrap();
        assert!(file.exists());
    }

    #[test]
    fn test_malformed_file_is_left_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");
        fs::write(&path, "not json").unwrap();

        let err = IndexFile::new(&path)
            .upsert(&Document::new("a.html", "", "", ""))
            .unwrap_err();
        assert!(err.is_malformed_index());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_custom_builder() {
        let temp_dir = TempDir::new().unwrap();
        let file = IndexFile::new(temp_dir.path().join("index.json")).with_builder(
            IndexBuilder::with_config(crate::index::IndexConfig {
                save_document: false,
                ..Default::default()
            }),
        );
        assert_eq!(file.path(), temp_dir.path().join("index.json"));

        file.upsert(&Document::new("a.html", "Agent", "", "")).unwrap();
        let index = file.load().unwrap();
        assert!(index.has_doc("a.html"));
        assert!(index.get_doc("a.html").is_none());
    }

    #[test]
    fn test_empty_file_starts_new_index() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");
        fs::write(&path, "").unwrap();

        let file = IndexFile::new(&path);
        file.upsert(&Document::new("a.html", "", "", "")).unwrap();
        assert_eq!(file.load().unwrap().len(), 1);
    }
}
