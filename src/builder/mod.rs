//! Incremental index building.
//!
//! An index is threaded through a chain of calls in its serialized form: each
//! call decodes the previous output (or starts empty), upserts one document
//! and encodes the result again.
//!
//! # Examples
//!
//! ```
//! use lunrdex::builder::{IndexBuilder, IndexSource};
//! use lunrdex::document::Document;
//!
//! let builder = IndexBuilder::new();
//! let first = builder
//!     .upsert(IndexSource::Absent, &Document::new("agent.html", "Agent", "testagent", "The agent collects."))
//!     .unwrap();
//! let second = builder
//!     .upsert(IndexSource::Present(&first), &Document::new("fake.html", "Fake", "fake", "This is a fake test."))
//!     .unwrap();
//!
//! let index = builder.load(IndexSource::Present(&second)).unwrap();
//! assert_eq!(index.len(), 2);
//! ```

pub mod file;

use log::debug;

use crate::document::Document;
use crate::error::Result;
use crate::index::{Index, IndexConfig};

pub use file::{IndexFile, UpsertOutcome};

/// Where the index of an upsert comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource<'a> {
    /// No index yet; a new one is created.
    Absent,
    /// A serialized index produced by a previous call.
    Present(&'a str),
}

impl<'a> IndexSource<'a> {
    /// Map the nullable form: `None` and the empty string both mean "no index
    /// yet".
    pub fn from_option(serialized: Option<&'a str>) -> Self {
        match serialized {
            Some(json) if !json.is_empty() => IndexSource::Present(json),
            _ => IndexSource::Absent,
        }
    }
}

impl<'a> From<Option<&'a str>> for IndexSource<'a> {
    fn from(serialized: Option<&'a str>) -> Self {
        IndexSource::from_option(serialized)
    }
}

/// Builds indexes one document at a time.
///
/// The builder holds no index state; the configuration only shapes the index
/// created when the source is [`IndexSource::Absent`].
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    /// Create a builder with the default schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose new indexes use the given configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        IndexBuilder { config }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Decode the source, or create an empty index when it is absent.
    pub fn load(&self, source: IndexSource<'_>) -> Result<Index> {
        match source {
            IndexSource::Absent => {
                debug!("No index given; creating an empty one");
                Index::new(self.config.clone())
            }
            IndexSource::Present(json) => Index::from_json(json),
        }
    }

    /// Insert or replace a document and return the new serialized index.
    ///
    /// The source is never modified. On error no index is produced.
    pub fn upsert(&self, source: IndexSource<'_>, doc: &Document) -> Result<String> {
        doc.validate()?;
        let mut index = self.load(source)?;
        index.update_doc(doc)?;
        debug!("Upserted {} into index of {} documents", doc.id, index.len());
        index.to_json()
    }
}

/// Insert or replace a page in a serialized index.
///
/// `serialized` may be `None` or empty to start a new index. Returns the new
/// serialized index.
///
/// # Errors
///
/// [`crate::error::LunrdexError::MalformedIndex`] when `serialized` is not an index,
/// [`crate::error::LunrdexError::InvalidDocument`] when `id` is empty.
pub fn upsert(
    serialized: Option<&str>,
    id: &str,
    title: &str,
    keywords: &str,
    body: &str,
) -> Result<String> {
    let doc = Document::new(id, title, keywords, body);
    IndexBuilder::new().upsert(IndexSource::from_option(serialized), &doc)
}
