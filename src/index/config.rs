//! Configuration of a new index.
//!
//! A loaded index carries its configuration in the serialized form; this type
//! only decides what a brand-new index looks like.

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::DEFAULT_FILTERS;
use crate::document::{BODY_FIELD, ID_FIELD, KEYWORDS_FIELD, TITLE_FIELD};
use crate::error::{LunrdexError, Result};

/// Configuration for a new index.
///
/// The default is the fixed schema every index in a call chain must share:
/// searchable fields `title`, `body`, `keywords` (in that order), reference
/// field `id`, full document storage and the elasticlunr pipeline.
///
/// # Example
///
/// ```
/// use lunrdex::index::config::IndexConfig;
///
/// let config = IndexConfig::default();
/// assert_eq!(config.fields, vec!["title", "body", "keywords"]);
/// assert_eq!(config.ref_field, "id");
/// assert!(config.save_document);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Searchable fields, each with its own inverted index.
    pub fields: Vec<String>,

    /// Field holding the unique document reference.
    pub ref_field: String,

    /// Whether the original documents are kept in the document store.
    ///
    /// When disabled the store only records that a reference exists, and
    /// replacing a document needs a sweep over every posting list.
    pub save_document: bool,

    /// Names of the pipeline filters, in order.
    pub pipeline: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            fields: vec![
                TITLE_FIELD.to_string(),
                BODY_FIELD.to_string(),
                KEYWORDS_FIELD.to_string(),
            ],
            ref_field: ID_FIELD.to_string(),
            save_document: true,
            pipeline: DEFAULT_FILTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IndexConfig {
    /// Check the configuration for structural problems.
    pub fn validate(&self) -> Result<()> {
        if self.ref_field.is_empty() {
            return Err(LunrdexError::other("Invalid configuration: empty ref field"));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.is_empty() {
                return Err(LunrdexError::other(
                    "Invalid configuration: empty field name",
                ));
            }
            if self.fields[..i].contains(field) {
                return Err(LunrdexError::other(format!(
                    "Invalid configuration: duplicate field {field}"
                )));
            }
        }
        Ok(())
    }
}
