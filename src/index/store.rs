//! Document store of an index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Keeps the indexed documents and the token count of each of their fields.
///
/// When `save` is disabled only the reference is remembered; the stored value
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStore {
    /// Stored documents by reference.
    docs: BTreeMap<String, Option<Document>>,

    /// Token count per field, by reference.
    #[serde(rename = "docInfo")]
    doc_info: BTreeMap<String, BTreeMap<String, usize>>,

    /// Number of documents.
    length: usize,

    /// Whether documents are stored in full.
    save: bool,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DocumentStore {
    pub fn new(save: bool) -> Self {
        DocumentStore {
            docs: BTreeMap::new(),
            doc_info: BTreeMap::new(),
            length: 0,
            save,
        }
    }

    /// Whether documents are stored in full.
    pub fn is_doc_stored(&self) -> bool {
        self.save
    }

    /// Add or replace a document.
    ///
    /// The length only grows for references not seen before.
    pub fn add_doc(&mut self, doc_ref: &str, doc: &Document) {
        let stored = self.save.then(|| doc.clone());
        if self.docs.insert(doc_ref.to_string(), stored).is_none() {
            self.length += 1;
        }
    }

    /// Remove a document and its field lengths. Returns whether it existed.
    pub fn remove_doc(&mut self, doc_ref: &str) -> bool {
        if self.docs.remove(doc_ref).is_none() {
            return false;
        }
        self.doc_info.remove(doc_ref);
        self.length = self.length.saturating_sub(1);
        true
    }

    /// The stored document, if documents are saved and the reference exists.
    pub fn get_doc(&self, doc_ref: &str) -> Option<&Document> {
        self.docs.get(doc_ref).and_then(Option::as_ref)
    }

    pub fn has_doc(&self, doc_ref: &str) -> bool {
        self.docs.contains_key(doc_ref)
    }

    /// Record the number of tokens a field of a document produced.
    pub fn add_field_length(&mut self, doc_ref: &str, field: &str, length: usize) {
        if !self.has_doc(doc_ref) {
            return;
        }
        self.doc_info
            .entry(doc_ref.to_string())
            .or_default()
            .insert(field.to_string(), length);
    }

    /// Number of tokens a field of a document produced, zero when unknown.
    pub fn field_length(&self, doc_ref: &str, field: &str) -> usize {
        self.doc_info
            .get(doc_ref)
            .and_then(|info| info.get(field))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// References of all documents, in sorted order.
    pub fn refs(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }
}
