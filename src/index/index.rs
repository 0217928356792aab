//! In-memory index with the elasticlunr 0.9.5 serialized layout.

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::document::Document;
use crate::error::{LunrdexError, Result};
use crate::index::config::IndexConfig;
use crate::index::inverted::{InvertedIndex, Postings};
use crate::index::store::DocumentStore;

/// Version string written into every serialized index.
pub const ELASTICLUNR_VERSION: &str = "0.9.5";

/// Statistics about an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of documents in the index.
    pub doc_count: usize,

    /// Distinct tokens with at least one posting, per field.
    pub fields: Vec<FieldStats>,
}

/// Statistics about one searchable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldStats {
    /// Field name.
    pub name: String,

    /// Number of distinct indexed tokens.
    pub token_count: usize,
}

/// Analyzed form of one field of a document.
#[derive(Debug)]
struct FieldTerms {
    field: String,
    length: usize,
    frequencies: Vec<(String, f64)>,
}

#[derive(Serialize)]
struct IndexRecord<'a> {
    version: &'a str,
    fields: &'a [String],
    #[serde(rename = "ref")]
    ref_field: &'a str,
    #[serde(rename = "documentStore")]
    document_store: &'a DocumentStore,
    index: &'a BTreeMap<String, InvertedIndex>,
    pipeline: Vec<String>,
}

#[derive(Deserialize)]
struct IndexData {
    version: String,
    fields: Vec<String>,
    #[serde(rename = "ref")]
    ref_field: String,
    #[serde(rename = "documentStore")]
    document_store: DocumentStore,
    index: BTreeMap<String, InvertedIndex>,
    pipeline: Vec<String>,
}

/// A full-text index over a fixed set of fields.
///
/// Every field has its own [`InvertedIndex`], so a token found in the title
/// never matches a lookup in the body. Documents are addressed by the value
/// of the reference field.
///
/// # Example
///
/// ```
/// use lunrdex::document::Document;
/// use lunrdex::index::{Index, IndexConfig};
///
/// let mut index = Index::new(IndexConfig::default()).unwrap();
/// index
///     .update_doc(&Document::new("agent.html", "Agent", "testagent", "The agent runs."))
///     .unwrap();
///
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.matching_refs("body", "running").unwrap(), vec!["agent.html"]);
/// assert!(index.matching_refs("title", "running").unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Index {
    version: String,
    fields: Vec<String>,
    ref_field: String,
    document_store: DocumentStore,
    index: BTreeMap<String, InvertedIndex>,
    pipeline: PipelineAnalyzer,
}

impl Index {
    /// Create an empty index.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = PipelineAnalyzer::from_filter_names(&config.pipeline)?;
        let index = config
            .fields
            .iter()
            .map(|field| (field.clone(), InvertedIndex::new()))
            .collect();

        Ok(Index {
            version: ELASTICLUNR_VERSION.to_string(),
            fields: config.fields,
            ref_field: config.ref_field,
            document_store: DocumentStore::new(config.save_document),
            index,
            pipeline,
        })
    }

    /// Decode a serialized index.
    ///
    /// Anything that is not a structurally valid index is reported as
    /// [`LunrdexError::MalformedIndex`].
    pub fn from_json(json: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        // Trie depth follows token length.
        deserializer.disable_recursion_limit();
        let data = IndexData::deserialize(&mut deserializer)
            .and_then(|data| deserializer.end().map(|()| data))
            .map_err(|e| LunrdexError::malformed_index(e.to_string()))?;

        Self::from_data(data)
    }

    fn from_data(data: IndexData) -> Result<Self> {
        let config = IndexConfig {
            fields: data.fields,
            ref_field: data.ref_field,
            save_document: data.document_store.is_doc_stored(),
            pipeline: data.pipeline,
        };
        config
            .validate()
            .map_err(|e| LunrdexError::malformed_index(e.to_string()))?;

        if let Some(field) = config.fields.iter().find(|f| !data.index.contains_key(*f)) {
            return Err(LunrdexError::malformed_index(format!(
                "no inverted index for field {field}"
            )));
        }
        if let Some(field) = data.index.keys().find(|f| !config.fields.contains(f)) {
            return Err(LunrdexError::malformed_index(format!(
                "inverted index for undeclared field {field}"
            )));
        }

        let pipeline = PipelineAnalyzer::from_filter_names(&config.pipeline)
            .map_err(|e| LunrdexError::malformed_index(e.to_string()))?;

        if data.version != ELASTICLUNR_VERSION {
            warn!(
                "Version mismatch when loading serialized index. Current version of lunrdex writes {}; index was built with {}",
                ELASTICLUNR_VERSION, data.version
            );
        }

        debug!(
            "Loaded index with {} documents and fields {:?}",
            data.document_store.len(),
            config.fields
        );

        Ok(Index {
            version: data.version,
            fields: config.fields,
            ref_field: config.ref_field,
            document_store: data.document_store,
            index: data.index,
            pipeline,
        })
    }

    /// Encode the index in the elasticlunr layout.
    ///
    /// The written version is always the current one.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.record())?)
    }

    fn record(&self) -> IndexRecord<'_> {
        IndexRecord {
            version: ELASTICLUNR_VERSION,
            fields: &self.fields,
            ref_field: &self.ref_field,
            document_store: &self.document_store,
            index: &self.index,
            pipeline: self.pipeline.filter_names(),
        }
    }

    /// Insert a document, replacing any previous version with the same
    /// reference.
    ///
    /// Both versions are analyzed before the index is touched, so an error
    /// leaves the index unchanged.
    pub fn update_doc(&mut self, doc: &Document) -> Result<()> {
        let doc_ref = self.doc_ref(doc)?.to_string();
        let new_terms = self.analyze_document(doc)?;

        if self.remove_doc_by_ref(&doc_ref)? {
            debug!("Replaced previous version of {doc_ref}");
        }

        self.add_analyzed(&doc_ref, doc, new_terms);
        Ok(())
    }

    /// Remove a document and all of its postings. Returns whether it existed.
    ///
    /// The stored version is analyzed before anything is removed.
    pub(crate) fn remove_doc_by_ref(&mut self, doc_ref: &str) -> Result<bool> {
        if !self.document_store.has_doc(doc_ref) {
            return Ok(false);
        }
        let old_terms = self
            .document_store
            .get_doc(doc_ref)
            .map(|old| self.analyze_document(old))
            .transpose()?;
        self.remove_analyzed(doc_ref, old_terms);
        Ok(true)
    }

    fn doc_ref<'d>(&self, doc: &'d Document) -> Result<&'d str> {
        doc.validate()?;
        match doc.field(&self.ref_field) {
            Some(value) if !value.is_empty() => Ok(value),
            Some(_) => Err(LunrdexError::invalid_document(format!(
                "document {} must not be empty",
                self.ref_field
            ))),
            None => Err(LunrdexError::invalid_document(format!(
                "document has no field {}",
                self.ref_field
            ))),
        }
    }

    fn analyze_document(&self, doc: &Document) -> Result<Vec<FieldTerms>> {
        self.fields
            .iter()
            .map(|field| {
                let text = doc.field(field).unwrap_or_default();
                let terms = self.pipeline.terms(text)?;

                let mut counts: AHashMap<String, usize> = AHashMap::new();
                for term in &terms {
                    *counts.entry(term.clone()).or_insert(0) += 1;
                }

                Ok(FieldTerms {
                    field: field.clone(),
                    length: terms.len(),
                    frequencies: counts
                        .into_iter()
                        .map(|(term, count)| (term, (count as f64).sqrt()))
                        .collect(),
                })
            })
            .collect()
    }

    fn add_analyzed(&mut self, doc_ref: &str, doc: &Document, terms: Vec<FieldTerms>) {
        self.document_store.add_doc(doc_ref, doc);

        let mut token_count = 0;
        for field_terms in terms {
            self.document_store
                .add_field_length(doc_ref, &field_terms.field, field_terms.length);
            token_count += field_terms.length;

            let inverted = self.index.entry(field_terms.field).or_default();
            for (term, tf) in &field_terms.frequencies {
                inverted.add_token(term, doc_ref, *tf);
            }
        }

        debug!("Indexed document {doc_ref} ({token_count} tokens)");
    }

    /// Without stored documents the old tokens are unknown and every trie is
    /// swept for the reference.
    fn remove_analyzed(&mut self, doc_ref: &str, old_terms: Option<Vec<FieldTerms>>) {
        match old_terms {
            Some(terms) => {
                for field_terms in terms {
                    if let Some(inverted) = self.index.get_mut(&field_terms.field) {
                        for (term, _) in &field_terms.frequencies {
                            inverted.remove_token(term, doc_ref);
                        }
                    }
                }
            }
            None => {
                for inverted in self.index.values_mut() {
                    inverted.purge_ref(doc_ref);
                }
            }
        }
        self.document_store.remove_doc(doc_ref);
    }

    /// Get a stored document.
    pub fn get_doc(&self, doc_ref: &str) -> Option<&Document> {
        self.document_store.get_doc(doc_ref)
    }

    pub fn has_doc(&self, doc_ref: &str) -> bool {
        self.document_store.has_doc(doc_ref)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.document_store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_store.is_empty()
    }

    /// References of all documents, in sorted order.
    pub fn refs(&self) -> impl Iterator<Item = &str> {
        self.document_store.refs()
    }

    /// Searchable fields, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn ref_field(&self) -> &str {
        &self.ref_field
    }

    /// Version the index was loaded with.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.pipeline
    }

    pub fn document_store(&self) -> &DocumentStore {
        &self.document_store
    }

    /// Inverted index of a field.
    pub fn inverted_index(&self, field: &str) -> Option<&InvertedIndex> {
        self.index.get(field)
    }

    /// Postings of an already analyzed token in a field.
    pub fn postings(&self, field: &str, token: &str) -> Option<&Postings> {
        self.index.get(field).and_then(|inverted| inverted.get_docs(token))
    }

    /// Number of documents whose field contains an already analyzed token.
    pub fn doc_freq(&self, field: &str, token: &str) -> usize {
        self.index
            .get(field)
            .map_or(0, |inverted| inverted.get_doc_freq(token))
    }

    /// Number of tokens a field of a document produced.
    pub fn field_length(&self, doc_ref: &str, field: &str) -> usize {
        self.document_store.field_length(doc_ref, field)
    }

    /// References of the documents whose field contains every token of
    /// `text`, after running it through the index pipeline.
    ///
    /// This is a plain conjunctive lookup without scoring. Text that analyzes
    /// to no tokens matches nothing.
    pub fn matching_refs(&self, field: &str, text: &str) -> Result<Vec<String>> {
        let inverted = self
            .index
            .get(field)
            .ok_or_else(|| LunrdexError::not_found(format!("field {field}")))?;
        let terms = self.pipeline.terms(text)?;

        let Some((first, rest)) = terms.split_first() else {
            return Ok(Vec::new());
        };

        let mut refs: Vec<String> = inverted
            .get_docs(first)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default();
        for term in rest {
            let docs = inverted.get_docs(term);
            refs.retain(|doc_ref| docs.is_some_and(|docs| docs.contains_key(doc_ref)));
        }

        Ok(refs)
    }

    /// Get index statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            doc_count: self.len(),
            fields: self
                .fields
                .iter()
                .map(|field| FieldStats {
                    name: field.clone(),
                    token_count: self.index.get(field).map_or(0, InvertedIndex::token_count),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_index() -> Index {
        Index::new(IndexConfig::default()).unwrap()
    }

    #[test]
    fn test_new_index_layout() {
        let index = new_index();
        assert!(index.is_empty());
        assert_eq!(index.fields(), ["title", "body", "keywords"]);
        assert_eq!(index.ref_field(), "id");
        assert_eq!(index.version(), ELASTICLUNR_VERSION);

        let value: serde_json::Value = serde_json::from_str(&index.to_json().unwrap()).unwrap();
        assert_eq!(value["version"], "0.9.5");
        assert_eq!(value["ref"], "id");
        assert_eq!(value["documentStore"]["length"], 0);
        assert_eq!(value["documentStore"]["save"], true);
        assert_eq!(
            value["pipeline"],
            serde_json::json!(["trimmer", "stopWordFilter", "stemmer"])
        );
        assert_eq!(
            value["index"]["title"],
            serde_json::json!({"root": {"docs": {}, "df": 0}})
        );
    }

    #[test]
    fn test_term_frequency_and_field_length() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "", "", "run runs running walk the"))
            .unwrap();

        let postings = index.postings("body", "run").unwrap();
        assert_eq!(postings["a"].tf, 3f64.sqrt());
        assert_eq!(index.doc_freq("body", "walk"), 1);
        assert_eq!(index.field_length("a", "body"), 4);
        assert_eq!(index.field_length("a", "title"), 0);
    }

    #[test]
    fn test_update_removes_stale_tokens() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "Dragon", "", "fire"))
            .unwrap();
        index
            .update_doc(&Document::new("a", "Agent", "", "water"))
            .unwrap();

        assert_eq!(index.len(), 1);
        assert!(index.matching_refs("title", "dragon").unwrap().is_empty());
        assert!(index.matching_refs("body", "fire").unwrap().is_empty());
        assert_eq!(index.matching_refs("title", "agent").unwrap(), vec!["a"]);
        assert_eq!(index.doc_freq("title", "dragon"), 0);
    }

    #[test]
    fn test_update_without_stored_documents() {
        let config = IndexConfig {
            save_document: false,
            ..IndexConfig::default()
        };
        let mut index = Index::new(config).unwrap();
        index
            .update_doc(&Document::new("a", "Dragon", "", ""))
            .unwrap();
        index
            .update_doc(&Document::new("a", "Agent", "", ""))
            .unwrap();

        assert!(index.get_doc("a").is_none());
        assert!(index.has_doc("a"));
        assert!(index.matching_refs("title", "dragon").unwrap().is_empty());
        assert_eq!(index.matching_refs("title", "agent").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_remove_doc_by_ref() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "Dragon", "", ""))
            .unwrap();

        assert!(index.remove_doc_by_ref("a").unwrap());
        assert!(!index.remove_doc_by_ref("a").unwrap());
        assert!(index.is_empty());
        assert_eq!(index.doc_freq("title", "dragon"), 0);
    }

    #[test]
    fn test_matching_refs() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "", "", "quick brown fox"))
            .unwrap();
        index
            .update_doc(&Document::new("b", "", "", "quick red fox"))
            .unwrap();

        assert_eq!(index.matching_refs("body", "fox").unwrap(), vec!["a", "b"]);
        assert_eq!(index.matching_refs("body", "quick brown").unwrap(), vec!["a"]);
        assert!(index.matching_refs("body", "the").unwrap().is_empty());
        assert!(index.matching_refs("body", "green fox").unwrap().is_empty());
        assert!(index.matching_refs("summary", "fox").is_err());
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let mut index = new_index();
        let err = index
            .update_doc(&Document::new("", "Title", "", ""))
            .unwrap_err();
        assert!(err.is_invalid_document());
        assert!(index.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "Agent", "testagent", "The agent collects."))
            .unwrap();

        let json = index.to_json().unwrap();
        let loaded = Index::from_json(&json).unwrap();
        assert_eq!(loaded.to_json().unwrap(), json);
        assert_eq!(loaded.get_doc("a"), index.get_doc("a"));
        assert_eq!(loaded.stats(), index.stats());
    }

    #[test]
    fn test_accessors() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "Agent", "", ""))
            .unwrap();

        assert!(index.document_store().is_doc_stored());
        assert_eq!(index.document_store().field_length("a", "title"), 1);
        assert_eq!(
            index.pipeline().filter_names(),
            vec!["trimmer", "stopWordFilter", "stemmer"]
        );
        let title = index.inverted_index("title").unwrap();
        assert!(title.has_token("agent"));
        assert!(index.inverted_index("summary").is_none());
    }

    #[test]
    fn test_stats() {
        let mut index = new_index();
        index
            .update_doc(&Document::new("a", "Agent", "", "one two two"))
            .unwrap();

        let stats = index.stats();
        assert_eq!(stats.doc_count, 1);
        assert_eq!(
            stats.fields,
            vec![
                FieldStats { name: "title".to_string(), token_count: 1 },
                FieldStats { name: "body".to_string(), token_count: 2 },
                FieldStats { name: "keywords".to_string(), token_count: 0 },
            ]
        );
    }

    #[test]
    fn test_from_json_structural_errors() {
        let valid = new_index().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&valid).unwrap();

        let mut missing_field = value.clone();
        missing_field["index"].as_object_mut().unwrap().remove("body");
        let mut unknown_pipeline = value.clone();
        unknown_pipeline["pipeline"] = serde_json::json!(["trimmer", "lowercase"]);
        let mut empty_ref = value.clone();
        empty_ref["ref"] = serde_json::json!("");
        value.as_object_mut().unwrap().remove("documentStore");

        let mut cases: Vec<String> = ["", "{", "[]", "null", "not an index", r#"{"version":"0.9.5"}"#]
            .iter()
            .map(|s| s.to_string())
            .collect();
        cases.extend([missing_field, unknown_pipeline, empty_ref, value].map(|v| v.to_string()));

        for json in &cases {
            let err = Index::from_json(json).unwrap_err();
            assert!(err.is_malformed_index(), "{json}: {err}");
        }
    }

    #[test]
    fn test_other_version_is_accepted() {
        let mut value: serde_json::Value =
            serde_json::from_str(&new_index().to_json().unwrap()).unwrap();
        value["version"] = serde_json::json!("0.9.0");

        let index = Index::from_json(&value.to_string()).unwrap();
        assert_eq!(index.version(), "0.9.0");
        assert!(index.to_json().unwrap().contains(r#""version":"0.9.5""#));
    }

    #[test]
    fn test_long_token_round_trip() {
        let mut index = new_index();
        let long = "x".repeat(300);
        index.update_doc(&Document::new("a", "", "", &long)).unwrap();

        let loaded = Index::from_json(&index.to_json().unwrap()).unwrap();
        assert_eq!(loaded.doc_freq("body", &long), 1);
    }

    #[test]
    fn test_very_long_token_replace() {
        let long = "x".repeat(60_000);
        let mut index = new_index();
        index.update_doc(&Document::new("a", "T", "", &long)).unwrap();

        let mut loaded = Index::from_json(&index.to_json().unwrap()).unwrap();
        assert_eq!(loaded.doc_freq("body", &long), 1);

        loaded.update_doc(&Document::new("a", "T", "", "short")).unwrap();
        let reloaded = Index::from_json(&loaded.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.doc_freq("body", &long), 0);
        assert_eq!(reloaded.doc_freq("body", "short"), 1);
        assert_eq!(reloaded.len(), 1);
    }
}
