//! The document indexed by lunrdex.

use serde::{Deserialize, Serialize};

use crate::error::{LunrdexError, Result};

/// Name of the reference field.
pub const ID_FIELD: &str = "id";
/// Name of the title field.
pub const TITLE_FIELD: &str = "title";
/// Name of the keywords field.
pub const KEYWORDS_FIELD: &str = "keywords";
/// Name of the body field.
pub const BODY_FIELD: &str = "body";

/// A document represents a single page to be indexed.
///
/// Identity is `id` alone; `title`, `keywords` and `body` are indexed as
/// independently searchable fields. The serialized form keeps the field order
/// `id`, `title`, `keywords`, `body`, which is also how the document appears in
/// the document store of a serialized index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, typically the page URL
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Keywords, separated by spaces, commas or any other punctuation
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub body: String,
}

impl Document {
    /// Create a new document.
    pub fn new<I, T, K, B>(id: I, title: T, keywords: K, body: B) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        K: Into<String>,
        B: Into<String>,
    {
        Document {
            id: id.into(),
            title: title.into(),
            keywords: keywords.into(),
            body: body.into(),
        }
    }

    /// Create a builder for constructing documents.
    pub fn builder<S: Into<String>>(id: S) -> DocumentBuilder {
        DocumentBuilder::new(id)
    }

    /// Get a field value by name.
    ///
    /// Returns `None` for names that are not one of the four document fields.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            ID_FIELD => Some(&self.id),
            TITLE_FIELD => Some(&self.title),
            KEYWORDS_FIELD => Some(&self.keywords),
            BODY_FIELD => Some(&self.body),
            _ => None,
        }
    }

    /// Check that the document can be addressed in an index.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(LunrdexError::invalid_document(
                "document id must not be empty",
            ));
        }
        Ok(())
    }
}

/// A builder for constructing documents in a fluent manner.
#[derive(Debug)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new document builder for the given id.
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocumentBuilder {
            document: Document {
                id: id.into(),
                ..Document::default()
            },
        }
    }

    /// Set the title.
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.document.title = title.into();
        self
    }

    /// Set the keywords.
    pub fn keywords<S: Into<String>>(mut self, keywords: S) -> Self {
        self.document.keywords = keywords.into();
        self
    }

    /// Set the body.
    pub fn body<S: Into<String>>(mut self, body: S) -> Self {
        self.document.body = body.into();
        self
    }

    /// Build the final document.
    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let doc = Document::builder("agent.html")
            .title("Agent")
            .keywords("testagent")
            .body("The agent collects metrics.")
            .build();

        assert_eq!(
            doc,
            Document::new("agent.html", "Agent", "testagent", "The agent collects metrics.")
        );
    }

    #[test]
    fn test_field_lookup() {
        let doc = Document::new("a", "T", "k", "b");
        assert_eq!(doc.field("id"), Some("a"));
        assert_eq!(doc.field("title"), Some("T"));
        assert_eq!(doc.field("keywords"), Some("k"));
        assert_eq!(doc.field("body"), Some("b"));
        assert_eq!(doc.field("summary"), None);
    }

    #[test]
    fn test_validate() {
        assert!(Document::new("a", "", "", "").validate().is_ok());

        let err = Document::new("", "T", "k", "b").validate().unwrap_err();
        assert!(err.is_invalid_document());
    }

    #[test]
    fn test_serialized_field_order() {
        let doc = Document::new("fake.html", "Fake", "fake", "This is a fake test.");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"id":"fake.html","title":"Fake","keywords":"fake","body":"This is a fake test."}"#
        );
    }

    #[test]
    fn test_missing_text_fields_default_to_empty() {
        let doc: Document = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert_eq!(doc, Document::new("a", "", "", ""));
    }
}
