//! Integration tests for file-backed indexes.

use std::fs;

use lunrdex::builder::IndexFile;
use lunrdex::document::Document;
use lunrdex::error::Result;
use lunrdex::index::Index;
use tempfile::TempDir;

#[test]
fn test_site_build_into_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("public").join("search_index.json");
    let file = IndexFile::new(&path);

    let pages = [
        Document::new("index.html", "Home", "start", "Welcome to the documentation."),
        Document::new("agent.html", "Agent", "testagent", "The agent collects metrics."),
        Document::new("fake.html", "Fake", "fake", "This is a fake test."),
    ];
    for page in &pages {
        file.upsert(page)?;
    }

    // Rebuilding the site replaces every page in place.
    for page in &pages {
        let outcome = file.upsert(page)?;
        assert!(outcome.replaced);
        assert_eq!(outcome.total_documents, 3);
    }

    let index = Index::from_json(&fs::read_to_string(&path)?)?;
    assert_eq!(index.len(), 3);
    assert_eq!(index.matching_refs("body", "document")?, vec!["index.html"]);
    assert_eq!(index.matching_refs("keywords", "testagent")?, vec!["agent.html"]);
    Ok(())
}

#[test]
fn test_invalid_document_leaves_file_untouched() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("search_index.json");
    let file = IndexFile::new(&path);

    file.upsert(&Document::new("a.html", "A", "", ""))?;
    let before = fs::read_to_string(&path)?;

    let err = file.upsert(&Document::new("", "B", "", "")).unwrap_err();
    assert!(err.is_invalid_document());
    assert_eq!(fs::read_to_string(&path)?, before);
    Ok(())
}

#[test]
fn test_file_written_by_upsert_is_plain_json() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("search_index.json");
    IndexFile::new(&path).upsert(&Document::new("a.html", "Agent", "", ""))?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(value["documentStore"]["docs"]["a.html"]["title"], "Agent");
    Ok(())
}
