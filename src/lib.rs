//! # lunrdex
//!
//! Incrementally builds full-text search indexes in the elasticlunr 0.9.5
//! JSON layout, one page at a time, so a static site generator can hand the
//! result straight to a browser-side search.
//!
//! ## Features
//!
//! - Pure function over a serialized index: `upsert(index, page) -> index`
//! - Independent `title`, `body` and `keywords` fields
//! - elasticlunr text analysis (trimmer, stop words, Porter stemmer)
//! - File-backed wrapper and a small CLI
//!
//! ## Example
//!
//! ```
//! let index = lunrdex::upsert(None, "agent.html", "Agent", "testagent", "The agent collects.").unwrap();
//! let index = lunrdex::upsert(Some(&index), "fake.html", "Fake", "fake", "This is a fake test.").unwrap();
//!
//! let loaded = lunrdex::index::Index::from_json(&index).unwrap();
//! assert_eq!(loaded.len(), 2);
//! ```

pub mod analysis;
pub mod builder;
pub mod cli;
pub mod document;
pub mod error;
pub mod index;

pub use builder::{IndexBuilder, IndexFile, IndexSource, upsert};
pub use document::Document;
pub use error::{LunrdexError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
