//! Index module for lunrdex.
//!
//! This module provides the in-memory index, its per-field inverted indexes
//! and its document store, all serializable in the elasticlunr layout.

pub mod config;
#[allow(clippy::module_inception)]
pub mod index;
pub mod inverted;
pub mod store;

// Re-export commonly used types
pub use config::IndexConfig;
pub use index::{ELASTICLUNR_VERSION, FieldStats, Index, IndexStats};
pub use inverted::{InvertedIndex, Postings, TermInfo, TrieNode};
pub use store::DocumentStore;
